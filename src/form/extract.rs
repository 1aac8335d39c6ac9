//! Kind-keyed table of value extractors

use super::element::ElementKind;
use super::result::ExtractedValue;
use crate::ui::widgets::{CheckboxGroup, Dropdown, ListView, RadioGroup};
use crate::ui::TreeWidget;
use std::collections::HashMap;
use std::rc::Rc;

/// Reads a control's current selection. Must not fail: nothing selected
/// yields an empty string or an empty sequence.
pub type Extractor = Rc<dyn Fn(&dyn TreeWidget) -> ExtractedValue>;

/// Mapping from element kind to extractor
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<ElementKind, Extractor>,
}

impl ExtractorRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with an extractor for every value-producing kind
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in ElementKind::ALL {
            if let Some(extractor) = standard_extractor(kind) {
                registry.extractors.insert(kind, extractor);
            }
        }
        registry
    }

    /// Add or replace the extractor for `kind`
    pub fn register(&mut self, kind: ElementKind, extractor: impl Fn(&dyn TreeWidget) -> ExtractedValue + 'static) {
        self.extractors.insert(kind, Rc::new(extractor));
    }

    pub fn get(&self, kind: ElementKind) -> Option<&Extractor> {
        self.extractors.get(&kind)
    }

    pub fn extract(&self, kind: ElementKind, control: &dyn TreeWidget) -> Option<ExtractedValue> {
        self.get(kind).map(|extractor| extractor(control))
    }
}

fn standard_extractor(kind: ElementKind) -> Option<Extractor> {
    let extractor: Extractor = match kind {
        ElementKind::Title | ElementKind::Label | ElementKind::Buttons => return None,
        ElementKind::Listbox => Rc::new(single_list),
        ElementKind::ListboxMultiple => Rc::new(multi_list),
        ElementKind::Choice => Rc::new(choice),
        ElementKind::Checkbox => Rc::new(checkbox_group),
        ElementKind::Radiobox => Rc::new(radio_group),
    };
    Some(extractor)
}

fn downcast<T: 'static>(control: &dyn TreeWidget) -> Option<&T> {
    control.as_any().downcast_ref::<T>()
}

fn single(text: Option<&str>) -> ExtractedValue {
    ExtractedValue::Single(text.unwrap_or_default().to_string())
}

fn multi(items: Option<Vec<&str>>) -> ExtractedValue {
    ExtractedValue::Multi(items.unwrap_or_default().into_iter().map(str::to_string).collect())
}

fn single_list(control: &dyn TreeWidget) -> ExtractedValue {
    single(downcast::<ListView>(control).and_then(|list| list.selected_items().first().copied()))
}

fn multi_list(control: &dyn TreeWidget) -> ExtractedValue {
    multi(downcast::<ListView>(control).map(|list| list.selected_items()))
}

fn choice(control: &dyn TreeWidget) -> ExtractedValue {
    single(downcast::<Dropdown>(control).and_then(|dropdown| dropdown.selected_text()))
}

fn checkbox_group(control: &dyn TreeWidget) -> ExtractedValue {
    multi(downcast::<CheckboxGroup>(control).map(|group| group.checked_labels()))
}

fn radio_group(control: &dyn TreeWidget) -> ExtractedValue {
    single(downcast::<RadioGroup>(control).and_then(|group| group.selected_label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::{SelectionMode, TextBlock};

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_standard_registry_covers_value_kinds_only() {
        let registry = ExtractorRegistry::standard();
        for kind in ElementKind::ALL {
            assert_eq!(registry.get(kind).is_some(), kind.produces_value(), "{kind}");
        }
    }

    #[test]
    fn test_empty_controls_extract_empty_values() {
        let registry = ExtractorRegistry::standard();
        let list = ListView::new(Vec::new(), SelectionMode::Single);
        let multi_list = ListView::new(Vec::new(), SelectionMode::Multiple);
        let dropdown = Dropdown::new(Vec::new());
        let checks = CheckboxGroup::new("", Vec::new());
        let radios = RadioGroup::new("", Vec::new());

        assert_eq!(registry.extract(ElementKind::Listbox, &list), Some("".into()));
        assert_eq!(registry.extract(ElementKind::ListboxMultiple, &multi_list), Some(ExtractedValue::Multi(vec![])));
        assert_eq!(registry.extract(ElementKind::Choice, &dropdown), Some("".into()));
        assert_eq!(registry.extract(ElementKind::Checkbox, &checks), Some(ExtractedValue::Multi(vec![])));
        assert_eq!(registry.extract(ElementKind::Radiobox, &radios), Some("".into()));
    }

    #[test]
    fn test_unselected_single_list_extracts_empty_string() {
        let registry = ExtractorRegistry::standard();
        let list = ListView::new(opts(&["red", "green"]), SelectionMode::Single);
        assert_eq!(registry.extract(ElementKind::Listbox, &list), Some("".into()));
    }

    #[test]
    fn test_late_registration_replaces_extractor() {
        let mut registry = ExtractorRegistry::standard();
        registry.register(ElementKind::Choice, |_| ExtractedValue::from("fixed"));
        let dropdown = Dropdown::new(opts(&["a"]));
        assert_eq!(registry.extract(ElementKind::Choice, &dropdown), Some("fixed".into()));
    }

    #[test]
    fn test_text_kinds_have_no_extractor() {
        let registry = ExtractorRegistry::standard();
        let label = TextBlock::label("hi");
        assert_eq!(registry.extract(ElementKind::Label, &label), None);
    }
}
