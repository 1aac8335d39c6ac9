//! Reading every registered control into the result mapping

use super::assembler::ControlRegistry;
use super::extract::ExtractorRegistry;
use super::result::ExtractedValue;
use crate::ui::WidgetTree;
use indexmap::IndexMap;
use tracing::warn;

/// Extract the current value of every registered control
///
/// Controls must still be alive. A control that cannot be found, or a
/// kind with no extractor, yields an empty value rather than a missing key.
pub fn collect(
    registry: &ControlRegistry,
    tree: &WidgetTree,
    extractors: &ExtractorRegistry,
) -> IndexMap<String, ExtractedValue> {
    let mut values = IndexMap::with_capacity(registry.len());
    for registration in registry.iter() {
        let value = tree
            .get_widget(&registration.handle.path())
            .and_then(|control| extractors.extract(registration.kind, control));
        let value = value.unwrap_or_else(|| {
            warn!(name = %registration.name, kind = %registration.kind, "control not readable, using empty value");
            if registration.kind.is_multi() {
                ExtractedValue::Multi(Vec::new())
            } else {
                ExtractedValue::Single(String::new())
            }
        });
        values.insert(registration.name.clone(), value);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::assembler::ControlRegistration;
    use crate::form::element::ElementKind;
    use crate::form::factory::ControlHandle;
    use crate::ui::widgets::{CheckboxGroup, ListView, SelectionMode};
    use crate::ui::{Theme, WidgetNode};

    fn tree() -> WidgetTree {
        let mut list = ListView::new(vec!["red".into(), "green".into(), "blue".into()], SelectionMode::Single);
        list.select(1);
        let mut group = CheckboxGroup::new("opts", vec!["A".into(), "B".into(), "C".into()]);
        group.set_checked(0, true);
        group.set_checked(2, true);
        let root = WidgetNode::vstack("form").leaf("el0", list).leaf("el1", group).build();
        WidgetTree::with_theme(root, Theme::default())
    }

    fn register(registry: &mut ControlRegistry, name: &str, kind: ElementKind, id: &str) {
        registry.register(ControlRegistration {
            name: name.to_string(),
            kind,
            handle: ControlHandle::new(["form", id]),
        });
    }

    #[test]
    fn test_collects_every_registration() {
        let mut registry = ControlRegistry::new();
        register(&mut registry, "colors", ElementKind::Listbox, "el0");
        register(&mut registry, "opts", ElementKind::Checkbox, "el1");

        let values = collect(&registry, &tree(), &ExtractorRegistry::standard());
        assert_eq!(values.get("colors"), Some(&ExtractedValue::from("green")));
        assert_eq!(values.get("opts"), Some(&ExtractedValue::from(vec!["A", "C"])));
    }

    #[test]
    fn test_unreadable_control_yields_empty_value() {
        let mut registry = ControlRegistry::new();
        register(&mut registry, "gone", ElementKind::ListboxMultiple, "el9");
        register(&mut registry, "colors", ElementKind::Listbox, "el0");

        let values = collect(&registry, &tree(), &ExtractorRegistry::empty());
        assert_eq!(values.get("gone"), Some(&ExtractedValue::Multi(vec![])));
        assert_eq!(values.get("colors"), Some(&ExtractedValue::Single(String::new())));
    }
}
