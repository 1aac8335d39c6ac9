//! Kind-keyed control factories and the container they attach to

use super::element::{ElementKind, Payload};
use crate::config::FormConfig;
use crate::error::FormError;
use crate::ui::widgets::{Button, CheckboxGroup, Dropdown, ListView, RadioGroup, SelectionMode, Spacer, TextBlock};
use crate::ui::WidgetNode;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Id of the vertical stack holding every form row
pub const CONTENT_ID: &str = "form";

/// Leaf id of a control wrapped in a centering row
const CENTERED_ID: &str = "control";

/// Location of a control in the window's widget tree
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ControlHandle(Vec<String>);

impl ControlHandle {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Path in the form the widget tree lookups take
    pub fn path(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.as_str()).collect()
    }

    /// Whether the node at `path` is this control or lies inside it
    pub fn contains(&self, path: &[String]) -> bool {
        path.starts_with(&self.0)
    }
}

impl fmt::Debug for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// The content column controls are attached to, top to bottom
pub struct FormContainer {
    children: Vec<WidgetNode>,
    spacing: u16,
    padding: u16,
}

impl FormContainer {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            children: Vec::new(),
            spacing: 1,
            padding: config.padding,
        }
    }

    /// Append a row spanning the column
    pub fn attach(&mut self, node: WidgetNode) -> ControlHandle {
        let handle = ControlHandle::new([CONTENT_ID, node.id()]);
        self.children.push(node);
        handle
    }

    /// Append a row with the control centered between flexible spacers
    pub fn attach_centered(&mut self, id: &str, control: WidgetNode) -> ControlHandle {
        let row = WidgetNode::hstack(id)
            .leaf("left", Spacer::new())
            .child(control)
            .leaf("right", Spacer::new())
            .build();
        self.children.push(row);
        ControlHandle::new([CONTENT_ID, id, CENTERED_ID])
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_node(self) -> WidgetNode {
        self.children
            .into_iter()
            .fold(
                WidgetNode::vstack(CONTENT_ID).spacing(self.spacing).padding(self.padding),
                |stack, child| stack.child(child),
            )
            .build()
    }
}

/// What a factory gets besides the payload
pub struct FactoryContext<'a> {
    pub container: &'a mut FormContainer,
    pub config: &'a FormConfig,
    /// Position of the element in the form, used for unique ids
    pub index: usize,
    pub name: Option<&'a str>,
}

impl FactoryContext<'_> {
    /// Unique widget id for the element being built
    pub fn element_id(&self) -> String {
        format!("el{}", self.index)
    }
}

/// Builds one control from its payload and attaches it to the container
pub type ControlFactory = Rc<dyn Fn(&Payload, &mut FactoryContext<'_>) -> Result<ControlHandle, FormError>>;

/// Mapping from element kind to control factory
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<ElementKind, ControlFactory>,
}

impl FactoryRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with a factory for every kind
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in ElementKind::ALL {
            registry.factories.insert(kind, standard_factory(kind));
        }
        registry
    }

    /// Add or replace the factory for `kind`
    pub fn register(
        &mut self,
        kind: ElementKind,
        factory: impl Fn(&Payload, &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> + 'static,
    ) {
        self.factories.insert(kind, Rc::new(factory));
    }

    pub fn create(&self, kind: ElementKind, data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
        let factory = self.factories.get(&kind).ok_or(FormError::MissingFactory(kind))?;
        factory(data, ctx)
    }
}

fn standard_factory(kind: ElementKind) -> ControlFactory {
    match kind {
        ElementKind::Title => Rc::new(create_title),
        ElementKind::Label => Rc::new(create_label),
        ElementKind::Listbox => Rc::new(create_listbox),
        ElementKind::ListboxMultiple => Rc::new(create_listbox_multiple),
        ElementKind::Choice => Rc::new(create_choice),
        ElementKind::Checkbox => Rc::new(create_checkbox),
        ElementKind::Radiobox => Rc::new(create_radiobox),
        ElementKind::Buttons => Rc::new(create_buttons),
    }
}

fn text_of(kind: ElementKind, data: &Payload) -> Result<&str, FormError> {
    data.as_text().ok_or(FormError::PayloadMismatch {
        kind,
        expected: "a text string",
    })
}

fn options_of(kind: ElementKind, data: &Payload) -> Result<Vec<String>, FormError> {
    data.as_options().map(<[String]>::to_vec).ok_or(FormError::PayloadMismatch {
        kind,
        expected: "a list of strings",
    })
}

fn create_title(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let text = text_of(ElementKind::Title, data)?;
    let id = ctx.element_id();
    Ok(ctx.container.attach(WidgetNode::leaf(id, TextBlock::title(text))))
}

fn create_label(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let text = text_of(ElementKind::Label, data)?;
    let id = ctx.element_id();
    Ok(ctx.container.attach(WidgetNode::leaf(id, TextBlock::label(text))))
}

fn create_list(kind: ElementKind, mode: SelectionMode, data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let mut list = ListView::new(options_of(kind, data)?, mode).with_max_width(ctx.config.max_element_width);
    if let Some(rows) = ctx.config.max_list_rows {
        list = list.with_max_rows(rows);
    }
    let id = ctx.element_id();
    Ok(ctx.container.attach_centered(&id, WidgetNode::leaf(CENTERED_ID, list)))
}

fn create_listbox(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    create_list(ElementKind::Listbox, SelectionMode::Single, data, ctx)
}

fn create_listbox_multiple(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    create_list(ElementKind::ListboxMultiple, SelectionMode::Multiple, data, ctx)
}

fn create_choice(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let dropdown = Dropdown::new(options_of(ElementKind::Choice, data)?).with_max_width(ctx.config.max_element_width);
    let id = ctx.element_id();
    Ok(ctx.container.attach_centered(&id, WidgetNode::leaf(CENTERED_ID, dropdown)))
}

fn create_checkbox(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let group = CheckboxGroup::new(ctx.name.unwrap_or_default(), options_of(ElementKind::Checkbox, data)?)
        .with_max_width(ctx.config.max_element_width);
    let id = ctx.element_id();
    Ok(ctx.container.attach_centered(&id, WidgetNode::leaf(CENTERED_ID, group)))
}

fn create_radiobox(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let group = RadioGroup::new(ctx.name.unwrap_or_default(), options_of(ElementKind::Radiobox, data)?)
        .with_max_width(ctx.config.max_element_width);
    let id = ctx.element_id();
    Ok(ctx.container.attach_centered(&id, WidgetNode::leaf(CENTERED_ID, group)))
}

/// Button bar; each button's action is its caption
fn create_buttons(data: &Payload, ctx: &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> {
    let captions = options_of(ElementKind::Buttons, data)?;
    let row = captions
        .iter()
        .enumerate()
        .fold(WidgetNode::hstack(ctx.element_id()).spacing(2).leaf("left", Spacer::new()), |row, (i, caption)| {
            row.leaf(format!("btn{}", i), Button::new(caption.clone(), caption.clone()))
        })
        .leaf("right", Spacer::new())
        .build();
    Ok(ctx.container.attach(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(kind: ElementKind, data: Payload) -> Result<(ControlHandle, WidgetNode), FormError> {
        let config = FormConfig::default();
        let mut container = FormContainer::new(&config);
        let mut ctx = FactoryContext {
            container: &mut container,
            config: &config,
            index: 0,
            name: Some("field"),
        };
        let handle = FactoryRegistry::standard().create(kind, &data, &mut ctx)?;
        Ok((handle, container.into_node()))
    }

    #[test]
    fn test_selection_controls_are_centered_leaves() {
        let (handle, root) = build(ElementKind::Listbox, Payload::options(["red", "green"])).expect("build");
        assert_eq!(handle.path(), vec!["form", "el0", "control"]);
        let list = root.get_widget(&handle.path()).and_then(|w| w.as_any().downcast_ref::<ListView>());
        assert_eq!(list.map(|l| l.items().len()), Some(2));
    }

    #[test]
    fn test_button_bar_keeps_caption_order() {
        let (handle, root) = build(ElementKind::Buttons, Payload::options(["Accept", "Cancel", "Help"])).expect("build");
        let labels: Vec<String> = root
            .collect_focusable()
            .iter()
            .filter(|path| handle.contains(path))
            .filter_map(|path| {
                let refs: Vec<&str> = path.iter().map(|s| s.as_str()).collect();
                root.get_widget(&refs)
                    .and_then(|w| w.as_any().downcast_ref::<Button>())
                    .map(|b| b.label().to_string())
            })
            .collect();
        assert_eq!(labels, vec!["Accept", "Cancel", "Help"]);
    }

    #[test]
    fn test_wrong_payload_shape_fails() {
        let err = build(ElementKind::Title, Payload::options(["x"])).err();
        assert!(matches!(err, Some(FormError::PayloadMismatch { kind: ElementKind::Title, .. })));
    }

    #[test]
    fn test_missing_factory_fails() {
        let config = FormConfig::default();
        let mut container = FormContainer::new(&config);
        let mut ctx = FactoryContext {
            container: &mut container,
            config: &config,
            index: 0,
            name: None,
        };
        let err = FactoryRegistry::empty()
            .create(ElementKind::Label, &Payload::Text("hi".into()), &mut ctx)
            .err();
        assert!(matches!(err, Some(FormError::MissingFactory(ElementKind::Label))));
    }

    #[test]
    fn test_empty_options_render() {
        let (handle, root) = build(ElementKind::Checkbox, Payload::Options(Vec::new())).expect("build");
        assert!(root.get_widget(&handle.path()).is_some());
    }
}
