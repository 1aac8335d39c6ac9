//! Ordered-append builder, the public way to describe and show a form

use super::assembler::FormAssembler;
use super::element::{ElementKind, ElementSpec, Payload};
use super::extract::ExtractorRegistry;
use super::factory::{ControlHandle, FactoryContext, FactoryRegistry};
use super::host::{run_event_loop, Host, TerminalHost};
use super::result::{ExtractedValue, FormResult};
use super::window::FormWindow;
use crate::config::FormConfig;
use crate::error::FormError;
use crate::ui::TreeWidget;

/// Collects elements in order; `show` builds and runs the window
///
/// Names are not checked while appending. When two value elements share a
/// name the later one is the one read back.
#[derive(Clone)]
pub struct FormBuilder {
    title: String,
    config: FormConfig,
    elements: Vec<ElementSpec>,
    factories: FactoryRegistry,
    extractors: ExtractorRegistry,
}

impl FormBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            config: FormConfig::default(),
            elements: Vec::new(),
            factories: FactoryRegistry::standard(),
            extractors: ExtractorRegistry::standard(),
        }
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn elements(&self) -> &[ElementSpec] {
        &self.elements
    }

    /// Append a raw element
    pub fn push(mut self, element: ElementSpec) -> Self {
        self.elements.push(element);
        self
    }

    fn text(self, kind: ElementKind, text: impl Into<String>) -> Self {
        self.push(ElementSpec::new(kind, None, Payload::Text(text.into())))
    }

    fn options<I, S>(self, kind: ElementKind, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(ElementSpec::new(kind, Some(name.into()), Payload::options(options)))
    }

    pub fn add_title(self, text: impl Into<String>) -> Self {
        self.text(ElementKind::Title, text)
    }

    pub fn add_label(self, text: impl Into<String>) -> Self {
        self.text(ElementKind::Label, text)
    }

    pub fn add_listbox<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options(ElementKind::Listbox, name, options)
    }

    pub fn add_listbox_multiple<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options(ElementKind::ListboxMultiple, name, options)
    }

    pub fn add_choice<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options(ElementKind::Choice, name, options)
    }

    pub fn add_checkbox<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options(ElementKind::Checkbox, name, options)
    }

    pub fn add_radiobox<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options(ElementKind::Radiobox, name, options)
    }

    /// Button bar; `accept`/`aceptar`/`ok` accept, `cancel`/`cancelar` cancel
    pub fn add_buttons<I, S>(self, captions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(ElementSpec::new(ElementKind::Buttons, None, Payload::options(captions)))
    }

    /// Replace how values of `kind` are read
    pub fn register_extractor(
        mut self,
        kind: ElementKind,
        extractor: impl Fn(&dyn TreeWidget) -> ExtractedValue + 'static,
    ) -> Self {
        self.extractors.register(kind, extractor);
        self
    }

    /// Replace how controls of `kind` are built
    pub fn register_factory(
        mut self,
        kind: ElementKind,
        factory: impl Fn(&Payload, &mut FactoryContext<'_>) -> Result<ControlHandle, FormError> + 'static,
    ) -> Self {
        self.factories.register(kind, factory);
        self
    }

    /// Build the window without showing it
    pub fn assemble(&self) -> Result<FormWindow, FormError> {
        FormAssembler::new(self.config.clone(), self.factories.clone(), self.extractors.clone())
            .assemble(&self.title, &self.elements)
    }

    /// Show the form on the terminal and wait for it to close
    ///
    /// The form is assembled before the terminal is touched, so a bad
    /// element list fails without disturbing the screen.
    pub fn show(&self) -> Result<FormResult, FormError> {
        let mut window = self.assemble()?;
        let mut host = TerminalHost::new()?;
        run_event_loop(&mut window, &mut host)
    }

    /// Show the form on a caller-supplied host
    pub fn show_with(&self, host: &mut dyn Host) -> Result<FormResult, FormError> {
        let mut window = self.assemble()?;
        run_event_loop(&mut window, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::host::ScriptedHost;
    use crate::form::result::FormStatus;
    use crate::input::InputEvent;
    use crate::ui::widgets::RadioGroup;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn survey() -> FormBuilder {
        FormBuilder::new("Survey")
            .add_title("Survey")
            .add_label("Pick one:")
            .add_radiobox("pick", ["X", "Y"])
            .add_buttons(["Accept", "Cancel"])
    }

    #[test]
    fn test_survey_defaults_to_first_option() {
        // Radio group has focus; Tab moves to Accept
        let mut host = ScriptedHost::new(80, 24).with_input([InputEvent::Tab, InputEvent::Enter]);
        let result = survey().show_with(&mut host).expect("show");
        let json = serde_json::to_string(&result).expect("json");
        assert_eq!(json, r#"{"status":"ok","form_elements":{"pick":"X"}}"#);
    }

    #[test]
    fn test_append_order_is_kept() {
        let builder = survey();
        let kinds: Vec<ElementKind> = builder.elements().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Title, ElementKind::Label, ElementKind::Radiobox, ElementKind::Buttons]
        );
        let mut window = builder.assemble().expect("assemble");
        window.show(80, 24);
        assert_eq!(window.render_order(), kinds);
    }

    #[test]
    fn test_values_collected_before_controls_destroyed() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let extract_log = Rc::clone(&log);
        let builder = survey().register_extractor(ElementKind::Radiobox, move |control| {
            extract_log.borrow_mut().push("extract");
            let label = control
                .as_any()
                .downcast_ref::<RadioGroup>()
                .and_then(|g| g.selected_label())
                .unwrap_or_default();
            ExtractedValue::from(label)
        });

        let destroy_log = Rc::clone(&log);
        let mut host = ScriptedHost::new(80, 24)
            .with_input([InputEvent::CursorDown, InputEvent::Tab, InputEvent::Enter])
            .with_destroy_hook(move || destroy_log.borrow_mut().push("destroy"));

        let result = builder.show_with(&mut host).expect("show");
        assert_eq!(*log.borrow(), vec!["extract", "destroy"]);
        assert_eq!(result.get("pick"), Some(&ExtractedValue::from("Y")));
    }

    #[test]
    fn test_cancel_discards_values() {
        let mut host = ScriptedHost::new(80, 24).with_input([
            InputEvent::CursorDown,
            InputEvent::Tab,
            InputEvent::Tab,
            InputEvent::Enter,
        ]);
        let result = survey().show_with(&mut host).expect("show");
        assert_eq!(result.status(), FormStatus::Cancel);
        assert!(result.values().is_empty());
    }

    #[test]
    fn test_every_value_kind_reports() {
        use crate::ui::widgets::ListView;

        let builder = FormBuilder::new("All")
            .add_listbox("colors", ["red", "green", "blue"])
            .add_listbox_multiple("tags", ["a", "b", "c"])
            .add_checkbox("opts", ["A", "B", "C"])
            .add_buttons(["OK"]);
        let mut window = builder.assemble().expect("assemble");
        let mut host = ScriptedHost::new(80, 40);
        window.show(80, 40);
        window.control_mut::<ListView>("colors").expect("colors").select(1);
        let tags = window.control_mut::<ListView>("tags").expect("tags");
        tags.toggle(2);
        tags.toggle(0);
        window.press_button("OK", &mut host);

        let values = window.take_result().expect("result").into_values();
        assert_eq!(values.get("colors").and_then(|v| v.as_single()), Some("green"));
        assert_eq!(
            values.get("tags").and_then(|v| v.as_multi()),
            Some(&["a".to_string(), "c".to_string()][..])
        );
        assert_eq!(values.get("opts").and_then(|v| v.as_multi()), Some(&[][..]));
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["colors", "tags", "opts"]);
    }

    #[test]
    fn test_spanish_captions_bind() {
        let mut host = ScriptedHost::new(80, 24).with_input([InputEvent::Tab, InputEvent::Enter]);
        let result = FormBuilder::new("Encuesta")
            .add_choice("talla", ["S", "M"])
            .add_buttons(["Aceptar", "Cancelar"])
            .show_with(&mut host)
            .expect("show");
        assert_eq!(result.status(), FormStatus::Ok);
        assert_eq!(result.get("talla"), Some(&ExtractedValue::from("S")));
    }

    #[test]
    fn test_custom_factory_replaces_builtin() {
        use crate::ui::widgets::Button;
        use crate::ui::WidgetNode;

        let builder = FormBuilder::new("Custom")
            .register_factory(ElementKind::Label, |data, ctx| {
                let text = data.as_text().unwrap_or_default().to_uppercase();
                let id = ctx.element_id();
                Ok(ctx.container.attach(WidgetNode::leaf(id, Button::new(text, "noop"))))
            })
            .add_label("quiet");
        let mut window = builder.assemble().expect("assemble");
        window.show(40, 10);
        let mut screen = crate::screen::Screen::new(40, 10);
        window.draw(&mut screen);
        assert!((1..=10).any(|row| screen.row_text(row).contains("< QUIET >")));
    }
}
