//! The modal form window and its lifecycle
//!
//! A window moves through `Constructing -> Shown -> [Collecting] ->
//! Closing(status) -> Terminal`. Only the accept path passes through
//! `Collecting`, and collection always finishes before the controls are
//! released.

use super::assembler::{ButtonRole, ControlRegistry};
use super::collect::collect;
use super::element::ElementKind;
use super::extract::ExtractorRegistry;
use super::factory::ControlHandle;
use super::host::Host;
use super::reflow::ReflowEngine;
use super::result::{ExtractedValue, FormResult, FormStatus};
use crate::config::FormConfig;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::widget::mouse_position;
use crate::ui::window_chrome::{draw_frame, is_close_box_click};
use crate::ui::{EventResult, Rect, ScrollView, WidgetTree};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, info};

/// Lifecycle state of a form window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPhase {
    Constructing,
    Shown,
    Collecting,
    Closing(FormStatus),
    Terminal,
}

/// Notifications a host delivers to the window
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowEvent {
    Input(InputEvent),
    Resize { width: u16, height: u16 },
    /// The window manager asked the window to close
    CloseRequested,
}

/// Everything the assembler hands over to a new window
pub(crate) struct WindowParts {
    pub title: String,
    pub config: FormConfig,
    pub tree: WidgetTree,
    pub registry: ControlRegistry,
    pub extractors: ExtractorRegistry,
    pub reflow: ReflowEngine,
    pub actions: HashMap<String, ButtonRole>,
    pub elements: Vec<(ElementKind, ControlHandle)>,
}

pub struct FormWindow {
    title: String,
    config: FormConfig,
    /// Live controls; `None` once the window has been destroyed
    tree: Option<WidgetTree>,
    registry: ControlRegistry,
    extractors: ExtractorRegistry,
    reflow: ReflowEngine,
    scroll: ScrollView,
    actions: HashMap<String, ButtonRole>,
    elements: Vec<(ElementKind, ControlHandle)>,
    phase: WindowPhase,
    result: Option<FormResult>,
    viewport: (u16, u16),
}

impl FormWindow {
    pub(crate) fn from_parts(parts: WindowParts) -> Self {
        Self {
            title: parts.title,
            config: parts.config,
            tree: Some(parts.tree),
            registry: parts.registry,
            extractors: parts.extractors,
            reflow: parts.reflow,
            scroll: ScrollView::new(),
            actions: parts.actions,
            elements: parts.elements,
            phase: WindowPhase::Constructing,
            result: None,
            viewport: (0, 0),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == WindowPhase::Terminal
    }

    /// The frozen result, once the window is terminal
    pub fn result(&self) -> Option<&FormResult> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<FormResult> {
        self.result.take()
    }

    /// Registered (named) controls
    pub fn controls(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn scroll(&self) -> &ScrollView {
        &self.scroll
    }

    /// Show the window in a viewport of the given size
    pub fn show(&mut self, width: u16, height: u16) {
        if self.phase != WindowPhase::Constructing {
            return;
        }
        self.viewport = (width, height);
        self.phase = WindowPhase::Shown;
        if let Some(tree) = self.tree.as_mut() {
            tree.focus_next();
        }
        self.relayout();
        info!(title = %self.title, width, height, "form shown");
    }

    /// Feed one host notification through the state machine
    pub fn dispatch(&mut self, event: WindowEvent, host: &mut dyn Host) {
        if self.phase != WindowPhase::Shown {
            return;
        }
        match event {
            WindowEvent::Resize { width, height } => {
                self.viewport = (width, height);
                self.relayout();
            }
            WindowEvent::CloseRequested => self.close(FormStatus::Close, host),
            WindowEvent::Input(input) => self.handle_input(input, host),
        }
    }

    /// Press the button labeled `caption` as if it was clicked
    ///
    /// Returns false when no such button exists or the window is not shown.
    pub fn press_button(&mut self, caption: &str, host: &mut dyn Host) -> bool {
        if self.phase != WindowPhase::Shown || !self.actions.contains_key(caption) {
            return false;
        }
        self.on_action(caption, host);
        true
    }

    /// Live control registered under `name`, downcast to its widget type
    pub fn control<T: 'static>(&self, name: &str) -> Option<&T> {
        let registration = self.registry.get(name)?;
        self.tree
            .as_ref()?
            .get_widget(&registration.handle.path())?
            .as_any()
            .downcast_ref::<T>()
    }

    pub fn control_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        let registration = self.registry.get(name)?;
        self.tree
            .as_mut()?
            .get_widget_mut(&registration.handle.path())?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Kinds of the built elements in the order they appear in the tree
    pub fn render_order(&self) -> Vec<ElementKind> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        let mut indices: Vec<usize> = tree
            .root()
            .collect_leaf_paths()
            .iter()
            .filter_map(|path| self.elements.iter().position(|(_, handle)| handle.contains(path)))
            .collect();
        indices.dedup();
        indices.into_iter().map(|i| self.elements[i].0).collect()
    }

    // Geometry, all in screen coordinates

    fn frame(&self) -> Rect {
        let (vw, vh) = self.viewport;
        match self.config.frame_size {
            Some((w, h)) => {
                let (w, h) = (w.min(vw), h.min(vh));
                Rect::new(1 + (vw - w) / 2, 1 + (vh - h) / 2, w, h)
            }
            None => Rect::new(1, 1, vw, vh),
        }
    }

    /// Area content is shown in; the rightmost inner column holds the scrollbar
    fn interior(&self) -> Rect {
        let inner = self.frame().inset(1);
        Rect::new(inner.x, inner.y, inner.width.saturating_sub(1), inner.height)
    }

    fn track(&self) -> Rect {
        let frame = self.frame();
        Rect::new(frame.x + frame.width.saturating_sub(2), frame.y + 1, 1, frame.height.saturating_sub(2))
    }

    fn content_x(&self) -> u16 {
        let interior = self.interior();
        interior.x + interior.width.saturating_sub(self.reflow.content_width()) / 2
    }

    fn content_height(&self) -> u16 {
        self.tree.as_ref().map_or(0, |tree| tree.root().intrinsic_height())
    }

    /// Where the tree is laid out on its off-screen canvas
    fn canvas_bounds(&self) -> Rect {
        Rect::new(1, 1, self.reflow.content_width(), self.content_height())
    }

    fn relayout(&mut self) {
        let interior = self.interior();
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        self.reflow.reflow(tree, interior.width);
        self.scroll
            .fit(tree.root().intrinsic_height() as usize, interior.height as usize);
    }

    /// Scroll the focused control into view
    fn reveal_focus(&mut self) {
        let canvas = self.canvas_bounds();
        let Some(tree) = self.tree.as_ref() else {
            return;
        };
        if let Some(bounds) = tree.bounds_of(tree.focus_path(), canvas) {
            self.scroll
                .ensure_visible(bounds.y.saturating_sub(1) as usize, bounds.height as usize);
        }
    }

    fn handle_input(&mut self, input: InputEvent, host: &mut dyn Host) {
        if input.is_close_request() {
            self.close(FormStatus::Close, host);
            return;
        }
        if let InputEvent::MouseClick { row, col } = input {
            if is_close_box_click(row, col, self.frame()) {
                self.close(FormStatus::Close, host);
                return;
            }
        }

        let interior = self.interior();
        let track = self.track();

        // The window scrollbar owns its column and any drag it started
        let on_track = mouse_position(&input).is_some_and(|(row, col)| track.contains(row, col));
        let drag = matches!(input, InputEvent::MouseDrag { .. } | InputEvent::MouseRelease { .. });
        if (on_track || drag) && self.scroll.handle_event(&input, interior, track) {
            return;
        }
        if mouse_position(&input).is_some_and(|(row, col)| !interior.contains(row, col)) {
            self.scroll.handle_event(&input, interior, track);
            return;
        }

        let d_row = 1 + self.scroll.offset() as i32 - interior.y as i32;
        let d_col = 1 - self.content_x() as i32;
        let translated = input.translated(d_row, d_col);
        let canvas = self.canvas_bounds();
        let Some(tree) = self.tree.as_mut() else {
            return;
        };

        match tree.handle_event(&translated, canvas) {
            EventResult::Action(action) => self.on_action(&action, host),
            EventResult::Consumed => {
                self.relayout();
                if mouse_position(&input).is_none() {
                    self.reveal_focus();
                }
            }
            EventResult::Ignored if input == InputEvent::Escape => self.close(FormStatus::Close, host),
            EventResult::Ignored => {
                self.scroll.handle_event(&input, interior, track);
            }
        }
    }

    fn on_action(&mut self, caption: &str, host: &mut dyn Host) {
        match self.actions.get(caption).copied().unwrap_or(ButtonRole::Inert) {
            ButtonRole::Accept => self.accept(host),
            ButtonRole::Cancel => self.close(FormStatus::Cancel, host),
            ButtonRole::Inert => debug!(caption, "button has no bound behavior"),
        }
    }

    fn accept(&mut self, host: &mut dyn Host) {
        self.phase = WindowPhase::Collecting;
        let values = self
            .tree
            .as_ref()
            .map(|tree| collect(&self.registry, tree, &self.extractors))
            .unwrap_or_default();
        debug!(values = values.len(), "values collected");
        self.close_with(FormStatus::Ok, values, host);
    }

    fn close(&mut self, status: FormStatus, host: &mut dyn Host) {
        self.close_with(status, IndexMap::new(), host);
    }

    fn close_with(&mut self, status: FormStatus, values: IndexMap<String, ExtractedValue>, host: &mut dyn Host) {
        self.phase = WindowPhase::Closing(status);
        self.result = Some(FormResult::new(status, values));
        host.on_destroy();
        self.tree = None;
        self.phase = WindowPhase::Terminal;
        info!(?status, "form closed");
    }

    /// Render the window into `screen`, sized to the viewport
    pub fn draw(&self, screen: &mut Screen) {
        let Some(tree) = self.tree.as_ref() else {
            return;
        };
        let theme = tree.theme();
        screen.clear_with(theme.desktop_fg, theme.desktop_bg);
        draw_frame(screen, self.frame(), &self.title, theme);

        let interior = self.interior();
        let canvas_bounds = self.canvas_bounds();
        if canvas_bounds.width > 0 && canvas_bounds.height > 0 && interior.height > 0 {
            let mut canvas = Screen::new(canvas_bounds.width, canvas_bounds.height);
            canvas.clear_with(theme.window_fg, theme.window_bg);
            tree.draw(&mut canvas, canvas_bounds);

            let offset = self.scroll.offset() as u16;
            let rows = interior.height.min(canvas_bounds.height.saturating_sub(offset));
            screen.push_clip(interior.y, interior.x, interior.width, interior.height);
            screen.blit(&canvas, 1 + offset, interior.y, self.content_x(), rows);
            screen.pop_clip();
        }

        self.scroll.draw_scrollbar(screen, self.track(), theme);
    }
}

impl std::fmt::Debug for FormWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormWindow")
            .field("title", &self.title)
            .field("phase", &self.phase)
            .field("controls", &self.registry.iter().map(|r| &r.name).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::assembler::FormAssembler;
    use crate::form::element::{ElementSpec, Payload};
    use crate::form::host::ScriptedHost;
    use crate::ui::widgets::{CheckboxGroup, ListView, TextBlock};

    fn spec(kind: ElementKind, name: Option<&str>, data: Payload) -> ElementSpec {
        ElementSpec::new(kind, name.map(str::to_string), data)
    }

    fn sample() -> Vec<ElementSpec> {
        vec![
            spec(ElementKind::Title, None, Payload::Text("Survey".into())),
            spec(ElementKind::Label, None, Payload::Text("Pick some".into())),
            spec(ElementKind::Listbox, Some("colors"), Payload::options(["red", "green", "blue"])),
            spec(ElementKind::ListboxMultiple, Some("tags"), Payload::options(["a", "b"])),
            spec(ElementKind::Choice, Some("size"), Payload::options(["S", "M"])),
            spec(ElementKind::Checkbox, Some("opts"), Payload::options(["A", "B", "C"])),
            spec(ElementKind::Radiobox, Some("pick"), Payload::options(["X", "Y"])),
            spec(ElementKind::Buttons, None, Payload::options(["Accept", "Cancel", "Help"])),
        ]
    }

    fn shown(elements: &[ElementSpec]) -> FormWindow {
        let mut window = FormAssembler::standard(FormConfig::default())
            .assemble("Survey", elements)
            .expect("assemble");
        window.show(80, 40);
        window
    }

    #[test]
    fn test_render_order_matches_element_order() {
        let elements = sample();
        let window = shown(&elements);
        let kinds: Vec<ElementKind> = elements.iter().map(|e| e.kind).collect();
        assert_eq!(window.render_order(), kinds);
    }

    #[test]
    fn test_listbox_selection_round_trip() {
        let mut window = shown(&sample());
        let mut host = ScriptedHost::new(80, 40);
        window.control_mut::<ListView>("colors").expect("listbox").select(1);
        assert!(window.press_button("Accept", &mut host));

        let result = window.result().expect("result");
        assert_eq!(result.status(), FormStatus::Ok);
        assert_eq!(result.get("colors"), Some(&ExtractedValue::from("green")));
    }

    #[test]
    fn test_checkbox_values_follow_option_order() {
        let mut window = shown(&sample());
        let mut host = ScriptedHost::new(80, 40);
        let group = window.control_mut::<CheckboxGroup>("opts").expect("checkbox");
        group.toggle(2);
        group.toggle(0);
        window.press_button("Accept", &mut host);

        let result = window.result().expect("result");
        assert_eq!(result.get("opts"), Some(&ExtractedValue::from(vec!["A", "C"])));
    }

    #[test]
    fn test_cancel_and_close_discard_selections() {
        let mut window = shown(&sample());
        let mut host = ScriptedHost::new(80, 40);
        window.control_mut::<ListView>("colors").expect("listbox").select(2);
        window.press_button("Cancel", &mut host);
        let result = window.result().expect("result");
        assert_eq!(result.status(), FormStatus::Cancel);
        assert!(result.values().is_empty());

        let mut window = shown(&sample());
        window.control_mut::<ListView>("colors").expect("listbox").select(2);
        window.dispatch(WindowEvent::CloseRequested, &mut host);
        let result = window.result().expect("result");
        assert_eq!(result.status(), FormStatus::Close);
        assert!(result.values().is_empty());
    }

    #[test]
    fn test_empty_options_yield_empty_values() {
        let elements = vec![
            spec(ElementKind::Listbox, Some("one"), Payload::Options(Vec::new())),
            spec(ElementKind::ListboxMultiple, Some("many"), Payload::Options(Vec::new())),
            spec(ElementKind::Choice, Some("choice"), Payload::Options(Vec::new())),
            spec(ElementKind::Checkbox, Some("boxes"), Payload::Options(Vec::new())),
            spec(ElementKind::Radiobox, Some("radio"), Payload::Options(Vec::new())),
            spec(ElementKind::Buttons, None, Payload::options(["OK"])),
        ];
        let mut window = shown(&elements);
        let mut host = ScriptedHost::new(80, 40);
        window.press_button("OK", &mut host);

        let result = window.result().expect("result");
        assert_eq!(result.get("one"), Some(&ExtractedValue::Single(String::new())));
        assert_eq!(result.get("many"), Some(&ExtractedValue::Multi(vec![])));
        assert_eq!(result.get("choice"), Some(&ExtractedValue::Single(String::new())));
        assert_eq!(result.get("boxes"), Some(&ExtractedValue::Multi(vec![])));
        assert_eq!(result.get("radio"), Some(&ExtractedValue::Single(String::new())));
    }

    #[test]
    fn test_inert_button_keeps_window_open() {
        let mut window = shown(&sample());
        let mut host = ScriptedHost::new(80, 40);
        assert!(window.press_button("Help", &mut host));
        assert_eq!(window.phase(), WindowPhase::Shown);
        assert!(!window.press_button("Missing", &mut host));
    }

    #[test]
    fn test_controls_released_after_close() {
        let mut window = shown(&sample());
        let mut host = ScriptedHost::new(80, 40);
        window.press_button("Accept", &mut host);
        assert!(window.is_terminal());
        assert!(host.destroyed());
        assert!(window.control::<ListView>("colors").is_none());

        // Terminal windows ignore further events
        window.dispatch(WindowEvent::CloseRequested, &mut host);
        assert_eq!(window.result().map(|r| r.status()), Some(FormStatus::Ok));
    }

    #[test]
    fn test_resize_rewraps_labels() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let elements = vec![spec(ElementKind::Label, None, Payload::Text(text.into()))];
        let mut window = shown(&elements);
        let mut host = ScriptedHost::new(80, 40);
        let label = |w: &FormWindow| {
            let tree = w.tree.as_ref().expect("tree");
            tree.get_widget(&["form", "el0"])
                .and_then(|c| c.as_any().downcast_ref::<TextBlock>())
                .map(|b| b.text().to_string())
                .unwrap_or_default()
        };
        assert_eq!(label(&window), text);

        window.dispatch(WindowEvent::Resize { width: 24, height: 40 }, &mut host);
        let narrow = label(&window);
        assert!(narrow.lines().count() > 1);

        window.dispatch(WindowEvent::Resize { width: 80, height: 40 }, &mut host);
        assert_eq!(label(&window), text);
    }

    #[test]
    fn test_tall_form_scrolls_to_focused_control() {
        let options: Vec<String> = (0..10).map(|i| format!("option {}", i)).collect();
        let elements = vec![
            spec(ElementKind::Checkbox, Some("first"), Payload::Options(options.clone())),
            spec(ElementKind::Checkbox, Some("second"), Payload::Options(options)),
            spec(ElementKind::Buttons, None, Payload::options(["Accept"])),
        ];
        let mut window = shown(&elements);
        let mut host = ScriptedHost::new(80, 40);
        window.dispatch(WindowEvent::Resize { width: 80, height: 16 }, &mut host);
        assert!(window.scroll().needs_scrollbar());
        assert_eq!(window.scroll().offset(), 0);

        window.dispatch(WindowEvent::Input(InputEvent::Tab), &mut host);
        window.dispatch(WindowEvent::Input(InputEvent::Tab), &mut host);
        assert!(window.scroll().offset() > 0);
    }

    #[test]
    fn test_long_list_leaves_scrolling_to_window() {
        let options: Vec<String> = (0..20).map(|i| format!("o{}", i)).collect();
        let elements = vec![
            spec(ElementKind::Listbox, Some("many"), Payload::Options(options)),
            spec(ElementKind::Buttons, None, Payload::options(["Accept"])),
        ];
        let mut window = FormAssembler::standard(FormConfig::default())
            .assemble("Long", &elements)
            .expect("assemble");
        window.show(80, 60);
        assert!(!window.scroll().needs_scrollbar());

        let mut screen = Screen::new(80, 60);
        window.draw(&mut screen);
        let text: Vec<String> = (1..=60).map(|row| screen.row_text(row)).collect();
        for i in 0..20 {
            let option = format!("o{} ", i);
            assert!(text.iter().any(|line| line.contains(&option)), "missing {}", option);
        }
        assert_eq!(window.control::<ListView>("many").map(|l| l.scroll_offset()), Some(0));

        let mut host = ScriptedHost::new(80, 60);
        window.dispatch(WindowEvent::Resize { width: 80, height: 12 }, &mut host);
        assert!(window.scroll().needs_scrollbar());
        assert!(window.scroll().content_height() > 20);
    }

    #[test]
    fn test_draw_shows_frame_and_content() {
        let window = shown(&sample());
        let mut screen = Screen::new(80, 40);
        window.draw(&mut screen);
        let text: Vec<String> = (1..=40).map(|row| screen.row_text(row)).collect();
        assert!(text[0].contains(" Survey "));
        assert!(text[0].contains("[x]"));
        assert!(text.iter().any(|line| line.contains("< Accept >")));
        assert!(text.iter().any(|line| line.contains("Pick some")));
    }
}
