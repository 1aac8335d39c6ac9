//! Width clamping and text re-wrapping on viewport changes

use super::factory::ControlHandle;
use crate::config::FormConfig;
use crate::ui::widgets::TextBlock;
use crate::ui::WidgetTree;
use std::collections::HashMap;
use tracing::debug;

/// Owns the unwrapped source text of every text control
///
/// Controls only hold their displayed (wrapped) text; the canonical string
/// lives here, keyed by handle, and every reflow starts from it.
#[derive(Clone, Debug)]
pub struct ReflowEngine {
    originals: HashMap<ControlHandle, String>,
    max_container_width: u16,
    padding: u16,
    content_width: u16,
}

impl ReflowEngine {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            originals: HashMap::new(),
            max_container_width: config.max_container_width,
            padding: config.padding,
            content_width: 0,
        }
    }

    /// Remember a text control's source string
    pub fn track(&mut self, handle: ControlHandle, original: impl Into<String>) {
        self.originals.insert(handle, original.into());
    }

    pub fn original(&self, handle: &ControlHandle) -> Option<&str> {
        self.originals.get(handle).map(|s| s.as_str())
    }

    /// Content width chosen by the last reflow
    pub fn content_width(&self) -> u16 {
        self.content_width
    }

    /// Width of the content column for a viewport of `viewport_width`
    pub fn effective_width(&self, viewport_width: u16) -> u16 {
        viewport_width.min(self.max_container_width)
    }

    /// Clamp the content width and re-wrap every text control from its
    /// source string. Idempotent; returns the content width.
    pub fn reflow(&mut self, tree: &mut WidgetTree, viewport_width: u16) -> u16 {
        let width = self.effective_width(viewport_width);
        let wrap_width = width.saturating_sub(self.padding * 2).max(1);

        for (handle, original) in &self.originals {
            let block = tree
                .get_widget_mut(&handle.path())
                .and_then(|w| w.as_any_mut().downcast_mut::<TextBlock>());
            if let Some(block) = block {
                block.set_text(original.as_str());
                block.wrap(wrap_width);
            }
        }

        debug!(viewport_width, width, wrap_width, "reflow");
        self.content_width = width;
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Theme, WidgetNode};

    const TEXT: &str = "a fairly long label that needs wrapping on narrow screens";

    fn setup() -> (ReflowEngine, WidgetTree, ControlHandle) {
        let root = WidgetNode::vstack("form").leaf("el0", TextBlock::label(TEXT)).build();
        let tree = WidgetTree::with_theme(root, Theme::default());
        let handle = ControlHandle::new(["form", "el0"]);
        let mut engine = ReflowEngine::new(&FormConfig::default());
        engine.track(handle.clone(), TEXT);
        (engine, tree, handle)
    }

    fn text(tree: &WidgetTree, handle: &ControlHandle) -> String {
        tree.get_widget(&handle.path())
            .and_then(|w| w.as_any().downcast_ref::<TextBlock>())
            .map(|b| b.text().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_reflow_twice_matches_once() {
        let (mut engine, mut tree, handle) = setup();
        engine.reflow(&mut tree, 20);
        let once = text(&tree, &handle);
        engine.reflow(&mut tree, 20);
        assert_eq!(text(&tree, &handle), once);
        assert!(once.contains('\n'));
    }

    #[test]
    fn test_narrow_then_wide_restores_long_lines() {
        let (mut engine, mut tree, handle) = setup();
        engine.reflow(&mut tree, 16);
        engine.reflow(&mut tree, 200);
        assert_eq!(text(&tree, &handle), TEXT);
    }

    #[test]
    fn test_width_is_clamped_to_container_max() {
        let (mut engine, mut tree, _) = setup();
        assert_eq!(engine.reflow(&mut tree, 200), 72);
        assert_eq!(engine.reflow(&mut tree, 40), 40);
    }

    #[test]
    fn test_wrapped_lines_fit_inside_padding() {
        let (mut engine, mut tree, handle) = setup();
        engine.reflow(&mut tree, 20);
        assert!(text(&tree, &handle).lines().all(|l| l.chars().count() <= 18));
    }
}
