//! Widget tree system for hierarchical UI composition
//!
//! The widget tree provides:
//! - Hierarchical widget composition (containers and leaves)
//! - Automatic layout computation via the layout engine
//! - Recursive drawing with theme support
//! - Event routing with focus management
//! - Tab navigation between focusable widgets
//!
//! Containers always take the height of their content, so a tree can be
//! rendered onto a canvas exactly as tall as `intrinsic_height()`.

use super::layout::{compute_child_bounds, LayoutItem, Rect, Size, SizeHint};
use super::theme::Theme;
use super::widget::{mouse_position, EventResult};
use crate::input::InputEvent;
use crate::screen::Screen;
use std::any::Any;

/// A node in the widget tree - either a leaf widget or a container
pub enum WidgetNode {
    /// A leaf widget that draws itself
    Leaf {
        id: String,
        widget: Box<dyn TreeWidget>,
    },
    /// A container with layout and children
    Container {
        id: String,
        layout: ContainerLayout,
        children: Vec<WidgetNode>,
    },
}

/// Container layout direction
#[derive(Clone, Copy, Debug)]
pub enum ContainerLayout {
    /// Vertical stack (children arranged top to bottom)
    VStack { spacing: u16, padding: u16 },
    /// Horizontal stack (children arranged left to right)
    HStack { spacing: u16, padding: u16 },
}

impl WidgetNode {
    /// Create a new leaf widget node
    pub fn leaf(id: impl Into<String>, widget: impl TreeWidget + 'static) -> Self {
        WidgetNode::Leaf {
            id: id.into(),
            widget: Box::new(widget),
        }
    }

    /// Create a new vertical stack container
    pub fn vstack(id: impl Into<String>) -> ContainerBuilder {
        ContainerBuilder {
            id: id.into(),
            layout: ContainerLayout::VStack { spacing: 0, padding: 0 },
            children: Vec::new(),
        }
    }

    /// Create a new horizontal stack container
    pub fn hstack(id: impl Into<String>) -> ContainerBuilder {
        ContainerBuilder {
            id: id.into(),
            layout: ContainerLayout::HStack { spacing: 0, padding: 0 },
            children: Vec::new(),
        }
    }

    /// Get the ID of this node
    pub fn id(&self) -> &str {
        match self {
            WidgetNode::Leaf { id, .. } => id,
            WidgetNode::Container { id, .. } => id,
        }
    }

    /// Height this node needs to show all of its content
    pub fn intrinsic_height(&self) -> u16 {
        match self {
            WidgetNode::Leaf { widget, .. } => widget.size_hint().min_height,
            WidgetNode::Container { layout, children, .. } => match *layout {
                ContainerLayout::VStack { spacing, padding } => {
                    let gaps = spacing.saturating_mul((children.len() as u16).saturating_sub(1));
                    children
                        .iter()
                        .fold(0u16, |acc, c| acc.saturating_add(c.intrinsic_height()))
                        .saturating_add(gaps)
                        .saturating_add(padding * 2)
                }
                ContainerLayout::HStack { padding, .. } => children
                    .iter()
                    .map(|c| c.intrinsic_height())
                    .max()
                    .unwrap_or(0)
                    .saturating_add(padding * 2),
            },
        }
    }

    /// Convert this node into a LayoutItem for the layout engine
    fn to_layout_item(&self) -> LayoutItem {
        match self {
            WidgetNode::Leaf { id, widget } => {
                let hint = widget.size_hint();
                let mut item = LayoutItem::leaf(id.clone());
                item.min_width = hint.min_width;
                item.min_height = hint.min_height;
                if widget.wants_tight_width() && hint.min_width > 0 {
                    item.width = Size::Fixed(hint.min_width);
                } else if let Some(max) = widget.max_width() {
                    // Content width, never past the cap
                    let width = hint.min_width.min(max);
                    item.min_width = width;
                    item.width = Size::Fixed(width);
                } else if hint.flex > 0 {
                    item.width = Size::Flex(hint.flex);
                }
                item.height = Size::Fixed(hint.min_height);
                item
            }
            WidgetNode::Container { children, layout, .. } => {
                let child_items: Vec<LayoutItem> = children.iter().map(|c| c.to_layout_item()).collect();

                let item = match *layout {
                    ContainerLayout::VStack { spacing, padding } => {
                        LayoutItem::vstack(child_items).spacing(spacing).padding(padding)
                    }
                    ContainerLayout::HStack { spacing, padding } => {
                        LayoutItem::hstack(child_items).spacing(spacing).padding(padding)
                    }
                };
                item.fixed_height(self.intrinsic_height())
            }
        }
    }

    fn child_bounds(&self, bounds: Rect) -> Vec<Rect> {
        compute_child_bounds(&self.to_layout_item(), bounds)
    }

    /// Draw this node and all children
    pub fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        screen.push_clip(bounds.y, bounds.x, bounds.width, bounds.height);
        match self {
            WidgetNode::Leaf { widget, .. } => {
                widget.draw(screen, bounds, theme);
            }
            WidgetNode::Container { children, .. } => {
                let child_bounds = self.child_bounds(bounds);
                for (child, rect) in children.iter().zip(child_bounds) {
                    child.draw(screen, rect, theme);
                }
            }
        }
        screen.pop_clip();
    }

    fn find_path_at(&self, row: u16, col: u16, bounds: Rect) -> Option<Vec<String>> {
        match self {
            WidgetNode::Leaf { id, .. } => {
                if bounds.contains(row, col) {
                    Some(vec![id.clone()])
                } else {
                    None
                }
            }
            WidgetNode::Container { id, children, .. } => {
                let child_bounds = self.child_bounds(bounds);
                for (child, rect) in children.iter().zip(child_bounds) {
                    if !rect.contains(row, col) {
                        continue;
                    }
                    if let Some(mut path) = child.find_path_at(row, col, rect) {
                        path.insert(0, id.clone());
                        return Some(path);
                    }
                }
                None
            }
        }
    }

    /// Bounds of the node at `path`, given this node's bounds
    fn bounds_of(&self, path: &[String], bounds: Rect) -> Option<Rect> {
        if path.first().map(|s| s.as_str()) != Some(self.id()) {
            return None;
        }
        if path.len() == 1 {
            return Some(bounds);
        }
        match self {
            WidgetNode::Leaf { .. } => None,
            WidgetNode::Container { children, .. } => {
                let child_bounds = self.child_bounds(bounds);
                children
                    .iter()
                    .zip(child_bounds)
                    .find(|(child, _)| child.id() == path[1])
                    .and_then(|(child, rect)| child.bounds_of(&path[1..], rect))
            }
        }
    }

    fn dispatch_event(&mut self, event: &InputEvent, bounds: Rect, target_path: &[String], depth: usize) -> EventResult {
        if target_path.get(depth).map(|s| s.as_str()) != Some(self.id()) {
            return EventResult::Ignored;
        }

        let is_target = depth + 1 == target_path.len();

        match self {
            WidgetNode::Leaf { widget, .. } => {
                if !is_target {
                    return EventResult::Ignored;
                }
                widget.handle_event(event, bounds)
            }
            WidgetNode::Container { .. } if is_target => EventResult::Ignored,
            WidgetNode::Container { .. } => {
                let child_bounds = self.child_bounds(bounds);
                let WidgetNode::Container { children, .. } = self else {
                    return EventResult::Ignored;
                };
                for (child, rect) in children.iter_mut().zip(child_bounds) {
                    if child.id() == target_path[depth + 1] {
                        return child.dispatch_event(event, rect, target_path, depth + 1);
                    }
                }
                EventResult::Ignored
            }
        }
    }

    /// Find a widget by path (e.g., ["container", "child"])
    pub fn get_widget(&self, path: &[&str]) -> Option<&dyn TreeWidget> {
        if path.is_empty() {
            return None;
        }

        match self {
            WidgetNode::Leaf { id, widget } if id == path[0] => {
                if path.len() == 1 {
                    Some(widget.as_ref())
                } else {
                    None
                }
            }
            WidgetNode::Container { id, children, .. } if id == path[0] => {
                children.iter().find_map(|child| child.get_widget(&path[1..]))
            }
            _ => None,
        }
    }

    /// Find a mutable widget by path
    pub fn get_widget_mut(&mut self, path: &[&str]) -> Option<&mut dyn TreeWidget> {
        if path.is_empty() {
            return None;
        }

        match self {
            WidgetNode::Leaf { id, widget } if id == path[0] => {
                if path.len() == 1 {
                    Some(widget.as_mut())
                } else {
                    None
                }
            }
            WidgetNode::Container { id, children, .. } if id == path[0] => {
                for child in children {
                    if let Some(w) = child.get_widget_mut(&path[1..]) {
                        return Some(w);
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// Collect leaf paths in document order, optionally only focusable ones
    fn collect_leaves(&self, prefix: &[String], only_focusable: bool, out: &mut Vec<Vec<String>>) {
        let mut current_path = prefix.to_vec();
        current_path.push(self.id().to_string());

        match self {
            WidgetNode::Leaf { widget, .. } => {
                if !only_focusable || widget.focusable() {
                    out.push(current_path);
                }
            }
            WidgetNode::Container { children, .. } => {
                for child in children {
                    child.collect_leaves(&current_path, only_focusable, out);
                }
            }
        }
    }

    /// Collect all focusable widget paths in order
    pub fn collect_focusable(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        self.collect_leaves(&[], true, &mut out);
        out
    }

    /// Collect every leaf path, top to bottom
    pub fn collect_leaf_paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        self.collect_leaves(&[], false, &mut out);
        out
    }
}

/// Builder for creating container nodes
pub struct ContainerBuilder {
    id: String,
    layout: ContainerLayout,
    children: Vec<WidgetNode>,
}

impl ContainerBuilder {
    /// Set spacing between children
    pub fn spacing(mut self, spacing: u16) -> Self {
        match &mut self.layout {
            ContainerLayout::VStack { spacing: s, .. } => *s = spacing,
            ContainerLayout::HStack { spacing: s, .. } => *s = spacing,
        }
        self
    }

    /// Set padding around children
    pub fn padding(mut self, padding: u16) -> Self {
        match &mut self.layout {
            ContainerLayout::VStack { padding: p, .. } => *p = padding,
            ContainerLayout::HStack { padding: p, .. } => *p = padding,
        }
        self
    }

    /// Add a child node
    pub fn child(mut self, node: WidgetNode) -> Self {
        self.children.push(node);
        self
    }

    /// Add a leaf widget child
    pub fn leaf(mut self, id: impl Into<String>, widget: impl TreeWidget + 'static) -> Self {
        self.children.push(WidgetNode::leaf(id, widget));
        self
    }

    /// Build the container node
    pub fn build(self) -> WidgetNode {
        WidgetNode::Container {
            id: self.id,
            layout: self.layout,
            children: self.children,
        }
    }
}

/// The main widget tree container
pub struct WidgetTree {
    root: WidgetNode,
    theme: Theme,
    /// Path to currently focused widget (e.g., ["form", "el4", "btn0"])
    focus_path: Vec<String>,
}

impl WidgetTree {
    /// Create with a specific theme
    pub fn with_theme(root: WidgetNode, theme: Theme) -> Self {
        Self {
            root,
            theme,
            focus_path: Vec::new(),
        }
    }

    /// Get a reference to the theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn root(&self) -> &WidgetNode {
        &self.root
    }

    /// Draw the entire tree
    pub fn draw(&self, screen: &mut Screen, bounds: Rect) {
        self.root.draw(screen, bounds, &self.theme);
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        // Handle Tab/ShiftTab for focus navigation
        match event {
            InputEvent::Tab => {
                self.focus_next();
                return EventResult::Consumed;
            }
            InputEvent::ShiftTab => {
                self.focus_prev();
                return EventResult::Consumed;
            }
            _ => {}
        }

        let target_path = match mouse_position(event) {
            Some((row, col)) => self.root.find_path_at(row, col, bounds),
            None if self.focus_path.is_empty() => None,
            None => Some(self.focus_path.clone()),
        };

        if let Some(path) = target_path.as_ref() {
            if matches!(event, InputEvent::MouseClick { .. }) {
                let path_refs: Vec<&str> = path.iter().map(|s| s.as_str()).collect();
                if self.root.get_widget(&path_refs).is_some_and(|w| w.focusable()) {
                    self.set_focus(&path_refs);
                }
            }
        }

        match target_path {
            Some(path) => self.root.dispatch_event(event, bounds, &path, 0),
            None => EventResult::Ignored,
        }
    }

    /// Get a widget by path
    pub fn get_widget(&self, path: &[&str]) -> Option<&dyn TreeWidget> {
        self.root.get_widget(path)
    }

    /// Get a mutable widget by path
    pub fn get_widget_mut(&mut self, path: &[&str]) -> Option<&mut dyn TreeWidget> {
        self.root.get_widget_mut(path)
    }

    /// Bounds of the node at `path` when the root is laid out in `bounds`
    pub fn bounds_of(&self, path: &[String], bounds: Rect) -> Option<Rect> {
        self.root.bounds_of(path, bounds)
    }

    /// Move focus to the next focusable widget
    pub fn focus_next(&mut self) {
        let paths = self.root.collect_focusable();
        if paths.is_empty() {
            return;
        }

        let current_idx = paths.iter().position(|p| *p == self.focus_path);
        let next_idx = match current_idx {
            Some(idx) => (idx + 1) % paths.len(),
            None => 0,
        };

        self.update_focus(current_idx, next_idx, &paths);
    }

    /// Move focus to the previous focusable widget
    pub fn focus_prev(&mut self) {
        let paths = self.root.collect_focusable();
        if paths.is_empty() {
            return;
        }

        let current_idx = paths.iter().position(|p| *p == self.focus_path);
        let prev_idx = match current_idx {
            Some(idx) if idx > 0 => idx - 1,
            _ => paths.len() - 1,
        };

        self.update_focus(current_idx, prev_idx, &paths);
    }

    fn update_focus(&mut self, old_idx: Option<usize>, new_idx: usize, paths: &[Vec<String>]) {
        if let Some(path) = old_idx.and_then(|idx| paths.get(idx)) {
            let path_refs: Vec<&str> = path.iter().map(|s| s.as_str()).collect();
            if let Some(widget) = self.root.get_widget_mut(&path_refs) {
                widget.set_focus(false);
            }
        }

        if let Some(new_path) = paths.get(new_idx) {
            let path_refs: Vec<&str> = new_path.iter().map(|s| s.as_str()).collect();
            if let Some(widget) = self.root.get_widget_mut(&path_refs) {
                widget.set_focus(true);
            }
            self.focus_path = new_path.clone();
        }
    }

    /// Set focus on a specific widget path
    pub fn set_focus(&mut self, path: &[&str]) {
        if !self.focus_path.is_empty() {
            let old_path: Vec<&str> = self.focus_path.iter().map(|s| s.as_str()).collect();
            if let Some(widget) = self.root.get_widget_mut(&old_path) {
                widget.set_focus(false);
            }
        }

        if let Some(widget) = self.root.get_widget_mut(path) {
            widget.set_focus(true);
        }
        self.focus_path = path.iter().map(|s| s.to_string()).collect();
    }

    /// Get the current focus path
    pub fn focus_path(&self) -> &[String] {
        &self.focus_path
    }
}

/// Widget trait for use in widget trees
///
/// Widgets draw with theme colors and report size hints to the layout engine.
pub trait TreeWidget: Any {
    /// Draw the widget using theme colors
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme);

    /// Handle an input event routed to this widget
    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult;

    /// Whether this widget wants a tight (fixed) width using its minimum size hint.
    fn wants_tight_width(&self) -> bool {
        false
    }

    /// Upper bound on the widget's width; the layout clamps it to the stack
    fn max_width(&self) -> Option<u16> {
        None
    }

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Downcast support (mutable)
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Get size hint for layout engine
    fn size_hint(&self) -> SizeHint {
        SizeHint::default()
    }

    /// Whether this widget can receive keyboard focus
    fn focusable(&self) -> bool {
        false
    }

    /// Set focus state
    fn set_focus(&mut self, _focused: bool) {}
}
