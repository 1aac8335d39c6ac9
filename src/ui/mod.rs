//! Terminal widget layer the form is rendered with

pub mod layout;
pub mod scroll_view;
pub mod scrollbar;
pub mod theme;
pub mod widget;
pub mod widget_tree;
pub mod widgets;
pub mod window_chrome;

pub use layout::{LayoutItem, Rect, Size, SizeHint};
pub use scroll_view::ScrollView;
pub use theme::Theme;
pub use widget::EventResult;
pub use widget_tree::{TreeWidget, WidgetNode, WidgetTree};
