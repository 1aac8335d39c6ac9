//! Widget primitives for building forms
//!
//! - TextBlock: titles and wrapped labels
//! - ListView: single/multiple selection lists
//! - Dropdown: one-line choice
//! - CheckboxGroup / RadioGroup: framed toggle clusters
//! - Button, Spacer

mod button;
mod checkbox;
mod dropdown;
mod group;
mod listview;
mod radio;
mod spacer;
mod text;

pub use button::Button;
pub use checkbox::Checkbox;
pub use dropdown::Dropdown;
pub use group::{CheckboxGroup, RadioGroup};
pub use listview::{ListView, SelectionMode};
pub use radio::RadioButton;
pub use spacer::Spacer;
pub use text::{wrap_text, TextBlock, TextStyle};
