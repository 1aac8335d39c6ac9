//! Modal terminal forms built from a declarative element list.
//!
//! A form is described as an ordered list of elements (titles, labels,
//! lists, dropdowns, checkbox and radio groups, a button bar), shown as a
//! modal window, and answered with a [`FormResult`]: the closing status
//! plus the value of every named control when the form was accepted.
//!
//! ```no_run
//! use formbox::FormBuilder;
//!
//! let result = FormBuilder::new("Survey")
//!     .add_title("Survey")
//!     .add_radiobox("pick", ["X", "Y"])
//!     .add_buttons(["Accept", "Cancel"])
//!     .show()?;
//! println!("{}", result.to_json_pretty()?);
//! # Ok::<(), formbox::FormError>(())
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod input;
pub mod screen;
pub mod terminal;
pub mod ui;

pub use config::FormConfig;
pub use error::FormError;
pub use form::{
    ElementKind, ElementSpec, ExtractedValue, FormBuilder, FormDescription, FormResult, FormStatus, FormWindow, Host,
    Payload, ScriptedHost, TerminalHost, WindowEvent,
};
