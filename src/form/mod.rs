//! Form core: element model, kind registries, window lifecycle and hosts

pub mod assembler;
pub mod builder;
pub mod collect;
pub mod element;
pub mod extract;
pub mod factory;
pub mod host;
pub mod json;
pub mod reflow;
pub mod result;
pub mod window;

pub use assembler::{ButtonRole, ControlRegistration, ControlRegistry, FormAssembler};
pub use builder::FormBuilder;
pub use collect::collect;
pub use element::{ElementKind, ElementSpec, Payload};
pub use extract::{Extractor, ExtractorRegistry};
pub use factory::{ControlFactory, ControlHandle, FactoryContext, FactoryRegistry, FormContainer};
pub use host::{run_event_loop, Host, ScriptedHost, TerminalHost};
pub use json::{ElementDescription, FormDescription};
pub use reflow::ReflowEngine;
pub use result::{ExtractedValue, FormResult, FormStatus};
pub use window::{FormWindow, WindowEvent, WindowPhase};
