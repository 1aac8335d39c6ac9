//! Form error types.

use crate::form::ElementKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown element kind: {0}")]
    UnknownKind(String),

    #[error("element kind {kind} expects {expected}")]
    PayloadMismatch { kind: ElementKind, expected: &'static str },

    #[error("no control factory registered for {0}")]
    MissingFactory(ElementKind),

    #[error("no extractor registered for {0}")]
    MissingExtractor(ElementKind),

    #[error("invalid form description: {0}")]
    InvalidDescription(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
