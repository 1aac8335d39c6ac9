//! Element kinds and the element descriptions a form is built from

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminator selecting how an element renders and what it yields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Title,
    Label,
    Listbox,
    ListboxMultiple,
    Choice,
    Checkbox,
    Radiobox,
    Buttons,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Title,
        ElementKind::Label,
        ElementKind::Listbox,
        ElementKind::ListboxMultiple,
        ElementKind::Choice,
        ElementKind::Checkbox,
        ElementKind::Radiobox,
        ElementKind::Buttons,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Title => "title",
            ElementKind::Label => "label",
            ElementKind::Listbox => "listbox",
            ElementKind::ListboxMultiple => "listbox_multiple",
            ElementKind::Choice => "choice",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Radiobox => "radiobox",
            ElementKind::Buttons => "buttons",
        }
    }

    /// Static text that is wrapped on reflow
    pub fn is_text(self) -> bool {
        matches!(self, ElementKind::Title | ElementKind::Label)
    }

    /// Kinds whose control contributes a value to the result
    pub fn produces_value(self) -> bool {
        !self.is_text() && self != ElementKind::Buttons
    }

    /// Kinds that yield a sequence rather than a single string
    pub fn is_multi(self) -> bool {
        matches!(self, ElementKind::ListboxMultiple | ElementKind::Checkbox)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormError::UnknownKind(s.to_string()))
    }
}

/// Configuration data of one element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Text of a title or label
    Text(String),
    /// Options of a selection kind, or captions of a button bar
    Options(Vec<String>),
}

impl Payload {
    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Payload::Options(options.into_iter().map(Into::into).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Options(_) => None,
        }
    }

    pub fn as_options(&self) -> Option<&[String]> {
        match self {
            Payload::Options(options) => Some(options),
            Payload::Text(_) => None,
        }
    }
}

/// One form row: kind, optional result key and payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementSpec {
    pub kind: ElementKind,
    pub name: Option<String>,
    pub data: Payload,
}

impl ElementSpec {
    pub fn new(kind: ElementKind, name: Option<String>, data: Payload) -> Self {
        Self { kind, name, data }
    }

    /// Check that the payload has the shape the kind expects
    pub fn validate(&self) -> Result<(), FormError> {
        match (self.kind.is_text(), &self.data) {
            (true, Payload::Text(_)) | (false, Payload::Options(_)) => Ok(()),
            (true, Payload::Options(_)) => Err(FormError::PayloadMismatch {
                kind: self.kind,
                expected: "a text string",
            }),
            (false, Payload::Text(_)) => Err(FormError::PayloadMismatch {
                kind: self.kind,
                expected: "a list of strings",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.as_str().parse::<ElementKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = "slider".parse::<ElementKind>().unwrap_err();
        assert!(matches!(err, FormError::UnknownKind(ref s) if s == "slider"));
    }

    #[test]
    fn test_value_producing_kinds() {
        let producing: Vec<ElementKind> = ElementKind::ALL.into_iter().filter(|k| k.produces_value()).collect();
        assert_eq!(
            producing,
            vec![
                ElementKind::Listbox,
                ElementKind::ListboxMultiple,
                ElementKind::Choice,
                ElementKind::Checkbox,
                ElementKind::Radiobox,
            ]
        );
    }

    #[test]
    fn test_payload_shape_is_validated() {
        let bad = ElementSpec::new(ElementKind::Listbox, Some("x".into()), Payload::Text("red".into()));
        assert!(matches!(bad.validate(), Err(FormError::PayloadMismatch { .. })));
        let good = ElementSpec::new(ElementKind::Label, None, Payload::Text("hi".into()));
        assert!(good.validate().is_ok());
    }
}
