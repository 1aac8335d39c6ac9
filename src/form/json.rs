//! JSON form descriptions
//!
//! ```json
//! { "window_title": "Survey",
//!   "form_elements": {
//!     "heading": { "type": "title", "data": "Survey" },
//!     "pick":    { "type": "radiobox", "data": ["X", "Y"] },
//!     "bar":     { "type": "buttons" } } }
//! ```

use super::builder::FormBuilder;
use super::element::{ElementKind, ElementSpec, Payload};
use crate::config::FormConfig;
use crate::error::FormError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// Title used when neither the description nor the caller gives one
pub const DEFAULT_TITLE: &str = "Form";

/// Captions every `buttons` entry turns into, whatever its data says
pub const DESCRIPTION_BUTTONS: [&str; 2] = ["Accept", "Cancel"];

#[derive(Clone, Debug, Deserialize)]
pub struct ElementDescription {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// A whole form as read from JSON; elements keep document order
#[derive(Clone, Debug, Deserialize)]
pub struct FormDescription {
    #[serde(default)]
    pub window_title: Option<String>,
    #[serde(default)]
    pub form_elements: IndexMap<String, ElementDescription>,
}

impl FormDescription {
    pub fn parse(text: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, FormError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Turn the description into a builder, one element per entry
    ///
    /// `title` overrides `window_title`. Unknown types and malformed data
    /// fail here rather than when the form is shown.
    pub fn into_builder(self, title: Option<String>, config: FormConfig) -> Result<FormBuilder, FormError> {
        let title = title
            .or(self.window_title)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let mut builder = FormBuilder::new(title).with_config(config);
        for (name, element) in self.form_elements {
            builder = builder.push(element_spec(name, element)?);
        }
        Ok(builder)
    }
}

fn element_spec(name: String, element: ElementDescription) -> Result<ElementSpec, FormError> {
    let kind: ElementKind = element.kind.parse()?;
    let spec = match kind {
        ElementKind::Title | ElementKind::Label => {
            ElementSpec::new(kind, None, Payload::Text(text_data(&name, element.data)?))
        }
        ElementKind::Buttons => ElementSpec::new(kind, None, Payload::options(DESCRIPTION_BUTTONS)),
        _ => ElementSpec::new(kind, Some(name.clone()), Payload::Options(option_data(&name, element.data)?)),
    };
    Ok(spec)
}

fn text_data(name: &str, data: Option<Value>) -> Result<String, FormError> {
    match data {
        Some(Value::String(text)) => Ok(text),
        _ => Err(FormError::InvalidDescription(format!("{}: data must be a string", name))),
    }
}

fn option_data(name: &str, data: Option<Value>) -> Result<Vec<String>, FormError> {
    let invalid = || FormError::InvalidDescription(format!("{}: data must be a list of strings", name));
    let Some(Value::Array(items)) = data else {
        return Err(invalid());
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            _ => Err(invalid()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = r#"{
        "window_title": "Survey",
        "form_elements": {
            "heading": {"type": "title", "data": "Survey"},
            "prompt": {"type": "label", "data": "Pick one:"},
            "pick": {"type": "radiobox", "data": ["X", "Y"]},
            "colors": {"type": "listbox_multiple", "data": ["red", "green"]},
            "bar": {"type": "buttons", "data": ["Yes", "No"]}
        }
    }"#;

    #[test]
    fn test_elements_follow_document_order() {
        let builder = FormDescription::parse(SURVEY)
            .and_then(|d| d.into_builder(None, FormConfig::default()))
            .expect("builder");
        assert_eq!(builder.title(), "Survey");
        let kinds: Vec<ElementKind> = builder.elements().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Title,
                ElementKind::Label,
                ElementKind::Radiobox,
                ElementKind::ListboxMultiple,
                ElementKind::Buttons
            ]
        );
        assert_eq!(builder.elements()[2].name.as_deref(), Some("pick"));
        assert_eq!(builder.elements()[0].name, None);
    }

    #[test]
    fn test_buttons_always_accept_cancel() {
        let builder = FormDescription::parse(SURVEY)
            .and_then(|d| d.into_builder(None, FormConfig::default()))
            .expect("builder");
        let buttons = builder.elements().last().expect("buttons");
        assert_eq!(buttons.data, Payload::options(["Accept", "Cancel"]));
    }

    #[test]
    fn test_title_override_and_default() {
        let description = FormDescription::parse(r#"{"form_elements": {}}"#).expect("parse");
        let builder = description.clone().into_builder(None, FormConfig::default()).expect("builder");
        assert_eq!(builder.title(), "Form");
        let builder = description
            .into_builder(Some("Mine".into()), FormConfig::default())
            .expect("builder");
        assert_eq!(builder.title(), "Mine");
    }

    #[test]
    fn test_unknown_kind_fails() {
        let err = FormDescription::parse(r#"{"form_elements": {"x": {"type": "subtitle", "data": "hi"}}}"#)
            .and_then(|d| d.into_builder(None, FormConfig::default()))
            .err();
        assert!(matches!(err, Some(FormError::UnknownKind(kind)) if kind == "subtitle"));
    }

    #[test]
    fn test_malformed_data_fails() {
        for text in [
            r#"{"form_elements": {"x": {"type": "label"}}}"#,
            r#"{"form_elements": {"x": {"type": "choice", "data": "red"}}}"#,
            r#"{"form_elements": {"x": {"type": "choice", "data": ["red", 2]}}}"#,
        ] {
            let err = FormDescription::parse(text)
                .and_then(|d| d.into_builder(None, FormConfig::default()))
                .err();
            assert!(matches!(err, Some(FormError::InvalidDescription(_))), "{}", text);
        }
    }
}
