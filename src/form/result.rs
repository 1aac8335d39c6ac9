//! The value a form session produces

use crate::error::FormError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How the window was closed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    /// An accept button was pressed
    Ok,
    /// A cancel button was pressed
    Cancel,
    /// Closed without a labeled button
    #[default]
    Close,
}

/// Value read from one control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedValue {
    /// Single selection; empty when nothing is selected
    Single(String),
    /// Multiple selection in option order
    Multi(Vec<String>),
}

impl ExtractedValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ExtractedValue::Single(s) => Some(s),
            ExtractedValue::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            ExtractedValue::Multi(v) => Some(v),
            ExtractedValue::Single(_) => None,
        }
    }
}

impl From<&str> for ExtractedValue {
    fn from(s: &str) -> Self {
        ExtractedValue::Single(s.to_string())
    }
}

impl From<Vec<&str>> for ExtractedValue {
    fn from(v: Vec<&str>) -> Self {
        ExtractedValue::Multi(v.into_iter().map(str::to_string).collect())
    }
}

/// Status plus the values of named controls
///
/// Values are only kept for [`FormStatus::Ok`]; any other status carries
/// an empty mapping whatever the caller passes in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResult {
    status: FormStatus,
    #[serde(rename = "form_elements")]
    values: IndexMap<String, ExtractedValue>,
}

impl FormResult {
    pub fn new(status: FormStatus, values: IndexMap<String, ExtractedValue>) -> Self {
        let values = if status == FormStatus::Ok { values } else { IndexMap::new() };
        Self { status, values }
    }

    /// Result of a window closed without pressing a labeled button
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn values(&self) -> &IndexMap<String, ExtractedValue> {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&ExtractedValue> {
        self.values.get(name)
    }

    pub fn into_values(self) -> IndexMap<String, ExtractedValue> {
        self.values
    }

    /// Pretty JSON: `{"status": ..., "form_elements": {...}}`
    pub fn to_json_pretty(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
