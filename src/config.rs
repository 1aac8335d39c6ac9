//! Form layout configuration.
//!
//! All sizes are terminal cells.

use crate::error::FormError;
use crate::ui::Theme;
use serde::{Deserialize, Serialize};

/// Built-in color schemes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Form,
    Dark,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Widest the content column may get, however wide the window is
    pub max_container_width: u16,
    /// Width cap for lists, dropdowns and groups
    pub max_element_width: u16,
    /// Horizontal and vertical padding inside the content column
    pub padding: u16,
    /// Rows a list shows before it scrolls internally; `None` shows every
    /// option and leaves overflow to the window's scroll region
    pub max_list_rows: Option<u16>,
    /// Fixed frame size; `None` fills the terminal
    pub frame_size: Option<(u16, u16)>,
    pub theme: ThemeName,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_container_width: 72,
            max_element_width: 60,
            padding: 1,
            max_list_rows: None,
            frame_size: None,
            theme: ThemeName::Form,
        }
    }
}

impl FormConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep defaults
    pub fn from_json(text: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn theme(&self) -> Theme {
        match self.theme {
            ThemeName::Form => Theme::form(),
            ThemeName::Dark => Theme::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FormConfig::from_json(r#"{"padding": 2, "theme": "dark"}"#).expect("parse");
        assert_eq!(config.padding, 2);
        assert_eq!(config.theme, ThemeName::Dark);
        assert_eq!(config.max_container_width, 72);
        assert_eq!(config.frame_size, None);
        assert_eq!(config.max_list_rows, None);
    }

    #[test]
    fn test_list_row_cap_is_opt_in() {
        let config = FormConfig::from_json(r#"{"max_list_rows": 8}"#).expect("parse");
        assert_eq!(config.max_list_rows, Some(8));
    }

    #[test]
    fn test_frame_size_parses_as_pair() {
        let config = FormConfig::from_json(r#"{"frame_size": [80, 24]}"#).expect("parse");
        assert_eq!(config.frame_size, Some((80, 24)));
    }
}
