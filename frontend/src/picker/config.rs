//! Per-widget host configuration
//!
//! The host page configures each picker instance through data attributes on
//! its mount element, exactly as the backend's form widget renders them:
//! `data-url` (required), `data-selected` (optional initial anchor) and
//! `data-forward` (JSON object carrying the model label).

use serde::Deserialize;
use shared::NodeKey;
use std::fmt;

/// Nodes requested per page; fixed per widget instance.
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    pub url: String,
    pub initial_selected: Option<NodeKey>,
    pub model: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The mount element carries no `data-url`; this instance cannot load
    /// anything and its initialization is aborted.
    MissingUrl,
    /// `data-forward` is present but not valid JSON.
    BadForward(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingUrl => write!(f, "missing data-url attribute"),
            ConfigError::BadForward(error) => {
                write!(f, "unparsable data-forward attribute: {error}")
            }
        }
    }
}

#[derive(Deserialize)]
struct ForwardData {
    #[serde(default)]
    model: Option<String>,
}

impl PickerConfig {
    /// Build a config from raw host attribute values.
    pub fn from_attrs(
        url: Option<String>,
        selected: Option<String>,
        forward: Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = url.filter(|url| !url.is_empty()).ok_or(ConfigError::MissingUrl)?;

        let initial_selected = selected
            .filter(|selected| !selected.is_empty())
            .map(NodeKey::from);

        let model = match forward {
            Some(raw) => {
                let forward: ForwardData = serde_json::from_str(&raw)
                    .map_err(|error| ConfigError::BadForward(error.to_string()))?;
                forward.model
            }
            None => None,
        };

        Ok(Self {
            url,
            initial_selected,
            model,
            limit: DEFAULT_LIMIT,
        })
    }

    /// Read the config from a mount element's data attributes.
    pub fn from_element(element: &web_sys::Element) -> Result<Self, ConfigError> {
        Self::from_attrs(
            element.get_attribute("data-url"),
            element.get_attribute("data-selected"),
            element.get_attribute("data-forward"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_aborts_initialization() {
        let result = PickerConfig::from_attrs(None, Some("3".to_string()), None);
        assert_eq!(result, Err(ConfigError::MissingUrl));

        let result = PickerConfig::from_attrs(Some(String::new()), None, None);
        assert_eq!(result, Err(ConfigError::MissingUrl));
    }

    #[test]
    fn forward_attribute_carries_the_model_label() {
        let config = PickerConfig::from_attrs(
            Some("/treenode/tree-autocomplete/".to_string()),
            None,
            Some(r#"{"model": "shop.Category"}"#.to_string()),
        )
        .unwrap();

        assert_eq!(config.url, "/treenode/tree-autocomplete/");
        assert_eq!(config.model.as_deref(), Some("shop.Category"));
        assert_eq!(config.initial_selected, None);
        assert_eq!(config.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn unparsable_forward_is_a_config_error() {
        let result = PickerConfig::from_attrs(
            Some("/treenode/tree-autocomplete/".to_string()),
            None,
            Some("{model:".to_string()),
        );
        assert!(matches!(result, Err(ConfigError::BadForward(_))));
    }

    #[test]
    fn selected_attribute_seeds_the_initial_anchor() {
        let config = PickerConfig::from_attrs(
            Some("/treenode/tree-autocomplete/".to_string()),
            Some("42".to_string()),
            None,
        )
        .unwrap();

        // Attribute values arrive as strings; the key stays opaque
        assert_eq!(config.initial_selected, Some(NodeKey::Text("42".to_string())));
    }
}
