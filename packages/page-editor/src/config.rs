use crate::plugin::PLUGIN_NAME;
use serde::{Deserialize, Serialize};

/// Mount options for the page editor plugin.
///
/// The host builds this value (or deserializes it from its own settings) and
/// hands it to `EventActionHandlerPlugin::mount`. Pruning and save
/// propagation are always on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEditorConfig {
    /// Registry name; mounts sharing a name replace each other
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    PLUGIN_NAME.to_string()
}

impl PageEditorConfig {
    pub fn from_json(source: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for PageEditorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = PageEditorConfig::from_json(r#"{ "name": "secondary-page-editor" }"#).unwrap();
        assert_eq!(config, PageEditorConfig::named("secondary-page-editor"));
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = PageEditorConfig::from_json("{}").unwrap();
        assert_eq!(config, PageEditorConfig::default());
        assert_eq!(config.name, PLUGIN_NAME);
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(PageEditorConfig::from_json(r#"{ "name": 7 }"#).is_err());
    }
}
