//! Channel declarations loaded from YAML or JSON
//!
//! ```yaml
//! channels:
//!   answer:
//!     kind: last_value
//!     description: final answer
//!   summary:
//!     kind: last_value_after_finish
//! ```

use crate::error::{ChannelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Channel kinds this crate can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// [`LastValueChannel`](crate::LastValueChannel)
    LastValue,
    /// [`LastValueAfterFinishChannel`](crate::LastValueAfterFinishChannel)
    LastValueAfterFinish,
}

/// One channel declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDef {
    pub kind: ChannelKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChannelDef {
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }
}

/// Named channel declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelDef>,
}

impl ChannelsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration (builder style)
    pub fn with_channel(mut self, name: impl Into<String>, kind: ChannelKind) -> Self {
        self.channels.insert(name.into(), ChannelDef::new(kind));
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ChannelError::Config(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for name in self.channels.keys() {
            if name.trim().is_empty() {
                return Err(ChannelError::Config(
                    "channel names must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
channels:
  answer:
    kind: last_value
    description: final answer
  summary:
    kind: last_value_after_finish
"#;
        let config = ChannelsConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.channels.len(), 2);
        assert_eq!(config.channels["answer"].kind, ChannelKind::LastValue);
        assert_eq!(
            config.channels["answer"].description.as_deref(),
            Some("final answer")
        );
        assert_eq!(
            config.channels["summary"].kind,
            ChannelKind::LastValueAfterFinish
        );
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"channels": {"count": {"kind": "last_value"}}}"#;
        let config = ChannelsConfig::from_json_str(json).unwrap();
        assert_eq!(config, ChannelsConfig::new().with_channel("count", ChannelKind::LastValue));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let yaml = "channels:\n  x:\n    kind: topic\n";
        let err = ChannelsConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ChannelError::Yaml(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = r#"{"channels": {" ": {"kind": "last_value"}}}"#;
        let err = ChannelsConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ChannelError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("langgraph-channels-{}.yml", std::process::id()));
        std::fs::write(&path, "channels:\n  done:\n    kind: last_value_after_finish\n").unwrap();

        let config = ChannelsConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.channels["done"].kind, ChannelKind::LastValueAfterFinish);

        let err = ChannelsConfig::from_file(dir.join("channels.toml")).unwrap_err();
        assert!(matches!(err, ChannelError::Config(_)));
    }
}
