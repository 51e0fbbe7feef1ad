use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Host settings that the capture core reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Show "Recorded inventory at ..." style messages in the game client.
    #[serde(default = "default_true")]
    pub send_info_messages: bool,
    /// Chat colour for the failure message.
    #[serde(default = "default_failure_color")]
    pub failure_message_color: String,
}

fn default_true() -> bool {
    true
}
fn default_failure_color() -> String {
    "red".to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            send_info_messages: default_true(),
            failure_message_color: default_failure_color(),
        }
    }
}

impl CaptureConfig {
    pub fn from_json(settings: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(settings)?)
    }

    /// The default settings as pretty JSON, for hosts that show editable settings.
    pub fn settings_schema() -> Option<String> {
        serde_json::to_string_pretty(&CaptureConfig::default()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let config = CaptureConfig::from_json("{}").unwrap();
        assert_eq!(config, CaptureConfig::default());
        assert!(config.send_info_messages);
        assert_eq!(config.failure_message_color, "red");
    }

    #[test]
    fn test_settings_override() {
        let config = CaptureConfig::from_json(r#"{"send_info_messages": false}"#).unwrap();
        assert!(!config.send_info_messages);
    }

    #[test]
    fn test_invalid_settings() {
        let err = CaptureConfig::from_json(r#"{"send_info_messages": "yes"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid settings JSON"));
    }

    #[test]
    fn test_schema_round_trips() {
        let schema = CaptureConfig::settings_schema().unwrap();
        assert_eq!(
            CaptureConfig::from_json(&schema).unwrap(),
            CaptureConfig::default()
        );
    }
}
