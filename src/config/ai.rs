//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Chat-completions backend
    #[serde(default)]
    pub provider: AiProvider,

    /// API key for the backend. `GROQ_API_KEY` is used when unset.
    pub api_key: Option<String>,

    /// Model override
    pub model: Option<String>,

    /// API root override, e.g. a proxy
    pub base_url: Option<String>,

    /// Output budget for one dialogue reply
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Dialogue generation timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Conversation JSON handed to the report writer is cut to this many characters
    #[serde(default = "default_report_max_input_chars")]
    pub report_max_input_chars: usize,

    #[serde(default = "default_report_max_output_tokens")]
    pub report_max_output_tokens: u32,

    #[serde(default = "default_report_temperature")]
    pub report_temperature: f32,

    /// Report generation timeout in seconds
    #[serde(default = "default_timeout")]
    pub report_timeout_secs: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Groq,
    OpenAI,
    /// Scripted generator, no network.
    Mock,
}

impl AiConfig {
    /// Get the dialogue timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the report timeout as Duration
    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.provider {
            AiProvider::Groq if !self.has_api_key() => {
                return Err(ValidationError::MissingRequired("GROQ_API_KEY"));
            }
            AiProvider::OpenAI if !self.has_api_key() => {
                return Err(ValidationError::MissingRequired("CONSULT_INTAKE__AI__API_KEY"));
            }
            _ => {}
        }

        for secs in [self.timeout_secs, self.report_timeout_secs] {
            if secs == 0 || secs > 300 {
                return Err(ValidationError::InvalidTimeout);
            }
        }
        if !(0.0..=2.0).contains(&self.report_temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_output_tokens == 0 {
            return Err(ValidationError::InvalidLimit("ai.max_output_tokens"));
        }
        if self.report_max_output_tokens == 0 {
            return Err(ValidationError::InvalidLimit("ai.report_max_output_tokens"));
        }
        if self.report_max_input_chars == 0 {
            return Err(ValidationError::InvalidLimit("ai.report_max_input_chars"));
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            api_key: None,
            model: None,
            base_url: None,
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout(),
            report_max_input_chars: default_report_max_input_chars(),
            report_max_output_tokens: default_report_max_output_tokens(),
            report_temperature: default_report_temperature(),
            report_timeout_secs: default_timeout(),
        }
    }
}

fn default_max_output_tokens() -> u32 {
    1200
}

fn default_timeout() -> u64 {
    30
}

fn default_report_max_input_chars() -> usize {
    10_000
}

fn default_report_max_output_tokens() -> u32 {
    3500
}

fn default_report_temperature() -> f32 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Groq);
        assert_eq!(config.max_output_tokens, 1200);
        assert_eq!(config.report_max_input_chars, 10_000);
        assert_eq!(config.report_max_output_tokens, 3500);
        assert_eq!(config.report_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_requires_key_for_network_providers() {
        let config = AiConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GROQ_API_KEY"))
        );

        let config = AiConfig {
            provider: AiProvider::OpenAI,
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mock_needs_no_key() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            api_key: Some("gsk_xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        let base = AiConfig {
            provider: AiProvider::Mock,
            ..Default::default()
        };

        let config = AiConfig {
            report_temperature: 2.5,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));

        let config = AiConfig {
            timeout_secs: 0,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));

        let config = AiConfig {
            report_max_output_tokens: 0,
            ..base
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidLimit(_))));
    }
}
