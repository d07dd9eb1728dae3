//! Form config validation.

use crate::config::{FormConfig, HtmxTarget};
use crate::error::ConfigError;

pub fn validate(config: &FormConfig) -> Result<(), ConfigError> {
    if config.submit_text.trim().is_empty() {
        return Err(ConfigError::Validation("submit_text must not be empty".into()));
    }
    if let Some(htmx) = &config.htmx {
        if let HtmxTarget::Selector(s) = &htmx.target {
            if s.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "htmx target selector must not be empty (use \"auto\" for a rendered container)".into(),
                ));
            }
        }
        if htmx.script_src.trim().is_empty() {
            return Err(ConfigError::Validation("htmx script_src must not be empty".into()));
        }
    }
    for (column, label) in &config.field_labels {
        if label.trim().is_empty() {
            return Err(ConfigError::Validation(format!("label for {} must not be empty", column)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HtmxConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&FormConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_selector() {
        let config = FormConfig {
            htmx: Some(HtmxConfig {
                target: HtmxTarget::Selector(" ".into()),
                ..HtmxConfig::default()
            }),
            ..FormConfig::default()
        };
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_blank_submit_text() {
        let config = FormConfig {
            submit_text: String::new(),
            ..FormConfig::default()
        };
        assert!(validate(&config).is_err());
    }
}
