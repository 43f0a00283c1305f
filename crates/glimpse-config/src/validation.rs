//! Range checks for loaded configs.

use crate::schema::GlimpseConfig;
use glimpse_common::ConfigError;

/// Upper bound for the debounce window. Anything longer makes typing
/// feel disconnected from the preview.
const MAX_UPDATE_DEBOUNCE_MS: u64 = 5_000;

/// Upper bound for the auto-commit pause.
const MAX_AUTO_COMMIT_PAUSE_MS: u64 = 60_000;

/// Validate a parsed config, returning the first violation found.
pub fn validate(config: &GlimpseConfig) -> Result<(), ConfigError> {
    if config.preview.update_debounce_ms > MAX_UPDATE_DEBOUNCE_MS {
        return Err(ConfigError::ValidationError(format!(
            "preview.update_debounce_ms must be <= {MAX_UPDATE_DEBOUNCE_MS}, got {}",
            config.preview.update_debounce_ms
        )));
    }

    if config.preview.auto_commit_pause_ms > MAX_AUTO_COMMIT_PAUSE_MS {
        return Err(ConfigError::ValidationError(format!(
            "preview.auto_commit_pause_ms must be <= {MAX_AUTO_COMMIT_PAUSE_MS}, got {}",
            config.preview.auto_commit_pause_ms
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&GlimpseConfig::default()).is_ok());
    }

    #[test]
    fn oversized_debounce_rejected() {
        let mut config = GlimpseConfig::default();
        config.preview.update_debounce_ms = 10_000;
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("update_debounce_ms"));
    }

    #[test]
    fn oversized_auto_commit_pause_rejected() {
        let mut config = GlimpseConfig::default();
        config.preview.auto_commit_pause_ms = 120_000;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("auto_commit_pause_ms"));
    }

    #[test]
    fn zero_delays_are_valid() {
        let mut config = GlimpseConfig::default();
        config.preview.update_debounce_ms = 0;
        config.preview.auto_commit_pause_ms = 0;
        assert!(validate(&config).is_ok());
    }
}
