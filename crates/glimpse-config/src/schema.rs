//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change; missing fields use defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimpseConfig {
    pub preview: PreviewConfig,
}

/// How speculative previews behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewMode {
    /// Show results for the best guess of what the user is typing.
    Predictive,
    /// Show results for exactly what was typed.
    Verbatim,
    /// Predictive, but destination updates apply without the debounce delay.
    PredictiveNoDelay,
}

impl Default for PreviewMode {
    fn default() -> Self {
        Self::Predictive
    }
}

/// Preview controller tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Whether speculative previews are enabled at all.
    pub enabled: bool,
    /// Preview mode variant.
    pub mode: PreviewMode,
    /// Debounce window for destination updates, in milliseconds.
    pub update_debounce_ms: u64,
    /// Pause before the auto-commit countdown fires, in milliseconds.
    pub auto_commit_pause_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: PreviewMode::default(),
            update_debounce_ms: 200,
            auto_commit_pause_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_predictive_with_standard_delays() {
        let config = GlimpseConfig::default();
        assert!(config.preview.enabled);
        assert_eq!(config.preview.mode, PreviewMode::Predictive);
        assert_eq!(config.preview.update_debounce_ms, 200);
        assert_eq!(config.preview.auto_commit_pause_ms, 1000);
    }

    #[test]
    fn mode_deserializes_kebab_case() {
        let config: GlimpseConfig = toml::from_str(
            r#"
[preview]
mode = "predictive-no-delay"
"#,
        )
        .unwrap();
        assert_eq!(config.preview.mode, PreviewMode::PredictiveNoDelay);

        let config: GlimpseConfig = toml::from_str(
            r#"
[preview]
mode = "verbatim"
"#,
        )
        .unwrap();
        assert_eq!(config.preview.mode, PreviewMode::Verbatim);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: GlimpseConfig = toml::from_str(
            r#"
[preview]
update_debounce_ms = 50
"#,
        )
        .unwrap();
        assert_eq!(config.preview.update_debounce_ms, 50);
        assert_eq!(config.preview.auto_commit_pause_ms, 1000);
        assert!(config.preview.enabled);
    }
}
