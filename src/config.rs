//! Configuration management for Monkeyroute
//!
//! Parses TOML configuration files and provides typed access to settings.

use crate::error::{AppError, AppResult};
use crate::models::{ModelCatalog, ModelDescriptor, TierAssignments};
use crate::router::tiered::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterSettings,
    /// Model id for each routing tier
    pub tiers: TierAssignments,
    /// Model catalog
    pub models: Vec<ModelDescriptor>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Router tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterSettings {
    /// Complexity threshold for tier selection
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self = toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: path_display.clone(),
            source,
        })?;

        // Phase 3: Validate parsed config (provides contextual reason)
        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        tracing::debug!(
            models = config.models.len(),
            threshold = config.router.threshold,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Build the model catalog declared in `[[models]]`
    ///
    /// # Errors
    /// Returns an error if a descriptor is invalid or an id is repeated.
    pub fn catalog(&self) -> AppResult<ModelCatalog> {
        ModelCatalog::new(self.models.iter().cloned())
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()` and `from_str()`, but can
    /// also be called explicitly when constructing Config via other means.
    pub fn validate(&self) -> AppResult<()> {
        // Threshold: finite and non-negative
        if !self.router.threshold.is_finite() || self.router.threshold < 0.0 {
            return Err(AppError::Config(format!(
                "router.threshold must be a finite, non-negative number, got {}",
                self.router.threshold
            )));
        }

        if self.models.is_empty() {
            return Err(AppError::Config(
                "No models configured. Add a [[models]] entry for each tier, e.g.:\n\n\
                [[models]]\n\
                id = \"gpt-4o-mini\"\n\
                name = \"GPT-4o Mini\"\n\
                provider = \"openai\"\n\
                context_window = 128000\n\
                max_output_tokens = 16384"
                    .to_string(),
            ));
        }

        // Descriptor fields, duplicate ids, and every tier resolving to a
        // distinct catalog entry
        self.catalog()?.resolve_tiers(&self.tiers)?;

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
            path: "<string>".to_string(),
            source,
        })?;

        // Validate config before returning
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Provider;
    use crate::router::ModelTier;

    const TEST_CONFIG: &str = r#"
[router]
threshold = 0.5

[tiers]
low = "gpt-4o-mini"
mid = "claude-3-haiku"
high = "gpt-4o"
superior = "claude-3-opus"

[[models]]
id = "gpt-4o-mini"
name = "GPT-4o Mini"
provider = "openai"
context_window = 128000
max_output_tokens = 16384

[[models]]
id = "claude-3-haiku"
name = "Claude 3 Haiku"
provider = "anthropic"
context_window = 200000
max_output_tokens = 4096
temperature = 0.6

[[models]]
id = "gpt-4o"
name = "GPT-4o"
provider = "openai"
context_window = 128000
max_output_tokens = 16384
top_p = 0.95

[[models]]
id = "claude-3-opus"
name = "Claude 3 Opus"
provider = "anthropic"
context_window = 200000
max_output_tokens = 4096

[observability]
log_level = "debug"
"#;

    #[test]
    fn test_config_from_str_parses_successfully() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        assert_eq!(config.router.threshold, 0.5);
        assert_eq!(config.models.len(), 4);
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.tiers.model_id(ModelTier::Superior), "claude-3-opus");
    }

    #[test]
    fn test_config_parses_model_descriptors() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");

        let haiku = &config.models[1];
        assert_eq!(haiku.id(), "claude-3-haiku");
        assert_eq!(haiku.provider(), Provider::Anthropic);
        assert_eq!(haiku.context_window(), 200_000);
        assert_eq!(haiku.temperature(), 0.6);
        assert_eq!(haiku.top_p(), 1.0);

        let gpt4o = &config.models[2];
        assert_eq!(gpt4o.temperature(), 0.7);
        assert_eq!(gpt4o.top_p(), 0.95);
    }

    #[test]
    fn test_router_and_observability_sections_are_optional() {
        let trimmed = TEST_CONFIG
            .replace("[router]\nthreshold = 0.5\n", "")
            .replace("[observability]\nlog_level = \"debug\"\n", "");
        let config = Config::from_str(&trimmed).expect("should parse config");
        assert_eq!(config.router.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_catalog_contains_every_model() {
        let config = Config::from_str(TEST_CONFIG).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.get("gpt-4o").is_some());
    }

    #[test]
    fn test_validate_rejects_unknown_tier_model() {
        let broken = TEST_CONFIG.replace(r#"superior = "claude-3-opus""#, r#"superior = "o1""#);
        let err = Config::from_str(&broken).unwrap_err();
        assert!(
            matches!(err, AppError::MissingTierModel { tier: ModelTier::Superior, .. }),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_validate_rejects_shared_tier_model() {
        let broken = TEST_CONFIG.replace(r#"mid = "claude-3-haiku""#, r#"mid = "gpt-4o""#);
        let err = Config::from_str(&broken).unwrap_err();
        assert!(matches!(err, AppError::DuplicateTierModel { .. }), "got: {:?}", err);
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let broken = TEST_CONFIG.replace("threshold = 0.5", "threshold = -1.0");
        let err = Config::from_str(&broken).unwrap_err().to_string();
        assert!(err.contains("router.threshold"), "got: {}", err);
    }

    #[test]
    fn test_missing_tier_key_is_a_parse_error() {
        let broken = TEST_CONFIG.replace("high = \"gpt-4o\"\n", "");
        let err = Config::from_str(&broken).unwrap_err();
        assert!(matches!(err, AppError::ConfigParseFailed { .. }), "got: {:?}", err);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let config = Config {
            router: RouterSettings::default(),
            tiers: TierAssignments::new("a", "b", "c", "d"),
            models: Vec::new(),
            observability: ObservabilityConfig::default(),
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("No models configured"), "got: {}", err);
    }
}
