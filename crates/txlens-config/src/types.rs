//! Configuration types for txlens.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use txlens_render::RenderConfig;
use txlens_rules::{ChainRegistry, RuleFamily, RuleSetError};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
	/// Classification engine settings
	pub engine: EngineConfig,
	/// Text rendering settings
	pub render: RenderConfig,
	/// View model settings
	pub view: ViewConfig,
	/// Translation catalog, key → display text
	pub translations: HashMap<String, String>,
	/// Logging settings
	pub logging: LoggingConfig,
}

/// Classification engine settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Chain used when a command does not name one.
	pub default_chain: String,
	/// Extra chain identifiers mapped to a rule family name.
	pub chains: HashMap<String, String>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			default_chain: "columbus-5".to_string(),
			chains: HashMap::new(),
		}
	}
}

impl EngineConfig {
	/// Builds a chain registry with the built-in chains plus the configured
	/// aliases.
	pub fn chain_registry(&self) -> Result<ChainRegistry, RuleSetError> {
		let mut registry = ChainRegistry::new();
		let mut chains: Vec<_> = self.chains.iter().collect();
		chains.sort();
		for (chain_id, family) in chains {
			registry.register_chain(chain_id.clone(), family.parse::<RuleFamily>()?);
		}
		Ok(registry)
	}
}

/// View model settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
	/// Explorer base URL; links are `{finder_url}/{chain_id}/tx/{hash}`.
	pub finder_url: String,
	/// chrono format string for transaction dates.
	pub date_format: String,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			finder_url: "https://finder.terra.money".to_string(),
			date_format: "%Y.%m.%d %H:%M:%S".to_string(),
		}
	}
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// Default filter directive, overridden by `RUST_LOG`.
	pub level: String,
	/// Emit JSON lines instead of human readable output.
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			json: false,
		}
	}
}
