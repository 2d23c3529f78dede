//! Configuration loading for txlens.
//!
//! Configuration is read from a TOML file. `${VAR}` placeholders are replaced
//! from the environment before parsing, then a few well known variables
//! override individual settings, and the result is validated.

use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

fn env_var_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is a valid regex")
	})
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "TXLENS_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads, overrides and validates the configuration.
	///
	/// Without a file the built-in defaults are used.
	pub async fn load(&self) -> Result<AppConfig, ConfigError> {
		let mut config = match &self.file_path {
			Some(path) => self.load_from_file(path).await?,
			None => {
				debug!("No configuration file given, using defaults");
				AppConfig::default()
			}
		};

		self.apply_env_overrides(&mut config);
		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, path: &Path) -> Result<AppConfig, ConfigError> {
		info!("Loading configuration from {:?}", path);
		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}

		let content = tokio::fs::read_to_string(path).await?;
		self.parse(&content)
	}

	/// Parses TOML content after substituting `${VAR}` placeholders.
	pub fn parse(&self, content: &str) -> Result<AppConfig, ConfigError> {
		let substituted = substitute_env_vars(content)?;
		toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))
	}

	fn apply_env_overrides(&self, config: &mut AppConfig) {
		if let Ok(level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			debug!("Overriding log level from environment");
			config.logging.level = level;
		}

		if let Ok(chain) = env::var(format!("{}DEFAULT_CHAIN", self.env_prefix)) {
			debug!("Overriding default chain from environment");
			config.engine.default_chain = chain;
		}
	}
}

/// Replaces every `${VAR}` with the value of the environment variable `VAR`.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let mut missing = None;
	let result = env_var_pattern().replace_all(content, |caps: &regex::Captures<'_>| {
		let name = &caps[1];
		match env::var(name) {
			Ok(value) => value,
			Err(_) => {
				missing.get_or_insert_with(|| name.to_string());
				String::new()
			}
		}
	});

	match missing {
		Some(name) => Err(ConfigError::EnvVarNotFound(name)),
		None => Ok(result.into_owned()),
	}
}

/// Checks settings that parse but cannot work.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
	let engine = &config.engine;
	if engine.default_chain.trim().is_empty() {
		return Err(ConfigError::ValidationError(
			"engine.default_chain must not be empty".to_string(),
		));
	}

	let registry = engine
		.chain_registry()
		.map_err(|e| ConfigError::ValidationError(format!("engine.chains: {}", e)))?;
	registry.family(&engine.default_chain).map_err(|e| {
		ConfigError::ValidationError(format!("engine.default_chain: {}", e))
	})?;

	let render = &config.render;
	if render.address_head == 0 {
		return Err(ConfigError::ValidationError(
			"render.address_head must be greater than 0".to_string(),
		));
	}
	if render.thousands_separator == render.decimal_separator {
		return Err(ConfigError::ValidationError(
			"render.thousands_separator and render.decimal_separator must differ".to_string(),
		));
	}

	Ok(())
}
