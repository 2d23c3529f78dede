//! Configuration file discovery.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{AppConfig, ConfigError, ConfigLoader};

/// Locations searched, in order, when no path is given explicitly.
const STANDARD_PATHS: &[&str] = &["./config/txlens.toml", "./txlens.toml", "/etc/txlens/txlens.toml"];

/// Resolves which configuration file to read.
///
/// An explicit path wins, then `TXLENS_CONFIG`, then the first standard
/// location that exists. `None` means defaults only.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
	if let Some(path) = explicit {
		return Some(path.to_path_buf());
	}

	if let Ok(path) = std::env::var("TXLENS_CONFIG") {
		return Some(PathBuf::from(path));
	}

	STANDARD_PATHS
		.iter()
		.map(Path::new)
		.find(|path| path.exists())
		.map(Path::to_path_buf)
}

/// Load configuration from an explicit path or the standard locations.
pub async fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
	let loader = match resolve_config_path(explicit) {
		Some(path) => {
			debug!("Using configuration file {:?}", path);
			ConfigLoader::new().with_file(path)
		}
		None => ConfigLoader::new(),
	};
	loader.load().await
}
