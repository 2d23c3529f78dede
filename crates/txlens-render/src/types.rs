//! Rendering configuration types.
//!
//! These structures are deserialized from the `[render]` section of the
//! configuration file. Every field has a default so an empty section is valid.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display settings for a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct DenomConfig {
	/// Symbol shown after the amount, e.g. `LUNA`.
	pub symbol: Option<String>,
	/// Number of decimal places the on-chain integer amount is shifted by.
	///
	/// Zero renders the amount in the unit recorded on chain.
	#[serde(default)]
	pub exponent: u32,
}

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
	/// Characters kept from the start of a truncated address.
	pub address_head: usize,
	/// Characters kept from the end of a truncated address.
	pub address_tail: usize,
	pub thousands_separator: char,
	pub decimal_separator: char,
	/// Fraction digits kept after scaling; the rest is rounded.
	pub max_fraction_digits: u32,
	/// Text rendered for a parameter with no value.
	pub missing_placeholder: String,
	/// Per-denomination overrides, keyed by on-chain denom.
	pub denoms: HashMap<String, DenomConfig>,
	/// Known addresses rendered by name instead of truncated.
	pub aliases: HashMap<String, String>,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			address_head: 10,
			address_tail: 4,
			thousands_separator: ',',
			decimal_separator: '.',
			max_fraction_digits: 6,
			missing_placeholder: "-".to_string(),
			denoms: HashMap::new(),
			aliases: HashMap::new(),
		}
	}
}
