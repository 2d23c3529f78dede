//! Amount and denomination pairs.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A token amount paired with its on-chain denomination.
///
/// The amount is kept as the decimal string the chain reported so that no
/// precision is lost before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Coin {
	pub denom: String,
	pub amount: String,
}

fn coin_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^(\d+(?:\.\d+)?)([a-zA-Z][a-zA-Z0-9/:._-]{1,127})$")
			.expect("coin pattern is a valid regex")
	})
}

impl Coin {
	pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
		Self {
			denom: denom.into(),
			amount: amount.into(),
		}
	}

	/// Parses a compact coin string such as `100uluna`.
	pub fn parse(text: &str) -> Option<Self> {
		let caps = coin_pattern().captures(text.trim())?;
		Some(Self::new(&caps[1], &caps[2]))
	}

	/// Parses a comma separated coin list such as `100uluna,25uusd`.
	///
	/// Returns `None` if any entry is malformed or the list is empty.
	pub fn parse_list(text: &str) -> Option<Vec<Self>> {
		let coins = text
			.split(',')
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.map(Self::parse)
			.collect::<Option<Vec<_>>>()?;

		if coins.is_empty() {
			None
		} else {
			Some(coins)
		}
	}
}

impl fmt::Display for Coin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.amount, self.denom)
	}
}
