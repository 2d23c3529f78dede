//! Denomination symbols and exponents.

use std::collections::HashMap;

use crate::types::DenomConfig;

/// Built-in Terra denominations that do not follow the micro-unit naming rule.
const BUILTIN_SYMBOLS: &[(&str, &str)] = &[
	("uluna", "LUNA"),
	("uusd", "UST"),
	("ukrw", "KRT"),
	("usdr", "SDT"),
	("umnt", "MNT"),
];

/// Resolved display settings for a denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenomInfo {
	pub symbol: String,
	pub exponent: u32,
}

/// Maps on-chain denominations to their display symbol and exponent.
///
/// Lookup order is configured overrides, then the built-in table, then the
/// Terra stablecoin rule (`u` followed by a three letter fiat code becomes
/// the first two letters of the code plus `T`, e.g. `ueur` → `EUT`).
#[derive(Debug, Clone, Default)]
pub struct DenomRegistry {
	overrides: HashMap<String, DenomConfig>,
}

impl DenomRegistry {
	pub fn new(overrides: HashMap<String, DenomConfig>) -> Self {
		Self { overrides }
	}

	/// Returns display settings, or `None` for a denomination that is not
	/// recognised (IBC hashes, contract tokens, typos).
	pub fn lookup(&self, denom: &str) -> Option<DenomInfo> {
		let builtin = builtin_symbol(denom);

		if let Some(config) = self.overrides.get(denom) {
			let symbol = config
				.symbol
				.clone()
				.or_else(|| builtin.clone())
				.unwrap_or_else(|| denom.to_uppercase());
			return Some(DenomInfo {
				symbol,
				exponent: config.exponent,
			});
		}

		builtin.map(|symbol| DenomInfo {
			symbol,
			exponent: 0,
		})
	}
}

fn builtin_symbol(denom: &str) -> Option<String> {
	if let Some((_, symbol)) = BUILTIN_SYMBOLS.iter().find(|(d, _)| *d == denom) {
		return Some((*symbol).to_string());
	}

	let code = denom.strip_prefix('u')?;
	if code.len() == 3 && code.chars().all(|c| c.is_ascii_lowercase()) {
		let mut symbol = code[..2].to_ascii_uppercase();
		symbol.push('T');
		return Some(symbol);
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtin_and_stablecoin_symbols() {
		let registry = DenomRegistry::default();

		assert_eq!(registry.lookup("uluna").unwrap().symbol, "LUNA");
		assert_eq!(registry.lookup("usdr").unwrap().symbol, "SDT");
		assert_eq!(registry.lookup("ueur").unwrap().symbol, "EUT");
		assert_eq!(registry.lookup("uusd").unwrap().exponent, 0);
		assert!(registry.lookup("ibc/27394FB092D2ECCD").is_none());
		assert!(registry.lookup("uab1").is_none());
	}

	#[test]
	fn test_overrides_take_precedence() {
		let mut overrides = HashMap::new();
		overrides.insert(
			"uluna".to_string(),
			DenomConfig {
				symbol: None,
				exponent: 6,
			},
		);
		overrides.insert(
			"aevmos".to_string(),
			DenomConfig {
				symbol: Some("EVMOS".into()),
				exponent: 18,
			},
		);
		let registry = DenomRegistry::new(overrides);

		assert_eq!(
			registry.lookup("uluna"),
			Some(DenomInfo {
				symbol: "LUNA".into(),
				exponent: 6
			})
		);
		assert_eq!(registry.lookup("aevmos").unwrap().symbol, "EVMOS");
	}
}
