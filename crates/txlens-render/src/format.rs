//! Per-kind parameter formatters.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use txlens_types::{Coin, ParamValue};

use crate::denom::DenomRegistry;
use crate::translate::{CatalogTranslator, Translator};
use crate::types::RenderConfig;

/// Why a single value could not be formatted.
///
/// Never surfaced past the renderer: the value is rendered raw instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
	#[error("Malformed amount: {0}")]
	MalformedAmount(String),
	#[error("Unknown denomination: {0}")]
	UnknownDenom(String),
	#[error("Exponent {0} is out of range")]
	ExponentOutOfRange(u32),
}

/// The formatting services a renderer applies to parameters.
#[derive(Clone)]
pub struct Formatters {
	config: RenderConfig,
	denoms: DenomRegistry,
	translator: Arc<dyn Translator>,
}

impl Default for Formatters {
	fn default() -> Self {
		Self::new(RenderConfig::default(), Arc::new(CatalogTranslator::default()))
	}
}

impl Formatters {
	pub fn new(config: RenderConfig, translator: Arc<dyn Translator>) -> Self {
		Self {
			denoms: DenomRegistry::new(config.denoms.clone()),
			config,
			translator,
		}
	}

	pub fn translate(&self, key: &str) -> String {
		self.translator.translate(key)
	}

	/// Formats any parameter value. Never fails.
	pub fn param(&self, value: &ParamValue) -> String {
		match value {
			ParamValue::Address(address) => self.address(address),
			ParamValue::Coins(coins) => self.coins(coins),
			ParamValue::Text(text) | ParamValue::Raw(text) => text.clone(),
			ParamValue::Label(key) => self.translate(key),
			ParamValue::Missing => self.config.missing_placeholder.clone(),
		}
	}

	/// Renders an alias if one is configured, otherwise truncates long
	/// addresses to `head...tail`.
	pub fn address(&self, address: &str) -> String {
		if let Some(alias) = self.config.aliases.get(address) {
			return alias.clone();
		}

		let head = self.config.address_head;
		let tail = self.config.address_tail;
		let chars: Vec<char> = address.chars().collect();
		if head == 0 || chars.len() <= head + tail + 3 {
			return address.to_string();
		}

		let start: String = chars[..head].iter().collect();
		let end: String = chars[chars.len() - tail..].iter().collect();
		format!("{}...{}", start, end)
	}

	/// Formats a list of coins joined with `", "`; a coin that cannot be
	/// formatted is shown as it appears on chain.
	pub fn coins(&self, coins: &[Coin]) -> String {
		coins
			.iter()
			.map(|coin| {
				self.coin(coin).unwrap_or_else(|e| {
					debug!(coin = %coin, error = %e, "Rendering coin unformatted");
					coin.to_string()
				})
			})
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Formats one coin as `<amount> <SYMBOL>`.
	pub fn coin(&self, coin: &Coin) -> Result<String, FormatError> {
		let info = self
			.denoms
			.lookup(&coin.denom)
			.ok_or_else(|| FormatError::UnknownDenom(coin.denom.clone()))?;
		let amount = Decimal::from_str(&coin.amount)
			.map_err(|_| FormatError::MalformedAmount(coin.amount.clone()))?;

		Ok(format!(
			"{} {}",
			self.amount(amount, info.exponent)?,
			info.symbol
		))
	}

	/// Scales an on-chain integer amount by `exponent` and applies the
	/// configured separators.
	pub fn amount(&self, amount: Decimal, exponent: u32) -> Result<String, FormatError> {
		let divisor = 10u64
			.checked_pow(exponent)
			.ok_or(FormatError::ExponentOutOfRange(exponent))?;
		let scaled = amount
			.checked_div(Decimal::from(divisor))
			.ok_or(FormatError::ExponentOutOfRange(exponent))?
			.round_dp(self.config.max_fraction_digits)
			.normalize();

		let text = scaled.abs().to_string();
		let (int_part, frac_part) = match text.split_once('.') {
			Some((int_part, frac_part)) => (int_part, Some(frac_part)),
			None => (text.as_str(), None),
		};

		let mut out = String::new();
		if scaled.is_sign_negative() && !scaled.is_zero() {
			out.push('-');
		}
		out.push_str(&group_thousands(int_part, self.config.thousands_separator));
		if let Some(frac_part) = frac_part {
			out.push(self.config.decimal_separator);
			out.push_str(frac_part);
		}
		Ok(out)
	}
}

fn group_thousands(digits: &str, separator: char) -> String {
	let len = digits.len();
	let mut out = String::with_capacity(len + len / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (len - i) % 3 == 0 {
			out.push(separator);
		}
		out.push(c);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::DenomConfig;

	fn formatters(config: RenderConfig) -> Formatters {
		Formatters::new(config, Arc::new(CatalogTranslator::default()))
	}

	#[test]
	fn test_coin_in_recorded_unit() {
		let f = Formatters::default();
		assert_eq!(f.coin(&Coin::new("100", "uluna")).unwrap(), "100 LUNA");
		assert_eq!(
			f.coin(&Coin::new("1234567", "uusd")).unwrap(),
			"1,234,567 UST"
		);
	}

	#[test]
	fn test_coin_with_configured_exponent() {
		let mut config = RenderConfig::default();
		config.denoms.insert(
			"uluna".into(),
			DenomConfig {
				symbol: None,
				exponent: 6,
			},
		);
		config.thousands_separator = '.';
		config.decimal_separator = ',';
		let f = formatters(config);

		assert_eq!(
			f.coin(&Coin::new("1234567890", "uluna")).unwrap(),
			"1.234,56789 LUNA"
		);
		assert_eq!(f.coin(&Coin::new("1000000", "uluna")).unwrap(), "1 LUNA");
	}

	#[test]
	fn test_fraction_digits_are_rounded() {
		let mut config = RenderConfig::default();
		config.max_fraction_digits = 2;
		let f = formatters(config);

		assert_eq!(f.amount(Decimal::from_str("1.23456").unwrap(), 0).unwrap(), "1.23");
	}

	#[test]
	fn test_coin_errors() {
		let f = Formatters::default();
		assert_eq!(
			f.coin(&Coin::new("100", "ibc/ABCDEF")),
			Err(FormatError::UnknownDenom("ibc/ABCDEF".into()))
		);
		assert_eq!(
			f.coin(&Coin::new("lots", "uluna")),
			Err(FormatError::MalformedAmount("lots".into()))
		);
		assert_eq!(
			f.amount(Decimal::ONE, 40),
			Err(FormatError::ExponentOutOfRange(40))
		);
	}

	#[test]
	fn test_coins_degrade_individually() {
		let f = Formatters::default();
		let coins = vec![Coin::new("5", "uluna"), Coin::new("7", "ibc/XYZ")];
		assert_eq!(f.coins(&coins), "5 LUNA, 7ibc/XYZ");
	}

	#[test]
	fn test_address_truncation_and_alias() {
		let mut config = RenderConfig::default();
		config
			.aliases
			.insert("terra1treasury".into(), "Treasury".into());
		let f = formatters(config);

		assert_eq!(
			f.address("terra1dcegyrekltswvyy0xy69ydgxn9x8x32zdtapd8"),
			"terra1dceg...apd8"
		);
		assert_eq!(f.address("terra1short"), "terra1short");
		assert_eq!(f.address("terra1treasury"), "Treasury");
	}

	#[test]
	fn test_group_thousands() {
		assert_eq!(group_thousands("1", ','), "1");
		assert_eq!(group_thousands("1000", ','), "1,000");
		assert_eq!(group_thousands("123456", ' '), "123 456");
	}
}
