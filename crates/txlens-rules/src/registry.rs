//! Chain registry mapping chain identifiers to rule families.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::{families, ActionRule, RuleSetError};

/// A built-in rule set shared by chains speaking the same message dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
	Terra,
	// Add more families here as needed
}

impl RuleFamily {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Terra => "terra",
		}
	}

	/// Builds this family's ordered rule list.
	pub fn rules(&self) -> Result<Vec<ActionRule>, RuleSetError> {
		match self {
			Self::Terra => families::terra::rules(),
		}
	}
}

impl fmt::Display for RuleFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for RuleFamily {
	type Err = RuleSetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"terra" => Ok(Self::Terra),
			_ => Err(RuleSetError::UnknownFamily(s.to_string())),
		}
	}
}

/// Registry of the chains a rule set can be built for.
///
/// Unknown chain identifiers are an error; there is no fallback family.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
	chains: HashMap<String, RuleFamily>,
}

impl Default for ChainRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl ChainRegistry {
	/// Creates a registry with the built-in chains.
	pub fn new() -> Self {
		let mut chains = HashMap::new();
		for chain in ["columbus-5", "bombay-12", "localterra"] {
			chains.insert(chain.to_string(), RuleFamily::Terra);
		}
		Self { chains }
	}

	/// Registers (or overrides) the family used for a chain.
	pub fn register_chain(&mut self, chain_id: impl Into<String>, family: RuleFamily) {
		let chain_id = chain_id.into();
		debug!("Registering chain {} with rule family {}", chain_id, family);
		self.chains.insert(chain_id, family);
	}

	/// Returns the supported chain identifiers in sorted order.
	pub fn supported_chains(&self) -> Vec<String> {
		let mut chains: Vec<_> = self.chains.keys().cloned().collect();
		chains.sort();
		chains
	}

	pub fn family(&self, chain_id: &str) -> Result<RuleFamily, RuleSetError> {
		self.chains
			.get(chain_id)
			.copied()
			.ok_or_else(|| RuleSetError::UnsupportedChain(chain_id.to_string()))
	}

	/// Builds the ordered rule set for a chain.
	pub fn rule_set(&self, chain_id: &str) -> Result<Vec<ActionRule>, RuleSetError> {
		let family = self.family(chain_id)?;
		let rules = family.rules()?;
		debug!(
			chain = chain_id,
			family = %family,
			rules = rules.len(),
			"Built rule set"
		);
		Ok(rules)
	}
}

/// Builds the rule set for one of the built-in chains.
pub fn build_rule_set(chain_id: &str) -> Result<Vec<ActionRule>, RuleSetError> {
	ChainRegistry::new().rule_set(chain_id)
}
