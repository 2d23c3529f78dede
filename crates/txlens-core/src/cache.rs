//! Per-chain cache of compiled matchers.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};
use txlens_rules::{ChainRegistry, RuleSetError};

use crate::matcher::{compile, CompiledMatcher};

/// Builds each chain's matcher once and hands out shared references.
///
/// Rule sets are small and finite, so entries are never evicted.
pub struct MatcherCache {
	registry: ChainRegistry,
	matchers: DashMap<String, Arc<CompiledMatcher>>,
}

impl Default for MatcherCache {
	fn default() -> Self {
		Self::new(ChainRegistry::new())
	}
}

impl MatcherCache {
	pub fn new(registry: ChainRegistry) -> Self {
		Self {
			registry,
			matchers: DashMap::new(),
		}
	}

	pub fn registry(&self) -> &ChainRegistry {
		&self.registry
	}

	/// Returns the matcher for a chain, compiling it on first use.
	///
	/// Fails with [`RuleSetError::UnsupportedChain`] for chains the registry
	/// does not know.
	pub fn get(&self, chain_id: &str) -> Result<Arc<CompiledMatcher>, RuleSetError> {
		if let Some(matcher) = self.matchers.get(chain_id) {
			return Ok(Arc::clone(matcher.value()));
		}

		debug!(chain = chain_id, "Compiling rule set");
		let compiled = Arc::new(compile(self.registry.rule_set(chain_id)?));

		// Another caller may have compiled the same chain meanwhile; keep the
		// first entry so every caller shares one instance.
		let entry = self
			.matchers
			.entry(chain_id.to_string())
			.or_insert(compiled);
		info!(
			chain = chain_id,
			rules = entry.len(),
			"Compiled matcher cached"
		);
		Ok(Arc::clone(entry.value()))
	}

	pub fn contains(&self, chain_id: &str) -> bool {
		self.matchers.contains_key(chain_id)
	}

	pub fn len(&self) -> usize {
		self.matchers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.matchers.is_empty()
	}
}
