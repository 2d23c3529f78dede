//! Translation lookup used for labelled parameters and view titles.

use std::collections::HashMap;

/// Looks up display text for a translation key such as `Common:Tx:Memo`.
///
/// Implementations must be total: a missing key still yields some text.
pub trait Translator: Send + Sync {
	fn translate(&self, key: &str) -> String;
}

/// A [`Translator`] backed by an in-memory key → text catalog.
///
/// Keys without an entry fall back to their last `:`-separated segment, so
/// `Page:Txs:No transaction history` renders as `No transaction history`.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
	catalog: HashMap<String, String>,
}

impl CatalogTranslator {
	pub fn new(catalog: HashMap<String, String>) -> Self {
		Self { catalog }
	}

	pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
		self.catalog.insert(key.into(), text.into());
	}
}

impl Translator for CatalogTranslator {
	fn translate(&self, key: &str) -> String {
		match self.catalog.get(key) {
			Some(text) => text.clone(),
			None => key.rsplit(':').next().unwrap_or(key).to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_catalog_lookup_and_fallback() {
		let mut translator = CatalogTranslator::default();
		translator.insert("Common:Tx:Memo", "Mémo");

		assert_eq!(translator.translate("Common:Tx:Memo"), "Mémo");
		assert_eq!(translator.translate("Common:Tx:Tx fee"), "Tx fee");
		assert_eq!(translator.translate("VOTE_OPTION_YES"), "VOTE_OPTION_YES");
	}
}
