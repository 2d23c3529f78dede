//! Rule model for transaction classification.
//!
//! A rule set is the ordered list of [`ActionRule`]s known for one chain.
//! Each rule names the message type tag it applies to, a declarative
//! [`Matcher`] over the message and its correlated log, and a template
//! describing which display parameters to pull out and how to lay them out.
//!
//! Order matters: for a given tag, the first rule whose matcher accepts a
//! message wins, so rule authors list specific rules before general ones.

use thiserror::Error;

pub mod families;
pub mod registry;
pub mod rule;
pub mod validation;

pub use registry::{build_rule_set, ChainRegistry, RuleFamily};
pub use rule::*;
pub use validation::validate;

/// Errors raised while building or checking a rule set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleSetError {
	/// No rule set is configured for the requested chain identifier.
	#[error("Unsupported chain: {0}")]
	UnsupportedChain(String),
	/// A chain was mapped to a rule family that does not exist.
	#[error("Unknown rule family: {0}")]
	UnknownFamily(String),
	/// A rule can never win because an earlier rule with the same tag
	/// accepts everything it accepts.
	#[error("Rule #{index} for {tag} is shadowed by rule #{shadowed_by}")]
	Ambiguous {
		tag: String,
		index: usize,
		shadowed_by: usize,
	},
	/// A rule's template is malformed or refers to undeclared parameters.
	#[error("Invalid template for {tag}: {reason}")]
	InvalidTemplate { tag: String, reason: String },
}
