//! View models handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Rendered summary of one canonical action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageGroup {
	pub tag: String,
	pub summary: Vec<String>,
	pub success: bool,
}

/// A titled detail row such as the fee or memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
	pub title: String,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxViewModel {
	pub hash: String,
	pub link: String,
	pub date: String,
	pub messages: Vec<MessageGroup>,
	pub details: Vec<Detail>,
}

/// Card shown instead of a list when an account has no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyCard {
	pub title: String,
	pub content: String,
}
