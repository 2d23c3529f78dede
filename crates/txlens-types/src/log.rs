//! Logs emitted by a transaction, one per message.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::de::{lossy_string, null_as_default};

/// The type of an emitted event.
///
/// Known event types get their own variant so rules can match them without
/// string comparisons; anything else is preserved in [`EventKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
	Message,
	Transfer,
	CoinSpent,
	CoinReceived,
	Delegate,
	Unbond,
	Redelegate,
	WithdrawRewards,
	WithdrawCommission,
	SetWithdrawAddress,
	Swap,
	ProposalVote,
	ProposalDeposit,
	SubmitProposal,
	FromContract,
	Wasm,
	ExecuteContract,
	InstantiateContract,
	StoreCode,
	AggregateVote,
	AggregatePrevote,
	FeedDelegate,
	Other(String),
}

impl EventKind {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Message => "message",
			Self::Transfer => "transfer",
			Self::CoinSpent => "coin_spent",
			Self::CoinReceived => "coin_received",
			Self::Delegate => "delegate",
			Self::Unbond => "unbond",
			Self::Redelegate => "redelegate",
			Self::WithdrawRewards => "withdraw_rewards",
			Self::WithdrawCommission => "withdraw_commission",
			Self::SetWithdrawAddress => "set_withdraw_address",
			Self::Swap => "swap",
			Self::ProposalVote => "proposal_vote",
			Self::ProposalDeposit => "proposal_deposit",
			Self::SubmitProposal => "submit_proposal",
			Self::FromContract => "from_contract",
			Self::Wasm => "wasm",
			Self::ExecuteContract => "execute_contract",
			Self::InstantiateContract => "instantiate_contract",
			Self::StoreCode => "store_code",
			Self::AggregateVote => "aggregate_vote",
			Self::AggregatePrevote => "aggregate_prevote",
			Self::FeedDelegate => "feed_delegate",
			Self::Other(kind) => kind,
		}
	}
}

impl From<String> for EventKind {
	fn from(kind: String) -> Self {
		match kind.as_str() {
			"message" => Self::Message,
			"transfer" => Self::Transfer,
			"coin_spent" => Self::CoinSpent,
			"coin_received" => Self::CoinReceived,
			"delegate" => Self::Delegate,
			"unbond" => Self::Unbond,
			"redelegate" => Self::Redelegate,
			"withdraw_rewards" => Self::WithdrawRewards,
			"withdraw_commission" => Self::WithdrawCommission,
			"set_withdraw_address" => Self::SetWithdrawAddress,
			"swap" => Self::Swap,
			"proposal_vote" => Self::ProposalVote,
			"proposal_deposit" => Self::ProposalDeposit,
			"submit_proposal" => Self::SubmitProposal,
			"from_contract" => Self::FromContract,
			"wasm" => Self::Wasm,
			"execute_contract" => Self::ExecuteContract,
			"instantiate_contract" => Self::InstantiateContract,
			"store_code" => Self::StoreCode,
			"aggregate_vote" => Self::AggregateVote,
			"aggregate_prevote" => Self::AggregatePrevote,
			"feed_delegate" => Self::FeedDelegate,
			_ => Self::Other(kind),
		}
	}
}

impl From<EventKind> for String {
	fn from(kind: EventKind) -> Self {
		match kind {
			EventKind::Other(kind) => kind,
			known => known.as_str().to_string(),
		}
	}
}

impl Default for EventKind {
	fn default() -> Self {
		Self::Other(String::new())
	}
}

fn lossy_event_kind<'de, D>(deserializer: D) -> Result<EventKind, D::Error>
where
	D: Deserializer<'de>,
{
	lossy_string(deserializer).map(EventKind::from)
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A key/value attribute attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Attribute {
	#[serde(default, deserialize_with = "lossy_string")]
	pub key: String,
	#[serde(default, deserialize_with = "lossy_string")]
	pub value: String,
}

impl Attribute {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// A typed event with its attributes in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
	#[serde(rename = "type", default, deserialize_with = "lossy_event_kind")]
	pub kind: EventKind,
	#[serde(default, deserialize_with = "null_as_default")]
	pub attributes: Vec<Attribute>,
}

impl LogEvent {
	pub fn new(kind: EventKind, attributes: Vec<Attribute>) -> Self {
		Self { kind, attributes }
	}

	/// Returns the first value recorded under `key`.
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|attr| attr.key == key)
			.map(|attr| attr.value.as_str())
	}

	/// Returns true if some attribute matches `key` and, when given, `value`.
	pub fn has_attribute(&self, key: &str, value: Option<&str>) -> bool {
		self.attributes
			.iter()
			.any(|attr| attr.key == key && value.map_or(true, |v| attr.value == v))
	}
}

/// The log emitted for a single message of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TxLog {
	/// Index of the message that produced this log, when the indexer reports it.
	#[serde(default)]
	pub msg_index: Option<u32>,
	#[serde(default, deserialize_with = "lossy_string")]
	pub log: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub events: Vec<LogEvent>,
}

impl TxLog {
	/// Returns the first event of the given kind.
	pub fn event(&self, kind: &EventKind) -> Option<&LogEvent> {
		self.events.iter().find(|event| &event.kind == kind)
	}

	pub fn events_of<'a>(&'a self, kind: &'a EventKind) -> impl Iterator<Item = &'a LogEvent> {
		self.events.iter().filter(move |event| &event.kind == kind)
	}
}
