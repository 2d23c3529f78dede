//! Raw transaction messages as a tagged union keyed by their type string.
//!
//! Messages arrive as `{ "type": "bank/MsgSend", "value": { .. } }`. Known
//! type tags decode into a typed variant; unknown tags, and known tags whose
//! body does not fit the expected shape, are kept verbatim as
//! [`RawMessage::Other`] so that decoding a transaction never fails because of
//! a single odd message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de::{lossy_string, string_or_number};
use crate::Coin;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgSend {
	pub from_address: String,
	pub to_address: String,
	pub amount: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MultiSendEntry {
	pub address: String,
	pub coins: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgMultiSend {
	pub inputs: Vec<MultiSendEntry>,
	pub outputs: Vec<MultiSendEntry>,
}

/// Shared shape of `MsgDelegate` and `MsgUndelegate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgDelegation {
	pub delegator_address: String,
	pub validator_address: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount: Option<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgBeginRedelegate {
	pub delegator_address: String,
	pub validator_src_address: String,
	pub validator_dst_address: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount: Option<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgWithdrawDelegationReward {
	pub delegator_address: String,
	pub validator_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgWithdrawValidatorCommission {
	pub validator_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgModifyWithdrawAddress {
	pub delegator_address: String,
	pub withdraw_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgSwap {
	pub trader: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub offer_coin: Option<Coin>,
	pub ask_denom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgSwapSend {
	pub from_address: String,
	pub to_address: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub offer_coin: Option<Coin>,
	pub ask_denom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgVote {
	#[serde(deserialize_with = "string_or_number")]
	pub proposal_id: String,
	pub voter: String,
	#[serde(deserialize_with = "string_or_number")]
	pub option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgDeposit {
	#[serde(deserialize_with = "string_or_number")]
	pub proposal_id: String,
	pub depositor: String,
	pub amount: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgSubmitProposal {
	pub proposer: String,
	pub initial_deposit: Vec<Coin>,
	pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgExecuteContract {
	pub sender: String,
	pub contract: String,
	pub execute_msg: Value,
	pub coins: Vec<Coin>,
}

impl MsgExecuteContract {
	/// Name of the contract entry point, i.e. the top-level key of
	/// `execute_msg`. If there are several, the alphabetically first is
	/// returned.
	pub fn entry_point(&self) -> Option<&str> {
		self.execute_msg
			.as_object()
			.and_then(|obj| obj.keys().next())
			.map(String::as_str)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgInstantiateContract {
	pub sender: String,
	pub admin: String,
	#[serde(deserialize_with = "string_or_number")]
	pub code_id: String,
	pub init_msg: Value,
	pub init_coins: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgStoreCode {
	pub sender: String,
	pub wasm_byte_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgAggregateExchangeRateVote {
	pub salt: String,
	pub exchange_rates: String,
	pub feeder: String,
	pub validator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgAggregateExchangeRatePrevote {
	pub hash: String,
	pub feeder: String,
	pub validator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgDelegateFeedConsent {
	pub operator: String,
	pub delegate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MsgExecAuthorized {
	pub grantee: String,
	pub msgs: Vec<RawMessage>,
}

/// Wire form of a message: the type tag and an untyped body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
	/// Missing or `null` tags decode as empty and classify as unknown.
	#[serde(rename = "type", default, deserialize_with = "lossy_string")]
	pub type_tag: String,
	#[serde(default)]
	pub value: Value,
}

macro_rules! raw_messages {
	($($variant:ident($body:ty) => $tag:literal,)+) => {
		/// A transaction message, decoded by its type tag.
		#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
		#[serde(from = "MessageEnvelope", into = "MessageEnvelope")]
		pub enum RawMessage {
			$($variant($body),)+
			/// A message whose tag is unknown or whose body did not decode.
			Other { type_tag: String, value: Value },
		}

		impl RawMessage {
			/// Returns the type tag this message was received with.
			pub fn type_tag(&self) -> &str {
				match self {
					$(Self::$variant(_) => $tag,)+
					Self::Other { type_tag, .. } => type_tag,
				}
			}

			/// Returns the message body as JSON, the shape template paths
			/// are resolved against.
			pub fn body(&self) -> Value {
				match self {
					$(Self::$variant(body) => serde_json::to_value(body).unwrap_or(Value::Null),)+
					Self::Other { value, .. } => value.clone(),
				}
			}
		}

		impl From<MessageEnvelope> for RawMessage {
			fn from(envelope: MessageEnvelope) -> Self {
				let MessageEnvelope { type_tag, value } = envelope;
				match type_tag.as_str() {
					$($tag => match serde_json::from_value::<$body>(value.clone()) {
						Ok(body) => Self::$variant(body),
						Err(_) => Self::Other { type_tag, value },
					},)+
					_ => Self::Other { type_tag, value },
				}
			}
		}
	};
}

raw_messages! {
	BankSend(MsgSend) => "bank/MsgSend",
	BankMultiSend(MsgMultiSend) => "bank/MsgMultiSend",
	Delegate(MsgDelegation) => "staking/MsgDelegate",
	Undelegate(MsgDelegation) => "staking/MsgUndelegate",
	BeginRedelegate(MsgBeginRedelegate) => "staking/MsgBeginRedelegate",
	WithdrawDelegationReward(MsgWithdrawDelegationReward) => "distribution/MsgWithdrawDelegationReward",
	WithdrawValidatorCommission(MsgWithdrawValidatorCommission) => "distribution/MsgWithdrawValidatorCommission",
	ModifyWithdrawAddress(MsgModifyWithdrawAddress) => "distribution/MsgModifyWithdrawAddress",
	Swap(MsgSwap) => "market/MsgSwap",
	SwapSend(MsgSwapSend) => "market/MsgSwapSend",
	Vote(MsgVote) => "gov/MsgVote",
	Deposit(MsgDeposit) => "gov/MsgDeposit",
	SubmitProposal(MsgSubmitProposal) => "gov/MsgSubmitProposal",
	ExecuteContract(MsgExecuteContract) => "wasm/MsgExecuteContract",
	InstantiateContract(MsgInstantiateContract) => "wasm/MsgInstantiateContract",
	StoreCode(MsgStoreCode) => "wasm/MsgStoreCode",
	AggregateExchangeRateVote(MsgAggregateExchangeRateVote) => "oracle/MsgAggregateExchangeRateVote",
	AggregateExchangeRatePrevote(MsgAggregateExchangeRatePrevote) => "oracle/MsgAggregateExchangeRatePrevote",
	DelegateFeedConsent(MsgDelegateFeedConsent) => "oracle/MsgDelegateFeedConsent",
	ExecAuthorized(MsgExecAuthorized) => "msgauth/MsgExecAuthorized",
}

impl From<RawMessage> for MessageEnvelope {
	fn from(message: RawMessage) -> Self {
		Self {
			type_tag: message.type_tag().to_string(),
			value: message.body(),
		}
	}
}

impl RawMessage {
	/// Builds a message from its tag and body, the same way decoding does.
	pub fn from_parts(type_tag: impl Into<String>, value: Value) -> Self {
		MessageEnvelope {
			type_tag: type_tag.into(),
			value,
		}
		.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_known_tag_decodes_to_typed_variant() {
		let msg: RawMessage = serde_json::from_value(json!({
			"type": "bank/MsgSend",
			"value": {
				"from_address": "terra1from",
				"to_address": "terra1to",
				"amount": [{ "denom": "uluna", "amount": "100" }]
			}
		}))
		.unwrap();

		match &msg {
			RawMessage::BankSend(send) => {
				assert_eq!(send.from_address, "terra1from");
				assert_eq!(send.amount, vec![Coin::new("100", "uluna")]);
			}
			other => panic!("unexpected variant: {:?}", other),
		}
		assert_eq!(msg.type_tag(), "bank/MsgSend");
	}

	#[test]
	fn test_unknown_tag_is_preserved() {
		let msg: RawMessage = serde_json::from_value(json!({
			"type": "unsupported/MsgFoo",
			"value": { "anything": [1, 2, 3] }
		}))
		.unwrap();

		assert_eq!(msg.type_tag(), "unsupported/MsgFoo");
		assert_eq!(msg.body(), json!({ "anything": [1, 2, 3] }));
	}

	#[test]
	fn test_malformed_known_body_degrades_to_other() {
		let msg = RawMessage::from_parts("bank/MsgSend", json!({ "amount": "not-a-list" }));
		assert!(matches!(msg, RawMessage::Other { .. }));
		assert_eq!(msg.type_tag(), "bank/MsgSend");
	}

	#[test]
	fn test_vote_accepts_numeric_fields() {
		let msg = RawMessage::from_parts(
			"gov/MsgVote",
			json!({ "proposal_id": 42, "voter": "terra1voter", "option": 1 }),
		);
		match msg {
			RawMessage::Vote(vote) => {
				assert_eq!(vote.proposal_id, "42");
				assert_eq!(vote.option, "1");
			}
			other => panic!("unexpected variant: {:?}", other),
		}
	}

	#[test]
	fn test_nested_authz_messages() {
		let msg = RawMessage::from_parts(
			"msgauth/MsgExecAuthorized",
			json!({
				"grantee": "terra1grantee",
				"msgs": [{ "type": "bank/MsgSend", "value": { "from_address": "terra1a" } }]
			}),
		);
		match msg {
			RawMessage::ExecAuthorized(exec) => {
				assert_eq!(exec.msgs.len(), 1);
				assert_eq!(exec.msgs[0].type_tag(), "bank/MsgSend");
			}
			other => panic!("unexpected variant: {:?}", other),
		}
	}

	#[test]
	fn test_execute_contract_entry_point() {
		let msg = MsgExecuteContract {
			execute_msg: json!({ "transfer": { "amount": "5", "recipient": "terra1r" } }),
			..Default::default()
		};
		assert_eq!(msg.entry_point(), Some("transfer"));
	}

	#[test]
	fn test_absent_coin_stays_absent_in_body() {
		let msg = RawMessage::from_parts(
			"staking/MsgDelegate",
			json!({ "delegator_address": "terra1d", "validator_address": "terravaloper1v" }),
		);
		assert!(matches!(&msg, RawMessage::Delegate(d) if d.amount.is_none()));
		assert_eq!(msg.body().pointer("/amount"), None);

		let swap = RawMessage::from_parts(
			"market/MsgSwap",
			json!({ "trader": "terra1t", "offer_coin": { "denom": "uusd", "amount": "5" } }),
		);
		assert_eq!(
			swap.body().pointer("/offer_coin"),
			Some(&json!({ "denom": "uusd", "amount": "5" }))
		);
	}

	#[test]
	fn test_message_without_type_is_kept_as_other() {
		let msgs: Vec<RawMessage> = serde_json::from_value(json!([
			{ "value": { "a": 1 } },
			{ "type": null, "value": {} }
		]))
		.unwrap();

		assert_eq!(msgs[0].type_tag(), "");
		assert!(matches!(msgs[0], RawMessage::Other { .. }));
		assert_eq!(msgs[1].type_tag(), "");
	}
}
