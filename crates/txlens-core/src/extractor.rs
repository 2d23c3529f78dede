//! Canonical action extraction.
//!
//! Messages are paired with their logs, each pair is run against the
//! candidate rules for its type tag, and the first accepting rule projects
//! its template into a [`CanonicalAction`]. Unmatched messages become
//! `Unknown` actions, so the output always has one action per message.

use serde_json::Value;
use tracing::{debug, trace};
use txlens_rules::{ActionRule, MatchInput, ParamKind, Source};
use txlens_types::{
	ActionKind, ActionOrigin, ActionParam, CanonicalAction, Coin, ParamValue, RawMessage,
	RawTransaction, TxLog,
};

use crate::matcher::CompiledMatcher;

/// A message together with its correlated log and normalized body.
#[derive(Debug, Clone)]
pub struct MessagePair<'a> {
	pub index: usize,
	pub message: &'a RawMessage,
	pub log: Option<(usize, &'a TxLog)>,
	/// Message body as JSON; template paths resolve against it.
	pub body: Value,
}

impl<'a> MessagePair<'a> {
	fn match_input(&self) -> MatchInput<'a> {
		MatchInput {
			message: self.message,
			log: self.log.map(|(_, log)| log),
		}
	}
}

/// Pairs every message of a transaction with its log, in message order.
pub fn pairs(tx: &RawTransaction) -> Vec<MessagePair<'_>> {
	tx.messages
		.iter()
		.enumerate()
		.map(|(index, message)| MessagePair {
			index,
			message,
			log: tx.log_for(index),
			body: message.body(),
		})
		.collect()
}

/// Classifies a transaction.
///
/// A failed transaction yields exactly one `Failed` action carrying the raw
/// error text. Otherwise the result holds one action per message, in message
/// order. Never fails and never mutates its input.
pub fn extract(tx: &RawTransaction, matcher: &CompiledMatcher) -> Vec<CanonicalAction> {
	if !tx.success {
		debug!(tx = %tx.hash, "Transaction failed, skipping classification");
		return vec![CanonicalAction::failed(tx.raw_log.clone())];
	}

	pairs(tx)
		.iter()
		.map(|pair| classify(pair, matcher, &tx.hash))
		.collect()
}

fn classify(pair: &MessagePair<'_>, matcher: &CompiledMatcher, hash: &str) -> CanonicalAction {
	let tag = pair.message.type_tag();
	let input = pair.match_input();

	match matcher.candidates(tag).find(|rule| rule.matches(&input)) {
		Some(rule) => {
			trace!(
				tx = hash,
				msg_index = pair.index,
				rule = %rule.canonical_type,
				"Message matched"
			);
			project(rule, pair)
		}
		None => {
			debug!(tx = hash, msg_index = pair.index, tag, "No rule matched message");
			CanonicalAction::unknown(pair.index, tag)
		}
	}
}

/// Projects a rule's template against a matched pair.
pub fn project(rule: &ActionRule, pair: &MessagePair<'_>) -> CanonicalAction {
	let params = rule
		.params
		.iter()
		.map(|spec| ActionParam::new(&spec.name, coerce(spec.kind, resolve(&spec.source, pair))))
		.collect();

	CanonicalAction {
		kind: ActionKind::Matched,
		msg_type: rule.canonical_type.clone(),
		params,
		lines: rule.lines.clone(),
		origin: ActionOrigin {
			msg_index: Some(pair.index),
			log_index: pair.log.map(|(index, _)| index),
			raw_type: Some(pair.message.type_tag().to_string()),
		},
	}
}

fn resolve(source: &Source, pair: &MessagePair<'_>) -> Option<Value> {
	match source {
		Source::Message(pointer) => pair.body.pointer(pointer).cloned(),
		Source::KeyOf(pointer) => pair
			.body
			.pointer(pointer)?
			.as_object()?
			.keys()
			.next()
			.map(|key| Value::String(key.clone())),
		Source::Event { kind, key } => {
			let (_, log) = pair.log?;
			log.events_of(kind)
				.find_map(|event| event.attribute(key))
				.map(|value| Value::String(value.to_string()))
		}
	}
}

/// Turns a resolved JSON value into a typed parameter.
///
/// Values of the wrong shape become [`ParamValue::Raw`] and absent values
/// [`ParamValue::Missing`]; neither affects the other parameters.
fn coerce(kind: ParamKind, value: Option<Value>) -> ParamValue {
	let value = match value {
		None | Some(Value::Null) => return ParamValue::Missing,
		Some(Value::String(s)) if s.is_empty() => return ParamValue::Missing,
		Some(value) => value,
	};

	match (kind, value) {
		(ParamKind::Address, Value::String(s)) => ParamValue::Address(s),
		(ParamKind::Text, Value::String(s)) => ParamValue::Text(s),
		(ParamKind::Text, v @ (Value::Number(_) | Value::Bool(_))) => ParamValue::Text(v.to_string()),
		(ParamKind::Label, Value::String(s)) => ParamValue::Label(s),
		(ParamKind::Label, Value::Number(n)) => ParamValue::Label(n.to_string()),
		(ParamKind::Coins, Value::String(s)) => match Coin::parse_list(&s) {
			Some(coins) => ParamValue::Coins(coins),
			None => ParamValue::Raw(s),
		},
		(ParamKind::Coins, v @ Value::Object(_)) => match serde_json::from_value::<Coin>(v.clone()) {
			Ok(coin) if coin.denom.is_empty() && coin.amount.is_empty() => ParamValue::Missing,
			Ok(coin) if !coin.denom.is_empty() && !coin.amount.is_empty() => {
				ParamValue::Coins(vec![coin])
			}
			_ => ParamValue::Raw(v.to_string()),
		},
		(ParamKind::Coins, Value::Array(items)) if items.is_empty() => ParamValue::Missing,
		(ParamKind::Coins, v @ Value::Array(_)) => {
			match serde_json::from_value::<Vec<Coin>>(v.clone()) {
				Ok(coins) if coins.iter().all(|c| !c.denom.is_empty() && !c.amount.is_empty()) => {
					ParamValue::Coins(coins)
				}
				_ => ParamValue::Raw(v.to_string()),
			}
		}
		(_, other) => ParamValue::Raw(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compile;
	use serde_json::json;
	use txlens_rules::{build_rule_set, Matcher};
	use txlens_types::{ActionKind, EventKind};

	fn terra() -> CompiledMatcher {
		compile(build_rule_set("columbus-5").unwrap())
	}

	fn tx(messages: Value, logs: Value, success: bool) -> RawTransaction {
		serde_json::from_value(json!({
			"hash": "0xHASH",
			"chain_id": "columbus-5",
			"timestamp": "2021-10-01T12:00:00Z",
			"messages": messages,
			"logs": logs,
			"success": success,
			"raw_log": "insufficient funds"
		}))
		.unwrap()
	}

	fn send_message() -> Value {
		json!({
			"type": "bank/MsgSend",
			"value": {
				"from_address": "terra1from",
				"to_address": "terra1to",
				"amount": [{ "denom": "uluna", "amount": "7" }]
			}
		})
	}

	fn transfer_log(amount: &str) -> Value {
		json!({
			"msg_index": 0,
			"events": [{
				"type": "transfer",
				"attributes": [
					{ "key": "recipient", "value": "terra1to" },
					{ "key": "sender", "value": "terra1from" },
					{ "key": "amount", "value": amount }
				]
			}]
		})
	}

	#[test]
	fn test_send_uses_correlated_log_amount() {
		let tx = tx(json!([send_message()]), json!([transfer_log("100uluna")]), true);
		let actions = extract(&tx, &terra());

		assert_eq!(actions.len(), 1);
		let action = &actions[0];
		assert_eq!(action.kind, ActionKind::Matched);
		assert_eq!(action.tag(), "MsgSend");
		assert_eq!(
			action.param("amount"),
			Some(&ParamValue::Coins(vec![Coin::new("100", "uluna")]))
		);
		assert_eq!(
			action.param("from"),
			Some(&ParamValue::Address("terra1from".into()))
		);
		assert_eq!(action.origin.msg_index, Some(0));
		assert_eq!(action.origin.log_index, Some(0));
	}

	#[test]
	fn test_send_without_log_falls_back_to_message() {
		let tx = tx(json!([send_message()]), json!([]), true);
		let actions = extract(&tx, &terra());

		assert_eq!(actions[0].kind, ActionKind::Matched);
		assert_eq!(
			actions[0].param("amount"),
			Some(&ParamValue::Coins(vec![Coin::new("7", "uluna")]))
		);
		assert_eq!(actions[0].origin.log_index, None);
	}

	#[test]
	fn test_failed_transaction_short_circuits() {
		let tx = tx(
			json!([send_message(), send_message()]),
			json!([transfer_log("100uluna")]),
			false,
		);
		let actions = extract(&tx, &terra());

		assert_eq!(actions, vec![CanonicalAction::failed("insufficient funds")]);
	}

	#[test]
	fn test_unknown_message_yields_placeholder() {
		let tx = tx(
			json!([
				{ "type": "unsupported/MsgFoo", "value": {} },
				send_message()
			]),
			json!([]),
			true,
		);
		let actions = extract(&tx, &terra());

		assert_eq!(actions.len(), 2);
		assert_eq!(actions[0].kind, ActionKind::Unknown);
		assert_eq!(actions[0].tag(), "Unknown");
		assert_eq!(
			actions[0].origin.raw_type.as_deref(),
			Some("unsupported/MsgFoo")
		);
		assert_eq!(actions[1].kind, ActionKind::Matched);
	}

	#[test]
	fn test_count_preserved_for_mixed_messages() {
		let messages = json!([
			send_message(),
			{ "type": "staking/MsgDelegate", "value": {
				"delegator_address": "terra1d",
				"validator_address": "terravaloper1v",
				"amount": { "denom": "uluna", "amount": "5" }
			}},
			{ "type": "gov/MsgVote", "value": { "proposal_id": "3", "voter": "terra1d", "option": "VOTE_OPTION_YES" } },
			{ "type": "nope/Nope", "value": null },
			{ "type": "wasm/MsgExecuteContract", "value": {
				"sender": "terra1s",
				"contract": "terra1c",
				"execute_msg": { "deposit_stable": {} }
			}}
		]);
		let tx = tx(messages, json!([]), true);
		let actions = extract(&tx, &terra());

		assert_eq!(actions.len(), 5);
		let tags: Vec<_> = actions.iter().map(CanonicalAction::tag).collect();
		assert_eq!(
			tags,
			vec!["MsgSend", "MsgDelegate", "MsgVote", "Unknown", "execute contract"]
		);
		assert_eq!(
			actions[4].param("entry"),
			Some(&ParamValue::Text("deposit_stable".into()))
		);
	}

	#[test]
	fn test_zero_messages_yield_no_actions() {
		let tx = tx(json!([]), json!([]), true);
		assert!(extract(&tx, &terra()).is_empty());
	}

	#[test]
	fn test_first_match_wins() {
		let first = ActionRule::builder("bank/MsgSend")
			.canonical("bank/first")
			.matching(Matcher::event(EventKind::Transfer))
			.text("who", Source::message("/from_address"))
			.line("first {{ who }}")
			.build()
			.unwrap();
		let second = ActionRule::builder("bank/MsgSend")
			.canonical("bank/second")
			.text("who", Source::message("/from_address"))
			.line("second {{ who }}")
			.build()
			.unwrap();
		let matcher = compile(vec![first, second]);

		let with_log = tx(json!([send_message()]), json!([transfer_log("1uluna")]), true);
		assert_eq!(extract(&with_log, &matcher)[0].msg_type, "bank/first");

		let without_log = tx(json!([send_message()]), json!([]), true);
		assert_eq!(extract(&without_log, &matcher)[0].msg_type, "bank/second");
	}

	#[test]
	fn test_malformed_param_degrades_alone() {
		let tx = tx(json!([send_message()]), json!([transfer_log("lots of luna")]), true);
		let actions = extract(&tx, &terra());

		assert_eq!(
			actions[0].param("amount"),
			Some(&ParamValue::Raw("lots of luna".into()))
		);
		assert_eq!(
			actions[0].param("to"),
			Some(&ParamValue::Address("terra1to".into()))
		);
	}

	#[test]
	fn test_malformed_known_message_still_classified() {
		let tx = tx(
			json!([{ "type": "bank/MsgSend", "value": { "from_address": 12, "amount": "x" } }]),
			json!([]),
			true,
		);
		let actions = extract(&tx, &terra());

		assert_eq!(actions[0].kind, ActionKind::Matched);
		assert_eq!(actions[0].param("from"), Some(&ParamValue::Raw("12".into())));
		assert_eq!(actions[0].param("to"), Some(&ParamValue::Missing));
		assert_eq!(actions[0].param("amount"), Some(&ParamValue::Raw("x".into())));
	}

	#[test]
	fn test_absent_coin_field_is_missing() {
		let tx = tx(
			json!([{ "type": "staking/MsgDelegate", "value": {
				"delegator_address": "terra1d",
				"validator_address": "terravaloper1v"
			}}]),
			json!([]),
			true,
		);
		let actions = extract(&tx, &terra());

		assert_eq!(actions[0].kind, ActionKind::Matched);
		assert_eq!(actions[0].param("amount"), Some(&ParamValue::Missing));
		assert_eq!(
			actions[0].param("validator"),
			Some(&ParamValue::Address("terravaloper1v".into()))
		);
	}

	#[test]
	fn test_log_without_expected_event_uses_message_rule() {
		let instantiate = json!({
			"type": "wasm/MsgInstantiateContract",
			"value": { "sender": "terra1s", "code_id": "42", "init_msg": {} }
		});
		let log = json!({
			"msg_index": 0,
			"events": [{
				"type": "message",
				"attributes": [{ "key": "action", "value": "instantiate" }]
			}]
		});
		let tx = tx(json!([instantiate]), json!([log]), true);
		let actions = extract(&tx, &terra());

		assert_eq!(actions[0].kind, ActionKind::Matched);
		assert_eq!(actions[0].origin.log_index, Some(0));
		assert_eq!(actions[0].param("contract"), None);
		assert_eq!(actions[0].param("code"), Some(&ParamValue::Text("42".into())));
	}

	#[test]
	fn test_coerce_shapes() {
		assert_eq!(coerce(ParamKind::Text, Some(json!(5))), ParamValue::Text("5".into()));
		assert_eq!(coerce(ParamKind::Label, Some(json!(1))), ParamValue::Label("1".into()));
		assert_eq!(coerce(ParamKind::Coins, Some(json!([]))), ParamValue::Missing);
		assert_eq!(coerce(ParamKind::Address, Some(json!(""))), ParamValue::Missing);
		assert_eq!(coerce(ParamKind::Address, None), ParamValue::Missing);
		assert_eq!(
			coerce(ParamKind::Coins, Some(json!({ "denom": "uusd", "amount": "3" }))),
			ParamValue::Coins(vec![Coin::new("3", "uusd")])
		);
		assert_eq!(
			coerce(ParamKind::Coins, Some(json!({ "denom": "", "amount": "" }))),
			ParamValue::Missing
		);
		assert_eq!(
			coerce(ParamKind::Text, Some(json!({ "a": 1 }))),
			ParamValue::Raw("{\"a\":1}".into())
		);
	}
}
