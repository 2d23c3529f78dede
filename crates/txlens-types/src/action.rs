//! Canonical actions: the classified, display-ready form of a message.

use minijinja::Environment;
use serde::{Deserialize, Serialize};

use crate::Coin;

/// Tag shown for messages no rule recognised.
pub const UNKNOWN_TAG: &str = "Unknown";
/// Summary line shown for messages no rule recognised.
pub const UNKNOWN_SUMMARY: &str = "Unknown tx";
/// Tag shown for a failed transaction.
pub const FAILED_TAG: &str = "Failed";

/// How an action came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
	/// A rule accepted the message.
	Matched,
	/// No rule accepted the message.
	Unknown,
	/// The transaction failed; the action carries the raw error text.
	Failed,
}

/// A typed display parameter extracted from a message or its log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
	Address(String),
	Coins(Vec<Coin>),
	Text(String),
	/// A translation key, resolved at render time.
	Label(String),
	/// A value that was present but did not fit the declared kind.
	Raw(String),
	/// The source path resolved to nothing.
	Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParam {
	pub name: String,
	pub value: ParamValue,
}

impl ActionParam {
	pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
		Self {
			name: name.into(),
			value,
		}
	}
}

/// A summary line, kept as a minijinja template source.
///
/// Written as `"{{ delegator }} delegated {{ amount }} to {{ validator }}"`.
/// Every top-level variable the template reads is a slot naming one of the
/// action's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineTemplate {
	pub source: String,
	/// Undeclared variables of the template, sorted.
	pub slots: Vec<String>,
}

impl LineTemplate {
	/// Compiles the source to check its syntax and collect its slots.
	pub fn parse(source: &str) -> Result<Self, minijinja::Error> {
		let env = Environment::new();
		let template = env.template_from_str(source)?;
		let mut slots: Vec<String> = template.undeclared_variables(false).into_iter().collect();
		slots.sort();

		Ok(Self {
			source: source.to_string(),
			slots,
		})
	}

	/// A line made of fixed text only.
	pub fn literal(text: impl Into<String>) -> Self {
		Self {
			source: text.into(),
			slots: Vec::new(),
		}
	}

	/// A line made of a single slot.
	pub fn slot(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			source: format!("{{{{ {} }}}}", name),
			slots: vec![name],
		}
	}

	pub fn slots(&self) -> impl Iterator<Item = &str> {
		self.slots.iter().map(String::as_str)
	}
}

/// Where in the raw transaction an action came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ActionOrigin {
	pub msg_index: Option<usize>,
	pub log_index: Option<usize>,
	/// Type tag of the raw message.
	pub raw_type: Option<String>,
}

/// One classified unit of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAction {
	pub kind: ActionKind,
	/// Canonical message type, e.g. `bank/MsgSend`.
	pub msg_type: String,
	pub params: Vec<ActionParam>,
	pub lines: Vec<LineTemplate>,
	pub origin: ActionOrigin,
}

impl CanonicalAction {
	/// Placeholder for a message that no rule accepted.
	pub fn unknown(msg_index: usize, raw_type: impl Into<String>) -> Self {
		Self {
			kind: ActionKind::Unknown,
			msg_type: "unknown".to_string(),
			params: Vec::new(),
			lines: vec![LineTemplate::literal(UNKNOWN_SUMMARY)],
			origin: ActionOrigin {
				msg_index: Some(msg_index),
				log_index: None,
				raw_type: Some(raw_type.into()),
			},
		}
	}

	/// The single action standing in for a failed transaction.
	pub fn failed(raw_log: impl Into<String>) -> Self {
		Self {
			kind: ActionKind::Failed,
			msg_type: "failed".to_string(),
			params: vec![ActionParam::new("log", ParamValue::Text(raw_log.into()))],
			lines: vec![LineTemplate::slot("log")],
			origin: ActionOrigin::default(),
		}
	}

	pub fn param(&self, name: &str) -> Option<&ParamValue> {
		self.params
			.iter()
			.find(|param| param.name == name)
			.map(|param| &param.value)
	}

	/// Short display tag.
	///
	/// For matched actions this is the part of the message type after the
	/// first `/`, with dashes turned into spaces.
	pub fn tag(&self) -> String {
		match self.kind {
			ActionKind::Unknown => UNKNOWN_TAG.to_string(),
			ActionKind::Failed => FAILED_TAG.to_string(),
			ActionKind::Matched => {
				let name = self
					.msg_type
					.split_once('/')
					.map_or(self.msg_type.as_str(), |(_, name)| name);
				name.replace('-', " ")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_line_template() {
		let line = LineTemplate::parse("{{ from }} sent {{ amount }} to {{ to }}").unwrap();
		assert_eq!(line.source, "{{ from }} sent {{ amount }} to {{ to }}");
		assert_eq!(line.slots().collect::<Vec<_>>(), vec!["amount", "from", "to"]);
	}

	#[test]
	fn test_parse_line_template_errors() {
		assert!(LineTemplate::parse("sent {{ amount").is_err());
		assert!(LineTemplate::parse("sent {{ amount }").is_err());
		assert!(LineTemplate::parse("{% if %}").is_err());
	}

	#[test]
	fn test_plain_literal_template() {
		let line = LineTemplate::parse("Stored code").unwrap();
		assert_eq!(line, LineTemplate::literal("Stored code"));
		assert_eq!(line.slots().count(), 0);
	}

	#[test]
	fn test_slot_template() {
		let line = LineTemplate::slot("log");
		assert_eq!(line.source, "{{ log }}");
		assert_eq!(LineTemplate::parse("{{ log }}").unwrap(), line);
	}

	#[test]
	fn test_tag_derivation() {
		let mut action = CanonicalAction::unknown(0, "x/Y");
		assert_eq!(action.tag(), "Unknown");

		action.kind = ActionKind::Matched;
		action.msg_type = "bank/MsgSend".into();
		assert_eq!(action.tag(), "MsgSend");

		action.msg_type = "wasm/transfer-token".into();
		assert_eq!(action.tag(), "transfer token");

		action.msg_type = "plain".into();
		assert_eq!(action.tag(), "plain");

		assert_eq!(CanonicalAction::failed("boom").tag(), "Failed");
	}

	#[test]
	fn test_failed_action_carries_log() {
		let action = CanonicalAction::failed("insufficient funds");
		assert_eq!(action.kind, ActionKind::Failed);
		assert_eq!(
			action.param("log"),
			Some(&ParamValue::Text("insufficient funds".into()))
		);
	}
}
