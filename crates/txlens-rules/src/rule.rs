//! Action rules, matchers and parameter templates.

use std::fmt;
use txlens_types::{EventKind, LineTemplate, RawMessage, TxLog};

use crate::RuleSetError;

/// The pair a matcher is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
	pub message: &'a RawMessage,
	/// Log correlated with the message, absent for failed or log-less data.
	pub log: Option<&'a TxLog>,
}

/// A named, side-effect-free predicate over a typed message.
#[derive(Clone, Copy)]
pub struct MessagePredicate {
	pub name: &'static str,
	pub test: fn(&RawMessage) -> bool,
}

impl MessagePredicate {
	pub const fn new(name: &'static str, test: fn(&RawMessage) -> bool) -> Self {
		Self { name, test }
	}
}

impl PartialEq for MessagePredicate {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for MessagePredicate {}

impl fmt::Debug for MessagePredicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "MessagePredicate({})", self.name)
	}
}

/// An event that must be present in the correlated log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPattern {
	pub kind: EventKind,
	/// Attribute keys that must be present, optionally with an exact value.
	pub attributes: Vec<(String, Option<String>)>,
}

impl EventPattern {
	pub fn matches(&self, log: &TxLog) -> bool {
		log.events_of(&self.kind).any(|event| {
			self.attributes
				.iter()
				.all(|(key, value)| event.has_attribute(key, value.as_deref()))
		})
	}
}

/// Structural matcher evaluated after the type tag already matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
	/// Accepts every message carrying the rule's tag.
	Any,
	/// Accepts messages satisfying a typed predicate.
	Message(MessagePredicate),
	/// Requires a matching event in the correlated log.
	Event(EventPattern),
	/// Requires every inner matcher to accept.
	All(Vec<Matcher>),
}

impl Matcher {
	pub fn event(kind: EventKind) -> Self {
		Self::Event(EventPattern {
			kind,
			attributes: Vec::new(),
		})
	}

	/// Adds a required attribute key to an event matcher.
	///
	/// Has no effect on other matcher kinds.
	pub fn with_attribute(self, key: impl Into<String>) -> Self {
		self.push_attribute(key.into(), None)
	}

	/// Adds a required attribute key and value to an event matcher.
	pub fn with_attribute_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.push_attribute(key.into(), Some(value.into()))
	}

	fn push_attribute(mut self, key: String, value: Option<String>) -> Self {
		if let Self::Event(pattern) = &mut self {
			pattern.attributes.push((key, value));
		}
		self
	}

	pub fn and(self, other: Matcher) -> Self {
		match self {
			Self::All(mut inner) => {
				inner.push(other);
				Self::All(inner)
			}
			first => Self::All(vec![first, other]),
		}
	}

	/// Evaluates the matcher. Never panics; an event matcher without a log
	/// simply does not match.
	pub fn matches(&self, input: &MatchInput<'_>) -> bool {
		match self {
			Self::Any => true,
			Self::Message(predicate) => (predicate.test)(input.message),
			Self::Event(pattern) => input.log.is_some_and(|log| pattern.matches(log)),
			Self::All(inner) => inner.iter().all(|m| m.matches(input)),
		}
	}

	/// True if the matcher can only accept when a log is present.
	pub fn requires_log(&self) -> bool {
		match self {
			Self::Any | Self::Message(_) => false,
			Self::Event(_) => true,
			Self::All(inner) => inner.iter().any(Matcher::requires_log),
		}
	}

	/// True if the matcher accepts every message with the rule's tag.
	pub fn is_unconditional(&self) -> bool {
		match self {
			Self::Any => true,
			Self::Message(_) | Self::Event(_) => false,
			Self::All(inner) => inner.iter().all(Matcher::is_unconditional),
		}
	}
}

/// How an extracted value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
	Address,
	Coins,
	Text,
	/// A translation key.
	Label,
}

/// Where a parameter's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
	/// JSON pointer into the normalized message body, e.g. `/amount`.
	Message(String),
	/// Key of the object at a JSON pointer, e.g. a contract entry point.
	/// Keys are ordered alphabetically, so the first one in that order wins.
	KeyOf(String),
	/// First value of an attribute on an event in the correlated log.
	Event { kind: EventKind, key: String },
}

impl Source {
	pub fn message(pointer: impl Into<String>) -> Self {
		Self::Message(pointer.into())
	}

	pub fn key_of(pointer: impl Into<String>) -> Self {
		Self::KeyOf(pointer.into())
	}

	pub fn event(kind: EventKind, key: impl Into<String>) -> Self {
		Self::Event {
			kind,
			key: key.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
	pub name: String,
	pub kind: ParamKind,
	pub source: Source,
}

/// One recognised message shape for a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRule {
	/// Message type tag used for lookup, e.g. `wasm/MsgExecuteContract`.
	pub msg_type: String,
	/// Type recorded on the produced action, e.g. `wasm/transfer-token`.
	pub canonical_type: String,
	pub matcher: Matcher,
	pub params: Vec<ParamSpec>,
	pub lines: Vec<LineTemplate>,
}

impl ActionRule {
	pub fn builder(msg_type: impl Into<String>) -> ActionRuleBuilder {
		ActionRuleBuilder::new(msg_type)
	}

	pub fn matches(&self, input: &MatchInput<'_>) -> bool {
		self.matcher.matches(input)
	}
}

/// Builder for [`ActionRule`]. Templates are parsed and checked in
/// [`ActionRuleBuilder::build`].
#[derive(Debug)]
pub struct ActionRuleBuilder {
	msg_type: String,
	canonical_type: Option<String>,
	matcher: Matcher,
	params: Vec<ParamSpec>,
	lines: Vec<String>,
}

impl ActionRuleBuilder {
	pub fn new(msg_type: impl Into<String>) -> Self {
		Self {
			msg_type: msg_type.into(),
			canonical_type: None,
			matcher: Matcher::Any,
			params: Vec::new(),
			lines: Vec::new(),
		}
	}

	pub fn canonical(mut self, canonical_type: impl Into<String>) -> Self {
		self.canonical_type = Some(canonical_type.into());
		self
	}

	pub fn matching(mut self, matcher: Matcher) -> Self {
		self.matcher = matcher;
		self
	}

	pub fn param(mut self, name: impl Into<String>, kind: ParamKind, source: Source) -> Self {
		self.params.push(ParamSpec {
			name: name.into(),
			kind,
			source,
		});
		self
	}

	pub fn address(self, name: impl Into<String>, source: Source) -> Self {
		self.param(name, ParamKind::Address, source)
	}

	pub fn coins(self, name: impl Into<String>, source: Source) -> Self {
		self.param(name, ParamKind::Coins, source)
	}

	pub fn text(self, name: impl Into<String>, source: Source) -> Self {
		self.param(name, ParamKind::Text, source)
	}

	pub fn label(self, name: impl Into<String>, source: Source) -> Self {
		self.param(name, ParamKind::Label, source)
	}

	/// Adds a summary line, a minijinja source such as
	/// `"{{ from }} sent {{ amount }} to {{ to }}"`.
	pub fn line(mut self, pattern: impl Into<String>) -> Self {
		self.lines.push(pattern.into());
		self
	}

	pub fn build(self) -> Result<ActionRule, RuleSetError> {
		let invalid = |reason: String| RuleSetError::InvalidTemplate {
			tag: self.msg_type.clone(),
			reason,
		};

		if self.lines.is_empty() {
			return Err(invalid("rule has no summary line".to_string()));
		}

		for (i, spec) in self.params.iter().enumerate() {
			if self.params[..i].iter().any(|p| p.name == spec.name) {
				return Err(invalid(format!("duplicate parameter '{}'", spec.name)));
			}
		}

		let mut lines = Vec::with_capacity(self.lines.len());
		for pattern in &self.lines {
			let line = LineTemplate::parse(pattern)
				.map_err(|e| invalid(format!("'{}': {}", pattern, e)))?;
			if let Some(slot) = line
				.slots()
				.find(|slot| !self.params.iter().any(|p| p.name == *slot))
			{
				return Err(invalid(format!("slot '{}' has no parameter", slot)));
			}
			lines.push(line);
		}

		Ok(ActionRule {
			canonical_type: self
				.canonical_type
				.clone()
				.unwrap_or_else(|| self.msg_type.clone()),
			msg_type: self.msg_type,
			matcher: self.matcher,
			params: self.params,
			lines,
		})
	}
}
