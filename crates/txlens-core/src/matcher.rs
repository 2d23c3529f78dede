//! Compiled, tag-indexed form of a rule set.

use std::collections::HashMap;
use txlens_rules::ActionRule;

/// An immutable rule index.
///
/// Rules are grouped by message type tag; each group keeps the order the
/// rules had in the source list, which is the tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMatcher {
	rules: Vec<ActionRule>,
	by_tag: HashMap<String, Vec<usize>>,
}

/// Compiles a rule set into a [`CompiledMatcher`].
pub fn compile(rules: Vec<ActionRule>) -> CompiledMatcher {
	let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
	for (index, rule) in rules.iter().enumerate() {
		by_tag.entry(rule.msg_type.clone()).or_default().push(index);
	}
	CompiledMatcher { rules, by_tag }
}

impl CompiledMatcher {
	/// Candidate rules for a tag, in rule-list order.
	pub fn candidates<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a ActionRule> + 'a {
		self.by_tag
			.get(tag)
			.into_iter()
			.flatten()
			.map(move |&index| &self.rules[index])
	}

	/// Tags with at least one rule, sorted.
	pub fn tags(&self) -> Vec<&str> {
		let mut tags: Vec<_> = self.by_tag.keys().map(String::as_str).collect();
		tags.sort_unstable();
		tags
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use txlens_rules::{build_rule_set, Matcher, Source};
	use txlens_types::EventKind;

	fn rule(tag: &str, canonical: &str, matcher: Matcher) -> ActionRule {
		ActionRule::builder(tag)
			.canonical(canonical)
			.matching(matcher)
			.text("x", Source::message("/x"))
			.line("{{ x }}")
			.build()
			.unwrap()
	}

	#[test]
	fn test_candidates_preserve_list_order() {
		let matcher = compile(vec![
			rule("a/Msg", "first", Matcher::event(EventKind::Transfer)),
			rule("b/Msg", "other", Matcher::Any),
			rule("a/Msg", "second", Matcher::Any),
		]);

		let order: Vec<_> = matcher
			.candidates("a/Msg")
			.map(|r| r.canonical_type.as_str())
			.collect();
		assert_eq!(order, vec!["first", "second"]);
		assert_eq!(matcher.candidates("missing/Msg").count(), 0);
		assert_eq!(matcher.tags(), vec!["a/Msg", "b/Msg"]);
		assert_eq!(matcher.len(), 3);
	}

	#[test]
	fn test_compile_is_deterministic() {
		let first = compile(build_rule_set("columbus-5").unwrap());
		let second = compile(build_rule_set("columbus-5").unwrap());
		assert_eq!(first, second);
	}

	#[test]
	fn test_compiled_matcher_is_shareable() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<CompiledMatcher>();
	}
}
