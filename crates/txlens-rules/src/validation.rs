//! Design-time checks for rule sets.
//!
//! Overlapping matchers are a rule-authoring defect, so they are reported
//! here rather than handled during extraction.

use tracing::debug;

use crate::{ActionRule, RuleSetError};

/// Checks a rule set for shadowed rules and dangling template slots.
pub fn validate(rules: &[ActionRule]) -> Result<(), RuleSetError> {
	for (index, rule) in rules.iter().enumerate() {
		for slot in rule.lines.iter().flat_map(|line| line.slots()) {
			if !rule.params.iter().any(|param| param.name == slot) {
				return Err(RuleSetError::InvalidTemplate {
					tag: rule.msg_type.clone(),
					reason: format!("slot '{}' has no parameter", slot),
				});
			}
		}

		let shadowed_by = rules[..index]
			.iter()
			.enumerate()
			.filter(|(_, earlier)| earlier.msg_type == rule.msg_type)
			.find(|(_, earlier)| {
				earlier.matcher.is_unconditional() || earlier.matcher == rule.matcher
			})
			.map(|(i, _)| i);

		if let Some(shadowed_by) = shadowed_by {
			return Err(RuleSetError::Ambiguous {
				tag: rule.msg_type.clone(),
				index,
				shadowed_by,
			});
		}
	}

	debug!(rules = rules.len(), "Rule set validated");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Matcher, Source};
	use txlens_types::{EventKind, LineTemplate};

	fn rule(tag: &str, matcher: Matcher) -> ActionRule {
		ActionRule::builder(tag)
			.matching(matcher)
			.text("x", Source::message("/x"))
			.line("{{ x }}")
			.build()
			.unwrap()
	}

	#[test]
	fn test_specific_before_general_is_valid() {
		let rules = vec![
			rule("a/Msg", Matcher::event(EventKind::Transfer)),
			rule("a/Msg", Matcher::Any),
			rule("b/Msg", Matcher::Any),
		];
		assert!(validate(&rules).is_ok());
	}

	#[test]
	fn test_general_before_specific_is_ambiguous() {
		let rules = vec![
			rule("a/Msg", Matcher::Any),
			rule("a/Msg", Matcher::event(EventKind::Transfer)),
		];
		assert_eq!(
			validate(&rules),
			Err(RuleSetError::Ambiguous {
				tag: "a/Msg".into(),
				index: 1,
				shadowed_by: 0,
			})
		);
	}

	#[test]
	fn test_identical_matchers_are_ambiguous() {
		let rules = vec![
			rule("a/Msg", Matcher::event(EventKind::Swap)),
			rule("b/Msg", Matcher::Any),
			rule("a/Msg", Matcher::event(EventKind::Swap)),
		];
		assert!(matches!(
			validate(&rules),
			Err(RuleSetError::Ambiguous { index: 2, .. })
		));
	}

	#[test]
	fn test_dangling_slot_is_rejected() {
		let mut broken = rule("a/Msg", Matcher::Any);
		broken.lines.push(LineTemplate::slot("missing"));
		assert!(matches!(
			validate(&[broken]),
			Err(RuleSetError::InvalidTemplate { .. })
		));
	}
}
