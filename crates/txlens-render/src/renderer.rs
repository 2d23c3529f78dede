//! Template rendering for canonical actions.

use minijinja::{Environment, UndefinedBehavior};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::warn;
use txlens_types::{CanonicalAction, LineTemplate, MessageGroup, ParamValue};

use crate::format::Formatters;

fn environment() -> &'static Environment<'static> {
	static ENV: OnceLock<Environment<'static>> = OnceLock::new();
	ENV.get_or_init(|| {
		let mut env = Environment::new();
		env.set_undefined_behavior(UndefinedBehavior::Strict);
		env
	})
}

/// Renders each summary line of an action.
///
/// Every slot is bound to its parameter formatted by kind. A slot without a
/// parameter, or a line that fails to render, yields the missing
/// placeholder instead of aborting the action.
pub fn render(action: &CanonicalAction, formatters: &Formatters) -> Vec<String> {
	let placeholder = formatters.param(&ParamValue::Missing);
	let context: BTreeMap<&str, String> = action
		.params
		.iter()
		.map(|param| (param.name.as_str(), formatters.param(&param.value)))
		.collect();

	action
		.lines
		.iter()
		.map(|line| render_line(action, line, &context, &placeholder))
		.collect()
}

fn render_line<'a>(
	action: &CanonicalAction,
	line: &'a LineTemplate,
	context: &BTreeMap<&'a str, String>,
	placeholder: &str,
) -> String {
	let mut bound = context.clone();
	for slot in line.slots() {
		if !bound.contains_key(slot) {
			warn!(
				msg_type = %action.msg_type,
				slot = %slot,
				"Template slot has no parameter"
			);
			bound.insert(slot, placeholder.to_string());
		}
	}

	match environment().render_str(&line.source, &bound) {
		Ok(rendered) => rendered,
		Err(e) => {
			warn!(
				msg_type = %action.msg_type,
				template = %line.source,
				error = %e,
				"Failed to render summary line"
			);
			placeholder.to_string()
		}
	}
}

/// Renders an action into its display group.
pub fn render_group(action: &CanonicalAction, formatters: &Formatters, success: bool) -> MessageGroup {
	MessageGroup {
		tag: action.tag(),
		summary: render(action, formatters),
		success,
	}
}
