//! Lenient field decoders for indexer data.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts either a JSON string or number and yields its string form.
/// `null` decodes as an empty string.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		Value::Null => Ok(String::new()),
		other => Err(serde::de::Error::custom(format!(
			"expected string or number, got {}",
			other
		))),
	}
}

/// Accepts any JSON value: strings as is, `null` as empty, anything else as
/// its JSON text.
pub(crate) fn lossy_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) => s,
		Value::Null => String::new(),
		other => other.to_string(),
	})
}

/// Treats an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[derive(Debug, Deserialize)]
	struct Sample {
		#[serde(default, deserialize_with = "lossy_string")]
		text: String,
		#[serde(default, deserialize_with = "null_as_default")]
		items: Vec<u32>,
	}

	#[test]
	fn test_lossy_string_accepts_any_value() {
		let sample: Sample = serde_json::from_value(json!({ "text": null })).unwrap();
		assert_eq!(sample.text, "");

		let sample: Sample = serde_json::from_value(json!({ "text": 12 })).unwrap();
		assert_eq!(sample.text, "12");

		let sample: Sample = serde_json::from_value(json!({ "text": { "a": true } })).unwrap();
		assert_eq!(sample.text, "{\"a\":true}");
	}

	#[test]
	fn test_null_as_default() {
		let sample: Sample = serde_json::from_value(json!({ "items": null })).unwrap();
		assert!(sample.items.is_empty());

		let sample: Sample = serde_json::from_value(json!({})).unwrap();
		assert!(sample.items.is_empty());

		let sample: Sample = serde_json::from_value(json!({ "items": [1, 2] })).unwrap();
		assert_eq!(sample.items, vec![1, 2]);
	}
}
