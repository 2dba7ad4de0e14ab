//! Query-string construction for `GET` calls.

// self
use crate::{_prelude::*, config::GatewayConfig, error::ConfigError};

/// Serializes `params` into ordered query pairs.
///
/// `params` must serialize to a map (or to `null`, meaning "no parameters"). Entries whose
/// value is `null` are dropped; strings are used verbatim, numbers and booleans use their JSON
/// text, arrays are comma-joined, and nested maps are embedded as JSON text.
pub fn encode_query<Q>(params: &Q) -> Result<Vec<(String, String)>, ConfigError>
where
	Q: ?Sized + Serialize,
{
	match serde_json::to_value(params)? {
		Value::Null => Ok(Vec::new()),
		Value::Object(map) => Ok(map
			.into_iter()
			.filter_map(|(key, value)| stringify(&value).map(|value| (key, value)))
			.collect()),
		other => Err(ConfigError::InvalidQuery { found: kind_of(&other) }),
	}
}

/// Builds the absolute URL for `path`, appending `pairs` to any query already present.
pub fn build_url(
	config: &GatewayConfig,
	path: &str,
	pairs: &[(String, String)],
) -> Result<Url, ConfigError> {
	let mut url = Url::parse(&config.endpoint(path))
		.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source })?;

	if !pairs.is_empty() {
		url.query_pairs_mut().extend_pairs(pairs);
	}

	Ok(url)
}

fn stringify(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Number(n) => Some(n.to_string()),
		Value::Array(items) => Some(
			items
				.iter()
				.map(|item| stringify(item).unwrap_or_default())
				.collect::<Vec<_>>()
				.join(","),
		),
		Value::Object(_) => Some(value.to_string()),
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "a map",
	}
}
