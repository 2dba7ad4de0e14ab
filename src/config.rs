//! Gateway configuration: backend base URL, unauthenticated entry point, and timing knobs.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "ERP_API_URL";
/// Environment variable overriding the unauthenticated entry point.
pub const ENTRY_POINT_ENV: &str = "ERP_ENTRY_POINT";

/// Settings shared by every call a [`Gateway`](crate::gateway::Gateway) issues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	/// Backend base URL; request paths are appended verbatim.
	pub base_url: Url,
	/// Location the application returns to after a forced logout.
	pub entry_point: String,
	/// Path of the refresh endpoint relative to the base URL.
	pub refresh_path: String,
	/// Treat tokens as expired this long before their `exp` claim.
	pub expiry_leeway: Duration,
	/// Per-request timeout for the default transport; `None` defers to the transport.
	pub request_timeout: Option<std::time::Duration>,
}
impl GatewayConfig {
	const DEFAULT_ENTRY_POINT: &str = "/";
	const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

	/// Returns a builder seeded with the provided base URL.
	pub fn builder(base_url: impl Into<String>) -> GatewayConfigBuilder {
		GatewayConfigBuilder::new(base_url)
	}

	/// Loads configuration from `ERP_API_URL` and the optional `ERP_ENTRY_POINT`.
	pub fn from_env() -> Result<Self, ConfigError> {
		let base_url = env::var(BASE_URL_ENV)
			.ok()
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingBaseUrl { var: BASE_URL_ENV })?;
		let mut builder = Self::builder(base_url);

		if let Some(entry_point) = env::var(ENTRY_POINT_ENV).ok().filter(|v| !v.is_empty()) {
			builder = builder.entry_point(entry_point);
		}

		builder.build()
	}

	/// Joins the base URL with a request path, without normalizing either side.
	pub fn endpoint(&self, path: &str) -> String {
		let base = self.base_url.as_str().trim_end_matches('/');

		if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Debug)]
pub struct GatewayConfigBuilder {
	/// Raw base URL, validated on build.
	pub base_url: String,
	/// Unauthenticated entry point.
	pub entry_point: String,
	/// Refresh endpoint path.
	pub refresh_path: String,
	/// Expiry leeway applied to the pre-flight check.
	pub expiry_leeway: Duration,
	/// Optional default-transport timeout.
	pub request_timeout: Option<std::time::Duration>,
}
impl GatewayConfigBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			entry_point: GatewayConfig::DEFAULT_ENTRY_POINT.into(),
			refresh_path: GatewayConfig::DEFAULT_REFRESH_PATH.into(),
			expiry_leeway: Duration::ZERO,
			request_timeout: None,
		}
	}

	/// Overrides the forced-logout redirect target.
	pub fn entry_point(mut self, entry_point: impl Into<String>) -> Self {
		self.entry_point = entry_point.into();

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Refreshes tokens this long before they actually expire. Negative values clamp to zero.
	pub fn expiry_leeway(mut self, leeway: Duration) -> Self {
		self.expiry_leeway = if leeway.is_negative() { Duration::ZERO } else { leeway };

		self
	}

	/// Applies a per-request timeout to the default transport.
	pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Validates the base URL and produces a [`GatewayConfig`].
	pub fn build(self) -> Result<GatewayConfig, ConfigError> {
		let base_url = Url::parse(self.base_url.trim())
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: base_url.to_string() });
		}

		Ok(GatewayConfig {
			base_url,
			entry_point: self.entry_point,
			refresh_path: self.refresh_path,
			expiry_leeway: self.expiry_leeway,
			request_timeout: self.request_timeout,
		})
	}
}
