//! Client-level error types and the structured error contract surfaced to callers.

mod code;

pub use code::*;

// self
use crate::{_prelude::*, session::LogoutReason};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message reported for transport failures, matching what callers show to users.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
/// Fallback message when the backend rejects a call without a readable message.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session persistence failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) before any response arrived.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Backend answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// The session could not be refreshed and was torn down.
	#[error("Session expired: {reason}.")]
	SessionExpired {
		/// Why the session was cleared.
		reason: LogoutReason,
	},
	/// Success body did not match the expected shape.
	#[error("Response body could not be decoded (HTTP {status}).")]
	Decode {
		/// Structured decoding failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status of the decoded response.
		status: u16,
	},
}
impl Error {
	/// Machine-readable code for this failure.
	pub fn error_code(&self) -> ErrorCode {
		match self {
			Self::Transport(_) => ErrorCode::NetworkError,
			Self::Api(api) => api.error_code.clone(),
			Self::SessionExpired { .. } => ErrorCode::AuthExpired,
			Self::Storage(_) | Self::Config(_) | Self::Decode { .. } => ErrorCode::UnknownError,
		}
	}

	/// Human-readable message for this failure.
	pub fn message(&self) -> String {
		match self {
			Self::Transport(_) => NETWORK_ERROR_MESSAGE.into(),
			Self::Api(api) => api.message.clone(),
			other => other.to_string(),
		}
	}

	/// Returns the HTTP status when the failure came from a backend response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(api) => Some(api.status),
			Self::Decode { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Flattens the error into the `{ message, errorCode, details? }` contract.
	pub fn to_app_error(&self) -> AppError {
		AppError {
			message: self.message(),
			error_code: self.error_code(),
			details: match self {
				Self::Api(api) => api.details.clone(),
				_ => None,
			},
		}
	}
}

/// Structured error payload handed to UI layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppError {
	/// Human-readable message.
	pub message: String,
	/// Machine-readable code.
	#[serde(rename = "errorCode")]
	pub error_code: ErrorCode,
	/// Optional backend-supplied detail payload.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}
impl From<&Error> for AppError {
	fn from(e: &Error) -> Self {
		e.to_app_error()
	}
}

/// Non-success response returned by the backend.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("Backend rejected the request with HTTP {status} ({error_code}): {message}.")]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Backend message, or a generic fallback.
	pub message: String,
	/// Backend error code, or `UNKNOWN_ERROR`.
	pub error_code: ErrorCode,
	/// Optional detail payload.
	pub details: Option<Value>,
}
impl ApiError {
	/// Interprets an error body.
	///
	/// Recognizes the backend's `{ message, error_code, details }` envelope and FastAPI's
	/// `{ detail }` validation shape; anything else falls back to generic values.
	pub fn from_body(status: u16, body: &Value) -> Self {
		if let Some(code) = body.get("error_code").and_then(Value::as_str) {
			return Self {
				status,
				message: body
					.get("message")
					.and_then(Value::as_str)
					.unwrap_or(REQUEST_FAILED_MESSAGE)
					.to_owned(),
				error_code: ErrorCode::from(code),
				details: body.get("details").filter(|v| !v.is_null()).cloned(),
			};
		}

		match body.get("detail") {
			Some(Value::Array(entries)) => Self {
				status,
				message: entries
					.first()
					.and_then(|entry| entry.get("msg"))
					.and_then(Value::as_str)
					.unwrap_or("Validation error")
					.to_owned(),
				error_code: ErrorCode::ValidationError,
				details: Some(Value::Array(entries.clone())),
			},
			Some(Value::String(detail)) => Self {
				status,
				message: detail.clone(),
				error_code: ErrorCode::UnknownError,
				details: None,
			},
			_ => Self {
				status,
				message: body
					.get("message")
					.and_then(Value::as_str)
					.unwrap_or(REQUEST_FAILED_MESSAGE)
					.to_owned(),
				error_code: ErrorCode::UnknownError,
				details: body.get("details").filter(|v| !v.is_null()).cloned(),
			},
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No base URL was configured.
	#[error("The {var} environment variable is not set.")]
	MissingBaseUrl {
		/// Environment variable that was consulted.
		var: &'static str,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP(S).
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Offending URL.
		url: String,
	},
	/// Request path does not form a valid URL with the base.
	#[error("Request path `{path}` does not form a valid URL.")]
	InvalidPath {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Query parameters must serialize to a JSON object.
	#[error("Query parameters must serialize to a map, found {found}.")]
	InvalidQuery {
		/// JSON kind that was produced instead.
		found: &'static str,
	},
	/// Request body or query could not be serialized.
	#[error("Request payload could not be serialized.")]
	Serialize(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn backend_envelope_is_preserved() {
		let body = json!({
			"message": "Customer email already exists",
			"error_code": "CUSTOMER_EMAIL_EXISTS",
			"details": { "field": "email" }
		});
		let err = ApiError::from_body(409, &body);

		assert_eq!(err.status, 409);
		assert_eq!(err.message, "Customer email already exists");
		assert_eq!(err.error_code, ErrorCode::CustomerEmailExists);
		assert_eq!(err.details, Some(json!({ "field": "email" })));
	}

	#[test]
	fn missing_fields_fall_back_to_generic_values() {
		let err = ApiError::from_body(500, &Value::Null);

		assert_eq!(err.message, REQUEST_FAILED_MESSAGE);
		assert_eq!(err.error_code, ErrorCode::UnknownError);
		assert!(err.details.is_none());
	}

	#[test]
	fn fastapi_validation_errors_use_first_message() {
		let body = json!({
			"detail": [
				{ "loc": ["body", "email"], "msg": "value is not a valid email address" },
				{ "loc": ["body", "name"], "msg": "field required" }
			]
		});
		let err = ApiError::from_body(422, &body);

		assert_eq!(err.error_code, ErrorCode::ValidationError);
		assert_eq!(err.message, "value is not a valid email address");
	}

	#[test]
	fn app_error_serializes_with_camel_case_code() {
		let err = Error::from(ApiError::from_body(
			404,
			&json!({ "message": "GRN not found", "error_code": "GRN_NOT_FOUND" }),
		));
		let payload = serde_json::to_value(err.to_app_error())
			.expect("AppError should serialize to JSON.");

		assert_eq!(payload, json!({ "message": "GRN not found", "errorCode": "GRN_NOT_FOUND" }));
	}

	#[test]
	fn transport_failures_report_network_error() {
		let err = Error::from(TransportError::Io(std::io::Error::other("connection reset")));
		let app = err.to_app_error();

		assert_eq!(app.error_code, ErrorCode::NetworkError);
		assert_eq!(app.message, NETWORK_ERROR_MESSAGE);
		assert!(err.status().is_none());
	}

	#[test]
	fn session_expiry_maps_to_auth_expired() {
		let err = Error::SessionExpired { reason: LogoutReason::MissingRefreshToken };

		assert_eq!(err.error_code(), ErrorCode::AuthExpired);
		assert_eq!(err.error_code().action(), ErrorAction::Logout);
	}
}
