//! Persistence contract and built-in stores for the session token pair.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, session::TokenSecret};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for the persisted `access_token` / `refresh_token` entries.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Reads both entries; missing entries come back as `None`.
	fn load(&self) -> StoreFuture<'_, PersistedTokens>;

	/// Replaces both entries. `None` removes the corresponding entry.
	fn save(&self, tokens: PersistedTokens) -> StoreFuture<'_, ()>;

	/// Removes both entries.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// The persisted entry pair, serialized with exactly the `access_token` and `refresh_token` keys.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTokens {
	/// Persisted access token entry.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<TokenSecret>,
	/// Persisted refresh token entry.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
}
impl PersistedTokens {
	/// Returns `true` when neither entry is present.
	pub fn is_empty(&self) -> bool {
		self.access_token.is_none() && self.refresh_token.is_none()
	}
}
impl Debug for PersistedTokens {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PersistedTokens")
			.field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use std::error::Error as StdError;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "disk full".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("disk full"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn persisted_tokens_use_the_two_entry_layout() {
		let tokens = PersistedTokens {
			access_token: Some(TokenSecret::new("a-1")),
			refresh_token: Some(TokenSecret::new("r-1")),
		};
		let payload =
			serde_json::to_string(&tokens).expect("PersistedTokens should serialize to JSON.");

		assert_eq!(payload, r#"{"access_token":"a-1","refresh_token":"r-1"}"#);
		assert!(!format!("{tokens:?}").contains("a-1"));

		let partial: PersistedTokens = serde_json::from_str(r#"{"refresh_token":"r-2"}"#)
			.expect("A lone refresh entry should deserialize.");

		assert!(partial.access_token.is_none());
		assert!(!partial.is_empty());
		assert!(PersistedTokens::default().is_empty());
	}
}
