//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use httpmock::MockServer;
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};
// self
use erp_client::{
	config::GatewayConfig,
	gateway::Gateway,
	session::{LogoutEvent, LogoutHook, TokenSecret},
	store::{MemoryStore, PersistedTokens},
};

/// Builds an unsigned JWT-shaped token whose payload carries the provided `exp` claim.
///
/// `label` lands in the payload so tokens minted in the same second stay distinct.
pub fn jwt(label: &str, exp: i64) -> String {
	let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{label}","exp":{exp}}}"#));

	format!("{header}.{payload}.signature")
}

/// Token valid for the next hour.
pub fn fresh_jwt(label: &str) -> String {
	jwt(label, (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp())
}

/// Token that expired a minute ago.
pub fn expired_jwt(label: &str) -> String {
	jwt(label, (OffsetDateTime::now_utc() - Duration::minutes(1)).unix_timestamp())
}

/// Store seeded with the provided entries.
pub fn seeded_store(access: Option<&str>, refresh: Option<&str>) -> MemoryStore {
	MemoryStore::with_tokens(PersistedTokens {
		access_token: access.map(TokenSecret::new),
		refresh_token: refresh.map(TokenSecret::new),
	})
}

/// Logout hook that records every event it receives.
#[derive(Clone, Default)]
pub struct LogoutLog(Arc<Mutex<Vec<LogoutEvent>>>);
impl LogoutLog {
	pub fn events(&self) -> Vec<LogoutEvent> {
		self.0.lock().clone()
	}
}
impl LogoutHook for LogoutLog {
	fn on_logout(&self, event: &LogoutEvent) {
		self.0.lock().push(event.clone());
	}
}

/// Gateway pointed at the mock server, backed by `store`, with its session restored.
pub async fn gateway(server: &MockServer, store: &MemoryStore) -> (Gateway, LogoutLog) {
	let config = GatewayConfig::builder(server.base_url())
		.entry_point("/login")
		.build()
		.expect("Mock server URL should form a valid config.");
	let log = LogoutLog::default();
	let gateway = Gateway::new(config, Arc::new(store.clone()))
		.expect("Gateway should build against the mock server.")
		.with_logout_hook(log.clone());

	gateway.restore_session().await.expect("Restoring the seeded session should succeed.");

	(gateway, log)
}
