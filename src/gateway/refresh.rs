//! Single-flight token refresh and forced logout.
//!
//! Callers hand in the session epoch they observed. If the epoch has moved on, someone else
//! already rotated (or cleared) the session and the caller reuses that outcome. Otherwise the
//! caller takes the flight guard, re-checks the epoch, and performs the one refresh request for
//! this cycle. A failed refresh tears the session down exactly once; later waiters only see the
//! resulting [`Error::SessionExpired`].

mod metrics;

pub use metrics::{RefreshMetrics, RefreshStats};

// self
use crate::{
	_prelude::*,
	gateway::Gateway,
	http::{Method, OutboundRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::{AccessToken, LogoutReason, TokenPair, TokenSecret},
};

#[derive(Serialize)]
struct RefreshRequest<'a> {
	refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshGrant {
	access_token: String,
	#[serde(default)]
	refresh_token: Option<String>,
}

impl Gateway {
	/// Returns a token newer than the one observed at `observed_epoch`, refreshing if needed.
	pub(crate) async fn refresh(&self, observed_epoch: u64) -> Result<AccessToken> {
		const KIND: CallKind = CallKind::Refresh;

		if let Some(settled) = self.settled_since(observed_epoch) {
			return settled;
		}

		let _flight = self.flight.guard.lock().await;

		if let Some(settled) = self.settled_since(observed_epoch) {
			return settled;
		}

		let span = CallSpan::new(KIND, Method::Post, &self.config.refresh_path);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.exchange()).await;

		match result {
			Ok(token) => {
				obs::record_call_outcome(KIND, CallOutcome::Success);

				Ok(token)
			},
			Err(reason) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				Err(self.force_logout(reason).await)
			},
		}
	}

	/// Outcome of a rotation that happened after `observed_epoch`, if any.
	fn settled_since(&self, observed_epoch: u64) -> Option<Result<AccessToken>> {
		let snapshot = self.session.snapshot();

		if snapshot.epoch == observed_epoch {
			return None;
		}

		Some(snapshot.access_token.ok_or_else(|| Error::SessionExpired {
			reason: (*self.flight.last_logout.lock()).unwrap_or(LogoutReason::MissingRefreshToken),
		}))
	}

	/// Exchanges the stored refresh token for a new pair. Must run under the flight guard.
	async fn exchange(&self) -> Result<AccessToken, LogoutReason> {
		let Some(refresh_token) =
			self.session.refresh_token().await.map_err(|_| LogoutReason::RefreshFailed)?
		else {
			return Err(LogoutReason::MissingRefreshToken);
		};

		self.refresh_metrics.record(CallOutcome::Attempt);

		let grant = self.request_grant(&refresh_token).await.inspect_err(|_| {
			self.refresh_metrics.record(CallOutcome::Failure);
		})?;
		let access_token = AccessToken::new(grant.access_token);
		// Keep the previous refresh token when the backend does not rotate it.
		let refresh_token = grant.refresh_token.map(TokenSecret::new).unwrap_or(refresh_token);

		self.session
			.replace(TokenPair { access_token: access_token.clone(), refresh_token })
			.await
			.map_err(|_| {
				self.refresh_metrics.record(CallOutcome::Failure);

				LogoutReason::RefreshFailed
			})?;
		self.refresh_metrics.record(CallOutcome::Success);

		Ok(access_token)
	}

	async fn request_grant(
		&self,
		refresh_token: &TokenSecret,
	) -> Result<RefreshGrant, LogoutReason> {
		let url = Url::parse(&self.config.endpoint(&self.config.refresh_path))
			.map_err(|_| LogoutReason::RefreshFailed)?;
		let body = serde_json::to_vec(&RefreshRequest { refresh_token: refresh_token.expose() })
			.map_err(|_| LogoutReason::RefreshFailed)?;
		let request = OutboundRequest {
			method: Method::Post,
			url,
			headers: vec![("Content-Type".into(), "application/json".into())],
			body: Some(body),
		};
		let response =
			self.transport.send(request).await.map_err(|_| LogoutReason::RefreshFailed)?;

		if !response.is_success() {
			return Err(LogoutReason::RefreshRejected { status: response.status });
		}

		serde_json::from_slice(&response.body).map_err(|_| LogoutReason::RefreshFailed)
	}

	/// Clears memory and storage, notifies the hook once, and builds the caller's error.
	async fn force_logout(&self, reason: LogoutReason) -> Error {
		// The in-memory token is gone even when the store refuses the clear.
		if let Err(e) = self.session.clear().await {
			self.refresh_metrics.record_store_failure();

			obs::trace_store_clear_failure(reason, &e);
			obs::record_store_clear_failure();
		}

		obs::trace_forced_logout(reason, &self.config.entry_point);
		obs::record_forced_logout(reason);

		self.notify_logout(reason);

		Error::SessionExpired { reason }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{fresh_jwt, jwt_with_exp},
		config::GatewayConfig,
		error::TransportError,
		http::{Transport, TransportFuture, TransportResponse},
		session::LogoutEvent,
		store::{MemoryStore, PersistedTokens, SessionStore, StoreError, StoreFuture},
	};

	/// Answers every refresh with the same canned response.
	struct RefreshEndpoint {
		status: u16,
		body: String,
		calls: Mutex<Vec<OutboundRequest>>,
	}
	impl RefreshEndpoint {
		fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
			Arc::new(Self { status, body: body.into(), calls: Default::default() })
		}
	}
	impl Transport for RefreshEndpoint {
		fn send(&self, request: OutboundRequest) -> TransportFuture<'_> {
			self.calls.lock().push(request);

			let response =
				TransportResponse { status: self.status, body: self.body.clone().into_bytes() };

			Box::pin(async move { Ok::<_, TransportError>(response) })
		}
	}

	fn gateway(
		endpoint: Arc<RefreshEndpoint>,
		store: MemoryStore,
	) -> (Gateway, Arc<Mutex<Vec<LogoutEvent>>>) {
		let events = Arc::new(Mutex::new(Vec::new()));
		let sink = events.clone();
		let config = GatewayConfig::builder("http://erp.local")
			.entry_point("/login")
			.build()
			.expect("Test config should build.");
		let gateway = Gateway::with_transport(config, endpoint, Arc::new(store))
			.with_logout_hook(move |event: &LogoutEvent| sink.lock().push(event.clone()));

		(gateway, events)
	}

	fn stored(access: &str, refresh: Option<&str>) -> MemoryStore {
		MemoryStore::with_tokens(PersistedTokens {
			access_token: Some(TokenSecret::new(access)),
			refresh_token: refresh.map(TokenSecret::new),
		})
	}

	#[tokio::test]
	async fn refresh_keeps_previous_refresh_token_when_not_rotated() {
		let next = fresh_jwt();
		let endpoint = RefreshEndpoint::new(200, format!(r#"{{"access_token":"{next}"}}"#));
		let store = stored(&jwt_with_exp(1), Some("refresh-old"));
		let (gateway, events) = gateway(endpoint.clone(), store.clone());

		gateway.restore_session().await.expect("Restoring should succeed.");

		let epoch = gateway.session.epoch();
		let token = gateway.refresh(epoch).await.expect("Refresh should succeed.");
		let persisted = store.snapshot();
		let calls = endpoint.calls.lock();

		assert_eq!(token.expose(), next);
		assert_eq!(persisted.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-old"));
		assert_eq!(calls[0].url.as_str(), "http://erp.local/auth/refresh");
		assert_eq!(calls[0].header("authorization"), None);
		assert_eq!(
			calls[0].body.as_deref(),
			Some(br#"{"refresh_token":"refresh-old"}"#.as_slice())
		);
		assert!(events.lock().is_empty());
		assert_eq!(gateway.refresh_metrics.successes(), 1);
	}

	#[tokio::test]
	async fn stale_epochs_reuse_the_settled_token() {
		let endpoint = RefreshEndpoint::new(500, "");
		let access = fresh_jwt();
		let (gateway, _) = gateway(endpoint.clone(), stored(&access, Some("refresh")));
		let observed = gateway.session.epoch();

		gateway.restore_session().await.expect("Restoring should succeed.");

		let token = gateway.refresh(observed).await.expect("A newer token should be reused.");

		assert_eq!(token.expose(), access);
		assert!(endpoint.calls.lock().is_empty());
	}

	#[tokio::test]
	async fn rejected_refresh_forces_a_single_logout() {
		let endpoint = RefreshEndpoint::new(401, r#"{"message":"Refresh token revoked"}"#);
		let store = stored(&jwt_with_exp(1), Some("refresh-revoked"));
		let (gateway, events) = gateway(endpoint, store.clone());

		gateway.restore_session().await.expect("Restoring should succeed.");

		let epoch = gateway.session.epoch();
		let err = gateway.refresh(epoch).await.expect_err("A rejected refresh should fail.");

		assert!(matches!(
			err,
			Error::SessionExpired { reason: LogoutReason::RefreshRejected { status: 401 } }
		));
		assert!(store.snapshot().is_empty());
		assert!(gateway.access_token().is_none());

		let err = gateway.refresh(epoch).await.expect_err("Late waiters should see the expiry.");

		assert!(matches!(
			err,
			Error::SessionExpired { reason: LogoutReason::RefreshRejected { status: 401 } }
		));
		assert_eq!(
			*events.lock(),
			vec![LogoutEvent {
				reason: LogoutReason::RefreshRejected { status: 401 },
				redirect_to: "/login".into(),
			}]
		);
		assert_eq!(gateway.refresh_metrics.failures(), 1);
	}

	#[tokio::test]
	async fn missing_refresh_token_logs_out_without_a_network_call() {
		let endpoint = RefreshEndpoint::new(200, "{}");
		let (gateway, events) = gateway(endpoint.clone(), stored(&jwt_with_exp(1), None));
		let epoch = gateway.session.epoch();
		let err = gateway.refresh(epoch).await.expect_err("No refresh token means no refresh.");

		assert!(matches!(err, Error::SessionExpired { reason: LogoutReason::MissingRefreshToken }));
		assert!(endpoint.calls.lock().is_empty());
		assert_eq!(events.lock().len(), 1);
		assert_eq!(gateway.refresh_metrics.attempts(), 0);
	}

	#[tokio::test]
	async fn malformed_refresh_bodies_count_as_failures() {
		let endpoint = RefreshEndpoint::new(200, "not json");
		let (gateway, events) = gateway(endpoint, stored(&jwt_with_exp(1), Some("refresh")));
		let epoch = gateway.session.epoch();
		let err = gateway.refresh(epoch).await.expect_err("Unreadable grants should fail.");

		assert!(matches!(err, Error::SessionExpired { reason: LogoutReason::RefreshFailed }));
		assert_eq!(events.lock()[0].reason, LogoutReason::RefreshFailed);
	}

	/// Memory-backed store whose `clear` always fails, like a read-only session file.
	struct ReadOnlyStore(MemoryStore);
	impl SessionStore for ReadOnlyStore {
		fn load(&self) -> StoreFuture<'_, PersistedTokens> {
			self.0.load()
		}

		fn save(&self, tokens: PersistedTokens) -> StoreFuture<'_, ()> {
			self.0.save(tokens)
		}

		fn clear(&self) -> StoreFuture<'_, ()> {
			Box::pin(async {
				Err(StoreError::Backend { message: "session file is read-only".into() })
			})
		}
	}

	#[tokio::test]
	async fn failed_store_clear_is_reported_and_memory_still_cleared() {
		let endpoint = RefreshEndpoint::new(401, "{}");
		let inner = stored(&jwt_with_exp(1), Some("refresh-stuck"));
		let events = Arc::new(Mutex::new(Vec::new()));
		let sink = events.clone();
		let config = GatewayConfig::builder("http://erp.local")
			.build()
			.expect("Test config should build.");
		let gateway =
			Gateway::with_transport(config, endpoint, Arc::new(ReadOnlyStore(inner.clone())))
				.with_logout_hook(move |event: &LogoutEvent| sink.lock().push(event.clone()));

		gateway.restore_session().await.expect("Restoring should succeed.");

		let epoch = gateway.session.epoch();
		let err = gateway.refresh(epoch).await.expect_err("A rejected refresh should fail.");

		assert!(matches!(
			err,
			Error::SessionExpired { reason: LogoutReason::RefreshRejected { status: 401 } }
		));
		assert!(gateway.access_token().is_none());
		assert_eq!(events.lock().len(), 1);
		assert_eq!(gateway.refresh_metrics.store_failures(), 1);
		assert_eq!(
			inner.snapshot().refresh_token.as_ref().map(TokenSecret::expose),
			Some("refresh-stuck")
		);
	}
}
