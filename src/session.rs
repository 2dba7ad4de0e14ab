//! Session token state: the current access token, its mutation epoch, and the persisted pair.
//!
//! [`Session`] keeps the access token in memory and writes every mutation through to a
//! [`SessionStore`]. The refresh token is only ever read back from the store. Each mutation
//! bumps the session epoch so the gateway can tell whether a refresh already happened after
//! a caller observed its token.

pub mod token;

pub use token::*;

// self
use crate::{
	_prelude::*,
	store::{PersistedTokens, SessionStore},
};

/// Point-in-time view of the session used by one request attempt.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
	/// Access token current at snapshot time.
	pub access_token: Option<AccessToken>,
	/// Session epoch at snapshot time.
	pub epoch: u64,
}

#[derive(Debug, Default)]
struct SessionState {
	access_token: Option<AccessToken>,
	epoch: u64,
}

/// Process-wide session owned by a gateway.
pub struct Session {
	store: Arc<dyn SessionStore>,
	state: RwLock<SessionState>,
}
impl Session {
	/// Creates an empty session backed by the provided store.
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self { store, state: Default::default() }
	}

	/// Returns the backing store.
	pub fn store(&self) -> &Arc<dyn SessionStore> {
		&self.store
	}

	/// Captures the current token and epoch together.
	pub fn snapshot(&self) -> SessionSnapshot {
		let state = self.state.read();

		SessionSnapshot { access_token: state.access_token.clone(), epoch: state.epoch }
	}

	/// Current access token, if any.
	pub fn access_token(&self) -> Option<AccessToken> {
		self.state.read().access_token.clone()
	}

	/// Current epoch.
	pub fn epoch(&self) -> u64 {
		self.state.read().epoch
	}

	/// Hydrates the in-memory access token from the store.
	///
	/// Returns `true` when a persisted access token was found.
	pub async fn restore(&self) -> Result<bool> {
		let persisted = self.store.load().await?;
		let restored = persisted.access_token.map(AccessToken::from);
		let found = restored.is_some();

		self.swap(restored);

		Ok(found)
	}

	/// Installs the pair issued by a login and persists both entries.
	pub async fn establish(&self, tokens: TokenPair) -> Result<()> {
		self.replace(tokens).await
	}

	/// Rotates to a refreshed pair, persisting both entries.
	pub async fn replace(&self, tokens: TokenPair) -> Result<()> {
		self.swap(Some(tokens.access_token.clone()));

		self.store
			.save(PersistedTokens {
				access_token: Some(tokens.access_token.secret().clone()),
				refresh_token: Some(tokens.refresh_token),
			})
			.await?;

		Ok(())
	}

	/// Replaces only the access token, leaving the persisted refresh token untouched.
	///
	/// `None` removes the access entry from the store.
	pub async fn set_access_token(&self, token: Option<AccessToken>) -> Result<()> {
		self.swap(token.clone());

		let mut persisted = self.store.load().await?;

		persisted.access_token = token.map(|t| t.secret().clone());
		self.store.save(persisted).await?;

		Ok(())
	}

	/// Reads the persisted refresh token.
	pub async fn refresh_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.store.load().await?.refresh_token)
	}

	/// Drops the access token from memory and removes both persisted entries.
	pub async fn clear(&self) -> Result<()> {
		self.swap(None);
		self.store.clear().await?;

		Ok(())
	}

	fn swap(&self, token: Option<AccessToken>) {
		let mut state = self.state.write();

		state.access_token = token;
		state.epoch = state.epoch.wrapping_add(1);
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("Session")
			.field("access_token_set", &state.access_token.is_some())
			.field("epoch", &state.epoch)
			.finish()
	}
}

/// Why a session was torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutReason {
	/// A refresh was needed but no refresh token was stored.
	MissingRefreshToken,
	/// The refresh endpoint answered with a non-success status.
	RefreshRejected {
		/// HTTP status returned by the refresh endpoint.
		status: u16,
	},
	/// The refresh call failed in transport or returned an unreadable body.
	RefreshFailed,
	/// The user logged out.
	UserInitiated,
}
impl LogoutReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::MissingRefreshToken => "missing_refresh_token",
			Self::RefreshRejected { .. } => "refresh_rejected",
			Self::RefreshFailed => "refresh_failed",
			Self::UserInitiated => "user_initiated",
		}
	}

	/// Returns `true` for teardowns the user did not ask for.
	pub const fn is_forced(self) -> bool {
		!matches!(self, Self::UserInitiated)
	}
}
impl Display for LogoutReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::MissingRefreshToken => f.write_str("no refresh token is stored"),
			Self::RefreshRejected { status } =>
				write!(f, "the refresh endpoint rejected the token with HTTP {status}"),
			Self::RefreshFailed => f.write_str("the refresh call failed"),
			Self::UserInitiated => f.write_str("the user logged out"),
		}
	}
}

/// Notification delivered once per session teardown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoutEvent {
	/// Why the session ended.
	pub reason: LogoutReason,
	/// Unauthenticated entry point the application should hard-navigate to.
	pub redirect_to: String,
}

/// Receives session teardown notifications, typically to reset application state and
/// navigate back to the entry point.
pub trait LogoutHook
where
	Self: Send + Sync,
{
	/// Called after the session has been cleared.
	fn on_logout(&self, event: &LogoutEvent);
}
impl<F> LogoutHook for F
where
	F: Fn(&LogoutEvent) + Send + Sync,
{
	fn on_logout(&self, event: &LogoutEvent) {
		self(event)
	}
}

/// Hook that ignores logout notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogoutHook;
impl LogoutHook for NoopLogoutHook {
	fn on_logout(&self, _event: &LogoutEvent) {}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::fresh_jwt, store::MemoryStore};

	fn session() -> (Session, MemoryStore) {
		let backend = MemoryStore::default();
		let store: Arc<dyn SessionStore> = Arc::new(backend.clone());

		(Session::new(store), backend)
	}

	#[tokio::test]
	async fn establish_writes_both_entries_and_bumps_epoch() {
		let (session, backend) = session();
		let access = fresh_jwt();

		assert_eq!(session.epoch(), 0);

		session
			.establish(TokenPair::new(access.clone(), "refresh-1"))
			.await
			.expect("Establishing a session should succeed.");

		let persisted = backend.snapshot();

		assert_eq!(session.epoch(), 1);
		assert_eq!(session.access_token().map(|t| t.expose().to_owned()), Some(access.clone()));
		assert_eq!(persisted.access_token.as_ref().map(TokenSecret::expose), Some(access.as_str()));
		assert_eq!(persisted.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-1"));
	}

	#[tokio::test]
	async fn clearing_the_access_token_keeps_the_refresh_entry() {
		let (session, backend) = session();

		session
			.establish(TokenPair::new(fresh_jwt(), "refresh-2"))
			.await
			.expect("Establishing a session should succeed.");
		session.set_access_token(None).await.expect("Clearing the access token should succeed.");

		let persisted = backend.snapshot();

		assert!(session.access_token().is_none());
		assert!(persisted.access_token.is_none());
		assert_eq!(persisted.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-2"));
	}

	#[tokio::test]
	async fn restore_hydrates_access_token_from_store() {
		let access = fresh_jwt();
		let backend = MemoryStore::with_tokens(PersistedTokens {
			access_token: Some(TokenSecret::new(access.clone())),
			refresh_token: Some(TokenSecret::new("refresh-3")),
		});
		let session = Session::new(Arc::new(backend));

		assert!(session.restore().await.expect("Restoring should succeed."));
		assert_eq!(session.access_token().map(|t| t.expose().to_owned()), Some(access));

		session.clear().await.expect("Clearing should succeed.");

		assert!(!session.restore().await.expect("Restoring an empty store should succeed."));
	}

	#[test]
	fn closures_act_as_logout_hooks() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		let hook = move |event: &LogoutEvent| sink.lock().push(event.reason);

		hook.on_logout(&LogoutEvent {
			reason: LogoutReason::RefreshRejected { status: 401 },
			redirect_to: "/".into(),
		});

		assert_eq!(*seen.lock(), vec![LogoutReason::RefreshRejected { status: 401 }]);
		assert!(LogoutReason::MissingRefreshToken.is_forced());
		assert!(!LogoutReason::UserInitiated.is_forced());
	}
}
