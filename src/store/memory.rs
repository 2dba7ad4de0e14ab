//! Thread-safe in-memory [`SessionStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{PersistedTokens, SessionStore, StoreError, StoreFuture},
};

type StoreCell = Arc<RwLock<PersistedTokens>>;

/// Keeps the persisted pair in-process; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreCell);
impl MemoryStore {
	/// Creates a store pre-seeded with the provided entries.
	pub fn with_tokens(tokens: PersistedTokens) -> Self {
		Self(Arc::new(RwLock::new(tokens)))
	}

	/// Returns a copy of the current entries without going through the async contract.
	pub fn snapshot(&self) -> PersistedTokens {
		self.0.read().clone()
	}

	fn replace_now(cell: StoreCell, tokens: PersistedTokens) -> Result<(), StoreError> {
		*cell.write() = tokens;

		Ok(())
	}
}
impl SessionStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, PersistedTokens> {
		let cell = self.0.clone();

		Box::pin(async move { Ok(cell.read().clone()) })
	}

	fn save(&self, tokens: PersistedTokens) -> StoreFuture<'_, ()> {
		let cell = self.0.clone();

		Box::pin(async move { Self::replace_now(cell, tokens) })
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let cell = self.0.clone();

		Box::pin(async move { Self::replace_now(cell, PersistedTokens::default()) })
	}
}
