//! File-backed [`SessionStore`] so CLI tools and services keep their session across restarts.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{PersistedTokens, SessionStore, StoreError, StoreFuture},
};

/// Persists the token pair to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<PersistedTokens>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<PersistedTokens, StoreError> {
		if !path.exists() {
			return Ok(PersistedTokens::default());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(PersistedTokens::default());
		}

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &PersistedTokens) -> Result<(), StoreError> {
		if contents.is_empty() {
			return self.remove_file();
		}

		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize session tokens: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn remove_file(&self) -> Result<(), StoreError> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to remove {}: {e}", self.path.display()),
			}),
		}
	}
}
impl SessionStore for FileStore {
	fn load(&self) -> StoreFuture<'_, PersistedTokens> {
		Box::pin(async move { Ok(self.inner.read().clone()) })
	}

	fn save(&self, tokens: PersistedTokens) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			*guard = tokens;
			self.persist_locked(&guard)
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			*guard = PersistedTokens::default();
			self.persist_locked(&guard)
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// self
	use super::*;
	use crate::session::TokenSecret;

	fn temp_path(label: &str) -> PathBuf {
		let unique = format!(
			"erp_client_file_store_{label}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn tokens(access: &str, refresh: &str) -> PersistedTokens {
		PersistedTokens {
			access_token: Some(TokenSecret::new(access)),
			refresh_token: Some(TokenSecret::new(refresh)),
		}
	}

	#[tokio::test]
	async fn save_and_reload_round_trip() {
		let path = temp_path("reload");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store.save(tokens("access-1", "refresh-1")).await.expect("Failed to save token pair.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store.");
		let loaded = reopened.load().await.expect("Failed to load token pair.");

		assert_eq!(loaded, tokens("access-1", "refresh-1"));

		let raw = fs::read_to_string(&path).expect("Store file should exist after a save.");

		assert!(raw.contains("\"access_token\""));
		assert!(raw.contains("\"refresh_token\""));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store file {}: {e}", path.display())
		});
	}

	#[tokio::test]
	async fn clear_removes_the_backing_file() {
		let path = temp_path("clear");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store.save(tokens("access-2", "refresh-2")).await.expect("Failed to save token pair.");

		assert!(path.exists());

		store.clear().await.expect("Failed to clear file store.");

		assert!(!path.exists());
		assert!(store.load().await.expect("Failed to load after clear.").is_empty());

		store.clear().await.expect("Clearing twice should be harmless.");
	}

	#[test]
	fn empty_files_open_as_empty_sessions() {
		let path = temp_path("empty");

		fs::write(&path, b"\n").expect("Failed to create empty store file.");

		let store = FileStore::open(&path).expect("Empty store files should open.");

		assert!(store.inner.read().is_empty());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store file {}: {e}", path.display())
		});
	}
}
