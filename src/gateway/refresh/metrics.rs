// std
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
// self
use crate::{_prelude::*, obs::CallOutcome};

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
	/// Refresh requests sent to the backend.
	pub attempts: u64,
	/// Refreshes that stored a new token.
	pub successes: u64,
	/// Refreshes that reached the network and still ended the session.
	pub failures: u64,
	/// Forced logouts that could not wipe the persisted entries.
	pub store_failures: u64,
	/// When a token was last rotated.
	pub last_rotation: Option<OffsetDateTime>,
}

/// Refresh counters shared by every clone of a gateway.
///
/// Refresh counters only move for calls that reach the network. Waiters that reuse another
/// caller's rotation leave them untouched. Store failures are counted for every forced logout.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	store_failures: AtomicU64,
	// Unix seconds; zero until the first rotation.
	last_rotation: AtomicI64,
}
impl RefreshMetrics {
	/// Refresh requests sent so far.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Refreshes that stored a new token.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Refreshes that ended in a forced logout.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Forced logouts whose store clear failed, leaving persisted entries behind.
	pub fn store_failures(&self) -> u64 {
		self.store_failures.load(Ordering::Relaxed)
	}

	/// Time of the latest successful rotation.
	pub fn last_rotation(&self) -> Option<OffsetDateTime> {
		match self.last_rotation.load(Ordering::Relaxed) {
			0 => None,
			secs => OffsetDateTime::from_unix_timestamp(secs).ok(),
		}
	}

	/// Copies every counter at once.
	pub fn snapshot(&self) -> RefreshStats {
		RefreshStats {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
			store_failures: self.store_failures(),
			last_rotation: self.last_rotation(),
		}
	}

	pub(crate) fn record(&self, outcome: CallOutcome) {
		let counter = match outcome {
			CallOutcome::Attempt => &self.attempts,
			CallOutcome::Success => {
				self.last_rotation
					.store(OffsetDateTime::now_utc().unix_timestamp(), Ordering::Relaxed);

				&self.successes
			},
			CallOutcome::Failure => &self.failures,
		};

		counter.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_store_failure(&self) {
		self.store_failures.fetch_add(1, Ordering::Relaxed);
	}
}
