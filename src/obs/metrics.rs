// self
use crate::{
	obs::{CallKind, CallOutcome},
	session::LogoutReason,
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"erp_client_call_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a forced logout via the global metrics recorder (when enabled).
pub fn record_forced_logout(reason: LogoutReason) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("erp_client_forced_logout_total", "reason" => reason.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = reason;
	}
}

/// Records a forced logout whose store clear failed (when enabled).
pub fn record_store_clear_failure() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("erp_client_store_clear_failure_total").increment(1);
	}
}
