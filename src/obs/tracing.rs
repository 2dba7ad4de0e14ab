// self
use crate::{_prelude::*, http::Method, obs::CallKind, session::LogoutReason};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by gateway calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the call kind, verb, and request path.
	pub fn new(kind: CallKind, method: Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"erp_client.call",
				kind = kind.as_str(),
				method = method.as_str(),
				path
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `warn` event describing a forced logout (when tracing is enabled).
pub fn trace_forced_logout(reason: LogoutReason, redirect_to: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(reason = reason.as_str(), redirect_to, "session cleared after {reason}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (reason, redirect_to);
	}
}

/// Emits a `warn` event when a forced logout could not wipe the persisted entries.
pub fn trace_store_clear_failure(reason: LogoutReason, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			reason = reason.as_str(),
			error = %error,
			"session store kept its entries after a forced logout"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (reason, error);
	}
}

/// Emits a `debug` event when a call is retried after a refresh (when tracing is enabled).
pub fn trace_retry(method: Method, path: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(method = method.as_str(), path, "retrying once with the refreshed token");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, path);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Request, Method::Get, "/users");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn event_helpers_run_without_a_subscriber() {
		trace_forced_logout(LogoutReason::RefreshFailed, "/");
		trace_retry(Method::Patch, "/products/1");
		trace_store_clear_failure(
			LogoutReason::RefreshFailed,
			&Error::Storage(crate::store::StoreError::Backend { message: "read-only".into() }),
		);
	}
}
