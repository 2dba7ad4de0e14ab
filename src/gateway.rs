//! Authenticated request gateway.
//!
//! Every backend call funnels through [`Gateway::send`], which attaches the current bearer
//! token, refreshes it ahead of time when its `exp` claim has passed, and retries a call exactly
//! once after a `401`. Refreshes are single-flight: however many calls need a new token at the
//! same moment, one refresh request goes out and every caller observes its result.

mod refresh;

pub use refresh::{RefreshMetrics, RefreshStats};

// self
use crate::{
	_prelude::*,
	config::GatewayConfig,
	error::{ApiError, ConfigError},
	http::{self, Method, OutboundRequest, Transport, TransportResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::{
		AccessToken, LogoutEvent, LogoutHook, LogoutReason, NoopLogoutHook, Session, TokenPair,
	},
	store::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Placeholder body for [`Gateway::post`], [`Gateway::patch`], and [`Gateway::delete`] calls
/// that send nothing.
pub const NO_BODY: Option<&Value> = None;

const UNAUTHORIZED: u16 = 401;

/// Which pass of a logical call is being sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
	/// Initial send; a `401` may trigger one refresh-and-retry.
	First,
	/// Re-issue after a refresh; never retried again.
	Retried,
}

/// One logical backend call.
#[derive(Clone, Debug)]
pub struct Call {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the configured base URL.
	pub path: String,
	/// Query pairs appended to the URL.
	pub query: Vec<(String, String)>,
	/// Encoded JSON body.
	pub body: Option<Vec<u8>>,
	/// Extra headers sent after the defaults, overriding them on name clashes.
	pub headers: Vec<(String, String)>,
	/// Skip token attachment and refresh-on-401.
	pub anonymous: bool,
}
impl Call {
	/// Creates a call with no query, body, or extra headers.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			body: None,
			headers: Vec::new(),
			anonymous: false,
		}
	}

	/// Shorthand for a `GET` call.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a `POST` call.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a `PATCH` call.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// Shorthand for a `DELETE` call.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends query parameters serialized from `params`; `None` fields are skipped.
	pub fn query<Q>(mut self, params: &Q) -> Result<Self, ConfigError>
	where
		Q: ?Sized + Serialize,
	{
		self.query.extend(http::encode_query(params)?);

		Ok(self)
	}

	/// Sets the JSON body.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body)?);

		Ok(self)
	}

	/// Adds a header sent after the defaults.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Marks the call as unauthenticated (login and other public endpoints).
	pub fn anonymous(mut self) -> Self {
		self.anonymous = true;

		self
	}
}

/// Refresh coordination shared by every clone of a gateway.
struct RefreshFlight {
	guard: AsyncMutex<()>,
	last_logout: Mutex<Option<LogoutReason>>,
}
impl RefreshFlight {
	fn new() -> Self {
		Self { guard: AsyncMutex::new(()), last_logout: Mutex::new(None) }
	}
}

/// Entry point for every backend call.
#[derive(Clone)]
pub struct Gateway {
	/// Shared configuration.
	pub config: Arc<GatewayConfig>,
	/// HTTP transport used for both regular calls and refreshes.
	pub transport: Arc<dyn Transport>,
	/// Token state and its backing store.
	pub session: Arc<Session>,
	/// Refresh counters.
	pub refresh_metrics: Arc<RefreshMetrics>,
	logout_hook: Arc<dyn LogoutHook>,
	flight: Arc<RefreshFlight>,
}
impl Gateway {
	/// Creates a gateway over a caller-supplied transport.
	pub fn with_transport(
		config: GatewayConfig,
		transport: Arc<dyn Transport>,
		store: Arc<dyn SessionStore>,
	) -> Self {
		Self {
			config: Arc::new(config),
			transport,
			session: Arc::new(Session::new(store)),
			refresh_metrics: Default::default(),
			logout_hook: Arc::new(NoopLogoutHook),
			flight: Arc::new(RefreshFlight::new()),
		}
	}

	/// Creates a gateway backed by a reqwest client built from `config`.
	#[cfg(feature = "reqwest")]
	pub fn new(config: GatewayConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::with_transport(config, Arc::new(transport), store))
	}

	/// Creates a reqwest-backed gateway and hydrates the session from `store`.
	#[cfg(feature = "reqwest")]
	pub async fn open(config: GatewayConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
		let gateway = Self::new(config, store)?;

		gateway.restore_session().await?;

		Ok(gateway)
	}

	/// Installs the hook notified on every session teardown.
	pub fn with_logout_hook(mut self, hook: impl 'static + LogoutHook) -> Self {
		self.logout_hook = Arc::new(hook);

		self
	}

	/// Reads the persisted access token back into memory.
	///
	/// Returns `true` when a token was found.
	pub async fn restore_session(&self) -> Result<bool> {
		let _flight = self.flight.guard.lock().await;

		self.session.restore().await
	}

	/// Installs the pair returned by a login.
	pub async fn establish_session(&self, tokens: TokenPair) -> Result<()> {
		let _flight = self.flight.guard.lock().await;

		*self.flight.last_logout.lock() = None;

		self.session.establish(tokens).await
	}

	/// Clears the session and notifies the logout hook with [`LogoutReason::UserInitiated`].
	pub async fn end_session(&self) -> Result<()> {
		let _flight = self.flight.guard.lock().await;
		let cleared = self.session.clear().await;

		self.notify_logout(LogoutReason::UserInitiated);

		cleared
	}

	/// Current in-memory access token.
	pub fn access_token(&self) -> Option<AccessToken> {
		self.session.access_token()
	}

	/// Issues a `GET` with query parameters serialized from `query`.
	pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T>
	where
		T: DeserializeOwned,
		Q: ?Sized + Serialize,
	{
		self.send(Call::get(path).query(query)?).await
	}

	/// Issues a `POST` with an optional JSON body.
	pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send(with_body(Call::post(path), body)?).await
	}

	/// Issues a `PATCH` with an optional JSON body.
	pub async fn patch<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send(with_body(Call::patch(path), body)?).await
	}

	/// Issues a `DELETE` with an optional JSON body.
	pub async fn delete<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send(with_body(Call::delete(path), body)?).await
	}

	/// Executes `call` and deserializes the success body into `T`.
	///
	/// Empty or non-JSON success bodies decode as JSON `null`.
	pub async fn send<T>(&self, call: Call) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, call.method, &call.path);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let response = self.execute(&call).await?;

				decode(&response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn execute(&self, call: &Call) -> Result<TransportResponse> {
		let url = http::build_url(&self.config, &call.path, &call.query)?;
		let (mut token, epoch) = if call.anonymous { (None, 0) } else { self.authorize().await? };
		let mut attempt = Attempt::First;

		loop {
			let request = OutboundRequest {
				method: call.method,
				url: url.clone(),
				headers: request_headers(call, token.as_ref()),
				body: call.body.clone(),
			};
			let response = self.transport.send(request).await?;

			if response.is_success() {
				return Ok(response);
			}
			if response.status == UNAUTHORIZED && !call.anonymous && attempt == Attempt::First {
				token = Some(self.refresh(epoch).await?);
				attempt = Attempt::Retried;

				obs::trace_retry(call.method, &call.path);

				continue;
			}

			return Err(ApiError::from_body(response.status, &response.json()).into());
		}
	}

	/// Snapshots the session and refreshes first when the token's expiry has passed.
	async fn authorize(&self) -> Result<(Option<AccessToken>, u64)> {
		let snapshot = self.session.snapshot();

		match snapshot.access_token {
			Some(token)
				if token.is_expired_at(OffsetDateTime::now_utc(), self.config.expiry_leeway) =>
			{
				let token = self.refresh(snapshot.epoch).await?;

				Ok((Some(token), self.session.epoch()))
			},
			token => Ok((token, snapshot.epoch)),
		}
	}

	fn notify_logout(&self, reason: LogoutReason) {
		*self.flight.last_logout.lock() = Some(reason);

		self.logout_hook
			.on_logout(&LogoutEvent { reason, redirect_to: self.config.entry_point.clone() });
	}
}
impl Debug for Gateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("config", &self.config)
			.field("session", &self.session)
			.field("refresh_metrics", &self.refresh_metrics)
			.finish_non_exhaustive()
	}
}

fn with_body<B>(call: Call, body: Option<&B>) -> Result<Call, ConfigError>
where
	B: ?Sized + Serialize,
{
	match body {
		Some(body) => call.json(body),
		None => Ok(call),
	}
}

fn request_headers(call: &Call, token: Option<&AccessToken>) -> Vec<(String, String)> {
	let mut headers = Vec::with_capacity(2 + call.headers.len());

	headers.push(("Content-Type".to_owned(), "application/json".to_owned()));

	if let Some(token) = token {
		headers.push(("Authorization".to_owned(), token.bearer()));
	}

	for (name, value) in &call.headers {
		headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
		headers.push((name.clone(), value.clone()));
	}

	headers
}

fn decode<T>(response: &TransportResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(response.json())
		.map_err(|source| Error::Decode { source, status: response.status })
}
