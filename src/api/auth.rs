//! Login and logout.

// self
use crate::{
	_prelude::*,
	api::ApiResponse,
	gateway::{Call, Gateway},
	session::{AccessToken, TokenPair, TokenSecret},
};

/// Credentials posted to `/auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginPayload<'a> {
	/// Account email.
	pub email: &'a str,
	/// Account password.
	pub password: &'a str,
}
impl Debug for LoginPayload<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginPayload")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Token block of a login response.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthTokens {
	/// Bearer credential.
	pub access_token: AccessToken,
	/// Refresh credential.
	pub refresh_token: TokenSecret,
	/// Token type reported by the backend, usually `bearer`.
	#[serde(default)]
	pub token_type: String,
}

/// User block of a login response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
	/// User id.
	pub id: u64,
	/// Display name.
	pub username: String,
	/// Role name.
	pub role: String,
}

/// `data` payload of a login response.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginData {
	/// Issued tokens.
	pub auth: AuthTokens,
	/// Authenticated user.
	pub user: AuthUser,
}

/// Signed-in user together with the issued credentials.
#[derive(Clone, Debug)]
pub struct AuthSession {
	/// User id.
	pub id: u64,
	/// Display name.
	pub username: String,
	/// Role name.
	pub role: String,
	/// Token type reported by the backend.
	pub token_type: String,
	/// Bearer credential now held by the gateway.
	pub access_token: AccessToken,
	/// Refresh credential now held by the store.
	pub refresh_token: TokenSecret,
}
impl From<LoginData> for AuthSession {
	fn from(data: LoginData) -> Self {
		Self {
			id: data.user.id,
			username: data.user.username,
			role: data.user.role,
			token_type: data.auth.token_type,
			access_token: data.auth.access_token,
			refresh_token: data.auth.refresh_token,
		}
	}
}

/// Authentication endpoints.
#[derive(Clone, Copy, Debug)]
pub struct AuthApi<'a> {
	gateway: &'a Gateway,
}
impl AuthApi<'_> {
	/// Exchanges credentials for a token pair and installs it as the current session.
	///
	/// The call is sent without a bearer token, so bad credentials surface as an API error
	/// instead of a forced logout.
	pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
		let call = Call::post("/auth/login").json(&LoginPayload { email, password })?.anonymous();
		let response: ApiResponse<LoginData> = self.gateway.send(call).await?;
		let session = AuthSession::from(response.data);

		self.gateway
			.establish_session(TokenPair {
				access_token: session.access_token.clone(),
				refresh_token: session.refresh_token.clone(),
			})
			.await?;

		Ok(session)
	}

	/// Tells the backend to end the session, then clears it locally whatever the outcome.
	pub async fn logout(&self) -> Result<()> {
		let remote = self.gateway.send::<Value>(Call::post("/auth/logout")).await;

		self.gateway.end_session().await?;

		remote.map(|_| ())
	}
}

impl Gateway {
	/// Authentication endpoints.
	pub fn auth(&self) -> AuthApi<'_> {
		AuthApi { gateway: self }
	}
}
