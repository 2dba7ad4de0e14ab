//! Redacted token wrappers and JWT expiry decoding.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Expiry claim decoded from an access token payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenExpiry {
	/// The payload carries a numeric `exp` claim (seconds since the epoch).
	At(f64),
	/// The payload decoded but carries no `exp` claim.
	Never,
	/// The payload could not be decoded; the token is treated as expired.
	Undecodable,
}

/// Bearer credential attached to authenticated requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(TokenSecret);
impl AccessToken {
	/// Wraps a raw access token.
	pub fn new(value: impl Into<String>) -> Self {
		Self(TokenSecret::new(value))
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}

	/// Returns the token as a redacted secret.
	pub fn secret(&self) -> &TokenSecret {
		&self.0
	}

	/// Value for the `Authorization` header.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.expose())
	}

	/// Decodes the `exp` claim from the token's second dot-separated segment.
	pub fn expiry(&self) -> TokenExpiry {
		let Some(segment) = self.expose().split('.').nth(1) else {
			return TokenExpiry::Undecodable;
		};
		// Accept the standard alphabet and stray padding as well as base64url.
		let normalized = segment
			.trim_end_matches('=')
			.chars()
			.map(|c| match c {
				'+' => '-',
				'/' => '_',
				c => c,
			})
			.collect::<String>();
		let Ok(bytes) = URL_SAFE_NO_PAD.decode(normalized) else {
			return TokenExpiry::Undecodable;
		};
		let claims = match serde_json::from_slice::<Value>(&bytes) {
			Ok(Value::Object(claims)) => claims,
			Err(_) | Ok(Value::Null) => return TokenExpiry::Undecodable,
			// Scalars and arrays carry no claims at all.
			Ok(_) => return TokenExpiry::Never,
		};

		match claims.get("exp") {
			None => TokenExpiry::Never,
			// A null deadline reads as the epoch.
			Some(Value::Null) => TokenExpiry::At(0.),
			Some(Value::Number(exp)) =>
				exp.as_f64().map_or(TokenExpiry::Undecodable, TokenExpiry::At),
			Some(Value::String(exp)) =>
				exp.trim().parse().map_or(TokenExpiry::Undecodable, TokenExpiry::At),
			Some(_) => TokenExpiry::Undecodable,
		}
	}

	/// Expiry instant, when the payload carries a usable `exp` claim.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		match self.expiry() {
			TokenExpiry::At(exp) => OffsetDateTime::from_unix_timestamp(exp.trunc() as i64).ok(),
			_ => None,
		}
	}

	/// Returns `true` when the token must not be attached at `now`.
	///
	/// Tokens whose payload cannot be decoded count as expired; tokens without an `exp`
	/// claim never expire.
	pub fn is_expired_at(&self, now: OffsetDateTime, leeway: Duration) -> bool {
		match self.expiry() {
			TokenExpiry::At(exp) => {
				let now_ms = ((now + leeway).unix_timestamp_nanos() / 1_000_000) as f64;

				exp * 1000. < now_ms
			},
			TokenExpiry::Never => false,
			TokenExpiry::Undecodable => true,
		}
	}

	/// Convenience helper that checks expiry against the current UTC clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc(), Duration::ZERO)
	}
}
impl From<TokenSecret> for AccessToken {
	fn from(secret: TokenSecret) -> Self {
		Self(secret)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("token", &"<redacted>")
			.field("expiry", &self.expiry())
			.finish()
	}
}

/// Access + refresh credentials issued by login or refresh.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
	/// Short-lived bearer credential.
	pub access_token: AccessToken,
	/// Longer-lived credential exchanged for new access tokens.
	pub refresh_token: TokenSecret,
}
impl TokenPair {
	/// Builds a pair from raw strings.
	pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self {
			access_token: AccessToken::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
		}
	}
}
impl Debug for TokenPair {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenPair")
			.field("access_token", &self.access_token)
			.field("refresh_token", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::engine::general_purpose::STANDARD;
	use time::macros;
	// self
	use super::*;
	use crate::_preludet::jwt_with_exp;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");
		let token = AccessToken::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert!(!format!("{token:?}").contains("super-secret"));
	}

	#[test]
	fn expiry_follows_exp_claim() {
		let expires = macros::datetime!(2025-01-01 01:00 UTC);
		let token = AccessToken::new(jwt_with_exp(expires.unix_timestamp()));

		assert_eq!(token.expires_at(), Some(expires));
		assert!(!token.is_expired_at(macros::datetime!(2025-01-01 00:59 UTC), Duration::ZERO));
		assert!(!token.is_expired_at(expires, Duration::ZERO));
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 01:00:01 UTC), Duration::ZERO));
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 00:59 UTC), Duration::minutes(2)));
	}

	#[test]
	fn undecodable_tokens_count_as_expired() {
		let now = OffsetDateTime::now_utc();

		for raw in ["opaque-token", "a.%%%.c", "a.bm90LWpzb24.c"] {
			let token = AccessToken::new(raw);

			assert_eq!(token.expiry(), TokenExpiry::Undecodable, "{raw} should not decode.");
			assert!(token.is_expired_at(now, Duration::ZERO));
		}
	}

	#[test]
	fn missing_exp_never_expires() {
		let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"42"}"#);
		let token = AccessToken::new(format!("h.{payload}.s"));

		assert_eq!(token.expiry(), TokenExpiry::Never);
		assert!(!token.is_expired());
	}

	#[test]
	fn null_exp_is_already_past() {
		let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"42","exp":null}"#);
		let token = AccessToken::new(format!("h.{payload}.s"));

		assert_eq!(token.expiry(), TokenExpiry::At(0.));
		assert!(token.is_expired());
	}

	#[test]
	fn payloads_without_claims_never_expire() {
		for payload in ["5", r#""plain""#, "[1,2]"] {
			let token = AccessToken::new(format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload)));

			assert_eq!(token.expiry(), TokenExpiry::Never, "{payload} carries no exp claim.");
			assert!(!token.is_expired());
		}

		let token = AccessToken::new(format!("h.{}.s", URL_SAFE_NO_PAD.encode("null")));

		assert_eq!(token.expiry(), TokenExpiry::Undecodable);
	}

	#[test]
	fn standard_alphabet_with_padding_is_accepted() {
		let payload = STANDARD.encode(br#"{"exp":4102444800,"name":"a?b>"}"#);
		let token = AccessToken::new(format!("h.{payload}.s"));

		assert_eq!(token.expiry(), TokenExpiry::At(4_102_444_800.));
	}
}
