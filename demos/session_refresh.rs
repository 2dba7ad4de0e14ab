//! Demonstrates signing in, surviving an access-token rejection through a single refresh, and
//! handling the forced logout once the refresh token is revoked.

// std
use std::sync::Arc;
// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use erp_client::{
	api::{customers::CustomerFilters, users::UserFilters},
	config::GatewayConfig,
	gateway::Gateway,
	session::{LogoutEvent, LogoutHook},
	store::MemoryStore,
};

struct PrintLogout;
impl LogoutHook for PrintLogout {
	fn on_logout(&self, event: &LogoutEvent) {
		println!("Session ended ({}); redirecting to {}.", event.reason, event.redirect_to);
	}
}

fn jwt(label: &str) -> String {
	let exp = (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp();
	let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{label}","exp":{exp}}}"#));

	format!("{header}.{payload}.signature")
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let first = jwt("first");
	let second = jwt("second");
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login");
			then.status(200).json_body(json!({
				"success": true,
				"message": "Login successful",
				"data": {
					"auth": {
						"access_token": first,
						"refresh_token": "refresh-1",
						"token_type": "bearer"
					},
					"user": { "id": 1, "username": "admin", "role": "admin" }
				}
			}));
		})
		.await;
	let mut rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/users").header("authorization", format!("Bearer {first}"));
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let mut refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/refresh")
				.json_body(json!({ "refresh_token": "refresh-1" }));
			then.status(200).json_body(json!({ "access_token": second }));
		})
		.await;
	let users = server
		.mock_async(|when, then| {
			when.method(GET).path("/users").header("authorization", format!("Bearer {second}"));
			then.status(200).json_body(json!({
				"success": true,
				"message": "Users fetched",
				"data": { "total": 0, "items": [] }
			}));
		})
		.await;
	let config = GatewayConfig::builder(server.base_url()).entry_point("/login").build()?;
	let gateway =
		Gateway::new(config, Arc::new(MemoryStore::default()))?.with_logout_hook(PrintLogout);
	let session = gateway.auth().login("admin@erp.local", "s3cret").await?;

	println!("Signed in as {} ({}).", session.username, session.role);

	let page = gateway.users().list(&UserFilters::default()).await?;

	println!(
		"Listed {} users after {} refresh.",
		page.data.total,
		gateway.refresh_metrics.successes()
	);

	login.assert_async().await;
	rejected.assert_async().await;
	refresh.assert_async().await;
	users.assert_async().await;
	refresh.delete_async().await;
	rejected.delete_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(401).json_body(json!({ "message": "Refresh token revoked" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/billing/customers");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;

	if let Err(e) = gateway.customers().list(&CustomerFilters::default()).await {
		let app = e.to_app_error();

		println!("Customers call failed with {}: {}.", app.error_code, app.message);
	}

	Ok(())
}
