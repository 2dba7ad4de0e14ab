#![cfg(feature = "reqwest")]

mod common;

// std
use std::{
	io::{Read, Write},
	net::TcpListener,
	sync::Arc,
	thread,
};
// crates.io
use httpmock::prelude::*;
use serde::Serialize;
use serde_json::{Value, json};
// self
use common::*;
use erp_client::{
	config::GatewayConfig,
	error::{ErrorAction, ErrorCode, NETWORK_ERROR_MESSAGE, REQUEST_FAILED_MESSAGE, Severity},
	gateway::{Call, Gateway, NO_BODY},
	store::MemoryStore,
};

#[derive(Serialize)]
struct Filters<'a> {
	search: Option<&'a str>,
	category: Option<&'a str>,
	is_deleted: bool,
	page: u32,
}

#[tokio::test]
async fn queries_drop_absent_values_and_attach_the_bearer() {
	let server = MockServer::start_async().await;
	let token = fresh_jwt("query");
	let store = seeded_store(Some(&token), Some("refresh"));
	let (gateway, _) = gateway(&server, &store).await;
	let products = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/products")
				.query_param("search", "oak table")
				.query_param("is_deleted", "false")
				.query_param("page", "1")
				.header("authorization", format!("Bearer {token}"))
				.header("content-type", "application/json");
			then.status(200).json_body(json!({ "data": { "total": 1, "items": [] } }));
		})
		.await;
	let filters = Filters { search: Some("oak table"), category: None, is_deleted: false, page: 1 };
	let body: Value = gateway.get("/products", &filters).await.expect("Listing should succeed.");

	products.assert_async().await;

	assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn backend_errors_keep_their_code_and_details() {
	let server = MockServer::start_async().await;
	let store = seeded_store(Some(&fresh_jwt("errors")), Some("refresh"));
	let (gateway, _) = gateway(&server, &store).await;

	server
		.mock_async(|when, then| {
			when.method(PATCH).path("/billing/customers/7");
			then.status(409).json_body(json!({
				"message": "Customer was modified by someone else",
				"error_code": "CUSTOMER_VERSION_CONFLICT",
				"details": { "current_version": 4 }
			}));
		})
		.await;

	let err = gateway
		.patch::<Value, _>(
			"/billing/customers/7",
			Some(&json!({ "name": "Teak House", "version": 3 })),
		)
		.await
		.expect_err("A version conflict should be rejected.");
	let app = err.to_app_error();

	assert_eq!(err.status(), Some(409));
	assert_eq!(app.message, "Customer was modified by someone else");
	assert_eq!(app.error_code, ErrorCode::CustomerVersionConflict);
	assert_eq!(app.details, Some(json!({ "current_version": 4 })));
	assert_eq!(app.error_code.action(), ErrorAction::Toast(Severity::Warning));
}

#[tokio::test]
async fn unreadable_error_bodies_fall_back_to_generic_values() {
	let server = MockServer::start_async().await;
	let store = seeded_store(Some(&fresh_jwt("generic")), Some("refresh"));
	let (gateway, _) = gateway(&server, &store).await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/grns/3/verify");
			then.status(502).body("Bad Gateway");
		})
		.await;

	let err = gateway
		.post::<Value, _>("/grns/3/verify", NO_BODY)
		.await
		.expect_err("A 502 should be rejected.");
	let app = err.to_app_error();

	assert_eq!(app.message, REQUEST_FAILED_MESSAGE);
	assert_eq!(app.error_code, ErrorCode::UnknownError);
	assert!(app.details.is_none());
}

#[tokio::test]
async fn validation_errors_use_the_first_message() {
	let server = MockServer::start_async().await;
	let store = seeded_store(Some(&fresh_jwt("validation")), Some("refresh"));
	let (gateway, _) = gateway(&server, &store).await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/suppliers");
			then.status(422).json_body(json!({
				"detail": [
					{ "loc": ["body", "email"], "msg": "value is not a valid email address" }
				]
			}));
		})
		.await;

	let err = gateway
		.post::<Value, _>("/suppliers", Some(&json!({ "name": "Acme", "email": "nope" })))
		.await
		.expect_err("Invalid payloads should be rejected.");

	assert_eq!(err.error_code(), ErrorCode::ValidationError);
	assert_eq!(err.message(), "value is not a valid email address");
}

#[tokio::test]
async fn empty_success_bodies_decode_as_unit() {
	let server = MockServer::start_async().await;
	let store = seeded_store(Some(&fresh_jwt("empty")), Some("refresh"));
	let (gateway, _) = gateway(&server, &store).await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/grns/11");
			then.status(204);
		})
		.await;

	gateway.delete::<(), _>("/grns/11", NO_BODY).await.expect("An empty 204 should decode.");
	delete.assert_async().await;
}

/// Accepts one HTTP/1.1 connection, answers `200 {}`, and returns the raw request head.
fn capture_one_request() -> (String, thread::JoinHandle<String>) {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Loopback listener should bind.");
	let addr = listener.local_addr().expect("Listener should report its address.");
	let handle = thread::spawn(move || {
		let (mut stream, _) = listener.accept().expect("The gateway should connect.");
		let mut head = Vec::new();
		let mut chunk = [0; 1024];

		while !head.windows(4).any(|w| w == b"\r\n\r\n") {
			let read = stream.read(&mut chunk).expect("Reading the request should succeed.");

			if read == 0 {
				break;
			}

			head.extend_from_slice(&chunk[..read]);
		}

		stream
			.write_all(
				b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\n\
				connection: close\r\n\r\n{}",
			)
			.expect("Writing the response should succeed.");

		String::from_utf8_lossy(&head).into_owned()
	});

	(format!("http://{addr}"), handle)
}

#[tokio::test]
async fn caller_headers_replace_defaults_on_the_wire() {
	let (base_url, server) = capture_one_request();
	let config = GatewayConfig::builder(base_url)
		.build()
		.expect("Loopback URL should form a valid config.");
	let gateway = Gateway::new(config, Arc::new(seeded_store(Some(&fresh_jwt("wire")), None)))
		.expect("Gateway should build against the loopback listener.");

	gateway.restore_session().await.expect("Restoring the seeded session should succeed.");

	let _: Value = gateway
		.send(
			Call::get("/inventory/balances/low-stock")
				.header("Content-Type", "text/plain")
				.header("X-Request-Id", "abc-123"),
		)
		.await
		.expect("The call should succeed.");
	let head = server.join().expect("The capture thread should finish.");
	let values = |name: &str| {
		head.lines()
			.filter_map(|line| line.split_once(':'))
			.filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
			.map(|(_, value)| value.trim().to_owned())
			.collect::<Vec<_>>()
	};

	assert_eq!(values("content-type"), ["text/plain"]);
	assert_eq!(values("x-request-id"), ["abc-123"]);
	assert_eq!(values("authorization").len(), 1);
}

#[tokio::test]
async fn unreachable_backends_report_network_errors() {
	let config = GatewayConfig::builder("http://127.0.0.1:9")
		.build()
		.expect("Loopback URL should form a valid config.");
	let gateway = Gateway::new(config, Arc::new(MemoryStore::default()))
		.expect("Gateway should build without a live backend.");
	let err = gateway
		.get::<Value, _>("/users", &())
		.await
		.expect_err("Nothing listens on the discard port.");
	let app = err.to_app_error();

	assert_eq!(app.error_code, ErrorCode::NetworkError);
	assert_eq!(app.message, NETWORK_ERROR_MESSAGE);
	assert_eq!(err.status(), None);
}

#[tokio::test]
async fn anonymous_unauthorized_calls_skip_refresh() {
	let server = MockServer::start_async().await;
	let store = seeded_store(Some(&fresh_jwt("anon")), Some("refresh"));
	let (gateway, log) = gateway(&server, &store).await;
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login");
			then.status(401).json_body(json!({
				"message": "Invalid credentials",
				"error_code": "AUTH_INVALID"
			}));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200).json_body(json!({ "access_token": fresh_jwt("never") }));
		})
		.await;
	let call = Call::post("/auth/login")
		.json(&json!({ "email": "a@b.c", "password": "wrong" }))
		.expect("Login body should encode.")
		.anonymous();
	let err = gateway.send::<Value>(call).await.expect_err("Bad credentials should be rejected.");

	login.assert_async().await;
	refresh.assert_calls_async(0).await;

	assert_eq!(err.error_code(), ErrorCode::AuthInvalid);
	assert!(log.events().is_empty());
	assert!(gateway.access_token().is_some());
}
