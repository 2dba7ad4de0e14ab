//! Typed wrappers over the ERP resource endpoints.
//!
//! Each resource is reached through a short-lived handle borrowed from the gateway, e.g.
//! `gateway.users().list(&filters)`. Handles add no state of their own; every call goes through
//! [`Gateway::send`](crate::gateway::Gateway::send) and inherits its refresh and retry behavior.

pub mod activity;
pub mod auth;
pub mod customers;
pub mod discounts;
pub mod grns;
pub mod inventory;
pub mod products;
pub mod quotations;
pub mod stock_transfers;
pub mod suppliers;
pub mod users;

// self
use crate::_prelude::*;

/// Standard `{ success, message, data }` envelope returned by most endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
	/// Backend success flag; absent flags read as `false`.
	#[serde(default)]
	pub success: bool,
	/// Human-readable status message, empty when absent.
	#[serde(default)]
	pub message: String,
	/// Payload.
	pub data: T,
}
impl<T> ApiResponse<T> {
	/// Drops the envelope and returns the payload.
	pub fn into_data(self) -> T {
		self.data
	}
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
	/// Total number of matching rows across all pages.
	pub total: u64,
	/// Rows on this page.
	pub items: Vec<T>,
	/// Page number echoed by endpoints that report it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	/// Page size echoed by endpoints that report it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page_size: Option<u32>,
}

/// Sort direction accepted by listing endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	/// Ascending.
	Asc,
	/// Descending.
	Desc,
}

/// `{ version }` body used by optimistic-concurrency state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPayload {
	/// Row version the caller last observed.
	pub version: u32,
}

/// Decimal amount the backend sends either as a JSON number or as a string.
///
/// The original text is kept so no precision is lost; it serializes back as a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub struct Amount(String);
impl Amount {
	/// Wraps a decimal string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the decimal text.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Parses the amount as a float, if it is numeric.
	pub fn to_f64(&self) -> Option<f64> {
		self.0.trim().parse().ok()
	}
}
impl TryFrom<Value> for Amount {
	type Error = String;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Number(n) => Ok(Self(n.to_string())),
			Value::String(s) => Ok(Self(s)),
			other => Err(format!("expected a number or decimal string, found {other}")),
		}
	}
}
impl From<Amount> for String {
	fn from(amount: Amount) -> Self {
		amount.0
	}
}
impl Display for Amount {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// `{ id, name }` reference embedded in list views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
	/// Referenced row id.
	pub id: u64,
	/// Display name.
	pub name: String,
}
