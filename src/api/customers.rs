//! Billing customers.

// self
use crate::{
	_prelude::*,
	api::{ApiResponse, ListPage},
	gateway::{Gateway, NO_BODY},
};

/// Postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
	/// Street line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub street: Option<String>,
	/// City.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	/// State.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Postal code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub zip_code: Option<String>,
	/// Country.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
}

/// Customer record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
	/// Customer id.
	pub id: u64,
	/// Generated customer code.
	pub customer_code: String,
	/// Name.
	pub name: String,
	/// Email.
	pub email: String,
	/// Phone.
	#[serde(default)]
	pub phone: Option<String>,
	/// GST identification number.
	#[serde(default)]
	pub gstin: Option<String>,
	/// Address.
	#[serde(default)]
	pub address: Option<CustomerAddress>,
	/// Whether the customer can be billed.
	pub is_active: bool,
	/// Soft-delete flag.
	pub is_deleted: bool,
	/// Row version.
	pub version: u32,
	/// Creator id.
	#[serde(default)]
	pub created_by_id: Option<u64>,
	/// Creator name.
	#[serde(default)]
	pub created_by_name: Option<String>,
	/// Last editor id.
	#[serde(default)]
	pub updated_by_id: Option<u64>,
	/// Last editor name.
	#[serde(default)]
	pub updated_by_name: Option<String>,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Filters accepted by `/billing/customers`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CustomerFilters {
	/// Name search.
	pub name: Option<String>,
	/// GSTIN search.
	pub gstin: Option<String>,
	/// Email search.
	pub email: Option<String>,
	/// Phone search.
	pub phone: Option<String>,
	/// Active flag filter.
	pub is_active: Option<bool>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
}

/// Body for `POST /billing/customers`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CustomerCreate {
	/// Name.
	pub name: String,
	/// Email.
	pub email: String,
	/// Phone.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// GST identification number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gstin: Option<String>,
	/// Address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<CustomerAddress>,
}

/// Body for `PATCH /billing/customers/{id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CustomerUpdate {
	/// New name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New phone.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// New address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<CustomerAddress>,
	/// New active flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// Customer endpoints.
#[derive(Clone, Copy, Debug)]
pub struct CustomersApi<'a> {
	gateway: &'a Gateway,
}
impl CustomersApi<'_> {
	/// Lists customers.
	pub async fn list(&self, filters: &CustomerFilters) -> Result<ApiResponse<ListPage<Customer>>> {
		self.gateway.get("/billing/customers", filters).await
	}

	/// Fetches one customer.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<Customer>> {
		self.gateway.get(&format!("/billing/customers/{id}"), &()).await
	}

	/// Creates a customer.
	pub async fn create(&self, payload: &CustomerCreate) -> Result<ApiResponse<Customer>> {
		self.gateway.post("/billing/customers", Some(payload)).await
	}

	/// Updates a customer.
	pub async fn update(&self, id: u64, payload: &CustomerUpdate) -> Result<ApiResponse<Customer>> {
		self.gateway.patch(&format!("/billing/customers/{id}"), Some(payload)).await
	}

	/// Deactivates a customer.
	pub async fn deactivate(&self, id: u64) -> Result<ApiResponse<Customer>> {
		self.gateway.delete(&format!("/billing/customers/{id}"), NO_BODY).await
	}
}

impl Gateway {
	/// Customer endpoints.
	pub fn customers(&self) -> CustomersApi<'_> {
		CustomersApi { gateway: self }
	}
}
