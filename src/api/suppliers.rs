//! Suppliers.

// self
use crate::{
	_prelude::*,
	api::{ApiResponse, ListPage, SortOrder, VersionPayload},
	gateway::Gateway,
};

/// Supplier record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
	/// Supplier id.
	pub id: u64,
	/// Generated supplier code.
	pub supplier_code: String,
	/// Name.
	pub name: String,
	/// Contact person.
	#[serde(default)]
	pub contact_person: Option<String>,
	/// Phone.
	#[serde(default)]
	pub phone: Option<String>,
	/// Email.
	#[serde(default)]
	pub email: Option<String>,
	/// Soft-delete flag.
	pub is_deleted: bool,
	/// Row version.
	pub version: u32,
	/// Creator id.
	#[serde(default)]
	pub created_by: Option<u64>,
	/// Last editor id.
	#[serde(default)]
	pub updated_by: Option<u64>,
	/// Creator name.
	#[serde(default)]
	pub created_by_name: Option<String>,
	/// Last editor name.
	#[serde(default)]
	pub updated_by_name: Option<String>,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Filters accepted by `/suppliers`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SupplierFilters {
	/// Free-text search.
	pub search: Option<String>,
	/// Include or restrict to soft-deleted rows.
	pub is_deleted: Option<bool>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
	/// Sort column.
	pub sort_by: Option<String>,
	/// Sort direction.
	pub sort_order: Option<SortOrder>,
}

/// Body for `POST /suppliers`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SupplierCreate {
	/// Name.
	pub name: String,
	/// Contact person.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contact_person: Option<String>,
	/// Phone.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// Body for `PATCH /suppliers/{id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SupplierUpdate {
	/// New name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New contact person.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contact_person: Option<String>,
	/// New phone.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// New email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New soft-delete flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_deleted: Option<bool>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// Supplier endpoints.
#[derive(Clone, Copy, Debug)]
pub struct SuppliersApi<'a> {
	gateway: &'a Gateway,
}
impl SuppliersApi<'_> {
	/// Lists suppliers.
	pub async fn list(&self, filters: &SupplierFilters) -> Result<ApiResponse<ListPage<Supplier>>> {
		self.gateway.get("/suppliers", filters).await
	}

	/// Fetches one supplier.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<Supplier>> {
		self.gateway.get(&format!("/suppliers/{id}"), &()).await
	}

	/// Creates a supplier.
	pub async fn create(&self, payload: &SupplierCreate) -> Result<ApiResponse<Supplier>> {
		self.gateway.post("/suppliers", Some(payload)).await
	}

	/// Updates a supplier.
	pub async fn update(&self, id: u64, payload: &SupplierUpdate) -> Result<ApiResponse<Supplier>> {
		self.gateway.patch(&format!("/suppliers/{id}"), Some(payload)).await
	}

	/// Deactivates a supplier.
	pub async fn deactivate(&self, id: u64, version: u32) -> Result<ApiResponse<Supplier>> {
		self.gateway
			.patch(&format!("/suppliers/{id}/deactivate"), Some(&VersionPayload { version }))
			.await
	}
}

impl Gateway {
	/// Supplier endpoints.
	pub fn suppliers(&self) -> SuppliersApi<'_> {
		SuppliersApi { gateway: self }
	}
}
