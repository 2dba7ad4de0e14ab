//! Product catalogue.

// self
use crate::{
	_prelude::*,
	api::{Amount, ApiResponse, ListPage, SortOrder, VersionPayload},
	gateway::{Gateway, NO_BODY},
};

/// Product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
	/// Product id.
	pub id: u64,
	/// Stock-keeping unit.
	pub sku: String,
	/// Name.
	pub name: String,
	/// Category.
	#[serde(default)]
	pub category: Option<String>,
	/// HSN tax classification code.
	pub hsn_code: u32,
	/// Unit price.
	pub price: Amount,
	/// Quantity below which the product counts as low stock.
	pub min_stock_threshold: u32,
	/// Default supplier.
	#[serde(default)]
	pub supplier_id: Option<u64>,
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

/// Filters accepted by `/products`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductFilters {
	/// Free-text search.
	pub search: Option<String>,
	/// Category filter.
	pub category: Option<String>,
	/// Lower price bound.
	pub min_price: Option<f64>,
	/// Upper price bound.
	pub max_price: Option<f64>,
	/// Include or restrict to soft-deleted rows.
	pub is_deleted: Option<bool>,
	/// Sort column.
	pub sort_by: Option<String>,
	/// Sort direction.
	pub order: Option<SortOrder>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
}

/// Body for `POST /products`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductCreate {
	/// Stock-keeping unit.
	pub sku: String,
	/// Name.
	pub name: String,
	/// Category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// Unit price.
	pub price: f64,
	/// Low-stock threshold.
	pub min_stock_threshold: u32,
	/// Default supplier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub supplier_id: Option<u64>,
}

/// Body for `PATCH /products/{id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductUpdate {
	/// New name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// New unit price.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	/// New low-stock threshold.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_stock_threshold: Option<u32>,
	/// New default supplier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub supplier_id: Option<u64>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// Product endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ProductsApi<'a> {
	gateway: &'a Gateway,
}
impl ProductsApi<'_> {
	/// Lists products.
	pub async fn list(&self, filters: &ProductFilters) -> Result<ApiResponse<ListPage<Product>>> {
		self.gateway.get("/products", filters).await
	}

	/// Fetches one product.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<Product>> {
		self.gateway.get(&format!("/products/{id}"), &()).await
	}

	/// Creates a product.
	pub async fn create(&self, payload: &ProductCreate) -> Result<ApiResponse<Product>> {
		self.gateway.post("/products", Some(payload)).await
	}

	/// Updates a product.
	pub async fn update(&self, id: u64, payload: &ProductUpdate) -> Result<ApiResponse<Product>> {
		self.gateway.patch(&format!("/products/{id}"), Some(payload)).await
	}

	/// Deactivates a product.
	pub async fn deactivate(&self, id: u64, version: u32) -> Result<ApiResponse<Product>> {
		self.gateway
			.patch(&format!("/products/{id}/deactivate"), Some(&VersionPayload { version }))
			.await
	}

	/// Reactivates a product.
	pub async fn activate(&self, id: u64) -> Result<ApiResponse<Product>> {
		self.gateway.patch(&format!("/products/{id}/activate"), NO_BODY).await
	}
}

impl Gateway {
	/// Product endpoints.
	pub fn products(&self) -> ProductsApi<'_> {
		ProductsApi { gateway: self }
	}
}
