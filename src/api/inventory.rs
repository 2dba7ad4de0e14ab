//! Stock balances per product and location.

// self
use crate::{
	_prelude::*,
	api::{ApiResponse, ListPage},
	gateway::Gateway,
};

/// Quantity of one product at one location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBalance {
	/// Product id.
	pub product_id: u64,
	/// Product name.
	pub product_name: String,
	/// Stock-keeping unit.
	pub sku: String,
	/// Location id.
	pub location_id: u64,
	/// Location code.
	pub location_code: String,
	/// Quantity on hand.
	pub quantity: i64,
	/// Low-stock threshold.
	pub min_stock_threshold: u32,
	/// Last movement timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Filters accepted by `/inventory/balances/`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BalanceFilters {
	/// Product filter.
	pub product_id: Option<u64>,
	/// Location filter.
	pub location_id: Option<u64>,
	/// Free-text search.
	pub search: Option<String>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
}

/// Inventory endpoints.
#[derive(Clone, Copy, Debug)]
pub struct InventoryApi<'a> {
	gateway: &'a Gateway,
}
impl InventoryApi<'_> {
	/// Lists balances.
	pub async fn balances(
		&self,
		filters: &BalanceFilters,
	) -> Result<ApiResponse<ListPage<InventoryBalance>>> {
		self.gateway.get("/inventory/balances/", filters).await
	}

	/// Lists balances at or below their threshold.
	pub async fn low_stock(&self) -> Result<ApiResponse<Vec<InventoryBalance>>> {
		self.gateway.get("/inventory/balances/low-stock", &()).await
	}
}

impl Gateway {
	/// Inventory endpoints.
	pub fn inventory(&self) -> InventoryApi<'_> {
		InventoryApi { gateway: self }
	}
}
