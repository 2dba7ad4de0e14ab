//! Discount codes.

// self
use crate::{
	_prelude::*,
	api::{Amount, ApiResponse, ListPage},
	gateway::{Gateway, NO_BODY},
};

/// How a discount value is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
	/// Percentage of the bill.
	Percentage,
	/// Fixed amount off.
	Flat,
}

/// Discount record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discount {
	/// Discount id.
	pub id: u64,
	/// Name.
	pub name: String,
	/// Redemption code.
	pub code: String,
	/// Application type.
	pub discount_type: DiscountType,
	/// Percentage or flat amount.
	pub discount_value: Amount,
	/// Whether the code can be redeemed.
	pub is_active: bool,
	/// Soft-delete flag.
	pub is_deleted: bool,
	/// First valid date.
	pub start_date: String,
	/// Last valid date.
	pub end_date: String,
	/// Maximum redemptions.
	#[serde(default)]
	pub usage_limit: Option<u32>,
	/// Redemptions so far.
	pub used_count: u32,
	/// Free-form note.
	#[serde(default)]
	pub note: Option<String>,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
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
	/// Row version.
	pub version: u32,
}

/// Filters accepted by `/discounts`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiscountFilters {
	/// Free-text search.
	pub search: Option<String>,
	/// Exact code.
	pub code: Option<String>,
	/// Name search.
	pub name: Option<String>,
	/// Type filter.
	pub discount_type: Option<DiscountType>,
	/// Active flag filter.
	pub is_active: Option<bool>,
	/// Include or restrict to soft-deleted rows.
	pub is_deleted: Option<bool>,
	/// Valid on or after.
	pub start_date: Option<String>,
	/// Valid on or before.
	pub end_date: Option<String>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
}

/// Body for `POST /discounts`.
#[derive(Clone, Debug, Serialize)]
pub struct DiscountCreate {
	/// Name.
	pub name: String,
	/// Redemption code.
	pub code: String,
	/// Application type.
	pub discount_type: DiscountType,
	/// Percentage or flat amount.
	pub discount_value: Amount,
	/// First valid date.
	pub start_date: String,
	/// Last valid date.
	pub end_date: String,
	/// Maximum redemptions.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub usage_limit: Option<u32>,
	/// Free-form note.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}

/// Body for `PATCH /discounts/{id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiscountUpdate {
	/// New name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discount_type: Option<DiscountType>,
	/// New value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discount_value: Option<Amount>,
	/// New first valid date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_date: Option<String>,
	/// New last valid date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub end_date: Option<String>,
	/// New redemption limit.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub usage_limit: Option<u32>,
	/// New note.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// New active flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// Discount endpoints.
#[derive(Clone, Copy, Debug)]
pub struct DiscountsApi<'a> {
	gateway: &'a Gateway,
}
impl DiscountsApi<'_> {
	/// Lists discounts.
	pub async fn list(&self, filters: &DiscountFilters) -> Result<ApiResponse<ListPage<Discount>>> {
		self.gateway.get("/discounts", filters).await
	}

	/// Fetches one discount.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<Discount>> {
		self.gateway.get(&format!("/discounts/{id}"), &()).await
	}

	/// Creates a discount.
	pub async fn create(&self, payload: &DiscountCreate) -> Result<ApiResponse<Discount>> {
		self.gateway.post("/discounts", Some(payload)).await
	}

	/// Updates a discount.
	pub async fn update(&self, id: u64, payload: &DiscountUpdate) -> Result<ApiResponse<Discount>> {
		self.gateway.patch(&format!("/discounts/{id}"), Some(payload)).await
	}

	/// Deactivates a discount.
	pub async fn deactivate(&self, id: u64) -> Result<ApiResponse<Discount>> {
		self.gateway.patch(&format!("/discounts/{id}/deactivate"), NO_BODY).await
	}

	/// Reactivates a discount.
	pub async fn reactivate(&self, id: u64) -> Result<ApiResponse<Discount>> {
		self.gateway.patch(&format!("/discounts/{id}/activate"), NO_BODY).await
	}
}

impl Gateway {
	/// Discount endpoints.
	pub fn discounts(&self) -> DiscountsApi<'_> {
		DiscountsApi { gateway: self }
	}
}
