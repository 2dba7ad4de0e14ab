//! Goods receipt notes (GRNs).

// self
use crate::{
	_prelude::*,
	api::{Amount, ApiResponse, ListPage, NamedRef, SortOrder},
	gateway::{Gateway, NO_BODY},
};

/// GRN lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrnStatus {
	/// Editable.
	Draft,
	/// Stock posted.
	Verified,
	/// Voided.
	Cancelled,
}

/// Line item on create/update bodies and detail responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrnItem {
	/// Received product.
	pub product_id: u64,
	/// Received quantity.
	pub quantity: u32,
	/// Cost per unit.
	pub unit_cost: Amount,
}

/// Full GRN returned by detail, create, update, verify, and delete.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrnDetail {
	/// GRN id.
	pub id: u64,
	/// Supplier.
	#[serde(default)]
	pub supplier_id: Option<u64>,
	/// Receiving location.
	pub location_id: u64,
	/// Purchase order reference.
	#[serde(default)]
	pub purchase_order: Option<String>,
	/// Supplier bill number.
	#[serde(default)]
	pub bill_number: Option<String>,
	/// Notes.
	#[serde(default)]
	pub notes: Option<String>,
	/// Lifecycle state.
	pub status: GrnStatus,
	/// Row version.
	pub version: u32,
	/// Creation timestamp.
	pub created_at: String,
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
	/// Line items.
	pub items: Vec<GrnItem>,
}

/// Product reference on a list-view line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrnProductRef {
	/// Product id.
	pub id: u64,
	/// Product name.
	pub name: String,
	/// Stock-keeping unit.
	pub sku: String,
}

/// Line on a list-view GRN.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrnViewItem {
	/// Product.
	pub product: GrnProductRef,
	/// Quantity.
	pub quantity: u32,
	/// Cost per unit.
	pub unit_cost: Amount,
	/// Line total.
	pub total: Amount,
}

/// Totals on a list-view GRN.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrnSummary {
	/// Number of lines.
	pub no_of_items: u32,
	/// Sum of line totals.
	pub total_value: Amount,
}

/// Audit block on a list-view GRN.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrnAudit {
	/// Creation timestamp.
	pub created_at: String,
	/// Creator name.
	pub created_by: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
	/// Last editor name.
	#[serde(default)]
	pub updated_by: Option<String>,
}

/// GRN row returned by `/grns`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrnView {
	/// GRN id.
	pub id: u64,
	/// Generated GRN code.
	pub code: String,
	/// Lifecycle state.
	pub status: GrnStatus,
	/// Row version.
	pub version: u32,
	/// Purchase order reference.
	#[serde(default)]
	pub purchase_order: Option<String>,
	/// Supplier bill number.
	#[serde(default)]
	pub bill_number: Option<String>,
	/// Supplier.
	pub supplier: NamedRef,
	/// Receiving location.
	pub location: NamedRef,
	/// Lines.
	pub items: Vec<GrnViewItem>,
	/// Totals.
	pub summary: GrnSummary,
	/// Audit trail.
	pub audit: GrnAudit,
}

/// Filters accepted by `/grns`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GrnFilters {
	/// Supplier filter.
	pub supplier_id: Option<u64>,
	/// Status filter.
	pub status: Option<GrnStatus>,
	/// Created on or after.
	pub start_date: Option<String>,
	/// Created on or before.
	pub end_date: Option<String>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
	/// Sort column.
	pub sort_by: Option<String>,
	/// Sort direction.
	pub order: Option<SortOrder>,
}

/// Body for `POST /grns`.
#[derive(Clone, Debug, Serialize)]
pub struct GrnCreate {
	/// Supplier.
	pub supplier_id: u64,
	/// Receiving location.
	pub location_id: u64,
	/// Purchase order reference.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub purchase_order: Option<String>,
	/// Supplier bill number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bill_number: Option<String>,
	/// Notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// Line items.
	pub items: Vec<GrnItem>,
}

/// Body for `PATCH /grns/{id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GrnUpdate {
	/// New supplier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub supplier_id: Option<u64>,
	/// New receiving location.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location_id: Option<u64>,
	/// New purchase order reference.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub purchase_order: Option<String>,
	/// New bill number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bill_number: Option<String>,
	/// New notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// Replacement line items.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub items: Option<Vec<GrnItem>>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// GRN endpoints.
#[derive(Clone, Copy, Debug)]
pub struct GrnsApi<'a> {
	gateway: &'a Gateway,
}
impl GrnsApi<'_> {
	/// Lists GRNs.
	pub async fn list(&self, filters: &GrnFilters) -> Result<ApiResponse<ListPage<GrnView>>> {
		self.gateway.get("/grns", filters).await
	}

	/// Fetches one GRN.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<GrnDetail>> {
		self.gateway.get(&format!("/grns/{id}"), &()).await
	}

	/// Creates a draft GRN.
	pub async fn create(&self, payload: &GrnCreate) -> Result<ApiResponse<GrnDetail>> {
		self.gateway.post("/grns", Some(payload)).await
	}

	/// Updates a draft GRN.
	pub async fn update(&self, id: u64, payload: &GrnUpdate) -> Result<ApiResponse<GrnDetail>> {
		self.gateway.patch(&format!("/grns/{id}"), Some(payload)).await
	}

	/// Verifies a draft GRN, posting its stock.
	pub async fn verify(&self, id: u64) -> Result<ApiResponse<GrnDetail>> {
		self.gateway.post(&format!("/grns/{id}/verify"), NO_BODY).await
	}

	/// Deletes a draft GRN.
	pub async fn delete(&self, id: u64) -> Result<ApiResponse<GrnDetail>> {
		self.gateway.delete(&format!("/grns/{id}"), NO_BODY).await
	}
}

impl Gateway {
	/// GRN endpoints.
	pub fn grns(&self) -> GrnsApi<'_> {
		GrnsApi { gateway: self }
	}
}
