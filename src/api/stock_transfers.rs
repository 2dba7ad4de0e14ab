//! Stock transfers between the godown and the showroom.

// self
use crate::{
	_prelude::*,
	api::ApiResponse,
	gateway::{Gateway, NO_BODY},
};

/// Transfer lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
	/// Awaiting completion.
	Pending,
	/// Stock moved.
	Completed,
	/// Voided.
	Cancelled,
}

/// Product reference on a transfer view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMini {
	/// Product id.
	pub id: u64,
	/// Name.
	pub name: String,
	/// Stock-keeping unit.
	pub sku: String,
}

/// Location reference on a transfer view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationMini {
	/// Location id.
	pub id: u64,
	/// Location code.
	pub code: String,
	/// Name.
	pub name: String,
}

/// Transfer row returned by `/stock-transfers/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransferView {
	/// Transfer id.
	pub id: u64,
	/// Moved product.
	pub product: ProductMini,
	/// Moved quantity.
	pub quantity: u32,
	/// Source.
	pub from_location: LocationMini,
	/// Destination.
	pub to_location: LocationMini,
	/// Lifecycle state.
	pub status: TransferStatus,
	/// Requesting user.
	pub transferred_by: String,
	/// Completing user.
	#[serde(default)]
	pub completed_by: Option<String>,
	/// Request timestamp.
	pub transfer_date: String,
}

/// Pending quantities per location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummary {
	/// Godown count.
	pub godown: u64,
	/// Showroom count.
	pub showroom: u64,
}

/// `/stock-transfers/` response, which is not wrapped in the standard envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransferList {
	/// Status message.
	#[serde(default)]
	pub message: String,
	/// Total matching transfers.
	pub total: u64,
	/// Per-location summary.
	pub summary: TransferSummary,
	/// Rows on this page.
	pub data: Vec<StockTransferView>,
}

/// Transfer record returned by writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransfer {
	/// Transfer id.
	pub id: u64,
	/// Moved product.
	pub product_id: u64,
	/// Moved quantity.
	pub quantity: u32,
	/// Source.
	pub from_location_id: u64,
	/// Destination.
	pub to_location_id: u64,
	/// Lifecycle state.
	pub status: TransferStatus,
	/// Requesting user.
	pub transferred_by_id: u64,
	/// Completing user.
	#[serde(default)]
	pub completed_by_id: Option<u64>,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Filters accepted by `/stock-transfers/`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TransferFilters {
	/// Status filter.
	pub status: Option<TransferStatus>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
}

/// Body for `POST /stock-transfers`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TransferCreate {
	/// Product to move.
	pub product_id: u64,
	/// Quantity to move.
	pub quantity: u32,
	/// Source.
	pub from_location_id: u64,
	/// Destination.
	pub to_location_id: u64,
}

/// Stock transfer endpoints.
#[derive(Clone, Copy, Debug)]
pub struct StockTransfersApi<'a> {
	gateway: &'a Gateway,
}
impl StockTransfersApi<'_> {
	/// Lists transfers.
	pub async fn list(&self, filters: &TransferFilters) -> Result<StockTransferList> {
		self.gateway.get("/stock-transfers/", filters).await
	}

	/// Requests a transfer.
	pub async fn create(&self, payload: &TransferCreate) -> Result<ApiResponse<StockTransfer>> {
		self.gateway.post("/stock-transfers", Some(payload)).await
	}

	/// Completes a pending transfer.
	pub async fn complete(&self, id: u64) -> Result<Value> {
		self.gateway.post(&format!("/stock-transfers/{id}/complete"), NO_BODY).await
	}

	/// Cancels a pending transfer.
	pub async fn cancel(&self, id: u64) -> Result<Value> {
		self.gateway.post(&format!("/stock-transfers/{id}/cancel"), NO_BODY).await
	}
}

impl Gateway {
	/// Stock transfer endpoints.
	pub fn stock_transfers(&self) -> StockTransfersApi<'_> {
		StockTransfersApi { gateway: self }
	}
}
