//! Sales quotations.
//!
//! State changes (approve, delete, convert) pass the row version as a `?version=` query
//! parameter rather than in a body.

// self
use crate::{
	_prelude::*,
	api::{Amount, ApiResponse, ListPage, SortOrder, VersionPayload, customers::CustomerAddress},
	gateway::{Call, Gateway},
};

/// Quotation lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
	/// Editable.
	Draft,
	/// Approved for invoicing.
	Approved,
	/// Past its validity date.
	Expired,
	/// Converted into an invoice.
	ConvertedToInvoice,
	/// Voided.
	Cancelled,
	/// Invoice issued.
	Invoiced,
}

/// Line on create/update bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationItem {
	/// Quoted product.
	pub product_id: u64,
	/// Quoted quantity.
	pub quantity: u32,
}

/// Quotation row returned by `/quotations/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuotationView {
	/// Quotation id.
	pub id: u64,
	/// Human-readable number.
	pub quotation_number: String,
	/// Customer id.
	pub customer_id: u64,
	/// Customer name.
	pub customer_name: String,
	/// Lifecycle state.
	pub status: QuotationStatus,
	/// Number of lines.
	pub items_count: u32,
	/// Pre-tax total.
	pub subtotal_amount: Amount,
	/// Tax total.
	pub tax_amount: Amount,
	/// Grand total.
	pub total_amount: Amount,
	/// Validity date.
	#[serde(default)]
	pub valid_until: Option<String>,
	/// Row version.
	pub version: u32,
	/// Soft-delete flag.
	pub is_deleted: bool,
	/// Creation timestamp.
	pub created_at: String,
	/// Creator name.
	#[serde(default)]
	pub created_by_name: Option<String>,
}

/// Customer block embedded in a quotation detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationCustomer {
	/// Customer id.
	pub id: u64,
	/// Customer code.
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
}

/// Priced line on a quotation detail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuotationDetailItem {
	/// Line id.
	pub id: u64,
	/// Product id.
	pub product_id: u64,
	/// Product name.
	pub product_name: String,
	/// Stock-keeping unit.
	pub sku: String,
	/// HSN tax classification code.
	pub hsn_code: u32,
	/// Category.
	#[serde(default)]
	pub category: Option<String>,
	/// Quantity.
	pub quantity: u32,
	/// Unit price.
	pub unit_price: Amount,
	/// Line total.
	pub line_total: Amount,
}

/// Full quotation returned by `/quotations/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuotationDetail {
	/// Quotation id.
	pub id: u64,
	/// Human-readable number.
	pub quotation_number: String,
	/// Customer.
	pub customer: QuotationCustomer,
	/// Lifecycle state.
	pub status: QuotationStatus,
	/// Validity date.
	#[serde(default)]
	pub valid_until: Option<String>,
	/// Pre-tax total.
	pub subtotal_amount: Amount,
	/// Tax total.
	pub tax_amount: Amount,
	/// Grand total.
	pub total_amount: Amount,
	/// Inter-state supply (IGST) instead of CGST + SGST.
	pub is_inter_state: bool,
	/// Central GST rate.
	pub cgst_rate: Amount,
	/// State GST rate.
	pub sgst_rate: Amount,
	/// Integrated GST rate.
	pub igst_rate: Amount,
	/// Central GST amount.
	pub cgst_amount: Amount,
	/// State GST amount.
	pub sgst_amount: Amount,
	/// Integrated GST amount.
	pub igst_amount: Amount,
	/// Description.
	#[serde(default)]
	pub description: Option<String>,
	/// Notes.
	#[serde(default)]
	pub notes: Option<String>,
	/// Free-form extra data.
	#[serde(default)]
	pub additional_data: Option<Value>,
	/// Hash of the line items.
	pub item_signature: String,
	/// Row version.
	pub version: u32,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
	/// Creator name.
	#[serde(default)]
	pub created_by_name: Option<String>,
	/// Last editor name.
	#[serde(default)]
	pub updated_by_name: Option<String>,
	/// Lines.
	pub items: Vec<QuotationDetailItem>,
}

/// Filters accepted by `/quotations/`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct QuotationFilters {
	/// Customer filter.
	pub customer_id: Option<u64>,
	/// Status filter.
	pub status: Option<QuotationStatus>,
	/// Include or restrict to soft-deleted rows.
	pub is_deleted: Option<bool>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
	/// Sort column.
	pub sort_by: Option<String>,
	/// Sort direction.
	pub order: Option<SortOrder>,
}

/// Body for `POST /quotations`.
#[derive(Clone, Debug, Serialize)]
pub struct QuotationCreate {
	/// Customer.
	pub customer_id: u64,
	/// Inter-state supply.
	pub is_inter_state: bool,
	/// Validity date.
	pub valid_until: String,
	/// Description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// Lines.
	pub items: Vec<QuotationItem>,
}

/// Body for `PATCH /quotations/{id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct QuotationUpdate {
	/// New description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// New notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// New validity date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub valid_until: Option<String>,
	/// Replacement lines.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub items: Option<Vec<QuotationItem>>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// Quotation endpoints.
#[derive(Clone, Copy, Debug)]
pub struct QuotationsApi<'a> {
	gateway: &'a Gateway,
}
impl QuotationsApi<'_> {
	/// Lists quotations.
	pub async fn list(
		&self,
		filters: &QuotationFilters,
	) -> Result<ApiResponse<ListPage<QuotationView>>> {
		self.gateway.get("/quotations/", filters).await
	}

	/// Fetches one quotation.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<QuotationDetail>> {
		self.gateway.get(&format!("/quotations/{id}"), &()).await
	}

	/// Creates a draft quotation.
	pub async fn create(&self, payload: &QuotationCreate) -> Result<ApiResponse<Value>> {
		self.gateway.post("/quotations", Some(payload)).await
	}

	/// Updates a draft quotation.
	pub async fn update(&self, id: u64, payload: &QuotationUpdate) -> Result<ApiResponse<Value>> {
		self.gateway.patch(&format!("/quotations/{id}"), Some(payload)).await
	}

	/// Approves a draft quotation.
	pub async fn approve(&self, id: u64, version: u32) -> Result<ApiResponse<Value>> {
		self.versioned(Call::post(format!("/quotations/{id}/approve")), version).await
	}

	/// Deletes a quotation.
	pub async fn delete(&self, id: u64, version: u32) -> Result<ApiResponse<Value>> {
		self.versioned(Call::delete(format!("/quotations/{id}")), version).await
	}

	/// Converts an approved quotation into an invoice.
	pub async fn convert_to_invoice(&self, id: u64, version: u32) -> Result<ApiResponse<Value>> {
		self.versioned(Call::post(format!("/quotations/{id}/convert-to-invoice")), version).await
	}

	async fn versioned(&self, call: Call, version: u32) -> Result<ApiResponse<Value>> {
		self.gateway.send(call.query(&VersionPayload { version })?).await
	}
}

impl Gateway {
	/// Quotation endpoints.
	pub fn quotations(&self) -> QuotationsApi<'_> {
		QuotationsApi { gateway: self }
	}
}
