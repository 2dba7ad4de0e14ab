//! Backend error-code taxonomy and the UI action each code maps to.

// self
use crate::_prelude::*;

macro_rules! def_codes {
	($($variant:ident => $code:literal,)+) => {
		/// Machine-readable error codes emitted by the backend or synthesized by the client.
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(from = "String", into = "String")]
		pub enum ErrorCode {
			$(
				#[doc = concat!("`", $code, "`.")]
				$variant,
			)+
			/// Any code this client does not know about.
			Other(String),
		}
		impl ErrorCode {
			/// Returns the wire representation.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $code,)+
					Self::Other(code) => code,
				}
			}
		}
		impl From<&str> for ErrorCode {
			fn from(value: &str) -> Self {
				match value {
					$($code => Self::$variant,)+
					other => Self::Other(other.to_owned()),
				}
			}
		}
	};
}

def_codes! {
	AuthInvalid => "AUTH_INVALID",
	AuthForbidden => "AUTH_FORBIDDEN",
	AuthExpired => "AUTH_EXPIRED",
	CustomerNotFound => "CUSTOMER_NOT_FOUND",
	CustomerEmailExists => "CUSTOMER_EMAIL_EXISTS",
	CustomerCodeExists => "CUSTOMER_CODE_EXISTS",
	CustomerVersionConflict => "CUSTOMER_VERSION_CONFLICT",
	DiscountNotFound => "DISCOUNT_NOT_FOUND",
	DiscountAlreadyActive => "DISCOUNT_ALREADY_ACTIVE",
	DiscountExpired => "DISCOUNT_EXPIRED",
	DiscountUsageLimitReached => "DISCOUNT_USAGE_LIMIT_REACHED",
	DiscountInvalidRange => "DISCOUNT_INVALID_RANGE",
	DiscountInvalidValue => "DISCOUNT_INVALID_VALUE",
	DiscountCodeExists => "DISCOUNT_CODE_EXISTS",
	DiscountDateOverlap => "DISCOUNT_DATE_OVERLAP",
	DiscountVersionConflict => "DISCOUNT_VERSION_CONFLICT",
	StockTransferInvalidLocation => "STOCK_TRANSFER_INVALID_LOCATION",
	StockTransferInvalidProduct => "STOCK_TRANSFER_INVALID_PRODUCT",
	StockTransferInsufficientStock => "STOCK_TRANSFER_INSUFFICIENT_STOCK",
	StockTransferDuplicate => "STOCK_TRANSFER_DUPLICATE",
	StockTransferInvalidStatus => "STOCK_TRANSFER_INVALID_STATUS",
	GrnNotFound => "GRN_NOT_FOUND",
	GrnInvalidStatus => "GRN_INVALID_STATUS",
	GrnBillExists => "GRN_BILL_EXISTS",
	GrnVersionConflict => "GRN_VERSION_CONFLICT",
	GrnEmptyItems => "GRN_EMPTY_ITEMS",
	GrnInvalidSupplier => "GRN_INVALID_SUPPLIER",
	GrnInvalidLocation => "GRN_INVALID_LOCATION",
	GrnInvalidProduct => "GRN_INVALID_PRODUCT",
	GrnDuplicateItems => "GRN_DUPLICATE_ITEMS",
	NoChangesDetected => "NO_CHANGES_DETECTED",
	QuotationNotFound => "QUOTATION_NOT_FOUND",
	QuotationDuplicateDraft => "QUOTATION_DUPLICATE_DRAFT",
	QuotationInvalidState => "QUOTATION_INVALID_STATE",
	QuotationVersionConflict => "QUOTATION_VERSION_CONFLICT",
	QuotationCannotApprove => "QUOTATION_CANNOT_APPROVE",
	QuotationCannotDelete => "QUOTATION_CANNOT_DELETE",
	ValidationError => "VALIDATION_ERROR",
	NetworkError => "NETWORK_ERROR",
	UnsavedChanges => "UNSAVED_CHANGES",
	UnknownError => "UNKNOWN_ERROR",
}

impl ErrorCode {
	/// Classifies the code into the UI reaction callers are expected to take.
	pub fn action(&self) -> ErrorAction {
		match self {
			Self::AuthExpired => ErrorAction::Logout,
			Self::CustomerVersionConflict
			| Self::DiscountAlreadyActive
			| Self::DiscountExpired
			| Self::DiscountUsageLimitReached
			| Self::DiscountVersionConflict
			| Self::GrnInvalidStatus
			| Self::GrnVersionConflict
			| Self::NoChangesDetected => ErrorAction::Toast(Severity::Warning),
			_ => ErrorAction::Toast(Severity::Error),
		}
	}
}
impl From<String> for ErrorCode {
	fn from(value: String) -> Self {
		Self::from(value.as_str())
	}
}
impl From<ErrorCode> for String {
	fn from(value: ErrorCode) -> Self {
		match value {
			ErrorCode::Other(code) => code,
			known => known.as_str().to_owned(),
		}
	}
}
impl Debug for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ErrorCode({})", self.as_str())
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Reaction a UI layer should take for an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorAction {
	/// Show a toast with the given severity.
	Toast(Severity),
	/// Tear down the session and return to the unauthenticated entry point.
	Logout,
}

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	/// Blocking failure.
	Error,
	/// Recoverable conflict the user should look at.
	Warning,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn known_codes_round_trip_through_strings() {
		assert_eq!(ErrorCode::from("GRN_BILL_EXISTS"), ErrorCode::GrnBillExists);
		assert_eq!(ErrorCode::GrnBillExists.as_str(), "GRN_BILL_EXISTS");
		assert_eq!(String::from(ErrorCode::QuotationCannotApprove), "QUOTATION_CANNOT_APPROVE");
	}

	#[test]
	fn unknown_codes_are_kept_verbatim() {
		let code: ErrorCode = serde_json::from_str("\"INVOICE_LOCKED\"")
			.expect("Unknown codes should still deserialize.");

		assert_eq!(code, ErrorCode::Other("INVOICE_LOCKED".into()));
		assert_eq!(
			serde_json::to_string(&code).expect("Unknown codes should serialize."),
			"\"INVOICE_LOCKED\""
		);
	}

	#[test]
	fn conflicts_warn_and_expiry_logs_out() {
		assert_eq!(
			ErrorCode::CustomerVersionConflict.action(),
			ErrorAction::Toast(Severity::Warning)
		);
		assert_eq!(ErrorCode::NoChangesDetected.action(), ErrorAction::Toast(Severity::Warning));
		assert_eq!(ErrorCode::GrnNotFound.action(), ErrorAction::Toast(Severity::Error));
		assert_eq!(ErrorCode::NetworkError.action(), ErrorAction::Toast(Severity::Error));
		assert_eq!(ErrorCode::AuthExpired.action(), ErrorAction::Logout);
	}
}
