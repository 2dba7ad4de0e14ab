//! User administration.

// self
use crate::{
	_prelude::*,
	api::{ApiResponse, ListPage, SortOrder, VersionPayload},
	gateway::Gateway,
};

/// Application roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
	/// Full access.
	Admin,
	/// Billing and quotations.
	Sales,
	/// Stock and goods receipts.
	Inventory,
}

/// Row returned by `/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
	/// User id.
	pub id: u64,
	/// Display name.
	pub username: String,
	/// Role.
	pub role: UserRole,
	/// Whether the account may sign in.
	pub is_active: bool,
	/// Whether the user currently holds a session.
	pub is_online: bool,
	/// Last sign-in timestamp.
	#[serde(default)]
	pub last_login: Option<String>,
	/// Row version for optimistic concurrency.
	pub version: u32,
}

/// Full user record returned by `/users/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
	/// Fields shared with the list view.
	#[serde(flatten)]
	pub summary: UserSummary,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
	/// Admin who created the account.
	#[serde(default)]
	pub created_by_admin_id: Option<u64>,
}

/// Filters accepted by `/users`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UserFilters {
	/// Free-text search.
	pub search: Option<String>,
	/// Role filter.
	pub role: Option<UserRole>,
	/// Active flag filter.
	pub is_active: Option<bool>,
	/// Online flag filter.
	pub is_online: Option<bool>,
	/// Only users created today.
	pub created_today: Option<bool>,
	/// Creator id filter.
	pub created_by: Option<u64>,
	/// Sort column.
	pub sort_by: Option<String>,
	/// Sort direction.
	pub sort_order: Option<SortOrder>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
}

/// Body for `POST /users`.
#[derive(Clone, Debug, Serialize)]
pub struct UserCreate {
	/// Login email.
	pub email: String,
	/// Initial password.
	pub password: String,
	/// Role.
	pub role: UserRole,
}

/// Body for `PATCH /users/{id}`.
#[derive(Clone, Debug, Serialize)]
pub struct UserUpdate {
	/// New email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	/// New role.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<UserRole>,
	/// New active flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
	/// Row version the caller last observed.
	pub version: u32,
}

/// Headline counts for the admin dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDashboardStats {
	/// All accounts.
	pub total_users: u64,
	/// Active accounts.
	pub active_users: u64,
	/// Admin accounts.
	pub admin_users: u64,
	/// Accounts with a live session.
	pub online_users: u64,
}

/// User administration endpoints.
#[derive(Clone, Copy, Debug)]
pub struct UsersApi<'a> {
	gateway: &'a Gateway,
}
impl UsersApi<'_> {
	/// Lists users.
	pub async fn list(&self, filters: &UserFilters) -> Result<ApiResponse<ListPage<UserSummary>>> {
		self.gateway.get("/users", filters).await
	}

	/// Fetches one user.
	pub async fn get(&self, id: u64) -> Result<ApiResponse<UserDetail>> {
		self.gateway.get(&format!("/users/{id}"), &()).await
	}

	/// Creates a user.
	pub async fn create(&self, payload: &UserCreate) -> Result<ApiResponse<UserDetail>> {
		self.gateway.post("/users", Some(payload)).await
	}

	/// Updates a user.
	pub async fn update(&self, id: u64, payload: &UserUpdate) -> Result<ApiResponse<UserDetail>> {
		self.gateway.patch(&format!("/users/{id}"), Some(payload)).await
	}

	/// Soft-deletes a user (`DELETE` with a version body).
	pub async fn deactivate(&self, id: u64, version: u32) -> Result<ApiResponse<UserDetail>> {
		self.gateway.delete(&format!("/users/{id}"), Some(&VersionPayload { version })).await
	}

	/// Restores a soft-deleted user.
	pub async fn reactivate(&self, id: u64, version: u32) -> Result<ApiResponse<UserDetail>> {
		self.gateway.post(&format!("/users/{id}/activate"), Some(&VersionPayload { version })).await
	}

	/// Dashboard headline counts.
	pub async fn dashboard_stats(&self) -> Result<ApiResponse<UserDashboardStats>> {
		self.gateway.get("/users/dashboard/stats", &()).await
	}
}

impl Gateway {
	/// User administration endpoints.
	pub fn users(&self) -> UsersApi<'_> {
		UsersApi { gateway: self }
	}
}
