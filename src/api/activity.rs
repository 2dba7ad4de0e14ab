//! User activity log.

// self
use crate::{
	_prelude::*,
	api::{ApiResponse, ListPage, SortOrder},
	gateway::Gateway,
};

/// One activity log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
	/// Entry id.
	pub id: u64,
	/// Acting user, when still known.
	#[serde(default)]
	pub user_id: Option<u64>,
	/// Username at the time of the action.
	pub username_snapshot: String,
	/// Description of the action.
	pub message: String,
	/// Timestamp.
	pub created_at: String,
}

/// Filters accepted by `/activities`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ActivityFilters {
	/// Acting user id.
	pub user_id: Option<u64>,
	/// Username search.
	pub username: Option<String>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Rows per page.
	pub page_size: Option<u32>,
	/// Sort column.
	pub sort_by: Option<String>,
	/// Sort direction.
	pub sort_order: Option<SortOrder>,
}

/// Activity log endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ActivityApi<'a> {
	gateway: &'a Gateway,
}
impl ActivityApi<'_> {
	/// Lists activity entries.
	pub async fn list(
		&self,
		filters: &ActivityFilters,
	) -> Result<ApiResponse<ListPage<UserActivity>>> {
		self.gateway.get("/activities", filters).await
	}
}

impl Gateway {
	/// Activity log endpoints.
	pub fn activity(&self) -> ActivityApi<'_> {
		ActivityApi { gateway: self }
	}
}
