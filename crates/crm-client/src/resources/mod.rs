//! Resource Clients
//!
//! Thin request builders per entity, organized by domain. Each call is one
//! best-effort request whose result is the gateway's normalized response.

mod auth;
mod comments;
mod reports;
mod tasks;
mod users;

pub use auth::AuthClient;
pub use comments::CommentClient;
pub use reports::ReportClient;
pub use tasks::TaskClient;
pub use users::UserClient;

use crate::pagination::PaginationParams;
use crate::query::{api_query, QueryString};

/// Paging query for list endpoints
fn list_query(params: &PaginationParams) -> QueryString {
    QueryString::new().extend(api_query(params))
}
