//! mini CRM client core
//!
//! Layered like this:
//! - models / timestamp: canonical entity shapes as the REST API sends them
//! - pagination / query: list parameters and their URL + API encodings
//! - gateway / credentials: one request function with normalized responses
//! - resources: per-entity clients on top of the gateway
//! - forms / audit: client-side validation and the task edit save flow
//! - route / selection / fetch: state helpers used by the UI
//!
//! Nothing in here touches the browser, so all of it is tested on the host.

pub mod audit;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod pagination;
pub mod query;
pub mod resources;
pub mod response;
pub mod route;
pub mod selection;
pub mod timestamp;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use config::ClientConfig;
pub use credentials::{CredentialStore, MemoryCredentials};
pub use error::{ApiError, ConfigError, TransportError};
pub use gateway::{ApiGateway, HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
pub use pagination::{PageWindow, PaginationMetadata, PaginationParams, SortDirection, PAGE_SIZE_OPTIONS};
pub use resources::{AuthClient, CommentClient, ReportClient, TaskClient, UserClient};
pub use response::ApiResponse;
