//! Report Client

use crate::gateway::ApiGateway;
use crate::models::ExpiredTask;
use crate::pagination::PaginationParams;
use crate::response::ApiResponse;

use super::list_query;

#[derive(Debug, Clone)]
pub struct ReportClient {
    gateway: ApiGateway,
}

impl ReportClient {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn expired_tasks(&self, params: &PaginationParams) -> ApiResponse<Vec<ExpiredTask>> {
        self.gateway
            .get_with_query("report/expired-tasks", list_query(params))
            .await
    }
}
