//! User Client

use crate::gateway::ApiGateway;
use crate::models::{NewUser, User, UserTaskSummary, UserUpdate};
use crate::pagination::PaginationParams;
use crate::response::ApiResponse;

use super::list_query;

#[derive(Debug, Clone)]
pub struct UserClient {
    gateway: ApiGateway,
}

impl UserClient {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn get_by_id(&self, id: u32) -> ApiResponse<User> {
        self.gateway.get(&format!("user/{}", id)).await
    }

    /// Users with their task statistics, optionally filtered by FIO
    pub async fn get_all(&self, params: &PaginationParams, fio: Option<&str>) -> ApiResponse<Vec<UserTaskSummary>> {
        let query = list_query(params).push_opt("fio", fio);
        self.gateway.get_with_query("user", query).await
    }

    pub async fn create(&self, user: &NewUser) -> ApiResponse<User> {
        self.gateway.post("user", user).await
    }

    pub async fn update(&self, id: u32, user: &UserUpdate) -> ApiResponse<User> {
        self.gateway.put(&format!("user/{}", id), user).await
    }

    pub async fn delete(&self, id: u32) -> ApiResponse<serde_json::Value> {
        self.gateway.delete(&format!("user/{}", id)).await
    }
}
