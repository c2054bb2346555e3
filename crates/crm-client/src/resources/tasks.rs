//! Task Client

use crate::gateway::ApiGateway;
use crate::models::{NewTask, Task};
use crate::pagination::PaginationParams;
use crate::response::ApiResponse;

use super::list_query;

#[derive(Debug, Clone)]
pub struct TaskClient {
    gateway: ApiGateway,
}

impl TaskClient {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn get_by_id(&self, id: u32) -> ApiResponse<Task> {
        self.gateway.get(&format!("taskItem/{}", id)).await
    }

    pub async fn get_all(&self, params: &PaginationParams) -> ApiResponse<Vec<Task>> {
        self.gateway.get_with_query("TaskItem", list_query(params)).await
    }

    /// Tasks owned by one user
    pub async fn get_by_user(&self, user_id: u32, params: &PaginationParams) -> ApiResponse<Vec<Task>> {
        self.gateway
            .get_with_query(&format!("TaskItem/user/{}", user_id), list_query(params))
            .await
    }

    pub async fn create(&self, task: &NewTask) -> ApiResponse<Task> {
        self.gateway.post("taskItem", task).await
    }

    pub async fn update(&self, id: u32, task: &Task) -> ApiResponse<Task> {
        self.gateway.put(&format!("taskItem/{}", id), task).await
    }

    pub async fn delete(&self, id: u32) -> ApiResponse<serde_json::Value> {
        self.gateway.delete(&format!("taskItem/{}", id)).await
    }
}
