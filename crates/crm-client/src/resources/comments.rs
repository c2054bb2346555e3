//! Comment Client
//!
//! Comments are append-only; attachments travel through the upload endpoint.

use crate::gateway::ApiGateway;
use crate::models::{Attachment, Comment, NewComment};
use crate::query::QueryString;
use crate::response::ApiResponse;

#[derive(Debug, Clone)]
pub struct CommentClient {
    gateway: ApiGateway,
}

impl CommentClient {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, comment: &NewComment) -> ApiResponse<Comment> {
        self.gateway.post("Comment", comment).await
    }

    pub async fn get_by_task(&self, task_id: u32) -> ApiResponse<Vec<Comment>> {
        self.gateway.get(&format!("Comment/task/{}", task_id)).await
    }

    /// Upload a file and record it as a comment with `caption`
    pub async fn upload(
        &self,
        attachment: &Attachment,
        task_id: u32,
        user_id: u32,
        caption: &str,
    ) -> ApiResponse<Comment> {
        let query = QueryString::new()
            .push("taskItemId", task_id)
            .push("userId", user_id)
            .push("text", caption);
        self.gateway.upload("Comment/upload", query, attachment).await
    }

    pub async fn delete(&self, id: u32) -> ApiResponse<serde_json::Value> {
        self.gateway.delete(&format!("Comment/{}", id)).await
    }

    /// Direct URL of a comment's file, used as an image source
    pub fn file_url(&self, comment_id: u32) -> String {
        self.gateway.config().url(&format!("Comment/file/{}", comment_id))
    }
}
