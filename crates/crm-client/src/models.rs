//! Domain Models
//!
//! One canonical shape per entity, matching the API's camelCase JSON.
//! Deserialization is the validation boundary: malformed records never reach the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp;

/// Completion percentage, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Option<Self> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Percent {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Percent::new(value).ok_or_else(|| format!("percent out of range: {}", value))
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task assigned to exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
    pub percent: Percent,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    /// Older tasks may have no deadline
    #[serde(default, with = "timestamp::option")]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: u32,
}

impl Task {
    /// One-line description for delete confirmation
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Task #{} \"{}\": {}% done",
            self.id, self.name, self.percent
        );
        if let Some(expired_at) = &self.expired_at {
            summary.push_str(&format!(", due {}", timestamp::display_date(expired_at)));
        }
        if let Some(completed_at) = &self.completed_at {
            summary.push_str(&format!(", completed {}", timestamp::display_date(completed_at)));
        }
        summary
    }
}

/// Creation payload for a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub details: Option<String>,
    pub percent: Percent,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub expired_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: u32,
}

/// Employee. The password is write-only and never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub fio: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl User {
    /// Display name: FIO when known, login name otherwise
    pub fn display_name(&self) -> &str {
        self.fio
            .as_deref()
            .filter(|fio| !fio.trim().is_empty())
            .unwrap_or(&self.name)
    }

    pub fn summary(&self) -> String {
        match self.position.as_deref().filter(|p| !p.is_empty()) {
            Some(position) => format!("User #{} {} ({}), {}", self.id, self.display_name(), self.name, position),
            None => format!("User #{} {} ({})", self.id, self.display_name(), self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub fio: String,
    pub password: String,
    pub position: String,
}

/// Update payload; a missing password keeps the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: u32,
    pub name: String,
    pub fio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub position: String,
}

/// Row of the users table: a user with task statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskSummary {
    pub user_id: u32,
    pub user_name: String,
    #[serde(default)]
    pub fio: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub task_item_count: u32,
    #[serde(default)]
    pub completed_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOwner {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fio: String,
}

/// Row of the expired tasks report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiredTask {
    pub id: u32,
    pub name: String,
    pub user: TaskOwner,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub expired_at: DateTime<Utc>,
    pub percent: Percent,
    #[serde(default)]
    pub expired_days: i64,
}

/// Immutable comment in a task's audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub task_item_id: u32,
    pub user_id: u32,
    pub text: String,
    #[serde(with = "timestamp")]
    pub create_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl Comment {
    pub fn has_attachment(&self) -> bool {
        self.file_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Attachment that can be previewed inline
    pub fn is_image(&self) -> bool {
        let by_type = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));
        let by_name = self.file_name.as_deref().is_some_and(|name| {
            let lower = name.to_ascii_lowercase();
            [".jpeg", ".jpg", ".gif", ".png"].iter().any(|ext| lower.ends_with(ext))
        });
        by_type || by_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_id: u32,
    pub task_item_id: u32,
    pub text: String,
    #[serde(with = "timestamp")]
    pub create_timestamp: DateTime<Utc>,
}

/// File picked in the browser, read into memory for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}

/// Session returned by login/register and persisted by the credential store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub user_id: u32,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub fio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub fio: String,
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_from_wire() {
        let raw = r#"{
            "id": 7, "name": "Report", "details": null, "percent": 40,
            "startDate": "2024-05-01T00:00:00", "expiredAt": "2024-05-10",
            "completedAt": null, "userId": 3
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.percent.value(), 40);
        assert_eq!(task.user_id, 3);
        assert!(task.completed_at.is_none());
        assert!(task.summary().contains("40% done"));
    }

    #[test]
    fn test_task_without_deadline() {
        let raw = r#"[
            {"id":1,"name":"a","percent":10,"startDate":"2024-05-01","expiredAt":null,"userId":2},
            {"id":2,"name":"b","percent":20,"startDate":"2024-05-01","userId":2}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.expired_at.is_none()));
        assert!(!tasks[0].summary().contains("due"));
    }

    #[test]
    fn test_percent_rejected_out_of_range() {
        let raw = r#"{"id":1,"name":"x","percent":140,"startDate":"2024-05-01","expiredAt":"2024-05-02","userId":1}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
        assert!(Percent::new(-1).is_none());
        assert_eq!(Percent::new(100).map(|p| p.value()), Some(100));
    }

    #[test]
    fn test_comment_attachment_detection() {
        let raw = r#"{"id":1,"taskItemId":2,"userId":3,"text":"scan","createTimestamp":"2024-05-01T08:00:00Z",
                      "fileName":"Scan.PNG","filePath":"/files/1","contentType":"application/octet-stream","size":2048}"#;
        let comment: Comment = serde_json::from_str(raw).unwrap();
        assert!(comment.has_attachment());
        assert!(comment.is_image());
    }

    #[test]
    fn test_user_display_name() {
        let user = User { id: 1, name: "ivanov".into(), fio: Some("Ivanov I. I.".into()), position: None };
        assert_eq!(user.display_name(), "Ivanov I. I.");
        let bare = User { fio: Some(" ".into()), ..user };
        assert_eq!(bare.display_name(), "ivanov");
    }

    #[test]
    fn test_user_update_omits_empty_password() {
        let update = UserUpdate { id: 1, name: "a".into(), fio: "".into(), password: None, position: "dev".into() };
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("password"));
    }
}
