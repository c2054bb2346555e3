//! Task Edit Audit Trail
//!
//! Saving an edited task may also write comments: whatever the user typed, a
//! synthetic note when the completion percent moved, or an uploaded file.
//! Comments go out before the task update.

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::forms::{FieldErrors, TaskForm};
use crate::models::{Attachment, Comment, NewComment, Percent, Task};
use crate::resources::{CommentClient, TaskClient};

pub const PERCENT_CHANGE_PREFIX: &str = "percentage updated";
pub const TASK_CREATED: &str = "task created";

pub fn percent_change_note(from: Percent, to: Percent) -> String {
    format!("{}, from {} to {}", PERCENT_CHANGE_PREFIX, from, to)
}

pub fn file_attached_note(file_name: &str) -> String {
    format!("File \"{}\" attached", file_name)
}

/// One comment-producing call made while saving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStep {
    Create(String),
    Upload { attachment: Attachment, caption: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavePlan {
    pub comments: Vec<CommentStep>,
    pub update: Task,
}

/// Outcome of executing a plan
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub task: Task,
    /// Comment calls that failed; the update still went ahead
    pub comment_errors: Vec<ApiError>,
}

/// Edit state captured when the task was loaded
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEditSession {
    task: Task,
    initial_percent: Percent,
}

impl TaskEditSession {
    pub fn new(task: Task) -> Self {
        let initial_percent = task.percent;
        Self { task, initial_percent }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn initial_percent(&self) -> Percent {
        self.initial_percent
    }

    pub fn form(&self) -> TaskForm {
        TaskForm::from_task(&self.task)
    }

    /// Note to pre-fill into the comment box while the percent field is edited
    pub fn suggested_note(&self, form: &TaskForm) -> Option<String> {
        form.parsed_percent()
            .filter(|percent| *percent != self.initial_percent)
            .map(|percent| percent_change_note(self.initial_percent, percent))
    }

    /// Validate the form and decide which calls a save makes.
    pub fn plan_save(
        &self,
        form: &TaskForm,
        comment_text: &str,
        attachment: Option<Attachment>,
    ) -> Result<SavePlan, FieldErrors> {
        let fields = form.validate()?;
        let new_percent = fields.percent;
        let update = fields.apply_to(&self.task);

        let typed = comment_text.trim();
        let percent_changed = new_percent != self.initial_percent;
        let audit_note = percent_changed.then(|| percent_change_note(self.initial_percent, new_percent));

        let mut comments = Vec::new();
        match attachment {
            Some(attachment) => {
                let caption = if !typed.is_empty() {
                    typed.to_string()
                } else if let Some(note) = audit_note {
                    note
                } else {
                    file_attached_note(&attachment.file_name)
                };
                comments.push(CommentStep::Upload { attachment, caption });
            }
            None => {
                if !typed.is_empty() {
                    comments.push(CommentStep::Create(typed.to_string()));
                }
                if let Some(note) = audit_note {
                    if !typed.contains(PERCENT_CHANGE_PREFIX) {
                        comments.push(CommentStep::Create(note));
                    }
                }
            }
        }

        Ok(SavePlan { comments, update })
    }

    /// Run a plan: comments first, in order, then the task update.
    pub async fn execute(
        &mut self,
        plan: SavePlan,
        tasks: &TaskClient,
        comments: &CommentClient,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome, ApiError> {
        let task_id = self.task.id;
        let user_id = self.task.user_id;
        let mut comment_errors = Vec::new();

        for step in plan.comments {
            let response = match step {
                CommentStep::Create(text) => {
                    let comment = NewComment {
                        user_id,
                        task_item_id: task_id,
                        text,
                        create_timestamp: now,
                    };
                    comments.create(&comment).await
                }
                CommentStep::Upload { attachment, caption } => {
                    comments.upload(&attachment, task_id, user_id, &caption).await
                }
            };
            if let Some(err) = response.error() {
                log::error!("[audit] comment for task {} failed: {}", task_id, err);
                comment_errors.push(err);
            }
        }

        let updated = tasks
            .update(task_id, &plan.update)
            .await
            .into_result()?
            .unwrap_or(plan.update);
        log::info!("[audit] task {} saved at {}%", task_id, updated.percent);

        // later saves compare against what was just stored
        *self = TaskEditSession::new(updated.clone());
        Ok(SaveOutcome {
            task: updated,
            comment_errors,
        })
    }
}

/// Entry of a task's history panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub comment: Option<Comment>,
}

/// Creation event first, then comments, ordered by time
pub fn build_history(task: &Task, comments: &[Comment]) -> Vec<HistoryEntry> {
    let mut history = vec![HistoryEntry {
        timestamp: task.start_date,
        text: TASK_CREATED.to_string(),
        comment: None,
    }];
    history.extend(comments.iter().map(|comment| HistoryEntry {
        timestamp: comment.create_timestamp,
        text: comment.text.clone(),
        comment: Some(comment.clone()),
    }));
    // stable: the creation entry stays ahead of same-instant comments
    history.sort_by_key(|entry| entry.timestamp);
    history
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(percent: i64) -> Task {
        serde_json::from_str(&format!(
            r#"{{"id":5,"name":"Migrate","percent":{},"startDate":"2024-05-01","expiredAt":"2024-05-20","userId":8}}"#,
            percent
        ))
        .unwrap()
    }

    fn attachment() -> Attachment {
        Attachment {
            file_name: "plan.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_percent_change_adds_note() {
        let session = TaskEditSession::new(task(40));
        let mut form = session.form();
        form.percent = "70".into();
        let plan = session.plan_save(&form, "", None).unwrap();
        assert_eq!(plan.comments, vec![CommentStep::Create("percentage updated, from 40 to 70".into())]);
        assert_eq!(plan.update.percent.value(), 70);
    }

    #[test]
    fn test_typed_note_suppresses_duplicate() {
        let session = TaskEditSession::new(task(40));
        let mut form = session.form();
        form.percent = "70".into();
        let typed = session.suggested_note(&form).unwrap();
        let plan = session.plan_save(&form, &typed, None).unwrap();
        assert_eq!(plan.comments.len(), 1);

        let plan = session.plan_save(&form, "blocked by vendor", None).unwrap();
        assert_eq!(
            plan.comments,
            vec![
                CommentStep::Create("blocked by vendor".into()),
                CommentStep::Create(percent_change_note(session.initial_percent(), Percent::new(70).unwrap())),
            ]
        );
    }

    #[test]
    fn test_unchanged_percent_no_comments() {
        let session = TaskEditSession::new(task(40));
        let plan = session.plan_save(&session.form(), "  ", None).unwrap();
        assert!(plan.comments.is_empty());
        assert!(session.suggested_note(&session.form()).is_none());
    }

    #[test]
    fn test_attachment_replaces_comment_calls() {
        let session = TaskEditSession::new(task(40));
        let mut form = session.form();
        let plan = session.plan_save(&form, "", Some(attachment())).unwrap();
        assert_eq!(
            plan.comments,
            vec![CommentStep::Upload { attachment: attachment(), caption: "File \"plan.pdf\" attached".into() }]
        );

        form.percent = "90".into();
        let plan = session.plan_save(&form, "", Some(attachment())).unwrap();
        assert_eq!(plan.comments.len(), 1);
        assert!(matches!(&plan.comments[0], CommentStep::Upload { caption, .. } if caption.contains("40") && caption.contains("90")));
    }

    #[test]
    fn test_invalid_form_blocks_plan() {
        let session = TaskEditSession::new(task(40));
        let mut form = session.form();
        form.name.clear();
        assert!(session.plan_save(&form, "", None).is_err());
    }

    #[test]
    fn test_history_order() {
        let task = task(0);
        let comment = |id: u32, ts: &str| -> Comment {
            serde_json::from_str(&format!(
                r#"{{"id":{},"taskItemId":5,"userId":8,"text":"c{}","createTimestamp":"{}"}}"#,
                id, id, ts
            ))
            .unwrap()
        };
        let comments = vec![
            comment(2, "2024-05-03T09:00:00Z"),
            comment(1, "2024-05-02T09:00:00Z"),
            comment(3, "2024-05-01T00:00:00Z"),
        ];
        let history = build_history(&task, &comments);
        let texts: Vec<_> = history.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec![TASK_CREATED, "c3", "c1", "c2"]);
    }
}
