//! Form Schemas
//!
//! Raw form input (strings, as typed) validated into API payloads.
//! Validation failures are reported per field and never reach the network.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{LoginRequest, NewTask, NewUser, Percent, RegisterRequest, Task, User, UserUpdate};
use crate::timestamp;

pub mod field {
    pub const NAME: &str = "name";
    pub const DETAILS: &str = "details";
    pub const PERCENT: &str = "percent";
    pub const START_DATE: &str = "startDate";
    pub const EXPIRED_AT: &str = "expiredAt";
    pub const COMPLETED_AT: &str = "completedAt";
    pub const FIO: &str = "fio";
    pub const PASSWORD: &str = "password";
    pub const POSITION: &str = "position";
    pub const USERNAME: &str = "username";
}

pub const REQUIRED: &str = "Required";
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Validation messages keyed by field name; the first error per field wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
    }
}

fn optional(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Every rule the password breaks, empty when it is strong enough
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        problems.push("at least 8 characters");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        problems.push("an upper-case letter");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        problems.push("a lower-case letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("a digit");
    }
    problems
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    let problems = password_problems(password);
    if !problems.is_empty() {
        errors.add(field::PASSWORD, format!("Password needs {}", problems.join(", ")));
    }
}

fn check_date(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<DateTime<Utc>> {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match timestamp::parse_date(value) {
        Some(date) => Some(timestamp::start_of_day(date)),
        None => {
            errors.add(field, "Expected a date (YYYY-MM-DD)");
            None
        }
    }
}

// ========================
// Task
// ========================

/// Task form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub name: String,
    pub details: String,
    pub percent: String,
    pub start_date: String,
    pub expired_at: String,
    pub completed_at: String,
}

/// Validated task fields, ready to become a payload
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub name: String,
    pub details: Option<String>,
    pub percent: Percent,
    pub start_date: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskForm {
    /// Blank form for a new task: starts and expires today, nothing done yet
    pub fn for_new(today: NaiveDate) -> Self {
        let today = today.format("%Y-%m-%d").to_string();
        Self {
            percent: "0".to_string(),
            start_date: today.clone(),
            expired_at: today,
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            details: task.details.clone().unwrap_or_default(),
            percent: task.percent.to_string(),
            start_date: timestamp::to_input_date(&task.start_date),
            expired_at: task
                .expired_at
                .as_ref()
                .map(timestamp::to_input_date)
                .unwrap_or_default(),
            completed_at: task
                .completed_at
                .as_ref()
                .map(timestamp::to_input_date)
                .unwrap_or_default(),
        }
    }

    /// Percent as typed, if it is a number in range
    pub fn parsed_percent(&self) -> Option<Percent> {
        self.percent.trim().parse::<i64>().ok().and_then(Percent::new)
    }

    pub fn validate(&self) -> Result<TaskFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, field::NAME, &self.name);

        let percent = self.parsed_percent();
        if percent.is_none() {
            errors.add(field::PERCENT, "Percent must be between 0 and 100");
        }
        let start_date = check_date(&mut errors, field::START_DATE, &self.start_date);
        let expired_at = check_date(&mut errors, field::EXPIRED_AT, &self.expired_at);
        let completed_at = if self.completed_at.trim().is_empty() {
            None
        } else {
            check_date(&mut errors, field::COMPLETED_AT, &self.completed_at)
        };

        match (percent, start_date, expired_at) {
            (Some(percent), Some(start_date), Some(expired_at)) if errors.is_empty() => Ok(TaskFields {
                name: self.name.trim().to_string(),
                details: optional(&self.details),
                percent,
                start_date,
                expired_at,
                completed_at,
            }),
            _ => Err(errors),
        }
    }
}

impl TaskFields {
    pub fn into_new_task(self, user_id: u32) -> NewTask {
        NewTask {
            name: self.name,
            details: self.details,
            percent: self.percent,
            start_date: self.start_date,
            expired_at: self.expired_at,
            completed_at: self.completed_at,
            user_id,
        }
    }

    /// Edited copy of `task`; id and owner never change
    pub fn apply_to(self, task: &Task) -> Task {
        Task {
            id: task.id,
            name: self.name,
            details: self.details,
            percent: self.percent,
            start_date: self.start_date,
            expired_at: Some(self.expired_at),
            completed_at: self.completed_at,
            user_id: task.user_id,
        }
    }
}

// ========================
// User
// ========================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub fio: String,
    pub password: String,
    pub position: String,
}

impl UserForm {
    /// Edit form; the password is never pre-filled
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            fio: user.fio.clone().unwrap_or_default(),
            password: String::new(),
            position: user.position.clone().unwrap_or_default(),
        }
    }

    fn check_common(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, field::NAME, &self.name);
        require(&mut errors, field::POSITION, &self.position);
        errors
    }

    /// New user: password is mandatory and must be strong
    pub fn validate_new(&self) -> Result<NewUser, FieldErrors> {
        let mut errors = self.check_common();
        check_password(&mut errors, &self.password);
        errors.into_result(|| NewUser {
            name: self.name.trim().to_string(),
            fio: self.fio.trim().to_string(),
            password: self.password.clone(),
            position: self.position.trim().to_string(),
        })
    }

    /// Existing user: an empty password keeps the current one
    pub fn validate_update(&self, id: u32) -> Result<UserUpdate, FieldErrors> {
        let mut errors = self.check_common();
        if !self.password.is_empty() {
            check_password(&mut errors, &self.password);
        }
        errors.into_result(|| UserUpdate {
            id,
            name: self.name.trim().to_string(),
            fio: self.fio.trim().to_string(),
            password: Some(self.password.clone()).filter(|p| !p.is_empty()),
            position: self.position.trim().to_string(),
        })
    }

    /// Self-registration uses the same rules as creating a user
    pub fn validate_register(&self) -> Result<RegisterRequest, FieldErrors> {
        self.validate_new().map(|user| RegisterRequest {
            username: user.name,
            password: user.password,
            fio: user.fio,
            position: user.position,
        })
    }
}

// ========================
// Login
// ========================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, field::USERNAME, &self.username);
        if self.password.is_empty() {
            errors.add(field::PASSWORD, REQUIRED);
        }
        errors.into_result(|| LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
