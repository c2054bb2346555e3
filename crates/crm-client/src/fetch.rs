//! Fetch State
//!
//! Load state of a list view and the generation counter that keeps a
//! superseded request from overwriting newer results.

use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ApiError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// One page of list rows with the server's total
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub total_count: u32,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T> ListPage<T> {
    /// Missing pagination metadata falls back to the row count.
    pub fn from_response(response: ApiResponse<Vec<T>>) -> Result<Self, ApiError> {
        let reported = response.pagination.as_ref().map(|p| p.total_count);
        let rows = response.into_result()?.unwrap_or_default();
        let total_count = reported.unwrap_or(rows.len() as u32);
        Ok(Self { rows, total_count })
    }
}

/// Monotonic request counter. Each fetch takes a ticket; only the latest ticket
/// may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

/// Token handed to an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.0 = self.0.wrapping_add(1);
        Ticket(self.0)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0 == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut generation = Generation::new();
        let first = generation.begin();
        assert!(generation.is_current(first));
        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_list_page_total() {
        let response: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2],"pagination":{"totalCount":25}}"#).unwrap();
        let page = ListPage::from_response(response).unwrap();
        assert_eq!(page.rows, vec![1, 2]);
        assert_eq!(page.total_count, 25);

        let bare: ApiResponse<Vec<u32>> = serde_json::from_str(r#"{"success":true,"data":[4]}"#).unwrap();
        assert_eq!(ListPage::from_response(bare).unwrap().total_count, 1);

        let failed = ApiResponse::<Vec<u32>>::failure("HTTP_ERROR_500", "HTTP error 500");
        assert_eq!(ListPage::from_response(failed).unwrap_err().code, "HTTP_ERROR_500");
    }

    #[test]
    fn test_load_state_accessors() {
        let state: LoadState<Vec<u32>> = LoadState::Loaded(vec![1]);
        assert_eq!(state.loaded(), Some(&vec![1]));
        assert!(!state.is_loading());
        let failed: LoadState<u32> = LoadState::Failed(ApiError::new("NETWORK_ERROR", "offline"));
        assert!(failed.error().unwrap().is_network());
    }
}
