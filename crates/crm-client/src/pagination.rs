//! Pagination Parameters
//!
//! List query state shared by every table: page, page size and sort order.

use serde::{Deserialize, Serialize};

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [2, 10, 25, 50];

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the sorted column header
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page_number: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl PaginationParams {
    pub fn is_valid(&self) -> bool {
        self.page_number >= 1 && is_allowed_page_size(self.page_size) && is_sort_field(&self.sort_by)
    }

    pub fn with_page(&self, page_number: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self.clone()
        }
    }

    /// Same size and sort from the first page, for when the row set changes underneath
    pub fn restart(&self) -> Self {
        self.with_page(1)
    }

    /// Changing the size invalidates the current page, so go back to the first one.
    pub fn with_page_size(&self, page_size: u32) -> Self {
        if !is_allowed_page_size(page_size) {
            return self.clone();
        }
        Self {
            page_number: 1,
            page_size,
            ..self.clone()
        }
    }

    /// Clicking the sorted column flips direction; another column sorts ascending.
    pub fn toggle_sort(&self, field: &str) -> Self {
        let sort_direction = if self.sort_by == field {
            self.sort_direction.flipped()
        } else {
            SortDirection::Ascending
        };
        Self {
            page_number: 1,
            sort_by: field.to_string(),
            sort_direction,
            ..self.clone()
        }
    }

    /// Arrow for a column header, empty when the column is not the sort key
    pub fn sort_indicator(&self, field: &str) -> &'static str {
        if self.sort_by == field {
            self.sort_direction.arrow()
        } else {
            ""
        }
    }
}

pub fn is_allowed_page_size(size: u32) -> bool {
    PAGE_SIZE_OPTIONS.contains(&size)
}

/// Field names are plain identifiers
pub fn is_sort_field(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Pagination block returned by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationMetadata {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_count: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Navigation bounds of the pager for one page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_number: u32,
    pub total_pages: u32,
}

impl PageWindow {
    pub fn new(page_number: u32, page_size: u32, total_count: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        Self {
            page_number: page_number.max(1),
            total_pages,
        }
    }

    pub fn for_params(params: &PaginationParams, total_count: u32) -> Self {
        Self::new(params.page_number, params.page_size, total_count)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn previous(&self) -> u32 {
        self.page_number.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        (self.page_number + 1).min(self.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_bounds() {
        let first = PageWindow::new(1, 10, 25);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageWindow::new(3, 10, 25);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.next(), 3);
        assert_eq!(first.previous(), 1);
    }

    #[test]
    fn test_page_window_empty_result() {
        let window = PageWindow::new(1, 10, 0);
        assert_eq!(window.total_pages, 0);
        assert!(!window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let params = PaginationParams::default().with_page(4);
        let resized = params.with_page_size(25);
        assert_eq!(resized.page_number, 1);
        assert_eq!(resized.page_size, 25);
        // sizes outside the allowed set are ignored
        assert_eq!(params.with_page_size(7), params);
    }

    #[test]
    fn test_restart_keeps_size_and_sort() {
        let params = PaginationParams::default().with_page_size(25).toggle_sort("fio").with_page(3);
        let first = params.restart();
        assert_eq!(first.page_number, 1);
        assert_eq!(first.page_size, 25);
        assert_eq!(first.sort_by, "fio");
        assert_eq!(first.sort_direction, params.sort_direction);
    }

    #[test]
    fn test_toggle_sort() {
        let params = PaginationParams::default().with_page(2);
        let flipped = params.toggle_sort("name");
        assert_eq!(flipped.sort_direction, SortDirection::Descending);
        assert_eq!(flipped.page_number, 1);

        let other = flipped.toggle_sort("position");
        assert_eq!(other.sort_by, "position");
        assert_eq!(other.sort_direction, SortDirection::Ascending);
        assert_eq!(other.sort_indicator("position"), "↑");
        assert_eq!(other.sort_indicator("name"), "");
    }

    #[test]
    fn test_validity() {
        assert!(PaginationParams::default().is_valid());
        let mut bad = PaginationParams::default();
        bad.page_number = 0;
        assert!(!bad.is_valid());
        bad = PaginationParams { sort_by: "na me".into(), ..Default::default() };
        assert!(!bad.is_valid());
    }
}
