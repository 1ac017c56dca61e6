//! Query parameter types for list endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Page used when the request asks for page zero or below.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the request asks for zero or fewer items.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound on the page size.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Layout of the timestamps accepted by [`TimeRange`].
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Page selection as sent by clients (`page` is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParam {
    /// Page number (1-based).
    pub page: i64,
    /// Number of items per page.
    pub page_size: i64,
}

impl PageParam {
    /// Create a page parameter as given, without normalization.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Both the page and the page size are positive.
    pub fn is_valid(&self) -> bool {
        self.page > 0 && self.page_size > 0
    }

    /// Row offset for the page as given; pages below 2 start at zero.
    /// Saturates instead of overflowing on huge pages.
    pub fn offset(&self) -> i64 {
        if self.page > 1 {
            (self.page - 1).saturating_mul(self.page_size)
        } else {
            0
        }
    }

    /// Normalize in place and return `(limit, offset)`.
    ///
    /// Pages below 1 become 1, non-positive sizes become
    /// [`DEFAULT_PAGE_SIZE`], and sizes above [`MAX_PAGE_SIZE`] are capped.
    pub fn limit_offset(&mut self) -> (i64, i64) {
        if self.page < DEFAULT_PAGE {
            self.page = DEFAULT_PAGE;
        }
        if self.page_size <= 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.page_size > MAX_PAGE_SIZE {
            self.page_size = MAX_PAGE_SIZE;
        }
        (self.page_size, (self.page - 1).saturating_mul(self.page_size))
    }
}

impl Default for PageParam {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A `[start, end)` time window over one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Column the window applies to.
    #[serde(default)]
    pub column: String,
    /// Inclusive start, formatted as [`TIME_FORMAT`].
    #[serde(default)]
    pub start_time: String,
    /// Exclusive end, formatted as [`TIME_FORMAT`].
    #[serde(default)]
    pub end_time: String,
}

impl TimeRange {
    /// Both bounds are present.
    pub fn is_valid(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }

    /// Parse both bounds. Returns `None` if either does not match [`TIME_FORMAT`].
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = NaiveDateTime::parse_from_str(self.start_time.trim(), TIME_FORMAT).ok()?;
        let end = NaiveDateTime::parse_from_str(self.end_time.trim(), TIME_FORMAT).ok()?;
        Some((start, end))
    }

    /// Whole days between start and end, truncated toward zero.
    pub fn diff_days(&self) -> Option<i64> {
        self.bounds().map(|(start, end)| (end - start).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageParam::new(1, 20).offset(), 0);
        assert_eq!(PageParam::new(3, 20).offset(), 40);
        assert_eq!(PageParam::new(0, 20).offset(), 0);
    }

    #[test]
    fn test_limit_offset_normalizes() {
        let mut param = PageParam::new(0, 0);
        assert_eq!(param.limit_offset(), (20, 0));
        assert_eq!(param, PageParam::new(1, 20));

        let mut param = PageParam::new(2, 10_000);
        assert_eq!(param.limit_offset(), (500, 500));
    }

    #[test]
    fn test_huge_page_saturates() {
        let mut param: PageParam =
            serde_json::from_str(r#"{"page": 9223372036854775807, "pageSize": 500}"#)
                .expect("deserialize");
        assert_eq!(param.offset(), i64::MAX);
        assert_eq!(param.limit_offset(), (500, i64::MAX));
        assert_eq!(PageParam::new(i64::MAX, -3).offset(), i64::MIN);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let param: PageParam =
            serde_json::from_str(r#"{"page": 2, "pageSize": 50}"#).expect("deserialize");
        assert_eq!(param, PageParam::new(2, 50));
        assert!(param.is_valid());
    }

    #[test]
    fn test_time_range() {
        let range = TimeRange {
            column: "created_at".to_string(),
            start_time: " 2024-01-01 00:00:00".to_string(),
            end_time: "2024-01-08 12:00:00 ".to_string(),
        };
        assert!(range.is_valid());
        assert_eq!(range.diff_days(), Some(7));
    }

    #[test]
    fn test_time_range_invalid() {
        let range = TimeRange {
            start_time: "2024-01-01".to_string(),
            ..TimeRange::default()
        };
        assert!(!range.is_valid());
        assert_eq!(range.bounds(), None);
    }
}
