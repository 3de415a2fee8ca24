//! Listing engine: pagination, sort allow-lists, and the page envelope.
//!
//! Sort columns are resolved through fixed allow-lists; caller-supplied
//! strings never reach query text. LIMIT and OFFSET are always bound as
//! parameters by the repositories.

use serde::Serialize;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub page_size: i64,
}

impl PageParams {
    /// Parse raw query values. Absent, non-numeric, or non-positive input
    /// falls back to page 1 / pageSize 10 rather than erroring.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: parse_positive(page, DEFAULT_PAGE),
            page_size: parse_positive(page_size, DEFAULT_PAGE_SIZE),
        }
    }

    /// Saturates instead of overflowing; an absurdly large page simply
    /// lands past the end of the data and yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

/// Standard list-response shape: pagination metadata plus the current page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T: Serialize> {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_item_count: i64,
    pub data: Vec<T>,
}

impl<T: Serialize> Page<T> {
    /// Assemble the envelope from a count query and a page query. The two
    /// reads are independent; a small mismatch under concurrent writes is
    /// accepted.
    pub fn new(params: PageParams, total_item_count: i64, data: Vec<T>) -> Self {
        // Ceiling division, written to not overflow on a huge pageSize.
        let total_pages = if total_item_count == 0 {
            0
        } else {
            1 + (total_item_count - 1) / params.page_size
        };
        Self {
            current_page: params.page,
            total_pages,
            total_item_count,
            data,
        }
    }
}

/// Sort keys accepted for group listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSort {
    Latest,
    MostPosted,
    MostLiked,
    MostBadge,
}

impl GroupSort {
    /// Resolve a raw `sortBy` value; unknown or absent keys fall back to
    /// `latest`.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("mostPosted") => GroupSort::MostPosted,
            Some("mostLiked") => GroupSort::MostLiked,
            Some("mostBadge") => GroupSort::MostBadge,
            _ => GroupSort::Latest,
        }
    }

    /// The allow-listed column this key sorts by.
    pub fn column(&self) -> &'static str {
        match self {
            GroupSort::Latest => "created_at",
            GroupSort::MostPosted => "post_count",
            GroupSort::MostLiked => "like_count",
            GroupSort::MostBadge => "badge_count",
        }
    }
}

/// Sort keys accepted for memory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemorySort {
    Latest,
    MostCommented,
    MostLiked,
}

impl MemorySort {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("mostCommented") => MemorySort::MostCommented,
            Some("mostLiked") => MemorySort::MostLiked,
            _ => MemorySort::Latest,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            MemorySort::Latest => "created_at",
            MemorySort::MostCommented => "comment_count",
            MemorySort::MostLiked => "like_count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::from_query(None, None);
        assert_eq!(params, PageParams::default());
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_params_non_numeric_falls_back() {
        let params = PageParams::from_query(Some("abc"), Some(""));
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 10);
    }

    #[test]
    fn test_page_params_non_positive_falls_back() {
        let params = PageParams::from_query(Some("0"), Some("-5"));
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 10);
    }

    #[test]
    fn test_page_params_offset() {
        let params = PageParams::from_query(Some("3"), Some("25"));
        assert_eq!(params.page, 3);
        assert_eq!(params.page_size, 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_page_params_extreme_page_saturates() {
        let params = PageParams::from_query(Some("9223372036854775807"), Some("10"));
        assert_eq!(params.page, i64::MAX);
        assert_eq!(params.offset(), i64::MAX);

        let params = PageParams::from_query(Some("2"), Some("9223372036854775807"));
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_page_total_pages_rounds_up() {
        let params = PageParams::from_query(Some("1"), Some("10"));
        assert_eq!(Page::<i64>::new(params, 0, vec![]).total_pages, 0);
        assert_eq!(Page::<i64>::new(params, 1, vec![]).total_pages, 1);
        assert_eq!(Page::<i64>::new(params, 10, vec![]).total_pages, 1);
        assert_eq!(Page::<i64>::new(params, 11, vec![]).total_pages, 2);
        assert_eq!(Page::<i64>::new(params, 95, vec![]).total_pages, 10);

        let huge = PageParams::from_query(Some("1"), Some("9223372036854775807"));
        assert_eq!(Page::<i64>::new(huge, 12, vec![]).total_pages, 1);
    }

    #[test]
    fn test_group_sort_allow_list() {
        assert_eq!(GroupSort::from_query(Some("latest")).column(), "created_at");
        assert_eq!(
            GroupSort::from_query(Some("mostPosted")).column(),
            "post_count"
        );
        assert_eq!(
            GroupSort::from_query(Some("mostLiked")).column(),
            "like_count"
        );
        assert_eq!(
            GroupSort::from_query(Some("mostBadge")).column(),
            "badge_count"
        );
    }

    #[test]
    fn test_unknown_sort_matches_absent() {
        assert_eq!(
            GroupSort::from_query(Some("danger; DROP TABLE groups")),
            GroupSort::from_query(None)
        );
        assert_eq!(
            MemorySort::from_query(Some("nonsense")),
            MemorySort::from_query(None)
        );
    }

    #[test]
    fn test_memory_sort_allow_list() {
        assert_eq!(
            MemorySort::from_query(Some("mostCommented")).column(),
            "comment_count"
        );
        assert_eq!(
            MemorySort::from_query(Some("mostLiked")).column(),
            "like_count"
        );
        assert_eq!(MemorySort::from_query(None).column(), "created_at");
    }
}
