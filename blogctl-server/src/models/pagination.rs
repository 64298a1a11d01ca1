//! Pagination types

use serde::Deserialize;

use super::ValidationError;

/// Maximum items per page
const MAX_LIMIT: i64 = 100;

/// Default items per page
const DEFAULT_LIMIT: i64 = 10;

/// Pagination window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: i64,
    /// Items per page (max 100)
    pub limit: i64,
}

impl Pagination {
    /// Create pagination with clamping.
    ///
    /// - Page is clamped to minimum of 1
    /// - Limit is clamped to 1..=100
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Calculate SQL OFFSET value, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Raw `?page=&limit=` query parameters.
///
/// Kept as strings so a non-numeric value becomes a validation error
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ValidationError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let page = parse_param("page", params.page.as_deref(), 1)?;
        let limit = parse_param("limit", params.limit.as_deref(), DEFAULT_LIMIT)?;
        Ok(Self::new(page, limit))
    }
}

fn parse_param(
    field: &'static str,
    raw: Option<&str>,
    default: i64,
) -> Result<i64, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidNumber {
                field,
                value: value.to_owned(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> PaginationParams {
        PaginationParams {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn offset_calculation() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.offset(), 0);

        let p = Pagination::new(2, 5);
        assert_eq!(p.offset(), 5);

        let p = Pagination::new(3, 25);
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let p = Pagination::new(i64::MAX, 100);
        assert_eq!(p.offset(), i64::MAX);
    }

    #[test]
    fn defaults_to_first_page_of_ten() {
        let p = Pagination::try_from(params(None, None)).unwrap();
        assert_eq!(p, Pagination::new(1, 10));
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn clamps_page() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(-4, 10).page, 1);
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Pagination::new(1, 0).limit, 1);
        assert_eq!(Pagination::new(1, 999).limit, 100);
    }

    #[test]
    fn parses_query_strings() {
        let p = Pagination::try_from(params(Some("2"), Some("5"))).unwrap();
        assert_eq!(p.page, 2);
        assert_eq!(p.limit(), 5);
    }

    #[test]
    fn rejects_non_numeric() {
        let err = Pagination::try_from(params(Some("two"), None)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "page", .. }));

        let err = Pagination::try_from(params(None, Some("1.5"))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "limit", .. }));
    }
}
