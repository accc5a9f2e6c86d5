//! Limit/offset pagination types
//!
//! # Usage
//!
//! ```rust,ignore
//! // In a route handler
//! let args = PaginationArgs { limit: Some(10), offset: None };
//! let validated = args.validate()?;
//!
//! // In model
//! let reviews = Review::find_for_resource(resource_id, &validated, pool).await?;
//! ```

use serde::Deserialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 100;

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Input arguments for limit/offset pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationArgs {
    /// Maximum number of items to return.
    pub limit: Option<i64>,
    /// Number of items to skip.
    pub offset: Option<i64>,
}

impl PaginationArgs {
    /// Create args for one page.
    pub fn page(limit: i64, offset: i64) -> Self {
        PaginationArgs {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Validate pagination arguments.
    ///
    /// The limit is clamped to `1..=MAX_LIMIT`; a negative offset is rejected
    /// because it has no meaning for the store.
    pub fn validate(&self) -> Result<ValidatedPagination, &'static str> {
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err("offset must not be negative");
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        Ok(ValidatedPagination { limit, offset })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPagination {
    /// Number of items to fetch (1-100, default 20).
    pub limit: i64,
    /// Rows to skip (>= 0).
    pub offset: i64,
}

impl Default for ValidatedPagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_args_validate_defaults() {
        let validated = PaginationArgs::default().validate().unwrap();
        assert_eq!(validated.limit, DEFAULT_LIMIT);
        assert_eq!(validated.offset, 0);
    }

    #[test]
    fn test_pagination_args_validate_clamps() {
        let validated = PaginationArgs::page(500, 0).validate().unwrap();
        assert_eq!(validated.limit, MAX_LIMIT);

        let validated = PaginationArgs::page(0, 0).validate().unwrap();
        assert_eq!(validated.limit, 1);
    }

    #[test]
    fn test_pagination_args_rejects_negative_offset() {
        assert!(PaginationArgs::page(10, -1).validate().is_err());
    }

    #[test]
    fn test_pagination_args_keeps_offset() {
        let validated = PaginationArgs::page(10, 30).validate().unwrap();
        assert_eq!(validated, ValidatedPagination { limit: 10, offset: 30 });
    }
}
