//! Offset/limit pagination primitives.
//!
//! Browse endpoints accept `skip` and `limit` query parameters. This crate
//! turns those raw values into a normalised [`PageParams`] window so HTTP
//! adapters and repositories agree on defaults and bounds:
//!
//! - `skip` defaults to `0` and is unbounded.
//! - `limit` defaults to [`DEFAULT_LIMIT`] and is clamped to
//!   `1..=`[`MAX_LIMIT`].
//!
//! Out-of-range windows are not errors; they simply select nothing.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageParams, PageQuery};
//!
//! let page = PageParams::from(PageQuery { skip: Some(3), limit: Some(5) });
//! let items: Vec<u32> = (0..10).collect();
//! assert_eq!(page.window(&items), vec![3, 4, 5, 6, 7]);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Page size used when the caller does not supply `limit`.
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 1000;

/// Raw pagination query parameters as received from a client.
///
/// Negative or non-numeric values are rejected by deserialisation; missing
/// values fall back to defaults when converted into [`PageParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of records to skip from the start of the ordered sequence.
    #[param(minimum = 0, example = 0)]
    pub skip: Option<u64>,
    /// Maximum number of records to return.
    #[param(minimum = 1, maximum = 1000, example = 100)]
    pub limit: Option<u32>,
}

/// Normalised pagination window.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageParams {
    skip: u64,
    limit: u32,
}

impl PageParams {
    /// Build a window from optional raw values, applying defaults and
    /// clamping `limit`.
    #[must_use]
    pub fn new(skip: Option<u64>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// Number of records skipped.
    #[must_use]
    pub const fn skip(self) -> u64 {
        self.skip
    }

    /// Maximum number of records returned.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// `skip` as a signed SQL `OFFSET`, saturating at `i64::MAX`.
    #[must_use]
    pub fn offset_i64(self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// `limit` as a signed SQL `LIMIT`.
    #[must_use]
    pub fn limit_i64(self) -> i64 {
        i64::from(self.limit)
    }

    /// Select the window from an already ordered slice.
    ///
    /// Used by in-memory stores; SQL adapters use [`Self::offset_i64`] and
    /// [`Self::limit_i64`] instead.
    #[must_use]
    pub fn window<T: Clone>(self, items: &[T]) -> Vec<T> {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.iter().skip(skip).take(limit).cloned().collect()
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl From<PageQuery> for PageParams {
    fn from(value: PageQuery) -> Self {
        Self::new(value.skip, value.limit)
    }
}
