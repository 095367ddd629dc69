//! Driving port for calculation reads.

use async_trait::async_trait;
use pagination::PageParams;

use crate::domain::{Calculation, CalculationId, Error};

/// Domain use-case port for browsing calculation history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationQuery: Send + Sync {
    /// Fetch one calculation or fail with `not_found`.
    async fn get(&self, id: CalculationId) -> Result<Calculation, Error>;

    /// Page through calculations in creation order.
    async fn list(&self, page: PageParams) -> Result<Vec<Calculation>, Error>;
}
