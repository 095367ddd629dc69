//! Port for calculation persistence.
//!
//! Writes accept only [`ComputedCalculation`], so an adapter can never store
//! a result that the operation registry did not produce.

use async_trait::async_trait;
use pagination::PageParams;

use crate::domain::{Calculation, CalculationId, ComputedCalculation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calculation repository adapters.
    pub enum CalculationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation repository query failed: {message}",
    }
}

/// Port for storing and browsing calculation records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Persist a new record and return it with its assigned identifier.
    async fn insert(
        &self,
        calculation: &ComputedCalculation,
        owner: Option<UserId>,
    ) -> Result<Calculation, CalculationRepositoryError>;

    /// Find a record by identifier.
    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError>;

    /// Records ordered by ascending identifier within the page window.
    async fn list(&self, page: PageParams) -> Result<Vec<Calculation>, CalculationRepositoryError>;

    /// Replace operands, operation and result in a single statement.
    ///
    /// Returns `None` when no record has the given identifier.
    async fn update(
        &self,
        id: CalculationId,
        calculation: &ComputedCalculation,
    ) -> Result<Option<Calculation>, CalculationRepositoryError>;

    /// Hard delete. Returns whether a record was removed.
    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationRepositoryError>;
}
