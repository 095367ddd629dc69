//! Calculation store services.
//!
//! Implements the calculation driving ports on top of a
//! [`CalculationRepository`]. Results are always computed here, before the
//! repository is touched, so a failed computation never leaves a partial
//! record behind.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageParams;
use tracing::info;

use crate::domain::ports::{
    CalculationCommand, CalculationQuery, CalculationRepository, CalculationRepositoryError,
};
use crate::domain::{
    Calculation, CalculationId, CalculationInputs, ComputedCalculation, Error, UserId,
};

fn map_repository_error(error: CalculationRepositoryError) -> Error {
    match error {
        CalculationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("calculation repository unavailable: {message}"))
        }
        CalculationRepositoryError::Query { message } => {
            Error::internal(format!("calculation repository error: {message}"))
        }
    }
}

fn not_found(id: CalculationId) -> Error {
    Error::not_found(format!("calculation {id} not found"))
}

/// Calculation service implementing the command and query driving ports.
#[derive(Clone)]
pub struct CalculationService<R> {
    calculation_repo: Arc<R>,
}

impl<R> CalculationService<R> {
    /// Create a new service with the calculation repository.
    pub fn new(calculation_repo: Arc<R>) -> Self {
        Self { calculation_repo }
    }
}

#[async_trait]
impl<R> CalculationCommand for CalculationService<R>
where
    R: CalculationRepository,
{
    async fn create(
        &self,
        inputs: CalculationInputs,
        owner: Option<UserId>,
    ) -> Result<Calculation, Error> {
        let computed = ComputedCalculation::compute(&inputs)?;
        let record = self
            .calculation_repo
            .insert(&computed, owner)
            .await
            .map_err(map_repository_error)?;

        info!(
            calculation_id = %record.id,
            operation = %record.operation,
            user_id = record.user_id.as_ref().map(tracing::field::display),
            "calculation created"
        );
        Ok(record)
    }

    async fn update(
        &self,
        id: CalculationId,
        inputs: CalculationInputs,
    ) -> Result<Calculation, Error> {
        // An absent id reports not_found even when the new inputs would fail
        // to compute.
        self.calculation_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        let computed = ComputedCalculation::compute(&inputs)?;
        let record = self
            .calculation_repo
            .update(id, &computed)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        info!(calculation_id = %id, operation = %record.operation, "calculation updated");
        Ok(record)
    }

    async fn delete(&self, id: CalculationId) -> Result<(), Error> {
        let removed = self
            .calculation_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(not_found(id));
        }

        info!(calculation_id = %id, "calculation deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> CalculationQuery for CalculationService<R>
where
    R: CalculationRepository,
{
    async fn get(&self, id: CalculationId) -> Result<Calculation, Error> {
        self.calculation_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, page: PageParams) -> Result<Vec<Calculation>, Error> {
        self.calculation_repo
            .list(page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "calculation_service_tests.rs"]
mod tests;
