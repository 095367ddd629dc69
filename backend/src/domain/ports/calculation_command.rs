//! Driving port for calculation mutations.
//!
//! Inbound adapters call this port to create, edit and delete calculations
//! without knowing how results are computed or stored.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, CalculationInputs, Error, UserId};

/// Domain use-case port for calculation writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationCommand: Send + Sync {
    /// Compute and persist a new calculation.
    ///
    /// Computation failures are returned before anything is stored.
    async fn create(
        &self,
        inputs: CalculationInputs,
        owner: Option<UserId>,
    ) -> Result<Calculation, Error>;

    /// Recompute and replace an existing calculation.
    async fn update(&self, id: CalculationId, inputs: CalculationInputs)
    -> Result<Calculation, Error>;

    /// Remove a calculation permanently.
    async fn delete(&self, id: CalculationId) -> Result<(), Error>;
}
