//! Calculation records and the computed-result contract.
//!
//! A [`ComputedCalculation`] can only be built by running its inputs through
//! the operation registry, and repositories accept nothing else for writes.
//! That keeps every stored `result` equal to what [`Operation::apply`]
//! produces for the stored operands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CalculationError, Operation, UserId};

/// Store-assigned calculation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(i64);

impl CalculationId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CalculationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-supplied calculation inputs prior to computation.
///
/// The operation is kept as the raw tag so an unknown tag is reported as
/// [`CalculationError::UnsupportedOperation`] rather than a parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInputs {
    pub a: f64,
    pub b: f64,
    pub operation: String,
}

impl CalculationInputs {
    pub fn new(a: f64, b: f64, operation: impl Into<String>) -> Self {
        Self {
            a,
            b,
            operation: operation.into(),
        }
    }
}

/// Operands, operation, and the result derived from them.
///
/// # Examples
/// ```
/// use calculator::domain::{CalculationInputs, ComputedCalculation, Operation};
///
/// let computed = ComputedCalculation::compute(&CalculationInputs::new(10.0, 5.0, "Add"))
///     .expect("valid inputs");
/// assert_eq!(computed.operation(), Operation::Add);
/// assert_eq!(computed.result(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedCalculation {
    a: f64,
    b: f64,
    operation: Operation,
    result: f64,
}

impl ComputedCalculation {
    /// Parse the operation tag and compute the result.
    pub fn compute(inputs: &CalculationInputs) -> Result<Self, CalculationError> {
        let operation: Operation = inputs.operation.parse()?;
        Self::from_parts(operation, inputs.a, inputs.b)
    }

    /// Compute the result for an already parsed operation.
    pub fn from_parts(operation: Operation, a: f64, b: f64) -> Result<Self, CalculationError> {
        let result = operation.apply(a, b)?;
        Ok(Self {
            a,
            b,
            operation,
            result,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn result(&self) -> f64 {
        self.result
    }
}

/// Persisted calculation as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    #[schema(value_type = i64, example = 1)]
    pub id: CalculationId,
    #[schema(example = 10.0)]
    pub a: f64,
    #[schema(example = 5.0)]
    pub b: f64,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Add")]
    pub operation: Operation,
    #[schema(example = 15.0)]
    pub result: f64,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Calculation {
    /// Whether `result` still matches what the registry computes for the
    /// stored operands.
    pub fn is_consistent(&self) -> bool {
        self.operation.apply(self.a, self.b) == Ok(self.result)
    }
}
