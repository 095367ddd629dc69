//! Operation registry: the closed set of arithmetic operations.
//!
//! Every computed result in the service, persisted or not, is produced here.
//! The functions are pure and hold no state, so they are safe to call from
//! any number of request handlers at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use super::Error;

/// Arithmetic operation identified by its tag.
///
/// Serialises as the canonical tag (`Add`, `Sub`, `Multiply`, `Divide`).
/// Parsing via [`FromStr`] is case-insensitive and accepts the aliases
/// `subtract`, `mul` and `div`.
///
/// # Examples
/// ```
/// use calculator::domain::Operation;
///
/// let op: Operation = "multiply".parse().expect("known tag");
/// assert_eq!(op, Operation::Multiply);
/// assert_eq!(op.apply(6.0, 7.0), Ok(42.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "&'static str")]
#[schema(as = String, example = "Add")]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
}

/// Reasons a computation can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// The tag does not name a known operation.
    #[error("unsupported operation: {tag}")]
    UnsupportedOperation {
        /// Tag as supplied by the caller.
        tag: String,
    },
    /// `Divide` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// An operand was NaN or infinite.
    #[error("operands must be finite numbers")]
    NonFiniteOperand,
    /// The result overflowed to a non-finite value.
    #[error("result is out of range")]
    ResultOutOfRange,
}

impl CalculationError {
    /// Stable snake_case identifier for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::DivisionByZero => "division_by_zero",
            Self::NonFiniteOperand => "non_finite_operand",
            Self::ResultOutOfRange => "result_out_of_range",
        }
    }
}

impl From<CalculationError> for Error {
    fn from(value: CalculationError) -> Self {
        let details = match &value {
            CalculationError::UnsupportedOperation { tag } => {
                json!({ "code": value.code(), "type": tag })
            }
            _ => json!({ "code": value.code() }),
        };
        Error::unprocessable_entity(capitalise(&value.to_string())).with_details(details)
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl Operation {
    /// Every operation, in canonical order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Multiply, Self::Divide];

    /// Canonical tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }

    /// Apply the operation to two operands.
    ///
    /// # Errors
    /// - [`CalculationError::NonFiniteOperand`] when either operand is NaN
    ///   or infinite.
    /// - [`CalculationError::DivisionByZero`] for `Divide` when `b` is zero
    ///   of either sign.
    /// - [`CalculationError::ResultOutOfRange`] when the result overflows.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalculationError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(CalculationError::NonFiniteOperand);
        }
        let result = match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalculationError::DivisionByZero);
                }
                a / b
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalculationError::ResultOutOfRange)
        }
    }
}

/// Parse `tag` and apply the named operation.
///
/// # Examples
/// ```
/// use calculator::domain::{CalculationError, compute};
///
/// assert_eq!(compute("Add", 10.0, 5.0), Ok(15.0));
/// assert_eq!(compute("Divide", 1.0, 0.0), Err(CalculationError::DivisionByZero));
/// ```
pub fn compute(tag: &str, a: f64, b: f64) -> Result<f64, CalculationError> {
    tag.parse::<Operation>()?.apply(a, b)
}

impl FromStr for Operation {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "sub" | "subtract" => Ok(Self::Sub),
            "multiply" | "mul" => Ok(Self::Multiply),
            "divide" | "div" => Ok(Self::Divide),
            _ => Err(CalculationError::UnsupportedOperation { tag: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for Operation {
    type Error = CalculationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operation> for &'static str {
    fn from(value: Operation) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
