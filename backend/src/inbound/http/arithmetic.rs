//! Stateless arithmetic endpoints.
//!
//! These call the operation registry directly and never touch the store or
//! require a token.
//!
//! ```text
//! POST /add {"a":10,"b":5}                     -> {"result":15.0}
//! POST /compute {"a":10,"b":5,"type":"Divide"} -> {"result":2.0}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Operation, compute};
use crate::inbound::http::ApiResult;

/// Two operands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct OperandsRequest {
    #[schema(example = 10.0)]
    pub a: f64,
    #[schema(example = 5.0)]
    pub b: f64,
}

/// Two operands and an operation tag.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TaggedOperandsRequest {
    pub a: f64,
    pub b: f64,
    #[serde(rename = "type")]
    #[schema(example = "Multiply")]
    pub operation: String,
}

/// Computed value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ResultResponse {
    #[schema(example = 15.0)]
    pub result: f64,
}

fn apply(operation: Operation, operands: OperandsRequest) -> ApiResult<web::Json<ResultResponse>> {
    let result = operation.apply(operands.a, operands.b)?;
    Ok(web::Json(ResultResponse { result }))
}

macro_rules! arithmetic_endpoint {
    ($name:ident, $path:literal, $operation:expr, $op_id:literal, $summary:literal) => {
        #[doc = $summary]
        #[utoipa::path(
            post,
            path = $path,
            request_body = OperandsRequest,
            responses(
                (status = 200, description = "Computed result", body = ResultResponse),
                (status = 400, description = "Malformed operands", body = Error),
                (status = 422, description = "Operation cannot be computed", body = Error)
            ),
            tags = ["arithmetic"],
            operation_id = $op_id,
            security([])
        )]
        #[post($path)]
        pub async fn $name(
            payload: web::Json<OperandsRequest>,
        ) -> ApiResult<web::Json<ResultResponse>> {
            apply($operation, payload.into_inner())
        }
    };
}

arithmetic_endpoint!(add, "/add", Operation::Add, "add", "Return `a + b`.");
arithmetic_endpoint!(
    subtract,
    "/subtract",
    Operation::Sub,
    "subtract",
    "Return `a - b`."
);
arithmetic_endpoint!(
    multiply,
    "/multiply",
    Operation::Multiply,
    "multiply",
    "Return `a * b`."
);
arithmetic_endpoint!(
    divide,
    "/divide",
    Operation::Divide,
    "divide",
    "Return `a / b`; a zero divisor is a 422."
);

/// Apply the operation named by `type`.
#[utoipa::path(
    post,
    path = "/compute",
    request_body = TaggedOperandsRequest,
    responses(
        (status = 200, description = "Computed result", body = ResultResponse),
        (status = 400, description = "Malformed request", body = Error),
        (status = 422, description = "Unknown operation or not computable", body = Error)
    ),
    tags = ["arithmetic"],
    operation_id = "compute",
    security([])
)]
#[post("/compute")]
pub async fn compute_tagged(
    payload: web::Json<TaggedOperandsRequest>,
) -> ApiResult<web::Json<ResultResponse>> {
    let request = payload.into_inner();
    let result = compute(&request.operation, request.a, request.b).map_err(Error::from)?;
    Ok(web::Json(ResultResponse { result }))
}
