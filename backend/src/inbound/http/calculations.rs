//! Calculation history (BREAD) handlers.
//!
//! Every route requires a bearer token. The result is always computed
//! server-side; a `result` field in the request body is ignored.
//!
//! ```text
//! POST   /calculations       {"a":10,"b":5,"type":"Add"}
//! GET    /calculations?skip=0&limit=100
//! GET    /calculations/{id}
//! PUT    /calculations/{id}  {"a":20,"b":4,"type":"Multiply"}
//! DELETE /calculations/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{PageParams, PageQuery};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Calculation, CalculationId, CalculationInputs, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Operands and operation for create and update.
///
/// `type` is kept as free text so an unknown tag is reported as a 422 with
/// the offending value rather than a generic body error.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CalculationRequest {
    #[schema(example = 10.0)]
    pub a: f64,
    #[schema(example = 5.0)]
    pub b: f64,
    #[serde(rename = "type")]
    #[schema(example = "Add")]
    pub operation: String,
}

impl From<CalculationRequest> for CalculationInputs {
    fn from(value: CalculationRequest) -> Self {
        Self::new(value.a, value.b, value.operation)
    }
}

/// Create a calculation owned by the caller.
#[utoipa::path(
    post,
    path = "/calculations",
    request_body = CalculationRequest,
    responses(
        (status = 201, description = "Calculation stored", body = Calculation),
        (status = 400, description = "Malformed request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 422, description = "Operation cannot be computed", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "createCalculation",
    security(("BearerAuth" = []))
)]
#[post("/calculations")]
pub async fn create_calculation(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CalculationRequest>,
) -> ApiResult<HttpResponse> {
    let owner = caller.user().id().clone();
    let record = state
        .calculations
        .create(payload.into_inner().into(), Some(owner))
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Browse calculations in creation order.
#[utoipa::path(
    get,
    path = "/calculations",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of calculations", body = [Calculation]),
        (status = 400, description = "Invalid paging parameters", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "listCalculations",
    security(("BearerAuth" = []))
)]
#[get("/calculations")]
pub async fn list_calculations(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<Calculation>>> {
    let page = PageParams::from(query.into_inner());
    let records = state.calculations_query.list(page).await?;
    Ok(web::Json(records))
}

/// Read one calculation.
#[utoipa::path(
    get,
    path = "/calculations/{id}",
    params(("id" = i64, Path, description = "Calculation id")),
    responses(
        (status = 200, description = "Calculation", body = Calculation),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such calculation", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "getCalculation",
    security(("BearerAuth" = []))
)]
#[get("/calculations/{id}")]
pub async fn get_calculation(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Calculation>> {
    let id = CalculationId::new(path.into_inner());
    let record = state.calculations_query.get(id).await?;
    Ok(web::Json(record))
}

/// Replace operands and operation; the result is recomputed.
#[utoipa::path(
    put,
    path = "/calculations/{id}",
    params(("id" = i64, Path, description = "Calculation id")),
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Updated calculation", body = Calculation),
        (status = 400, description = "Malformed request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such calculation", body = Error),
        (status = 422, description = "Operation cannot be computed", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "updateCalculation",
    security(("BearerAuth" = []))
)]
#[put("/calculations/{id}")]
pub async fn update_calculation(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<CalculationRequest>,
) -> ApiResult<web::Json<Calculation>> {
    let id = CalculationId::new(path.into_inner());
    let record = state
        .calculations
        .update(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(record))
}

/// Delete a calculation permanently.
#[utoipa::path(
    delete,
    path = "/calculations/{id}",
    params(("id" = i64, Path, description = "Calculation id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such calculation", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "deleteCalculation",
    security(("BearerAuth" = []))
)]
#[delete("/calculations/{id}")]
pub async fn delete_calculation(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .calculations
        .delete(CalculationId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "calculations_tests.rs"]
mod tests;
