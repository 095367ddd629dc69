//! HTTP inbound adapter exposing REST endpoints.

pub mod arithmetic;
pub mod auth;
pub mod calculations;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every API route except the health probes, which carry their
/// own state.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register_user)
        .service(users::login_user)
        .service(users::current_user)
        .service(users::auth_register)
        .service(users::auth_login)
        .service(calculations::create_calculation)
        .service(calculations::list_calculations)
        .service(calculations::get_calculation)
        .service(calculations::update_calculation)
        .service(calculations::delete_calculation)
        .service(arithmetic::add)
        .service(arithmetic::subtract)
        .service(arithmetic::multiply)
        .service(arithmetic::divide)
        .service(arithmetic::compute_tagged);
}
