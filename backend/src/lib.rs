//! Calculator service library.
//!
//! - [`domain`]: operations, calculation records, accounts and the ports
//!   adapters plug into.
//! - [`inbound`]: Actix Web handlers.
//! - [`outbound`]: Diesel repositories, migrations, bcrypt and JWT adapters.
//! - [`middleware`]: request trace identifiers.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
