//! Shared validation helpers for inbound HTTP adapters.
//!
//! Actix rejects malformed JSON bodies, query strings and path segments
//! before a handler runs. The extractor configs here turn those rejections
//! into `invalid_request` bodies so every 400 has the same shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{CredentialValidationError, Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    InvalidQuery,
    InvalidPath,
    EmptyIdentifier,
    EmptyPassword,
    PasswordLength,
    InvalidEmail,
    EmailLength,
    UsernameLength,
    UsernameInvalidCharacters,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::EmptyIdentifier => "empty_identifier",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::PasswordLength => "password_length",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::EmailLength => "email_length",
            ErrorCode::UsernameLength => "username_length",
            ErrorCode::UsernameInvalidCharacters => "username_invalid_characters",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

fn request_error(message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

fn field_error(field: &str, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    request_error(message, ErrorCode::InvalidJson).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    request_error(
        format!("invalid query parameters: {err}"),
        ErrorCode::InvalidQuery,
    )
    .into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    request_error(format!("invalid path parameter: {err}"), ErrorCode::InvalidPath).into()
}

/// JSON body extractor config producing `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Query string extractor config producing `invalid_request` errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Path segment extractor config producing `invalid_request` errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

fn user_code(err: &UserValidationError) -> ErrorCode {
    match err {
        UserValidationError::InvalidId => ErrorCode::InvalidId,
        UserValidationError::EmailLength { .. } => ErrorCode::EmailLength,
        UserValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        UserValidationError::UsernameLength { .. } => ErrorCode::UsernameLength,
        UserValidationError::UsernameInvalidCharacters => ErrorCode::UsernameInvalidCharacters,
    }
}

/// Map credential payload validation failures to a 400 with field details.
pub(crate) fn credential_error(err: CredentialValidationError) -> Error {
    let code = match &err {
        CredentialValidationError::EmptyIdentifier => ErrorCode::EmptyIdentifier,
        CredentialValidationError::EmptyPassword => ErrorCode::EmptyPassword,
        CredentialValidationError::PasswordLength { .. } => ErrorCode::PasswordLength,
        CredentialValidationError::User(inner) => user_code(inner),
    };
    field_error(err.field(), err.to_string(), code)
}
