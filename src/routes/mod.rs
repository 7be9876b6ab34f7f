//! HTTP handlers mounted under `/api`.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};

use crate::dto::api::ErrorResponse;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

pub mod diagnostics;
pub mod inquiries;
pub mod packages;

/// Status and body describing a failed service call.
///
/// Internal details are attached only when `development` is set.
pub fn error_body(err: &ServiceError, development: bool) -> (StatusCode, ErrorResponse) {
    match err {
        ServiceError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorResponse::new(*message)),
        ServiceError::Form(_) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Invalid request").with_errors(err.field_errors()),
        ),
        ServiceError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Internal server error")
                .with_detail(development.then(|| err.to_string())),
        ),
    }
}

pub fn error_response(err: &ServiceError, development: bool) -> HttpResponse {
    let (status, body) = error_body(err, development);
    HttpResponse::build(status).json(body)
}

/// Marks a response as never cacheable.
pub(crate) fn no_cache(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder
        .insert_header((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
        .insert_header((header::PRAGMA, "no-cache"))
        .insert_header((header::EXPIRES, "0"));
    builder
}

fn is_development(req: &HttpRequest) -> bool {
    req.app_data::<web::Data<ServerConfig>>()
        .is_some_and(|config| config.is_development())
}

/// Turns malformed JSON bodies into the standard 400 error body.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {err}");
    let body = ErrorResponse::new("Invalid request body")
        .with_detail(is_development(req).then(|| err.to_string()));
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Turns malformed query strings into the standard 400 error body.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected query string: {err}");
    let body = ErrorResponse::new("Invalid query parameters")
        .with_detail(is_development(req).then(|| err.to_string()));
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
