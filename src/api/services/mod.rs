//! HTTP handler layer
//!
//! Thin actix handlers over the service layer, all responding with the
//! `ApiResponse { code, data }` envelope: code 0 on success, the HTTP
//! status code on errors.

mod analytics;
mod pages;

pub use analytics::AnalyticsApi;
pub use pages::PageApi;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::errors::MyLinksError;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse { code: 0, data })
}

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: status.as_u16() as i32,
            data: serde_json::json!({ "error": message }),
        })
}

pub fn error_from_mylinks(err: &MyLinksError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// Unified Result -> HttpResponse conversion
pub fn api_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_mylinks(&e),
    }
}

/// Header value as a string, empty when missing or non-UTF-8
pub fn header_str(req: &HttpRequest, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
