//! Owner authentication middleware
//!
//! Validates the Bearer token and injects the authenticated user id into
//! request extensions for handlers to pick up via `web::ReqData`.

use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
};
use tracing::info;

use crate::api::jwt::get_jwt_service;
use crate::api::services::ApiResponse;

/// The authenticated caller, as resolved from the access token
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    pub user_id: i64,
}

pub struct AuthMiddleware;

impl AuthMiddleware {
    pub async fn require_auth(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        if req.method() == actix_web::http::Method::OPTIONS {
            // CORS preflight
            return Ok(req.into_response(HttpResponse::NoContent().finish()));
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string());

        if let Some(token) = token {
            match get_jwt_service().validate_access_token(&token) {
                Ok(claims) => {
                    if let Some(user_id) = claims.user_id() {
                        req.extensions_mut().insert(AuthedUser { user_id });
                        return next.call(req).await;
                    }
                    info!("Access token carries a non-numeric subject");
                }
                Err(e) => {
                    info!("Access token validation failed: {}", e);
                }
            }
        }

        Ok(req.into_response(
            HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(ApiResponse {
                    code: 401,
                    data: serde_json::json!({ "error": "Unauthorized: invalid or missing token" }),
                }),
        ))
    }
}
