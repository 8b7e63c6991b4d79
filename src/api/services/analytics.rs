//! Analytics endpoints
//!
//! The track endpoint is public (called from rendered pages); the dashboard
//! reads and the reconcile operation require the owner token.

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use serde::Deserialize;

use crate::api::middleware::AuthedUser;
use crate::services::{AnalyticsService, TrackRequest, TrackerService};

use super::{api_result, header_str};

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<u32>,
}

pub struct AnalyticsApi;

impl AnalyticsApi {
    /// POST /api/analytics/track/{username} (public)
    pub async fn track(
        req: HttpRequest,
        path: web::Path<String>,
        body: web::Json<TrackRequest>,
        tracker: web::Data<TrackerService>,
    ) -> ActixResult<impl Responder> {
        let username = path.into_inner();
        let user_agent = header_str(&req, "User-Agent");

        let result = tracker
            .track(&username, body.into_inner(), &user_agent)
            .await
            .map(|_| serde_json::json!({ "tracked": true }));
        Ok(api_result(result))
    }

    pub async fn summary(
        user: web::ReqData<AuthedUser>,
        analytics: web::Data<AnalyticsService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(analytics.summary(user.user_id).await))
    }

    pub async fn detailed(
        user: web::ReqData<AuthedUser>,
        query: web::Query<WindowQuery>,
        analytics: web::Data<AnalyticsService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(analytics.detailed(user.user_id, query.days).await))
    }

    pub async fn reconcile(
        user: web::ReqData<AuthedUser>,
        analytics: web::Data<AnalyticsService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(analytics.reconcile(user.user_id).await))
    }
}
