//! Page endpoints
//!
//! Public render path plus the authenticated editor surface.

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use serde::Deserialize;
use tracing::trace;

use crate::api::middleware::AuthedUser;
use crate::services::PageService;
use crate::storage::{ContentBlockUpdate, LinkUpdate, NewContentBlock, NewLink, PageUpdate};

use super::{api_result, header_str, success_response};

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub link_ids: Vec<i64>,
}

pub struct PageApi;

impl PageApi {
    // ============ Public ============

    pub async fn get_public_page(
        req: HttpRequest,
        path: web::Path<String>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        let username = path.into_inner();
        trace!("Public page requested: {}", username);

        let user_agent = header_str(&req, "User-Agent");
        let referrer = header_str(&req, "Referer");

        Ok(api_result(
            pages.public_page(&username, &user_agent, &referrer).await,
        ))
    }

    pub async fn click_link(
        req: HttpRequest,
        path: web::Path<(String, i64)>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        let (username, link_id) = path.into_inner();

        let user_agent = header_str(&req, "User-Agent");
        let referrer = header_str(&req, "Referer");

        let result = pages
            .click(&username, link_id, &user_agent, &referrer)
            .await
            .map(|url| serde_json::json!({ "url": url }));
        Ok(api_result(result))
    }

    pub async fn get_themes(pages: web::Data<PageService>) -> ActixResult<impl Responder> {
        Ok(success_response(pages.themes()))
    }

    // ============ Owner ============

    pub async fn my_page(
        user: web::ReqData<AuthedUser>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(pages.my_page(user.user_id).await))
    }

    pub async fn update_page(
        user: web::ReqData<AuthedUser>,
        body: web::Json<PageUpdate>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(
            pages.update_page(user.user_id, body.into_inner()).await,
        ))
    }

    pub async fn add_link(
        user: web::ReqData<AuthedUser>,
        body: web::Json<NewLink>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(
            pages.add_link(user.user_id, body.into_inner()).await,
        ))
    }

    pub async fn update_link(
        user: web::ReqData<AuthedUser>,
        path: web::Path<i64>,
        body: web::Json<LinkUpdate>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(
            pages
                .update_link(user.user_id, path.into_inner(), body.into_inner())
                .await,
        ))
    }

    pub async fn delete_link(
        user: web::ReqData<AuthedUser>,
        path: web::Path<i64>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        let result = pages
            .delete_link(user.user_id, path.into_inner())
            .await
            .map(|_| serde_json::json!({ "deleted": true }));
        Ok(api_result(result))
    }

    pub async fn reorder_links(
        user: web::ReqData<AuthedUser>,
        body: web::Json<ReorderRequest>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(
            pages
                .reorder_links(user.user_id, body.into_inner().link_ids)
                .await,
        ))
    }

    pub async fn add_block(
        user: web::ReqData<AuthedUser>,
        body: web::Json<NewContentBlock>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(
            pages.add_block(user.user_id, body.into_inner()).await,
        ))
    }

    pub async fn update_block(
        user: web::ReqData<AuthedUser>,
        path: web::Path<i64>,
        body: web::Json<ContentBlockUpdate>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        Ok(api_result(
            pages
                .update_block(user.user_id, path.into_inner(), body.into_inner())
                .await,
        ))
    }

    pub async fn delete_block(
        user: web::ReqData<AuthedUser>,
        path: web::Path<i64>,
        pages: web::Data<PageService>,
    ) -> ActixResult<impl Responder> {
        let result = pages
            .delete_block(user.user_id, path.into_inner())
            .await
            .map(|_| serde_json::json!({ "deleted": true }));
        Ok(api_result(result))
    }
}
