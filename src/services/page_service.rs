//! Page management service
//!
//! Owner-side CRUD plus the public render path. All child-row operations
//! resolve the caller's page first, so a user can only ever touch rows under
//! their own page.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::types::{Plan, Theme};
use crate::core::{AssembledPage, RenderStyle, ThemePreset, all_presets, assemble, resolve_style};
use crate::errors::{MyLinksError, Result};
use crate::services::tracker::{TrackRequest, TrackerService};
use crate::storage::{
    ContentBlock, ContentBlockUpdate, Link, LinkUpdate, NewContentBlock, NewLink, Page,
    PageBundle, PageUpdate, SeaOrmStorage,
};
use crate::utils::validate_url;

/// Everything a visitor needs to render a published page
#[derive(Debug, Serialize)]
pub struct PublicPageView {
    pub username: String,
    pub title: String,
    pub bio: String,
    pub avatar: String,
    pub cover_image: String,
    pub seo: crate::storage::SeoMeta,
    pub social_links: crate::storage::SocialLinks,
    pub style: RenderStyle,
    pub content: AssembledPage,
}

/// One entry of the theme preset listing consumed by the editor preview
#[derive(Debug, Serialize)]
pub struct ThemeListing {
    pub name: Theme,
    pub preset: ThemePreset,
}

pub struct PageService {
    storage: Arc<SeaOrmStorage>,
    tracker: Arc<TrackerService>,
}

impl PageService {
    pub fn new(storage: Arc<SeaOrmStorage>, tracker: Arc<TrackerService>) -> Self {
        Self { storage, tracker }
    }

    // ============ Owner operations ============

    pub async fn my_page(&self, user_id: i64) -> Result<PageBundle> {
        let page = self.storage.get_page_by_user(user_id).await?;
        let links = self.storage.get_links(page.id).await?;
        let blocks = self.storage.get_blocks(page.id).await?;
        Ok(PageBundle {
            page,
            links,
            blocks,
        })
    }

    pub async fn update_page(&self, user_id: i64, update: PageUpdate) -> Result<Page> {
        let page = self.storage.get_page_by_user(user_id).await?;
        self.storage.update_page(page.id, update).await
    }

    pub async fn add_link(&self, user_id: i64, new: NewLink) -> Result<Link> {
        validate_url(&new.url).map_err(|e| MyLinksError::validation(e.to_string()))?;
        if new.title.trim().is_empty() {
            return Err(MyLinksError::validation("Link title cannot be empty".to_string()));
        }

        let page = self.storage.get_page_by_user(user_id).await?;
        let link = self.storage.add_link(page.id, new).await?;
        self.storage.invalidate_page_cache(&page.username);
        info!("Link added to page '{}': {}", page.username, link.id);
        Ok(link)
    }

    pub async fn update_link(
        &self,
        user_id: i64,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        if let Some(ref url) = update.url {
            validate_url(url).map_err(|e| MyLinksError::validation(e.to_string()))?;
        }

        let page = self.storage.get_page_by_user(user_id).await?;
        let link = self.storage.update_link(page.id, link_id, update).await?;
        self.storage.invalidate_page_cache(&page.username);
        Ok(link)
    }

    pub async fn delete_link(&self, user_id: i64, link_id: i64) -> Result<()> {
        let page = self.storage.get_page_by_user(user_id).await?;
        self.storage.delete_link(page.id, link_id).await?;
        self.storage.invalidate_page_cache(&page.username);
        Ok(())
    }

    pub async fn reorder_links(&self, user_id: i64, ordered_ids: Vec<i64>) -> Result<Vec<Link>> {
        let page = self.storage.get_page_by_user(user_id).await?;
        let links = self.storage.reorder_links(page.id, &ordered_ids).await?;
        self.storage.invalidate_page_cache(&page.username);
        Ok(links)
    }

    pub async fn add_block(&self, user_id: i64, new: NewContentBlock) -> Result<ContentBlock> {
        self.require_pro(user_id).await?;
        if let Some(ref url) = new.link_url {
            validate_url(url).map_err(|e| MyLinksError::validation(e.to_string()))?;
        }

        let page = self.storage.get_page_by_user(user_id).await?;
        let block = self.storage.add_block(page.id, new).await?;
        self.storage.invalidate_page_cache(&page.username);
        Ok(block)
    }

    pub async fn update_block(
        &self,
        user_id: i64,
        block_id: i64,
        update: ContentBlockUpdate,
    ) -> Result<ContentBlock> {
        self.require_pro(user_id).await?;

        let page = self.storage.get_page_by_user(user_id).await?;
        let block = self.storage.update_block(page.id, block_id, update).await?;
        self.storage.invalidate_page_cache(&page.username);
        Ok(block)
    }

    pub async fn delete_block(&self, user_id: i64, block_id: i64) -> Result<()> {
        self.require_pro(user_id).await?;

        let page = self.storage.get_page_by_user(user_id).await?;
        self.storage.delete_block(page.id, block_id).await?;
        self.storage.invalidate_page_cache(&page.username);
        Ok(())
    }

    async fn require_pro(&self, user_id: i64) -> Result<()> {
        let user = self.storage.get_user(user_id).await?;
        if user.plan != Plan::Pro {
            return Err(MyLinksError::unauthorized(
                "Content blocks require a pro plan".to_string(),
            ));
        }
        Ok(())
    }

    // ============ Visitor operations ============

    /// Fetch a published page for rendering; records a view
    pub async fn public_page(
        &self,
        username: &str,
        user_agent: &str,
        referrer: &str,
    ) -> Result<PublicPageView> {
        let bundle = self
            .storage
            .get_page_bundle(username)
            .await?
            .filter(|b| b.page.is_published)
            .ok_or_else(|| MyLinksError::not_found(format!("Page not found: {}", username)))?;

        // Tracking failure never blocks the render
        if let Err(e) = self
            .tracker
            .track(
                username,
                TrackRequest {
                    event_type: "view".to_string(),
                    link_id: None,
                    referrer: referrer.to_string(),
                },
                user_agent,
            )
            .await
        {
            warn!("Failed to record view for '{}': {}", username, e);
        }

        let page = &bundle.page;
        Ok(PublicPageView {
            username: page.username.clone(),
            title: page.title.clone(),
            bio: page.bio.clone(),
            avatar: page.avatar.clone(),
            cover_image: page.cover_image.clone(),
            seo: page.seo.clone(),
            social_links: page.social_links.clone(),
            style: resolve_style(page),
            content: assemble(&bundle.links, &bundle.blocks, Utc::now()),
        })
    }

    /// Resolve a link click on a published page; records the click and
    /// returns the target URL
    pub async fn click(
        &self,
        username: &str,
        link_id: i64,
        user_agent: &str,
        referrer: &str,
    ) -> Result<String> {
        let bundle = self
            .storage
            .get_page_bundle(username)
            .await?
            .filter(|b| b.page.is_published)
            .ok_or_else(|| MyLinksError::not_found(format!("Page not found: {}", username)))?;

        let link = bundle
            .links
            .iter()
            .find(|l| l.id == link_id)
            .ok_or_else(|| MyLinksError::not_found(format!("Link not found: {}", link_id)))?;

        if let Err(e) = self
            .tracker
            .track(
                username,
                TrackRequest {
                    event_type: "click".to_string(),
                    link_id: Some(link.id),
                    referrer: referrer.to_string(),
                },
                user_agent,
            )
            .await
        {
            warn!("Failed to record click for '{}': {}", username, e);
        }

        Ok(link.url.clone())
    }

    /// The theme preset table, as served to the editor preview
    pub fn themes(&self) -> Vec<ThemeListing> {
        all_presets()
            .into_iter()
            .map(|(name, preset)| ThemeListing { name, preset })
            .collect()
    }
}
