//! Page, link and content block operations
//!
//! All child-row mutations are scoped by `page_id`, so ownership checks done
//! at the service layer cannot be bypassed by guessing row ids.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, sea_query::Expr,
};
use tracing::info;

use super::converters::{
    clamp_icon_size, model_to_block, model_to_link, model_to_page, model_to_user,
};
use super::{SeaOrmStorage, retry};
use crate::core::types::{
    BackgroundFit, BlockLayout, ButtonAnimation, ButtonStyle, Font, Icon, LinkPosition, Theme,
    parse_or_default,
};
use crate::errors::{MyLinksError, Result};
use crate::storage::models::{
    ContentBlock, ContentBlockUpdate, Link, LinkUpdate, NewContentBlock, NewLink, Page, PageBundle,
    PageUpdate, User,
};

use migration::entities::{content_block, link, page, user};

impl SeaOrmStorage {
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_user({})", user_id),
            self.retry_config,
            || async { user::Entity::find_by_id(user_id).one(db).await },
        )
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to load user: {}", e)))?;

        model
            .map(model_to_user)
            .ok_or_else(|| MyLinksError::not_found(format!("User not found: {}", user_id)))
    }

    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        display_name: &str,
    ) -> Result<User> {
        let model = user::ActiveModel {
            email: Set(email.to_lowercase()),
            username: Set(username.to_lowercase()),
            password_hash: Set(password_hash.to_string()),
            display_name: Set(display_name.to_string()),
            plan: Set("free".to_string()),
            customer_id: Set(None),
            subscription_id: Set(None),
            subscription_status: Set("none".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to create user: {}", e)))?;

        info!("User created: {}", model.username);
        Ok(model_to_user(model))
    }

    /// Create the page shell for a fresh account, with default appearance
    pub async fn create_page(&self, user_id: i64, username: &str) -> Result<Page> {
        let now = Utc::now();
        let model = page::ActiveModel {
            user_id: Set(user_id),
            username: Set(username.to_lowercase()),
            title: Set("My Links".to_string()),
            bio: Set(String::new()),
            avatar: Set(String::new()),
            cover_image: Set(String::new()),
            theme: Set(Theme::Default.to_string()),
            button_style: Set(ButtonStyle::Rounded.to_string()),
            font: Set(Font::System.to_string()),
            custom_background: Set(None),
            custom_text: Set(None),
            custom_button: Set(None),
            custom_button_text: Set(None),
            gradient_start: Set(None),
            gradient_end: Set(None),
            background_image: Set(None),
            background_fit: Set(BackgroundFit::Cover.to_string()),
            button_animation: Set(ButtonAnimation::None.to_string()),
            seo_title: Set(None),
            seo_description: Set(None),
            seo_image: Set(None),
            is_published: Set(true),
            views: Set(0),
            social_twitter: Set(None),
            social_instagram: Set(None),
            social_facebook: Set(None),
            social_youtube: Set(None),
            social_tiktok: Set(None),
            social_linkedin: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to create page: {}", e)))?;

        info!("Page created: {}", model.username);
        Ok(model_to_page(model))
    }

    pub async fn get_page_by_user(&self, user_id: i64) -> Result<Page> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_page_by_user({})", user_id),
            self.retry_config,
            || async {
                page::Entity::find()
                    .filter(page::Column::UserId.eq(user_id))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to load page: {}", e)))?;

        model
            .map(model_to_page)
            .ok_or_else(|| MyLinksError::not_found(format!("Page not found for user {}", user_id)))
    }

    pub async fn get_page_by_username(&self, username: &str) -> Result<Option<Page>> {
        let db = &self.db;
        let slug = username.to_lowercase();

        let model = retry::with_retry(
            &format!("get_page_by_username({})", slug),
            self.retry_config,
            || async {
                page::Entity::find()
                    .filter(page::Column::Username.eq(slug.as_str()))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to load page: {}", e)))?;

        Ok(model.map(model_to_page))
    }

    /// Page plus children, read through the short-TTL bundle cache
    pub async fn get_page_bundle(&self, username: &str) -> Result<Option<Arc<PageBundle>>> {
        let slug = username.to_lowercase();
        if let Some(bundle) = self.page_cache.get(&slug) {
            return Ok(Some(bundle));
        }

        let Some(page) = self.get_page_by_username(&slug).await? else {
            return Ok(None);
        };
        let links = self.get_links(page.id).await?;
        let blocks = self.get_blocks(page.id).await?;

        let bundle = Arc::new(PageBundle {
            page,
            links,
            blocks,
        });
        self.page_cache.insert(slug, bundle.clone());
        Ok(Some(bundle))
    }

    pub async fn get_links(&self, page_id: i64) -> Result<Vec<Link>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("get_links({})", page_id),
            self.retry_config,
            || async {
                link::Entity::find()
                    .filter(link::Column::PageId.eq(page_id))
                    .order_by_asc(link::Column::SortOrder)
                    .order_by_asc(link::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to load links: {}", e)))?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    pub async fn get_blocks(&self, page_id: i64) -> Result<Vec<ContentBlock>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("get_blocks({})", page_id),
            self.retry_config,
            || async {
                content_block::Entity::find()
                    .filter(content_block::Column::PageId.eq(page_id))
                    .order_by_asc(content_block::Column::SortOrder)
                    .order_by_asc(content_block::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to load blocks: {}", e)))?;

        Ok(models.into_iter().map(model_to_block).collect())
    }

    /// Apply a partial update; enum-ish fields are canonicalized before
    /// hitting the row
    pub async fn update_page(&self, page_id: i64, update: PageUpdate) -> Result<Page> {
        let model = page::Entity::find_by_id(page_id)
            .one(&self.db)
            .await
            .map_err(|e| MyLinksError::database_operation(format!("Failed to load page: {}", e)))?
            .ok_or_else(|| MyLinksError::not_found(format!("Page not found: {}", page_id)))?;

        let username = model.username.clone();
        let mut am: page::ActiveModel = model.into();

        if let Some(title) = update.title {
            am.title = Set(title);
        }
        if let Some(bio) = update.bio {
            am.bio = Set(bio);
        }
        if let Some(avatar) = update.avatar {
            am.avatar = Set(avatar);
        }
        if let Some(cover_image) = update.cover_image {
            am.cover_image = Set(cover_image);
        }
        if let Some(theme) = update.theme {
            am.theme = Set(parse_or_default::<Theme>(&theme).to_string());
        }
        if let Some(style) = update.button_style {
            am.button_style = Set(parse_or_default::<ButtonStyle>(&style).to_string());
        }
        if let Some(font) = update.font {
            am.font = Set(parse_or_default::<Font>(&font).to_string());
        }
        if let Some(colors) = update.custom_colors {
            am.custom_background = Set(colors.background);
            am.custom_text = Set(colors.text);
            am.custom_button = Set(colors.button);
            am.custom_button_text = Set(colors.button_text);
            am.gradient_start = Set(colors.gradient_start);
            am.gradient_end = Set(colors.gradient_end);
        }
        if let Some(image) = update.background_image {
            am.background_image = Set(image);
        }
        if let Some(fit) = update.background_fit {
            am.background_fit = Set(parse_or_default::<BackgroundFit>(&fit).to_string());
        }
        if let Some(animation) = update.button_animation {
            am.button_animation = Set(parse_or_default::<ButtonAnimation>(&animation).to_string());
        }
        if let Some(seo) = update.seo {
            am.seo_title = Set(seo.title);
            am.seo_description = Set(seo.description);
            am.seo_image = Set(seo.image);
        }
        if let Some(published) = update.is_published {
            am.is_published = Set(published);
        }
        if let Some(social) = update.social_links {
            am.social_twitter = Set(social.twitter);
            am.social_instagram = Set(social.instagram);
            am.social_facebook = Set(social.facebook);
            am.social_youtube = Set(social.youtube);
            am.social_tiktok = Set(social.tiktok);
            am.social_linkedin = Set(social.linkedin);
        }
        am.updated_at = Set(Utc::now());

        let model = am.update(&self.db).await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to update page: {}", e))
        })?;

        self.invalidate_page_cache(&username);
        Ok(model_to_page(model))
    }

    pub async fn add_link(&self, page_id: i64, new: NewLink) -> Result<Link> {
        let next_order = self.next_sort_order(page_id).await?;

        let model = link::ActiveModel {
            page_id: Set(page_id),
            title: Set(new.title),
            url: Set(new.url),
            icon: Set(new
                .icon
                .map(|i| Icon::resolve(&i).to_string())
                .unwrap_or_else(|| Icon::Link.to_string())),
            icon_only: Set(new.icon_only.unwrap_or(false)),
            icon_size: Set(clamp_icon_size(new.icon_size.unwrap_or(50))),
            position: Set(new
                .position
                .map(|p| parse_or_default::<LinkPosition>(&p).to_string())
                .unwrap_or_else(|| LinkPosition::Main.to_string())),
            is_active: Set(true),
            sort_order: Set(next_order),
            clicks: Set(0),
            schedule_enabled: Set(false),
            schedule_start: Set(None),
            schedule_end: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to add link: {}", e)))?;

        Ok(model_to_link(model))
    }

    pub async fn update_link(&self, page_id: i64, link_id: i64, update: LinkUpdate) -> Result<Link> {
        let model = link::Entity::find_by_id(link_id)
            .filter(link::Column::PageId.eq(page_id))
            .one(&self.db)
            .await
            .map_err(|e| MyLinksError::database_operation(format!("Failed to load link: {}", e)))?
            .ok_or_else(|| MyLinksError::not_found(format!("Link not found: {}", link_id)))?;

        let mut am: link::ActiveModel = model.into();

        if let Some(title) = update.title {
            am.title = Set(title);
        }
        if let Some(url) = update.url {
            am.url = Set(url);
        }
        if let Some(icon) = update.icon {
            am.icon = Set(Icon::resolve(&icon).to_string());
        }
        if let Some(icon_only) = update.icon_only {
            am.icon_only = Set(icon_only);
        }
        if let Some(size) = update.icon_size {
            am.icon_size = Set(clamp_icon_size(size));
        }
        if let Some(position) = update.position {
            am.position = Set(parse_or_default::<LinkPosition>(&position).to_string());
        }
        if let Some(active) = update.is_active {
            am.is_active = Set(active);
        }
        if let Some(schedule) = update.schedule {
            am.schedule_enabled = Set(schedule.enabled);
            am.schedule_start = Set(schedule.start);
            am.schedule_end = Set(schedule.end);
        }

        let model = am.update(&self.db).await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to update link: {}", e))
        })?;

        Ok(model_to_link(model))
    }

    pub async fn delete_link(&self, page_id: i64, link_id: i64) -> Result<()> {
        let result = link::Entity::delete_many()
            .filter(link::Column::Id.eq(link_id))
            .filter(link::Column::PageId.eq(page_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to delete link: {}", e))
            })?;

        if result.rows_affected == 0 {
            return Err(MyLinksError::not_found(format!(
                "Link not found: {}",
                link_id
            )));
        }

        info!("Link deleted: {}", link_id);
        Ok(())
    }

    /// Assign `sort_order` from list position; links absent from the list
    /// keep their current order. Runs in a transaction so a partial reorder
    /// never becomes visible.
    pub async fn reorder_links(&self, page_id: i64, ordered_ids: &[i64]) -> Result<Vec<Link>> {
        let txn = self.db.begin().await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        for (index, link_id) in ordered_ids.iter().enumerate() {
            link::Entity::update_many()
                .col_expr(link::Column::SortOrder, Expr::value(index as i32))
                .filter(link::Column::Id.eq(*link_id))
                .filter(link::Column::PageId.eq(page_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    MyLinksError::database_operation(format!("Failed to reorder links: {}", e))
                })?;
        }

        txn.commit().await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to commit transaction: {}", e))
        })?;

        self.get_links(page_id).await
    }

    pub async fn add_block(&self, page_id: i64, new: NewContentBlock) -> Result<ContentBlock> {
        let next_order = self.next_block_order(page_id).await?;

        let model = content_block::ActiveModel {
            page_id: Set(page_id),
            title: Set(new.title),
            description: Set(new.description.unwrap_or_default()),
            image: Set(new.image.unwrap_or_default()),
            link_url: Set(new.link_url),
            background_color: Set(new.background_color.unwrap_or_else(|| "#ffffff".to_string())),
            text_color: Set(new.text_color.unwrap_or_else(|| "#000000".to_string())),
            layout: Set(new
                .layout
                .map(|l| parse_or_default::<BlockLayout>(&l).to_string())
                .unwrap_or_else(|| BlockLayout::Full.to_string())),
            is_active: Set(true),
            sort_order: Set(next_order),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| MyLinksError::database_operation(format!("Failed to add block: {}", e)))?;

        Ok(model_to_block(model))
    }

    pub async fn update_block(
        &self,
        page_id: i64,
        block_id: i64,
        update: ContentBlockUpdate,
    ) -> Result<ContentBlock> {
        let model = content_block::Entity::find_by_id(block_id)
            .filter(content_block::Column::PageId.eq(page_id))
            .one(&self.db)
            .await
            .map_err(|e| MyLinksError::database_operation(format!("Failed to load block: {}", e)))?
            .ok_or_else(|| MyLinksError::not_found(format!("Block not found: {}", block_id)))?;

        let mut am: content_block::ActiveModel = model.into();

        if let Some(title) = update.title {
            am.title = Set(title);
        }
        if let Some(description) = update.description {
            am.description = Set(description);
        }
        if let Some(image) = update.image {
            am.image = Set(image);
        }
        if let Some(link_url) = update.link_url {
            am.link_url = Set(link_url);
        }
        if let Some(background_color) = update.background_color {
            am.background_color = Set(background_color);
        }
        if let Some(text_color) = update.text_color {
            am.text_color = Set(text_color);
        }
        if let Some(layout) = update.layout {
            am.layout = Set(parse_or_default::<BlockLayout>(&layout).to_string());
        }
        if let Some(active) = update.is_active {
            am.is_active = Set(active);
        }

        let model = am.update(&self.db).await.map_err(|e| {
            MyLinksError::database_operation(format!("Failed to update block: {}", e))
        })?;

        Ok(model_to_block(model))
    }

    pub async fn delete_block(&self, page_id: i64, block_id: i64) -> Result<()> {
        let result = content_block::Entity::delete_many()
            .filter(content_block::Column::Id.eq(block_id))
            .filter(content_block::Column::PageId.eq(page_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to delete block: {}", e))
            })?;

        if result.rows_affected == 0 {
            return Err(MyLinksError::not_found(format!(
                "Block not found: {}",
                block_id
            )));
        }

        Ok(())
    }

    async fn next_sort_order(&self, page_id: i64) -> Result<i32> {
        let max: Option<Option<i32>> = link::Entity::find()
            .filter(link::Column::PageId.eq(page_id))
            .select_only()
            .column_as(link::Column::SortOrder.max(), "max_order")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to compute sort order: {}", e))
            })?;

        Ok(max.flatten().map_or(0, |m| m + 1))
    }

    async fn next_block_order(&self, page_id: i64) -> Result<i32> {
        let max: Option<Option<i32>> = content_block::Entity::find()
            .filter(content_block::Column::PageId.eq(page_id))
            .select_only()
            .column_as(content_block::Column::SortOrder.max(), "max_order")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| {
                MyLinksError::database_operation(format!("Failed to compute sort order: {}", e))
            })?;

        Ok(max.flatten().map_or(0, |m| m + 1))
    }
}
