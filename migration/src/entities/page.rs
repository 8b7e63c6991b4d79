//! Page entity
//!
//! One public profile page per user. Appearance columns are stored as plain
//! strings and resolved into closed enums at the storage boundary.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Public slug, stored lowercase, globally unique
    #[sea_orm(unique)]
    pub username: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub avatar: String,
    pub cover_image: String,
    pub theme: String,
    pub button_style: String,
    pub font: String,
    pub custom_background: Option<String>,
    pub custom_text: Option<String>,
    pub custom_button: Option<String>,
    pub custom_button_text: Option<String>,
    pub gradient_start: Option<String>,
    pub gradient_end: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub background_image: Option<String>,
    pub background_fit: String,
    pub button_animation: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_image: Option<String>,
    pub is_published: bool,
    /// Denormalized view counter; the analytics_events table is authoritative
    pub views: i64,
    pub social_twitter: Option<String>,
    pub social_instagram: Option<String>,
    pub social_facebook: Option<String>,
    pub social_youtube: Option<String>,
    pub social_tiktok: Option<String>,
    pub social_linkedin: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::link::Entity")]
    Link,
    #[sea_orm(has_many = "super::content_block::Entity")]
    ContentBlock,
}

impl Related<super::link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Link.def()
    }
}

impl Related<super::content_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentBlock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
