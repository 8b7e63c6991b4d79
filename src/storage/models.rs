//! Domain models
//!
//! These are the decoded forms of the database rows: enum-ish columns are
//! already resolved into the closed enums from `core::types`, so everything
//! downstream (resolvers, assembler, aggregator) works on typed data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{
    BackgroundFit, BlockLayout, ButtonAnimation, ButtonStyle, Device, EventType, Font, Icon,
    LinkPosition, Plan, Theme,
};

/// Optional time-window gate on a link's visibility
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub enabled: bool,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub icon: Icon,
    pub icon_only: bool,
    pub icon_size: i32,
    pub position: LinkPosition,
    pub is_active: bool,
    pub sort_order: i32,
    /// Denormalized click counter; the event log is authoritative
    pub clicks: u64,
    pub schedule: Schedule,
}

/// Per-page color overrides; unset fields inherit the theme preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomColors {
    pub background: Option<String>,
    pub text: Option<String>,
    pub button: Option<String>,
    pub button_text: Option<String>,
    pub gradient_start: Option<String>,
    pub gradient_end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub title: String,
    pub bio: String,
    pub avatar: String,
    pub cover_image: String,
    pub theme: Theme,
    pub button_style: ButtonStyle,
    pub font: Font,
    pub custom_colors: CustomColors,
    pub background_image: Option<String>,
    pub background_fit: BackgroundFit,
    pub button_animation: ButtonAnimation,
    pub seo: SeoMeta,
    pub is_published: bool,
    /// Denormalized view counter; the event log is authoritative
    pub views: u64,
    pub social_links: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link_url: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub layout: BlockLayout,
    pub is_active: bool,
    pub sort_order: i32,
}

/// One immutable view/click record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub id: i64,
    pub page_id: i64,
    pub event_type: EventType,
    pub link_id: Option<i64>,
    /// Title snapshot at click time; survives link deletion/rename
    pub link_title: Option<String>,
    pub device: Device,
    pub browser: String,
    pub os: String,
    pub country: String,
    pub city: String,
    pub referrer: String,
    pub created_at: DateTime<Utc>,
}

/// Account projection carried for entitlement checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub plan: Plan,
    pub subscription_status: String,
}

/// A page plus its child rows, fetched together for rendering
#[derive(Debug, Clone, Serialize)]
pub struct PageBundle {
    pub page: Page,
    pub links: Vec<Link>,
    pub blocks: Vec<ContentBlock>,
}

/// Partial page update; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub theme: Option<String>,
    pub button_style: Option<String>,
    pub font: Option<String>,
    pub custom_colors: Option<CustomColors>,
    pub background_image: Option<Option<String>>,
    pub background_fit: Option<String>,
    pub button_animation: Option<String>,
    pub seo: Option<SeoMeta>,
    pub is_published: Option<bool>,
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub icon_only: Option<bool>,
    pub icon_size: Option<i32>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub icon_only: Option<bool>,
    pub icon_size: Option<i32>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
    pub schedule: Option<Schedule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContentBlock {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub layout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlockUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link_url: Option<Option<String>>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub layout: Option<String>,
    pub is_active: Option<bool>,
}

/// Counters recomputed from the event log
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RecountSummary {
    pub views: u64,
    pub total_clicks: u64,
    pub links_updated: usize,
}

/// One event to append to the log
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub page_id: i64,
    pub event_type: EventType,
    pub link_id: Option<i64>,
    pub link_title: Option<String>,
    pub device: Device,
    pub referrer: String,
    pub created_at: DateTime<Utc>,
}
