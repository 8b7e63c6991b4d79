//! Analytics event entity
//!
//! Append-only log of page views and link clicks. Rows are immutable once
//! written; `link_title` snapshots the title at click time so historic
//! events survive link deletion or rename.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "analytics_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub page_id: i64,
    /// view | click
    pub event_type: String,
    pub link_id: Option<i64>,
    pub link_title: Option<String>,
    /// mobile | tablet | desktop | unknown
    pub device: String,
    pub browser: String,
    pub os: String,
    pub country: String,
    pub city: String,
    /// "direct" when the visitor arrived without a referrer
    #[sea_orm(column_type = "Text")]
    pub referrer: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
