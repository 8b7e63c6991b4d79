//! Link entity
//!
//! Child rows of a page; `sort_order` drives render sequence inside a
//! position bucket, `clicks` is the denormalized click counter.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub page_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub icon: String,
    pub icon_only: bool,
    /// Bounded 30-100 at the mutation layer
    pub icon_size: i32,
    /// top | main | bottom
    pub position: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub clicks: i64,
    pub schedule_enabled: bool,
    pub schedule_start: Option<DateTimeUtc>,
    pub schedule_end: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id"
    )]
    Page,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
