//! Account entity
//!
//! Authentication and billing state live in external collaborators; this
//! table carries the identity and the plan flag the page service consults.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    /// Plan entitlement (free | pro)
    pub plan: String,
    /// Payment-provider customer identifier
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    /// active | canceled | past_due | none
    pub subscription_status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
