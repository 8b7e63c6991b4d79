pub mod analytics_event;
pub mod content_block;
pub mod link;
pub mod page;
pub mod user;

pub use analytics_event::Entity as AnalyticsEventEntity;
pub use content_block::Entity as ContentBlockEntity;
pub use link::Entity as LinkEntity;
pub use page::Entity as PageEntity;
pub use user::Entity as UserEntity;
