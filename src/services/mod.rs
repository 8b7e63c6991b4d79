//! Service layer for business logic
//!
//! Handlers stay thin; everything the HTTP surface does goes through these
//! services so the behavior is testable without actix.

mod analytics_service;
mod page_service;
mod tracker;

pub use analytics_service::AnalyticsService;
pub use page_service::{PageService, PublicPageView, ThemeListing};
pub use tracker::{TrackRequest, TrackerService};
