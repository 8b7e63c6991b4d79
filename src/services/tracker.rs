//! Event tracker
//!
//! Every tracked action follows the same path: append an immutable row to
//! the event log, then buffer the matching counter increment. Counters are
//! therefore always a (possibly lagging) cache of the log.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::analytics::{CounterKey, CounterManager};
use crate::core::classify_device;
use crate::core::types::EventType;
use crate::errors::{MyLinksError, Result};
use crate::storage::{NewEvent, SeaOrmStorage};

pub const DIRECT_REFERRER: &str = "direct";

/// One tracking call, as posted by the public page
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRequest {
    #[serde(rename = "type")]
    pub event_type: String,
    pub link_id: Option<i64>,
    #[serde(default)]
    pub referrer: String,
}

pub struct TrackerService {
    storage: Arc<SeaOrmStorage>,
    counters: CounterManager,
}

impl TrackerService {
    pub fn new(storage: Arc<SeaOrmStorage>, counters: CounterManager) -> Self {
        Self { storage, counters }
    }

    /// Record one event against a page, identified by its public username
    pub async fn track(
        &self,
        username: &str,
        request: TrackRequest,
        user_agent: &str,
    ) -> Result<()> {
        let event_type: EventType = request.event_type.parse().map_err(|_| {
            MyLinksError::validation(format!("Unknown event type: {}", request.event_type))
        })?;

        let page = self
            .storage
            .get_page_by_username(username)
            .await?
            .ok_or_else(|| MyLinksError::not_found(format!("Page not found: {}", username)))?;

        // Clicks must name a link that actually belongs to this page; the
        // title is snapshotted from the owned row, never from the caller
        let clicked = match event_type {
            EventType::Click => {
                let link_id = request.link_id.ok_or_else(|| {
                    MyLinksError::validation("Click events require a link_id".to_string())
                })?;
                let links = self.storage.get_links(page.id).await?;
                let link = links.into_iter().find(|l| l.id == link_id).ok_or_else(|| {
                    MyLinksError::not_found(format!(
                        "Link not found on page '{}': {}",
                        username, link_id
                    ))
                })?;
                Some(link)
            }
            EventType::View => None,
        };

        let referrer = match request.referrer.trim() {
            "" => DIRECT_REFERRER.to_string(),
            other => other.to_string(),
        };

        self.storage
            .insert_event(NewEvent {
                page_id: page.id,
                event_type,
                link_id: clicked.as_ref().map(|l| l.id),
                link_title: clicked.as_ref().map(|l| l.title.clone()),
                device: classify_device(user_agent),
                referrer,
                created_at: Utc::now(),
            })
            .await?;

        match &clicked {
            Some(link) => self.counters.increment(CounterKey::LinkClick(link.id)),
            None => self.counters.increment(CounterKey::PageView(page.id)),
        }

        info!(
            "Tracked {} event for page '{}' (link: {:?})",
            event_type, username, request.link_id
        );
        Ok(())
    }
}
