//! Analytics aggregation
//!
//! Pure derivations over a page's links and its event log. The service
//! layer fetches the rows; everything here is deterministic and yields
//! empty/zeroed structures (never errors) for empty inputs.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::core::types::{Device, EventType};
use crate::storage::models::{AnalyticsEvent, Link, Page};

const TOP_LINK_LIMIT: usize = 5;
const TOP_REFERRER_LIMIT: usize = 5;

/// Referrer value recorded when a visitor arrived without one; excluded
/// from the referrer ranking but counted in totals
pub const DIRECT_REFERRER: &str = "direct";

#[derive(Debug, Clone, Serialize)]
pub struct TopLink {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub clicks: u64,
}

/// All-time page statistics, served from the denormalized counters
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total_views: u64,
    pub total_clicks: u64,
    pub total_links: usize,
    pub active_links: usize,
    pub top_links: Vec<TopLink>,
    /// clicks / views * 100, rounded to 2 decimal places; 0 when no views
    pub click_through_rate: f64,
}

pub fn summarize(page: &Page, links: &[Link]) -> SummaryStats {
    let total_clicks: u64 = links.iter().map(|l| l.clicks).sum();
    let active_links = links.iter().filter(|l| l.is_active).count();

    // Stable sort keeps the original link order for equal click counts
    let mut active: Vec<&Link> = links.iter().filter(|l| l.is_active).collect();
    active.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    let top_links = active
        .into_iter()
        .take(TOP_LINK_LIMIT)
        .map(|l| TopLink {
            id: l.id,
            title: l.title.clone(),
            url: l.url.clone(),
            clicks: l.clicks,
        })
        .collect();

    let click_through_rate = if page.views > 0 {
        let ctr = total_clicks as f64 / page.views as f64 * 100.0;
        (ctr * 100.0).round() / 100.0
    } else {
        0.0
    };

    SummaryStats {
        total_views: page.views,
        total_clicks,
        total_links: links.len(),
        active_links,
        top_links,
        click_through_rate,
    }
}

/// Per-device event counts; every key is always present
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceBreakdown {
    pub mobile: u64,
    pub desktop: u64,
    pub tablet: u64,
    pub unknown: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferrerCount {
    pub referrer: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    /// UTC calendar date, YYYY-MM-DD
    pub date: String,
    pub views: u64,
    pub clicks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkHeat {
    pub link_id: i64,
    pub title: String,
    pub clicks: u64,
}

/// Time-windowed breakdowns derived from the raw event log
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetailedStats {
    pub device_breakdown: DeviceBreakdown,
    pub top_referrers: Vec<ReferrerCount>,
    pub time_series: Vec<DailyPoint>,
    pub link_heatmap: Vec<LinkHeat>,
    pub total_events: u64,
    pub total_views: u64,
    pub total_clicks: u64,
}

pub fn aggregate_window(events: &[AnalyticsEvent]) -> DetailedStats {
    let mut breakdown = DeviceBreakdown::default();
    let mut referrers: HashMap<&str, u64> = HashMap::new();
    // BTreeMap keeps the series sorted ascending by date; dates without
    // events are not synthesized
    let mut daily: BTreeMap<chrono::NaiveDate, (u64, u64)> = BTreeMap::new();
    let mut heat: HashMap<i64, (String, u64)> = HashMap::new();
    let mut total_views = 0u64;
    let mut total_clicks = 0u64;

    for event in events {
        match event.device {
            Device::Mobile => breakdown.mobile += 1,
            Device::Desktop => breakdown.desktop += 1,
            Device::Tablet => breakdown.tablet += 1,
            Device::Unknown => breakdown.unknown += 1,
        }

        if !event.referrer.is_empty() && event.referrer != DIRECT_REFERRER {
            *referrers.entry(event.referrer.as_str()).or_insert(0) += 1;
        }

        let day = daily.entry(event.created_at.date_naive()).or_insert((0, 0));
        match event.event_type {
            EventType::View => {
                total_views += 1;
                day.0 += 1;
            }
            EventType::Click => {
                total_clicks += 1;
                day.1 += 1;

                if let Some(link_id) = event.link_id {
                    let entry = heat.entry(link_id).or_insert_with(|| {
                        let title = event
                            .link_title
                            .clone()
                            .unwrap_or_else(|| "unknown".to_string());
                        (title, 0)
                    });
                    entry.1 += 1;
                }
            }
        }
    }

    let mut top_referrers: Vec<ReferrerCount> = referrers
        .into_iter()
        .map(|(referrer, count)| ReferrerCount {
            referrer: referrer.to_string(),
            count,
        })
        .collect();
    // Ties break on the referrer string for deterministic output
    top_referrers.sort_by(|a, b| b.count.cmp(&a.count).then(a.referrer.cmp(&b.referrer)));
    top_referrers.truncate(TOP_REFERRER_LIMIT);

    let time_series = daily
        .into_iter()
        .map(|(date, (views, clicks))| DailyPoint {
            date: date.format("%Y-%m-%d").to_string(),
            views,
            clicks,
        })
        .collect();

    let mut link_heatmap: Vec<LinkHeat> = heat
        .into_iter()
        .map(|(link_id, (title, clicks))| LinkHeat {
            link_id,
            title,
            clicks,
        })
        .collect();
    link_heatmap.sort_by(|a, b| b.clicks.cmp(&a.clicks).then(a.link_id.cmp(&b.link_id)));

    DetailedStats {
        device_breakdown: breakdown,
        top_referrers,
        time_series,
        link_heatmap,
        total_events: events.len() as u64,
        total_views,
        total_clicks,
    }
}
