//! Analytics aggregation tests
//!
//! Pure-function coverage of the summary and windowed derivations.

use chrono::{DateTime, TimeZone, Utc};

use mylinks::core::analytics::{aggregate_window, summarize, DIRECT_REFERRER};
use mylinks::core::types::{Device, EventType, Icon, LinkPosition};
use mylinks::storage::{AnalyticsEvent, CustomColors, Link, Page, Schedule, SeoMeta, SocialLinks};

fn page(views: u64) -> Page {
    let now = Utc::now();
    Page {
        id: 1,
        user_id: 1,
        username: "alice".to_string(),
        title: "Alice".to_string(),
        bio: String::new(),
        avatar: String::new(),
        cover_image: String::new(),
        theme: Default::default(),
        button_style: Default::default(),
        font: Default::default(),
        custom_colors: CustomColors::default(),
        background_image: None,
        background_fit: Default::default(),
        button_animation: Default::default(),
        seo: SeoMeta::default(),
        is_published: true,
        views,
        social_links: SocialLinks::default(),
        created_at: now,
        updated_at: now,
    }
}

fn link(id: i64, title: &str, clicks: u64, is_active: bool) -> Link {
    Link {
        id,
        title: title.to_string(),
        url: format!("https://example.com/{}", id),
        icon: Icon::Link,
        icon_only: false,
        icon_size: 50,
        position: LinkPosition::Main,
        is_active,
        sort_order: id as i32,
        clicks,
        schedule: Schedule::default(),
    }
}

fn event(
    event_type: EventType,
    link_id: Option<i64>,
    device: Device,
    referrer: &str,
    at: DateTime<Utc>,
) -> AnalyticsEvent {
    AnalyticsEvent {
        id: 0,
        page_id: 1,
        event_type,
        link_id,
        link_title: link_id.map(|id| format!("link-{}", id)),
        device,
        browser: "unknown".to_string(),
        os: "unknown".to_string(),
        country: "unknown".to_string(),
        city: "unknown".to_string(),
        referrer: referrer.to_string(),
        created_at: at,
    }
}

#[test]
fn ctr_is_zero_without_views() {
    let stats = summarize(&page(0), &[link(1, "a", 100, true)]);
    assert_eq!(stats.total_views, 0);
    assert_eq!(stats.total_clicks, 100);
    assert_eq!(stats.click_through_rate, 0.0);
}

#[test]
fn ctr_rounds_to_two_decimals() {
    // 1 click over 3 views: 33.333... -> 33.33
    let stats = summarize(&page(3), &[link(1, "a", 1, true)]);
    assert_eq!(stats.click_through_rate, 33.33);

    // 3 clicks over 2 views can exceed 100%
    let stats = summarize(&page(2), &[link(1, "a", 3, true)]);
    assert_eq!(stats.click_through_rate, 150.0);
}

#[test]
fn top_links_ordered_and_active_only() {
    let links = vec![
        link(1, "low", 0, true),
        link(2, "high", 10, true),
        link(3, "hidden", 99, false),
        link(4, "mid", 7, true),
    ];
    let stats = summarize(&page(10), &links);

    let titles: Vec<&str> = stats.top_links.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["high", "mid", "low"]);
    // Inactive links still count toward totals
    assert_eq!(stats.total_clicks, 116);
    assert_eq!(stats.total_links, 4);
    assert_eq!(stats.active_links, 3);
}

#[test]
fn top_links_capped_at_five() {
    let links: Vec<Link> = (1..=8).map(|i| link(i, "l", i as u64, true)).collect();
    let stats = summarize(&page(1), &links);
    assert_eq!(stats.top_links.len(), 5);
    assert_eq!(stats.top_links[0].clicks, 8);
}

#[test]
fn empty_inputs_yield_zeroed_summary() {
    let stats = summarize(&page(0), &[]);
    assert_eq!(stats.total_clicks, 0);
    assert_eq!(stats.total_links, 0);
    assert!(stats.top_links.is_empty());
    assert_eq!(stats.click_through_rate, 0.0);
}

#[test]
fn device_breakdown_counts_every_tier() {
    let at = Utc::now();
    let events = vec![
        event(EventType::View, None, Device::Mobile, DIRECT_REFERRER, at),
        event(EventType::View, None, Device::Mobile, DIRECT_REFERRER, at),
        event(EventType::View, None, Device::Desktop, DIRECT_REFERRER, at),
        event(EventType::View, None, Device::Tablet, DIRECT_REFERRER, at),
        event(EventType::Click, Some(1), Device::Unknown, DIRECT_REFERRER, at),
    ];
    let stats = aggregate_window(&events);
    assert_eq!(stats.device_breakdown.mobile, 2);
    assert_eq!(stats.device_breakdown.desktop, 1);
    assert_eq!(stats.device_breakdown.tablet, 1);
    assert_eq!(stats.device_breakdown.unknown, 1);
    assert_eq!(stats.total_events, 5);
}

#[test]
fn direct_referrer_excluded_from_ranking_but_counted() {
    let at = Utc::now();
    let events = vec![
        event(EventType::View, None, Device::Desktop, DIRECT_REFERRER, at),
        event(EventType::View, None, Device::Desktop, DIRECT_REFERRER, at),
        event(EventType::View, None, Device::Desktop, "https://t.co", at),
    ];
    let stats = aggregate_window(&events);
    assert_eq!(stats.total_views, 3);
    assert_eq!(stats.top_referrers.len(), 1);
    assert_eq!(stats.top_referrers[0].referrer, "https://t.co");
    assert_eq!(stats.top_referrers[0].count, 1);
}

#[test]
fn referrer_ranking_caps_at_five_with_stable_ties() {
    let at = Utc::now();
    let mut events = Vec::new();
    for (referrer, count) in [
        ("a.example", 3),
        ("b.example", 3),
        ("c.example", 2),
        ("d.example", 2),
        ("e.example", 1),
        ("f.example", 1),
    ] {
        for _ in 0..count {
            events.push(event(EventType::View, None, Device::Desktop, referrer, at));
        }
    }
    let stats = aggregate_window(&events);
    assert_eq!(stats.top_referrers.len(), 5);
    // Equal counts break ties on the referrer string
    assert_eq!(stats.top_referrers[0].referrer, "a.example");
    assert_eq!(stats.top_referrers[1].referrer, "b.example");
    assert_eq!(stats.top_referrers[4].referrer, "e.example");
}

#[test]
fn time_series_groups_by_utc_date_ascending() {
    let day1 = Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2026, 3, 2, 0, 1, 0).unwrap();
    let events = vec![
        event(EventType::Click, Some(1), Device::Mobile, DIRECT_REFERRER, day2),
        event(EventType::View, None, Device::Mobile, DIRECT_REFERRER, day1),
        event(EventType::View, None, Device::Mobile, DIRECT_REFERRER, day2),
    ];
    let stats = aggregate_window(&events);
    assert_eq!(stats.time_series.len(), 2);
    assert_eq!(stats.time_series[0].date, "2026-03-01");
    assert_eq!(stats.time_series[0].views, 1);
    assert_eq!(stats.time_series[0].clicks, 0);
    assert_eq!(stats.time_series[1].date, "2026-03-02");
    assert_eq!(stats.time_series[1].views, 1);
    assert_eq!(stats.time_series[1].clicks, 1);
}

#[test]
fn heatmap_keeps_title_snapshot_and_orders_by_clicks() {
    let at = Utc::now();
    let mut deleted = event(EventType::Click, Some(9), Device::Desktop, DIRECT_REFERRER, at);
    deleted.link_title = Some("old title".to_string());

    let events = vec![
        event(EventType::Click, Some(3), Device::Desktop, DIRECT_REFERRER, at),
        event(EventType::Click, Some(3), Device::Desktop, DIRECT_REFERRER, at),
        deleted,
    ];
    let stats = aggregate_window(&events);
    assert_eq!(stats.link_heatmap.len(), 2);
    assert_eq!(stats.link_heatmap[0].link_id, 3);
    assert_eq!(stats.link_heatmap[0].clicks, 2);
    assert_eq!(stats.link_heatmap[1].title, "old title");
    assert_eq!(stats.total_clicks, 3);
}

#[test]
fn empty_window_yields_defaults() {
    let stats = aggregate_window(&[]);
    assert_eq!(stats.total_events, 0);
    assert!(stats.top_referrers.is_empty());
    assert!(stats.time_series.is_empty());
    assert!(stats.link_heatmap.is_empty());
    assert_eq!(stats.device_breakdown.mobile, 0);
}
