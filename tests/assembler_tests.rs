//! Page assembly tests

use chrono::{Duration, Utc};

use mylinks::core::assembler::{assemble, LinkRender};
use mylinks::core::types::{Icon, LinkPosition};
use mylinks::storage::{ContentBlock, Link, Schedule};

fn link(id: i64, position: LinkPosition, sort_order: i32) -> Link {
    Link {
        id,
        title: format!("link-{}", id),
        url: format!("https://example.com/{}", id),
        icon: Icon::Github,
        icon_only: false,
        icon_size: 50,
        position,
        is_active: true,
        sort_order,
        clicks: 0,
        schedule: Schedule::default(),
    }
}

fn block(id: i64, is_active: bool, sort_order: i32) -> ContentBlock {
    ContentBlock {
        id,
        title: format!("block-{}", id),
        description: String::new(),
        image: String::new(),
        link_url: None,
        background_color: "#ffffff".to_string(),
        text_color: "#000000".to_string(),
        layout: Default::default(),
        is_active,
        sort_order,
    }
}

#[test]
fn links_partition_into_positional_buckets() {
    let links = vec![
        link(1, LinkPosition::Main, 0),
        link(2, LinkPosition::Top, 0),
        link(3, LinkPosition::Bottom, 0),
        link(4, LinkPosition::Main, 1),
    ];
    let page = assemble(&links, &[], Utc::now());

    assert_eq!(page.top_icons.len(), 1);
    assert_eq!(page.main_links.len(), 2);
    assert_eq!(page.bottom_icons.len(), 1);
    assert_eq!(page.top_icons[0].id, 2);
    assert_eq!(page.bottom_icons[0].id, 3);
}

#[test]
fn buckets_order_independently_by_sort_order() {
    let links = vec![
        link(1, LinkPosition::Main, 2),
        link(2, LinkPosition::Main, 0),
        link(3, LinkPosition::Main, 1),
        link(4, LinkPosition::Top, 5),
        link(5, LinkPosition::Top, 3),
    ];
    let page = assemble(&links, &[], Utc::now());

    let main_ids: Vec<i64> = page.main_links.iter().map(|l| l.id).collect();
    assert_eq!(main_ids, vec![2, 3, 1]);
    let top_ids: Vec<i64> = page.top_icons.iter().map(|l| l.id).collect();
    assert_eq!(top_ids, vec![5, 4]);
}

#[test]
fn top_and_bottom_always_render_icon_only() {
    let links = vec![
        link(1, LinkPosition::Top, 0),
        link(2, LinkPosition::Bottom, 0),
    ];
    let page = assemble(&links, &[], Utc::now());
    assert_eq!(page.top_icons[0].render, LinkRender::IconOnly);
    assert_eq!(page.bottom_icons[0].render, LinkRender::IconOnly);
}

#[test]
fn main_links_respect_own_icon_only_flag() {
    let mut compact = link(1, LinkPosition::Main, 0);
    compact.icon_only = true;
    let links = vec![compact, link(2, LinkPosition::Main, 1)];

    let page = assemble(&links, &[], Utc::now());
    assert_eq!(page.main_links[0].render, LinkRender::IconOnly);
    assert_eq!(page.main_links[1].render, LinkRender::Button);
}

#[test]
fn hidden_links_are_excluded() {
    let mut inactive = link(1, LinkPosition::Main, 0);
    inactive.is_active = false;

    let mut not_yet_started = link(2, LinkPosition::Main, 1);
    not_yet_started.schedule = Schedule {
        enabled: true,
        start: Some(Utc::now() + Duration::hours(1)),
        end: None,
    };

    let links = vec![inactive, not_yet_started, link(3, LinkPosition::Main, 2)];
    let page = assemble(&links, &[], Utc::now());
    assert_eq!(page.main_links.len(), 1);
    assert_eq!(page.main_links[0].id, 3);
}

#[test]
fn blocks_filter_inactive_and_sort() {
    let blocks = vec![block(1, true, 2), block(2, false, 0), block(3, true, 1)];
    let page = assemble(&[], &blocks, Utc::now());

    let ids: Vec<i64> = page.content_blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn mixed_page_assembles_end_to_end() {
    let top = link(1, LinkPosition::Top, 0);
    let main = link(2, LinkPosition::Main, 0);
    let mut disabled = link(3, LinkPosition::Main, 1);
    disabled.is_active = false;

    let page = assemble(&[top, main, disabled], &[], Utc::now());

    assert_eq!(page.top_icons.len(), 1);
    assert_eq!(page.top_icons[0].id, 1);
    assert_eq!(page.top_icons[0].render, LinkRender::IconOnly);
    assert_eq!(page.main_links.len(), 1);
    assert_eq!(page.main_links[0].id, 2);
    assert_eq!(page.main_links[0].render, LinkRender::Button);
    assert!(page.bottom_icons.is_empty());
}

#[test]
fn empty_inputs_assemble_cleanly() {
    let page = assemble(&[], &[], Utc::now());
    assert!(page.top_icons.is_empty());
    assert!(page.main_links.is_empty());
    assert!(page.bottom_icons.is_empty());
    assert!(page.content_blocks.is_empty());
}
