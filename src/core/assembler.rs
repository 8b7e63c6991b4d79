//! Page assembly
//!
//! Partitions a page's links into positional buckets and orders them for
//! rendering; content blocks are filtered to active and ordered. Links in
//! the top and bottom buckets always render icon-only; main links render
//! per their own flag.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::types::{Icon, LinkPosition};
use crate::core::visibility::resolve_visibility;
use crate::storage::models::{ContentBlock, Link};

/// How one link renders inside its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRender {
    /// Compact glyph, title as tooltip
    IconOnly,
    /// Icon + title + external-link affordance
    Button,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderLink {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub icon: Icon,
    pub icon_size: i32,
    pub render: LinkRender,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssembledPage {
    pub top_icons: Vec<RenderLink>,
    pub main_links: Vec<RenderLink>,
    pub bottom_icons: Vec<RenderLink>,
    pub content_blocks: Vec<ContentBlock>,
}

fn to_render(link: &Link, forced_icon_only: bool) -> RenderLink {
    let render = if forced_icon_only || link.icon_only {
        LinkRender::IconOnly
    } else {
        LinkRender::Button
    };
    RenderLink {
        id: link.id,
        title: link.title.clone(),
        url: link.url.clone(),
        icon: link.icon,
        icon_size: link.icon_size,
        render,
    }
}

pub fn assemble(links: &[Link], blocks: &[ContentBlock], now: DateTime<Utc>) -> AssembledPage {
    let mut top: Vec<&Link> = Vec::new();
    let mut main: Vec<&Link> = Vec::new();
    let mut bottom: Vec<&Link> = Vec::new();

    for link in links.iter().filter(|l| resolve_visibility(l, now)) {
        match link.position {
            LinkPosition::Top => top.push(link),
            LinkPosition::Main => main.push(link),
            LinkPosition::Bottom => bottom.push(link),
        }
    }

    // Each bucket is ordered independently
    top.sort_by_key(|l| l.sort_order);
    main.sort_by_key(|l| l.sort_order);
    bottom.sort_by_key(|l| l.sort_order);

    let mut content_blocks: Vec<ContentBlock> =
        blocks.iter().filter(|b| b.is_active).cloned().collect();
    content_blocks.sort_by_key(|b| b.sort_order);

    AssembledPage {
        top_icons: top.iter().map(|l| to_render(l, true)).collect(),
        main_links: main.iter().map(|l| to_render(l, false)).collect(),
        bottom_icons: bottom.iter().map(|l| to_render(l, true)).collect(),
        content_blocks,
    }
}
