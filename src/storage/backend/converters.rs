//! Row decoding
//!
//! Enum-ish string columns are resolved into the closed enums from
//! `core::types` here, once, so nothing downstream ever sees a raw string.

use crate::core::types::{EventType, Icon, parse_or_default};
use crate::storage::models::{
    AnalyticsEvent, ContentBlock, CustomColors, Link, Page, Schedule, SeoMeta, SocialLinks, User,
};
use migration::entities::{analytics_event, content_block, link, page, user};

pub const ICON_SIZE_MIN: i32 = 30;
pub const ICON_SIZE_MAX: i32 = 100;

pub fn clamp_icon_size(size: i32) -> i32 {
    size.clamp(ICON_SIZE_MIN, ICON_SIZE_MAX)
}

pub fn model_to_page(model: page::Model) -> Page {
    Page {
        id: model.id,
        user_id: model.user_id,
        username: model.username,
        title: model.title,
        bio: model.bio,
        avatar: model.avatar,
        cover_image: model.cover_image,
        theme: parse_or_default(&model.theme),
        button_style: parse_or_default(&model.button_style),
        font: parse_or_default(&model.font),
        custom_colors: CustomColors {
            background: model.custom_background,
            text: model.custom_text,
            button: model.custom_button,
            button_text: model.custom_button_text,
            gradient_start: model.gradient_start,
            gradient_end: model.gradient_end,
        },
        background_image: model.background_image,
        background_fit: parse_or_default(&model.background_fit),
        button_animation: parse_or_default(&model.button_animation),
        seo: SeoMeta {
            title: model.seo_title,
            description: model.seo_description,
            image: model.seo_image,
        },
        is_published: model.is_published,
        views: model.views.max(0) as u64,
        social_links: SocialLinks {
            twitter: model.social_twitter,
            instagram: model.social_instagram,
            facebook: model.social_facebook,
            youtube: model.social_youtube,
            tiktok: model.social_tiktok,
            linkedin: model.social_linkedin,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        title: model.title,
        url: model.url,
        icon: Icon::resolve(&model.icon),
        icon_only: model.icon_only,
        icon_size: clamp_icon_size(model.icon_size),
        position: parse_or_default(&model.position),
        is_active: model.is_active,
        sort_order: model.sort_order,
        clicks: model.clicks.max(0) as u64,
        schedule: Schedule {
            enabled: model.schedule_enabled,
            start: model.schedule_start,
            end: model.schedule_end,
        },
    }
}

pub fn model_to_block(model: content_block::Model) -> ContentBlock {
    ContentBlock {
        id: model.id,
        title: model.title,
        description: model.description,
        image: model.image,
        link_url: model.link_url,
        background_color: model.background_color,
        text_color: model.text_color,
        layout: parse_or_default(&model.layout),
        is_active: model.is_active,
        sort_order: model.sort_order,
    }
}

pub fn model_to_event(model: analytics_event::Model) -> AnalyticsEvent {
    AnalyticsEvent {
        id: model.id,
        page_id: model.page_id,
        // Rows are only written through the tracker, which validates the
        // type; an unreadable value counts as a view rather than a click
        event_type: model.event_type.parse().unwrap_or(EventType::View),
        link_id: model.link_id,
        link_title: model.link_title,
        device: parse_or_default(&model.device),
        browser: model.browser,
        os: model.os,
        country: model.country,
        city: model.city,
        referrer: model.referrer,
        created_at: model.created_at,
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        display_name: model.display_name,
        plan: parse_or_default(&model.plan),
        subscription_status: model.subscription_status,
    }
}
