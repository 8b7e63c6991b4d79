//! Link visibility resolution
//!
//! A link is shown on the public page when its active flag is set and the
//! current instant falls inside its optional schedule window. Both bounds
//! are inclusive and independently optional; scheduling disabled means the
//! active flag alone decides.

use chrono::{DateTime, Utc};

use crate::storage::models::Link;

pub fn resolve_visibility(link: &Link, now: DateTime<Utc>) -> bool {
    if !link.is_active {
        return false;
    }

    let schedule = &link.schedule;
    if !schedule.enabled {
        return true;
    }

    let started = schedule.start.is_none_or(|start| now >= start);
    let not_ended = schedule.end.is_none_or(|end| now <= end);
    started && not_ended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Icon, LinkPosition};
    use crate::storage::models::Schedule;
    use chrono::Duration;

    fn link(is_active: bool, schedule: Schedule) -> Link {
        Link {
            id: 1,
            title: "test".to_string(),
            url: "https://example.com".to_string(),
            icon: Icon::Link,
            icon_only: false,
            icon_size: 50,
            position: LinkPosition::Main,
            is_active,
            sort_order: 0,
            clicks: 0,
            schedule,
        }
    }

    #[test]
    fn inactive_always_hidden() {
        let now = Utc::now();
        assert!(!resolve_visibility(&link(false, Schedule::default()), now));
        // Even with an open schedule window
        let open = Schedule {
            enabled: true,
            start: Some(now - Duration::hours(1)),
            end: Some(now + Duration::hours(1)),
        };
        assert!(!resolve_visibility(&link(false, open), now));
    }

    #[test]
    fn schedule_disabled_depends_only_on_active() {
        let now = Utc::now();
        // Bounds present but scheduling off: they are ignored
        let stale = Schedule {
            enabled: false,
            start: Some(now + Duration::days(1)),
            end: Some(now + Duration::days(2)),
        };
        assert!(resolve_visibility(&link(true, stale), now));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc::now();
        let at_both = Schedule {
            enabled: true,
            start: Some(now),
            end: Some(now),
        };
        assert!(resolve_visibility(&link(true, at_both), now));
    }

    #[test]
    fn enabled_with_no_bounds_is_always_visible() {
        let now = Utc::now();
        let unbounded = Schedule {
            enabled: true,
            start: None,
            end: None,
        };
        assert!(resolve_visibility(&link(true, unbounded), now));
    }

    #[test]
    fn outside_window_is_hidden() {
        let now = Utc::now();
        let future = Schedule {
            enabled: true,
            start: Some(now + Duration::minutes(1)),
            end: None,
        };
        assert!(!resolve_visibility(&link(true, future), now));

        let expired = Schedule {
            enabled: true,
            start: None,
            end: Some(now - Duration::minutes(1)),
        };
        assert!(!resolve_visibility(&link(true, expired), now));
    }
}
