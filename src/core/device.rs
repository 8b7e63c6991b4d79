//! Visitor device classification
//!
//! Deliberately coarse three-tier heuristic on the raw user-agent string,
//! first match wins. This is not a UA parser and must stay that way:
//! anything finer than mobile/tablet/desktop adds nothing to the dashboard.

use crate::core::types::Device;

pub fn classify_device(user_agent: &str) -> Device {
    let ua = user_agent.to_lowercase();

    if ua.contains("mobile") {
        Device::Mobile
    } else if ua.contains("tablet") || ua.contains("ipad") {
        Device::Tablet
    } else if ua.contains("mozilla") {
        Device::Desktop
    } else {
        Device::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_token_wins_first() {
        // iPhone UAs carry both "Mobile" and "Mozilla"; mobile takes priority
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        assert_eq!(classify_device(ua), Device::Mobile);
    }

    #[test]
    fn ipad_classified_as_tablet() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X) AppleWebKit/605.1.15";
        assert_eq!(classify_device(ua), Device::Tablet);
    }

    #[test]
    fn desktop_browser_signature() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
        assert_eq!(classify_device(ua), Device::Desktop);
    }

    #[test]
    fn empty_or_odd_agents_are_unknown() {
        assert_eq!(classify_device(""), Device::Unknown);
        assert_eq!(classify_device("curl/8.4.0"), Device::Unknown);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_device("SOMETHING MOBILE"), Device::Mobile);
        assert_eq!(classify_device("Tablet-Browser/1.0"), Device::Tablet);
    }
}
