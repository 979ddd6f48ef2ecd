//! Coarse user-agent parsing for session bookkeeping.
//!
//! Sessions record which device and browser they were opened from so the
//! settings page can list them. A rough classification is all that is
//! needed; unknown agents fall back to "Unknown".

/// Device and browser classification of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// Device class: Desktop, Mobile, Tablet, or Unknown.
    pub device: &'static str,
    /// Browser family.
    pub browser: &'static str,
}

/// Classifies a raw User-Agent header value.
///
/// Order matters: Edge and Chrome both advertise "Chrome", and almost
/// everything advertises "Safari".
#[must_use]
pub fn parse_user_agent(ua: Option<&str>) -> ClientInfo {
    let Some(ua) = ua else {
        return ClientInfo {
            device: "Unknown",
            browser: "Unknown",
        };
    };

    let browser = if ua.contains("Firefox") {
        "Firefox"
    } else if ua.contains("Edg") {
        "Edge"
    } else if ua.contains("Chrome") {
        "Chrome"
    } else if ua.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    };

    let device = if ua.contains("Mobile") {
        "Mobile"
    } else if ua.contains("Tablet") {
        "Tablet"
    } else {
        "Desktop"
    };

    ClientInfo { device, browser }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
        "Desktop",
        "Chrome"
    )]
    #[case(
        "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0",
        "Desktop",
        "Edge"
    )]
    #[case(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Version/17.0 Mobile/15E148 Safari/604.1",
        "Mobile",
        "Safari"
    )]
    #[case("Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0", "Desktop", "Firefox")]
    fn test_parse_known_agents(
        #[case] ua: &str,
        #[case] device: &str,
        #[case] browser: &str,
    ) {
        let info = parse_user_agent(Some(ua));
        assert_eq!(info.device, device);
        assert_eq!(info.browser, browser);
    }

    #[test]
    fn test_missing_header() {
        let info = parse_user_agent(None);
        assert_eq!(info.device, "Unknown");
        assert_eq!(info.browser, "Unknown");
    }
}
