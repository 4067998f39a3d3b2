//! Build-profile security policy: navigation restriction, window-open handling, and
//! Content-Security-Policy selection.
//!
//! The profile is resolved exactly once at startup and threaded into every decision so the
//! navigation policy and the CSP policy can never drift apart.

/// Origin served by the front-end dev server during development.
pub const DEV_SERVER_ORIGIN: &str = "http://localhost:5173";

/// Build configuration governing load source, navigation, and CSP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostProfile {
    /// Loads from the local dev server with a permissive policy.
    Development,
    /// Loads the packaged page with a strict self-only policy.
    Production,
}

impl HostProfile {
    /// Resolves the profile from the environment, once, at startup.
    ///
    /// `GLANCE_DEV` overrides the build default: `1`/`true` force development, any other value
    /// forces production. Without the variable, debug builds are development and release builds
    /// are production.
    pub fn from_environment() -> Self {
        match std::env::var("GLANCE_DEV") {
            Ok(value) if value == "1" || value.eq_ignore_ascii_case("true") => Self::Development,
            Ok(_) => Self::Production,
            Err(_) if cfg!(debug_assertions) => Self::Development,
            Err(_) => Self::Production,
        }
    }

    /// Whether this is the development profile.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Disposition for a denied in-app window-open or navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOpenAction {
    /// Hand the URL to the user's default browser; the in-app window is still denied.
    OpenExternal,
    /// Drop the request silently.
    Deny,
}

/// Top-level navigation policy for pages inside the main window.
///
/// Development allows only the dev server origin; production cancels all navigation. The
/// window's own packaged origin is handled separately by [`app_navigation_allowed`] since the
/// webview reports the initial load through the same hook.
pub fn navigation_allowed(profile: HostProfile, url: &str) -> bool {
    match profile {
        HostProfile::Production => false,
        HostProfile::Development => match url.strip_prefix(DEV_SERVER_ORIGIN) {
            Some(rest) => {
                rest.is_empty()
                    || rest.starts_with('/')
                    || rest.starts_with('?')
                    || rest.starts_with('#')
            }
            None => false,
        },
    }
}

/// Navigation verdict including the window's own app origin.
pub fn app_navigation_allowed(profile: HostProfile, url: &str) -> bool {
    is_app_origin(url) || navigation_allowed(profile, url)
}

/// Whether `url` points at the packaged app content served by the webview protocol.
pub fn is_app_origin(url: &str) -> bool {
    // tauri://localhost on macOS/Linux, http://tauri.localhost on Windows.
    ["tauri://localhost", "http://tauri.localhost"]
        .iter()
        .any(|origin| match url.strip_prefix(origin) {
            Some(rest) => {
                rest.is_empty()
                    || rest.starts_with('/')
                    || rest.starts_with('?')
                    || rest.starts_with('#')
            }
            None => false,
        })
}

/// Disposition for a URL that may not open an in-app window.
pub fn window_open_action(url: &str) -> WindowOpenAction {
    if url.starts_with("http://") || url.starts_with("https://") {
        WindowOpenAction::OpenExternal
    } else {
        WindowOpenAction::Deny
    }
}

/// Content-Security-Policy header value injected into every response served to the window.
pub fn csp_header(profile: HostProfile) -> &'static str {
    match profile {
        HostProfile::Development => {
            "default-src 'self' 'unsafe-inline' 'unsafe-eval' http://localhost:* ws://localhost:*"
        }
        HostProfile::Production => {
            "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_allows_only_the_dev_server_origin() {
        let cases = [
            ("http://localhost:5173", true),
            ("http://localhost:5173/", true),
            ("http://localhost:5173/x", true),
            ("http://localhost:5173?q=1", true),
            ("http://localhost:5173#top", true),
            ("http://localhost:51730/x", false),
            ("http://localhost:4000/x", false),
            ("https://localhost:5173/x", false),
            ("https://example.com", false),
        ];
        for (url, expected) in cases {
            assert_eq!(
                navigation_allowed(HostProfile::Development, url),
                expected,
                "unexpected verdict for {url}"
            );
        }
    }

    #[test]
    fn production_cancels_all_top_level_navigation() {
        for url in [
            "http://localhost:5173/x",
            "https://example.com",
            "file:///etc/passwd",
        ] {
            assert!(!navigation_allowed(HostProfile::Production, url));
        }
    }

    #[test]
    fn app_origin_is_always_navigable() {
        for url in [
            "tauri://localhost",
            "tauri://localhost/index.html",
            "http://tauri.localhost/index.html",
        ] {
            assert!(app_navigation_allowed(HostProfile::Production, url));
            assert!(app_navigation_allowed(HostProfile::Development, url));
        }
        assert!(!app_navigation_allowed(
            HostProfile::Production,
            "https://example.com"
        ));
        assert!(!is_app_origin("tauri://localhost.evil.example"));
        assert!(!is_app_origin("http://tauri.localhost.evil.example"));
    }

    #[test]
    fn only_http_schemes_are_handed_to_the_external_browser() {
        assert_eq!(
            window_open_action("https://example.com"),
            WindowOpenAction::OpenExternal
        );
        assert_eq!(
            window_open_action("http://example.com"),
            WindowOpenAction::OpenExternal
        );
        assert_eq!(window_open_action("file:///etc/passwd"), WindowOpenAction::Deny);
        assert_eq!(window_open_action("javascript:alert(1)"), WindowOpenAction::Deny);
    }

    #[test]
    fn navigation_policy_never_defers_to_the_window_open_policy() {
        // A denied top-level navigation is cancelled outright, even for URLs the explicit
        // external-open path would accept.
        let url = "https://example.com";
        assert!(!app_navigation_allowed(HostProfile::Production, url));
        assert!(!app_navigation_allowed(HostProfile::Development, url));
        assert_eq!(window_open_action(url), WindowOpenAction::OpenExternal);
    }

    #[test]
    fn csp_branches_on_profile() {
        let dev = csp_header(HostProfile::Development);
        let prod = csp_header(HostProfile::Production);
        assert!(dev.contains("'unsafe-eval'"));
        assert!(dev.contains("http://localhost:*"));
        assert!(!prod.contains("'unsafe-eval'"));
        assert!(prod.starts_with("default-src 'self'"));
    }
}
