//! Main-window lifecycle: phase tracking and hardened window construction.
//!
//! The host owns exactly one window slot. The window is built hidden and revealed only when the
//! page reports it finished loading, so the user never sees an unstyled flash. All lifecycle
//! transitions are sequential; there is one window and one host thread of control.

use std::sync::Mutex;

use tauri::http::header::{HeaderValue, CONTENT_SECURITY_POLICY};
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::policy::{self, HostProfile};

/// Label of the single primary window.
pub const MAIN_WINDOW_LABEL: &str = "main";

/// Phase of the single main-window slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPhase {
    /// No window exists yet (or the platform kept the process alive after close).
    #[default]
    NoWindow,
    /// Window allocation in progress; isolation flags set, nothing shown.
    Creating,
    /// Window exists but is not visible; waiting for the page to finish loading.
    Hidden,
    /// Window shown and focused.
    Visible,
    /// Window destroyed; recreation only happens through a reactivate signal.
    Closed,
}

impl WindowPhase {
    /// Whether moving to `next` is a legal lifecycle transition.
    pub fn can_transition_to(self, next: WindowPhase) -> bool {
        matches!(
            (self, next),
            (WindowPhase::NoWindow, WindowPhase::Creating)
                | (WindowPhase::Creating, WindowPhase::Hidden)
                | (WindowPhase::Hidden, WindowPhase::Visible)
                | (WindowPhase::Hidden, WindowPhase::Closed)
                | (WindowPhase::Visible, WindowPhase::Closed)
                | (WindowPhase::Closed, WindowPhase::Creating)
        )
    }
}

/// Managed tracker for the main-window phase.
#[derive(Debug, Default)]
pub struct WindowState {
    phase: Mutex<WindowPhase>,
}

impl WindowState {
    /// The current phase.
    pub fn phase(&self) -> WindowPhase {
        *self.phase.lock().expect("window phase mutex poisoned")
    }

    /// Advances to `next`, rejecting illegal transitions.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected transition.
    pub fn advance(&self, next: WindowPhase) -> Result<WindowPhase, String> {
        let mut phase = self.phase.lock().expect("window phase mutex poisoned");
        if !phase.can_transition_to(next) {
            return Err(format!("invalid window transition {:?} -> {next:?}", *phase));
        }
        *phase = next;
        Ok(next)
    }
}

// The webview denies secondary windows outright; this script forwards `window.open` targets to
// the host, which opens http(s) URLs in the default external browser and drops the rest.
const WINDOW_OPEN_FORWARDER: &str = r#"
(() => {
  window.open = (url) => {
    if (window.__TAURI_INTERNALS__ && url != null) {
      window.__TAURI_INTERNALS__.invoke('external_open_url', { url: String(url) });
    }
    return null;
  };
})();
"#;

/// Creates the primary window, hidden, with the security policy applied.
///
/// The window stays hidden until [`mark_page_ready`] runs. Top-level navigation outside the
/// profile's allowed origin is cancelled silently; `window.open` is rerouted through the
/// `external_open_url` command. Responses served for the packaged page get the profile's
/// Content-Security-Policy header injected, overwriting whatever was there.
///
/// # Errors
///
/// Window-creation failures are returned to the caller and are fatal to startup; there is no
/// recovery path.
pub fn create_main_window(app: &AppHandle, profile: HostProfile) -> Result<(), String> {
    let state = app.state::<WindowState>();
    state.advance(WindowPhase::Creating)?;

    let url = match profile {
        HostProfile::Development => WebviewUrl::External(
            policy::DEV_SERVER_ORIGIN
                .parse()
                .map_err(|err| format!("invalid dev server origin: {err}"))?,
        ),
        HostProfile::Production => WebviewUrl::App("index.html".into()),
    };

    WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, url)
        .title("Glance")
        .inner_size(1920.0, 1080.0)
        .visible(false)
        .initialization_script(WINDOW_OPEN_FORWARDER)
        .on_navigation(move |url| {
            let target = url.as_str();
            let allowed = policy::app_navigation_allowed(profile, target);
            if !allowed {
                // Denied navigations are cancelled outright; they never leave the process.
                log::info!("cancelled top-level navigation to {target}");
            }
            allowed
        })
        // Only fires for responses served over the packaged app protocol; dev-server
        // responses come straight from the network stack and cannot be rewritten here.
        .on_web_resource_request(move |_request, response| {
            response.headers_mut().insert(
                CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(policy::csp_header(profile)),
            );
        })
        .build()
        .map_err(|err| format!("failed to create main window: {err}"))?;

    state.advance(WindowPhase::Hidden)?;
    log::info!("main window created hidden ({profile:?})");
    Ok(())
}

/// Shows and focuses the window once the page reports its initial load finished.
///
/// Reloads fire the same signal while the window is already visible; those are ignored.
pub fn mark_page_ready<R: tauri::Runtime>(webview: &tauri::Webview<R>) {
    let app = webview.app_handle();
    let state = app.state::<WindowState>();
    match state.advance(WindowPhase::Visible) {
        Ok(_) => {
            let window = webview.window();
            if let Err(err) = window.show() {
                log::warn!("failed to show main window: {err}");
            }
            let _ = window.set_focus();
            log::info!("main window visible");
        }
        Err(_) => log::debug!("page load finished while window already visible"),
    }
}

/// Records that the main window was destroyed.
pub fn mark_window_closed(app: &AppHandle) {
    let state = app.state::<WindowState>();
    if let Err(err) = state.advance(WindowPhase::Closed) {
        log::debug!("ignoring close in unexpected phase: {err}");
    }
}
