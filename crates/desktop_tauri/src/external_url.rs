//! Hand-off of external link targets to the system default browser.

use tauri_plugin_opener::OpenerExt;

use crate::policy::{self, WindowOpenAction};

/// Opens an http(s) URL in the user's default browser.
///
/// The shell never opens secondary windows. The page forwards `window.open` targets here;
/// http(s) URLs land in the external browser and every other scheme is dropped.
///
/// # Errors
///
/// Returns an error when the platform opener rejects the URL.
#[tauri::command]
pub fn external_open_url(app: tauri::AppHandle, url: String) -> Result<(), String> {
    match policy::window_open_action(&url) {
        WindowOpenAction::OpenExternal => app
            .opener()
            .open_url(&url, None::<String>)
            .map_err(|err| format!("failed to open {url} externally: {err}")),
        WindowOpenAction::Deny => {
            log::info!("dropped external open request for {url}");
            Ok(())
        }
    }
}
