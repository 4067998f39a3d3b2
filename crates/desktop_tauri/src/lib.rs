//! Tauri desktop host bootstrap for the Glance metadata shell.
//!
//! This crate owns the trusted side of the process: the single window and its security policy,
//! the single-instance lock, the procedure registry reachable from the webview through the
//! `bridge_invoke` command, and the `external_open_url` hand-off for links that may not open
//! in-app windows. Command registration stays localized here so host-domain handlers can be
//! added without coupling the contracts crate to Tauri internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[doc(hidden)]
pub mod bridge;
#[doc(hidden)]
pub mod external_url;
#[doc(hidden)]
pub mod lifecycle;
#[doc(hidden)]
pub mod policy;

use platform_host::MetadataProvider;
use tauri::webview::PageLoadEvent;
use tauri::{Manager, RunEvent, WindowEvent};

use lifecycle::{WindowState, MAIN_WINDOW_LABEL};
use policy::HostProfile;

/// Starts the Tauri desktop host process.
///
/// Startup failures (invalid bridge configuration, window allocation refusal) are fatal; there
/// is no recovery path beyond process termination.
pub fn run() {
    let profile = HostProfile::from_environment();

    let provider = MetadataProvider::new(env!("CARGO_PKG_VERSION"), bridge::host_runtime_versions());
    let registry = bridge::build_registry(provider).expect("bridge registry configuration is invalid");

    let app = tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // Second launch: redirect focus to the surviving window instead of creating one.
            if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
                let _ = window.unminimize();
                let _ = window.set_focus();
            }
        }))
        .plugin(tauri_plugin_opener::init())
        .manage(WindowState::default())
        .manage(bridge::BridgeState::new(registry))
        .setup(move |app| {
            log::info!("starting Glance host ({profile:?})");
            lifecycle::create_main_window(app.handle(), profile).map_err(|err| err.into())
        })
        .on_page_load(|webview, payload| {
            if matches!(payload.event(), PageLoadEvent::Finished)
                && webview.label() == MAIN_WINDOW_LABEL
            {
                lifecycle::mark_page_ready(&webview);
            }
        })
        .invoke_handler(tauri::generate_handler![
            bridge::bridge_invoke,
            external_url::external_open_url
        ])
        .build(tauri::generate_context!())
        .expect("desktop_tauri failed to build Tauri application");

    app.run(move |app_handle, event| match event {
        RunEvent::WindowEvent {
            label,
            event: WindowEvent::Destroyed,
            ..
        } if label == MAIN_WINDOW_LABEL => {
            lifecycle::mark_window_closed(app_handle);
        }
        #[cfg(target_os = "macos")]
        RunEvent::ExitRequested { code: None, api, .. } => {
            // macOS convention: closing the last window keeps the process alive.
            api.prevent_exit();
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            let state = app_handle.state::<WindowState>();
            if !has_visible_windows && state.phase() == lifecycle::WindowPhase::Closed {
                if let Err(err) = lifecycle::create_main_window(app_handle, profile) {
                    log::error!("failed to recreate main window: {err}");
                }
            }
        }
        _ => {}
    });
}
