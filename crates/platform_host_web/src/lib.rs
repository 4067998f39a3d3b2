//! Webview-side adapters for the host bridge and local presentation state.
//!
//! This crate is everything the untrusted presentation context is allowed to hold: a bridge
//! client whose methods mirror the registered host procedures, a `localStorage` preference
//! adapter, and the theme controller that owns the persisted theme slot. Privileged host
//! capabilities are reachable only through the bridge client's call transport.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
pub mod storage;
pub mod theme;

pub use bridge::HostBridgeClient;
#[cfg(target_arch = "wasm32")]
pub use bridge::TauriBridgeTransport;
pub use storage::local_prefs::WebPrefsStore;
pub use theme::{ThemeController, ThemePreference, THEME_ATTRIBUTE, THEME_PREF_KEY};
