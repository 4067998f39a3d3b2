//! Typed host-domain contracts shared by the trusted desktop host and the webview client.
//!
//! This crate is the API-first boundary for the host bridge. It exposes the call envelope and
//! call result wire types, the procedure registry, transport contracts, read-only metadata
//! services, and preference-store traits, while concrete webview adapters live in
//! `platform_host_web` and the desktop transport remains behind `desktop_tauri`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
pub mod metadata;
pub mod storage;

pub use bridge::{
    BridgeError, BridgeTransport, CallEnvelope, CallResult, LocalTransport, ProcedureFuture,
    ProcedureHandler, ProcedureRegistry, TransportFuture,
};
pub use metadata::{MetadataProvider, RuntimeVersions, SystemInfoSnapshot};
pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore};
