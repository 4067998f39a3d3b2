//! Host-side bridge surface: registry construction and the invoke command.
//!
//! All procedures are registered once during startup; a duplicate name aborts the boot instead
//! of surfacing at call time.

use std::sync::Arc;

use platform_host::{
    BridgeError, CallEnvelope, CallResult, MetadataProvider, ProcedureRegistry, RuntimeVersions,
    SystemInfoSnapshot,
};

/// Managed wrapper around the startup-built procedure registry.
#[derive(Debug)]
pub struct BridgeState {
    registry: Arc<ProcedureRegistry>,
}

impl BridgeState {
    /// Wraps a fully populated registry.
    pub fn new(registry: ProcedureRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<ProcedureRegistry> {
        &self.registry
    }
}

/// Versions of the embedding stack, read once at startup.
pub fn host_runtime_versions() -> RuntimeVersions {
    RuntimeVersions {
        tauri: tauri::VERSION.to_string(),
        webview: tauri::webview_version().unwrap_or_else(|_| "unknown".to_string()),
        rustc: env!("GLANCE_RUSTC_VERSION").to_string(),
    }
}

/// Builds the procedure registry exposed over the bridge.
///
/// # Errors
///
/// Returns a [`BridgeError`] when the registration set is inconsistent (duplicate or empty
/// names), which is a startup configuration error.
pub fn build_registry(provider: MetadataProvider) -> Result<ProcedureRegistry, BridgeError> {
    let mut registry = ProcedureRegistry::new();

    let app_version = provider.app_version().to_string();
    registry.register("getAppVersion", move |_payload| {
        let app_version = app_version.clone();
        Box::pin(async move { serde_json::to_value(app_version).map_err(|err| err.to_string()) })
    })?;

    let versions = provider.runtime_versions().clone();
    registry.register("getVersions", move |_payload| {
        let versions = versions.clone();
        Box::pin(async move { serde_json::to_value(&versions).map_err(|err| err.to_string()) })
    })?;

    registry.register("getSystemInfo", move |_payload| {
        Box::pin(async move {
            serde_json::to_value(SystemInfoSnapshot::read()).map_err(|err| err.to_string())
        })
    })?;

    Ok(registry)
}

/// Dispatches one call envelope from the webview into the procedure registry.
///
/// Every failure mode folds into the returned [`CallResult`]; the command itself only errors
/// when Tauri cannot deliver the response at all.
#[tauri::command]
pub async fn bridge_invoke(
    state: tauri::State<'_, BridgeState>,
    envelope: CallEnvelope,
) -> Result<CallResult, String> {
    let registry = Arc::clone(state.registry());
    Ok(registry.dispatch(envelope).await)
}
