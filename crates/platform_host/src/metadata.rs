//! Read-only process, runtime, and system metadata services.

use serde::{Deserialize, Serialize};

/// Versions of the embedding stack, reported over the bridge as a named triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeVersions {
    /// Tauri runtime version.
    pub tauri: String,
    /// System webview engine version.
    pub webview: String,
    /// Compiler the host binary was built with.
    pub rustc: String,
}

/// Point-in-time system facts. Read fresh on every request, never cached; the only guarantee
/// is accuracy at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfoSnapshot {
    /// Operating system family (`linux`, `macos`, `windows`, ...).
    pub platform: String,
    /// Processor architecture the host was compiled for.
    pub arch: String,
    /// Operating system version string.
    pub version: String,
    /// Machine hostname.
    pub hostname: String,
}

impl SystemInfoSnapshot {
    /// Reads a fresh snapshot from the platform.
    ///
    /// Fields the platform cannot report degrade to `"unknown"` rather than failing the call.
    pub fn read() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            version: os_version(),
            hostname: host_name(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn os_version() -> String {
    sysinfo::System::os_version().unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn host_name() -> String {
    sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string())
}

#[cfg(target_arch = "wasm32")]
fn os_version() -> String {
    "unknown".to_string()
}

#[cfg(target_arch = "wasm32")]
fn host_name() -> String {
    "unknown".to_string()
}

/// Process facts injected once at startup plus live system reads.
///
/// The host constructs one provider when it boots and hands it to the registry builder; the
/// contracts crate stays free of any windowing dependency this way.
#[derive(Debug, Clone)]
pub struct MetadataProvider {
    app_version: String,
    runtime_versions: RuntimeVersions,
}

impl MetadataProvider {
    /// Creates a provider for the given packaged app version and embedding-stack versions.
    pub fn new(app_version: impl Into<String>, runtime_versions: RuntimeVersions) -> Self {
        Self {
            app_version: app_version.into(),
            runtime_versions,
        }
    }

    /// Semantic version string of the packaged application.
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Versions of the embedding stack captured at startup.
    pub fn runtime_versions(&self) -> &RuntimeVersions {
        &self.runtime_versions
    }

    /// Reads a fresh system-info snapshot.
    pub fn system_info(&self) -> SystemInfoSnapshot {
        SystemInfoSnapshot::read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> RuntimeVersions {
        RuntimeVersions {
            tauri: "2.0.0".to_string(),
            webview: "620.1".to_string(),
            rustc: "rustc 1.80.1".to_string(),
        }
    }

    #[test]
    fn snapshot_reads_are_stable_between_calls() {
        let first = SystemInfoSnapshot::read();
        let second = SystemInfoSnapshot::read();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_fields_are_never_empty() {
        let snapshot = SystemInfoSnapshot::read();
        assert!(!snapshot.platform.is_empty());
        assert!(!snapshot.arch.is_empty());
        assert!(!snapshot.version.is_empty());
        assert!(!snapshot.hostname.is_empty());
    }

    #[test]
    fn provider_returns_injected_facts() {
        let provider = MetadataProvider::new("1.2.3", versions());
        assert_eq!(provider.app_version(), "1.2.3");
        assert_eq!(provider.runtime_versions(), &versions());
    }

    #[test]
    fn runtime_versions_serialize_as_named_triple() {
        let raw = serde_json::to_value(versions()).expect("serialize versions");
        assert_eq!(
            raw,
            serde_json::json!({
                "tauri": "2.0.0",
                "webview": "620.1",
                "rustc": "rustc 1.80.1",
            })
        );
    }
}
