//! End-to-end bridge scenario: a webview-side client calling host-registered procedures
//! through the shared transport contract.

use std::sync::Arc;

use desktop_tauri::bridge::build_registry;
use futures::executor::block_on;
use platform_host::{LocalTransport, MetadataProvider, RuntimeVersions};
use platform_host_web::HostBridgeClient;
use serde_json::{json, Value};

fn provider() -> MetadataProvider {
    MetadataProvider::new(
        "1.2.3",
        RuntimeVersions {
            tauri: "2.0.0".to_string(),
            webview: "620.1".to_string(),
            rustc: "rustc 1.80.1".to_string(),
        },
    )
}

#[test]
fn client_resolves_app_version_registered_by_the_host() {
    let registry = build_registry(provider()).expect("build registry");
    let client = HostBridgeClient::new(LocalTransport::new(Arc::new(registry)));

    assert_eq!(block_on(client.get_app_version()), Ok("1.2.3".to_string()));

    let versions = block_on(client.get_versions()).expect("getVersions resolves");
    assert_eq!(versions.tauri, "2.0.0");
    assert_eq!(versions.webview, "620.1");
    assert_eq!(versions.rustc, "rustc 1.80.1");
}

#[test]
fn client_sees_stable_system_info_across_calls() {
    let registry = build_registry(provider()).expect("build registry");
    let client = HostBridgeClient::new(LocalTransport::new(Arc::new(registry)));

    let first = block_on(client.get_system_info()).expect("first snapshot");
    let second = block_on(client.get_system_info()).expect("second snapshot");
    assert_eq!(first, second);
    assert_eq!(first.platform, std::env::consts::OS);
    assert_eq!(first.arch, std::env::consts::ARCH);
}

#[test]
fn host_extended_registry_is_callable_through_the_generic_client_path() {
    let mut registry = build_registry(provider()).expect("build registry");
    registry
        .register("greet", |payload| {
            Box::pin(async move {
                let name = payload
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "greet requires a `name` field".to_string())?;
                Ok(Value::String(format!("Hello, {name}!")))
            })
        })
        .expect("register greet");
    let client = HostBridgeClient::new(LocalTransport::new(Arc::new(registry)));

    assert_eq!(
        block_on(client.call("greet", json!({"name": "Test"}))),
        Ok(Value::String("Hello, Test!".to_string()))
    );
    assert_eq!(
        block_on(client.call("saveData", json!({"anything": true})))
            .expect_err("unregistered procedure rejects"),
        "unknown procedure `saveData`"
    );
}
