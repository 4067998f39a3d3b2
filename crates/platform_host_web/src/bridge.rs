//! Bridge client for the presentation context.
//!
//! The client is constructed once per webview lifetime from a transport and exposes one method
//! per registered host procedure. It performs no validation beyond forwarding; request checking
//! is the handler's responsibility on the trusted side.

mod interop;

#[cfg(target_arch = "wasm32")]
pub use interop::TauriBridgeTransport;

use platform_host::{BridgeTransport, CallEnvelope, RuntimeVersions, SystemInfoSnapshot};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Capability object handed to the presentation context.
///
/// Every privileged call goes through [`HostBridgeClient::call`]; the typed methods are thin
/// wrappers naming the procedures the host registers at startup.
#[derive(Debug, Clone)]
pub struct HostBridgeClient<T: BridgeTransport> {
    transport: T,
}

impl<T: BridgeTransport> HostBridgeClient<T> {
    /// Wraps a call transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sends one call envelope and resolves with the response value or the failure message.
    pub async fn call(&self, procedure: &str, payload: Value) -> Result<Value, String> {
        self.transport
            .call(CallEnvelope::new(procedure, payload))
            .await
            .into_result()
    }

    async fn call_typed<R: DeserializeOwned>(&self, procedure: &str) -> Result<R, String> {
        let value = self.call(procedure, Value::Null).await?;
        serde_json::from_value(value)
            .map_err(|err| format!("failed to decode `{procedure}` response: {err}"))
    }

    /// Semantic version string of the packaged application.
    pub async fn get_app_version(&self) -> Result<String, String> {
        self.call_typed("getAppVersion").await
    }

    /// Versions of the embedding stack.
    pub async fn get_versions(&self) -> Result<RuntimeVersions, String> {
        self.call_typed("getVersions").await
    }

    /// Fresh system-info snapshot.
    pub async fn get_system_info(&self) -> Result<SystemInfoSnapshot, String> {
        self.call_typed("getSystemInfo").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::executor::block_on;
    use platform_host::{LocalTransport, ProcedureRegistry};
    use serde_json::{json, Value};

    use super::*;

    fn client_with_version() -> HostBridgeClient<LocalTransport> {
        let mut registry = ProcedureRegistry::new();
        registry
            .register("getAppVersion", |_| {
                Box::pin(async { Ok(Value::String("1.2.3".to_string())) })
            })
            .expect("register getAppVersion");
        HostBridgeClient::new(LocalTransport::new(Arc::new(registry)))
    }

    #[test]
    fn typed_method_resolves_with_handler_value() {
        let client = client_with_version();
        assert_eq!(block_on(client.get_app_version()), Ok("1.2.3".to_string()));
    }

    #[test]
    fn unregistered_procedure_rejects_with_message() {
        let client = client_with_version();
        let err = block_on(client.get_system_info()).expect_err("missing procedure must reject");
        assert_eq!(err, "unknown procedure `getSystemInfo`");
    }

    #[test]
    fn generic_call_forwards_payload_untouched() {
        let mut registry = ProcedureRegistry::new();
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
            block_on(client.call("greet", json!({}))),
            Err("greet requires a `name` field".to_string())
        );
    }
}
