//! Typed host-bridge contracts: call envelopes, the procedure registry, and transports.
//!
//! The presentation context never holds a privileged capability directly. Every host call is
//! funneled through one narrow surface: a [`CallEnvelope`] crosses the isolation boundary, the
//! registry looks up the named handler, and a [`CallResult`] travels back. Handler faults are
//! converted into failure results at this layer and must never escape it.

use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Boxed future returned by registered procedure handlers.
pub type ProcedureFuture = Pin<Box<dyn Future<Output = Result<Value, String>> + Send>>;

/// Named asynchronous procedure handler stored in the registry.
pub type ProcedureHandler = Box<dyn Fn(Value) -> ProcedureFuture + Send + Sync>;

/// Object-safe boxed future used by [`BridgeTransport`] implementations.
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = CallResult> + 'a>>;

/// Errors raised by bridge configuration and dispatch.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A procedure name was registered twice. This is a startup configuration error and is
    /// reported before any call can be made.
    #[error("procedure `{name}` is already registered")]
    DuplicateProcedure {
        /// The procedure name that collided.
        name: String,
    },
    /// A procedure was registered with an empty name.
    #[error("procedure name must not be empty")]
    EmptyProcedureName,
    /// An invoked name was absent from the registry.
    #[error("unknown procedure `{name}`")]
    ProcedureNotFound {
        /// The procedure name that was invoked.
        name: String,
    },
    /// The caller sent an envelope the transport could not interpret.
    #[error("malformed call envelope: {0}")]
    MalformedEnvelope(String),
}

/// One in-flight call crossing the isolation boundary: a procedure name plus a request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEnvelope {
    /// Registered procedure name to invoke.
    pub procedure: String,
    /// Request payload forwarded verbatim to the handler. Defaults to `null` when absent so a
    /// payload-less envelope still deserializes instead of faulting the transport.
    #[serde(default)]
    pub payload: Value,
}

impl CallEnvelope {
    /// Builds an envelope for `procedure` carrying `payload`.
    pub fn new(procedure: impl Into<String>, payload: Value) -> Self {
        Self {
            procedure: procedure.into(),
            payload,
        }
    }
}

/// Response marshaled back to the calling context: `{ok: true, value}` on success,
/// `{ok: false, errorMessage}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Handler return value, present exactly when `ok` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Human-readable failure message, present exactly when `ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CallResult {
    /// Builds a success result carrying the handler's return value.
    pub fn success(value: Value) -> Self {
        Self {
            ok: true,
            value: Some(value),
            error_message: None,
        }
    }

    /// Builds a failure result. The message is guaranteed non-empty so the calling context
    /// always has something to report.
    pub fn failure(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = "procedure failed without a message".to_string();
        }
        Self {
            ok: false,
            value: None,
            error_message: Some(message),
        }
    }

    /// Collapses the wire shape back into a `Result` for Rust-side callers.
    pub fn into_result(self) -> Result<Value, String> {
        if self.ok {
            Ok(self.value.unwrap_or(Value::Null))
        } else {
            Err(self
                .error_message
                .unwrap_or_else(|| "procedure failed without a message".to_string()))
        }
    }
}

/// Fixed mapping from procedure name to asynchronous handler.
///
/// The registry is populated once at process start and immutable thereafter; duplicate names are
/// rejected during registration, never surfaced at call time.
#[derive(Default)]
pub struct ProcedureRegistry {
    handlers: BTreeMap<String, ProcedureHandler>,
}

impl ProcedureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named asynchronous procedure.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DuplicateProcedure`] when `name` is already taken and
    /// [`BridgeError::EmptyProcedureName`] when `name` is empty.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), BridgeError>
    where
        F: Fn(Value) -> ProcedureFuture + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(BridgeError::EmptyProcedureName);
        }
        if self.handlers.contains_key(name) {
            return Err(BridgeError::DuplicateProcedure {
                name: name.to_string(),
            });
        }
        self.handlers.insert(name.to_string(), Box::new(handler));
        Ok(())
    }

    /// Lists registered procedure names in sorted order.
    pub fn procedure_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Invokes a registered procedure with `payload`.
    ///
    /// All failure modes fold into a failure [`CallResult`]: an unknown name, a handler error,
    /// and a handler panic. A panicking handler is caught so a single bad call can neither
    /// crash the host nor poison the registry for subsequent calls.
    pub async fn invoke(&self, name: &str, payload: Value) -> CallResult {
        let Some(handler) = self.handlers.get(name) else {
            return CallResult::failure(
                BridgeError::ProcedureNotFound {
                    name: name.to_string(),
                }
                .to_string(),
            );
        };
        match AssertUnwindSafe(handler(payload)).catch_unwind().await {
            Ok(Ok(value)) => CallResult::success(value),
            Ok(Err(message)) => CallResult::failure(message),
            Err(_) => CallResult::failure(format!("procedure `{name}` panicked during execution")),
        }
    }

    /// Envelope-level dispatch entry point used by transports.
    pub async fn dispatch(&self, envelope: CallEnvelope) -> CallResult {
        if envelope.procedure.is_empty() {
            return CallResult::failure(
                BridgeError::MalformedEnvelope("empty procedure name".to_string()).to_string(),
            );
        }
        self.invoke(&envelope.procedure, envelope.payload).await
    }
}

impl std::fmt::Debug for ProcedureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcedureRegistry")
            .field("procedures", &self.procedure_names())
            .finish()
    }
}

/// One-request/one-response call channel crossing the isolation boundary.
pub trait BridgeTransport {
    /// Sends an envelope to the host and completes with the matching call result.
    fn call(&self, envelope: CallEnvelope) -> TransportFuture<'_>;
}

/// In-process transport that completes each call against a shared registry.
///
/// Used by tests and non-webview builds where both ends of the bridge live in one process.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    registry: Arc<ProcedureRegistry>,
}

impl LocalTransport {
    /// Creates a transport dispatching into `registry`.
    pub fn new(registry: Arc<ProcedureRegistry>) -> Self {
        Self { registry }
    }
}

impl BridgeTransport for LocalTransport {
    fn call(&self, envelope: CallEnvelope) -> TransportFuture<'_> {
        Box::pin(async move { self.registry.dispatch(envelope).await })
    }
}
