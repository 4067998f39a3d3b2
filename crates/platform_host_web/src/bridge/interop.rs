//! Transport routing call envelopes through the Tauri `bridge_invoke` command.
//!
//! Only the WASM build carries a real transport; non-WASM builds of this crate use
//! [`platform_host::LocalTransport`] instead, so no fallback shim is needed here.

#[cfg(target_arch = "wasm32")]
mod imp {
    use js_sys::Promise;
    use platform_host::{CallEnvelope, CallResult};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
export function jsBridgeInvoke(envelope) {
  const internals = window.__TAURI_INTERNALS__;
  if (!internals || typeof internals.invoke !== 'function') {
    return Promise.reject(new Error('Tauri invoke bridge is unavailable in this context'));
  }
  return internals.invoke('bridge_invoke', { envelope });
}
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = jsBridgeInvoke, catch)]
        fn js_bridge_invoke(envelope: JsValue) -> Result<Promise, JsValue>;
    }

    fn js_error_message(value: &JsValue) -> String {
        value
            .as_string()
            .unwrap_or_else(|| format!("bridge transport error: {value:?}"))
    }

    pub async fn invoke_over_tauri(envelope: CallEnvelope) -> CallResult {
        let encoded = match serde_wasm_bindgen::to_value(&envelope) {
            Ok(value) => value,
            Err(err) => {
                return CallResult::failure(format!("failed to encode call envelope: {err}"))
            }
        };
        let promise = match js_bridge_invoke(encoded) {
            Ok(promise) => promise,
            Err(err) => return CallResult::failure(js_error_message(&err)),
        };
        match JsFuture::from(promise).await {
            Ok(value) => serde_wasm_bindgen::from_value(value)
                .unwrap_or_else(|err| CallResult::failure(format!("failed to decode call result: {err}"))),
            Err(err) => CallResult::failure(js_error_message(&err)),
        }
    }
}

/// Bridge transport backed by the Tauri command channel.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriBridgeTransport;

#[cfg(target_arch = "wasm32")]
impl platform_host::BridgeTransport for TauriBridgeTransport {
    fn call(&self, envelope: platform_host::CallEnvelope) -> platform_host::TransportFuture<'_> {
        Box::pin(async move { imp::invoke_over_tauri(envelope).await })
    }
}
