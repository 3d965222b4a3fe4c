//! Injected EIP-1193 provider (`window.ethereum`) via wasm-bindgen
//!
//! The JavaScript glue below only forwards `request`, `on` and
//! `removeListener` and extracts error details. All decoding happens on the
//! Rust side.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_json::{json, Value};
use shared::dto::transaction::{parse_quantity, TransactionReceipt};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::services::provider::{
    confirmations_at, mined_receipt, EventHandler, ProviderError, ProviderEvent, ProviderEventKind,
    ProviderLocator, ProviderResult, Subscription, Web3Provider,
};
use crate::utils::config::DappConfig;

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen(inline_js = "
export function getInjectedProvider() {
    if (typeof window === 'undefined' || !window.ethereum) {
        return null;
    }
    return window.ethereum;
}

export async function providerRequest(provider, method, params) {
    return await provider.request({ method: method, params: params });
}

export function providerOn(provider, event, listener) {
    provider.on(event, listener);
}

export function providerRemoveListener(provider, event, listener) {
    if (typeof provider.removeListener === 'function') {
        provider.removeListener(event, listener);
    }
}

export function errorMessage(error) {
    if (error && typeof error.message === 'string') {
        return error.message;
    }
    return String(error);
}

export function errorCode(error) {
    if (error && typeof error.code === 'number') {
        return error.code;
    }
    return undefined;
}
")]
extern "C" {
    /// `window.ethereum`, or null when no wallet injected one
    #[wasm_bindgen(js_name = getInjectedProvider)]
    fn get_injected_provider() -> JsValue;

    /// `provider.request({ method, params })`
    #[wasm_bindgen(js_name = providerRequest, catch)]
    async fn provider_request(provider: &JsValue, method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = providerOn)]
    fn provider_on(provider: &JsValue, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(js_name = providerRemoveListener)]
    fn provider_remove_listener(provider: &JsValue, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(js_name = errorMessage)]
    fn error_message(error: &JsValue) -> String;

    #[wasm_bindgen(js_name = errorCode)]
    fn error_code(error: &JsValue) -> Option<f64>;
}

/// Convert a thrown JS value (usually a ProviderRpcError) into a ProviderError
fn js_error(error: JsValue) -> ProviderError {
    ProviderError::Rejected {
        code: error_code(&error).map(|c| c as i64),
        message: error_message(&error),
    }
}

fn to_js(value: &Value) -> ProviderResult<JsValue> {
    // json_compatible: objects become plain JS objects, not Maps
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

fn from_js(value: JsValue) -> ProviderResult<Value> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Handle to the injected `window.ethereum` object
pub struct InjectedProvider {
    inner: JsValue,
    poll_interval_ms: u32,
    max_polls: u32,
}

impl InjectedProvider {
    pub fn new(inner: JsValue, config: &DappConfig) -> Self {
        Self {
            inner,
            poll_interval_ms: config.receipt_poll_ms,
            max_polls: config.receipt_max_polls,
        }
    }

    async fn block_number(&self) -> ProviderResult<u64> {
        let head = self.request("eth_blockNumber", json!([])).await?;
        let raw = head
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse(format!("bad block number {}", head)))?;
        let number = parse_quantity(raw)?;
        u64::try_from(number).map_err(|_| ProviderError::InvalidResponse(format!("block {} out of range", number)))
    }
}

#[async_trait(?Send)]
impl Web3Provider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> ProviderResult<Value> {
        log::debug!("[PROVIDER] {} {}", method, params);
        let params = to_js(&params)?;

        match provider_request(&self.inner, method, params).await {
            Ok(result) => from_js(result),
            Err(e) => {
                let err = js_error(e);
                log::warn!("[PROVIDER] {} rejected: {}", method, err);
                Err(err)
            }
        }
    }

    async fn wait_for_transaction(
        &self,
        hash: &str,
        confirmations: u64,
    ) -> ProviderResult<TransactionReceipt> {
        for attempt in 0..self.max_polls {
            let raw = self.request("eth_getTransactionReceipt", json!([hash])).await?;

            if let Some(receipt) = mined_receipt(raw)? {
                let head = self.block_number().await?;
                let have = confirmations_at(&receipt, head);
                if have >= confirmations {
                    return Ok(receipt);
                }
                log::debug!("[PROVIDER] {} has {}/{} confirmations", hash, have, confirmations);
            } else {
                log::debug!("[PROVIDER] {} pending (poll {})", hash, attempt + 1);
            }

            TimeoutFuture::new(self.poll_interval_ms).await;
        }

        Err(ProviderError::Timeout(hash.to_string()))
    }

    fn subscribe(&self, handler: EventHandler) -> ProviderResult<Subscription> {
        let mut listeners: Vec<(ProviderEventKind, Closure<dyn FnMut(JsValue)>)> = Vec::new();

        for kind in ProviderEventKind::ALL {
            let handler = Rc::clone(&handler);
            let listener = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                let event = from_js(payload).and_then(|value| ProviderEvent::from_payload(kind, value));
                match event {
                    Ok(event) => handler(event),
                    Err(e) => log::warn!("[PROVIDER] Ignoring malformed {} event: {}", kind, e),
                }
            });
            provider_on(&self.inner, kind.name(), listener.as_ref().unchecked_ref());
            listeners.push((kind, listener));
        }

        log::info!("[PROVIDER] Subscribed to provider events");
        let provider = self.inner.clone();
        Ok(Subscription::new(move || {
            for (kind, listener) in &listeners {
                provider_remove_listener(&provider, kind.name(), listener.as_ref().unchecked_ref());
            }
            log::info!("[PROVIDER] Removed provider event listeners");
        }))
    }
}

// ============================================================================
// LOCATOR
// ============================================================================

/// Finds `window.ethereum` after a short grace delay.
///
/// Extensions inject their provider asynchronously, so reading it on the
/// first tick can miss it.
pub struct InjectedLocator {
    config: DappConfig,
}

impl InjectedLocator {
    pub fn new(config: DappConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl ProviderLocator for InjectedLocator {
    async fn locate(&self) -> Option<Rc<dyn Web3Provider>> {
        TimeoutFuture::new(self.config.injection_grace_ms).await;

        let injected = get_injected_provider();
        if injected.is_null() || injected.is_undefined() {
            log::info!("[PROVIDER] No injected provider found");
            return None;
        }

        log::info!("[PROVIDER] Found injected provider");
        Some(Rc::new(InjectedProvider::new(injected, &self.config)))
    }
}
