//! Scripted provider used by unit tests

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;
use shared::dto::transaction::TransactionReceipt;

use crate::services::provider::{
    EventHandler, ProviderError, ProviderEvent, ProviderResult, Subscription, Web3Provider,
};

fn rejected(message: impl Into<String>) -> ProviderError {
    ProviderError::Rejected {
        code: None,
        message: message.into(),
    }
}

/// Answers `request` calls from per-method queues and records every call.
///
/// A method with an empty queue is rejected, so tests fail loudly on
/// unexpected RPC traffic.
#[derive(Default)]
pub struct MockProvider {
    responses: RefCell<HashMap<String, VecDeque<ProviderResult<Value>>>>,
    receipts: RefCell<VecDeque<ProviderResult<TransactionReceipt>>>,
    calls: RefCell<Vec<(String, Value)>>,
    gates: RefCell<HashMap<String, VecDeque<oneshot::Receiver<()>>>>,
    reject_all: Option<String>,
    handler: Rc<RefCell<Option<EventHandler>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that rejects every call with `message`
    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_all: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn respond(&self, method: &str, value: Value) {
        self.push(method, Ok(value));
    }

    /// Like [`respond`](Self::respond), but the answer is held back until
    /// the returned sender fires (or is dropped).
    pub fn respond_gated(&self, method: &str, value: Value) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(gate);
        self.respond(method, value);
        release
    }

    pub fn fail(&self, method: &str, message: &str) {
        self.push(method, Err(rejected(message)));
    }

    pub fn receipt(&self, receipt: ProviderResult<TransactionReceipt>) {
        self.receipts.borrow_mut().push_back(receipt);
    }

    fn push(&self, method: &str, result: ProviderResult<Value>) {
        self.responses
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn is_subscribed(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Deliver an event to the subscribed handler, if any
    pub fn emit(&self, event: ProviderEvent) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(event);
        }
    }
}

#[async_trait(?Send)]
impl Web3Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> ProviderResult<Value> {
        self.calls.borrow_mut().push((method.to_string(), params));

        if let Some(message) = &self.reject_all {
            return Err(rejected(message.clone()));
        }

        let gate = self.gates.borrow_mut().get_mut(method).and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            // A dropped sender releases the gate as well
            let _ = gate.await;
        }

        self.responses
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(rejected(format!("unexpected call {}", method))))
    }

    async fn wait_for_transaction(
        &self,
        hash: &str,
        confirmations: u64,
    ) -> ProviderResult<TransactionReceipt> {
        self.calls.borrow_mut().push((
            "wait_for_transaction".to_string(),
            serde_json::json!([hash, confirmations]),
        ));

        if let Some(message) = &self.reject_all {
            return Err(rejected(message.clone()));
        }

        self.receipts
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Timeout(hash.to_string())))
    }

    fn subscribe(&self, handler: EventHandler) -> ProviderResult<Subscription> {
        *self.handler.borrow_mut() = Some(handler);
        let slot = Rc::clone(&self.handler);
        Ok(Subscription::new(move || {
            slot.borrow_mut().take();
        }))
    }
}
