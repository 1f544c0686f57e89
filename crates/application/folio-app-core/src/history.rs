use std::sync::Arc;

use folio_core::HistoryPayload;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::ports::{HistoryPort, ListenerId};

/// Writes canonical payloads to the host history and owns the single
/// back/forward listener.
pub struct HistoryBridge<H: HistoryPort> {
    port: Arc<H>,
    listener: Option<(ListenerId, mpsc::UnboundedReceiver<Option<Value>>)>,
}

impl<H: HistoryPort> HistoryBridge<H> {
    pub fn new(port: Arc<H>) -> Self {
        Self {
            port,
            listener: None,
        }
    }

    pub fn location(&self) -> String {
        self.port.location()
    }

    pub fn push(&self, payload: &HistoryPayload, url: &str) {
        tracing::debug!(?payload, url, "history push");
        self.port.push_state(payload.encode(), url);
    }

    pub fn replace(&self, payload: &HistoryPayload, url: &str) {
        tracing::debug!(?payload, url, "history replace");
        self.port.replace_state(payload.encode(), url);
    }

    /// Installs the popstate listener. Returns false if one is already installed.
    pub fn listen(&mut self) -> bool {
        if self.listener.is_some() {
            return false;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.port.add_pop_state_listener(tx);
        self.listener = Some((id, rx));
        true
    }

    pub fn unlisten(&mut self) -> bool {
        match self.listener.take() {
            Some((id, _rx)) => {
                self.port.remove_pop_state_listener(id);
                true
            }
            None => false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Takes the next pending back/forward event, if any. The inner value is
    /// `None` for entries without a usable payload.
    pub fn next_pop_state(&mut self) -> Option<Option<HistoryPayload>> {
        let (_, rx) = self.listener.as_mut()?;
        let state = rx.try_recv().ok()?;
        Some(state.and_then(|s| decode_or_neutral(&s)))
    }
}

impl<H: HistoryPort> Drop for HistoryBridge<H> {
    fn drop(&mut self) {
        self.unlisten();
    }
}

fn decode_or_neutral(state: &Value) -> Option<HistoryPayload> {
    match HistoryPayload::decode(state) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(kind = ?e.kind(), "Treating history state as neutral: {}", e);
            None
        }
    }
}
