use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_app_core::ports::{HistoryPort, ListenerId, PopStateSink};
use folio_config::DEFAULT_START_PATH;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub state: Option<Value>,
    pub url: String,
}

struct Inner {
    entries: Vec<HistoryEntry>,
    index: usize,
    listeners: BTreeMap<u64, PopStateSink>,
    next_listener: u64,
}

/// Session history with browser semantics: pushing drops forward entries,
/// moving the cursor dispatches popstate with the target entry's state.
/// Clones share the same stack.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_START_PATH)
    }
}

impl MemoryHistory {
    /// A fresh page load at `url`: one entry without state.
    pub fn new(url: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: vec![HistoryEntry {
                    state: None,
                    url: url.to_string(),
                }],
                index: 0,
                listeners: BTreeMap::new(),
                next_listener: 0,
            })),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.inner().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner().entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.inner().index
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner().entries.clone()
    }

    pub fn current(&self) -> HistoryEntry {
        let inner = self.inner();
        inner.entries[inner.index].clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner().listeners.len()
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Moves the cursor by `delta`. Moves outside the stack are ignored, like
    /// in a browser.
    pub fn go(&self, delta: isize) -> bool {
        let mut inner = self.inner();
        let Some(target) = inner.index.checked_add_signed(delta) else {
            return false;
        };
        if delta == 0 || target >= inner.entries.len() {
            return false;
        }

        inner.index = target;
        let state = inner.entries[target].state.clone();
        tracing::debug!(delta, url = %inner.entries[target].url, "popstate");
        inner
            .listeners
            .retain(|_, sink| sink.send(state.clone()).is_ok());
        true
    }
}

impl HistoryPort for MemoryHistory {
    fn push_state(&self, state: Value, url: &str) {
        let mut inner = self.inner();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(HistoryEntry {
            state: Some(state),
            url: url.to_string(),
        });
        inner.index = inner.entries.len() - 1;
    }

    fn replace_state(&self, state: Value, url: &str) {
        let mut inner = self.inner();
        let index = inner.index;
        inner.entries[index] = HistoryEntry {
            state: Some(state),
            url: url.to_string(),
        };
    }

    fn location(&self) -> String {
        self.current().url
    }

    fn add_pop_state_listener(&self, sink: PopStateSink) -> ListenerId {
        let mut inner = self.inner();
        inner.next_listener += 1;
        let id = inner.next_listener;
        inner.listeners.insert(id, sink);
        ListenerId(id)
    }

    fn remove_pop_state_listener(&self, id: ListenerId) {
        self.inner().listeners.remove(&id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn push_drops_forward_entries() {
        let history = MemoryHistory::new("/a");
        history.push_state(json!(1), "/b");
        history.push_state(json!(2), "/c");
        assert!(history.back());
        assert!(history.back());

        history.push_state(json!(3), "/d");

        let urls: Vec<_> = history.entries().into_iter().map(|e| e.url).collect();
        assert_eq!(urls, vec!["/a", "/d"]);
        assert_eq!(history.index(), 1);
        assert!(!history.forward());
    }

    #[test]
    fn out_of_range_moves_dispatch_nothing() {
        let history = MemoryHistory::new("/a");
        let (tx, mut rx) = mpsc::unbounded_channel();
        history.add_pop_state_listener(tx);

        assert!(!history.back());
        assert!(!history.go(3));
        assert!(!history.go(0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn replace_keeps_cursor_and_length() {
        let history = MemoryHistory::default();
        history.replace_state(json!({"tabKey": "main_tab_brochures"}), "/brochures");

        assert_eq!(history.len(), 1);
        assert_eq!(history.location(), "/brochures");
        assert!(history.current().state.is_some());
    }

    #[test]
    fn closed_listeners_are_pruned_on_dispatch() {
        let history = MemoryHistory::new("/a");
        history.push_state(json!(1), "/b");
        let (tx, rx) = mpsc::unbounded_channel();
        history.add_pop_state_listener(tx);
        drop(rx);

        assert!(history.back());
        assert_eq!(history.listener_count(), 0);
    }
}
