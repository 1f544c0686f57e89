use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use folio_app_core::ports::{HistoryPort, ListenerId, PopStateSink};
use folio_app_core::HistoryBridge;
use folio_core::{BrochureId, HistoryPayload, SubRoute, TopTab};
use serde_json::{json, Value};

#[derive(Default)]
struct RecordingHistory {
    writes: Mutex<Vec<(&'static str, Value, String)>>,
    listeners: Mutex<BTreeMap<u64, PopStateSink>>,
    next_id: Mutex<u64>,
}

impl RecordingHistory {
    fn fire(&self, state: Option<Value>) {
        for sink in self.listeners.lock().unwrap().values() {
            let _ = sink.send(state.clone());
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl HistoryPort for RecordingHistory {
    fn push_state(&self, state: Value, url: &str) {
        self.writes
            .lock()
            .unwrap()
            .push(("push", state, url.to_string()));
    }
    fn replace_state(&self, state: Value, url: &str) {
        self.writes
            .lock()
            .unwrap()
            .push(("replace", state, url.to_string()));
    }
    fn location(&self) -> String {
        self.writes
            .lock()
            .unwrap()
            .last()
            .map(|(_, _, url)| url.clone())
            .unwrap_or_else(|| "/".to_string())
    }
    fn add_pop_state_listener(&self, sink: PopStateSink) -> ListenerId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        self.listeners.lock().unwrap().insert(*next, sink);
        ListenerId(*next)
    }
    fn remove_pop_state_listener(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(&id.0);
    }
}

#[test]
fn listener_is_installed_once() {
    let port = Arc::new(RecordingHistory::default());
    let mut bridge = HistoryBridge::new(port.clone());

    assert!(bridge.listen());
    assert!(!bridge.listen());
    assert_eq!(port.listener_count(), 1);

    assert!(bridge.unlisten());
    assert!(!bridge.unlisten());
    assert_eq!(port.listener_count(), 0);

    assert!(bridge.listen());
    assert_eq!(port.listener_count(), 1);
}

#[test]
fn dropping_the_bridge_removes_its_listener() {
    let port = Arc::new(RecordingHistory::default());
    {
        let mut bridge = HistoryBridge::new(port.clone());
        bridge.listen();
        assert_eq!(port.listener_count(), 1);
    }
    assert_eq!(port.listener_count(), 0);
}

#[test]
fn writes_carry_encoded_payloads() {
    let port = Arc::new(RecordingHistory::default());
    let bridge = HistoryBridge::new(port.clone());

    bridge.push(&HistoryPayload::top_level(TopTab::Audit), "/audit");
    bridge.replace(
        &HistoryPayload::brochure(BrochureId(2), SubRoute::Goods),
        "/brochures/2/goods",
    );

    let writes = port.writes.lock().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].0, "push");
    assert_eq!(writes[0].1["tabKey"], json!("main_tab_loggs"));
    assert_eq!(writes[0].1["link"], json!("/audit"));
    assert_eq!(writes[1].0, "replace");
    assert_eq!(writes[1].1["brochureId"], json!(2));
    assert_eq!(writes[1].1["subRoute"], json!("goods_description_tab"));
    assert_eq!(writes[1].2, "/brochures/2/goods");
}

#[test]
fn pop_states_are_decoded_in_order() {
    let port = Arc::new(RecordingHistory::default());
    let mut bridge = HistoryBridge::new(port.clone());
    assert!(bridge.next_pop_state().is_none(), "nothing before listening");

    bridge.listen();
    port.fire(Some(HistoryPayload::top_level(TopTab::Brochures).encode()));
    port.fire(None);
    port.fire(Some(json!(42)));
    port.fire(Some(json!({"brochureId": "undefined", "subRoute": "run"})));

    assert_eq!(
        bridge.next_pop_state(),
        Some(Some(HistoryPayload::top_level(TopTab::Brochures)))
    );
    assert_eq!(bridge.next_pop_state(), Some(None));
    assert_eq!(bridge.next_pop_state(), Some(None), "malformed is neutral");
    assert_eq!(
        bridge.next_pop_state(),
        Some(Some(HistoryPayload::Brochure {
            brochure: None,
            sub_route: SubRoute::Run,
        }))
    );
    assert_eq!(bridge.next_pop_state(), None);
}

#[test]
fn events_after_unlisten_are_not_seen() {
    let port = Arc::new(RecordingHistory::default());
    let mut bridge = HistoryBridge::new(port.clone());
    bridge.listen();
    bridge.unlisten();
    port.fire(None);
    assert_eq!(bridge.next_pop_state(), None);
}
