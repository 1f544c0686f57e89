use folio_core::{Brochure, BrochureId, SubRoute};
use serde_json::Value;
use tokio::sync::mpsc;

/// Receives the state of the entry the host navigated to on back/forward.
/// `None` means the entry has no state attached.
pub type PopStateSink = mpsc::UnboundedSender<Option<Value>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Session history of the host (the browser window in production).
pub trait HistoryPort: Send + Sync + 'static {
    fn push_state(&self, state: Value, url: &str);
    fn replace_state(&self, state: Value, url: &str);
    fn location(&self) -> String;
    fn add_pop_state_listener(&self, sink: PopStateSink) -> ListenerId;
    fn remove_pop_state_listener(&self, id: ListenerId);
}

/// Storage that lives as long as the browser tab.
pub trait SessionStoragePort: Send + Sync + 'static {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Data layer holding brochures and the currently opened one.
pub trait BrochureCatalog: Send + Sync + 'static {
    fn load_brochures(&self) -> anyhow::Result<()>;
    fn saved_brochure(&self) -> Option<Brochure>;
    fn saved_brochure_menu(&self) -> Vec<String>;
    fn on_brochure_click(&self, id: BrochureId, sub_route: SubRoute);
    fn current_brochure(&self) -> Option<Brochure>;
    /// Every later change of the current brochure is sent to the returned
    /// receiver until it is dropped.
    fn subscribe_current(&self) -> mpsc::UnboundedReceiver<Option<Brochure>>;
    fn reset(&self);
}
