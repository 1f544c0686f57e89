use std::sync::Arc;

use anyhow::Context;
use folio_config::SESSION_SUB_ROUTE_SLOT;
use folio_core::SubRoute;

use crate::ports::SessionStoragePort;

/// Remembers the last brochure sub-tab the user picked. One slot shared by all
/// brochures; the last write wins.
pub struct SessionSubRoutePersistence<S> {
    storage: Arc<S>,
    slot: String,
}

impl<S: SessionStoragePort> SessionSubRoutePersistence<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_slot(storage, SESSION_SUB_ROUTE_SLOT)
    }

    pub fn with_slot(storage: Arc<S>, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn load(&self) -> Option<SubRoute> {
        let raw = self.storage.get_item(&self.slot)?;
        match SubRoute::from_key(&raw) {
            Some(SubRoute::None) => None,
            Some(sub_route) => Some(sub_route),
            None => {
                tracing::warn!("Ignoring unknown sub-route '{}' in session slot {}", raw, self.slot);
                None
            }
        }
    }

    pub fn save(&self, sub_route: SubRoute) -> anyhow::Result<()> {
        self.storage
            .set_item(&self.slot, sub_route.key())
            .with_context(|| format!("Failed to write session slot {}", self.slot))
    }
}
