use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use folio_app_core::ports::BrochureCatalog;
use folio_core::route::menu_key;
use folio_core::{Brochure, BrochureId, SubRoute};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// On-disk catalog used to seed a [`MemoryCatalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub brochures: Vec<Brochure>,
    #[serde(default)]
    pub saved_brochure: Option<BrochureId>,
}

#[derive(Debug, Default)]
struct Inner {
    brochures: Vec<Brochure>,
    current: Option<Brochure>,
    saved: Option<BrochureId>,
    load_count: usize,
    subscribers: Vec<mpsc::UnboundedSender<Option<Brochure>>>,
}

impl Inner {
    fn find(&self, id: BrochureId) -> Option<Brochure> {
        self.brochures.iter().find(|b| b.id == id).cloned()
    }

    fn publish(&mut self, value: Option<Brochure>) {
        self.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }
}

/// Brochure data layer over a fixed list. Opening a different brochure
/// clears the current one first, the way a fetching store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryCatalog {
    pub fn new(brochures: Vec<Brochure>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                brochures,
                ..Default::default()
            })),
        }
    }

    pub fn from_file(file: CatalogFile) -> Self {
        let catalog = Self::new(file.brochures);
        catalog.inner().saved = file.saved_brochure;
        catalog
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        Ok(Self::from_file(file))
    }

    /// A small catalog for demos; brochure 3 has no computed income.
    pub fn demo() -> Self {
        let brochure = |id, name: &str, edition, status: &str, income| Brochure {
            id: BrochureId(id),
            name: name.to_string(),
            edition,
            status_name: status.to_string(),
            potential_income: income,
        };
        Self::new(vec![
            brochure(1, "Spring", 500, "Draft", 12_500),
            brochure(2, "Summer", 1_200, "Approved", 48_000),
            brochure(3, "Autumn", 800, "New", 0),
        ])
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn brochures(&self) -> Vec<Brochure> {
        self.inner().brochures.clone()
    }

    pub fn load_count(&self) -> usize {
        self.inner().load_count
    }

    pub fn set_saved(&self, id: Option<BrochureId>) {
        self.inner().saved = id;
    }

    /// Makes `id` current without passing through "nothing selected".
    pub fn switch_current(&self, id: Option<BrochureId>) {
        let mut inner = self.inner();
        let next = id.and_then(|id| inner.find(id));
        inner.current = next.clone();
        inner.publish(next);
    }

    /// Replaces a record; republishes it when it is the current one.
    pub fn update_brochure(&self, brochure: Brochure) {
        let mut inner = self.inner();
        if let Some(slot) = inner.brochures.iter_mut().find(|b| b.id == brochure.id) {
            *slot = brochure.clone();
        } else {
            inner.brochures.push(brochure.clone());
        }
        if inner.current.as_ref().map(|b| b.id) == Some(brochure.id) {
            inner.current = Some(brochure.clone());
            inner.publish(Some(brochure));
        }
    }
}

impl BrochureCatalog for MemoryCatalog {
    fn load_brochures(&self) -> Result<()> {
        let mut inner = self.inner();
        inner.load_count += 1;
        tracing::debug!(count = inner.brochures.len(), "brochures loaded");
        Ok(())
    }

    fn saved_brochure(&self) -> Option<Brochure> {
        let inner = self.inner();
        inner.saved.and_then(|id| inner.find(id))
    }

    fn saved_brochure_menu(&self) -> Vec<String> {
        let inner = self.inner();
        inner
            .current
            .as_ref()
            .map(|b| vec![menu_key(b.id)])
            .unwrap_or_default()
    }

    fn on_brochure_click(&self, id: BrochureId, sub_route: SubRoute) {
        let mut inner = self.inner();
        tracing::debug!(%id, ?sub_route, "brochure requested");
        if inner.current.as_ref().map(|b| b.id) != Some(id) {
            inner.current = None;
            inner.publish(None);
        }
        let found = inner.find(id);
        if found.is_some() {
            inner.saved = Some(id);
        } else {
            tracing::warn!("Brochure {} is not in the catalog", id);
        }
        inner.current = found.clone();
        inner.publish(found);
    }

    fn current_brochure(&self) -> Option<Brochure> {
        self.inner().current.clone()
    }

    fn subscribe_current(&self) -> mpsc::UnboundedReceiver<Option<Brochure>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner().subscribers.push(tx);
        rx
    }

    fn reset(&self) {
        let mut inner = self.inner();
        if inner.current.take().is_some() {
            inner.publish(None);
        }
    }
}
