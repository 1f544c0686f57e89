//! In-process stand-ins for the browser host: session history, session
//! storage and the brochure data layer.

pub mod catalog;
pub mod history;
pub mod session;

pub use catalog::{CatalogFile, MemoryCatalog};
pub use history::{HistoryEntry, MemoryHistory};
pub use session::MemorySessionStorage;
