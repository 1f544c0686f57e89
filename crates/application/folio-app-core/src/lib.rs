pub mod app_core;
pub mod coordinator;
pub mod history;
pub mod ports;
pub mod session;
pub mod viewmodel;

pub use app_core::*;
pub use coordinator::NavigationCoordinator;
pub use folio_core::{Brochure, BrochureId, HistoryPayload, NavigationState, Route, SubRoute, TopTab};
pub use history::HistoryBridge;
pub use ports::*;
pub use session::SessionSubRoutePersistence;
pub use viewmodel::*;
