pub mod commands;
pub mod events;
pub mod reducer;
pub mod store;

pub use commands::NavCommand;
pub use events::SelectionEvent;
pub use reducer::{reduce, restores_saved_sub_route};
pub use store::SelectionStore;
