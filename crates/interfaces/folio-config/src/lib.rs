//! Central configuration constants for navigation defaults and host slots.

/// Session-storage slot holding the last chosen brochure sub-tab key.
pub const SESSION_SUB_ROUTE_SLOT: &str = "ss_saved_tab";

/// Link the root path is redirected to on load.
pub const ROOT_REDIRECT_LINK: &str = "/brochures";

/// Sub-tab key used when nothing is restored from the session.
pub const DEFAULT_SUB_ROUTE_KEY: &str = "brochure_description_tab";

/// Title written into top-level history entries.
pub const TOP_LEVEL_ENTRY_TITLE: &str = "";

/// Path a freshly created host starts at when none is given.
pub const DEFAULT_START_PATH: &str = "/";

/// Returns true when `path` is the bare root that must never stay displayed.
pub fn is_root_path(path: &str) -> bool {
    path.is_empty() || path == "/"
}
