//! Pure mapping between address-bar paths and navigation keys.

use crate::{BrochureId, SubRoute, TopTab};

pub const ROOT_LINK: &str = "/";
pub const BROCHURES_LINK: &str = "/brochures";
pub const AUDIT_LINK: &str = "/audit";

/// Prefix of brochure menu item keys (`brochure_{id}`).
pub const MENU_KEY_PREFIX: &str = "brochure_";

/// Links probed by [`tab_key_for_path`]. Order matters: several links can be
/// substrings of the same path and the first hit wins.
pub const ALL_LINKS: [(&str, TopTab); 3] = [
    (AUDIT_LINK, TopTab::Audit),
    (BROCHURES_LINK, TopTab::Brochures),
    (ROOT_LINK, TopTab::None),
];

/// Router-level classification of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Brochures {
        brochure: Option<BrochureId>,
        sub_route: SubRoute,
    },
    Audit,
    NotFound,
}

pub fn link_for_tab(tab: TopTab) -> &'static str {
    match tab {
        TopTab::None => ROOT_LINK,
        TopTab::Brochures => BROCHURES_LINK,
        TopTab::Audit => AUDIT_LINK,
    }
}

/// Like [`link_for_tab`] but for raw keys; unknown keys map to the root link.
pub fn link_for_tab_key(key: &str) -> &'static str {
    TopTab::from_key(key).map(link_for_tab).unwrap_or(ROOT_LINK)
}

pub fn tab_key_for_path(path: &str) -> TopTab {
    ALL_LINKS
        .iter()
        .find(|(link, _)| path.contains(link))
        .map(|(_, tab)| *tab)
        .unwrap_or(TopTab::None)
}

/// Truncates `path` to its first segment, keeping the leading slash.
pub fn first_segment(path: &str) -> String {
    match strip_query(path).split('/').find(|s| !s.is_empty()) {
        Some(seg) => format!("/{seg}"),
        None => ROOT_LINK.to_string(),
    }
}

/// Parses an id token from a path or a menu key. `"undefined"`, negative and
/// non-numeric tokens are unset.
pub fn parse_id_token(token: &str) -> Option<BrochureId> {
    let token = token.trim();
    if token == "undefined" {
        return None;
    }
    token.parse::<u64>().ok().map(BrochureId)
}

pub fn menu_key(id: BrochureId) -> String {
    format!("{MENU_KEY_PREFIX}{id}")
}

/// Extracts the id from a menu key. Everything after the first `_` is the id
/// token; a key without `_` is treated as a bare token.
pub fn parse_menu_key(key: &str) -> Option<BrochureId> {
    let token = key.split_once('_').map(|(_, t)| t).unwrap_or(key);
    parse_id_token(token)
}

/// Builds `{prefix}/{id}[/{sub}]`.
pub fn brochure_url(prefix: &str, id: BrochureId, sub_route: SubRoute) -> String {
    let base = format!("{}/{}", prefix.trim_end_matches('/'), id);
    match sub_route.link() {
        Some(link) => format!("{base}/{link}"),
        None => base,
    }
}

pub fn parse_route(path: &str) -> Route {
    let segments: Vec<&str> = strip_query(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match segments.as_slice() {
        [] => Route::Root,
        ["audit"] => Route::Audit,
        ["brochures", rest @ ..] if rest.len() <= 2 => Route::Brochures {
            brochure: rest.first().and_then(|t| parse_id_token(t)),
            sub_route: rest
                .get(1)
                .and_then(|l| SubRoute::from_link(l))
                .unwrap_or_default(),
        },
        _ => Route::NotFound,
    }
}

fn strip_query(path: &str) -> &str {
    path.split(&['?', '#'][..]).next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_segment_handles_degenerate_input() {
        assert_eq!(first_segment(""), "/");
        assert_eq!(first_segment("/"), "/");
        assert_eq!(first_segment("//"), "/");
        assert_eq!(first_segment("brochures/4"), "/brochures");
        assert_eq!(first_segment("/brochures/4/goods?x=1"), "/brochures");
    }

    #[test]
    fn audit_wins_over_brochures_when_both_match() {
        assert_eq!(tab_key_for_path("/brochures/audit"), TopTab::Audit);
        assert_eq!(tab_key_for_path("/brochures-archive"), TopTab::Brochures);
        assert_eq!(tab_key_for_path("/settings"), TopTab::None);
        assert_eq!(tab_key_for_path(""), TopTab::None);
    }

    #[test]
    fn brochure_url_collapses_root_prefix() {
        assert_eq!(brochure_url("/", BrochureId(3), SubRoute::None), "/3");
        assert_eq!(
            brochure_url("/brochures", BrochureId(3), SubRoute::Run),
            "/brochures/3/run"
        );
    }
}
