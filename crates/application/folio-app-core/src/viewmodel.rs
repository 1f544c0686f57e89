use folio_core::route::parse_route;
use folio_core::{Brochure, NavigationState, Route, SubRoute, TopTab};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopTabVm {
    pub key: &'static str,
    pub label: &'static str,
    pub link: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubTabVm {
    pub key: &'static str,
    pub label: &'static str,
    pub link: &'static str,
    pub active: bool,
    pub disabled: bool,
}

/// Everything a frontend needs to draw the navigation chrome.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationVm {
    pub state: NavigationState,
    pub location: String,
    pub not_found: bool,
    pub top_tabs: Vec<TopTabVm>,
    pub sub_tabs: Vec<SubTabVm>,
    pub header: String,
    pub selected_menu_keys: Vec<String>,
}

pub fn top_tabs_vm(state: &NavigationState) -> Vec<TopTabVm> {
    TopTab::VISIBLE
        .into_iter()
        .map(|tab| TopTabVm {
            key: tab.key(),
            label: tab.label(),
            link: tab.link(),
            active: state.top_tab == tab,
        })
        .collect()
}

/// The run tab needs a computed income to show anything.
pub fn is_sub_route_enabled(sub_route: SubRoute, brochure: &Brochure) -> bool {
    match sub_route {
        SubRoute::Run => brochure.potential_income != 0,
        _ => true,
    }
}

pub fn sub_tabs_vm(state: &NavigationState, brochure: Option<&Brochure>) -> Vec<SubTabVm> {
    if state.brochure.is_none() {
        return Vec::new();
    }

    SubRoute::TABS
        .into_iter()
        .map(|sub_route| SubTabVm {
            key: sub_route.key(),
            label: sub_route.label(),
            link: sub_route.link().unwrap_or_default(),
            active: state.sub_route == sub_route,
            disabled: brochure.is_some_and(|b| !is_sub_route_enabled(sub_route, b)),
        })
        .collect()
}

/// `name \ edition \ income \ status`, or empty without a brochure.
pub fn brochure_header(brochure: Option<&Brochure>) -> String {
    match brochure {
        Some(b) => format!(
            "{} \\ {} \\ {} \\ {}",
            b.name, b.edition, b.potential_income, b.status_name
        ),
        None => String::new(),
    }
}

pub fn navigation_vm(
    state: &NavigationState,
    location: String,
    brochure: Option<&Brochure>,
    selected_menu_keys: Vec<String>,
) -> NavigationVm {
    // Only describe the brochure the selection actually points at.
    let brochure = brochure.filter(|b| state.brochure == Some(b.id));
    NavigationVm {
        state: *state,
        not_found: parse_route(&location) == Route::NotFound,
        location,
        top_tabs: top_tabs_vm(state),
        sub_tabs: sub_tabs_vm(state, brochure),
        header: brochure_header(brochure),
        selected_menu_keys,
    }
}
