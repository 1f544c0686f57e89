use folio_core::{BrochureId, SubRoute, TopTab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    TopTabChanged(TopTab),

    /// `sub_route: None` keeps the current sub-route when the same brochure is
    /// reselected and clears it for a different one.
    BrochureSelected {
        id: BrochureId,
        sub_route: Option<SubRoute>,
    },
    SubRouteChanged(SubRoute),

    /// Clears the brochure context, keeps the tab.
    Reset,
    /// Clears everything, including the tab.
    Neutralized,
}
