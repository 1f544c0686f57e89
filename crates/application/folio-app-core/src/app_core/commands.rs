use folio_core::{BrochureId, SubRoute, TopTab};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    // Lifecycle
    Mount,
    Unmount,

    // Top level
    SwitchTopTab(TopTab),

    // Brochure menu
    SelectBrochure(Option<BrochureId>),
    SelectMenuKey(String),

    // Brochure working area
    SwitchSubRoute(SubRoute),
    RefreshCurrentBrochure,
}
