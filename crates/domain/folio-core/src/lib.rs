use serde::{Deserialize, Serialize};
use std::fmt;

pub mod payload;
pub mod route;

pub use payload::{HistoryPayload, PayloadError, PayloadErrorKind};
pub use route::Route;

/// Wire value used by history payloads for "no brochure".
pub const UNSET_BROCHURE_ID: i64 = -1;

/// Identifier of a brochure in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrochureId(pub u64);

impl fmt::Display for BrochureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary sections of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TopTab {
    #[default]
    None,
    Brochures,
    Audit,
}

impl TopTab {
    /// Tabs shown in the header, in display order.
    pub const VISIBLE: [TopTab; 2] = [TopTab::Brochures, TopTab::Audit];

    pub fn key(self) -> &'static str {
        match self {
            TopTab::None => "main_tab_none",
            TopTab::Brochures => "main_tab_brochures",
            TopTab::Audit => "main_tab_loggs",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "main_tab_none" => Some(TopTab::None),
            "main_tab_brochures" => Some(TopTab::Brochures),
            "main_tab_loggs" => Some(TopTab::Audit),
            _ => None,
        }
    }

    pub fn link(self) -> &'static str {
        route::link_for_tab(self)
    }

    pub fn label(self) -> &'static str {
        match self {
            TopTab::None => "",
            TopTab::Brochures => "Brochures",
            TopTab::Audit => "Audit",
        }
    }
}

/// Views nested inside a selected brochure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubRoute {
    #[default]
    None,
    Overview,
    Goods,
    Distribution,
    Run,
}

impl SubRoute {
    /// Sub-tabs in display order.
    pub const TABS: [SubRoute; 4] = [
        SubRoute::Overview,
        SubRoute::Goods,
        SubRoute::Distribution,
        SubRoute::Run,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SubRoute::None => "brochure_empty_tab",
            SubRoute::Overview => "brochure_description_tab",
            SubRoute::Goods => "goods_description_tab",
            SubRoute::Distribution => "distribution_description_tab",
            SubRoute::Run => "run_description_tab",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "brochure_empty_tab" => Some(SubRoute::None),
            "brochure_description_tab" => Some(SubRoute::Overview),
            "goods_description_tab" => Some(SubRoute::Goods),
            "distribution_description_tab" => Some(SubRoute::Distribution),
            "run_description_tab" => Some(SubRoute::Run),
            _ => None,
        }
    }

    /// Path segment for this view; `None` has no segment of its own.
    pub fn link(self) -> Option<&'static str> {
        match self {
            SubRoute::None => None,
            SubRoute::Overview => Some("overview"),
            SubRoute::Goods => Some("goods"),
            SubRoute::Distribution => Some("distribution"),
            SubRoute::Run => Some("run"),
        }
    }

    pub fn from_link(link: &str) -> Option<Self> {
        Self::TABS.into_iter().find(|s| s.link() == Some(link))
    }

    pub fn label(self) -> &'static str {
        match self {
            SubRoute::None => "",
            SubRoute::Overview => "Brochure",
            SubRoute::Goods => "Goods",
            SubRoute::Distribution => "Distribution",
            SubRoute::Run => "Run",
        }
    }

    pub fn is_none(self) -> bool {
        self == SubRoute::None
    }
}

/// Selection state mirrored by the address bar and the history stack.
///
/// Invariants: a sub-route other than `None` implies a brochure, and a brochure
/// implies the brochures tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub top_tab: TopTab,
    pub brochure: Option<BrochureId>,
    pub sub_route: SubRoute,
}

impl NavigationState {
    pub fn is_neutral(&self) -> bool {
        self.top_tab == TopTab::None && self.brochure.is_none()
    }

    pub fn holds_invariants(&self) -> bool {
        let sub_ok = self.sub_route.is_none() || self.brochure.is_some();
        let brochure_ok = self.brochure.is_none() || self.top_tab == TopTab::Brochures;
        sub_ok && brochure_ok
    }
}

/// Brochure record as delivered by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brochure {
    pub id: BrochureId,
    pub name: String,
    #[serde(default)]
    pub edition: u32,
    #[serde(default)]
    pub status_name: String,
    #[serde(default)]
    pub potential_income: i64,
}
