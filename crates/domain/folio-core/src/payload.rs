//! Structured state attached to history entries.
//!
//! Entries written by earlier builds used different field names and merged
//! top-level and nested fields into one object, so decoding is lenient: it
//! accepts every historical shape and only fails on input that is not an
//! object at all or names an unknown tab.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::route::parse_id_token;
use crate::{BrochureId, SubRoute, TopTab, UNSET_BROCHURE_ID};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryPayload {
    TopLevel {
        tab: TopTab,
        title: String,
        link: String,
    },
    Brochure {
        brochure: Option<BrochureId>,
        sub_route: SubRoute,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("history state is not a payload object: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("history state names unknown tab key '{0}'")]
    UnknownTabKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadErrorKind {
    Malformed,
    UnknownKey,
}

impl PayloadError {
    pub fn kind(&self) -> PayloadErrorKind {
        match self {
            PayloadError::Malformed(_) => PayloadErrorKind::Malformed,
            PayloadError::UnknownTabKey(_) => PayloadErrorKind::UnknownKey,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(alias = "topTabKey")]
    tab_key: Option<String>,
    title: Option<String>,
    link: Option<String>,
    brochure_id: Option<Value>,
    #[serde(alias = "subRouteKey")]
    sub_route: Option<String>,
}

impl HistoryPayload {
    pub fn top_level(tab: TopTab) -> Self {
        HistoryPayload::TopLevel {
            tab,
            title: String::new(),
            link: tab.link().to_string(),
        }
    }

    pub fn brochure(id: BrochureId, sub_route: SubRoute) -> Self {
        HistoryPayload::Brochure {
            brochure: Some(id),
            sub_route,
        }
    }

    pub fn encode(&self) -> Value {
        match self {
            HistoryPayload::TopLevel { tab, title, link } => json!({
                "tabKey": tab.key(),
                "title": title,
                "link": link,
            }),
            HistoryPayload::Brochure {
                brochure,
                sub_route,
            } => json!({
                "brochureId": match brochure {
                    Some(id) => json!(id.0),
                    None => json!(UNSET_BROCHURE_ID),
                },
                "subRoute": sub_route.key(),
            }),
        }
    }

    /// Decodes the state of a history entry. `Ok(None)` means the entry
    /// carries nothing usable (no state, or an empty object).
    pub fn decode(state: &Value) -> Result<Option<Self>, PayloadError> {
        if state.is_null() {
            return Ok(None);
        }

        let raw = RawPayload::deserialize(state)?;
        let brochure = raw.brochure_id.as_ref().and_then(decode_brochure_id);
        let sub_route = raw
            .sub_route
            .as_deref()
            .map(decode_sub_route)
            .unwrap_or_default();

        if let Some(id) = brochure {
            return Ok(Some(HistoryPayload::brochure(id, sub_route)));
        }

        if let (Some(key), Some(link)) = (raw.tab_key.as_deref(), raw.link) {
            let tab =
                TopTab::from_key(key).ok_or_else(|| PayloadError::UnknownTabKey(key.to_string()))?;
            return Ok(Some(HistoryPayload::TopLevel {
                tab,
                title: raw.title.unwrap_or_default(),
                link,
            }));
        }

        if raw.brochure_id.is_some() || raw.sub_route.is_some() {
            return Ok(Some(HistoryPayload::Brochure {
                brochure: None,
                sub_route,
            }));
        }

        Ok(None)
    }
}

fn decode_brochure_id(value: &Value) -> Option<BrochureId> {
    match value {
        Value::Number(n) => n.as_u64().map(BrochureId).or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| BrochureId(f as u64))
        }),
        Value::String(s) => parse_id_token(s),
        _ => None,
    }
}

/// Accepts both the key (`goods_description_tab`) and the link (`goods`).
fn decode_sub_route(raw: &str) -> SubRoute {
    SubRoute::from_key(raw)
        .or_else(|| SubRoute::from_link(raw))
        .unwrap_or_default()
}
