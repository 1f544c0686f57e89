use anyhow::{bail, Context, Result};
use camino::Utf8PathBuf;
use folio_app_core::ports::SessionStoragePort;
use folio_app_core::{is_sub_route_enabled, NavCommand, NavigationCoordinator, SelectionStore};
use folio_config::SESSION_SUB_ROUTE_SLOT;
use folio_core::route::{first_segment, parse_route, tab_key_for_path};
use folio_core::{NavigationState, SubRoute};
use folio_infra::{HistoryEntry, MemoryCatalog, MemoryHistory, MemorySessionStorage};
use serde::Serialize;

use crate::script::Step;

pub struct ReplayOptions {
    pub path: String,
    pub catalog: Option<Utf8PathBuf>,
    pub session_tab: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub applied: bool,
    pub state: NavigationState,
    pub location: String,
    pub index: usize,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    pub path: String,
    pub route: String,
    pub tab_key: &'static str,
    pub first_segment: String,
    pub not_found: bool,
}

type Coordinator = NavigationCoordinator<MemoryHistory, MemorySessionStorage, MemoryCatalog>;

/// Mounts a fresh in-memory host at `opts.path` and applies every step,
/// draining host events after each one. The first report describes the mount.
pub fn replay(opts: &ReplayOptions) -> Result<Vec<StepReport>> {
    let catalog = match &opts.catalog {
        Some(path) => MemoryCatalog::load_json(path.as_std_path())?,
        None => MemoryCatalog::demo(),
    };

    let session = MemorySessionStorage::new();
    if let Some(key) = &opts.session_tab {
        match SubRoute::from_key(key) {
            Some(sub) if !sub.is_none() => session
                .set_item(SESSION_SUB_ROUTE_SLOT, key)
                .context("Failed to seed session storage")?,
            _ => bail!("Unknown sub-route key '{}'", key),
        }
    }

    let history = MemoryHistory::new(&opts.path);
    let mut nav = NavigationCoordinator::new(
        SelectionStore::default(),
        history.clone(),
        session,
        catalog,
    );

    let mut reports = Vec::with_capacity(opts.steps.len() + 1);
    nav.dispatch(NavCommand::Mount);
    nav.tick();
    reports.push(report("mount".to_string(), true, &nav, &history));

    for step in &opts.steps {
        let applied = apply_step(&mut nav, &history, step);
        nav.tick();
        tracing::debug!(%step, applied, "step replayed");
        reports.push(report(step.to_string(), applied, &nav, &history));
    }

    Ok(reports)
}

fn apply_step(nav: &mut Coordinator, history: &MemoryHistory, step: &Step) -> bool {
    match step {
        Step::Tab(tab) => nav.switch_top_tab(*tab),
        Step::Select(id) => nav.select_brochure(*id),
        Step::Menu(key) => nav.select_menu_key(key),
        Step::Sub(sub_route) => {
            let state = nav.state();
            let shown = nav
                .current_brochure()
                .filter(|b| state.brochure == Some(b.id));
            if let Some(brochure) = shown.filter(|b| !is_sub_route_enabled(*sub_route, b)) {
                tracing::warn!("{} is disabled for brochure {}", step, brochure.id);
                return false;
            }
            nav.switch_sub_route(*sub_route)
        }
        Step::Back => history.back(),
        Step::Forward => history.forward(),
        Step::Mount => {
            let was = nav.is_mounted();
            nav.dispatch(NavCommand::Mount);
            !was
        }
        Step::Unmount => {
            let was = nav.is_mounted();
            nav.dispatch(NavCommand::Unmount);
            was
        }
    }
}

fn report(step: String, applied: bool, nav: &Coordinator, history: &MemoryHistory) -> StepReport {
    StepReport {
        step,
        applied,
        state: nav.state(),
        location: history.current().url,
        index: history.index(),
        entries: history.entries(),
    }
}

pub fn cmd_replay(opts: &ReplayOptions, json: bool) -> Result<()> {
    let reports = replay(opts)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for r in &reports {
        let mark = if r.applied { "::" } else { "!!" };
        println!("{} {:<20} {}", mark, r.step, r.location);
        println!(
            "   tab={} brochure={} sub={}",
            r.state.top_tab.key(),
            r.state
                .brochure
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            r.state.sub_route.key()
        );
        for (i, entry) in r.entries.iter().enumerate() {
            let cursor = if i == r.index { ">" } else { " " };
            let state = entry
                .state
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "null".to_string());
            println!("   {} [{}] {} {}", cursor, i, entry.url, state);
        }
    }
    Ok(())
}

pub fn resolve(path: &str) -> ResolveReport {
    let route = parse_route(path);
    ResolveReport {
        path: path.to_string(),
        route: format!("{:?}", route),
        tab_key: tab_key_for_path(path).key(),
        first_segment: first_segment(path),
        not_found: route == folio_core::Route::NotFound,
    }
}

pub fn cmd_resolve(path: &str, json: bool) -> Result<()> {
    let r = resolve(path);
    if json {
        println!("{}", serde_json::to_string_pretty(&r)?);
    } else {
        println!(":: {}", r.path);
        println!("   route:         {}", r.route);
        println!("   tab key:       {}", r.tab_key);
        println!("   first segment: {}", r.first_segment);
    }
    Ok(())
}
