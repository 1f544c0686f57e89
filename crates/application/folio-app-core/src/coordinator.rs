use std::sync::Arc;
use tokio::sync::mpsc;

use folio_config::{
    is_root_path, DEFAULT_SUB_ROUTE_KEY, ROOT_REDIRECT_LINK, TOP_LEVEL_ENTRY_TITLE,
};
use folio_core::route::{
    brochure_url, first_segment, parse_menu_key, parse_route, tab_key_for_path,
};
use folio_core::{Brochure, BrochureId, HistoryPayload, NavigationState, Route, SubRoute, TopTab};

use crate::app_core::{restores_saved_sub_route, NavCommand, SelectionEvent, SelectionStore};
use crate::history::HistoryBridge;
use crate::ports::{BrochureCatalog, HistoryPort, SessionStoragePort};
use crate::session::SessionSubRoutePersistence;
use crate::viewmodel::{self, NavigationVm};

/// Keeps the address bar, the history stack and the selection store in step.
///
/// All entry points run to completion synchronously. Host events (back/forward
/// and catalog updates) queue up and are handled in order by [`Self::tick`].
pub struct NavigationCoordinator<H, S, C>
where
    H: HistoryPort,
    S: SessionStoragePort,
    C: BrochureCatalog,
{
    pub store: SelectionStore,
    history: HistoryBridge<H>,
    sub_routes: SessionSubRoutePersistence<S>,
    catalog: Arc<C>,

    current_rx: Option<mpsc::UnboundedReceiver<Option<Brochure>>>,
    /// Brochure the working area last resolved, `None` while nothing is shown.
    shown_brochure: Option<BrochureId>,
    /// Brochure restored by back/forward whose entry already carries its sub-route.
    popped_brochure: Option<BrochureId>,
    mounted: bool,
}

impl<H, S, C> NavigationCoordinator<H, S, C>
where
    H: HistoryPort,
    S: SessionStoragePort,
    C: BrochureCatalog,
{
    pub fn new(store: SelectionStore, history: H, session: S, catalog: C) -> Self {
        Self {
            store,
            history: HistoryBridge::new(Arc::new(history)),
            sub_routes: SessionSubRoutePersistence::new(Arc::new(session)),
            catalog: Arc::new(catalog),
            current_rx: None,
            shown_brochure: None,
            popped_brochure: None,
            mounted: false,
        }
    }

    pub fn dispatch(&mut self, cmd: NavCommand) {
        match cmd {
            NavCommand::Mount => self.mount(),
            NavCommand::Unmount => self.unmount(),
            NavCommand::SwitchTopTab(tab) => {
                self.switch_top_tab(tab);
            }
            NavCommand::SelectBrochure(id) => {
                self.select_brochure(id);
            }
            NavCommand::SelectMenuKey(key) => {
                self.select_menu_key(&key);
            }
            NavCommand::SwitchSubRoute(sub_route) => {
                self.switch_sub_route(sub_route);
            }
            NavCommand::RefreshCurrentBrochure => self.refresh_current_brochure(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.store.state()
    }

    pub fn location(&self) -> String {
        self.history.location()
    }

    pub fn route(&self) -> Route {
        parse_route(&self.location())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_listening(&self) -> bool {
        self.history.is_listening()
    }

    pub fn current_brochure(&self) -> Option<Brochure> {
        self.catalog.current_brochure()
    }

    pub fn selected_menu_keys(&self) -> Vec<String> {
        self.catalog.saved_brochure_menu()
    }

    pub fn view(&self) -> NavigationVm {
        viewmodel::navigation_vm(
            &self.state(),
            self.location(),
            self.current_brochure().as_ref(),
            self.selected_menu_keys(),
        )
    }

    /// Reconciles the initial address with the store and installs listeners.
    pub fn mount(&mut self) {
        if self.mounted {
            tracing::debug!("navigation already mounted");
            return;
        }
        self.mounted = true;
        self.history.listen();
        self.current_rx = Some(self.catalog.subscribe_current());

        let path = self.history.location();
        let tab = tab_key_for_path(&path);

        if tab == TopTab::None && is_root_path(&path) {
            let target = tab_key_for_path(ROOT_REDIRECT_LINK);
            tracing::info!("Redirecting root to {}", ROOT_REDIRECT_LINK);
            self.store.apply(SelectionEvent::TopTabChanged(target));
            self.history
                .replace(&top_level_payload(target), ROOT_REDIRECT_LINK);
        } else if tab != TopTab::None {
            self.store.apply(SelectionEvent::TopTabChanged(tab));
            self.history.replace(&top_level_payload(tab), &path);
        } else {
            tracing::debug!(%path, "no tab matches the initial path");
        }

        if self.store.state().top_tab == TopTab::Brochures {
            self.restore_brochure_on_load(&path);
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.history.unlisten();
        self.current_rx = None;
        self.shown_brochure = None;
        self.popped_brochure = None;
        self.mounted = false;
    }

    pub fn switch_top_tab(&mut self, tab: TopTab) -> bool {
        if tab == self.store.state().top_tab {
            return false;
        }
        self.popped_brochure = None;
        if tab != TopTab::Brochures {
            self.shown_brochure = None;
            self.catalog.reset();
        }
        self.store.apply(SelectionEvent::TopTabChanged(tab));
        self.history.push(&top_level_payload(tab), tab.link());
        true
    }

    pub fn select_menu_key(&mut self, key: &str) -> bool {
        self.select_brochure(parse_menu_key(key))
    }

    /// Opens a brochure from the menu. The sub-route shown in the address is
    /// carried over until the catalog confirms the brochure.
    pub fn select_brochure(&mut self, id: Option<BrochureId>) -> bool {
        let Some(id) = id else {
            tracing::debug!("ignoring brochure selection without id");
            return false;
        };
        self.popped_brochure = None;

        let path = self.history.location();
        let sub_route = match parse_route(&path) {
            Route::Brochures { sub_route, .. } => sub_route,
            _ => SubRoute::None,
        };
        let url = brochure_url(&brochure_prefix(&path), id, sub_route);

        self.store.apply(SelectionEvent::BrochureSelected {
            id,
            sub_route: Some(sub_route),
        });
        let payload = HistoryPayload::brochure(id, sub_route);
        if url == path {
            self.history.replace(&payload, &url);
        } else {
            self.history.push(&payload, &url);
        }

        self.catalog.on_brochure_click(id, sub_route);
        true
    }

    /// Switches the nested tab of the open brochure. Callers only offer tabs
    /// that are enabled for the brochure.
    pub fn switch_sub_route(&mut self, sub_route: SubRoute) -> bool {
        let state = self.store.state();
        let Some(id) = state.brochure else {
            tracing::debug!(?sub_route, "no brochure selected, ignoring sub-route");
            return false;
        };
        // The click is remembered even when the tab is already active.
        if let Err(e) = self.sub_routes.save(sub_route) {
            tracing::warn!("{:#}", e);
        }
        if state.sub_route == sub_route {
            return false;
        }

        self.store.apply(SelectionEvent::SubRouteChanged(sub_route));

        let path = self.history.location();
        let url = brochure_url(&brochure_prefix(&path), id, sub_route);
        self.history
            .push(&HistoryPayload::brochure(id, sub_route), &url);
        true
    }

    /// Re-runs sub-route resolution for the catalog's current brochure.
    pub fn refresh_current_brochure(&mut self) {
        self.popped_brochure = None;
        let current = self.catalog.current_brochure();
        self.resolve_current_brochure(current);
    }

    /// Handles queued host events. Each back/forward event is followed by the
    /// catalog updates it caused before the next one is looked at.
    pub fn tick(&mut self) -> usize {
        let mut handled = self.drain_catalog();
        while let Some(payload) = self.history.next_pop_state() {
            self.handle_pop_state(payload);
            handled += 1 + self.drain_catalog();
        }
        handled
    }

    pub fn handle_pop_state(&mut self, payload: Option<HistoryPayload>) {
        tracing::debug!(?payload, "popstate");
        self.popped_brochure = None;

        match payload {
            Some(HistoryPayload::Brochure {
                brochure: Some(id),
                sub_route,
            }) => {
                self.store.apply(SelectionEvent::SubRouteChanged(sub_route));
                self.store.apply(SelectionEvent::BrochureSelected {
                    id,
                    sub_route: Some(sub_route),
                });
                self.popped_brochure = Some(id);
                self.catalog.on_brochure_click(id, sub_route);
            }

            Some(HistoryPayload::Brochure { brochure: None, .. }) => {
                tracing::debug!("popped entry names no brochure, ignoring");
            }

            Some(HistoryPayload::TopLevel { tab, title, link }) => {
                self.store.apply(SelectionEvent::TopTabChanged(tab));
                self.store.apply(SelectionEvent::Reset);
                self.shown_brochure = None;
                self.catalog.reset();
                if self.history.location() != link {
                    let payload = HistoryPayload::TopLevel {
                        tab,
                        title,
                        link: link.clone(),
                    };
                    self.history.replace(&payload, &link);
                }
            }

            None => {
                self.store.apply(SelectionEvent::Neutralized);
                self.shown_brochure = None;
                self.catalog.reset();
            }
        }
    }

    fn drain_catalog(&mut self) -> usize {
        let mut handled = 0;
        while let Some(current) = self.current_rx.as_mut().and_then(|rx| rx.try_recv().ok()) {
            handled += 1;
            let id = current.as_ref().map(|b| b.id);
            if id == self.shown_brochure {
                // A popped entry for the brochure already shown is settled here.
                if id.is_some() && self.popped_brochure == id {
                    self.popped_brochure = None;
                }
                continue;
            }
            self.resolve_current_brochure(current);
        }
        handled
    }

    fn resolve_current_brochure(&mut self, current: Option<Brochure>) {
        let previous = self.shown_brochure;
        self.shown_brochure = current.as_ref().map(|b| b.id);

        let Some(brochure) = current else {
            return;
        };
        if self.store.state().top_tab != TopTab::Brochures {
            tracing::debug!(id = %brochure.id, "brochure arrived after leaving the tab");
            return;
        }
        if self.popped_brochure.take() == Some(brochure.id) {
            return;
        }

        let fallback = SubRoute::from_key(DEFAULT_SUB_ROUTE_KEY).unwrap_or(SubRoute::Overview);
        let sub_route = if restores_saved_sub_route(previous, brochure.id) {
            self.sub_routes.load().unwrap_or(fallback)
        } else {
            fallback
        };

        self.store.apply(SelectionEvent::BrochureSelected {
            id: brochure.id,
            sub_route: Some(sub_route),
        });
        let path = self.history.location();
        let url = brochure_url(&brochure_prefix(&path), brochure.id, sub_route);
        self.history
            .replace(&HistoryPayload::brochure(brochure.id, sub_route), &url);
    }

    fn restore_brochure_on_load(&mut self, path: &str) {
        if let Err(e) = self.catalog.load_brochures() {
            tracing::error!("Failed to load brochures: {:#}", e);
        }

        let id = match parse_route(path) {
            Route::Brochures {
                brochure: Some(id), ..
            } => Some(id),
            _ => self.catalog.saved_brochure().map(|b| b.id),
        };
        if id.is_some() {
            self.select_brochure(id);
        }
    }
}

fn top_level_payload(tab: TopTab) -> HistoryPayload {
    HistoryPayload::TopLevel {
        tab,
        title: TOP_LEVEL_ENTRY_TITLE.to_string(),
        link: tab.link().to_string(),
    }
}

/// First segment of the current address, or the brochures link when the
/// address is not under it.
fn brochure_prefix(path: &str) -> String {
    if tab_key_for_path(path) == TopTab::Brochures {
        first_segment(path)
    } else {
        TopTab::Brochures.link().to_string()
    }
}
