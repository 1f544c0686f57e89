use folio_core::{BrochureId, NavigationState, SubRoute, TopTab};

use super::events::SelectionEvent;

pub fn reduce(mut state: NavigationState, ev: SelectionEvent) -> NavigationState {
    match ev {
        SelectionEvent::TopTabChanged(tab) => {
            state.top_tab = tab;
            if tab != TopTab::Brochures {
                clear_brochure(&mut state);
            }
        }

        SelectionEvent::BrochureSelected { id, sub_route } => {
            state.top_tab = TopTab::Brochures;
            if state.brochure != Some(id) {
                state.brochure = Some(id);
                state.sub_route = sub_route.unwrap_or_default();
            } else if let Some(sub_route) = sub_route {
                state.sub_route = sub_route;
            }
        }

        SelectionEvent::SubRouteChanged(sub_route) => {
            if state.brochure.is_some() {
                state.sub_route = sub_route;
            }
        }

        SelectionEvent::Reset => clear_brochure(&mut state),

        SelectionEvent::Neutralized => {
            state.top_tab = TopTab::None;
            clear_brochure(&mut state);
        }
    }
    state
}

fn clear_brochure(state: &mut NavigationState) {
    state.brochure = None;
    state.sub_route = SubRoute::None;
}

/// Whether a brochure becoming current reuses the sub-tab saved in the session.
///
/// Kept in its literal two-clause form: crossing from "nothing shown" to a
/// brochure restores, and so does re-evaluating the brochure already shown.
/// Switching directly between two different brochures does not.
pub fn restores_saved_sub_route(previous: Option<BrochureId>, current: BrochureId) -> bool {
    let same = previous == Some(current);
    let previously_unset = previous.is_none();
    (!same && previously_unset) || (same && !previously_unset)
}
