use folio_app_core::{SelectionEvent, SelectionStore};
use folio_core::{BrochureId, NavigationState, SubRoute, TopTab};

#[test]
fn unchanged_transitions_do_not_notify() {
    let store = SelectionStore::default();
    let mut rx = store.subscribe();

    assert!(!store.set_top_tab(TopTab::None));
    assert!(!rx.has_changed().unwrap());

    assert!(store.set_top_tab(TopTab::Audit));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().top_tab, TopTab::Audit);

    assert!(!store.set_top_tab(TopTab::Audit));
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn store_keeps_invariants_across_any_event_sequence() {
    let store = SelectionStore::default();
    let events = [
        SelectionEvent::SubRouteChanged(SubRoute::Run),
        SelectionEvent::BrochureSelected {
            id: BrochureId(1),
            sub_route: Some(SubRoute::Goods),
        },
        SelectionEvent::TopTabChanged(TopTab::Audit),
        SelectionEvent::SubRouteChanged(SubRoute::Goods),
        SelectionEvent::BrochureSelected {
            id: BrochureId(0),
            sub_route: None,
        },
        SelectionEvent::Reset,
        SelectionEvent::Neutralized,
    ];
    for ev in events {
        store.apply(ev);
        assert!(store.state().holds_invariants(), "after {ev:?}");
    }
    assert_eq!(store.state(), NavigationState::default());
}

#[test]
fn store_handles_share_one_state() {
    let store = SelectionStore::default();
    let other = store.clone();
    store.set_brochure(BrochureId(9), Some(SubRoute::Distribution));
    assert_eq!(other.state().brochure, Some(BrochureId(9)));
    assert_eq!(other.state().sub_route, SubRoute::Distribution);
    assert!(other.reset());
    assert_eq!(store.state().top_tab, TopTab::Brochures);
    assert_eq!(store.state().brochure, None);
}

#[tokio::test]
async fn subscribers_observe_latest_snapshot() {
    let store = SelectionStore::default();
    let mut rx = store.subscribe();

    let writer = store.clone();
    let handle = tokio::spawn(async move {
        writer.set_brochure(BrochureId(4), Some(SubRoute::Overview));
        writer.set_sub_route(SubRoute::Run);
    });

    rx.changed().await.unwrap();
    handle.await.unwrap();
    let snapshot = *rx.borrow_and_update();
    assert_eq!(snapshot.brochure, Some(BrochureId(4)));
    assert!(snapshot.holds_invariants());
    assert_eq!(store.state().sub_route, SubRoute::Run);
}
