use camino::Utf8PathBuf;
use folio_cli::commands::{self, ReplayOptions};
use folio_cli::Step;
use folio_core::{BrochureId, SubRoute, TopTab};
use tempfile::tempdir;

fn steps(raw: &[&str]) -> Vec<Step> {
    raw.iter().map(|s| s.parse().unwrap()).collect()
}

fn options(path: &str, raw: &[&str]) -> ReplayOptions {
    ReplayOptions {
        path: path.to_string(),
        catalog: None,
        session_tab: None,
        steps: steps(raw),
    }
}

#[test]
fn replay_walks_tabs_and_history() {
    let reports = commands::replay(&options(
        "/",
        &["select:1", "sub:goods", "tab:audit", "back", "back", "back"],
    ))
    .unwrap();

    let locations: Vec<_> = reports.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(
        locations,
        vec![
            "/brochures",
            "/brochures/1/overview",
            "/brochures/1/goods",
            "/audit",
            "/brochures/1/goods",
            "/brochures/1/overview",
            "/brochures",
        ]
    );

    let last = reports.last().unwrap();
    assert_eq!(last.state.top_tab, TopTab::Brochures);
    assert_eq!(last.state.brochure, None);
    assert_eq!(last.index, 0);
    assert_eq!(last.entries.len(), 4);
}

#[test]
fn replay_with_catalog_file_and_session_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{"brochures": [{"id": 10, "name": "Gala", "potentialIncome": 5}]}"#,
    )
    .unwrap();

    let opts = ReplayOptions {
        path: "/brochures/10".to_string(),
        catalog: Some(Utf8PathBuf::from_path_buf(path).unwrap()),
        session_tab: Some("distribution_description_tab".to_string()),
        steps: Vec::new(),
    };
    let reports = commands::replay(&opts).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].state.brochure, Some(BrochureId(10)));
    assert_eq!(reports[0].state.sub_route, SubRoute::Distribution);
    assert_eq!(reports[0].location, "/brochures/10/distribution");
}

#[test]
fn disabled_run_tab_is_not_applied() {
    let reports = commands::replay(&options("/", &["select:3", "sub:run"])).unwrap();

    let run = &reports[2];
    assert!(!run.applied);
    assert_eq!(run.state.sub_route, SubRoute::Overview);
    assert_eq!(run.location, "/brochures/3/overview");
}

#[test]
fn undefined_selection_is_reported_unapplied() {
    let reports =
        commands::replay(&options("/", &["select:undefined", "menu:brochure_undefined"])).unwrap();

    assert!(reports[1..].iter().all(|r| !r.applied));
    assert!(reports.iter().all(|r| r.entries.len() == 1));
}

#[test]
fn unmounted_host_ignores_back() {
    let reports =
        commands::replay(&options("/", &["tab:audit", "unmount", "back", "mount"])).unwrap();

    let back = &reports[3];
    assert!(back.applied);
    assert_eq!(back.location, "/brochures");
    assert_eq!(back.state.top_tab, TopTab::Audit);

    let remount = &reports[4];
    assert!(remount.applied);
    assert_eq!(remount.state.top_tab, TopTab::Brochures);
}

#[test]
fn unknown_session_key_is_rejected() {
    let mut opts = options("/", &[]);
    opts.session_tab = Some("brochure_empty_tab".to_string());

    let err = commands::replay(&opts).unwrap_err();
    assert!(err.to_string().contains("brochure_empty_tab"));
}

#[test]
fn resolve_classifies_paths() {
    let r = commands::resolve("/brochures/4/run?x=1");
    assert_eq!(r.tab_key, "main_tab_brochures");
    assert_eq!(r.first_segment, "/brochures");
    assert!(!r.not_found);

    assert!(commands::resolve("/reports").not_found);
    assert_eq!(commands::resolve("/").route, "Root");
}
