mod common;

use common::{category, MockService};
use omnisearch::search::{ActiveFilter, SearchController, SearchOptions, SearchState};
use omnisearch::Command;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn algebra() -> serde_json::Value {
    json!({"items": [{"id": 1, "name": "Algebra"}]})
}

async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_search_and_select() {
    let service = MockService::new(algebra());
    let (courses, selected) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);

    controller.open();
    assert_eq!(controller.state(), SearchState::Idle);
    controller.set_query("ab");
    assert_eq!(controller.state(), SearchState::Debouncing);

    controller.process_next().await; // debounce elapsed
    assert!(controller.is_loading());
    assert_eq!(controller.state(), SearchState::Fetching);

    controller.process_next().await; // fetch settled
    assert!(!controller.is_loading());
    assert_eq!(controller.state(), SearchState::IdleWithResults);
    assert_eq!(
        controller.results().get("courses"),
        Some(&[json!({"id": 1, "name": "Algebra"})][..])
    );
    assert_eq!(service.queries(), vec!["ab"]);

    assert!(controller.select_result("courses", 0));
    assert_eq!(*selected.lock().unwrap(), vec![json!({"id": 1, "name": "Algebra"})]);
    assert!(!controller.is_open());
    assert_eq!(controller.query(), "");
    assert!(controller.results().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_edits() {
    let service = MockService::new(algebra());
    let (courses, _) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("a");
    wait(100).await;
    controller.set_query("ab");
    wait(100).await;
    controller.set_query("abc");

    controller.process_next().await;
    controller.process_next().await;
    wait(1_000).await;
    controller.poll_events();

    assert_eq!(service.queries(), vec!["abc"]);
    assert_eq!(controller.session().debounced_query, "abc");
}

#[tokio::test(start_paused = true)]
async fn test_short_query_clears_results_without_fetch() {
    let service = MockService::new(algebra());
    let (courses, _) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("ab");
    controller.process_next().await;
    controller.process_next().await;
    assert!(!controller.results().is_empty());

    controller.set_query("a");
    controller.process_next().await;
    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());
    assert_eq!(service.calls(), 1);
    assert_eq!(controller.state(), SearchState::IdleEmpty);
}

#[tokio::test(start_paused = true)]
async fn test_command_mode_never_fetches() {
    let service = MockService::new(algebra());
    let (courses, _) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("/foo bar baz");
    controller.process_next().await;
    wait(1_000).await;
    controller.poll_events();

    assert_eq!(service.calls(), 0);
    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_results_follow_category_order() {
    let slow = MockService::delayed(json!([{"id": "a1", "name": "From A"}]), Duration::from_millis(500));
    let fast = MockService::new(json!([{"id": "b1", "name": "From B"}]));
    let (a, _) = category("a", slow);
    let (b, _) = category("b", fast);
    let mut controller = SearchController::default().with_categories(vec![a, b]);
    controller.open();

    controller.set_query("from");
    controller.process_next().await;
    controller.process_next().await;

    assert_eq!(controller.results().category_ids(), vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn test_failing_category_does_not_hide_siblings() {
    let (broken, _) = category("broken", MockService::failing());
    let (courses, _) = category("courses", MockService::new(algebra()));
    let mut controller = SearchController::default().with_categories(vec![broken, courses]);
    controller.open();

    controller.set_query("alg");
    controller.process_next().await;
    controller.process_next().await;

    assert_eq!(controller.results().category_ids(), vec!["courses"]);
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_late_response_after_close_is_discarded() {
    let service = MockService::delayed(algebra(), Duration::from_millis(500));
    let (courses, _) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("ab");
    controller.process_next().await; // fetch now in flight
    controller.close();
    controller.open();

    wait(1_000).await;
    controller.poll_events();

    assert_eq!(service.calls(), 1);
    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_late_response_after_suppressing_edit_is_discarded() {
    let service = MockService::delayed(algebra(), Duration::from_millis(500));
    let (courses, _) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("ab");
    controller.process_next().await; // fetch in flight for another 500ms
    controller.set_query("a");
    controller.process_next().await; // debounce for "a" fires first and clears results
    controller.process_next().await; // stale fetch settles

    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_response_settling_before_short_query_debounce_is_discarded() {
    let service = MockService::delayed(algebra(), Duration::from_millis(100));
    let (courses, _) = category("courses", service.clone());
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("ab");
    controller.process_next().await; // fetch in flight for another 100ms
    assert!(controller.is_loading());

    controller.set_query("a");
    assert!(!controller.is_loading());
    controller.process_next().await; // fetch for "ab" settles inside the debounce of "a"

    assert_eq!(controller.query(), "a");
    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());

    controller.process_next().await; // debounce for "a"
    assert!(controller.results().is_empty());
    assert_eq!(service.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_command_prefix_edit_clears_results_immediately() {
    let (courses, _) = category("courses", MockService::new(algebra()));
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();

    controller.set_query("ab");
    controller.process_next().await;
    controller.process_next().await;
    assert!(!controller.results().is_empty());

    controller.set_query("/ab");
    assert!(controller.results().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_searches_again_in_scope() {
    let a_service = MockService::new(algebra());
    let b_service = MockService::new(json!([{"id": 2, "name": "Abacus"}]));
    let (a, _) = category("a", a_service.clone());
    let (b, _) = category("b", b_service.clone());
    let mut controller = SearchController::default().with_categories(vec![a, b]);
    controller.open();

    controller.set_query("ab");
    controller.process_next().await;
    controller.process_next().await;
    assert_eq!(controller.results().category_ids(), vec!["a", "b"]);

    controller.set_active_filter(ActiveFilter::Category("b".to_string()));
    controller.process_next().await;
    assert_eq!(controller.results().category_ids(), vec!["b"]);
    assert_eq!(a_service.calls(), 1);
    assert_eq!(b_service.calls(), 2);

    // Same filter again is a no-op
    controller.set_active_filter(ActiveFilter::Category("b".to_string()));
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_tab_completion_from_active_value() {
    let mut controller = SearchController::default()
        .with_static_commands(vec![Command::new("settings", "Open Settings", || {})]);
    controller.open();
    controller.set_query("set");
    controller.set_active_value("open settings");

    assert!(controller.complete());
    assert_eq!(controller.query(), "Open Settings");
}

#[tokio::test]
async fn test_tab_completion_from_slash_prefix() {
    let mut controller = SearchController::default().with_slash_commands(vec![
        Command::new("help", "Help", || {}),
        Command::new("create", "Create Project", || {}),
    ]);
    controller.open();
    controller.set_query("/cre");

    assert!(controller.complete());
    assert_eq!(controller.query(), "Create Project");
}

#[tokio::test]
async fn test_tab_completion_without_match_keeps_query() {
    let mut controller =
        SearchController::default().with_static_commands(vec![Command::new("settings", "Open Settings", || {})]);
    controller.open();
    controller.set_query("zzz");

    assert!(!controller.complete());
    assert_eq!(controller.query(), "zzz");
}

#[tokio::test(start_paused = true)]
async fn test_close_resets_everything() {
    let (courses, _) = category("courses", MockService::new(algebra()));
    let mut controller = SearchController::default().with_categories(vec![courses]);
    controller.open();
    controller.set_query("ab");
    controller.process_next().await;
    controller.process_next().await;
    controller.set_active_filter(ActiveFilter::Category("courses".to_string()));
    controller.set_query("abc");

    controller.close();
    controller.close();

    assert_eq!(controller.query(), "");
    assert_eq!(*controller.active_filter(), ActiveFilter::All);
    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());
    assert_eq!(controller.state(), SearchState::Closed);

    // Neither the cancelled debounce nor the in-flight fetch may bring anything back
    wait(1_000).await;
    controller.poll_events();
    assert!(controller.results().is_empty());
    assert_eq!(controller.query(), "");
}

#[tokio::test]
async fn test_command_selection_closes_then_runs() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let mut controller = SearchController::default().with_static_commands(vec![Command::new(
        "dash",
        "Dashboard",
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    )]);
    controller.open();
    controller.set_query("da");

    assert!(controller.select_command(omnisearch::search::CommandSource::Static, 0));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(!controller.is_open());
    assert!(!controller.select_command(omnisearch::search::CommandSource::Static, 5));
}

#[tokio::test]
async fn test_create_affordance_uses_raw_query() {
    let created = Arc::new(Mutex::new(Vec::new()));
    let sink = created.clone();
    let (courses, _) = category("courses", MockService::new(algebra()));
    let courses = courses.with_on_create(move |query: &str| sink.lock().unwrap().push(query.to_string()));
    let (people, _) = category("people", MockService::new(algebra()));
    let mut controller = SearchController::new(SearchOptions::default()).with_categories(vec![courses, people]);
    controller.open();

    controller.set_query("al");
    assert!(controller.create_candidates().is_empty());

    controller.set_query("/new");
    assert!(controller.create_candidates().is_empty());

    controller.set_query("Geo");
    let ids: Vec<&str> = controller.create_candidates().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["courses"]);

    // Narrowed to the creating category it is still offered
    controller.set_active_filter(ActiveFilter::Category("courses".to_string()));
    assert_eq!(controller.create_candidates().len(), 1);

    assert!(controller.select_create("courses"));
    assert_eq!(*created.lock().unwrap(), vec!["Geo"]);
    assert!(!controller.is_open());
}
