use omnisearch::recent_activity::{ActivityItem, FileStore, KeyValueStore, MemoryStore, RecentActivity, StoreError};
use std::sync::{Arc, Mutex};

fn lesson(entity_id: &str, title: &str) -> ActivityItem {
    ActivityItem::new("course-1", "lesson", entity_id, format!("/lessons/{}", entity_id), title)
}

#[test]
fn test_add_item_dedups_and_moves_to_front() {
    let activity = RecentActivity::new(Arc::new(MemoryStore::new()));
    activity.add_item("recent", lesson("1", "One")).unwrap();
    activity.add_item("recent", lesson("2", "Two")).unwrap();
    activity.add_item("recent", lesson("1", "One again")).unwrap();

    let items = activity.list("recent").unwrap();
    let ids: Vec<&str> = items.iter().map(|item| item.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(items[0].title, "One again");
    assert!(items[0].updated_at > 0);
}

#[test]
fn test_same_entity_in_other_scope_is_kept() {
    let activity = RecentActivity::new(Arc::new(MemoryStore::new()));
    activity.add_item("recent", lesson("1", "One")).unwrap();
    let mut other = lesson("1", "One elsewhere");
    other.scope_key = "course-2".to_string();
    activity.add_item("recent", other).unwrap();

    assert_eq!(activity.list("recent").unwrap().len(), 2);
}

#[test]
fn test_list_is_capped() {
    let activity = RecentActivity::new(Arc::new(MemoryStore::new())).with_max_items(3);
    for id in 0..5 {
        activity.add_item("recent", lesson(&id.to_string(), "L")).unwrap();
    }

    let ids: Vec<String> = activity
        .list("recent")
        .unwrap()
        .into_iter()
        .map(|item| item.entity_id)
        .collect();
    assert_eq!(ids, vec!["4", "3", "2"]);
}

#[test]
fn test_default_cap_is_twenty() {
    let activity = RecentActivity::new(Arc::new(MemoryStore::new()));
    for id in 0..25 {
        activity.add_item("recent", lesson(&id.to_string(), "L")).unwrap();
    }
    assert_eq!(activity.list("recent").unwrap().len(), 20);
}

#[test]
fn test_subscribers_hear_the_storage_key() {
    let activity = RecentActivity::new(Arc::new(MemoryStore::new()));
    let heard = Arc::new(Mutex::new(Vec::new()));
    let sink = heard.clone();
    let sub = activity.subscribe(move |key| sink.lock().unwrap().push(key.to_string()));

    activity.add_item("recent", lesson("1", "One")).unwrap();
    activity.clear("recent").unwrap();
    assert!(matches!(activity.add_item("", lesson("2", "Two")), Err(StoreError::MissingKey)));
    drop(sub);
    activity.add_item("recent", lesson("3", "Three")).unwrap();

    assert_eq!(*heard.lock().unwrap(), vec!["recent", "recent"]);
}

#[test]
fn test_clear_removes_key() {
    let store = Arc::new(MemoryStore::new());
    let activity = RecentActivity::new(store.clone());
    activity.add_item("recent", lesson("1", "One")).unwrap();
    activity.clear("recent").unwrap();

    assert_eq!(store.get("recent").unwrap(), None);
    assert!(activity.list("recent").unwrap().is_empty());
}

#[test]
fn test_file_store_persists_across_instances() {
    let path = std::env::temp_dir().join(format!("omnisearch-store-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let activity = RecentActivity::new(Arc::new(FileStore::new(&path)));
        activity.add_item("recent", lesson("1", "One")).unwrap();
    }

    let activity = RecentActivity::new(Arc::new(FileStore::new(&path)));
    let items = activity.list("recent").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].route, "/lessons/1");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("entityId"));

    let _ = std::fs::remove_file(&path);
}
