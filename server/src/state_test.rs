use super::*;

fn id(raw: &str) -> UserId {
    UserId::from(raw)
}

#[tokio::test]
async fn get_without_put_is_none() {
    let store = ViewStore::new();
    assert_eq!(store.get(&id("nobody")).await, None);
}

#[tokio::test]
async fn put_then_get_returns_value() {
    let store = ViewStore::new();
    let view = MapView::new(45.0, -93.5, Some(10));
    assert!(!store.put(id("abc123"), view).await);
    assert_eq!(store.get(&id("abc123")).await, Some(view));
}

#[tokio::test]
async fn put_overwrites_and_reports_replacement() {
    let store = ViewStore::new();
    store.put(id("abc123"), MapView::new(1.0, 1.0, Some(1))).await;
    let newer = MapView::new(2.0, 2.0, None);
    assert!(store.put(id("abc123"), newer).await);
    assert_eq!(store.get(&id("abc123")).await, Some(newer));
}

#[tokio::test]
async fn clones_share_the_same_table() {
    let store = ViewStore::new();
    let handle = store.clone();
    let view = MapView::new(3.0, 4.0, Some(5));
    handle.put(id("shared"), view).await;
    assert_eq!(store.get(&id("shared")).await, Some(view));
}

#[tokio::test]
async fn concurrent_puts_leave_one_complete_value() {
    let store = ViewStore::new();
    let mut tasks = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let v = f64::from(i);
            store.put(UserId::from("racer"), MapView::new(v, v, Some(i))).await;
        }));
    }
    for task in tasks {
        task.await.expect("task");
    }

    let view = store.get(&id("racer")).await.expect("view");
    let zoom = view.zoom.expect("zoom");
    assert!((view.location.latitude - f64::from(zoom)).abs() < f64::EPSILON);
    assert!((view.location.longitude - f64::from(zoom)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn app_state_starts_with_empty_store() {
    let state = test_helpers::test_app_state();
    assert_eq!(state.views.get(&id("abc123")).await, None);
    assert_eq!(state.assets.file_count(), 0);
}

#[tokio::test]
async fn len_counts_distinct_users() {
    let store = ViewStore::new();
    assert_eq!(store.len().await, 0);
    store.put(id("a"), MapView::new(1.0, 1.0, None)).await;
    store.put(id("a"), MapView::new(2.0, 2.0, None)).await;
    store.put(id("b"), MapView::new(3.0, 3.0, None)).await;
    assert_eq!(store.len().await, 2);
}
