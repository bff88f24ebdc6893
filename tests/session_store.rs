use std::sync::Arc;
use std::time::Duration;

use calchat::models::Message;
use calchat::session::{MemorySessionStore, SessionStore};
use tokio::sync::Barrier;

const PROMPT: &str = "You are a scheduling assistant.";

#[tokio::test]
async fn creates_session_with_fresh_id_when_none_supplied() {
    let store = MemorySessionStore::new(Duration::from_secs(60), 16);

    let (id, handle) = store.get_or_create(None, PROMPT);
    assert!(!id.is_empty());

    let session = handle.lock().await;
    assert_eq!(session.turns.len(), 1);
    assert_eq!(session.turns[0].role, "system");
}

#[tokio::test]
async fn unknown_supplied_id_creates_session_under_that_id() {
    let store = MemorySessionStore::new(Duration::from_secs(60), 16);

    let (id, _) = store.get_or_create(Some("client-chosen".to_string()), PROMPT);
    assert_eq!(id, "client-chosen");
    assert!(store.get("client-chosen").is_some());
}

#[tokio::test]
async fn appended_turns_come_back_in_order() {
    let store = MemorySessionStore::new(Duration::from_secs(60), 16);
    let (id, handle) = store.get_or_create(None, PROMPT);

    {
        let mut session = handle.lock().await;
        session.append(Message::user("first"));
        session.append(Message::assistant("second"));
        session.append(Message::user("third"));
    }

    let handle = store.get(&id).unwrap();
    let session = handle.lock().await;
    let contents: Vec<&str> = session
        .turns
        .iter()
        .skip(1)
        .map(|t| t.content.as_deref().unwrap())
        .collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn sessions_expire_after_ttl() {
    let store = MemorySessionStore::new(Duration::from_millis(20), 16);
    let (id, _) = store.get_or_create(None, PROMPT);
    assert!(store.get(&id).is_some());

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(store.get(&id).is_none());

    // A later message with the stale id gets a fresh transcript.
    let (new_id, handle) = store.get_or_create(Some(id.clone()), PROMPT);
    assert_eq!(new_id, id);
    assert_eq!(handle.lock().await.turns.len(), 1);
}

#[tokio::test]
async fn capacity_bound_evicts_least_recently_seen() {
    let store = MemorySessionStore::new(Duration::from_secs(60), 2);

    let (first, _) = store.get_or_create(None, PROMPT);
    let (second, _) = store.get_or_create(None, PROMPT);
    // Touch the first so the second becomes the eviction candidate.
    assert!(store.get(&first).is_some());

    let (third, _) = store.get_or_create(None, PROMPT);

    assert!(store.get(&first).is_some());
    assert!(store.get(&second).is_none());
    assert!(store.get(&third).is_some());
    assert!(store.len() <= 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creation_under_one_id_keeps_every_turn() {
    const TASKS: usize = 16;
    let store = Arc::new(MemorySessionStore::new(Duration::from_secs(60), 64));
    let barrier = Arc::new(Barrier::new(TASKS));

    // All tasks race get_or_create on the same fresh id; they must end up
    // appending to one shared session rather than clobbering each other.
    let mut tasks = Vec::new();
    for i in 0..TASKS {
        let store = store.clone();
        let barrier = barrier.clone();
        tasks.push(tokio::spawn(async move {
            barrier.wait().await;
            let (_, handle) = store.get_or_create(Some("shared-id".to_string()), PROMPT);
            handle.lock().await.append(Message::user(format!("turn {}", i)));
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let handle = store.get("shared-id").unwrap();
    let session = handle.lock().await;
    assert_eq!(session.turns.len(), 1 + TASKS);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn same_session_handle_is_shared() {
    let store = MemorySessionStore::new(Duration::from_secs(60), 16);
    let (id, first_handle) = store.get_or_create(None, PROMPT);

    {
        let mut session = first_handle.lock().await;
        session.append(Message::user("written through first handle"));
    }

    let second_handle = store.get(&id).unwrap();
    let session = second_handle.lock().await;
    assert_eq!(session.turns.len(), 2);
}
