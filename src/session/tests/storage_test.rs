//! Tests for the user store and its persisted envelope

use std::sync::Arc;

use super::test_helpers::test_user;
use crate::session::storage::{
    MemorySessionStorage, SessionStorage, UserStore, USER_STORAGE_KEY,
};

fn user_store() -> (Arc<MemorySessionStorage>, UserStore) {
    let backend = Arc::new(MemorySessionStorage::new());
    let store = UserStore::new(backend.clone());
    (backend, store)
}

#[tokio::test]
async fn retrieve_on_empty_backend_is_absent() {
    let (_, store) = user_store();

    assert!(store.retrieve().await.unwrap().is_none());
}

#[tokio::test]
async fn store_then_retrieve_round_trips() {
    let (_, store) = user_store();

    store.store(&test_user()).await.unwrap();
    let user = store.retrieve().await.unwrap().unwrap();

    assert_eq!(user, test_user());
}

#[tokio::test]
async fn envelope_is_written_under_the_fixed_key() {
    let (backend, store) = user_store();

    store.store(&test_user()).await.unwrap();
    let raw = backend.get_item(USER_STORAGE_KEY).await.unwrap().unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(envelope["user"]["username"], "alice");
    assert!(envelope["stored_at"].is_string());
    assert!(envelope["integrity_hash"].is_string());
}

#[tokio::test]
async fn unparsable_envelope_reads_as_absent() {
    let (backend, store) = user_store();

    backend
        .set_item(USER_STORAGE_KEY, "not json at all".to_string())
        .await
        .unwrap();

    assert!(store.retrieve().await.unwrap().is_none());
}

#[tokio::test]
async fn tampered_envelope_reads_as_absent() {
    let (backend, store) = user_store();

    store.store(&test_user()).await.unwrap();
    let raw = backend.get_item(USER_STORAGE_KEY).await.unwrap().unwrap();

    let mut envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
    envelope["user"]["token"] = serde_json::Value::String("forged".to_string());
    backend
        .set_item(USER_STORAGE_KEY, envelope.to_string())
        .await
        .unwrap();

    assert!(store.retrieve().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_removes_the_persisted_user() {
    let (backend, store) = user_store();

    store.store(&test_user()).await.unwrap();
    store.clear().await.unwrap();

    assert!(store.retrieve().await.unwrap().is_none());
    assert!(backend.get_item(USER_STORAGE_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn store_replaces_the_previous_user() {
    let (_, store) = user_store();

    store.store(&test_user()).await.unwrap();

    let mut other = test_user();
    other.username = "bob".to_string();
    other.token = "token-456".to_string();
    store.store(&other).await.unwrap();

    let user = store.retrieve().await.unwrap().unwrap();
    assert_eq!(user.username, "bob");
    assert_eq!(user.token, "token-456");
}
