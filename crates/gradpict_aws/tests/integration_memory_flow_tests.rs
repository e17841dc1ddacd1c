mod support;

use gradpict_aws::error::TableError;
use gradpict_aws::MemoryStore;
use gradpict_core::provisioning::{TableHandle, TableStatus};
use serde_json::json;
use support::backends::InMemoryTable;
use support::fixtures::fields;

fn memory_store() -> MemoryStore<InMemoryTable> {
    let handle = TableHandle {
        table_name: "gradpict-memories".to_string(),
        status: TableStatus::Existing,
    };
    MemoryStore::for_handle(&handle, InMemoryTable::default())
}

#[tokio::test]
async fn store_opened_from_handle_targets_its_table() {
    let store = memory_store();
    assert_eq!(store.table(), "gradpict-memories");
    assert_eq!(store.backend().row_count(), 0);
}

#[tokio::test]
async fn created_memory_is_returned_verbatim() {
    let store = memory_store();
    store
        .create_memory(&fields(json!({"id": "m1", "user_id": "u1", "title": "Grad 2024"})))
        .await
        .expect("create should succeed");

    let memory = store
        .get_memory("m1", "u1")
        .await
        .expect("get should succeed")
        .expect("memory should exist");

    assert_eq!(
        memory,
        fields(json!({"id": "m1", "user_id": "u1", "title": "Grad 2024"}))
    );
}

#[tokio::test]
async fn update_keeps_key_and_untouched_fields() {
    let store = memory_store();
    store
        .create_memory(&fields(json!({
            "id": "m1",
            "user_id": "u1",
            "title": "Grad 2024",
            "photos": ["cap.jpg", "gown.jpg"],
            "public": true
        })))
        .await
        .expect("create should succeed");

    store
        .update_memory("m1", "u1", &fields(json!({"title": "Updated", "likes": 4})))
        .await
        .expect("update should succeed");

    let memory = store
        .get_memory("m1", "u1")
        .await
        .expect("get should succeed")
        .expect("memory should exist");
    assert_eq!(memory["id"], json!("m1"));
    assert_eq!(memory["user_id"], json!("u1"));
    assert_eq!(memory["title"], json!("Updated"));
    assert_eq!(memory["likes"], json!(4));
    assert_eq!(memory["photos"], json!(["cap.jpg", "gown.jpg"]));
    assert_eq!(memory["public"], json!(true));
}

#[tokio::test]
async fn create_overwrites_row_with_same_key() {
    let store = memory_store();
    store
        .create_memory(&fields(json!({"id": "m1", "user_id": "u1", "title": "First"})))
        .await
        .expect("create should succeed");
    store
        .create_memory(&fields(json!({"id": "m1", "user_id": "u1", "caption": "Second"})))
        .await
        .expect("overwrite should succeed");

    let memory = store
        .get_memory("m1", "u1")
        .await
        .expect("get should succeed")
        .expect("memory should exist");
    assert_eq!(
        memory,
        fields(json!({"id": "m1", "user_id": "u1", "caption": "Second"}))
    );
}

#[tokio::test]
async fn same_id_for_different_users_are_separate_rows() {
    let store = memory_store();
    for user_id in ["u1", "u2"] {
        store
            .create_memory(&fields(json!({"id": "m1", "user_id": user_id})))
            .await
            .expect("create should succeed");
    }

    assert!(store.get_memory("m1", "u1").await.expect("get").is_some());
    assert!(store.get_memory("m1", "u2").await.expect("get").is_some());
    assert!(store.get_memory("m1", "u3").await.expect("get").is_none());
    assert_eq!(store.backend().row_count(), 2);
}

#[tokio::test]
async fn never_inserted_keys_are_not_found() {
    let store = memory_store();

    for (id, user_id) in [("m1", "u1"), ("grad-2024", "student-9"), ("x", "y")] {
        let memory = store
            .get_memory(id, user_id)
            .await
            .expect("missing rows should not error");
        assert!(memory.is_none());
    }
}

#[tokio::test]
async fn update_rejects_key_fields() {
    let store = memory_store();

    let error = store
        .update_memory("m1", "u1", &fields(json!({"id": "m2"})))
        .await
        .expect_err("key update should fail");

    assert!(matches!(error, TableError::InvalidRequest(_)));
}
