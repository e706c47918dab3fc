//! Store Integration Tests
//!
//! Tests for the in-memory session and record stores, including the
//! ownership checks at the record store boundary.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, Priority, TodoDraft, TodoPatch, UserId};
    use crate::store::{MemoryRecordStore, MemorySessionStore, RecordStore, SessionStore};

    fn owner(name: &str) -> UserId {
        UserId::new(name)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");

        let mut draft = TodoDraft::new("Buy milk");
        draft.priority = Priority::High;
        draft.notes = "semi-skimmed".to_string();
        store.insert(&alice, &draft).await.expect("insert failed");

        let items = store.list(&alice).await.expect("list failed");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Buy milk");
        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[0].notes, "semi-skimmed");
        assert!(!items[0].completed);
        assert_eq!(items[0].user_id, alice);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");

        store.insert(&alice, &TodoDraft::new("first")).await.unwrap();
        store.insert(&alice, &TodoDraft::new("second")).await.unwrap();
        store.insert(&alice, &TodoDraft::new("third")).await.unwrap();

        let items = store.list(&alice).await.unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(items[0].text, "third");
    }

    #[tokio::test]
    async fn test_update_fields() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");

        store.insert(&alice, &TodoDraft::new("write report")).await.unwrap();
        let id = store.list(&alice).await.unwrap()[0].id;

        store
            .update_fields(&alice, id, &TodoPatch::completed(true))
            .await
            .expect("update failed");

        let items = store.list(&alice).await.unwrap();
        assert!(items[0].completed);
        assert_eq!(items[0].text, "write report");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");

        store.insert(&alice, &TodoDraft::new("to delete")).await.unwrap();
        let id = store.list(&alice).await.unwrap()[0].id;

        store.delete(&alice, id).await.expect("delete failed");
        assert!(store.list(&alice).await.unwrap().is_empty());

        // Second delete of the same row fails harmlessly
        let err = store.delete(&alice, id).await.unwrap_err();
        assert!(matches!(err, DomainError::Write(_)));
    }

    #[tokio::test]
    async fn test_reads_hide_other_owners() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");
        let bob = owner("bob");

        store.insert(&alice, &TodoDraft::new("alice's")).await.unwrap();
        store.insert(&bob, &TodoDraft::new("bob's")).await.unwrap();

        let alice_items = store.list(&alice).await.unwrap();
        assert_eq!(alice_items.len(), 1);
        assert_eq!(alice_items[0].text, "alice's");
    }

    #[tokio::test]
    async fn test_cross_owner_writes_rejected() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");
        let bob = owner("bob");

        store.insert(&alice, &TodoDraft::new("alice's")).await.unwrap();
        let id = store.list(&alice).await.unwrap()[0].id;

        let err = store
            .update_fields(&bob, id, &TodoPatch::completed(true))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let err = store.delete(&bob, id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // Row untouched
        let items = store.list(&alice).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(!items[0].completed);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryRecordStore::new();
        let alice = owner("alice");

        store.set_fail_writes(true);
        let err = store.insert(&alice, &TodoDraft::new("nope")).await.unwrap_err();
        assert!(matches!(err, DomainError::Write(_)));

        store.set_fail_writes(false);
        store.insert(&alice, &TodoDraft::new("ok")).await.unwrap();

        store.set_fail_fetches(true);
        let err = store.list(&alice).await.unwrap_err();
        assert!(matches!(err, DomainError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_sign_in_publishes_session() {
        let store = MemorySessionStore::new();
        let mut rx = store.subscribe();

        store.sign_up("a@example.com", "hunter2").await.unwrap();
        store.sign_in("a@example.com", "hunter2").await.unwrap();

        rx.changed().await.unwrap();
        let session = rx.borrow_and_update().clone().expect("no session published");
        assert_eq!(session.email, "a@example.com");

        store.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_with_bad_credentials() {
        let store = MemorySessionStore::new();
        store.sign_up("a@example.com", "hunter2").await.unwrap();

        let err = store.sign_in("a@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));

        let err = store.sign_in("nobody@example.com", "hunter2").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_rejected() {
        let store = MemorySessionStore::new();
        store.sign_up("a@example.com", "hunter2").await.unwrap();

        let err = store.sign_up("a@example.com", "other").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));
    }

    #[tokio::test]
    async fn test_blank_sign_up_rejected() {
        let store = MemorySessionStore::new();
        let err = store.sign_up("", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        let err = store.sign_up("a@example.com", "").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_restore_returns_seeded_session() {
        use crate::domain::Session;

        let store = MemorySessionStore::new();
        assert!(store.restore_session().await.unwrap().is_none());

        store
            .seed_session(Session {
                user_id: UserId::new("u1"),
                email: "a@example.com".to_string(),
                access_token: "tok".to_string(),
            })
            .await;
        let restored = store.restore_session().await.unwrap().unwrap();
        assert_eq!(restored.email, "a@example.com");
    }
}
