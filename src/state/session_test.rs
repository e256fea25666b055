use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

fn alice() -> Identity {
    Identity {
        id: 1,
        username: "alice".to_owned(),
        role: Role::Student,
        display_name: "Alice".to_owned(),
        must_change_password: None,
    }
}

fn alice_json() -> String {
    serde_json::to_string(&alice()).unwrap()
}

fn login_response() -> LoginResponse {
    LoginResponse { access_token: "tok123".to_owned(), user: alice() }
}

fn logged_in() -> SessionStore<MemoryStorage> {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.begin_login().unwrap();
    store.finish_login(login_response());
    store
}

// =============================================================
// Restore
// =============================================================

#[test]
fn restore_empty_storage_is_logged_out() {
    let store = SessionStore::restore(MemoryStorage::new());
    assert!(!store.is_authenticated());
    assert_eq!(store.token(), None);
    assert_eq!(store.credentials(), None);
}

#[test]
fn restore_reads_token_and_user() {
    let user = alice_json();
    let store = SessionStore::restore(MemoryStorage::with_entries([(TOKEN_KEY, "tok123"), (USER_KEY, user.as_str())]));
    assert!(store.is_authenticated());
    assert_eq!(store.token(), Some("tok123"));
    assert_eq!(store.identity(), Some(&alice()));
    assert_eq!(store.role(), Some(Role::Student));
    assert_eq!(store.credentials(), None, "credentials wait for init_from_storage");
}

#[test]
fn restore_purges_corrupt_user() {
    let store = SessionStore::restore(MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]));
    assert!(!store.is_authenticated());
    assert!(store.storage().is_empty());
}

#[test]
fn restore_purges_unknown_role() {
    let raw = r#"{"id":1,"username":"x","role":"janitor","display_name":"X"}"#;
    let store = SessionStore::restore(MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, raw)]));
    assert!(!store.is_authenticated());
    assert!(store.storage().is_empty());
}

#[test]
fn restore_purges_unpaired_entries() {
    let token_only = SessionStore::restore(MemoryStorage::with_entries([(TOKEN_KEY, "tok")]));
    assert!(!token_only.is_authenticated());
    assert!(token_only.storage().is_empty());

    let user = alice_json();
    let user_only = SessionStore::restore(MemoryStorage::with_entries([(USER_KEY, user.as_str())]));
    assert!(!user_only.is_authenticated());
    assert!(user_only.storage().is_empty());
}

#[test]
fn load_persisted_reports_parse_errors() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "tok")]);
    assert_eq!(
        load_persisted(&storage),
        Err(StorageParseError::Unpaired { present: TOKEN_KEY, missing: USER_KEY })
    );

    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "[]")]);
    assert!(matches!(load_persisted(&storage), Err(StorageParseError::InvalidUser(_))));

    let storage = MemoryStorage::with_entries([(TOKEN_KEY, ""), (USER_KEY, "{}")]);
    assert!(matches!(load_persisted(&storage), Err(StorageParseError::Unpaired { present: USER_KEY, .. })));
}

// =============================================================
// init_from_storage
// =============================================================

#[test]
fn init_from_storage_without_token_sets_nothing() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.init_from_storage();
    assert_eq!(store.credentials(), None);
    assert!(!store.is_authenticated());
}

#[test]
fn init_from_storage_applies_bearer_and_is_idempotent() {
    let user = alice_json();
    let mut store = SessionStore::restore(MemoryStorage::with_entries([(TOKEN_KEY, "tok123"), (USER_KEY, user.as_str())]));
    store.init_from_storage();
    let first = store.clone();
    store.init_from_storage();
    assert_eq!(store, first);
    assert_eq!(store.credentials().map(Credentials::header_value), Some("Bearer tok123"));
}

// =============================================================
// Login / logout
// =============================================================

#[test]
fn finish_login_sets_session_credentials_and_storage() {
    let store = logged_in();
    assert!(store.is_authenticated());
    assert_eq!(store.token(), Some("tok123"));
    assert_eq!(store.credentials().map(Credentials::header_value), Some("Bearer tok123"));
    assert_eq!(store.storage().get(TOKEN_KEY).as_deref(), Some("tok123"));
    let persisted: Identity = serde_json::from_str(&store.storage().get(USER_KEY).unwrap()).unwrap();
    assert_eq!(persisted, alice());
    assert!(!store.is_login_pending());
}

#[test]
fn persisted_login_restores_on_next_load() {
    let store = logged_in();
    let mut reloaded = SessionStore::restore(store.storage().clone());
    reloaded.init_from_storage();
    assert_eq!(reloaded.session(), store.session());
    assert_eq!(reloaded.credentials(), store.credentials());
}

#[test]
fn logout_clears_everything() {
    let mut store = logged_in();
    store.logout();
    assert!(!store.is_authenticated());
    assert_eq!(store.identity(), None);
    assert_eq!(store.credentials(), None);
    assert!(store.storage().is_empty());
}

#[test]
fn logout_after_login_restores_pre_login_state() {
    let before = SessionStore::restore(MemoryStorage::new());
    let mut store = before.clone();
    store.begin_login().unwrap();
    store.finish_login(login_response());
    store.logout();
    assert_eq!(store, before);
}

#[test]
fn logout_when_logged_out_is_harmless() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.logout();
    assert!(!store.is_authenticated());
}

#[test]
fn begin_login_rejects_second_attempt_until_finished() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.begin_login().unwrap();
    assert_eq!(store.begin_login(), Err(SessionError::LoginInProgress));

    store.abort_login();
    assert!(!store.is_login_pending());
    assert_eq!(store.begin_login(), Ok(()));
}

#[test]
fn abort_login_keeps_existing_session() {
    let mut store = logged_in();
    store.begin_login().unwrap();
    store.abort_login();
    assert_eq!(store.token(), Some("tok123"));
}

// =============================================================
// apply_current_user
// =============================================================

#[test]
fn apply_current_user_updates_identity_and_storage() {
    let mut store = logged_in();
    let updated = store
        .apply_current_user("tok123", CurrentUser {
            id: 1,
            username: "alice".to_owned(),
            role: Role::Student,
            display_name: "Alice Liddell".to_owned(),
            email: Some("alice@example.test".to_owned()),
            phone: None,
        })
        .unwrap();
    assert_eq!(updated.display_name, "Alice Liddell");
    assert_eq!(store.token(), Some("tok123"));
    assert!(store.storage().get(USER_KEY).unwrap().contains("Alice Liddell"));
}

#[test]
fn apply_current_user_when_logged_out_is_none() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    let current = CurrentUser {
        id: 1,
        username: "a".to_owned(),
        role: Role::Admin,
        display_name: "A".to_owned(),
        email: None,
        phone: None,
    };
    assert_eq!(store.apply_current_user("tok123", current), None);
    assert!(store.storage().is_empty());
}

#[test]
fn apply_current_user_for_stale_token_is_ignored() {
    let mut store = logged_in();
    let before = store.clone();
    let current = CurrentUser {
        id: 9,
        username: "mallory".to_owned(),
        role: Role::Admin,
        display_name: "Mallory".to_owned(),
        email: None,
        phone: None,
    };
    assert_eq!(store.apply_current_user("old-token", current), None);
    assert_eq!(store, before);
}

#[test]
fn logout_if_token_only_drops_matching_session() {
    let mut store = logged_in();
    assert!(!store.logout_if_token("old-token"));
    assert!(store.is_authenticated());

    assert!(store.logout_if_token("tok123"));
    assert!(!store.is_authenticated());
    assert!(store.storage().is_empty());
}

// =============================================================
// Errors
// =============================================================

#[test]
fn login_failure_maps_status_to_authentication() {
    let err = SessionError::from_login_failure(ApiError::Status { status: 401, message: Some("bad".to_owned()) });
    assert_eq!(err, SessionError::Authentication { status: 401, message: "bad".to_owned() });
    assert_eq!(err.user_message(), "bad");

    let err = SessionError::from_login_failure(ApiError::Status { status: 403, message: None });
    assert_eq!(err.user_message(), "Account is not active yet.");
}

#[test]
fn login_failure_keeps_transport_errors() {
    let err = SessionError::from_login_failure(ApiError::Network("offline".to_owned()));
    assert_eq!(err, SessionError::Transport(ApiError::Network("offline".to_owned())));
    assert!(err.user_message().contains("offline"));
}
