use super::*;
use crate::net::types::Role;
use crate::router::guard::{Navigation, guard};
use crate::state::session::{Credentials, TOKEN_KEY, USER_KEY};
use crate::util::storage::MemoryStorage;

const STORED_USER: &str = r#"{"id":1,"username":"alice","role":"student","display_name":"Alice"}"#;

// =============================================================================
// prepare
// =============================================================================

#[test]
fn prepare_applies_stored_credentials_before_first_navigation() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "T1"), (USER_KEY, STORED_USER)]);
    let ctx = prepare(ClientConfig::default(), storage);

    assert_eq!(ctx.session.credentials(), Some(&Credentials::bearer("T1")));
    assert_eq!(ctx.session.role(), Some(Role::Student));
    assert_eq!(guard(&ctx.session, "/student/dashboard"), Navigation::Allow);
}

#[test]
fn prepare_with_empty_storage_starts_logged_out() {
    let ctx = prepare(ClientConfig::default(), MemoryStorage::new());
    assert!(!ctx.session.is_authenticated());
    assert!(ctx.session.credentials().is_none());
    assert!(matches!(guard(&ctx.session, "/admin/users"), Navigation::Redirect(_)));
}

#[test]
fn prepare_purges_corrupt_storage() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "T1"), (USER_KEY, "{not json")]);
    let ctx = prepare(ClientConfig::default(), storage);

    assert!(!ctx.session.is_authenticated());
    assert!(ctx.session.storage().is_empty());
}

#[test]
fn prepare_binds_client_to_configured_origin() {
    let config = ClientConfig::from_values(Some("http://localhost:5000/"), None).expect("valid config");
    let ctx = prepare(config, MemoryStorage::new());
    assert_eq!(ctx.api.url("/api/health"), "http://localhost:5000/api/health");
}

#[test]
fn prepare_registers_standard_icons() {
    let ctx = prepare(ClientConfig::default(), MemoryStorage::new());
    assert!(ctx.icons.get("House").is_some());
    assert!(ctx.icons.get("SwitchButton").is_some());
}
