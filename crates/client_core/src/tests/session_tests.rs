use super::*;

#[test]
fn file_store_round_trips_and_clears_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileSessionStore::in_dir(dir.path().join("profile"));

    assert_eq!(store.token().expect("read"), None);

    store.store_token("abc").expect("store");
    assert_eq!(store.path(), dir.path().join("profile").join(TOKEN_KEY));
    assert_eq!(store.token().expect("read"), Some("abc".to_string()));

    store.clear_token().expect("clear");
    assert_eq!(store.token().expect("read"), None);
    assert!(!store.path().exists());
}

#[test]
fn file_store_survives_a_new_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    FileSessionStore::in_dir(dir.path())
        .store_token("persisted-token")
        .expect("store");

    let reopened = FileSessionStore::in_dir(dir.path());
    assert_eq!(
        reopened.token().expect("read"),
        Some("persisted-token".to_string())
    );
}

#[test]
fn clearing_a_missing_token_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileSessionStore::in_dir(dir.path());
    store.clear_token().expect("clear missing");
}

#[test]
fn blank_token_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileSessionStore::in_dir(dir.path());
    fs::write(store.path(), "  \n").expect("write blank");
    assert_eq!(store.token().expect("read"), None);
}

#[test]
fn memory_store_tracks_token() {
    let store = MemorySessionStore::with_token("abc");
    assert_eq!(store.token().expect("read"), Some("abc".to_string()));
    store.clear_token().expect("clear");
    assert_eq!(store.token().expect("read"), None);
    store.store_token("def").expect("store");
    assert_eq!(store.token().expect("read"), Some("def".to_string()));
}

#[cfg(unix)]
#[test]
fn token_file_is_private_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileSessionStore::in_dir(dir.path());
    fs::write(store.path(), "older-token").expect("seed readable file");
    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).expect("chmod");

    store.store_token("abc").expect("store");

    let mode = fs::metadata(store.path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.token().expect("read"), Some("abc".to_string()));
}
