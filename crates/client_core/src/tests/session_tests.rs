use super::*;

use shared::domain::UserId;

fn profile(role: Role) -> UserProfile {
    UserProfile {
        user_id: UserId(uuid::Uuid::nil()),
        email: "ana@example.com".into(),
        role,
    }
}

#[test]
fn file_store_round_trips_and_clears() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("nested").join("token"));

    assert_eq!(store.load().expect("load missing"), None);

    store.save("jwt-abc").expect("save");
    assert_eq!(store.load().expect("load"), Some("jwt-abc".to_string()));

    store.clear().expect("clear");
    assert_eq!(store.load().expect("load cleared"), None);
    store.clear().expect("clearing twice is fine");
}

#[cfg(unix)]
#[test]
fn file_store_keeps_token_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    fs::write(&path, "old").expect("write");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

    FileTokenStore::new(&path).save("jwt-new").expect("save");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(fs::read_to_string(&path).expect("read"), "jwt-new");

    let fresh = dir.path().join("fresh");
    FileTokenStore::new(&fresh).save("jwt").expect("save fresh");
    let mode = fs::metadata(&fresh).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn file_store_ignores_blank_token_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    fs::write(&path, "  \n").expect("write");

    assert_eq!(FileTokenStore::new(path).load().expect("load"), None);
}

#[test]
fn restore_picks_up_persisted_token_without_profile() {
    let session = Session::restore(Arc::new(MemoryTokenStore::with_token("persisted")));

    assert_eq!(session.token(), Some("persisted"));
    assert!(session.user().is_none());
    assert_eq!(session.role(), Role::Guest);
}

#[test]
fn profile_is_refused_without_token() {
    let mut session = Session::restore(Arc::new(MemoryTokenStore::default()));

    assert!(!session.attach_user(profile(Role::Admin)));
    assert!(session.user().is_none());
    assert_eq!(session.role(), Role::Guest);
}

#[test]
fn begin_persists_token_and_drops_old_profile() {
    let store = Arc::new(MemoryTokenStore::with_token("old"));
    let mut session = Session::restore(store.clone());
    assert!(session.attach_user(profile(Role::Organizer)));

    session.begin("new".into());

    assert_eq!(session.token(), Some("new"));
    assert!(session.user().is_none());
    assert_eq!(store.load().expect("load"), Some("new".to_string()));
}

#[test]
fn clear_drops_token_profile_and_persisted_copy() {
    let store = Arc::new(MemoryTokenStore::with_token("tok"));
    let mut session = Session::restore(store.clone());
    session.attach_user(profile(Role::Attendee));

    session.clear();

    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert_eq!(store.load().expect("load"), None);
}
