use postflow::credentials::CREDENTIAL_KEY;
use postflow::{CredentialStore, Error, FileStore, KeyValueStore};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

fn file_credentials(dir: &TempDir) -> CredentialStore<FileStore> {
    CredentialStore::new(FileStore::new(dir.path().join("store.json")))
}

#[test]
fn test_saved_key_persists_across_store_instances() {
    let dir = TempDir::new().unwrap();
    assert_ok!(file_credentials(&dir).save("sk-persisted-key"));

    let reopened = file_credentials(&dir);
    let credential = assert_ok!(reopened.get()).expect("Key should be stored");
    assert_eq!(credential.expose(), "sk-persisted-key");
}

#[test]
fn test_key_lives_under_single_store_entry() {
    let dir = TempDir::new().unwrap();
    let credentials = file_credentials(&dir);
    assert_ok!(credentials.save("sk-abc"));

    let raw = assert_ok!(credentials.backend().get(CREDENTIAL_KEY));
    assert_eq!(raw.as_deref(), Some("sk-abc"));
}

#[test]
fn test_rejected_saves_do_not_touch_the_file() {
    let dir = TempDir::new().unwrap();
    let credentials = file_credentials(&dir);
    assert_ok!(credentials.save("sk-keep-me"));
    let before = std::fs::read_to_string(credentials.backend().path()).unwrap();

    assert!(matches!(assert_err!(credentials.save("  ")), Error::EmptyKey));
    assert!(matches!(
        assert_err!(credentials.save("AIzaSyGoogleKey")),
        Error::MalformedKey { .. }
    ));

    let after = std::fs::read_to_string(credentials.backend().path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_clear_then_get_is_absent() {
    let dir = TempDir::new().unwrap();
    let credentials = file_credentials(&dir);

    // Clearing a store that was never written is fine.
    assert_ok!(credentials.clear());
    assert_eq!(assert_ok!(credentials.get()), None);

    assert_ok!(credentials.save("sk-to-be-cleared"));
    assert_ok!(credentials.clear());
    assert_eq!(assert_ok!(credentials.get()), None);
}
