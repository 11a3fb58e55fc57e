use super::test_utilities::TestServer;
use contacts::ContactStore;
use contacts::storage::{PersistenceBackend, SyncMode, load_contacts};
use contacts_http::api::SharedStore;
use contacts_http::cli::{Commands, Mode, handle_cli_command};
use contacts_http::client::ContactsClient;
use parking_lot::RwLock;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn shared(store: ContactStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

fn file_store(path: &Path, sync_mode: SyncMode) -> SharedStore {
    let backend = PersistenceBackend::new_json_file(path, sync_mode);
    shared(ContactStore::load(path, &backend).unwrap())
}

fn unused_remote() -> ContactsClient {
    // Local modes never touch the remote; port 9 (discard) is never served.
    ContactsClient::for_port(9)
}

async fn run(
    store: &SharedStore,
    mode: Mode,
    remote: &ContactsClient,
    command: Commands,
) -> String {
    let mut out = Vec::new();
    handle_cli_command(store, mode, remote, command, &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn add(first_name: &str, last_name: &str) -> Commands {
    Commands::Add {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

#[tokio::test]
async fn test_add_then_list_prints_formatted_names() {
    let store = shared(ContactStore::default());
    let remote = unused_remote();

    run(&store, Mode::Volatile, &remote, add("ada", "lovelace")).await;
    run(&store, Mode::Volatile, &remote, add("alan", "Turing")).await;
    let output = run(&store, Mode::Volatile, &remote, Commands::List).await;

    assert_eq!(output, "LOVELACE Ada\nTURING Alan\n");
}

#[tokio::test]
async fn test_memory_mode_without_fsync_still_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[]").unwrap();
    let store = file_store(&path, SyncMode::None);
    let remote = unused_remote();

    run(&store, Mode::Memory, &remote, add("Grace", "Hopper")).await;

    assert_eq!(load_contacts(&path).unwrap(), store.read().list());
}

#[tokio::test]
async fn test_memory_mode_persists_each_command() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[]").unwrap();
    let store = file_store(&path, SyncMode::Immediate);
    let remote = unused_remote();

    run(&store, Mode::Memory, &remote, add("Ada", "Lovelace")).await;
    let id = store.read().list()[0].id.clone();
    assert_eq!(load_contacts(&path).unwrap(), store.read().list());

    run(
        &store,
        Mode::Memory,
        &remote,
        Commands::Update {
            id: id.clone(),
            first_name: "Augusta".to_string(),
            last_name: "King".to_string(),
        },
    )
    .await;
    let on_disk = load_contacts(&path).unwrap();
    assert_eq!(on_disk[0].id, id);
    assert_eq!(on_disk[0].first_name, "Augusta");

    let output = run(&store, Mode::Memory, &remote, Commands::Remove { id: id.clone() }).await;
    assert_eq!(output, format!("Removed contact {id}\n"));
    assert!(load_contacts(&path).unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_ids_are_silent_in_local_modes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, r#"[{"id":"keep01","firstName":"Grace","lastName":"Hopper"}]"#).unwrap();
    let before = fs::read(&path).unwrap();
    let store = file_store(&path, SyncMode::Immediate);
    let remote = unused_remote();

    let removed = run(
        &store,
        Mode::Memory,
        &remote,
        Commands::Remove {
            id: "nope".to_string(),
        },
    )
    .await;
    let updated = run(
        &store,
        Mode::Memory,
        &remote,
        Commands::Update {
            id: "nope".to_string(),
            first_name: "X".to_string(),
            last_name: "Y".to_string(),
        },
    )
    .await;

    assert!(removed.is_empty());
    assert!(updated.is_empty());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.read().len(), 1);
}

#[tokio::test]
async fn test_invalid_names_fail_the_command() {
    let store = shared(ContactStore::default());
    let mut out = Vec::new();

    let result = handle_cli_command(
        &store,
        Mode::Volatile,
        &unused_remote(),
        add("", "Lovelace"),
        &mut out,
    )
    .await;

    assert!(result.is_err());
    assert!(store.read().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_http_mode_forwards_mutations_to_remote() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let remote = server.contacts_client();
    let local = shared(ContactStore::default());

    let output = run(&local, Mode::Http, &remote, add("Jane", "Doe")).await;
    let location = output.trim().to_string();
    assert!(location.starts_with("/contacts/"));
    let id = location.trim_start_matches("/contacts/").to_string();
    assert_eq!(server.store.read().get(&id).unwrap().last_name, "Doe");

    run(
        &local,
        Mode::Http,
        &remote,
        Commands::Update {
            id: id.clone(),
            first_name: "Janet".to_string(),
            last_name: "Doe".to_string(),
        },
    )
    .await;
    assert_eq!(server.store.read().get(&id).unwrap().first_name, "Janet");

    let listed = run(&local, Mode::Http, &remote, Commands::List).await;
    assert_eq!(listed, "DOE Janet\n");

    let output = run(&local, Mode::Http, &remote, Commands::Remove { id: id.clone() }).await;
    assert_eq!(output, format!("Removed contact {id}\n"));
    assert!(server.store.read().is_empty());

    let output = run(&local, Mode::Http, &remote, Commands::Remove { id: id.clone() }).await;
    assert!(output.contains("not found"));
}

#[test_log::test(tokio::test)]
async fn test_http_mode_fails_when_remote_is_down() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let local = shared(ContactStore::default());
    let mut out = Vec::new();

    let result = handle_cli_command(
        &local,
        Mode::Http,
        &ContactsClient::for_port(port),
        add("Jane", "Doe"),
        &mut out,
    )
    .await;

    assert!(result.is_err());
}
