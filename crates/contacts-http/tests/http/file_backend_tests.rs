use super::test_utilities::{TestClient, TestServer, id_from_location};
use contacts::Contact;
use contacts::storage::load_contacts;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn test_file_mirrors_api_mutations() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[]").unwrap();
    let server = TestServer::start_with_file(&path)
        .await
        .expect("Failed to start test server with file backend");
    let helper = TestClient::new(&server);

    let ada = helper.create_contact_location("Ada", "Lovelace").await;
    helper.create_contact_location("Alan", "Turing").await;
    let on_disk = load_contacts(&path).unwrap();
    assert_eq!(on_disk, server.store.read().list());
    assert_eq!(on_disk.len(), 2);

    let response = helper
        .update_contact(id_from_location(&ada), "Augusta", "King")
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(load_contacts(&path).unwrap(), server.store.read().list());

    let response = helper.delete_contact(id_from_location(&ada)).await.unwrap();
    assert_eq!(response.status(), 204);
    let on_disk = load_contacts(&path).unwrap();
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].last_name, "Turing");
}

#[tokio::test]
async fn test_concurrent_creates_all_reach_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[]").unwrap();
    let server = TestServer::start_with_file(&path)
        .await
        .expect("Failed to start test server with file backend");

    let mut handles = Vec::new();
    for i in 0..10 {
        let client = server.contacts_client();
        handles.push(tokio::spawn(async move {
            client
                .create_contact(&format!("First{i}"), &format!("Last{i}"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let on_disk = load_contacts(&path).unwrap();
    assert_eq!(on_disk.len(), 10);
    assert_eq!(on_disk, server.store.read().list());
}

#[tokio::test]
async fn test_server_starts_from_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(
        &path,
        r#"[{"id":"seed01","firstName":"Grace","lastName":"Hopper"}]"#,
    )
    .unwrap();
    let server = TestServer::start_with_file(&path)
        .await
        .expect("Failed to start test server with file backend");
    let helper = TestClient::new(&server);

    let response = helper.get_path("/contacts/seed01").await.unwrap();

    assert_eq!(response.status(), 200);
    let contact: Contact = response.json().await.unwrap();
    assert_eq!(contact.display_name(), "HOPPER Grace");
}

#[tokio::test]
async fn test_failed_delete_does_not_rewrite_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[]").unwrap();
    let server = TestServer::start_with_file(&path)
        .await
        .expect("Failed to start test server with file backend");
    let helper = TestClient::new(&server);

    let response = helper.delete_contact("missing").await.unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[tokio::test]
async fn test_write_failure_is_500_but_keeps_contact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[]").unwrap();
    let server = TestServer::start_with_file(&path)
        .await
        .expect("Failed to start test server with file backend");
    let helper = TestClient::new(&server);

    // Replace the file with a directory so the next write fails
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let response = helper.create_contact("Ada", "Lovelace").await.unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "internal_error");
    assert_eq!(server.store.read().len(), 1);
}
