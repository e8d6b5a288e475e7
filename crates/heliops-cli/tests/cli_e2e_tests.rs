//! End-to-end tests for the heliops binary
//!
//! These tests run the real binary and validate:
//! - Offline fleet math output (hours, stats, chart)
//! - Session handling (login, forced logout on 401, preferences)
//! - Record commands against a mock REST API
//! - Attachments against a mock S3-compatible endpoint

use assert_cmd::Command;
use predicates::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_json, header, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Command isolated from the developer's config, session and `.env`
fn heliops(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("heliops").unwrap();
    cmd.current_dir(dir.path())
        .env("HELIOPS_CONFIG", dir.path().join("config.toml"))
        .env("HELIOPS_SESSION_FILE", session_path(dir))
        .env_remove("HELIOPS_API_URL")
        .env_remove("HELIOPS_PASSWORD")
        .env_remove("HELIOPS_STORAGE_BUCKET")
        .env_remove("HELIOPS_LOG_LEVEL")
        .env_remove("HELIOPS_LOG_OUTPUT");
    cmd
}

fn session_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

/// Helper to store a session as a previous login would have
fn write_session(dir: &TempDir, token: &str) {
    let user = serde_json::json!({
        "id": "o1",
        "name": "Lucía Ferrer",
        "email": "ops@heliops.example",
        "role": "operator"
    });
    let entries = BTreeMap::from([
        ("token".to_string(), token.to_string()),
        ("user".to_string(), user.to_string()),
    ]);
    fs::write(session_path(dir), serde_json::to_string(&entries).unwrap()).unwrap();
}

fn read_session(dir: &TempDir) -> BTreeMap<String, String> {
    serde_json::from_str(&fs::read_to_string(session_path(dir)).unwrap()).unwrap()
}

fn mock_clients() -> serde_json::Value {
    serde_json::json!([
        {"id": "c1", "name": "Minera Andes Norte", "contactName": "Javier Pardo", "type": "corporate"},
        {"id": "c3", "name": "Roberto Vial", "type": "individual"},
        {"id": "c4", "name": "Forestal del Sur", "type": "corporate", "active": false}
    ])
}

#[test]
fn test_stats_offline() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["stats", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fleet overview"))
        .stdout(predicate::str::contains("Total flights"))
        .stdout(predicate::str::contains("Upcoming flights"));
}

#[test]
fn test_hours_offline() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["hours", "p1", "2024", "3", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03"))
        .stdout(predicate::str::contains("night"))
        .stdout(predicate::str::contains("2.50"))
        .stdout(predicate::str::contains("4565.00"));
}

#[test]
fn test_hours_holiday_overrides_night() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["hours", "p1", "2024", "3", "--holiday", "2024-03-05", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("holiday"))
        .stdout(predicate::str::contains("night").not());
}

#[test]
fn test_hours_invalid_month() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["hours", "p1", "2024", "13", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_chart_offline() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["chart", "hours", "--year", "2024", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flight hours 2024"))
        .stdout(predicate::str::contains("Total:"));
}

#[test]
fn test_list_requires_login() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["list", "clients", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_settings_dark_mode_persists() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["settings", "--dark-mode", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark mode:   on"));

    assert_eq!(read_session(&dir).get("darkMode").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn test_login_stores_session() {
    let dir = TempDir::new().unwrap();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "ops@heliops.example",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "jwt-abc",
            "user": {
                "id": "o1",
                "name": "Lucía Ferrer",
                "email": "ops@heliops.example",
                "role": "operator"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["login", "ops@heliops.example", "--password", "hunter2"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as"));

    let session = read_session(&dir);
    assert_eq!(session.get("token").map(String::as_str), Some("jwt-abc"));
    assert!(session.get("user").unwrap().contains("Lucía Ferrer"));
}

#[tokio::test]
async fn test_login_rejected() {
    let dir = TempDir::new().unwrap();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["login", "ops@heliops.example", "--password", "wrong"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!session_path(&dir).exists());
}

#[tokio::test]
async fn test_list_with_search() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_clients()))
        .expect(1)
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["list", "clients", "--search", "andes"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Minera Andes Norte"))
        .stdout(predicate::str::contains("Roberto Vial").not())
        .stdout(predicate::str::contains("Showing 1 of 3"));
}

#[tokio::test]
async fn test_list_with_category() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_clients()))
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["list", "clients", "--category", "corporate"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Forestal del Sur"))
        .stdout(predicate::str::contains("Showing 2 of 3"));
}

#[tokio::test]
async fn test_delete_with_yes_refetches() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clients/c4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_clients()))
        .expect(1)
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["delete", "clients", "c4", "--yes"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted client c4"));
}

#[tokio::test]
async fn test_create_from_file() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;

    let data = dir.path().join("client.json");
    fs::write(&data, r#"{"name": "Aerocondor", "type": "corporate"}"#).unwrap();

    Mock::given(method("POST"))
        .and(path("/clients"))
        .and(body_json(serde_json::json!({
            "name": "Aerocondor",
            "type": "corporate",
            "active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {"id": "c9", "name": "Aerocondor", "type": "corporate"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_clients()))
        .expect(1)
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["create", "clients", "--data"])
        .arg(&data)
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created client c9"));
}

#[tokio::test]
async fn test_create_with_attachment_needs_storage() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;

    let data = dir.path().join("helicopter.json");
    fs::write(
        &data,
        r#"{"model": "Airbus H125", "registration": "CC-AHL", "manufactureYear": 2019, "status": "active"}"#,
    )
    .unwrap();
    let image = dir.path().join("h125.jpg");
    fs::write(&image, b"jpeg").unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["create", "helicopters", "--data"])
        .arg(&data)
        .arg("--attach")
        .arg(&image)
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .failure()
        .stderr(predicate::str::contains("object storage is not configured"));
}

#[test]
fn test_pilot_filter_rejected_for_clients() {
    let dir = TempDir::new().unwrap();

    heliops(&dir)
        .args(["list", "clients", "--pilot", "p1", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pilot applies to flights"));
}

/// Mount the collections a flight listing reads, from the built-in dataset
async fn mount_fleet(server: &MockServer) {
    let data = heliops_common::fixture::dataset();
    for (route, body) in [
        ("/flights", serde_json::to_value(&data.flights).unwrap()),
        ("/pilots", serde_json::to_value(&data.pilots).unwrap()),
        ("/helicopters", serde_json::to_value(&data.helicopters).unwrap()),
        ("/clients", serde_json::to_value(&data.clients).unwrap()),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_list_flights_by_pilot_name() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    heliops(&dir)
        .args(["list", "flights", "--search", "mendoza"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Carlos Mendoza"))
        .stdout(predicate::str::contains("Showing 4 of 10"));
}

#[tokio::test]
async fn test_list_flights_for_one_pilot() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    heliops(&dir)
        .args(["list", "flights", "--pilot", "p2"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Lucía Fernández"))
        .stdout(predicate::str::contains("Carlos Mendoza").not())
        .stdout(predicate::str::contains("Showing 3 of 10"));
}

#[tokio::test]
async fn test_upload_replaces_previous_attachment() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let server = MockServer::start().await;

    let image = dir.path().join("h125.jpg");
    fs::write(&image, b"jpeg").unwrap();

    let helicopter = serde_json::json!({
        "id": "h1",
        "model": "Airbus H125",
        "registration": "CC-AHL",
        "manufactureYear": 2019,
        "status": "active",
        "imageUrl": format!("{}/fleet-docs/helicopters/1-old.jpg", server.uri())
    });

    Mock::given(method("GET"))
        .and(path("/helicopters/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helicopter.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/fleet-docs/helicopters/\d+-h125\.jpg$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/helicopters/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helicopter.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/helicopters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([helicopter])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/fleet-docs/helicopters/1-old.jpg"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    heliops(&dir)
        .args(["upload", "helicopters"])
        .arg(&image)
        .args(["--attach-to", "helicopters", "h1"])
        .arg("--api-url")
        .arg(server.uri())
        .env("HELIOPS_STORAGE_BUCKET", "fleet-docs")
        .env("HELIOPS_STORAGE_ENDPOINT", server.uri())
        .env("HELIOPS_STORAGE_PATH_STYLE", "true")
        .env("HELIOPS_STORAGE_ACCESS_KEY", "test")
        .env("HELIOPS_STORAGE_SECRET_KEY", "test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Attached"));
}

#[tokio::test]
async fn test_expired_token_forces_logout() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "stale");
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/helicopters"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "jwt expired"})),
        )
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["list", "helicopters"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .failure()
        .stderr(predicate::str::contains("session has expired"));

    let session = read_session(&dir);
    assert!(!session.contains_key("token"));
    assert!(!session.contains_key("user"));
}

#[tokio::test]
async fn test_forbidden_keeps_session() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, "tok");
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/helicopters/h1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "Admins only"})),
        )
        .mount(&mock_server)
        .await;

    heliops(&dir)
        .args(["delete", "helicopters", "h1", "--yes"])
        .arg("--api-url")
        .arg(mock_server.uri())
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not have permission"));

    assert_eq!(read_session(&dir).get("token").map(String::as_str), Some("tok"));
}

#[test]
fn test_upload_without_storage() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("manual.pdf");
    fs::write(&file, b"%PDF-1.4").unwrap();

    heliops(&dir)
        .args(["upload", "library"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("object storage is not configured"));
}
