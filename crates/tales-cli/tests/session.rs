use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn write_token(home: &TempDir, token: &str) {
    fs::write(home.path().join("token"), token).unwrap();
}

#[tokio::test]
async fn test_login_stores_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"phone": "1234567890", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "demo-token-1234567890"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["login", "--phone", "1234567890", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in."));

    let token = fs::read_to_string(home.path().join("token")).unwrap();
    assert_eq!(token, "demo-token-1234567890");

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"));
}

#[tokio::test]
async fn test_login_fails_when_token_cannot_be_saved() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    // A directory in place of the token file makes the write fail, even as root.
    fs::create_dir(home.path().join("token")).unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok"})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["login", "--phone", "1234567890", "--password", "secret"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Logged in.").not())
        .stderr(predicate::str::contains("save session token"));
}

#[tokio::test]
async fn test_login_with_empty_token_is_rejected() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["login", "--phone", "1234567890", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login failed"));

    assert!(!home.path().join("token").exists());
}

#[tokio::test]
async fn test_invalid_phone_sends_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "nope"})))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["register", "--phone", "12345", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Phone must be a 10-digit number"));

    assert!(!home.path().join("token").exists());
}

#[test]
fn test_empty_password_from_stdin_is_rejected() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", "http://127.0.0.1:9")
        .env_remove("TALES_PASSWORD")
        .args(["login", "--phone", "1234567890"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Password is required"));
}

#[tokio::test]
async fn test_register_reads_password_from_stdin() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({"phone": "5551234567", "password": "from stdin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .env_remove("TALES_PASSWORD")
        .args(["register", "--phone", "5551234567"])
        .write_stdin("from stdin\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered and logged in."));
}

#[tokio::test]
async fn test_login_failure_surfaces_detail() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["login", "--phone", "1234567890", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[tokio::test]
async fn test_register_failure_without_detail_uses_default() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    write_token(&home, "existing");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["register", "--phone", "1234567890", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Registration failed"));

    // A failed attempt leaves the stored session alone.
    let token = fs::read_to_string(home.path().join("token")).unwrap();
    assert_eq!(token, "existing");
}

#[test]
fn test_logout_is_idempotent() {
    let home = TempDir::new().unwrap();
    write_token(&home, "tok");

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    assert!(!home.path().join("token").exists());

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_read_requires_session() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .arg("read")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_read_prints_story_for_mode() {
    let home = TempDir::new().unwrap();
    write_token(&home, "tok");

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .args(["read", "--mode", "dyslexia"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Whisper in the Hall"))
        .stdout(predicate::str::contains("something   began   to   hum   my   name."));
}

#[tokio::test]
async fn test_users_sends_admin_secret() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("X-Admin-Secret", "devsecret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"users": [{"phone": "1234567890"}]})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env("TALES_BASE_URL", server.uri())
        .args(["users", "--secret", "devsecret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1234567890"));
}

#[test]
fn test_users_without_secret_fails() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("tales")
        .env("TALES_HOME", home.path())
        .env_remove("TALES_ADMIN_SECRET")
        .arg("users")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No admin secret"));
}
