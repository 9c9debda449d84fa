use std::io::Write;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

fn token_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write token");
    file
}

fn node(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "creator": { "name": "Ada" },
        "title": title,
        "content": "Body",
        "createdAt": "2021-03-07T18:30:00.000Z",
        "imageUrl": format!("images/{id}.png"),
    })
}

fn postfeed() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postfeed"));
    cmd.env_remove("POSTFEED_TOKEN")
        .env_remove("POSTFEED_CONFIG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn feed_prints_requested_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql").body_includes("FetchStatus");
        then.status(200)
            .json_body(json!({ "data": { "getStatus": { "status": "writing" } } }));
    });
    server.mock(|when, then| {
        when.method("POST")
            .path("/graphql")
            .body_includes("FetchPosts")
            .json_body_includes(r#"{"variables":{"page":1}}"#);
        then.status(200).json_body(json!({
            "data": { "getPosts": { "posts": [node("a", "First"), node("b", "Second")], "totalItems": 3 } }
        }));
    });
    let second = server.mock(|when, then| {
        when.method("POST")
            .path("/graphql")
            .header("authorization", "Bearer cli-token")
            .body_includes("FetchPosts")
            .json_body_includes(r#"{"variables":{"page":2}}"#);
        then.status(200).json_body(json!({
            "data": { "getPosts": { "posts": [node("c", "Third")], "totalItems": 3 } }
        }));
    });

    let token = token_file("cli-token\n");
    let assert = postfeed()
        .arg("--endpoint")
        .arg(server.base_url())
        .arg("--token-file")
        .arg(token.path())
        .args(["feed", "--page", "2"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Page 2 of 2 (3 posts)"), "{output}");
    assert!(output.contains("Status: writing"), "{output}");
    assert!(output.contains("c  Third (by Ada on 3/7/2021)"), "{output}");
    assert!(!output.contains("First"), "{output}");
    second.assert();
}

#[test]
fn show_prints_post_detail() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/graphql")
            .header("authorization", "Bearer env-token")
            .body_includes("FetchPost(");
        then.status(200)
            .json_body(json!({ "data": { "getPost": node("a", "First") } }));
    });

    postfeed()
        .env("POSTFEED_TOKEN", "env-token")
        .arg("--endpoint")
        .arg(server.base_url())
        .args(["show", "a"])
        .assert()
        .success()
        .stdout(contains("First"))
        .stdout(contains("Created by Ada on 3/7/2021"))
        .stdout(contains(format!("Image: {}/images/a.png", server.base_url())));
    mock.assert();
}

#[test]
fn status_set_reports_new_value() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/graphql")
            .body_includes("UserStatusUpdate")
            .json_body_includes(r#"{"variables":{"status":"on holiday"}}"#);
        then.status(200)
            .json_body(json!({ "data": { "updateStatus": { "status": "on holiday" } } }));
    });

    postfeed()
        .env("POSTFEED_TOKEN", "env-token")
        .arg("--endpoint")
        .arg(server.base_url())
        .args(["status", "--set", "on holiday"])
        .assert()
        .success()
        .stdout(contains("Status: on holiday"));
    mock.assert();
}

#[test]
fn feed_failure_exits_non_zero() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql");
        then.status(200)
            .json_body(json!({ "errors": [{ "message": "Not authenticated!", "status": 401 }] }));
    });

    postfeed()
        .env("POSTFEED_TOKEN", "env-token")
        .arg("--endpoint")
        .arg(server.base_url())
        .arg("feed")
        .assert()
        .failure()
        .stderr(contains("Not authenticated!"));
}

#[test]
fn missing_token_fails_fast() {
    postfeed()
        .args(["--endpoint", "http://127.0.0.1:9", "feed"])
        .assert()
        .failure()
        .stderr(contains("bearer token is required"));
}

#[test]
fn shell_creates_post_and_quits() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql").body_includes("FetchStatus");
        then.status(200)
            .json_body(json!({ "data": { "getStatus": { "status": "" } } }));
    });
    server.mock(|when, then| {
        when.method("POST").path("/graphql").body_includes("FetchPosts");
        then.status(200).json_body(json!({
            "data": { "getPosts": { "posts": [node("a", "First"), node("b", "Second")], "totalItems": 2 } }
        }));
    });
    server.mock(|when, then| {
        when.method("PUT").path("/upload-image");
        then.status(200)
            .json_body(json!({ "message": "File stored.", "filePath": "images/n.png" }));
    });
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/graphql")
            .body_includes("CreateNewPost");
        then.status(200)
            .json_body(json!({ "data": { "createPost": node("n", "Fresh") } }));
    });

    let assert = postfeed()
        .env("POSTFEED_TOKEN", "env-token")
        .arg("--endpoint")
        .arg(server.base_url())
        .arg("shell")
        .write_stdin("new Fresh | Just written\nquit\n")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let (mounted, after_create) = output
        .split_once("n  Fresh")
        .expect("created post is rendered");
    assert!(mounted.contains("Second"), "{output}");
    assert!(mounted.contains("Page 1 of 2 (3 posts)"), "{output}");
    assert!(!after_create.contains("Second"), "{output}");
    create.assert();
}

#[test]
fn shell_reports_unreadable_image_in_error_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql").body_includes("FetchStatus");
        then.status(200)
            .json_body(json!({ "data": { "getStatus": { "status": "" } } }));
    });
    server.mock(|when, then| {
        when.method("POST").path("/graphql").body_includes("FetchPosts");
        then.status(200).json_body(json!({
            "data": { "getPosts": { "posts": [node("a", "First")], "totalItems": 1 } }
        }));
    });
    let upload = server.mock(|when, then| {
        when.method("PUT").path("/upload-image");
        then.status(200)
            .json_body(json!({ "message": "File stored.", "filePath": "images/n.png" }));
    });

    let assert = postfeed()
        .env("POSTFEED_TOKEN", "env-token")
        .arg("--endpoint")
        .arg(server.base_url())
        .arg("shell")
        .write_stdin("new Fresh | Body | /definitely/missing/x.png\ndismiss\nquit\n")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let (before_dismiss, after_dismiss) = output
        .split_once("Error: invalid input: failed to read image")
        .expect("error line is rendered");
    assert!(before_dismiss.contains("a  First"), "{output}");
    assert!(!after_dismiss.contains("Error:"), "{output}");
    assert_eq!(upload.calls(), 0);
}
