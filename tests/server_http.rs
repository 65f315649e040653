//! End-to-end tests driving the notes API over a real socket.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use serde_json::Value;
use sketchnote::server::NotesServer;

struct TestServer {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    // Holds the DB directory alive for the server's lifetime
    _dir: tempfile::TempDir,
}

impl TestServer {
    fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("notes.db");

        let server = NotesServer::bind("127.0.0.1:0", db_path).unwrap();
        let addr = server.local_addr().unwrap();

        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();
        let handle = std::thread::spawn(move || {
            let _ = server.run(flag);
        });

        Self {
            addr,
            shutdown,
            handle: Some(handle),
            _dir: dir,
        }
    }

    fn request(&self, method: &str, path: &str, body: Option<&str>) -> (u16, String) {
        let mut stream = TcpStream::connect(self.addr).unwrap();

        let body = body.unwrap_or("");
        let request = format!(
            "{} {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            method,
            path,
            body.len(),
            body
        );
        stream.write_all(request.as_bytes()).unwrap();
        stream.flush().unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();

        let status: u16 = response
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap();
        let body = response
            .split_once("\r\n\r\n")
            .map(|(_, b)| b.to_string())
            .unwrap_or_default();
        (status, body)
    }

    fn request_json(&self, method: &str, path: &str, body: Option<&str>) -> (u16, Value) {
        let (status, body) = self.request(method, path, body);
        let json = serde_json::from_str(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[test]
fn test_create_then_fetch_roundtrip() {
    let server = TestServer::start();

    let (status, created) = server.request_json(
        "POST",
        "/notes",
        Some(r#"{"title":"A","description":"B","drawing":null}"#),
    );
    assert_eq!(status, 201);
    assert_eq!(created["title"], "A");
    assert_eq!(created["description"], "B");
    assert!(created["drawing"].is_null());
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);

    let (status, fetched) = server.request_json("GET", &format!("/notes/{}", id), None);
    assert_eq!(status, 200);
    assert_eq!(fetched, created);
}

#[test]
fn test_list_returns_all_records() {
    let server = TestServer::start();

    server.request("POST", "/notes", Some(r#"{"title":"one"}"#));
    server.request("POST", "/notes", Some(r#"{"title":"two"}"#));

    let (status, listed) = server.request_json("GET", "/notes", None);
    assert_eq!(status, 200);
    let notes = listed.as_array().unwrap();
    assert_eq!(notes.len(), 2);
}

#[test]
fn test_update_replaces_fields_and_refreshes_timestamp() {
    let server = TestServer::start();

    let (_, created) = server.request_json(
        "POST",
        "/notes",
        Some(r#"{"title":"A","description":"B","drawing":null}"#),
    );
    let id = created["id"].as_i64().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(10));

    let (status, updated) = server.request_json(
        "PUT",
        &format!("/notes/{}", id),
        Some(r#"{"title":"A2","description":"B","drawing":null}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "A2");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(
        updated["updatedAt"].as_str().unwrap() > created["updatedAt"].as_str().unwrap(),
        "updatedAt must move forward"
    );
}

#[test]
fn test_drawing_data_uri_roundtrips_losslessly() {
    let server = TestServer::start();

    let mut surface = sketchnote::canvas::DrawingSurface::new(32, 32);
    surface.begin_stroke(sketchnote::canvas::Point::new(4.0, 4.0));
    surface.append_point(sketchnote::canvas::Point::new(28.0, 28.0));
    surface.end_stroke();
    let uri = surface.export_data_uri().unwrap();

    let body = serde_json::json!({"title": "sketchy", "drawing": uri}).to_string();
    let (status, created) = server.request_json("POST", "/notes", Some(&body));
    assert_eq!(status, 201);

    let id = created["id"].as_i64().unwrap();
    let (_, fetched) = server.request_json("GET", &format!("/notes/{}", id), None);
    assert_eq!(fetched["drawing"].as_str().unwrap(), uri);
}

#[test]
fn test_missing_and_invalid_ids() {
    let server = TestServer::start();

    let (status, body) = server.request_json("GET", "/notes/999999", None);
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Note not found");

    let (status, body) = server.request_json("GET", "/notes/abc", None);
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid note ID");

    // Trailing slash means the id segment is empty
    let (status, body) = server.request_json("GET", "/notes/", None);
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Note ID is required");
}

#[test]
fn test_create_validation() {
    let server = TestServer::start();

    let (status, body) = server.request_json("POST", "/notes", Some(r#"{"title":"   "}"#));
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Title is required");

    let (status, body) = server.request_json("POST", "/notes", Some("not json"));
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid request body");
}

#[test]
fn test_update_validation_and_missing() {
    let server = TestServer::start();

    let (status, _) = server.request_json("PUT", "/notes/abc", Some(r#"{"title":"t"}"#));
    assert_eq!(status, 400);

    let (status, _) = server.request_json("PUT", "/notes/999999", Some(r#"{"title":"t"}"#));
    assert_eq!(status, 404);

    let (_, created) = server.request_json("POST", "/notes", Some(r#"{"title":"keep"}"#));
    let id = created["id"].as_i64().unwrap();
    let (status, body) =
        server.request_json("PUT", &format!("/notes/{}", id), Some(r#"{"title":""}"#));
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Title is required");
}

#[test]
fn test_delete_then_gone() {
    let server = TestServer::start();

    let (_, created) = server.request_json("POST", "/notes", Some(r#"{"title":"bye"}"#));
    let id = created["id"].as_i64().unwrap();

    let (status, body) = server.request_json("DELETE", &format!("/notes/{}", id), None);
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Note deleted successfully");

    let (status, _) = server.request_json("GET", &format!("/notes/{}", id), None);
    assert_eq!(status, 404);

    // Deleting again is a not-found, not an escalation
    let (status, _) = server.request_json("DELETE", &format!("/notes/{}", id), None);
    assert_eq!(status, 404);
}

#[test]
fn test_unknown_route_is_404() {
    let server = TestServer::start();
    let (status, _) = server.request("GET", "/somewhere/else", None);
    assert_eq!(status, 404);
}
