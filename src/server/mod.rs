//! HTTP server for the notes API.

use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub mod types;

use crate::db::Database;
use crate::models::NotePayload;
use crate::service::{NotesService, ServiceError};
use types::{DeleteResponse, ErrorResponse};

/// HTTP server exposing the note CRUD contract.
pub struct NotesServer {
    db_path: PathBuf,
    listener: TcpListener,
}

impl NotesServer {
    /// Bind to an address. The database path is kept for opening a fresh
    /// connection per request; the store is probed once up front so a broken
    /// path fails at startup, not on the first request.
    pub fn bind(addr: &str, db_path: PathBuf) -> Result<Self> {
        let db = Database::open_at(db_path.clone())?;
        let _ = db.count_notes()?;

        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;

        Ok(Self { db_path, listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept loop (blocking). Returns when the shutdown flag is set.
    pub fn run(&self, shutdown: Arc<AtomicBool>) -> Result<()> {
        while !shutdown.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, _peer_addr)) => {
                    if let Err(e) = self.handle_connection(stream) {
                        eprintln!("Request error: {}", e);
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
                Err(e) => {
                    eprintln!("Accept error: {}", e);
                }
            }
        }

        Ok(())
    }

    fn handle_connection(&self, mut stream: TcpStream) -> Result<()> {
        stream.set_read_timeout(Some(std::time::Duration::from_secs(30)))?;
        stream.set_write_timeout(Some(std::time::Duration::from_secs(30)))?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;

        let parts: Vec<&str> = request_line.trim().split_whitespace().collect();
        if parts.len() < 2 {
            return self.send_response(&mut stream, 400, "Bad Request");
        }

        let method = parts[0];
        let path = parts[1];

        // Parse headers; only Content-Length matters here
        let mut content_length = 0usize;

        loop {
            let mut header_line = String::new();
            reader.read_line(&mut header_line)?;
            let header_line = header_line.trim();
            if header_line.is_empty() {
                break;
            }
            if let Some((key, value)) = header_line.split_once(':') {
                if key.trim().eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }

        // Read body
        let mut body = vec![0u8; content_length];
        if content_length > 0 {
            std::io::Read::read_exact(&mut reader, &mut body)?;
        }

        // Route request
        match (method, path) {
            ("POST", "/notes") => self.handle_create(&mut stream, &body),
            ("GET", "/notes") => self.handle_list(&mut stream),
            ("GET", p) if p.starts_with("/notes/") => {
                let id = p.strip_prefix("/notes/").unwrap_or("");
                self.handle_get(&mut stream, id)
            }
            ("PUT", p) if p.starts_with("/notes/") => {
                let id = p.strip_prefix("/notes/").unwrap_or("");
                self.handle_update(&mut stream, id, &body)
            }
            ("DELETE", p) if p.starts_with("/notes/") => {
                let id = p.strip_prefix("/notes/").unwrap_or("");
                self.handle_delete(&mut stream, id)
            }
            _ => self.send_response(&mut stream, 404, "Not Found"),
        }
    }

    /// `POST /notes` — create from a full payload.
    fn handle_create(&self, stream: &mut TcpStream, body: &[u8]) -> Result<()> {
        let payload: NotePayload = match serde_json::from_slice(body) {
            Ok(p) => p,
            Err(_) => {
                return self.send_json_response(
                    stream,
                    400,
                    &ErrorResponse::new("Invalid request body"),
                );
            }
        };

        let db = Database::open_at(self.db_path.clone())?;
        let service = NotesService::new(&db);

        match service.create(&payload) {
            Ok(note) => self.send_json_response(stream, 201, &note),
            Err(e) => self.send_service_error(stream, e, "Failed to create note"),
        }
    }

    /// `GET /notes` — every record, no pagination.
    fn handle_list(&self, stream: &mut TcpStream) -> Result<()> {
        let db = Database::open_at(self.db_path.clone())?;
        let service = NotesService::new(&db);

        match service.list() {
            Ok(notes) => self.send_json_response(stream, 200, &notes),
            Err(e) => self.send_service_error(stream, e, "Failed to fetch notes"),
        }
    }

    /// `GET /notes/{id}`
    fn handle_get(&self, stream: &mut TcpStream, raw_id: &str) -> Result<()> {
        let id = match NotesService::parse_id(raw_id) {
            Ok(id) => id,
            Err(e) => return self.send_service_error(stream, e, "Failed to fetch note"),
        };

        let db = Database::open_at(self.db_path.clone())?;
        let service = NotesService::new(&db);

        match service.get(id) {
            Ok(note) => self.send_json_response(stream, 200, &note),
            Err(e) => self.send_service_error(stream, e, "Failed to fetch note"),
        }
    }

    /// `PUT /notes/{id}` — full replacement of the mutable fields.
    fn handle_update(&self, stream: &mut TcpStream, raw_id: &str, body: &[u8]) -> Result<()> {
        let id = match NotesService::parse_id(raw_id) {
            Ok(id) => id,
            Err(e) => return self.send_service_error(stream, e, "Failed to update note"),
        };

        let payload: NotePayload = match serde_json::from_slice(body) {
            Ok(p) => p,
            Err(_) => {
                return self.send_json_response(
                    stream,
                    400,
                    &ErrorResponse::new("Invalid request body"),
                );
            }
        };

        let db = Database::open_at(self.db_path.clone())?;
        let service = NotesService::new(&db);

        match service.update(id, &payload) {
            Ok(note) => self.send_json_response(stream, 200, &note),
            Err(e) => self.send_service_error(stream, e, "Failed to update note"),
        }
    }

    /// `DELETE /notes/{id}`
    fn handle_delete(&self, stream: &mut TcpStream, raw_id: &str) -> Result<()> {
        let id = match NotesService::parse_id(raw_id) {
            Ok(id) => id,
            Err(e) => return self.send_service_error(stream, e, "Failed to delete note"),
        };

        let db = Database::open_at(self.db_path.clone())?;
        let service = NotesService::new(&db);

        match service.delete(id) {
            Ok(_deleted) => self.send_json_response(stream, 200, &DeleteResponse::deleted()),
            Err(e) => self.send_service_error(stream, e, "Failed to delete note"),
        }
    }

    /// Map a service error onto the wire. Input errors and not-found carry
    /// their own message; storage failures are logged with detail and
    /// answered with the generic message only.
    fn send_service_error(
        &self,
        stream: &mut TcpStream,
        error: ServiceError,
        generic: &str,
    ) -> Result<()> {
        let (status, message) = match &error {
            ServiceError::MissingId | ServiceError::InvalidId | ServiceError::MissingTitle => {
                (400, error.to_string())
            }
            ServiceError::NotFound => (404, error.to_string()),
            ServiceError::Storage(detail) => {
                eprintln!("{}: {:#}", generic, detail);
                (500, generic.to_string())
            }
        };
        self.send_json_response(stream, status, &ErrorResponse::new(message))
    }

    fn send_response(&self, stream: &mut TcpStream, status: u16, message: &str) -> Result<()> {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            status_text(status),
            message.len(),
            message
        );

        stream.write_all(response.as_bytes())?;
        stream.flush()?;
        Ok(())
    }

    fn send_json_response<T: serde::Serialize>(
        &self,
        stream: &mut TcpStream,
        status: u16,
        body: &T,
    ) -> Result<()> {
        let json_body = serde_json::to_string(body)?;

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            status_text(status),
            json_body.len(),
            json_body
        );

        stream.write_all(response.as_bytes())?;
        stream.flush()?;
        Ok(())
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
