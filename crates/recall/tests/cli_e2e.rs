#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// A tiny stand-in for the sheets service, serving on a local port until the
/// test process exits.
struct FakeSheets {
    base_url: String,
}

impl FakeSheets {
    fn start(sheets: &[&str]) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state: Arc<Mutex<Vec<(String, Vec<Value>)>>> = Arc::new(Mutex::new(
            sheets.iter().map(|s| (s.to_string(), Vec::new())).collect(),
        ));

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                handle(stream, &state);
            }
        });
        Self { base_url }
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<Vec<(String, Vec<Value>)>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.insert(k.trim().to_ascii_lowercase(), v.trim().to_string());
        }
    }
    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    let mut sheets = state.lock().unwrap();
    let (status, payload): (&str, Option<Value>) = match (method.as_str(), segments.as_slice()) {
        ("GET", ["health"]) => ("200 OK", Some(json!({"status": "ok"}))),
        ("GET", ["sheets"]) => {
            let list: Vec<Value> = sheets
                .iter()
                .enumerate()
                .map(|(i, (title, _))| json!({"sheetId": i, "title": title, "index": i}))
                .collect();
            ("200 OK", Some(json!({ "sheets": list })))
        }
        (m, ["sheets", name, "rows", rest @ ..]) => {
            match sheets.iter_mut().find(|(title, _)| title == name) {
                None => ("404 Not Found", Some(json!({"error": "Sheet not found"}))),
                Some((_, rows)) => match (m, rest) {
                    ("GET", []) => ("200 OK", Some(json!({ "rows": rows }))),
                    ("POST", []) => {
                        rows.push(serde_json::from_slice(&body).unwrap());
                        ("201 Created", Some(json!({"rowIndex": rows.len() - 1})))
                    }
                    ("DELETE", [idx]) => {
                        let idx: usize = idx.parse().unwrap();
                        rows.remove(idx);
                        ("204 No Content", None)
                    }
                    ("PUT", [idx]) => {
                        let idx: usize = idx.parse().unwrap();
                        rows[idx] = serde_json::from_slice(&body).unwrap();
                        ("204 No Content", None)
                    }
                    _ => ("405 Method Not Allowed", None),
                },
            }
        }
        _ => ("404 Not Found", None),
    };
    drop(sheets);

    let body = payload.map(|v| v.to_string()).unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

fn recall_cmd(data: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::new(cargo_bin("recall"));
    cmd.env("RECALL_API_URL", api_url)
        .env_remove("RECALL_DATA_DIR")
        .env_remove("RECALL_LOG")
        .env_remove("RECALL_CHAT_URL")
        .env_remove("RECALL_TIMEOUT_SECS")
        .env("NO_PROXY", "127.0.0.1")
        .arg("--data")
        .arg(data.path());
    cmd
}

#[test]
fn help_lists_commands() {
    let data = TempDir::new().unwrap();
    recall_cmd(&data, "http://127.0.0.1:9")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("connect"))
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn commands_require_a_connection() {
    let data = TempDir::new().unwrap();
    recall_cmd(&data, "http://127.0.0.1:9")
        .args(["list", "project"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: No spreadsheet connected"));
}

#[test]
fn status_and_disconnect_work_offline() {
    let data = TempDir::new().unwrap();
    recall_cmd(&data, "http://127.0.0.1:9")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not connected"))
        .stdout(predicate::str::contains("projects: id, projectName"));

    recall_cmd(&data, "http://127.0.0.1:9")
        .arg("disconnect")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spreadsheet connected"));
}

#[test]
fn connect_rejects_spreadsheet_without_wikis() {
    let server = FakeSheets::start(&["projects"]);
    let data = TempDir::new().unwrap();

    recall_cmd(&data, &server.base_url)
        .args(["connect", "sheet-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing required sheets. Found: projects",
        ));
    assert!(!data.path().join("settings.json").exists());
}

#[test]
fn record_lifecycle() {
    let server = FakeSheets::start(&["projects", "wikis"]);
    let data = TempDir::new().unwrap();
    let recall = || recall_cmd(&data, &server.base_url);

    recall()
        .args(["connect", "sheet-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connected to spreadsheet sheet-1"));

    recall()
        .args([
            "create", "project", "--name", "Recall", "--type", "app", "--tags", "rust, cli",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created (1): Recall"));

    recall()
        .args(["create", "wiki", "--topic", "Ownership", "--tags", "rust"])
        .assert()
        .success();

    recall()
        .args(["view", "--tag", "cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recall"))
        .stdout(predicate::str::contains("#rust #cli"))
        .stdout(predicate::str::contains("Ownership").not());

    recall()
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tags: cli, rust"))
        .stdout(predicate::str::contains("Types: app"));

    recall()
        .args(["update", "project", "1", "--status", "paused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project updated (1): Recall"));

    recall()
        .args(["list", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paused"));

    recall()
        .args(["ask", "wiki", "1", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("https://claude.ai/new?q="));

    recall()
        .args(["delete", "project", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project deleted (1): Recall"));

    recall()
        .args(["list", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet."));

    recall()
        .args(["delete", "project", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found: 1"));
}
