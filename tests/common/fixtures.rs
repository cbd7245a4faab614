//! Static log corpora and file helpers used across harnesses.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Structured lines as the gateway and session daemons write them.
pub const CORPUS_JSON: &[&str] = &[
    r#"{"type":"security","message":"login failure","severity":"warning","user":"alice"}"#,
    r#"{"type":"session","message":"session opened","session_id":"s-42"}"#,
    r#"{"type":"gateway","severity":"error","message":"upstream 502","upstream":"api"}"#,
    r#"{"message":"heartbeat","uptime_s":3600}"#,
    r#"{"type":"monitoring","severity":"critical","message":"disk full","mount":"/"}"#,
];

/// Free-text lines in the shapes seen in the monitored files.
pub const CORPUS_TEXT: &[&str] = &[
    "[2024-01-01 00:00:00] ERROR gateway timeout",
    "[2024-01-01 00:00:01] INFO session 42 opened",
    "Session monitor critical failure",
    "security: 3 failed logins, WARN threshold reached",
    "reveald started pid=812",
    r#"{"type":"security", this is not json}"#,
];

/// Wait long enough for the coarse filesystem clock to tick, then append.
pub async fn append_line(path: &Path, text: &str) {
    tokio::time::sleep(Duration::from_millis(30)).await;
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open monitored file for append");
    file.write_all(text.as_bytes())
        .expect("append to monitored file");
}

/// Create an empty log file named `name` inside `dir`.
pub fn touch(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "").expect("create monitored file");
    path
}
