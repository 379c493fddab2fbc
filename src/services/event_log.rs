use std::path::{Path, PathBuf};

use serde_json::{Value as JsonValue, json};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::Config;

const MESSAGE_LOG_FILE: &str = "message_log.txt";

fn log_path(cfg: &Config) -> PathBuf {
    cfg.session_folder_path.join(MESSAGE_LOG_FILE)
}

/// Appends the raw event body to the message log. Best-effort: a failed
/// append must never delay or fail the callback, so errors only reach the
/// debug log.
pub async fn append_event(cfg: &Config, body: &JsonValue) {
    if let Err(err) = append_line(&log_path(cfg), &body.to_string()).await {
        debug!("Failed to append event to message log: {err}");
    }
}

/// Appends an error record, marked so it can be told apart from event lines.
pub async fn append_error(cfg: &Config, message: &str) {
    let line = format!("(ERROR) {}", json!({ "error": message }));
    if let Err(err) = append_line(&log_path(cfg), &line).await {
        debug!("Failed to append error to message log: {err}");
    }
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.write_all(b"\r\n").await?;
    Ok(())
}
