//! Memo upload endpoint — accept one audio file and run it through the
//! pipeline.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::server::GatewayState;

/// JSON acknowledgment returned for every upload.
#[derive(Debug, Serialize)]
pub struct Acknowledgment {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// The database write outcome: "confirmed" or "unknown".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write: Option<String>,
}

impl Acknowledgment {
    fn message(text: impl Into<String>) -> Self {
        Self {
            message: text.into(),
            destination: None,
            write: None,
        }
    }
}

type Ack = (StatusCode, Json<Acknowledgment>);

fn client_error(message: &str) -> Ack {
    (
        StatusCode::BAD_REQUEST,
        Json(Acknowledgment::message(message)),
    )
}

/// `POST /` — multipart upload with a single `file` part.
pub async fn receive_memo(State(state): State<GatewayState>, mut multipart: Multipart) -> Ack {
    let request_id = Uuid::new_v4();

    // Find the file part.
    let mut upload: Option<(String, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let Some(filename) = field.file_name().map(sanitize_filename) else {
                    warn!(%request_id, "Upload has no file name");
                    return client_error("Invalid file name");
                };
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((filename, bytes.to_vec()));
                        break;
                    }
                    Err(e) => {
                        warn!(%request_id, error = %e, "Failed to read upload body");
                        return client_error("Invalid file");
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                warn!(%request_id, error = %e, "Malformed multipart body");
                return client_error("Invalid file");
            }
        }
    }

    let Some((filename, bytes)) = upload else {
        warn!(%request_id, "No file in the POST request");
        return client_error("File missing");
    };

    if filename.is_empty() || !allowed_file(&filename, &state.allowed_extensions) {
        warn!(%request_id, %filename, "Rejected upload with disallowed extension");
        return client_error("Invalid file");
    }

    // Persist the upload so transcription can read it (and leave the
    // sibling transcript next to it).
    if let Err(e) = tokio::fs::create_dir_all(&state.upload_dir).await {
        error!(%request_id, error = %e, "Failed to create upload directory");
        return server_error();
    }
    let path = state.upload_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        error!(%request_id, error = %e, "Failed to store upload");
        return server_error();
    }
    info!(%request_id, path = %path.display(), bytes = bytes.len(), "Stored upload");

    let transcript = match state.pipeline.transcribe(&path).await {
        Ok(text) => text,
        Err(e) => {
            error!(%request_id, error = %e, "Transcription failed");
            return server_error();
        }
    };
    if transcript.trim().is_empty() {
        warn!(%request_id, "Transcription produced no text");
        return client_error("No idea provided");
    }

    match state.pipeline.process_text(&transcript).await {
        Ok(report) => (
            StatusCode::OK,
            Json(Acknowledgment {
                message: "Success".to_string(),
                destination: Some(report.destination),
                write: Some(report.write.label().to_string()),
            }),
        ),
        Err(e) => {
            error!(%request_id, error = %e, "Pipeline failed");
            server_error()
        }
    }
}

fn server_error() -> Ack {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Acknowledgment::message("Processing failed")),
    )
}

/// Keep only a safe basename: path components dropped, characters outside
/// `[A-Za-z0-9._-]` replaced with `_`.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim_start_matches('.');
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Check the file extension against the configured allow-list.
fn allowed_file(filename: &str, allowed: &[String]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)),
        None => false,
    }
}
