//! `voxnote-transcribe` — turn an uploaded audio file into text.
//!
//! Wraps the OpenAI Whisper transcription endpoint. As a side effect, the
//! transcript is persisted next to the audio file with a `.txt` extension.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use voxnote_core::VoxError;

/// Environment variable holding the OpenAI API key.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Transcription model.
const WHISPER_MODEL: &str = "whisper-1";

/// Whisper transcription client.
#[derive(Debug)]
pub struct Transcriber {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Transcriber {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Build a transcriber from the environment, failing eagerly (before any
    /// network call) when the credential is absent.
    pub fn from_env() -> Result<Self, VoxError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(VoxError::Credential(format!(
                "{API_KEY_VAR} environment variable is not set"
            ))),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Transcribe a local audio file and persist the sibling `.txt`
    /// transcript.
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String, VoxError> {
        let text = self
            .request_transcript(audio_path)
            .await
            .map_err(|e| VoxError::Transcription(format!("{e:#}")))?;

        let transcript_path = transcript_path_for(audio_path);
        tokio::fs::write(&transcript_path, &text)
            .await
            .with_context(|| {
                format!("Failed to write transcript: {}", transcript_path.display())
            })?;

        info!(
            audio = %audio_path.display(),
            transcript = %transcript_path.display(),
            chars = text.len(),
            "Transcription complete"
        );
        Ok(text)
    }

    async fn request_transcript(&self, audio_path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("Failed to read audio file: {}", audio_path.display()))?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.m4a".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(audio_path))?;
        let form = reqwest::multipart::Form::new()
            .text("model", WHISPER_MODEL)
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Whisper HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Whisper returned {}: {}", status, error_body);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Whisper response")?;
        Ok(json["text"].as_str().unwrap_or("").to_string())
    }
}

/// Sibling transcript path: same base name, `.txt` extension.
fn transcript_path_for(audio_path: &Path) -> std::path::PathBuf {
    audio_path.with_extension("txt")
}

fn mime_for(audio_path: &Path) -> &'static str {
    match audio_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("m4a") => "audio/mp4",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        _ => "application/octet-stream",
    }
}
