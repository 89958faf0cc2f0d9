use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::prelude::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_secs(3);

#[async_trait::async_trait]
pub trait TranscribeOps: Send + Sync {
    /// Turn raw audio bytes into transcript text.
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String>;
}

#[derive(Deserialize)]
struct UploadedAudio {
    upload_url: String,
}

#[derive(Deserialize)]
struct TranscriptJob {
    id: String,
    status: String,
    text: Option<String>,
    error: Option<String>,
}

/// AssemblyAI speech-to-text client: upload the bytes, create a transcript
/// job, poll until it settles. No retry and no overall deadline; a hung
/// provider keeps the request open.
pub struct AssemblyAi {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AssemblyAi {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        AssemblyAi {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn upload(&self, audio: Vec<u8>) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .body(audio)
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("upload request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::Transcription(format!(
                "upload rejected with status {}",
                response.status()
            )));
        }
        let uploaded: UploadedAudio = response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("bad upload response: {}", e)))?;
        Ok(uploaded.upload_url)
    }

    async fn create_job(&self, audio_url: &str) -> Result<TranscriptJob> {
        let response = self
            .http
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&json!({"audio_url": audio_url}))
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("transcript request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::Transcription(format!(
                "transcript request rejected with status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("bad transcript response: {}", e)))
    }

    async fn poll_job(&self, id: &str) -> Result<TranscriptJob> {
        let response = self
            .http
            .get(format!("{}/v2/transcript/{}", self.base_url, id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("poll request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::Transcription(format!(
                "poll rejected with status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("bad poll response: {}", e)))
    }
}

#[async_trait::async_trait]
impl TranscribeOps for AssemblyAi {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String> {
        tracing::info!("transcribing audio ({} bytes)", audio.len());
        let audio_url = self.upload(audio).await?;
        let mut job = self.create_job(&audio_url).await?;
        loop {
            match job.status.as_str() {
                "completed" => {
                    return job.text.ok_or_else(|| {
                        Error::Transcription("completed job carried no text".into())
                    });
                }
                "error" => {
                    return Err(Error::Transcription(
                        job.error.unwrap_or_else(|| "unknown provider error".into()),
                    ));
                }
                _ => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                    job = self.poll_job(&job.id).await?;
                }
            }
        }
    }
}
