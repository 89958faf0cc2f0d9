use std::path::Path;

use axum::body::Bytes;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::pkg::internal::record::JobApplicationRecord;
use crate::pkg::server::state::AppState;
use crate::prelude::{Error, Result};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 4] = ["webm", "mp3", "wav", "m4a"];

#[derive(Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    pub extracted_data: JobApplicationRecord,
}

pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut audio: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("UPLOAD-001: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "audio_data" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Validation(format!("UPLOAD-002: {}", e)))?;
                audio = Some((file_name, data));
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Validation(format!("UPLOAD-003: {}", e)))?;
            }
        }
    }

    let (file_name, data) = audio.ok_or_else(|| Error::Validation("No audio file provided".into()))?;
    if file_name.is_empty() {
        return Err(Error::Validation("No file selected".into()));
    }
    let file_extension = Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&file_extension.as_str()) {
        return Err(Error::Validation(
            "Invalid file type. Please upload an audio file.".into(),
        ));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(Error::Validation(
            "File too large. Maximum size is 10MB.".into(),
        ));
    }

    tracing::info!("received audio file, starting processing");
    let transcript = state.transcriber.transcribe(data.to_vec()).await?;
    tracing::info!("transcription complete: {} characters", transcript.len());

    let record = state.extractor.extract(&transcript).await?;
    tracing::info!("extraction complete: {:?}", record);

    state.sheet.append(&record).await?;

    Ok(Json(UploadResponse {
        status: "success".into(),
        message: "Audio processed and job details added to sheet successfully!".into(),
        extracted_data: record,
    }))
}
