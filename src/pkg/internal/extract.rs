use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::pkg::internal::record::JobApplicationRecord;
use crate::pkg::internal::retry::{exponential_delay, with_retries, AttemptError, MAX_ATTEMPTS};
use crate::prelude::{Error, Result};

/// The extraction call is the only one in the pipeline with a timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[async_trait::async_trait]
pub trait ExtractOps: Send + Sync {
    /// Pull the structured job application fields out of a transcript.
    async fn extract(&self, transcript: &str) -> Result<JobApplicationRecord>;
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini `generateContent` client. Asks for JSON-only output and retries
/// transient failures (5xx, transport) with exponential backoff; client
/// errors and malformed payloads fail immediately.
pub struct Gemini {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl Gemini {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        Gemini {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn prompt(transcript: &str) -> String {
        format!(
            "You are an intelligent assistant that extracts job application details from a text \
             transcript and provides the output in a clean JSON format. Extract the following \
             fields: company_name, job_role, resume_version, platform, and status.\n\n\
             Here is the transcript:\n\"{}\"\n\n\
             Return only valid JSON with these exact field names: company_name, job_role, \
             resume_version, platform, status",
            transcript
        )
    }

    async fn attempt(
        &self,
        transcript: &str,
    ) -> core::result::Result<JobApplicationRecord, AttemptError<Error>> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{"parts": [{"text": Self::prompt(transcript)}]}],
            "generationConfig": {"response_mime_type": "application/json"},
        });
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AttemptError::Transient(Error::Extraction(format!("request failed: {}", e)))
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(AttemptError::Transient(Error::Extraction(format!(
                "provider returned {}",
                status
            ))));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(Error::Extraction(format!(
                "provider returned {}",
                status
            ))));
        }

        let body = response.text().await.map_err(|e| {
            AttemptError::Transient(Error::Extraction(format!("failed to read response: {}", e)))
        })?;
        parse_response(&body).map_err(AttemptError::Fatal)
    }
}

/// Unwrap the nested `candidates[0].content.parts[0].text` payload and parse
/// the JSON document inside it into a record.
fn parse_response(body: &str) -> Result<JobApplicationRecord> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| Error::Extraction(format!("unparseable response body: {}", e)))?;
    let payload = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| Error::Extraction("unexpected response structure".into()))?;
    let fields: Value = serde_json::from_str(&payload)
        .map_err(|e| Error::Extraction(format!("model emitted malformed JSON: {}", e)))?;
    Ok(JobApplicationRecord::from_value(&fields))
}

#[async_trait::async_trait]
impl ExtractOps for Gemini {
    async fn extract(&self, transcript: &str) -> Result<JobApplicationRecord> {
        tracing::info!("extracting job details from transcript");
        with_retries(MAX_ATTEMPTS, exponential_delay, |_| self.attempt(transcript)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::record::{DEFAULT_STATUS, PLACEHOLDER};

    fn envelope(payload: &str) -> String {
        serde_json::to_string(&json!({
            "candidates": [{"content": {"parts": [{"text": payload}]}}]
        }))
        .unwrap()
    }

    #[test]
    fn well_formed_payload_parses() {
        let body = envelope(
            r#"{"company_name":"Acme","job_role":"SRE","resume_version":"v1","platform":"LinkedIn","status":"applied"}"#,
        );
        let record = parse_response(&body).unwrap();
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.job_role, "SRE");
        assert_eq!(record.status, "applied");
    }

    #[test]
    fn partial_payload_is_backfilled() {
        let body = envelope(r#"{"company_name":"Acme"}"#);
        let record = parse_response(&body).unwrap();
        assert_eq!(record.platform, PLACEHOLDER);
        assert_eq!(record.status, DEFAULT_STATUS);
    }

    #[test]
    fn malformed_inner_json_is_an_error_not_a_panic() {
        let body = envelope("not json at all {");
        let err = parse_response(&body).unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[test]
    fn missing_candidates_is_an_error() {
        let err = parse_response(r#"{"candidates": []}"#).unwrap_err();
        assert!(err.to_string().contains("unexpected response structure"));
    }

    #[test]
    fn missing_parts_is_an_error() {
        let err = parse_response(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap_err();
        assert!(err.to_string().contains("unexpected response structure"));
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(parse_response("<html>502</html>").is_err());
    }

    #[test]
    fn prompt_names_all_five_fields() {
        let prompt = Gemini::prompt("I applied to Acme");
        for field in [
            "company_name",
            "job_role",
            "resume_version",
            "platform",
            "status",
        ] {
            assert!(prompt.contains(field), "prompt missing {}", field);
        }
        assert!(prompt.contains("I applied to Acme"));
    }
}
