//! Mock adapter implementations for testing.
//!
//! These mocks implement the pipeline traits so the router can be exercised
//! without talking to any real provider.

use std::sync::Mutex;

use crate::pkg::internal::extract::ExtractOps;
use crate::pkg::internal::record::JobApplicationRecord;
use crate::pkg::internal::sheets::SheetOps;
use crate::pkg::internal::transcribe::TranscribeOps;
use crate::prelude::{Error, Result};

/// Mock transcriber returning predefined text, or failing on demand.
pub struct MockTranscriber {
    text: String,
    fail: bool,
}

impl MockTranscriber {
    pub fn returning(text: &str) -> Self {
        MockTranscriber {
            text: text.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        MockTranscriber {
            text: String::new(),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl TranscribeOps for MockTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>) -> Result<String> {
        if self.fail {
            return Err(Error::Transcription("mock transcription failure".into()));
        }
        Ok(self.text.clone())
    }
}

/// Mock extractor returning a predefined record and remembering the
/// transcripts it was asked about.
pub struct MockExtractor {
    record: Option<JobApplicationRecord>,
    pub transcripts: Mutex<Vec<String>>,
}

impl MockExtractor {
    pub fn returning(record: JobApplicationRecord) -> Self {
        MockExtractor {
            record: Some(record),
            transcripts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        MockExtractor {
            record: None,
            transcripts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ExtractOps for MockExtractor {
    async fn extract(&self, transcript: &str) -> Result<JobApplicationRecord> {
        self.transcripts
            .lock()
            .unwrap()
            .push(transcript.to_string());
        self.record
            .clone()
            .ok_or_else(|| Error::Extraction("mock extraction failure".into()))
    }
}

/// Mock sheet collecting appended records instead of writing anywhere.
pub struct MockSheet {
    pub appended: Mutex<Vec<JobApplicationRecord>>,
    fail: bool,
}

impl MockSheet {
    pub fn new() -> Self {
        MockSheet {
            appended: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        MockSheet {
            appended: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl Default for MockSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SheetOps for MockSheet {
    async fn append(&self, record: &JobApplicationRecord) -> Result<()> {
        if self.fail {
            return Err(Error::Sheets("mock sheet failure".into()));
        }
        self.appended.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// A fully populated record for tests.
pub fn sample_record() -> JobApplicationRecord {
    JobApplicationRecord {
        company_name: "Acme".into(),
        job_role: "Backend Engineer".into(),
        resume_version: "v3".into(),
        platform: "LinkedIn".into(),
        status: "applied".into(),
    }
}
