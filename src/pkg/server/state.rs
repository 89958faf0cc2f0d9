use std::sync::Arc;

use crate::conf::settings;
use crate::pkg::internal::extract::{ExtractOps, Gemini};
use crate::pkg::internal::sheets::{GoogleSheets, SheetOps};
use crate::pkg::internal::transcribe::{AssemblyAi, TranscribeOps};
use crate::prelude::{Error, Result};

/// Per-request dependencies. The adapters sit behind trait objects so the
/// router can be built over mocks in tests.
#[derive(Clone)]
pub struct AppState {
    pub transcriber: Arc<dyn TranscribeOps>,
    pub extractor: Arc<dyn ExtractOps>,
    pub sheet: Arc<dyn SheetOps>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        if settings.assemblyai_api_key.is_empty() {
            return Err(Error::Config("ASSEMBLYAI_API_KEY not set".into()));
        }
        if settings.gemini_api_key.is_empty() {
            return Err(Error::Config("GEMINI_API_KEY not set".into()));
        }
        if settings.spreadsheet_id.is_empty() {
            return Err(Error::Config("SPREADSHEET_ID not set".into()));
        }
        let sheet = GoogleSheets::from_file(&settings.sheets_credentials_path, &settings.spreadsheet_id)?;
        Ok(AppState {
            transcriber: Arc::new(AssemblyAi::new(
                &settings.assemblyai_api_key,
                &settings.assemblyai_base_url,
            )),
            extractor: Arc::new(Gemini::new(
                &settings.gemini_api_key,
                &settings.gemini_base_url,
                &settings.gemini_model,
            )),
            sheet: Arc::new(sheet),
        })
    }

    pub fn with_adapters(
        transcriber: Arc<dyn TranscribeOps>,
        extractor: Arc<dyn ExtractOps>,
        sheet: Arc<dyn SheetOps>,
    ) -> AppState {
        AppState {
            transcriber,
            extractor,
            sheet,
        }
    }
}
