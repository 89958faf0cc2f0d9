use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backfill for fields the model did not return.
pub const PLACEHOLDER: &str = "N/A";
/// Status used when the model omits or blanks the field.
pub const DEFAULT_STATUS: &str = "applied";

/// One job application, as dictated by the user and extracted from the
/// transcript. Built once per request and appended to the sheet; never
/// stored anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicationRecord {
    pub company_name: String,
    pub job_role: String,
    pub resume_version: String,
    pub platform: String,
    pub status: String,
}

impl JobApplicationRecord {
    /// Build a record from the JSON object the extraction model returned,
    /// applying the field defaults.
    pub fn from_value(value: &Value) -> Self {
        // the model occasionally emits numbers for fields like
        // resume_version; keep any present value, only backfill missing ones
        fn render(v: &Value) -> Option<String> {
            match v {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            }
        }
        let field = |name: &str| {
            value
                .get(name)
                .and_then(render)
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };
        let status = match value.get("status").and_then(render) {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                tracing::debug!("setting default status to '{}'", DEFAULT_STATUS);
                DEFAULT_STATUS.to_string()
            }
        };
        JobApplicationRecord {
            company_name: field("company_name"),
            job_role: field("job_role"),
            resume_version: field("resume_version"),
            platform: field("platform"),
            status,
        }
    }

    /// Row layout of the sheet: date first, then the fields in fixed order.
    pub fn to_row(&self, date: NaiveDate) -> Vec<String> {
        vec![
            date.to_string(),
            self.company_name.clone(),
            self.job_role.clone(),
            self.resume_version.clone(),
            self.platform.clone(),
            self.status.clone(),
        ]
    }
}
