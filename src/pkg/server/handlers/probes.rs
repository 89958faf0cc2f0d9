use axum::Json;
use serde_json::{json, Value};

use crate::prelude::Result;

pub async fn index() -> Json<Value> {
    Json(json!({"message": "JobHunt backend is running."}))
}

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz() -> Result<()> {
    tracing::debug!("service is healthy");
    Ok(())
}
