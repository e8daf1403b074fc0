//! Route handlers.

use axum::extract::{Query as QueryString, State};
use axum::response::Json;
use insights_core::{FilterParams, Record};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// `GET /load_data` — run the loader once; a no-op if data is present.
pub async fn load_data(State(state): State<AppState>) -> Result<Json<MessageBody>, ApiError> {
    let outcome = state.loader.load().await?;
    tracing::info!(%outcome, "load_data");
    Ok(Json(MessageBody {
        message: outcome.message(),
    }))
}

/// `GET /api/data?<filters>` — records matching every supplied filter.
pub async fn get_data(
    State(state): State<AppState>,
    QueryString(pairs): QueryString<Vec<(String, String)>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let query = FilterParams::from_pairs(pairs).to_query()?;
    let records = state.store.find(&query).await?;
    tracing::debug!(
        clauses = query.clauses().len(),
        results = records.len(),
        "api/data"
    );
    Ok(Json(records))
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

/// `GET /health` — liveness only.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}
