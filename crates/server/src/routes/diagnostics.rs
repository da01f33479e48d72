use axum::{extract::State, Json};
use service::services::DatabaseReport;

use crate::state::AppState;

pub async fn test_database(State(state): State<AppState>) -> Json<DatabaseReport> {
    Json(state.diagnostics.report().await)
}
