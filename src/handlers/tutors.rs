use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use super::check_auth;
use crate::db::queries;
use crate::errors::AppError;
use crate::models::Tutor;
use crate::state::AppState;

// GET /student/tutor/:id
pub async fn get_tutor(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Tutor>, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    let tutor = {
        let db = state.db.lock().unwrap();
        queries::get_tutor(&db, id)?
    };

    tutor
        .map(Json)
        .ok_or_else(|| AppError::NotFound("tutor not found".to_string()))
}
