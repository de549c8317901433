use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;

use super::check_auth;
use crate::errors::AppError;
use crate::models::slot::DATE_FORMAT;
use crate::models::{AvailableTimesRequest, AvailableTimesResponse};
use crate::services::availability;
use crate::state::AppState;

// POST /student/get_available_times
pub async fn get_available_times(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<AvailableTimesRequest>, JsonRejection>,
) -> Result<Json<AvailableTimesResponse>, AppError> {
    check_auth(&headers, &state.config.api_token)?;
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let (Some(tutor_ref), Some(date_str)) = (req.tutor_id, req.date.as_deref()) else {
        return Err(AppError::BadRequest("Missing parameters".to_string()));
    };
    let tutor_id = tutor_ref
        .id()
        .ok_or_else(|| AppError::BadRequest(format!("invalid tutor_id: {tutor_ref:?}")))?;
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("invalid date: {date_str}")))?;

    let available_times = {
        let db = state.db.lock().unwrap();
        availability::available_slots(&db, tutor_id, date)?
    };

    tracing::debug!(tutor_id, %date, count = available_times.len(), "served available times");
    Ok(Json(AvailableTimesResponse { available_times }))
}
