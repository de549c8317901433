use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use super::check_auth;
use crate::errors::AppError;
use crate::models::slot::DATE_FORMAT;
use crate::models::{BookSessionRequest, BookingCreated, TimeSlot};
use crate::services::bookings;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ActionResponse {
    success: bool,
}

// POST /student/book/:tutor_id
pub async fn book_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(tutor_id): Path<i64>,
    payload: Result<Json<BookSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingCreated>), AppError> {
    check_auth(&headers, &state.config.api_token)?;
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let date = NaiveDate::parse_from_str(&req.booking_date, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("invalid date: {}", req.booking_date)))?;
    let slot = TimeSlot::new(req.start_time, req.end_time)
        .ok_or_else(|| AppError::BadRequest("end time must be after start time".to_string()))?;

    let (booking_id, price) = {
        let db = state.db.lock().unwrap();
        bookings::book_session(&db, tutor_id, req.student_id, date, slot)?
    };

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            success: true,
            booking_id,
            price,
        }),
    ))
}

// POST /api/complete_booking/:id
pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse>, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    {
        let db = state.db.lock().unwrap();
        bookings::complete_booking(&db, id)?;
    }

    Ok(Json(ActionResponse { success: true }))
}

// POST /api/cancel_booking/:id
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse>, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    {
        let db = state.db.lock().unwrap();
        bookings::cancel_booking(&db, id)?;
    }

    Ok(Json(ActionResponse { success: true }))
}
