pub mod availability;
pub mod bookings;
pub mod health;
pub mod tutors;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/student/get_available_times",
            post(availability::get_available_times),
        )
        .route("/student/tutor/:id", get(tutors::get_tutor))
        .route("/student/book/:tutor_id", post(bookings::book_session))
        .route(
            "/api/complete_booking/:id",
            post(bookings::complete_booking),
        )
        .route("/api/cancel_booking/:id", post(bookings::cancel_booking))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bearer-token check; an empty expected token disables it.
pub(crate) fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    if expected_token.is_empty() {
        return Ok(());
    }

    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
