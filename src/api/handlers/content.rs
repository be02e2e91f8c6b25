//! Public content: shop services, course/event listings, availability
//! and appointment booking.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::store::{
    models::{Appointment, Course, Event},
    seed::SHOP_SERVICES,
    BookingOutcome, Store,
};

use super::valid_date;

#[utoipa::path(
    get,
    path = "/v1/services",
    responses(
        (status = 200, description = "Workshop service names", body = [String])
    ),
    tag = "shop"
)]
pub async fn services() -> impl IntoResponse {
    Json(SHOP_SERVICES.map(str::to_string).to_vec())
}

#[utoipa::path(
    get,
    path = "/v1/courses",
    responses(
        (status = 200, description = "Published riding courses", body = [Course])
    ),
    tag = "shop"
)]
pub async fn courses(store: Extension<Arc<Store>>) -> impl IntoResponse {
    Json(store.courses().await)
}

#[utoipa::path(
    get,
    path = "/v1/events",
    responses(
        (status = 200, description = "Published club events", body = [Event])
    ),
    tag = "shop"
)]
pub async fn events(store: Extension<Arc<Store>>) -> impl IntoResponse {
    Json(store.events().await)
}

#[utoipa::path(
    get,
    path = "/v1/availability",
    responses(
        (status = 200, description = "Blocked booking dates, sorted", body = [String])
    ),
    tag = "shop"
)]
pub async fn availability(store: Extension<Arc<Store>>) -> impl IntoResponse {
    Json(store.blocked_dates().await)
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AppointmentRequest {
    pub name: String,
    pub date: String,
    /// Free text describing the requested work.
    pub service: String,
}

#[utoipa::path(
    post,
    path = "/v1/appointments",
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Invalid input", body = String),
        (status = 409, description = "Date is blocked", body = String)
    ),
    tag = "shop"
)]
pub async fn create_appointment(
    store: Extension<Arc<Store>>,
    payload: Option<Json<AppointmentRequest>>,
) -> impl IntoResponse {
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let name = payload.name.trim();
    let service = payload.service.trim();
    if name.is_empty() || service.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Name and service are required.".to_string(),
        )
            .into_response();
    }
    if !valid_date(&payload.date) {
        return (
            StatusCode::BAD_REQUEST,
            "Date must look like YYYY-MM-DD.".to_string(),
        )
            .into_response();
    }

    match store
        .book_appointment(name.to_string(), payload.date.clone(), service.to_string())
        .await
    {
        Ok(BookingOutcome::Created(appointment)) => {
            (StatusCode::CREATED, Json(appointment)).into_response()
        }
        Ok(BookingOutcome::DateBlocked) => (
            StatusCode::CONFLICT,
            "The workshop is closed that day.".to_string(),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to book appointment: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
