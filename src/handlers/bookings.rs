use crate::auth::token::AuthContext;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::email::mailer::booking_confirmation;
use crate::models::api::{BookingFilterParams, CreateBookingRequest, SuccessResponse};
use crate::models::booking::Booking;
use crate::models::user::ROLE_ADMIN;
use crate::validation::filter::{parse_datetime, BookingQuery};
use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Record a new appointment and fire a confirmation email
///
/// POST /create-booking  body: {customerName, email, service, appointmentDate}
///
/// Requires authentication (any role). The email send runs on a detached
/// task; a send failure never rolls back the stored booking or changes the
/// response.
pub async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Response, ApiError> {
    for (field, value) in [
        ("customerName", &body.customer_name),
        ("email", &body.email),
        ("service", &body.service),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }

    let appointment_date = parse_datetime(&body.appointment_date).ok_or_else(|| {
        ApiError::Validation(format!(
            "invalid appointmentDate value: {}",
            body.appointment_date
        ))
    })?;

    let booking = state.bookings.insert(Booking::new(
        body.customer_name,
        body.email,
        body.service,
        appointment_date,
    ));

    info!(
        booking_id = %booking.id,
        customer = %booking.customer_name,
        service = %booking.service,
        appointment_date = %booking.appointment_date,
        created_by = %ctx.subject,
        "Booking created"
    );

    let message = booking_confirmation(&booking, &state.config.email.salon_name);
    let mailer = Arc::clone(&state.mailer);
    let booking_id = booking.id;
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&message).await {
            warn!(booking_id = %booking_id, error = %e, "Confirmation email failed");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            message: "Booking created successfully".to_string(),
        }),
    )
        .into_response())
}

/// List bookings matching the optional filters
///
/// GET /bookings?customerName=&status=&startDate=&endDate=
///
/// Requires the admin role on top of authentication.
pub async fn list_bookings_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Query(params): Query<BookingFilterParams>,
) -> Result<Response, ApiError> {
    if ctx.role != ROLE_ADMIN {
        warn!(subject = %ctx.subject, role = %ctx.role, "Booking list denied for non-admin");
        return Err(ApiError::Forbidden);
    }

    let query =
        BookingQuery::from_params(&params).map_err(|e| ApiError::Validation(e.to_string()))?;

    let bookings = state.bookings.find(&query);

    info!(matched = bookings.len(), "Booking list served");

    Ok((StatusCode::OK, Json(bookings)).into_response())
}
