// HTTP routes configuration

use crate::auth::middleware::require_auth;
use crate::core::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Routes behind the bearer-token gate
    let protected = Router::new()
        .route(
            "/create-booking",
            post(crate::handlers::bookings::create_booking_handler),
        )
        .route(
            "/bookings",
            get(crate::handlers::bookings::list_bookings_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_auth,
        ));

    Router::new()
        // Public endpoints
        .route("/", get(crate::handlers::health::welcome_handler))
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/register", post(crate::handlers::auth::register_handler))
        .route("/login", post(crate::handlers::auth::login_handler))
        .merge(protected)

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
