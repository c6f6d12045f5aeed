// Application state (AppState)

use crate::auth::token::TokenService;
use crate::core::config::Config;
use crate::email::mailer::Mailer;
use crate::stores::{booking_store::BookingStore, user_store::UserStore};
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// Constructed explicitly at startup (and by tests), never through
/// module-level globals.
#[derive(Clone)]
pub struct AppState {
    /// User store for registration and login
    pub users: Arc<UserStore>,

    /// Booking store for appointment records
    pub bookings: Arc<BookingStore>,

    /// Issues and verifies identity tokens
    pub tokens: TokenService,

    /// Outgoing email transport
    pub mailer: Arc<Mailer>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);
        let mailer = Arc::new(Mailer::from_config(&config.email)?);

        Ok(Self {
            users: Arc::new(UserStore::new()),
            bookings: Arc::new(BookingStore::new()),
            tokens,
            mailer,
            config,
        })
    }
}
