use crate::models::booking::Booking;
use crate::validation::filter::BookingQuery;
use std::sync::RwLock;

/// In-memory booking store
///
/// Bookings are kept in insertion order; `find` returns matches in that
/// order, which is the listing contract.
pub struct BookingStore {
    bookings: RwLock<Vec<Booking>>,
}

impl BookingStore {
    /// Create a new BookingStore instance
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(Vec::new()),
        }
    }

    /// Append a booking to the store
    pub fn insert(&self, booking: Booking) -> Booking {
        self.bookings
            .write()
            .expect("booking store lock poisoned")
            .push(booking.clone());
        booking
    }

    /// Return all bookings satisfying the query, in insertion order
    pub fn find(&self, query: &BookingQuery) -> Vec<Booking> {
        self.bookings
            .read()
            .expect("booking store lock poisoned")
            .iter()
            .filter(|booking| query.matches(booking))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bookings.read().expect("booking store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}
