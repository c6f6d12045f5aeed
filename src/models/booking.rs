use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CONFIRMED: &str = "Confirmed";
pub const STATUS_COMPLETED: &str = "Completed";

/// A recorded appointment.
///
/// Status is an open set; the constants above are the values the salon
/// actually uses, but nothing rejects other strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub service: String,
    pub appointment_date: DateTime<Utc>,
    pub status: String,
}

impl Booking {
    /// Create a booking with the default `Pending` status.
    pub fn new(
        customer_name: String,
        email: String,
        service: String,
        appointment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name,
            email,
            service,
            appointment_date,
            status: STATUS_PENDING.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_booking_is_pending() {
        let booking = Booking::new(
            "Anna".to_string(),
            "anna@example.com".to_string(),
            "Manicure".to_string(),
            Utc::now(),
        );

        assert_eq!(booking.status, STATUS_PENDING);
    }

    #[test]
    fn test_booking_serializes_camel_case() {
        let booking = Booking::new(
            "Anna".to_string(),
            "anna@example.com".to_string(),
            "Manicure".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("customerName").is_some());
        assert!(json.get("appointmentDate").is_some());
        assert_eq!(json["status"], "Pending");
    }
}
