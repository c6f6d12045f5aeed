use crate::models::api::BookingFilterParams;
use crate::models::booking::Booking;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid {field} value: {value}")]
    InvalidDate { field: &'static str, value: String },
}

/// Store query assembled from the optional list filters.
///
/// The default query has no constraints and matches every booking.
#[derive(Debug, Default, Clone)]
pub struct BookingQuery {
    /// Lowercased substring needle for the customer name
    customer_name: Option<String>,
    status: Option<String>,
    from: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
}

impl BookingQuery {
    /// Translate raw filter parameters into a query.
    ///
    /// Malformed date strings are rejected here rather than silently
    /// matching nothing downstream.
    pub fn from_params(params: &BookingFilterParams) -> Result<Self, FilterError> {
        let from = match params.start_date.as_deref() {
            Some(raw) => Some(parse_datetime(raw).ok_or_else(|| FilterError::InvalidDate {
                field: "startDate",
                value: raw.to_string(),
            })?),
            None => None,
        };

        let until = match params.end_date.as_deref() {
            Some(raw) => Some(parse_end_datetime(raw).ok_or_else(|| FilterError::InvalidDate {
                field: "endDate",
                value: raw.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            customer_name: params.customer_name.as_ref().map(|s| s.to_lowercase()),
            status: params.status.clone(),
            from,
            until,
        })
    }

    /// Whether a booking satisfies every present filter.
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(needle) = &self.customer_name {
            if !booking.customer_name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if booking.status != *status {
                return false;
            }
        }

        if let Some(from) = self.from {
            if booking.appointment_date < from {
                return false;
            }
        }

        if let Some(until) = self.until {
            if booking.appointment_date > until {
                return false;
            }
        }

        true
    }
}

/// Parse an appointment or filter date.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`, or a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }

    None
}

/// Like `parse_datetime`, but a bare date extends to the end of that day
/// so an inclusive end bound admits bookings throughout it.
fn parse_end_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|n| Utc.from_utc_datetime(&n));
    }

    parse_datetime(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::STATUS_CONFIRMED;

    fn booking(name: &str, date: &str) -> Booking {
        Booking::new(
            name.to_string(),
            "customer@example.com".to_string(),
            "Manicure".to_string(),
            parse_datetime(date).unwrap(),
        )
    }

    fn params(
        customer_name: Option<&str>,
        status: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> BookingFilterParams {
        BookingFilterParams {
            customer_name: customer_name.map(str::to_string),
            status: status.map(str::to_string),
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }

    #[test]
    fn test_default_query_matches_everything() {
        let query = BookingQuery::default();
        assert!(query.matches(&booking("Anna", "2024-01-15")));
    }

    #[test]
    fn test_customer_name_substring_case_insensitive() {
        let query = BookingQuery::from_params(&params(Some("ann"), None, None, None)).unwrap();

        assert!(query.matches(&booking("Anna", "2024-01-15")));
        assert!(query.matches(&booking("ANNABELLE", "2024-01-15")));
        assert!(query.matches(&booking("banner", "2024-01-15")));
        assert!(!query.matches(&booking("Bob", "2024-01-15")));
    }

    #[test]
    fn test_status_exact_match() {
        let query =
            BookingQuery::from_params(&params(None, Some(STATUS_CONFIRMED), None, None)).unwrap();

        let mut confirmed = booking("Anna", "2024-01-15");
        confirmed.status = STATUS_CONFIRMED.to_string();
        assert!(query.matches(&confirmed));

        // Default status is Pending; exact match, not substring
        assert!(!query.matches(&booking("Anna", "2024-01-15")));
    }

    #[test]
    fn test_date_range_inclusive() {
        let query = BookingQuery::from_params(&params(
            None,
            None,
            Some("2024-01-01"),
            Some("2024-01-31"),
        ))
        .unwrap();

        assert!(query.matches(&booking("Anna", "2024-01-01")));
        assert!(query.matches(&booking("Anna", "2024-01-15T12:30:00")));
        assert!(query.matches(&booking("Anna", "2024-01-31T23:00:00")));
        assert!(!query.matches(&booking("Anna", "2023-12-31T23:59:00")));
        assert!(!query.matches(&booking("Anna", "2024-02-01")));
    }

    #[test]
    fn test_start_date_alone() {
        let query =
            BookingQuery::from_params(&params(None, None, Some("2024-06-01"), None)).unwrap();

        assert!(query.matches(&booking("Anna", "2024-06-01")));
        assert!(query.matches(&booking("Anna", "2025-01-01")));
        assert!(!query.matches(&booking("Anna", "2024-05-31")));
    }

    #[test]
    fn test_end_date_alone() {
        let query = BookingQuery::from_params(&params(None, None, None, Some("2024-06-01"))).unwrap();

        assert!(query.matches(&booking("Anna", "2024-06-01T18:00:00")));
        assert!(!query.matches(&booking("Anna", "2024-06-02")));
    }

    #[test]
    fn test_malformed_dates_rejected() {
        assert!(BookingQuery::from_params(&params(None, None, Some("not-a-date"), None)).is_err());
        assert!(BookingQuery::from_params(&params(None, None, None, Some("31/01/2024"))).is_err());
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2024-01-15T10:00:00Z").is_some());
        assert!(parse_datetime("2024-01-15T10:00:00+02:00").is_some());
        assert!(parse_datetime("2024-01-15T10:00:00").is_some());
        assert!(parse_datetime("2024-01-15").is_some());
        assert!(parse_datetime("January 15").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_combined_filters() {
        let query = BookingQuery::from_params(&params(
            Some("ann"),
            None,
            Some("2024-01-01"),
            Some("2024-01-31"),
        ))
        .unwrap();

        assert!(query.matches(&booking("Anna", "2024-01-15")));
        assert!(!query.matches(&booking("Anna", "2024-03-15")));
        assert!(!query.matches(&booking("Bob", "2024-01-15")));
    }
}
