use crate::core::config::{EmailConfig, EmailMode};
use crate::email::gmail::GmailMailer;
use crate::email::smtp::SmtpMailer;
use crate::models::booking::Booking;
use anyhow::{Context, Result};
use tracing::debug;

/// A single outgoing message
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outgoing email transport, chosen by configuration.
///
/// Sends are at-most-once: callers never retry, and a failed send must not
/// affect whatever write triggered it.
pub enum Mailer {
    Smtp(SmtpMailer),
    Gmail(GmailMailer),
    Disabled,
}

impl Mailer {
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        match config.mode {
            EmailMode::Disabled => Ok(Mailer::Disabled),
            EmailMode::Smtp => {
                let smtp = config
                    .smtp
                    .as_ref()
                    .context("[email.smtp] section is required when email mode is 'smtp'")?;
                Ok(Mailer::Smtp(SmtpMailer::new(smtp, &config.from_address)?))
            }
            EmailMode::Gmail => {
                let gmail = config
                    .gmail
                    .as_ref()
                    .context("[email.gmail] section is required when email mode is 'gmail'")?;
                Ok(Mailer::Gmail(GmailMailer::new(gmail)?))
            }
        }
    }

    /// Send one message through the configured transport
    pub async fn send(&self, message: &EmailMessage) -> Result<()> {
        match self {
            Mailer::Smtp(smtp) => smtp.send(message).await,
            Mailer::Gmail(gmail) => gmail.send(message).await,
            Mailer::Disabled => {
                debug!(to = %message.to, "Email transport disabled, skipping send");
                Ok(())
            }
        }
    }
}

/// Confirmation message for a freshly created booking
pub fn booking_confirmation(booking: &Booking, salon_name: &str) -> EmailMessage {
    let date = booking.appointment_date.format("%Y-%m-%d %H:%M");

    EmailMessage {
        to: booking.email.clone(),
        subject: "Booking Confirmation".to_string(),
        body: format!(
            "Hello {},\n\nThank you for booking a {} on {}!\nWe look forward to seeing you.\n\n- {}\n",
            booking.customer_name, booking.service, date, salon_name
        ),
    }
}
