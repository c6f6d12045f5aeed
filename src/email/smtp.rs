use crate::core::config::SmtpConfig;
use crate::email::mailer::EmailMessage;
use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends mail over authenticated SMTP (STARTTLS)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, from_address: &str) -> Result<Self> {
        let from = from_address
            .parse::<Mailbox>()
            .context("Invalid from_address in [email] config")?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .context("Failed to build SMTP transport")?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<()> {
        let to = message
            .to
            .parse::<Mailbox>()
            .context("Invalid recipient address")?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .body(message.body.clone())
            .context("Failed to build email message")?;

        self.transport
            .send(email)
            .await
            .context("SMTP send failed")?;

        Ok(())
    }
}
