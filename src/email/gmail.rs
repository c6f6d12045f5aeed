use crate::core::config::GmailConfig;
use crate::email::mailer::EmailMessage;
use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use std::time::Duration;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Sends mail through the Gmail REST API.
///
/// Each send exchanges the long-lived refresh token for a short-lived
/// access token, then posts the raw message. The authenticated account is
/// the sender.
pub struct GmailMailer {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

impl GmailMailer {
    pub fn new(config: &GmailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
        })
    }

    /// Exchange the refresh token for an access token
    async fn access_token(&self) -> Result<String> {
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to reach OAuth2 token endpoint")?;

        if !response.status().is_success() {
            bail!(
                "OAuth2 token endpoint returned error status: {}",
                response.status()
            );
        }

        let token = response
            .json::<AccessTokenResponse>()
            .await
            .context("Failed to parse OAuth2 token response")?;

        Ok(token.access_token)
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<()> {
        let access_token = self.access_token().await?;

        let response = self
            .client
            .post(SEND_ENDPOINT)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "raw": encode_raw_message(message) }))
            .send()
            .await
            .context("Failed to send message via Gmail API")?;

        if !response.status().is_success() {
            bail!("Gmail API returned error status: {}", response.status());
        }

        Ok(())
    }
}

/// RFC 822 message, base64url-encoded without padding as the Gmail API
/// expects.
fn encode_raw_message(message: &EmailMessage) -> String {
    let raw = format!(
        "To: {}\nSubject: {}\n\n{}",
        message.to, message.subject, message.body
    );

    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gmail_mailer_creation() {
        let mailer = GmailMailer::new(&GmailConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            refresh_token: "refresh-token".to_string(),
        });

        assert!(mailer.is_ok());
    }

    #[test]
    fn test_encode_raw_message_url_safe_no_pad() {
        let message = EmailMessage {
            to: "anna@example.com".to_string(),
            subject: "Booking Confirmation".to_string(),
            body: "Hello Anna,\n\nSee you soon!".to_string(),
        };

        let encoded = encode_raw_message(&message);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));

        let decoded = URL_SAFE_NO_PAD.decode(&encoded).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();
        assert!(decoded.starts_with("To: anna@example.com\n"));
        assert!(decoded.contains("Subject: Booking Confirmation\n"));
        assert!(decoded.ends_with("Hello Anna,\n\nSee you soon!"));
    }
}
