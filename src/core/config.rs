use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Process-wide signing secret for identity tokens
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailMode {
    #[default]
    Disabled,
    Smtp,
    Gmail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub mode: EmailMode,
    /// Sender address for SMTP mode; Gmail sends as the authenticated account
    #[serde(default)]
    pub from_address: String,
    /// Name signed under confirmation emails
    #[serde(default = "default_salon_name")]
    pub salon_name: String,
    pub smtp: Option<SmtpConfig>,
    pub gmail: Option<GmailConfig>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            mode: EmailMode::Disabled,
            from_address: String::new(),
            salon_name: default_salon_name(),
            smtp: None,
            gmail: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_token_ttl() -> i64 {
    3600 // 1 hour
}

fn default_salon_name() -> String {
    "Artonus Nailsroom".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate auth config
        if self.auth.jwt_secret.is_empty() {
            bail!("jwt_secret must not be empty");
        }

        if self.auth.token_ttl_secs <= 0 {
            bail!("token_ttl_secs must be greater than 0");
        }

        // Validate email config
        match self.email.mode {
            EmailMode::Disabled => {}
            EmailMode::Smtp => {
                let smtp = match &self.email.smtp {
                    Some(smtp) => smtp,
                    None => bail!("[email.smtp] section is required when email mode is 'smtp'"),
                };

                if smtp.host.is_empty() {
                    bail!("smtp host must not be empty");
                }

                if smtp.username.is_empty() {
                    bail!("smtp username must not be empty");
                }

                if self.email.from_address.is_empty() {
                    bail!("from_address must be set when email mode is 'smtp'");
                }
            }
            EmailMode::Gmail => {
                let gmail = match &self.email.gmail {
                    Some(gmail) => gmail,
                    None => bail!("[email.gmail] section is required when email mode is 'gmail'"),
                };

                if gmail.client_id.is_empty()
                    || gmail.client_secret.is_empty()
                    || gmail.refresh_token.is_empty()
                {
                    bail!("gmail client_id, client_secret and refresh_token must all be set");
                }
            }
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load(content: &str) -> Result<Config> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        Config::from_file(&file.path().to_path_buf())
    }

    #[test]
    fn test_minimal_config_applies_defaults() {
        let config = load(
            r#"
            [server]

            [auth]
            jwt_secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.server.num_threads > 0);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.email.mode, EmailMode::Disabled);
        assert_eq!(config.email.salon_name, "Artonus Nailsroom");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_empty_jwt_secret_rejected() {
        let result = load(
            r#"
            [server]

            [auth]
            jwt_secret = ""
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_smtp_mode_requires_section() {
        let result = load(
            r#"
            [server]

            [auth]
            jwt_secret = "secret"

            [email]
            mode = "smtp"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_smtp_mode_full_config() {
        let config = load(
            r#"
            [server]
            port = 8080

            [auth]
            jwt_secret = "secret"

            [email]
            mode = "smtp"
            from_address = "salon@example.com"

            [email.smtp]
            host = "smtp.example.com"
            username = "salon@example.com"
            password = "hunter2"
            "#,
        )
        .unwrap();

        assert_eq!(config.email.mode, EmailMode::Smtp);
        assert_eq!(config.email.smtp.as_ref().unwrap().port, 587);
    }

    #[test]
    fn test_gmail_mode_requires_credentials() {
        let result = load(
            r#"
            [server]

            [auth]
            jwt_secret = "secret"

            [email]
            mode = "gmail"

            [email.gmail]
            client_id = "id"
            client_secret = ""
            refresh_token = "token"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = load(
            r#"
            [server]

            [auth]
            jwt_secret = "secret"

            [logging]
            level = "verbose"
            "#,
        );

        assert!(result.is_err());
    }
}
