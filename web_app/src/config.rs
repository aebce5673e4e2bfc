//! Application configuration management with security considerations.
//!
//! All values are read once from the environment at startup and kept in
//! [`APP_CONFIG`]. Sensitive fields are clearly marked and must never be logged.

use anyhow::Context;
use envconfig::Envconfig;
use tokio::sync::OnceCell;

/// Application configuration with security-aware field management.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Never log or expose sensitive values
/// - Rotate the LINE channel access token on security incidents
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/roster.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data (prod only)
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: LINE Messaging API channel access token
    pub line_channel_access_token: String,

    /// LINE push message endpoint (NON-SENSITIVE)
    #[envconfig(default = "https://api.line.me/v2/bot/message/push")]
    pub line_push_endpoint: String,

    /// Upper bound for a single push call, in seconds
    #[envconfig(default = "10")]
    pub line_push_timeout_secs: u64,

    /// Minutes a pending registration stays valid. `0` disables expiry.
    #[envconfig(default = "30")]
    pub pending_ttl_minutes: i64,

    /// 🔒 SENSITIVE: shared secret for the internal manual push endpoint.
    /// An empty value disables the endpoint.
    #[envconfig(default = "")]
    pub internal_api_secret: String,

    /// 🔒 SENSITIVE: Logfire write token. Telemetry stays local when absent.
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Window after which a pending registration is treated as abandoned
    ///
    /// # Errors
    /// Fails when `pending_ttl_minutes` does not fit in a [`chrono::Duration`].
    pub fn pending_ttl(&self) -> anyhow::Result<Option<chrono::Duration>> {
        if self.pending_ttl_minutes <= 0 {
            return Ok(None);
        }

        chrono::Duration::try_minutes(self.pending_ttl_minutes)
            .map(Some)
            .with_context(|| {
                format!(
                    "PENDING_TTL_MINUTES out of range: {}",
                    self.pending_ttl_minutes
                )
            })
    }

    /// Timeout applied to every call against the LINE push endpoint
    pub fn line_push_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.line_push_timeout_secs)
    }
}

/// Global application configuration instance, set by [`init_config`]
pub static APP_CONFIG: OnceCell<AppConfig> = OnceCell::const_new();

/// Loads [`AppConfig`] from the environment into [`APP_CONFIG`].
///
/// Calling it more than once keeps the first loaded value.
pub async fn init_config() -> anyhow::Result<()> {
    APP_CONFIG
        .get_or_try_init(|| async {
            AppConfig::init_from_env()
                .context("failed to load application configuration from environment")
        })
        .await?;

    Ok(())
}
