use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub tickets: TicketConfig,
    pub attachments: AttachmentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: Option<ProxyAuthConfig>,
    pub single_user: Option<SingleUserAuthConfig>,
}

/// Identity asserted by a trusted reverse proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAuthConfig {
    /// Value of the role header that grants administrator rights.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

fn default_admin_role() -> String {
    "admin".to_string()
}

impl Default for ProxyAuthConfig {
    fn default() -> Self {
        Self {
            admin_role: default_admin_role(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub administrator: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// What happens when someone replies to a resolved or closed ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedReplyPolicy {
    /// Store the reply and leave the status untouched.
    Accept,
    /// Refuse the reply with a conflict.
    Reject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketConfig {
    pub resolved_reply_policy: ResolvedReplyPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentConfig {
    /// Directory uploaded files are written to.
    pub directory: String,
    /// Base URL under which `directory` is served.
    pub public_base_url: String,
    pub max_bytes: u64,
}

/// ## Summary
/// Environment source for settings. Nested keys are joined with a double
/// underscore, so `TICKETS__RESOLVED_REPLY_POLICY` maps to
/// `tickets.resolved_reply_policy`.
#[must_use]
pub fn environment() -> config::Environment {
    config::Environment::default()
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_with(environment())
    }

    /// ## Summary
    /// Builds settings from defaults, the given environment source and an
    /// optional `config.toml`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load_with(env: config::Environment) -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8697)?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("tickets.resolved_reply_policy", "accept")?
            .set_default("attachments.directory", "./attachments")?
            .set_default("attachments.public_base_url", "/attachments")?
            .set_default("attachments.max_bytes", 10 * 1024 * 1024)?
            // Env file
            .add_source(env)
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
