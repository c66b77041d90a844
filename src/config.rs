use std::net::SocketAddr;
use std::path::PathBuf;

pub struct Config {
    /// Address the server listens on
    pub server_addr: SocketAddr,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Signs form tokens. Generated per process when not configured.
    pub secret_key: String,
    /// `None` means contact messages are only logged
    pub smtp: Option<SmtpConfig>,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    /// Submission port, 587 when not set
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    /// Operator mailbox that receives contact messages
    pub mailbox: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("mailbox", &self.mailbox)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reads the environment (and `.env`, if present) once at startup.
    pub fn new() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let var = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let server_addr = var("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:5001".into());
        let server_addr = server_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "SERVER_ADDR",
                value: server_addr.clone(),
            })?;

        let database_url = var("DATABASE_URL").unwrap_or_else(|| "sqlite://posts.db".into());
        let database_path = database_path(&database_url)?;

        let secret_key = match var("SECRET_KEY") {
            Some(secret) => secret,
            None => {
                tracing::warn!("SECRET_KEY is not set, form tokens will not survive a restart");
                crate::blog::get_random_hex_string::<{ crate::blog::SECRET_BYTES }>()
            }
        };

        let smtp = match var("SMTP_HOST") {
            None => None,
            Some(host) => {
                let port = match var("SMTP_PORT") {
                    None => None,
                    Some(port) => Some(port.parse::<u16>().map_err(|_| ConfigError::Invalid {
                        name: "SMTP_PORT",
                        value: port.clone(),
                    })?),
                };
                let username = var("SMTP_USERNAME").ok_or(ConfigError::Missing("SMTP_USERNAME"))?;
                let password = var("SMTP_PASSWORD").ok_or(ConfigError::Missing("SMTP_PASSWORD"))?;
                let mailbox = var("CONTACT_MAILBOX").unwrap_or_else(|| username.clone());
                Some(SmtpConfig {
                    host,
                    port,
                    username,
                    password,
                    mailbox,
                })
            }
        };

        Ok(Config {
            server_addr,
            database_path,
            secret_key,
            smtp,
        })
    }
}

fn database_path(url: &str) -> Result<PathBuf, ConfigError> {
    let path = match url.split_once("://") {
        Some(("sqlite", path)) => path,
        Some(_) => {
            return Err(ConfigError::Invalid {
                name: "DATABASE_URL",
                value: url.to_owned(),
            })
        }
        None => url,
    };

    if path.is_empty() {
        return Err(ConfigError::Invalid {
            name: "DATABASE_URL",
            value: url.to_owned(),
        });
    }
    Ok(PathBuf::from(path))
}
