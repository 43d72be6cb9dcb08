use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_PHONE_PREFIXES: &str = "679";
const DEFAULT_PHONE_DIGITS: usize = 9;
const DEFAULT_NAME_EXTRA_LETTERS: &str = "áéíóúÁÉÍÓÚñÑüÜ";
const DEFAULT_MAX_ATTACHMENTS: usize = 5;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locale and limit dials for candidate validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Digits a national mobile number may start with.
    pub phone_prefixes: String,
    pub phone_digits: usize,
    /// Letters accepted in names on top of ASCII `a-z`/`A-Z`.
    pub name_extra_letters: String,
    pub max_attachments: usize,
}

impl IntakeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let phone_prefixes = env::var("INTAKE_PHONE_PREFIXES")
            .unwrap_or_else(|_| DEFAULT_PHONE_PREFIXES.to_string());
        let phone_prefixes = phone_prefixes.trim().to_string();
        if phone_prefixes.is_empty() || !phone_prefixes.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidPhonePrefixes);
        }

        let phone_digits = match env::var("INTAKE_PHONE_DIGITS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|digits| *digits > 0)
                .ok_or(ConfigError::InvalidPhoneDigits)?,
            Err(_) => DEFAULT_PHONE_DIGITS,
        };

        let name_extra_letters = env::var("INTAKE_NAME_EXTRA_LETTERS")
            .unwrap_or_else(|_| DEFAULT_NAME_EXTRA_LETTERS.to_string());

        let max_attachments = match env::var("INTAKE_MAX_ATTACHMENTS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMaxAttachments)?,
            Err(_) => DEFAULT_MAX_ATTACHMENTS,
        };

        Ok(Self {
            phone_prefixes,
            phone_digits,
            name_extra_letters,
            max_attachments,
        })
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            phone_prefixes: DEFAULT_PHONE_PREFIXES.to_string(),
            phone_digits: DEFAULT_PHONE_DIGITS,
            name_extra_letters: DEFAULT_NAME_EXTRA_LETTERS.to_string(),
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPhonePrefixes,
    InvalidPhoneDigits,
    InvalidMaxAttachments,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPhonePrefixes => {
                write!(f, "INTAKE_PHONE_PREFIXES must be a non-empty list of digits")
            }
            ConfigError::InvalidPhoneDigits => {
                write!(f, "INTAKE_PHONE_DIGITS must be a positive integer")
            }
            ConfigError::InvalidMaxAttachments => {
                write!(f, "INTAKE_MAX_ATTACHMENTS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPhonePrefixes
            | ConfigError::InvalidPhoneDigits
            | ConfigError::InvalidMaxAttachments => None,
        }
    }
}
