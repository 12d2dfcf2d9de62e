use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Minimum length accepted for the admin session signing secret.
pub const MIN_SESSION_SECRET_LEN: usize = 16;

const SERVERLESS_DATA_DIR: &str = "/tmp/personas-quiz-data";

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

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub quiz: QuizConfig,
    pub admin: AdminConfig,
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

        let data_dir = match non_empty_var("DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None if is_serverless() => PathBuf::from(SERVERLESS_DATA_DIR),
            None => PathBuf::from("data"),
        };

        let catalog_path = non_empty_var("QUIZ_CATALOG_PATH").map(PathBuf::from);

        let session_secret = non_empty_var("ADMIN_SESSION_SECRET");
        if let Some(secret) = &session_secret {
            if secret.len() < MIN_SESSION_SECRET_LEN {
                return Err(ConfigError::WeakSessionSecret);
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig { data_dir },
            quiz: QuizConfig { catalog_path },
            admin: AdminConfig {
                username: non_empty_var("ADMIN_USER"),
                password: non_empty_var("ADMIN_PASSWORD"),
                session_secret,
                secure_cookie: environment.is_production(),
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn is_serverless() -> bool {
    env::var_os("VERCEL").is_some() || env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some()
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

/// Where the JSON lead files live.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Optional catalog override; the built-in catalog is used when unset.
#[derive(Debug, Clone, Default)]
pub struct QuizConfig {
    pub catalog_path: Option<PathBuf>,
}

/// Admin login credentials and cookie signing settings.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub session_secret: Option<String>,
    pub secure_cookie: bool,
}

impl AdminConfig {
    /// Admin login only works when all three values are present.
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some() && self.session_secret.is_some()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    WeakSessionSecret,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::WeakSessionSecret => write!(
                f,
                "ADMIN_SESSION_SECRET must be at least {} characters",
                MIN_SESSION_SECRET_LEN
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::WeakSessionSecret => None,
        }
    }
}
