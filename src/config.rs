/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const ACCESS_TOKEN_KEY_VARS: &[&str] = &["ACCESS_JWT_PUBLIC_KEY_PEM", "ACCESS_JWT_SECRET"];

const DEFAULT_SQIDS_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    /// None of several interchangeable keys is set.
    MissingOneOf(&'static [&'static str]),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::MissingOneOf(keys) => {
                write!(f, "missing configuration: one of {}", keys.join(", "))
            }
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Key used to verify access tokens. Issuance happens elsewhere.
#[derive(Clone)]
pub enum AccessTokenKey {
    /// EdDSA: Ed25519 public key (PEM)
    Ed25519PublicPem(String),
    /// HS256: base64-encoded shared secret
    HmacSecret(String),
}

impl fmt::Debug for AccessTokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        match self {
            Self::Ed25519PublicPem(_) => f.write_str("Ed25519PublicPem(..)"),
            Self::HmacSecret(_) => f.write_str("HmacSecret(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub access_token_key: AccessTokenKey,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build from any key/value lookup (the process environment in production).
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match non_empty("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = non_empty("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            None => 5,
        };

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let sqids_min_length = non_empty("SQIDS_MIN_LENGTH")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let sqids_alphabet =
            non_empty("SQIDS_ALPHABET").unwrap_or_else(|| DEFAULT_SQIDS_ALPHABET.to_string());

        // A public key wins over a shared secret when both are present.
        let access_token_key = match (
            non_empty("ACCESS_JWT_PUBLIC_KEY_PEM"),
            non_empty("ACCESS_JWT_SECRET"),
        ) {
            (Some(pem), _) => AccessTokenKey::Ed25519PublicPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => AccessTokenKey::HmacSecret(secret),
            (None, None) => return Err(ConfigError::MissingOneOf(ACCESS_TOKEN_KEY_VARS)),
        };

        let auth_issuer = non_empty("AUTH_ISSUER");
        let auth_audience = non_empty("AUTH_AUDIENCE");

        let access_token_leeway_seconds = non_empty("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            access_token_key,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
        })
    }
}
