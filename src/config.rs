use crate::error::AcquireError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Prefix shared by every environment variable the crate reads.
pub const ENV_PREFIX: &str = "ZILLOW_";

pub const DEFAULT_CACHE_PATH: &str = "zillow.csv";

/// Keys read as raw strings, bypassing `Env` value parsing.
const CREDENTIAL_KEYS: [&str; 3] = ["user", "password", "host"];

/// Database credentials. Values are taken as-is; nothing is validated or escaped.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    pub host: String,
}

impl Credentials {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

/// Process configuration, loaded once at startup and passed down explicitly.
#[derive(Clone, Deserialize, PartialEq)]
pub struct Config {
    pub user: String,
    pub password: String,
    pub host: String,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_use_cache() -> bool {
    true
}

fn default_loglevel() -> String {
    "info".to_string()
}

#[derive(Serialize)]
struct Defaults {
    cache_path: PathBuf,
    use_cache: bool,
    loglevel: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            use_cache: default_use_cache(),
            loglevel: default_loglevel(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials())
            .field("cache_path", &self.cache_path)
            .field("use_cache", &self.use_cache)
            .field("loglevel", &self.loglevel)
            .finish()
    }
}

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.user, &self.password, &self.host)
    }

    /// Layered figment: built-in defaults, then `ZILLOW_*` environment variables.
    ///
    /// Credentials are merged as plain strings so values like `123456` or
    /// `[abc]` are kept byte for byte instead of being parsed.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Defaults::default()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&CREDENTIAL_KEYS));
        for key in CREDENTIAL_KEYS {
            let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// Extract the configuration from the environment.
    ///
    /// `ZILLOW_USER`, `ZILLOW_PASSWORD` and `ZILLOW_HOST` must be set.
    pub fn from_env() -> Result<Self, AcquireError> {
        Ok(Self::figment().extract()?)
    }
}
