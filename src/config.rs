use crate::error::{EnterMediaError, EnterMediaResult};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use url::Url;

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for an EnterMedia instance
#[derive(Clone)]
pub struct ClientConfig {
    pub base_uri: String,
    pub timeout: Duration,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_uri", &self.base_uri)
            .field("timeout", &self.timeout)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl ClientConfig {
    pub fn new(
        base_uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_uri: base_uri.into(),
            timeout: DEFAULT_TIMEOUT,
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read settings from `ENTERMEDIA_BASE_URI`, `ENTERMEDIA_USERNAME`,
    /// `ENTERMEDIA_PASSWORD` and optionally `ENTERMEDIA_TIMEOUT_SECS`,
    /// after loading any `.env` files (see [`load_env_file`]).
    pub fn from_env() -> EnterMediaResult<Self> {
        load_env_file();

        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| EnterMediaError::invalid_param(format!("{} is not set", name)))
        };

        let mut config = Self::new(
            var("ENTERMEDIA_BASE_URI")?,
            var("ENTERMEDIA_USERNAME")?,
            var("ENTERMEDIA_PASSWORD")?,
        );

        if let Ok(secs) = std::env::var("ENTERMEDIA_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                EnterMediaError::invalid_param(format!(
                    "ENTERMEDIA_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Base URI as a URL whose path ends in `/`, so relative service paths
    /// are appended rather than replacing the last segment.
    pub fn base_url(&self) -> EnterMediaResult<Url> {
        let mut url = Url::parse(&self.base_uri)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// Load environment variables from .env files.
/// First loads from ~/.env, then from ./.env. Variables already set in the
/// process environment are never overwritten.
pub fn load_env_file() {
    if let Some(home) = dirs::home_dir() {
        dotenv::from_path(home.join(".env")).ok();
    }

    dotenv::dotenv().ok();
}

/// Source of connection settings, consulted at the start of every operation
pub trait ConfigProvider: Send + Sync {
    fn snapshot(&self) -> ClientConfig;
}

impl ConfigProvider for ClientConfig {
    fn snapshot(&self) -> ClientConfig {
        self.clone()
    }
}

/// Configuration that can be changed while clients are using it
#[derive(Clone, Debug)]
pub struct SharedConfig {
    inner: Arc<RwLock<ClientConfig>>,
}

impl SharedConfig {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Apply a change; takes effect on the next client call
    pub fn update(&self, f: impl FnOnce(&mut ClientConfig)) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }
}

impl ConfigProvider for SharedConfig {
    fn snapshot(&self) -> ClientConfig {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
