use crate::{
    apis::AssetApi,
    auth::{LoginRequest, Session},
    config::{ClientConfig, ConfigProvider},
    error::{EnterMediaError, EnterMediaResult},
    models::{has_success_marker, is_invalid_login},
    storage::{FileSystem, LocalFileSystem},
    validation::UploadRule,
};
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::sync::Arc;

pub(crate) const LOGIN_PATH: &str = "mediadb/services/authentication/login";

/// Main EnterMedia client.
///
/// Clones share the HTTP connection pool, the cookie jar and the
/// authenticated state.
#[derive(Clone)]
pub struct EnterMediaClient {
    http: Client,
    config: Arc<dyn ConfigProvider>,
    session: Arc<Session>,
    files: Arc<dyn FileSystem>,
    upload_rules: Arc<[UploadRule]>,
}

impl EnterMediaClient {
    /// Create a new client. Settings are read from `config` at the start of
    /// every operation.
    pub fn new(config: impl ConfigProvider + 'static) -> EnterMediaResult<Self> {
        let session = Arc::new(Session::new());
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .cookie_provider(session.cookies())
            .build()
            .map_err(EnterMediaError::Connection)?;

        Ok(Self {
            http,
            config: Arc::new(config),
            session,
            files: Arc::new(LocalFileSystem::new()),
            upload_rules: Arc::from(Vec::new()),
        })
    }

    /// Use a different storage accessor for resolving upload sources
    pub fn with_file_system(mut self, files: impl FileSystem + 'static) -> Self {
        self.files = Arc::new(files);
        self
    }

    /// Rules every upload must pass before it is sent
    pub fn with_upload_rules(mut self, rules: Vec<UploadRule>) -> Self {
        self.upload_rules = Arc::from(rules);
        self
    }

    /// Get Asset API
    pub fn assets(&self) -> AssetApi<'_> {
        AssetApi::new(self)
    }

    /// Whether a login has succeeded and no 403 has been seen since
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Forget the current login; the next operation logs in again
    pub fn reset_session(&self) {
        info!("Resetting EnterMedia session");
        self.session.reset();
    }

    /// Log in with the configured credentials.
    ///
    /// Returns `Ok(false)` when EnterMedia rejects the credentials. Does
    /// nothing and returns `Ok(true)` when already logged in.
    pub async fn login(&self) -> EnterMediaResult<bool> {
        self.login_with(&self.config()).await
    }

    /// Log in against the given settings snapshot
    async fn login_with(&self, config: &ClientConfig) -> EnterMediaResult<bool> {
        if self.session.is_authenticated() {
            return Ok(true);
        }

        let _guard = self.session.lock_login().await;
        // Another caller may have logged in while we waited
        if self.session.is_authenticated() {
            return Ok(true);
        }

        info!("Logging in to EnterMedia as {}", config.username);
        let req = self
            .request(config, Method::POST, LOGIN_PATH)?
            .json(&LoginRequest {
                id: &config.username,
                password: &config.password,
            });

        let body = self.send(req).await?;
        if has_success_marker(&body) {
            self.session.mark_authenticated();
            debug!("EnterMedia login succeeded");
            return Ok(true);
        }
        if is_invalid_login(&body) {
            warn!("EnterMedia rejected the login for {}", config.username);
            return Ok(false);
        }

        Err(EnterMediaError::request_failed("login response carried no success marker"))
    }

    /// Log in if needed, failing when the credentials are rejected.
    /// `config` is the snapshot the calling operation will also use.
    pub(crate) async fn ensure_authenticated(
        &self,
        config: &ClientConfig,
    ) -> EnterMediaResult<()> {
        if self.login_with(config).await? {
            Ok(())
        } else {
            Err(EnterMediaError::auth_config("login was rejected"))
        }
    }

    /// Immutable settings for one operation
    pub(crate) fn config(&self) -> ClientConfig {
        self.config.snapshot()
    }

    pub(crate) fn files(&self) -> &dyn FileSystem {
        self.files.as_ref()
    }

    pub(crate) fn upload_rules(&self) -> &[UploadRule] {
        &self.upload_rules
    }

    /// Build a request to a path relative to the configured base URI
    pub(crate) fn request(
        &self,
        config: &ClientConfig,
        method: Method,
        path: &str,
    ) -> EnterMediaResult<RequestBuilder> {
        let url = config.base_url()?.join(path)?;
        debug!("HTTP {} {}", method, url);
        Ok(self.http.request(method, url).timeout(config.timeout))
    }

    /// Execute a request and require the `response.status == "ok"` marker
    pub(crate) async fn execute(&self, request: RequestBuilder) -> EnterMediaResult<Value> {
        let body = self.send(request).await?;
        if has_success_marker(&body) {
            Ok(body)
        } else {
            Err(EnterMediaError::request_failed(
                "response carried no success marker",
            ))
        }
    }

    /// Execute a request and decode the JSON body, mapping transport and
    /// status failures
    async fn send(&self, request: RequestBuilder) -> EnterMediaResult<Value> {
        let response = request.send().await.map_err(EnterMediaError::Connection)?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            // Usually an expired session; log in again on the next call
            warn!("EnterMedia returned 403 for {}, resetting session", response.url());
            self.session.reset();
            return Err(EnterMediaError::auth_config(format!(
                "HTTP 403 from {}",
                response.url()
            )));
        }

        if status != StatusCode::OK {
            return Err(EnterMediaError::unexpected_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let bytes = response.bytes().await.map_err(EnterMediaError::Connection)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            EnterMediaError::request_failed(format!("response was not valid JSON: {}", e))
        })
    }
}
