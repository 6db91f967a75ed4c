use reqwest::cookie::Jar;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Login request body
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub id: &'a str,
    pub password: &'a str,
}

/// Session state shared by every clone of a client.
///
/// The cookie jar is handed to the transport once at construction and holds
/// whatever session cookie EnterMedia issues on login.
pub(crate) struct Session {
    authenticated: AtomicBool,
    login_lock: Mutex<()>,
    cookies: Arc<Jar>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            authenticated: AtomicBool::new(false),
            login_lock: Mutex::new(()),
            cookies: Arc::new(Jar::default()),
        }
    }

    pub fn cookies(&self) -> Arc<Jar> {
        Arc::clone(&self.cookies)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    pub fn mark_authenticated(&self) {
        self.authenticated.store(true, Ordering::Release);
    }

    pub fn reset(&self) {
        self.authenticated.store(false, Ordering::Release);
    }

    /// Serializes the check-then-login sequence so concurrent callers
    /// issue at most one login request.
    pub async fn lock_login(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.login_lock.lock().await
    }
}
