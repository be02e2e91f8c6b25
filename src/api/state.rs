//! Runtime configuration and the in-memory session table.
//!
//! Sessions are never persisted: a restart logs everyone out and empties
//! every cart, the same trade-off the original site made with its
//! memory-backed session middleware.

use anyhow::{anyhow, Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    frontend_base_url: String,
    session_ttl_seconds: u64,
}

impl AppConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    pub(crate) fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    pub(crate) fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }

    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

/// One live session: the bound user (after login) and the cart.
pub(crate) struct SessionEntry {
    pub(crate) user_id: Option<Uuid>,
    pub(crate) cart: HashMap<String, u32>,
    expires_at: Instant,
}

pub struct AppState {
    config: AppConfig,
    sessions: Mutex<HashMap<Vec<u8>, SessionEntry>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Create a fresh session and return the raw token for the cookie.
    /// Only the hash is kept in the table.
    ///
    /// # Errors
    /// Returns an error if a unique token cannot be generated.
    pub(crate) async fn insert_session(&self) -> Result<String> {
        let mut sessions = self.sessions.lock().await;
        for _ in 0..3 {
            let token = generate_session_token()?;
            let token_hash = hash_session_token(&token);
            if sessions.contains_key(&token_hash) {
                continue;
            }
            sessions.insert(
                token_hash,
                SessionEntry {
                    user_id: None,
                    cart: HashMap::new(),
                    expires_at: Instant::now() + self.config.session_ttl(),
                },
            );
            return Ok(token);
        }
        Err(anyhow!("failed to generate unique session token"))
    }

    /// Run `f` against a live session. Expired entries are dropped on
    /// access and read as "no session".
    pub(crate) async fn with_session<R>(
        &self,
        token_hash: &[u8],
        f: impl FnOnce(&mut SessionEntry) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.lock().await;
        if let Some(entry) = sessions.get(token_hash) {
            if entry.expires_at <= Instant::now() {
                sessions.remove(token_hash);
                return None;
            }
        }
        sessions.get_mut(token_hash).map(f)
    }

    /// Logout is idempotent; removing a missing session is fine.
    pub(crate) async fn remove_session(&self, token_hash: &[u8]) {
        self.sessions.lock().await.remove(token_hash);
    }
}

/// Create a new session token for the auth cookie.
/// The raw value is only returned to set the cookie; the table stores a hash.
pub(crate) fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Hash a session token so raw cookie values never sit in the table.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(ttl_seconds: u64) -> AppState {
        AppState::new(
            AppConfig::new("http://localhost:8080".to_string())
                .with_session_ttl_seconds(ttl_seconds),
        )
    }

    #[test]
    fn cookie_secure_follows_frontend_scheme() {
        let http = AppConfig::new("http://localhost:8080".to_string());
        assert!(!http.session_cookie_secure());
        let https = AppConfig::new("https://shop.gorillaz.co".to_string());
        assert!(https.session_cookie_secure());
    }

    #[test]
    fn generate_session_token_is_32_random_bytes() {
        let token = generate_session_token().expect("token");
        let decoded = Base64UrlUnpadded::decode_vec(&token).expect("base64url");
        assert_eq!(decoded.len(), 32);
        assert_ne!(token, generate_session_token().expect("token"));
    }

    #[test]
    fn hash_session_token_stable() {
        assert_eq!(hash_session_token("token"), hash_session_token("token"));
        assert_ne!(hash_session_token("token"), hash_session_token("other"));
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let state = test_state(3600);
        let token = state.insert_session().await.expect("session");
        let hash = hash_session_token(&token);

        let user = state.with_session(&hash, |entry| entry.user_id).await;
        assert_eq!(user, Some(None), "fresh session has no bound user");

        let id = Uuid::new_v4();
        state
            .with_session(&hash, |entry| entry.user_id = Some(id))
            .await;
        let user = state.with_session(&hash, |entry| entry.user_id).await;
        assert_eq!(user, Some(Some(id)));

        state.remove_session(&hash).await;
        assert!(state.with_session(&hash, |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_dropped_on_access() {
        let state = test_state(0);
        let token = state.insert_session().await.expect("session");
        let hash = hash_session_token(&token);
        assert!(state.with_session(&hash, |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn unknown_hash_reads_as_no_session() {
        let state = test_state(3600);
        assert!(state.with_session(b"nope", |_| ()).await.is_none());
    }
}
