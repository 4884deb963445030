//! Bearer credential storage with client-side expiry checking
//!
//! The backend issues JWT-shaped bearer credentials. The client never
//! verifies signatures (that is the server's job); it only reads the
//! payload's `exp` claim so an expired credential is discarded instead of
//! being attached to requests that would fail anyway.

use std::path::PathBuf;
use std::sync::RwLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use tracing::warn;

/// Storage for the authenticated user's bearer credential.
///
/// `get` returns only valid credentials: an expired or malformed token is
/// discarded from the store and reported as absent.
pub trait TokenStore: Send + Sync {
    /// Read the raw stored credential, if any, without validation.
    fn load(&self) -> Option<String>;

    /// Persist a credential, replacing any previous one.
    fn set(&self, token: &str);

    /// Remove the stored credential.
    fn clear(&self);

    /// Read the stored credential, discarding it when expired.
    fn get(&self) -> Option<String> {
        let token = self.load()?;
        if token_expired(&token) {
            warn!("stored credential is expired or malformed, discarding");
            self.clear();
            return None;
        }
        Some(token)
    }
}

/// Whether a JWT-shaped credential's `exp` (epoch seconds) is in the past.
///
/// Tokens that cannot be decoded count as expired.
pub fn token_expired(token: &str) -> bool {
    match expiry_epoch(token) {
        Some(exp) => exp < Utc::now().timestamp(),
        None => true,
    }
}

fn expiry_epoch(token: &str) -> Option<i64> {
    let payload_segment = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload_segment.trim_end_matches('='))
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    payload.get("exp")?.as_i64()
}

/// In-memory store, used by tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

/// File-backed store, the persistent analog of the original client's
/// local storage. Unreadable or corrupt files behave as "no credential".
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    fn set(&self, token: &str) {
        if let Err(err) = std::fs::write(&self.path, token) {
            warn!(path = %self.path.display(), "failed to persist credential: {err}");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), "failed to clear credential: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(format!(r#"{{"user_id":7,"exp":{exp}}}"#).as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn valid_token_is_returned() {
        let store = MemoryTokenStore::new();
        let token = make_token(Utc::now().timestamp() + 3600);
        store.set(&token);
        assert_eq!(store.get(), Some(token));
    }

    #[test]
    fn expired_token_is_discarded() {
        let store = MemoryTokenStore::new();
        store.set(&make_token(Utc::now().timestamp() - 60));
        assert_eq!(store.get(), None);
        // discarded, not just hidden
        assert_eq!(store.load(), None);
    }

    #[test]
    fn malformed_token_is_discarded() {
        let store = MemoryTokenStore::new();
        store.set("not-a-jwt");
        assert_eq!(store.get(), None);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn missing_exp_counts_as_expired() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"user_id":7}"#);
        assert!(token_expired(&format!("{header}.{payload}.sig")));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        assert_eq!(store.get(), None);

        let token = make_token(Utc::now().timestamp() + 3600);
        store.set(&token);
        assert_eq!(store.get(), Some(token));

        store.clear();
        assert_eq!(store.get(), None);
        // clearing twice is fine
        store.clear();
    }

    #[test]
    fn file_store_discards_expired_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = FileTokenStore::new(&path);
        store.set(&make_token(Utc::now().timestamp() - 1));
        assert_eq!(store.get(), None);
        assert!(!path.exists());
    }
}
