//! Per-session CSRF token: created lazily, compared in constant time.

use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// Session key the token is stored under.
pub const CSRF_SESSION_KEY: &str = "csrf_token";

/// Name of the hidden form field carrying the token.
pub const CSRF_FIELD_NAME: &str = "csrf_token";

/// Bytes of randomness per token (hex encoded to twice as many characters).
const TOKEN_BYTES: usize = 32;

/// String storage scoped to one client session.
pub trait Session {
    fn get(&self, key: &str) -> Option<String>;
    fn insert(&mut self, key: &str, value: String);
}

impl Session for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn insert(&mut self, key: &str, value: String) {
        HashMap::insert(self, key.to_string(), value);
    }
}

pub struct CsrfTokenManager<'s, S: Session + ?Sized> {
    session: &'s mut S,
}

impl<'s, S: Session + ?Sized> CsrfTokenManager<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        CsrfTokenManager { session }
    }

    /// The session's token, generating and storing one on first use.
    pub fn current_token(&mut self) -> String {
        if let Some(token) = self.session.get(CSRF_SESSION_KEY) {
            return token;
        }
        let token = generate_token();
        self.session.insert(CSRF_SESSION_KEY, token.clone());
        token
    }

    pub fn validate(&mut self, submitted: &str) -> bool {
        let expected = self.current_token();
        expected.as_bytes().ct_eq(submitted.as_bytes()).into()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
