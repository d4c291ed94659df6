//! Random opaque token generation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use userkit_domain::ports::TokenSource;

/// Number of random bytes per token
const TOKEN_BYTES: usize = 32;

/// OS-random, URL-safe token source
pub struct RandomTokenSource;

impl RandomTokenSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for RandomTokenSource {
    fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}
