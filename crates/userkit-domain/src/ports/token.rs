//! Opaque token generation port

/// Source of opaque, URL-safe credential tokens
pub trait TokenSource: Send + Sync {
    /// Generate a fresh random token
    fn generate_token(&self) -> String;
}
