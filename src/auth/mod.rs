pub mod jwks;
pub mod jwt;
pub mod middleware;
pub mod session;

use thiserror::Error;

/// Failures talking to Supabase Auth or validating its tokens.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("auth service returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("JWKS unavailable: {0}")]
    Jwks(String),
}
