use thiserror::Error;

/// Failure taxonomy shared across the workspace.
///
/// `AuthDenied` is terminal for the session: the only recovery is a full
/// state reset followed by re-authentication. `Validation` failures are
/// raised before any remote call is issued. Everything else the remote
/// store can report collapses into `Remote` and leaves local state at its
/// last confirmed value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("authentication denied: session is invalid or expired")]
    AuthDenied,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("remote store error: {0}")]
    Remote(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    pub const fn is_auth_denied(&self) -> bool {
        matches!(self, Self::AuthDenied)
    }
}
