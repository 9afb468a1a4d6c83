/// Whether the workspace still holds a usable session.
///
/// `RequiresLogin` is entered on an authentication-denied signal from any
/// remote call, or on explicit logout. There is no way back: the caller
/// must re-authenticate and build a fresh workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    RequiresLogin,
}

/// Outcome of an interactive confirmation prompt for a destructive call.
///
/// Declining is a no-op, not an error: the remote call is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
