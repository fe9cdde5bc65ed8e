//! Confirmation gate for destructive actions.

/// Asks the person driving the library to approve a destructive action.
pub trait Confirmer: Send + Sync + 'static {
    /// Return `true` to go ahead.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl AutoConfirm {
    /// Approve everything.
    pub fn yes() -> Self {
        Self(true)
    }

    /// Decline everything.
    pub fn no() -> Self {
        Self(false)
    }
}

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
