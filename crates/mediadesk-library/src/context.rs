//! Collaborators handed to a [`MediaLibrary`](crate::MediaLibrary) at construction.

use std::fmt;
use std::sync::Arc;

use mediadesk_core::types::UserId;

use crate::confirm::{AutoConfirm, Confirmer};
use crate::notification::{Notification, Notifier, TracingNotifier};

/// Acting user plus the notification and confirmation channels.
#[derive(Clone)]
pub struct LibraryContext {
    /// The signed-in admin, if known.
    pub user_id: Option<UserId>,
    /// Where outcome notifications go.
    pub notifier: Arc<dyn Notifier>,
    /// Who approves destructive actions.
    pub confirmer: Arc<dyn Confirmer>,
}

impl LibraryContext {
    /// Creates a new context.
    pub fn new(notifier: Arc<dyn Notifier>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            user_id: None,
            notifier,
            confirmer,
        }
    }

    /// Logs notifications and approves every prompt.
    pub fn unattended() -> Self {
        Self::new(Arc::new(TracingNotifier), Arc::new(AutoConfirm::yes()))
    }

    /// Attach the acting user.
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    pub(crate) fn confirm(&self, prompt: &str) -> bool {
        self.confirmer.confirm(prompt)
    }
}

impl fmt::Debug for LibraryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryContext")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
