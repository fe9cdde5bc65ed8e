//! Terminal-backed confirmation and notification channels.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::{Handle, RuntimeFlavor};

use mediadesk_library::{Confirmer, Notification, NotificationLevel, Notifier};

use crate::output::{self, OutputFormat};

/// Asks on the terminal with `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        let ask = || {
            dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        };
        let answer = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(ask)
            }
            _ => ask(),
        };
        match answer {
            Ok(answer) => {
                if !answer {
                    output::print_status("Cancelled.");
                }
                answer
            }
            Err(e) => {
                tracing::warn!("Input error: {e}");
                false
            }
        }
    }
}

/// Prints library notifications and remembers whether an error was shown.
#[derive(Debug)]
pub struct ConsoleNotifier {
    format: OutputFormat,
    reported_error: AtomicBool,
}

impl ConsoleNotifier {
    /// Success lines go to stderr in JSON mode so stdout stays parseable.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            reported_error: AtomicBool::new(false),
        }
    }

    /// Whether an error notification has already been printed.
    pub fn reported_error(&self) -> bool {
        self.reported_error.load(Ordering::Acquire)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => match self.format {
                OutputFormat::Table => output::print_success(&notification.message),
                OutputFormat::Json => output::print_status(&notification.message),
            },
            NotificationLevel::Error => {
                self.reported_error.store(true, Ordering::Release);
                output::print_error(&notification.message);
            }
        }
    }
}
