//! Transient user notifications.

use clipdeck_core::RecorderError;
use notify_rust::{Notification, Timeout};
use tracing::{info, warn};

const APP_NAME: &str = "Clipdeck";

/// How long a desktop toast stays up.
const TOAST_TIMEOUT_MS: u32 = 3_000;

/// Shows short messages on the console and optionally as desktop toasts.
#[derive(Debug, Clone)]
pub struct Notifier {
    desktop: bool,
}

impl Notifier {
    /// Notifier that also raises desktop toasts when `desktop` is set.
    pub fn new(desktop: bool) -> Self {
        Self { desktop }
    }

    /// Show `message`.
    pub fn notify(&self, message: &str) {
        println!("{message}");
        info!(text = message, "Notification");

        if !self.desktop {
            return;
        }

        if let Err(e) = Notification::new()
            .summary(APP_NAME)
            .body(message)
            .timeout(Timeout::Milliseconds(TOAST_TIMEOUT_MS))
            .show()
        {
            warn!(error = %e, "Desktop notification failed");
        }
    }

    /// Show the user-facing text for a recorder failure.
    pub fn report(&self, error: &RecorderError) {
        warn!(error = ?error, "Recorder operation failed");
        self.notify(error.user_message());
    }
}
