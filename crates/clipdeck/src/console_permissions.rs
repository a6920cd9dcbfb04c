use crate::{AppCommand, Notifier};

use std::collections::HashSet;

use clipdeck_core::{Capability, PermissionProvider, PermissionResult};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Shown when the prompt cannot be queued.
pub(crate) const PROMPT_UNAVAILABLE: &str =
    "Permission prompt could not be shown, try `start` again";

/// Asks the user for consent on the console.
///
/// A request posts a prompt to the app loop and returns at once; the
/// answer comes back as [`AppCommand::ConsentAnswer`].
pub struct ConsolePermissions {
    granted: HashSet<Capability>,
    command_tx: mpsc::Sender<AppCommand>,
    notifier: Notifier,
}

impl ConsolePermissions {
    /// Provider that starts out granting everything when `consented`.
    pub fn new(
        consented: bool,
        command_tx: mpsc::Sender<AppCommand>,
        notifier: Notifier,
    ) -> Self {
        let granted = if consented {
            Capability::RECORDING.into_iter().collect()
        } else {
            HashSet::new()
        };

        Self {
            granted,
            command_tx,
            notifier,
        }
    }
}

impl PermissionProvider for ConsolePermissions {
    fn check_granted(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    fn request(&mut self, capabilities: &[Capability]) {
        let prompt = AppCommand::PermissionPrompt {
            capabilities: capabilities.to_vec(),
        };

        // The loop is blocked on this call, so waiting for room would deadlock.
        if let Err(e) = self.command_tx.try_send(prompt) {
            warn!(error = %e, "Failed to queue permission prompt");
            self.notifier.notify(PROMPT_UNAVAILABLE);
        }
    }

    fn record_result(&mut self, result: &PermissionResult) {
        for &(capability, granted) in result.verdicts() {
            if granted {
                self.granted.insert(capability);
            } else {
                self.granted.remove(&capability);
            }
        }
        info!(granted = ?self.granted, "Permissions updated");
    }
}
