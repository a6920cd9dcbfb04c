use crate::config::{DEFAULT_DESKTOP_NOTIFICATIONS, DEFAULT_MICROPHONE_CONSENT};

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Also show notifications as desktop toasts.
    #[serde(default)]
    pub desktop_notifications: bool,

    /// The user has already allowed microphone and storage access.
    #[serde(default)]
    pub microphone_consent: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            desktop_notifications: DEFAULT_DESKTOP_NOTIFICATIONS,
            microphone_consent: DEFAULT_MICROPHONE_CONSENT,
        }
    }
}
