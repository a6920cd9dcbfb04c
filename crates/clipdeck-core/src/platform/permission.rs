use crate::platform::PermissionProvider;

use std::fmt;

/// Capabilities the recorder needs from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Access to the microphone.
    RecordAudio,
    /// Write access to the media store.
    WriteStorage,
}

impl Capability {
    /// Everything asked for in a single prompt before recording.
    pub const RECORDING: [Capability; 2] = [Capability::RecordAudio, Capability::WriteStorage];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::RecordAudio => f.write_str("microphone"),
            Capability::WriteStorage => f.write_str("storage"),
        }
    }
}

/// Answer to a permission request, one verdict per capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionResult {
    verdicts: Vec<(Capability, bool)>,
}

impl PermissionResult {
    /// Build a result from individual verdicts.
    pub fn new(verdicts: impl IntoIterator<Item = (Capability, bool)>) -> Self {
        Self {
            verdicts: verdicts.into_iter().collect(),
        }
    }

    /// Same verdict for every capability in `capabilities`.
    pub fn uniform(capabilities: &[Capability], granted: bool) -> Self {
        Self::new(capabilities.iter().map(|&c| (c, granted)))
    }

    /// Whether `capability` was granted. Missing verdicts count as refused.
    pub fn is_granted(&self, capability: Capability) -> bool {
        self.verdicts
            .iter()
            .any(|&(c, granted)| c == capability && granted)
    }

    /// Capabilities that were refused.
    pub fn denied(&self) -> Vec<Capability> {
        self.verdicts
            .iter()
            .filter(|(_, granted)| !granted)
            .map(|&(c, _)| c)
            .collect()
    }

    /// Verdicts in the order they were reported.
    pub fn verdicts(&self) -> &[(Capability, bool)] {
        &self.verdicts
    }
}

/// Permission provider for platforms without a runtime permission model.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrantedPermissions;

impl PermissionProvider for GrantedPermissions {
    fn check_granted(&self, _capability: Capability) -> bool {
        true
    }

    fn request(&mut self, _capabilities: &[Capability]) {}
}
