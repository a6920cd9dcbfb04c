mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod storage_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, storage_config::StorageConfig,
};

pub(crate) const DEFAULT_DESKTOP_NOTIFICATIONS: bool = false;
pub(crate) const DEFAULT_MICROPHONE_CONSENT: bool = false;

pub(crate) fn default_directory_hint() -> String {
    clipdeck_core::platform::DEFAULT_DIRECTORY_HINT.to_string()
}
