mod model;
mod session;
mod store;

pub use {
    model::Recording,
    session::{RecordingSession, SessionStatus, StartOutcome, StopOutcome},
    store::RecordingStore,
};
