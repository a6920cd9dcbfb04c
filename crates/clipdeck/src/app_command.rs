use clipdeck_core::Capability;

/// Commands delivered to the application event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a new recording.
    StartRecording,
    /// Stop the current recording and save it.
    StopRecording,
    /// Print the saved recordings.
    ListRecordings,
    /// Open the playback view for a recording, or press play in the open one.
    Play {
        /// 1-based position in the recordings list; `None` replays the open view.
        index: Option<usize>,
    },
    /// Leave the playback view, releasing its player.
    ClosePlayback,
    /// The recorder asked for permissions; prompt the user.
    PermissionPrompt {
        /// Capabilities being requested.
        capabilities: Vec<Capability>,
    },
    /// The user's answer to the pending permission prompt.
    ConsentAnswer {
        /// Whether access was allowed.
        granted: bool,
    },
    /// Print the command reference.
    Help,
    /// Input that matched no command.
    Unknown(String),
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Parse one console line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        let arg = words.next();

        if words.next().is_some() {
            return Some(Self::Unknown(line.trim().to_string()));
        }

        let command = match (verb.as_str(), arg) {
            ("start" | "record", None) => Self::StartRecording,
            ("stop", None) => Self::StopRecording,
            ("list" | "ls", None) => Self::ListRecordings,
            ("play", None) => Self::Play { index: None },
            ("play", Some(n)) => match n.parse::<usize>() {
                Ok(index) if index > 0 => Self::Play { index: Some(index) },
                _ => Self::Unknown(line.trim().to_string()),
            },
            ("back", None) => Self::ClosePlayback,
            ("yes" | "y", None) => Self::ConsentAnswer { granted: true },
            ("no" | "n", None) => Self::ConsentAnswer { granted: false },
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit" | "q", None) => Self::Shutdown,
            _ => Self::Unknown(line.trim().to_string()),
        };

        Some(command)
    }
}

/// Command reference printed by `help`.
pub const HELP: &str = "\
Commands:
  start      begin recording
  stop       stop recording and save the clip
  list       show saved recordings
  play <n>   open recording n and play it
  play       play the open recording again
  back       close the playback view
  yes / no   answer a permission prompt
  quit       exit";
