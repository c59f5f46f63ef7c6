use super::{AgentState, ConnectionState};

/// Lifecycle phase of the call screen.
///
/// `Ringing` is only entered when a ringtone grace delay is configured:
/// credentials have arrived and the room is connecting while the ringtone
/// keeps playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    FetchingCredentials,
    Ringing,
    Connected,
}

impl CallState {
    pub fn display_name(&self) -> &str {
        match self {
            CallState::Idle => "No credentials",
            CallState::FetchingCredentials => "Getting credentials... (calling)",
            CallState::Ringing => "Ringing...",
            CallState::Connected => "Connected",
        }
    }

    /// Whether the ringtone should be audible in this phase.
    pub fn is_ringing(&self) -> bool {
        matches!(self, CallState::FetchingCredentials | CallState::Ringing)
    }

    /// Whether an End Call action has something to tear down.
    pub fn is_active(&self) -> bool {
        !matches!(self, CallState::Idle)
    }
}

impl std::fmt::Display for CallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallState::Idle => write!(f, "Idle"),
            CallState::FetchingCredentials => write!(f, "FetchingCredentials"),
            CallState::Ringing => write!(f, "Ringing"),
            CallState::Connected => write!(f, "Connected"),
        }
    }
}

/// Snapshot of everything the call screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallView {
    pub state: CallState,
    pub transcriptions: Vec<String>,
    pub connection_state: Option<ConnectionState>,
    pub agent_state: Option<AgentState>,
    /// Last notable outcome ("Call ended", an error description).
    pub notice: Option<String>,
}

impl CallView {
    pub fn status_text(&self) -> String {
        match &self.notice {
            Some(notice) if self.state == CallState::Idle => {
                format!("{} ({})", self.state.display_name(), notice)
            }
            _ => self.state.display_name().to_string(),
        }
    }

    pub fn agent_label(&self) -> String {
        self.agent_state
            .map(|s| s.to_string())
            .unwrap_or_else(|| "disconnected".to_string())
    }

    pub fn connection_label(&self) -> String {
        self.connection_state
            .map(|s| s.to_string())
            .unwrap_or_else(|| ConnectionState::Disconnected.to_string())
    }
}
