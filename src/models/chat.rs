use chrono::{ DateTime, Local };
use serde::{ Serialize, Deserialize };
use std::fmt;

pub type MessageId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One transcript entry. Never mutated after the store hands it out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Creation time as shown next to the bubble, e.g. `09:41`.
    pub fn display_time(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConversationState {
    pub transcript: Vec<Message>,
    pub draft: String,
    pub pending: bool,
}

impl ConversationState {
    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    /// Whether a submit affordance bound to this state should be enabled.
    pub fn can_send(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }
}
