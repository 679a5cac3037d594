use crate::llm::chat::ChatClient;
use log::{ error, info, warn };
use std::fmt;
use std::sync::{ Arc, Mutex, PoisonError };

pub const FALLBACK_MESSAGE: &str =
    "I'm sorry, I'm having trouble connecting to the server right now. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Success {
        text: String,
    },
    Fallback {
        text: String,
    },
}

impl ReplyOutcome {
    pub fn fallback() -> Self {
        ReplyOutcome::Fallback { text: FALLBACK_MESSAGE.to_string() }
    }

    pub fn text(&self) -> &str {
        match self {
            ReplyOutcome::Success { text } | ReplyOutcome::Fallback { text } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ReplyOutcome::Fallback { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Sending,
    ResolvedSuccess,
    ResolvedFallback,
}

impl DispatchPhase {
    fn for_outcome(outcome: &ReplyOutcome) -> Self {
        match outcome {
            ReplyOutcome::Success { .. } => DispatchPhase::ResolvedSuccess,
            ReplyOutcome::Fallback { .. } => DispatchPhase::ResolvedFallback,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, DispatchPhase::ResolvedSuccess | DispatchPhase::ResolvedFallback)
    }
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchPhase::Idle => "idle",
            DispatchPhase::Sending => "sending",
            DispatchPhase::ResolvedSuccess => "resolved-success",
            DispatchPhase::ResolvedFallback => "resolved-fallback",
        };
        write!(f, "{}", name)
    }
}

/// Turns a prompt into exactly one displayable reply.
///
/// Every transport failure (connect error, bad status, unparsable body,
/// timeout) is logged and replaced by [`FALLBACK_MESSAGE`]; `send` never
/// returns an error.
pub struct DispatchService {
    client: Arc<dyn ChatClient>,
    phase: Mutex<DispatchPhase>,
}

impl DispatchService {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            phase: Mutex::new(DispatchPhase::Idle),
        }
    }

    pub fn phase(&self) -> DispatchPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: DispatchPhase) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        let allowed = match (*phase, next) {
            (DispatchPhase::Idle, DispatchPhase::Sending) => true,
            (DispatchPhase::Sending, resolved) if resolved.is_resolved() => true,
            (resolved, DispatchPhase::Idle) if resolved.is_resolved() => true,
            _ => false,
        };
        if !allowed {
            warn!("Unexpected dispatch transition {} -> {}", *phase, next);
        }
        *phase = next;
    }

    pub async fn send(&self, prompt: &str) -> ReplyOutcome {
        if self.phase().is_resolved() {
            self.transition(DispatchPhase::Idle);
        }
        self.transition(DispatchPhase::Sending);

        let outcome = match self.client.complete(prompt).await {
            Ok(reply) => {
                info!("Assistant replied ({} chars)", reply.response.chars().count());
                ReplyOutcome::Success { text: reply.response }
            }
            Err(e) => {
                error!("Error sending message to {}: {}", self.client.endpoint(), e);
                ReplyOutcome::fallback()
            }
        };

        self.transition(DispatchPhase::for_outcome(&outcome));
        outcome
    }
}
