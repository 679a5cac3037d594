use crate::dispatch::{ DispatchService, ReplyOutcome };
use crate::error::ChatError;
use crate::llm::chat::ChatClient;
use crate::models::chat::Message;
use crate::store::ConversationStore;

use log::{ info, warn };
use std::sync::Arc;

/// One completed round trip: the user turn and the assistant turn it produced.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: Message,
    pub reply: Message,
    pub outcome: ReplyOutcome,
}

/// Wires a conversation store to a dispatch service.
///
/// All surfaces submit through the same agent, so at most one dispatch is in
/// flight for the store at any time.
pub struct ChatAgent {
    store: Arc<ConversationStore>,
    dispatcher: DispatchService,
}

impl ChatAgent {
    pub fn new(store: Arc<ConversationStore>, client: Arc<dyn ChatClient>) -> Self {
        Self {
            store,
            dispatcher: DispatchService::new(client),
        }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn dispatcher(&self) -> &DispatchService {
        &self.dispatcher
    }

    /// Sends `text` as a user turn and waits for its reply.
    ///
    /// Blank text yields `Ok(None)` without touching the store. A call made
    /// while an earlier dispatch is outstanding fails with `DispatchInFlight`.
    pub async fn submit(&self, text: &str) -> Result<Option<Exchange>, ChatError> {
        let user = match self.store.begin_dispatch(text) {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Ok(None);
            }
            Err(e) => {
                warn!("Rejected submit: {}", e);
                return Err(e);
            }
        };

        let outcome = self.dispatcher.send(&user.text).await;
        let reply = self.store.resolve_dispatch(outcome.text());
        info!(
            "Exchange {} -> {} completed ({})",
            user.id,
            reply.id,
            if outcome.is_fallback() { "fallback" } else { "success" }
        );

        Ok(Some(Exchange { user, reply, outcome }))
    }

    /// Sends whatever is currently staged in the draft.
    pub async fn submit_draft(&self) -> Result<Option<Exchange>, ChatError> {
        let draft = self.store.draft();
        self.submit(&draft).await
    }
}
