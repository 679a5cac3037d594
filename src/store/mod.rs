mod subscription;

pub use subscription::Subscription;

use crate::error::ChatError;
use crate::models::chat::{ ConversationState, Message, MessageId, Role };
use chrono::Local;
use log::debug;
use std::sync::atomic::{ AtomicU64, Ordering };
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };

pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your RH Agent AI assistant. How can I help you today?";

pub(crate) type Listener = Arc<dyn Fn(&ConversationState) + Send + Sync>;

struct Inner {
    state: ConversationState,
    next_id: MessageId,
}

impl Inner {
    fn push(&mut self, role: Role, text: &str) -> Message {
        let message = Message {
            id: self.next_id,
            role,
            text: text.to_string(),
            created_at: Local::now(),
        };
        self.next_id += 1;
        self.state.transcript.push(message.clone());
        message
    }
}

/// Single owner of the transcript, the draft and the pending flag.
///
/// Every surface reads from and writes through one shared instance. Each
/// mutating call notifies all listeners synchronously with a snapshot of the
/// state it produced, in the order the calls were made. Listeners run after
/// the internal lock is released, so they may read the store again.
pub struct ConversationStore {
    inner: Mutex<Inner>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener: AtomicU64,
}

impl ConversationStore {
    /// Creates a store whose transcript holds one assistant greeting (id 1).
    pub fn new(welcome: &str) -> Self {
        let mut inner = Inner {
            state: ConversationState::default(),
            next_id: 1,
        };
        inner.push(Role::Assistant, welcome);

        Self {
            inner: Mutex::new(inner),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    pub fn with_default_welcome() -> Self {
        Self::new(WELCOME_MESSAGE)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ConversationState {
        self.lock().state.clone()
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.lock().state.transcript.clone()
    }

    pub fn draft(&self) -> String {
        self.lock().state.draft.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().state.pending
    }

    /// Appends a user turn and clears the draft.
    ///
    /// Blank or whitespace-only text is ignored: nothing changes and no
    /// listener fires.
    pub fn append_user_message(&self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            debug!("Ignoring blank user message");
            return None;
        }
        let (message, snapshot) = {
            let mut inner = self.lock();
            let message = inner.push(Role::User, text);
            inner.state.draft.clear();
            (message, inner.state.clone())
        };
        debug!("Appended user message {}", message.id);
        self.notify(&snapshot);
        Some(message)
    }

    pub fn append_assistant_message(&self, text: &str) -> Message {
        let (message, snapshot) = {
            let mut inner = self.lock();
            let message = inner.push(Role::Assistant, text);
            (message, inner.state.clone())
        };
        debug!("Appended assistant message {}", message.id);
        self.notify(&snapshot);
        message
    }

    pub fn set_draft(&self, text: &str) {
        let snapshot = {
            let mut inner = self.lock();
            inner.state.draft = text.to_string();
            inner.state.clone()
        };
        self.notify(&snapshot);
    }

    pub fn set_pending(&self, pending: bool) {
        let snapshot = {
            let mut inner = self.lock();
            inner.state.pending = pending;
            inner.state.clone()
        };
        debug!("Pending set to {}", pending);
        self.notify(&snapshot);
    }

    /// Opens a dispatch: appends the user turn, clears the draft and raises
    /// `pending` in one step with a single notification.
    ///
    /// Returns `Ok(None)` for blank text and `DispatchInFlight` while an
    /// earlier dispatch has not produced its reply.
    pub fn begin_dispatch(&self, text: &str) -> Result<Option<Message>, ChatError> {
        if text.trim().is_empty() {
            debug!("Ignoring blank submit");
            return Ok(None);
        }
        let (message, snapshot) = {
            let mut inner = self.lock();
            if inner.state.pending {
                return Err(ChatError::DispatchInFlight);
            }
            let message = inner.push(Role::User, text);
            inner.state.draft.clear();
            inner.state.pending = true;
            (message, inner.state.clone())
        };
        debug!("Dispatch opened by user message {}", message.id);
        self.notify(&snapshot);
        Ok(Some(message))
    }

    /// Closes a dispatch: appends the assistant turn and lowers `pending`
    /// with a single notification, so no listener sees the reply while the
    /// flag is still up.
    pub fn resolve_dispatch(&self, text: &str) -> Message {
        let (message, snapshot) = {
            let mut inner = self.lock();
            let message = inner.push(Role::Assistant, text);
            inner.state.pending = false;
            (message, inner.state.clone())
        };
        debug!("Dispatch resolved by assistant message {}", message.id);
        self.notify(&snapshot);
        message
    }

    /// Registers `listener` for change notifications. The listener stays
    /// registered until the returned guard is dropped or unsubscribed.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
        where F: Fn(&ConversationState) + Send + Sync + 'static
    {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().push((id, Arc::new(listener)));
        debug!("Listener {} subscribed", id);
        Subscription::new(id, Arc::downgrade(self))
    }

    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    pub(crate) fn remove_listener(&self, id: u64) {
        self.lock_listeners().retain(|(listener_id, _)| *listener_id != id);
        debug!("Listener {} unsubscribed", id);
    }

    fn notify(&self, snapshot: &ConversationState) {
        let listeners: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::with_default_welcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Arc<ConversationStore> {
        Arc::new(ConversationStore::with_default_welcome())
    }

    fn recorder(store: &Arc<ConversationStore>) -> (Arc<Mutex<Vec<ConversationState>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |state| sink.lock().unwrap().push(state.clone()));
        (seen, subscription)
    }

    #[test]
    fn seeded_with_welcome_message() {
        let store = store();
        let transcript = store.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].id, 1);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert_eq!(transcript[0].text, WELCOME_MESSAGE);
        assert_eq!(store.draft(), "");
        assert!(!store.is_pending());
    }

    #[test]
    fn blank_user_message_is_ignored() {
        let store = store();
        let (seen, _sub) = recorder(&store);
        store.set_draft("   ");
        seen.lock().unwrap().clear();

        assert!(store.append_user_message("").is_none());
        assert!(store.append_user_message("   ").is_none());
        assert!(store.append_user_message("\n\t").is_none());

        assert_eq!(store.transcript().len(), 1);
        assert_eq!(store.draft(), "   ");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn user_message_clears_draft_and_keeps_text_verbatim() {
        let store = store();
        store.set_draft("  Show me all available jobs ");
        let message = store.append_user_message("  Show me all available jobs ").unwrap();

        assert_eq!(message.id, 2);
        assert_eq!(message.role, Role::User);
        assert_eq!(message.text, "  Show me all available jobs ");
        assert_eq!(store.draft(), "");
    }

    #[test]
    fn ids_increase_across_sends() {
        let store = store();
        let mut last = 1;
        for i in 0..10 {
            let user = store.append_user_message(&format!("question {}", i)).unwrap();
            let reply = store.append_assistant_message("answer");
            assert!(user.id > last);
            assert!(reply.id > user.id);
            last = reply.id;
        }
        let ids: Vec<_> = store
            .transcript()
            .iter()
            .map(|m| m.id)
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.len(), 21);
    }

    #[test]
    fn listeners_fire_once_per_mutation_in_order() {
        let store = store();
        let (seen, _sub) = recorder(&store);

        store.set_draft("hello");
        store.set_pending(true);
        store.append_user_message("hello");
        store.append_assistant_message("hi there");
        store.set_pending(false);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0].draft, "hello");
        assert!(seen[1].pending);
        assert_eq!(seen[2].transcript.len(), 2);
        assert_eq!(seen[2].draft, "");
        assert_eq!(seen[3].transcript.len(), 3);
        assert!(!seen[4].pending);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let store = store();
        let (seen, sub) = recorder(&store);
        assert_eq!(store.listener_count(), 1);

        store.set_draft("a");
        sub.unsubscribe();
        store.set_draft("b");

        assert_eq!(store.listener_count(), 0);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn listener_can_read_store() {
        let store = store();
        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        let reader = Arc::clone(&store);
        let _sub = store.subscribe(move |_| {
            *sink.lock().unwrap() = Some(reader.draft());
        });

        store.set_draft("Which candidate has the highest priority?");
        assert_eq!(
            observed.lock().unwrap().as_deref(),
            Some("Which candidate has the highest priority?")
        );
    }

    #[test]
    fn begin_dispatch_rejects_second_send_while_pending() {
        let store = store();
        let first = store.begin_dispatch("first").unwrap().unwrap();
        assert!(store.is_pending());
        assert_eq!(first.id, 2);

        store.set_draft("second");
        assert!(matches!(store.begin_dispatch("second"), Err(ChatError::DispatchInFlight)));
        assert_eq!(store.transcript().len(), 2);
        assert_eq!(store.draft(), "second");

        let reply = store.resolve_dispatch("done");
        assert_eq!(reply.id, 3);
        assert!(!store.is_pending());
        assert!(store.begin_dispatch("second").unwrap().is_some());
    }

    #[test]
    fn begin_dispatch_ignores_blank_text() {
        let store = store();
        assert!(store.begin_dispatch("  ").unwrap().is_none());
        assert!(!store.is_pending());
        assert_eq!(store.transcript().len(), 1);
    }

    #[test]
    fn resolve_dispatch_never_exposes_reply_while_pending() {
        let store = store();
        let (seen, _sub) = recorder(&store);

        store.begin_dispatch("hello").unwrap();
        store.resolve_dispatch("hi");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].pending);
        assert_eq!(seen[0].transcript.len(), 2);
        assert!(!seen[1].pending);
        assert_eq!(seen[1].transcript.len(), 3);
    }
}
