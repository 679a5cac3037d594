use super::ConversationStore;
use std::sync::Weak;

/// Keeps a listener registered on a [`ConversationStore`].
///
/// Dropping the guard unsubscribes. The guard holds only a weak reference, so
/// it never keeps the store alive on its own.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    store: Weak<ConversationStore>,
}

impl Subscription {
    pub(super) fn new(id: u64, store: Weak<ConversationStore>) -> Self {
        Self { id, store }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.remove_listener(self.id);
        }
    }
}
