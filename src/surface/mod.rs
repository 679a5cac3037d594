mod overlay;

pub use overlay::Overlay;

use crate::agent::{ ChatAgent, Exchange };
use crate::catalog::{ self, QuickAction };
use crate::error::ChatError;
use crate::models::chat::{ ConversationState, MessageId, Role };
use crate::store::Subscription;

use log::debug;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Inline,
    Overlay,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Inline => write!(f, "inline"),
            SurfaceKind::Overlay => write!(f, "overlay"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Online,
    Offline,
    Unchecked,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Online => write!(f, "Online"),
            ConnectionStatus::Offline => write!(f, "Offline"),
            ConnectionStatus::Unchecked => write!(f, "Unchecked"),
        }
    }
}

/// Chat header content shared by both surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub assistant_name: String,
    pub status: ConnectionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub time: String,
}

/// Everything a mount needs to draw one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView {
    pub kind: SurfaceKind,
    pub header: Header,
    pub messages: Vec<MessageView>,
    pub draft: String,
    pub typing: bool,
    pub send_enabled: bool,
    pub quick_actions: Vec<QuickAction>,
}

impl SurfaceView {
    pub fn project(kind: SurfaceKind, header: &Header, state: &ConversationState) -> Self {
        let messages = state.transcript
            .iter()
            .map(|m| MessageView {
                id: m.id,
                role: m.role,
                text: m.text.clone(),
                time: m.display_time(),
            })
            .collect();

        Self {
            kind,
            header: header.clone(),
            messages,
            draft: state.draft.clone(),
            typing: state.pending,
            send_enabled: state.can_send(),
            quick_actions: catalog::quick_actions().to_vec(),
        }
    }
}

/// The presentation a surface draws into.
pub trait Mount: Send + Sync {
    fn render(&self, view: &SurfaceView);

    fn focus_input(&self) {}

    /// Called when the surface stops rendering into this mount.
    fn unmounted(&self) {}
}

/// A stateless projection of the shared store onto one mount.
///
/// The surface owns no conversation data: it re-renders from every store
/// notification and forwards user input back to the store or the agent.
pub struct Surface {
    kind: SurfaceKind,
    agent: Arc<ChatAgent>,
    header: Header,
    mount: Arc<dyn Mount>,
    _subscription: Subscription,
}

impl Surface {
    /// Subscribes to the agent's store and renders the current state once.
    pub fn mount(
        kind: SurfaceKind,
        agent: Arc<ChatAgent>,
        header: Header,
        mount: Arc<dyn Mount>
    ) -> Self {
        let subscription = {
            let header = header.clone();
            let mount = Arc::clone(&mount);
            agent.store().subscribe(move |state| {
                mount.render(&SurfaceView::project(kind, &header, state));
            })
        };
        debug!("Mounted {} surface", kind);

        let surface = Self {
            kind,
            agent,
            header,
            mount,
            _subscription: subscription,
        };
        surface.mount.render(&surface.view());
        surface
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn view(&self) -> SurfaceView {
        SurfaceView::project(self.kind, &self.header, &self.agent.store().snapshot())
    }

    pub fn type_text(&self, text: &str) {
        self.agent.store().set_draft(text);
    }

    /// Copies a catalog prompt into the draft and focuses the input.
    pub fn pick_quick_action(&self, index: usize) -> Result<&'static QuickAction, ChatError> {
        let action = catalog::get(index).ok_or(ChatError::UnknownQuickAction(index))?;
        self.agent.store().set_draft(action.prompt);
        self.mount.focus_input();
        Ok(action)
    }

    pub async fn submit(&self) -> Result<Option<Exchange>, ChatError> {
        self.agent.submit_draft().await
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.mount.unmounted();
        debug!("Unmounted {} surface", self.kind);
    }
}
