use super::{ Header, Mount, Surface, SurfaceKind };
use crate::agent::ChatAgent;
use log::info;
use std::sync::Arc;

/// The modal chat window. Its visibility is its own state and never touches
/// the conversation; while visible it is a second view over the same store.
pub struct Overlay {
    agent: Arc<ChatAgent>,
    header: Header,
    mount: Arc<dyn Mount>,
    surface: Option<Surface>,
}

impl Overlay {
    pub fn new(agent: Arc<ChatAgent>, header: Header, mount: Arc<dyn Mount>) -> Self {
        Self {
            agent,
            header,
            mount,
            surface: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.surface.is_some()
    }

    /// No-op when already open.
    pub fn open(&mut self) -> &Surface {
        if self.surface.is_none() {
            info!("Opening chat overlay");
        }
        let (agent, header, mount) = (&self.agent, &self.header, &self.mount);
        self.surface.get_or_insert_with(|| {
            Surface::mount(SurfaceKind::Overlay, Arc::clone(agent), header.clone(), Arc::clone(mount))
        })
    }

    pub fn close(&mut self) {
        if self.surface.take().is_some() {
            info!("Closed chat overlay");
        }
    }

    pub fn toggle(&mut self) -> bool {
        if self.is_visible() {
            self.close();
        } else {
            self.open();
        }
        self.is_visible()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }
}
