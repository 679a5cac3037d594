pub mod chat;

use std::time::Duration;

pub const DEFAULT_CHAT_ENDPOINT: &str = "http://localhost:5000/api/chat";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub health_endpoint: Option<String>,
    /// `None` lets a request wait as long as the server keeps the socket open.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            health_endpoint: None,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}
