pub mod http;

use async_trait::async_trait;
use std::sync::Arc;
use super::ClientConfig;
use self::http::HttpChatClient;
use crate::error::ChatError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub response: String,
}

/// Transport to the remote assistant. One call to `complete` is one request.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ChatError>;

    /// Probes whether the assistant is reachable. Transports without a
    /// health route report healthy.
    async fn health(&self) -> Result<bool, ChatError> {
        Ok(true)
    }

    fn endpoint(&self) -> String;
}

pub fn new_client(config: &ClientConfig) -> Result<Arc<dyn ChatClient>, ChatError> {
    let client = HttpChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
