use reqwest::Client as HttpClient;
use async_trait::async_trait;
use log::{ debug, info };
use super::{ ChatClient, CompletionResponse };
use crate::error::ChatError;
use crate::llm::ClientConfig;
use crate::models::wire::{ ChatRequest, ChatResponse };

/// Posts `{ "prompt": ... }` as JSON and expects `{ "response": ... }` back.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: HttpClient,
    endpoint: String,
    health_endpoint: Option<String>,
}

impl HttpChatClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ChatError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            health_endpoint: config.health_endpoint.clone(),
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<ChatResponse, ChatError> {
        info!("Sending prompt ({} chars) to {}", prompt.chars().count(), self.endpoint);
        let resp = self.http
            .post(&self.endpoint)
            .json(&(ChatRequest { prompt }))
            .send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let body = resp.text().await?;
        let data = serde_json
            ::from_str::<ChatResponse>(&body)
            .map_err(|e| ChatError::MalformedBody(e.to_string()))?;
        debug!("Received reply ({} chars)", data.response.chars().count());
        Ok(data)
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ChatError> {
        let data = self.generate(prompt).await?;
        Ok(CompletionResponse { response: data.response })
    }

    async fn health(&self) -> Result<bool, ChatError> {
        let Some(url) = &self.health_endpoint else {
            return Ok(true);
        };
        let resp = self.http.get(url).send().await?;
        Ok(resp.status().is_success())
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}
