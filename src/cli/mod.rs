use clap::Parser;
use std::time::Duration;
use url::Url;
use crate::error::ChatError;
use crate::llm::{ ClientConfig, DEFAULT_CHAT_ENDPOINT };
use crate::store::WELCOME_MESSAGE;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Remote Assistant Args ---
    /// Chat endpoint receiving `{"prompt": ...}` and answering `{"response": ...}`.
    #[arg(long, env = "CHAT_ENDPOINT", default_value = DEFAULT_CHAT_ENDPOINT)]
    pub chat_endpoint: String,

    /// Health endpoint probed once at startup. Defaults to the `health` route next to the chat endpoint.
    #[arg(long, env = "HEALTH_ENDPOINT")]
    pub health_endpoint: Option<String>,

    /// Seconds to wait for a reply before falling back. 0 waits indefinitely.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Skip the startup health probe.
    #[arg(long, env = "SKIP_HEALTH_CHECK", default_value = "false")]
    pub skip_health_check: bool,

    // --- Presentation Args ---
    /// Greeting shown as the first assistant message.
    #[arg(long, env = "WELCOME_MESSAGE", default_value = WELCOME_MESSAGE)]
    pub welcome_message: String,

    /// Name shown in the chat header.
    #[arg(long, env = "ASSISTANT_NAME", default_value = "RH Agent AI")]
    pub assistant_name: String,

    /// Start with the overlay open.
    #[arg(long, env = "OPEN_OVERLAY", default_value = "false")]
    pub open_overlay: bool,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), ChatError> {
        parse_http_url(&self.chat_endpoint)?;
        if let Some(health) = &self.health_endpoint {
            parse_http_url(health)?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn resolved_health_endpoint(&self) -> Result<String, ChatError> {
        match &self.health_endpoint {
            Some(url) => Ok(url.clone()),
            None => derive_health_endpoint(&self.chat_endpoint),
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig, ChatError> {
        self.validate()?;
        let health_endpoint = if self.skip_health_check {
            None
        } else {
            Some(self.resolved_health_endpoint()?)
        };
        Ok(ClientConfig {
            endpoint: self.chat_endpoint.clone(),
            health_endpoint,
            timeout: self.timeout(),
        })
    }
}

fn parse_http_url(raw: &str) -> Result<Url, ChatError> {
    let url = Url::parse(raw).map_err(|e|
        ChatError::InvalidConfig(format!("'{}' is not a valid URL: {}", raw, e))
    )?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other =>
            Err(
                ChatError::InvalidConfig(
                    format!("'{}' uses unsupported scheme '{}', expected http or https", raw, other)
                )
            ),
    }
}

/// `http://host/api/chat` -> `http://host/api/health`.
pub fn derive_health_endpoint(chat_endpoint: &str) -> Result<String, ChatError> {
    let mut url = parse_http_url(chat_endpoint)?;
    let path = url.path().trim_end_matches('/').to_string();
    let parent = path
        .rsplit_once('/')
        .map(|(parent, _)| parent)
        .unwrap_or("");
    url.set_path(&format!("{}/health", parent));
    url.set_query(None);
    Ok(url.to_string())
}
