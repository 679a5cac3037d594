use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("a reply is still pending, wait for it before sending again")]
    DispatchInFlight,

    #[error("no quick action at position {0}")]
    UnknownQuickAction(usize),

    #[error("request to assistant failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("assistant returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed assistant reply: {0}")]
    MalformedBody(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal IO error: {0}")]
    Io(#[from] std::io::Error),
}
