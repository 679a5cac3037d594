pub mod agent;
pub mod catalog;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod models;
pub mod store;
pub mod surface;
pub mod terminal;

use agent::ChatAgent;
use cli::Args;
use llm::chat::{ ChatClient, new_client };
use log::{ info, warn };
use std::error::Error;
use std::sync::Arc;
use store::ConversationStore;
use surface::{ ConnectionStatus, Header };

pub async fn probe_status(client: &dyn ChatClient) -> ConnectionStatus {
    match client.health().await {
        Ok(true) => ConnectionStatus::Online,
        Ok(false) => {
            warn!("Assistant health check answered with an error status");
            ConnectionStatus::Offline
        }
        Err(e) => {
            warn!("Assistant health check failed: {}", e);
            ConnectionStatus::Offline
        }
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = args.client_config()?;

    info!("--- Chat Client Configuration ---");
    info!("Chat Endpoint: {}", config.endpoint);
    info!("Health Endpoint: {}", config.health_endpoint.as_deref().unwrap_or("skipped"));
    match config.timeout {
        Some(timeout) => info!("Request Timeout: {}s", timeout.as_secs()),
        None => info!("Request Timeout: none"),
    }
    info!("Assistant Name: {}", args.assistant_name);
    info!("Overlay Open At Start: {}", args.open_overlay);
    info!("---------------------------------");

    let client = new_client(&config)?;
    let status = if args.skip_health_check {
        ConnectionStatus::Unchecked
    } else {
        probe_status(client.as_ref()).await
    };
    info!("Assistant status: {}", status);

    let store = Arc::new(ConversationStore::new(&args.welcome_message));
    let agent = Arc::new(ChatAgent::new(store, client));
    let header = Header {
        assistant_name: args.assistant_name.clone(),
        status,
    };

    terminal::run_repl(agent, header, args.open_overlay).await?;
    Ok(())
}
