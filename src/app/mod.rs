pub mod cli;
pub mod config;
pub mod workflow;

pub use config::{DEFAULT_CONFIG_FILE, load_config};
pub use workflow::{
    ExecuteTicket, ImproveTicket, WorkflowController, WorkflowPhase, WorkflowState,
};

use crate::adapters::HttpGeminiClient;
use crate::domain::{AppConfig, AppError};
use crate::services::AiGateway;

/// Build the HTTP-backed gateway, reading the API credential from the environment.
pub fn connect_gateway(config: &AppConfig) -> Result<AiGateway<HttpGeminiClient>, AppError> {
    let client = HttpGeminiClient::from_env_with_config(&config.gateway)?;
    tracing::debug!(endpoint = %config.gateway.endpoint(), "gateway client ready");
    Ok(AiGateway::new(client))
}
