mod prompt_gateway;
mod text_generation;

pub use prompt_gateway::PromptGateway;
pub use text_generation::{GenerationRequest, RequestPart, TextGenerationClient};
