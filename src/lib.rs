//! lexprompt: assemble, refine and run prompts framed in Mexican law.
//!
//! The [`WorkflowController`] owns the form, the derived prompt, attachments
//! and the model's response. It talks to the generation service only through
//! the [`PromptGateway`] port; [`AiGateway`] implements that port on top of any
//! [`TextGenerationClient`], and [`HttpGeminiClient`] is the HTTP transport.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use adapters::{HttpGeminiClient, load_attachment, write_export};
pub use app::{
    ExecuteTicket, ImproveTicket, WorkflowController, WorkflowPhase, WorkflowState,
    connect_gateway, load_config,
};
pub use domain::{
    AiExecutionError, AppConfig, AppError, Attachment, ExportFile, FormData, GatewayConfig,
    JURISDICTION_PREAMBLE, LegalArea, PromptImproveError, Register, Tone, build_prompt,
};
pub use ports::{GenerationRequest, PromptGateway, RequestPart, TextGenerationClient};
pub use services::AiGateway;
