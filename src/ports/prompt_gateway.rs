//! Gateway port consumed by the workflow controller.

use crate::domain::{AiExecutionError, Attachment, PromptImproveError};

/// The two remote operations the workflow sequences.
pub trait PromptGateway {
    /// Return an improved prompt, preamble included.
    fn improve(&self, prompt: &str) -> Result<String, PromptImproveError>;

    /// Run the prompt with the given attachments and return the answer text.
    fn execute(&self, prompt: &str, attachments: &[Attachment]) -> Result<String, AiExecutionError>;
}
