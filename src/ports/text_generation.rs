//! Text-generation service port definition.

use crate::domain::AppError;

/// One part of a multi-part generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    /// Plain text.
    Text(String),
    /// Binary payload already base64-encoded for transport.
    InlineData { mime_type: String, data: String },
}

/// Request sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRequest {
    /// Ordered content parts.
    pub parts: Vec<RequestPart>,
}

impl GenerationRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self { parts: vec![RequestPart::Text(text.into())] }
    }

    /// Number of inline binary parts.
    pub fn inline_part_count(&self) -> usize {
        self.parts.iter().filter(|part| matches!(part, RequestPart::InlineData { .. })).count()
    }
}

/// Port for the external generation service.
///
/// Implementations perform exactly one round trip per call. `Ok(None)` means
/// the service answered without any text.
pub trait TextGenerationClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, AppError>;
}
