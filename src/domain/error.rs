use std::io;

use thiserror::Error;

/// User-facing message shown when the improve round trip fails.
pub const PROMPT_IMPROVE_MESSAGE: &str =
    "No se pudo mejorar el prompt. Por favor, inténtelo de nuevo.";

/// User-facing message shown when the execute round trip fails.
pub const AI_EXECUTION_MESSAGE: &str =
    "No se pudo obtener una respuesta del servicio de IA. Por favor, inténtelo de nuevo más tarde.";

/// Library-wide error type for lexprompt operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Required environment variable is missing or blank.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// A catalog label did not match any known entry.
    #[error("Unknown {kind} '{value}'. Available: {available}")]
    UnknownOption { kind: &'static str, value: String, available: String },

    /// A form field required to derive the prompt is empty.
    #[error("Field '{0}' is required to build the prompt")]
    MissingField(&'static str),

    /// Attachment could not be loaded from disk.
    #[error("Failed to read attachment '{path}': {source}")]
    AttachmentRead {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Text-generation service transport or payload failure.
    #[error("Generation API error: {message}")]
    GenerationApiError { message: String, status: Option<u16> },

    /// Interactive terminal prompt failed.
    #[error("Interactive prompt failed: {0}")]
    Interactive(String),

    /// An improve or execute attempt ended with a workflow error.
    #[error("{0}")]
    Workflow(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }
}

/// Failure of the "improve prompt" round trip.
///
/// `Display` is the fixed retry message; `detail` keeps the underlying cause for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", PROMPT_IMPROVE_MESSAGE)]
pub struct PromptImproveError {
    detail: String,
}

impl PromptImproveError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Failure of the "execute prompt" round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", AI_EXECUTION_MESSAGE)]
pub struct AiExecutionError {
    detail: String,
}

impl AiExecutionError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_display_only_the_retry_message() {
        let improve = PromptImproveError::new("HTTP 503");
        assert_eq!(improve.to_string(), PROMPT_IMPROVE_MESSAGE);
        assert_eq!(improve.detail(), "HTTP 503");

        let execute = AiExecutionError::new("empty text");
        assert_eq!(execute.to_string(), AI_EXECUTION_MESSAGE);
        assert_ne!(improve.to_string(), execute.to_string());
    }

    #[test]
    fn unknown_option_lists_available_labels() {
        let err = AppError::UnknownOption {
            kind: "legal area",
            value: "Marítimo".to_string(),
            available: "Familiar, Civil".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown legal area 'Marítimo'. Available: Familiar, Civil");
    }
}
