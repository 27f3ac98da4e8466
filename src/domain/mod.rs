pub mod attachment;
pub mod catalog;
pub mod error;
pub mod export;
pub mod form;
pub mod prompt_builder;
pub mod settings;

pub use attachment::Attachment;
pub use catalog::{LegalArea, Register, Tone};
pub use error::{
    AI_EXECUTION_MESSAGE, AiExecutionError, AppError, PROMPT_IMPROVE_MESSAGE, PromptImproveError,
};
pub use export::{ExportFile, PROMPT_FILE_NAME, RESPONSE_FILE_NAME};
pub use form::FormData;
pub use prompt_builder::{JURISDICTION_PREAMBLE, build_prompt, strip_preamble, with_preamble};
pub use settings::{AppConfig, GatewayConfig};
