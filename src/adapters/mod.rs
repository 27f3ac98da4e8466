pub mod attachment_filesystem;
pub mod gemini_client_http;

pub use attachment_filesystem::{load_attachment, mime_for_path, write_export};
pub use gemini_client_http::{API_KEY_ENV_VARS, HttpGeminiClient, resolve_api_key};
