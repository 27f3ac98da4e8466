//! Downloadable snapshots of prompt and response text.

pub const PROMPT_FILE_NAME: &str = "prompt-juridico.txt";
pub const RESPONSE_FILE_NAME: &str = "respuesta-ia.md";

const PROMPT_MIME_TYPE: &str = "text/plain;charset=utf-8";
const RESPONSE_MIME_TYPE: &str = "text/markdown;charset=utf-8";

/// File contents captured at the moment of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    pub fn prompt(contents: &str) -> Self {
        Self {
            file_name: PROMPT_FILE_NAME,
            mime_type: PROMPT_MIME_TYPE,
            contents: contents.to_string(),
        }
    }

    pub fn response(contents: &str) -> Self {
        Self {
            file_name: RESPONSE_FILE_NAME,
            mime_type: RESPONSE_MIME_TYPE,
            contents: contents.to_string(),
        }
    }
}
