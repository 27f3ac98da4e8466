use crate::domain::AppError;
use crate::ports::{GenerationRequest, TextGenerationClient};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Reply {
    Text(Option<String>),
    Failure(String, Option<u16>),
}

/// Records every request and answers each one with the same scripted reply.
#[derive(Clone)]
pub struct FakeTextGenerationClient {
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    reply: Reply,
}

impl FakeTextGenerationClient {
    fn with_reply(reply: Reply) -> Self {
        Self { requests: Arc::new(Mutex::new(vec![])), reply }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(Some(text.into())))
    }

    pub fn silent() -> Self {
        Self::with_reply(Reply::Text(None))
    }

    pub fn failing(error: AppError) -> Self {
        match error {
            AppError::GenerationApiError { message, status } => {
                Self::with_reply(Reply::Failure(message, status))
            }
            other => Self::with_reply(Reply::Failure(other.to_string(), None)),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl TextGenerationClient for FakeTextGenerationClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Failure(message, status) => {
                Err(AppError::GenerationApiError { message: message.clone(), status: *status })
            }
        }
    }
}
