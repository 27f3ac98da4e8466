//! Improve and execute operations on top of a text-generation client.
//!
//! Every failure from the client, including empty answers, collapses into the
//! two user-facing gateway errors. Nothing is retried here; a retry is a new
//! user-initiated call.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::{
    AiExecutionError, Attachment, PromptImproveError, strip_preamble, with_preamble,
};
use crate::ports::{GenerationRequest, PromptGateway, RequestPart, TextGenerationClient};

const IMPROVE_TEMPLATE_NAME: &str = "improve_instruction";

const IMPROVE_INSTRUCTION_TEMPLATE: &str = r#"Revisa y mejora el siguiente prompt para un asistente legal de IA para maximizar la claridad, detalle y efectividad, considerando el marco legal mexicano.
Asegúrate de que la estructura sea lógica y que pida la información más relevante.
Devuelve únicamente el prompt mejorado, sin añadir explicaciones, preámbulos o texto introductorio, y manteniendo el formato original de "Rol=... Tarea=...".

PROMPT ORIGINAL:
---
{{ prompt }}
---
PROMPT MEJORADO:"#;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn template_env() -> &'static Environment<'static> {
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(IMPROVE_TEMPLATE_NAME, IMPROVE_INSTRUCTION_TEMPLATE)
            .expect("improve instruction template must parse");
        env
    })
}

/// Render the meta-instruction asking the model to rewrite a user block.
pub fn render_improve_instruction(user_block: &str) -> Result<String, minijinja::Error> {
    template_env().get_template(IMPROVE_TEMPLATE_NAME)?.render(context! { prompt => user_block })
}

/// Build the execute request: prompt first, then image attachments in order.
pub fn build_execute_request(prompt: &str, attachments: &[Attachment]) -> GenerationRequest {
    let mut parts = vec![RequestPart::Text(prompt.to_string())];
    parts.extend(attachments.iter().filter(|attachment| attachment.is_image()).map(|attachment| {
        RequestPart::InlineData {
            mime_type: attachment.mime_type.clone(),
            data: BASE64.encode(&attachment.bytes),
        }
    }));
    GenerationRequest { parts }
}

/// Gateway adapter wrapping a text-generation client.
#[derive(Debug, Clone)]
pub struct AiGateway<C: TextGenerationClient> {
    client: C,
}

impl<C: TextGenerationClient> AiGateway<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: TextGenerationClient> PromptGateway for AiGateway<C> {
    fn improve(&self, prompt: &str) -> Result<String, PromptImproveError> {
        let user_block = strip_preamble(prompt);
        let instruction = render_improve_instruction(&user_block).map_err(|err| {
            PromptImproveError::new(format!("failed to render improve instruction: {}", err))
        })?;

        let reply = self
            .client
            .generate(&GenerationRequest::text(instruction))
            .map_err(|err| PromptImproveError::new(err.to_string()))
            .and_then(|text| match text {
                Some(text) if !text.trim().is_empty() => Ok(text),
                _ => Err(PromptImproveError::new("the model returned no improved prompt")),
            });

        match reply {
            Ok(text) => {
                tracing::info!(chars = text.len(), "prompt improved");
                Ok(with_preamble(text.trim()))
            }
            Err(err) => {
                tracing::warn!(detail = err.detail(), "prompt improvement failed");
                Err(err)
            }
        }
    }

    fn execute(
        &self,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<String, AiExecutionError> {
        let request = build_execute_request(prompt, attachments);
        let skipped = attachments.len() - request.inline_part_count();
        if skipped > 0 {
            tracing::debug!(skipped, "non-image attachments left out of the request");
        }

        let reply = self
            .client
            .generate(&request)
            .map_err(|err| AiExecutionError::new(err.to_string()))
            .and_then(|text| match text {
                Some(text) if !text.is_empty() => Ok(text),
                _ => Err(AiExecutionError::new("the model response was empty")),
            });

        match reply {
            Ok(text) => {
                tracing::info!(
                    chars = text.len(),
                    images = request.inline_part_count(),
                    "prompt executed"
                );
                Ok(text)
            }
            Err(err) => {
                tracing::warn!(detail = err.detail(), "prompt execution failed");
                Err(err)
            }
        }
    }
}
