//! Prompt/response workflow controller.
//!
//! The controller owns every piece of session state and only changes it
//! through the named transitions below. Improve and execute are split into a
//! `begin_*` step that takes the busy flag and hands out a ticket, and a
//! `complete_*` step that consumes the ticket once the gateway answered. A
//! ticket can only come from a successful `begin_*`, so at most one gateway
//! call is ever outstanding. Tickets are stamped with the issuing controller
//! and attempt; `complete_*` refuses any other ticket. There is no
//! cancellation: a started call is always completed.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{
    AiExecutionError, Attachment, ExportFile, FormData, LegalArea, PromptImproveError, Register,
    Tone, build_prompt,
};
use crate::ports::PromptGateway;

/// Busy, edit and error flags exposed to the presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub is_improving: bool,
    pub is_executing: bool,
    pub is_response_editable: bool,
    pub error: Option<String>,
}

/// Coarse phase derived from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// No prompt can be derived from the form yet.
    Idle,
    /// A prompt exists and no response is shown.
    Ready,
    Improving,
    Executing,
    /// Response shown read-only.
    Displayed,
    /// Response shown as editable text.
    Editing,
}

static NEXT_CONTROLLER_ID: AtomicU64 = AtomicU64::new(1);

fn next_controller_id() -> u64 {
    NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Issuer {
    controller: u64,
    attempt: u64,
}

/// Proof that an improve call was started; carries the prompt to send.
#[must_use = "an improve ticket must be completed"]
#[derive(Debug)]
pub struct ImproveTicket {
    issuer: Issuer,
    prompt: String,
}

impl ImproveTicket {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Proof that an execute call was started; carries the request inputs.
#[must_use = "an execute ticket must be completed"]
#[derive(Debug)]
pub struct ExecuteTicket {
    issuer: Issuer,
    prompt: String,
    attachments: Vec<Attachment>,
}

impl ExecuteTicket {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Single owner of form, prompt, attachments, response and flags.
#[derive(Debug)]
pub struct WorkflowController {
    id: u64,
    attempt: u64,
    form: FormData,
    attachments: Vec<Attachment>,
    prompt: String,
    response: String,
    state: WorkflowState,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self {
            id: next_controller_id(),
            attempt: 0,
            form: FormData::default(),
            attachments: Vec::new(),
            prompt: String::new(),
            response: String::new(),
            state: WorkflowState::default(),
        }
    }
}

/// A clone is a fresh controller with the same content. Outstanding tickets
/// stay with the original, so the clone starts idle.
impl Clone for WorkflowController {
    fn clone(&self) -> Self {
        Self {
            id: next_controller_id(),
            attempt: 0,
            form: self.form.clone(),
            attachments: self.attachments.clone(),
            prompt: self.prompt.clone(),
            response: self.response.clone(),
            state: WorkflowState { is_improving: false, is_executing: false, ..self.state.clone() },
        }
    }
}

impl WorkflowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing form; the prompt is derived immediately.
    pub fn with_form(form: FormData) -> Self {
        let mut controller = Self { form, ..Self::default() };
        controller.refresh_prompt();
        controller
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_improving || self.state.is_executing
    }

    pub fn phase(&self) -> WorkflowPhase {
        if self.state.is_improving {
            WorkflowPhase::Improving
        } else if self.state.is_executing {
            WorkflowPhase::Executing
        } else if !self.response.is_empty() {
            if self.state.is_response_editable {
                WorkflowPhase::Editing
            } else {
                WorkflowPhase::Displayed
            }
        } else if self.prompt.is_empty() {
            WorkflowPhase::Idle
        } else {
            WorkflowPhase::Ready
        }
    }

    // Form transitions. Each one re-derives the prompt.

    pub fn select_area(&mut self, area: LegalArea) {
        self.form.select_area(area);
        self.refresh_prompt();
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.form.role = role.into();
        self.refresh_prompt();
    }

    pub fn set_task(&mut self, task: impl Into<String>) {
        self.form.task = task.into();
        self.refresh_prompt();
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.form.context = context.into();
        self.refresh_prompt();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.form.tone = tone;
        self.refresh_prompt();
    }

    pub fn set_language(&mut self, language: Register) {
        self.form.language = language;
        self.refresh_prompt();
    }

    pub fn replace_form(&mut self, form: FormData) {
        self.form = form;
        self.refresh_prompt();
    }

    fn refresh_prompt(&mut self) {
        if self.form.is_complete() {
            self.prompt = build_prompt(&self.form);
        } else if !self.prompt.is_empty() {
            tracing::debug!("form incomplete, discarding derived prompt");
            self.prompt.clear();
        }
    }

    // Attachments.

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    pub fn add_attachments<I>(&mut self, attachments: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.attachments.extend(attachments);
    }

    /// Remove by position; an out-of-range index is ignored.
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() { Some(self.attachments.remove(index)) } else { None }
    }

    // Improve.

    /// Take the busy flag for an improve call, unless there is no prompt or a
    /// call is already outstanding.
    pub fn begin_improve(&mut self) -> Option<ImproveTicket> {
        if !self.can_start("improve") {
            return None;
        }
        self.state.is_improving = true;
        self.state.error = None;
        Some(ImproveTicket { issuer: self.next_issuer(), prompt: self.prompt.clone() })
    }

    /// Apply the outcome of an improve call. Returns `false`, leaving state
    /// untouched, when the ticket was not issued by this controller's
    /// outstanding improve.
    pub fn complete_improve(
        &mut self,
        ticket: ImproveTicket,
        result: Result<String, PromptImproveError>,
    ) -> bool {
        if !self.state.is_improving || !self.owns(ticket.issuer) {
            tracing::warn!("ignoring improve ticket from another controller or attempt");
            return false;
        }
        match result {
            Ok(improved) => self.prompt = improved,
            Err(err) => self.state.error = Some(err.to_string()),
        }
        self.state.is_improving = false;
        true
    }

    /// Run a full improve round trip. Returns `false` when the call was rejected.
    pub fn improve<G>(&mut self, gateway: &G) -> bool
    where
        G: PromptGateway + ?Sized,
    {
        let Some(ticket) = self.begin_improve() else {
            return false;
        };
        let result = gateway.improve(ticket.prompt());
        self.complete_improve(ticket, result)
    }

    // Execute.

    /// Take the busy flag for an execute call. Clears the previous response
    /// and leaves edit mode.
    pub fn begin_execute(&mut self) -> Option<ExecuteTicket> {
        if !self.can_start("execute") {
            return None;
        }
        self.state.is_executing = true;
        self.state.error = None;
        self.state.is_response_editable = false;
        self.response.clear();
        Some(ExecuteTicket {
            issuer: self.next_issuer(),
            prompt: self.prompt.clone(),
            attachments: self.attachments.clone(),
        })
    }

    /// Apply the outcome of an execute call. Same ticket rules as
    /// [`Self::complete_improve`].
    pub fn complete_execute(
        &mut self,
        ticket: ExecuteTicket,
        result: Result<String, AiExecutionError>,
    ) -> bool {
        if !self.state.is_executing || !self.owns(ticket.issuer) {
            tracing::warn!("ignoring execute ticket from another controller or attempt");
            return false;
        }
        match result {
            Ok(response) => self.response = response,
            Err(err) => self.state.error = Some(err.to_string()),
        }
        self.state.is_executing = false;
        true
    }

    /// Run a full execute round trip. Returns `false` when the call was rejected.
    pub fn execute<G>(&mut self, gateway: &G) -> bool
    where
        G: PromptGateway + ?Sized,
    {
        let Some(ticket) = self.begin_execute() else {
            return false;
        };
        let result = gateway.execute(ticket.prompt(), ticket.attachments());
        self.complete_execute(ticket, result)
    }

    fn next_issuer(&mut self) -> Issuer {
        self.attempt += 1;
        Issuer { controller: self.id, attempt: self.attempt }
    }

    fn owns(&self, issuer: Issuer) -> bool {
        issuer == Issuer { controller: self.id, attempt: self.attempt }
    }

    fn can_start(&self, operation: &'static str) -> bool {
        if self.prompt.is_empty() {
            tracing::debug!(operation, "rejected: no prompt");
            return false;
        }
        if self.is_busy() {
            tracing::debug!(operation, "rejected: another call is in flight");
            return false;
        }
        true
    }

    // Response editing.

    pub fn toggle_response_edit(&mut self) {
        self.state.is_response_editable = !self.state.is_response_editable;
    }

    /// Replace the response verbatim while edit mode is active.
    pub fn edit_response(&mut self, text: impl Into<String>) -> bool {
        if !self.state.is_response_editable {
            return false;
        }
        self.response = text.into();
        true
    }

    // Exports.

    /// Snapshot of the prompt, or `None` when there is nothing to save.
    pub fn export_prompt(&self) -> Option<ExportFile> {
        if self.prompt.is_empty() { None } else { Some(ExportFile::prompt(&self.prompt)) }
    }

    pub fn export_response(&self) -> ExportFile {
        ExportFile::response(&self.response)
    }
}
