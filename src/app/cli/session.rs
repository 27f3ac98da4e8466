//! Interactive terminal session driving the workflow controller.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dialoguer::{Editor, Error as DialoguerError, Input, Select};

use super::save_export;
use crate::adapters::{HttpGeminiClient, load_attachment};
use crate::app::{WorkflowController, WorkflowPhase, connect_gateway, load_config};
use crate::domain::{AppError, LegalArea, Register, Tone};
use crate::services::AiGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SelectArea,
    EditRole,
    EditTask,
    EditContext,
    SelectTone,
    SelectLanguage,
    AddAttachment,
    RemoveAttachment,
    Improve,
    Execute,
    ToggleEdit,
    EditResponse,
    ExportPrompt,
    ExportResponse,
    Show,
    Quit,
}

impl Action {
    const ALL: [Action; 16] = [
        Action::SelectArea,
        Action::EditRole,
        Action::EditTask,
        Action::EditContext,
        Action::SelectTone,
        Action::SelectLanguage,
        Action::AddAttachment,
        Action::RemoveAttachment,
        Action::Improve,
        Action::Execute,
        Action::ToggleEdit,
        Action::EditResponse,
        Action::ExportPrompt,
        Action::ExportResponse,
        Action::Show,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::SelectArea => "Materia",
            Action::EditRole => "Rol",
            Action::EditTask => "Tarea",
            Action::EditContext => "Contexto",
            Action::SelectTone => "Tono",
            Action::SelectLanguage => "Lenguaje",
            Action::AddAttachment => "Adjuntar archivo",
            Action::RemoveAttachment => "Quitar archivo",
            Action::Improve => "Mejorar con IA",
            Action::Execute => "Ejecutar prompt",
            Action::ToggleEdit => "Editar / Guardar cambios",
            Action::EditResponse => "Abrir respuesta en editor",
            Action::ExportPrompt => "Guardar prompt",
            Action::ExportResponse => "Descargar respuesta",
            Action::Show => "Ver estado",
            Action::Quit => "Salir",
        }
    }
}

struct Session<'a> {
    controller: WorkflowController,
    gateway: Option<AiGateway<HttpGeminiClient>>,
    config_path: Option<&'a Path>,
    out_dir: &'a Path,
}

pub(super) fn run_session(config_path: Option<&Path>, out_dir: &Path) -> Result<(), AppError> {
    let mut session =
        Session { controller: WorkflowController::new(), gateway: None, config_path, out_dir };

    loop {
        print_summary(&session.controller);
        let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
        let selection = Select::new()
            .with_prompt("Acción")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|err| interactive_error("select action", err))?;

        let Some(index) = selection else {
            return Ok(());
        };
        let action = Action::ALL[index];
        if action == Action::Quit {
            return Ok(());
        }
        session.apply(action)?;
    }
}

impl Session<'_> {
    fn apply(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::SelectArea => {
                let current = self.controller.form().area_of_law;
                if let Some(area) = pick("Materia", &LegalArea::ALL, current, LegalArea::label)? {
                    self.controller.select_area(area);
                }
            }
            Action::EditRole => {
                if let Some(role) = read_text("Rol", &self.controller.form().role)? {
                    self.controller.set_role(role);
                }
            }
            Action::EditTask => {
                if let Some(task) = read_text("Tarea", &self.controller.form().task)? {
                    self.controller.set_task(task);
                }
            }
            Action::EditContext => {
                if let Some(context) = read_text("Contexto", &self.controller.form().context)? {
                    self.controller.set_context(context);
                }
            }
            Action::SelectTone => {
                let current = self.controller.form().tone;
                if let Some(tone) = pick("Tono", &Tone::ALL, current, Tone::label)? {
                    self.controller.set_tone(tone);
                }
            }
            Action::SelectLanguage => {
                let current = self.controller.form().language;
                if let Some(language) =
                    pick("Lenguaje", &Register::ALL, current, Register::label)?
                {
                    self.controller.set_language(language);
                }
            }
            Action::AddAttachment => {
                if let Some(path) = read_text("Ruta del archivo", "")? {
                    let path = PathBuf::from(path.trim());
                    match load_attachment(&path) {
                        Ok(attachment) => self.controller.add_attachment(attachment),
                        Err(err) => eprintln!("⚠️  {}", err),
                    }
                }
            }
            Action::RemoveAttachment => self.remove_attachment()?,
            Action::Improve => {
                if self.require_prompt() {
                    let gateway = ensure_gateway(&mut self.gateway, self.config_path)?;
                    self.controller.improve(gateway);
                }
            }
            Action::Execute => {
                if self.require_prompt() {
                    let gateway = ensure_gateway(&mut self.gateway, self.config_path)?;
                    self.controller.execute(gateway);
                    if self.controller.error().is_none() {
                        println!("\n{}\n", self.controller.response());
                    }
                }
            }
            Action::ToggleEdit => {
                if self.require_response() {
                    self.controller.toggle_response_edit();
                }
            }
            Action::EditResponse => self.edit_response()?,
            Action::ExportPrompt => match self.controller.export_prompt() {
                Some(export) => save_export(self.out_dir, &export)?,
                None => println!("Completa el formulario para generar el prompt..."),
            },
            Action::ExportResponse => {
                if self.require_response() {
                    save_export(self.out_dir, &self.controller.export_response())?;
                }
            }
            Action::Show => print_details(&self.controller),
            Action::Quit => {}
        }
        Ok(())
    }

    fn require_prompt(&self) -> bool {
        if self.controller.prompt().is_empty() {
            println!("Completa Tarea y Contexto para generar el prompt.");
            return false;
        }
        true
    }

    fn require_response(&self) -> bool {
        if self.controller.response().is_empty() {
            println!("La respuesta de la IA aparecerá aquí.");
            return false;
        }
        true
    }

    fn remove_attachment(&mut self) -> Result<(), AppError> {
        if self.controller.attachments().is_empty() {
            println!("No hay archivos adjuntos.");
            return Ok(());
        }
        let names: Vec<&str> = self
            .controller
            .attachments()
            .iter()
            .map(|attachment| attachment.name.as_str())
            .collect();
        let selection = Select::new()
            .with_prompt("Archivo a quitar")
            .items(&names)
            .default(0)
            .interact_opt()
            .map_err(|err| interactive_error("select attachment", err))?;
        if let Some(index) = selection {
            self.controller.remove_attachment(index);
        }
        Ok(())
    }

    fn edit_response(&mut self) -> Result<(), AppError> {
        if !self.require_response() {
            return Ok(());
        }
        if !self.controller.state().is_response_editable {
            println!("Activa el modo de edición primero.");
            return Ok(());
        }
        let edited = Editor::new()
            .extension(".md")
            .edit(self.controller.response())
            .map_err(|err| AppError::Interactive(format!("Failed to open editor: {}", err)))?;
        if let Some(text) = edited {
            self.controller.edit_response(text);
        }
        Ok(())
    }
}

/// Connect lazily on the first improve or execute.
fn ensure_gateway<'g>(
    slot: &'g mut Option<AiGateway<HttpGeminiClient>>,
    config_path: Option<&Path>,
) -> Result<&'g AiGateway<HttpGeminiClient>, AppError> {
    if slot.is_none() {
        let config = load_config(config_path)?;
        *slot = Some(connect_gateway(&config)?);
    }
    slot.as_ref().ok_or_else(|| AppError::config_error("gateway unavailable"))
}

fn pick<T: Copy + PartialEq>(
    prompt: &str,
    options: &[T],
    current: T,
    label: fn(&T) -> &'static str,
) -> Result<Option<T>, AppError> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let default = options.iter().position(|option| *option == current).unwrap_or(0);
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact_opt()
        .map_err(|err| interactive_error("select option", err))?;
    Ok(selection.map(|index| options[index]))
}

fn read_text(prompt: &str, initial: &str) -> Result<Option<String>, AppError> {
    match Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
    {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(interactive_error("read input", err)),
    }
}

fn interactive_error(what: &str, err: DialoguerError) -> AppError {
    AppError::Interactive(format!("Failed to {}: {}", what, err))
}

fn phase_label(phase: WorkflowPhase) -> &'static str {
    match phase {
        WorkflowPhase::Idle => "sin prompt",
        WorkflowPhase::Ready => "prompt listo",
        WorkflowPhase::Improving => "mejorando...",
        WorkflowPhase::Executing => "ejecutando...",
        WorkflowPhase::Displayed => "respuesta",
        WorkflowPhase::Editing => "respuesta (edición)",
    }
}

fn print_summary(controller: &WorkflowController) {
    let form = controller.form();
    println!(
        "\n[{}] {} · {} · {} · adjuntos: {}",
        phase_label(controller.phase()),
        form.area_of_law,
        form.tone,
        form.language,
        controller.attachments().len()
    );
    if let Some(error) = controller.error() {
        println!("Error: {}", error);
    }
}

fn print_details(controller: &WorkflowController) {
    println!("\n--- Vista Previa del Prompt ---");
    if controller.prompt().is_empty() {
        println!("Completa el formulario para generar el prompt...");
    } else {
        println!("{}", controller.prompt());
    }

    if !controller.attachments().is_empty() {
        println!("\n--- Archivos ---");
        for (index, attachment) in controller.attachments().iter().enumerate() {
            let note = if attachment.is_image() { "" } else { " (no se enviará)" };
            println!("{}. {} [{}]{}", index + 1, attachment.name, attachment.mime_type, note);
        }
    }

    println!("\n--- Respuesta de la IA ---");
    if controller.response().is_empty() {
        println!("La respuesta de la IA aparecerá aquí.");
    } else {
        println!("{}", controller.response());
    }
}
