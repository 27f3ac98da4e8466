//! CLI Adapter.

mod session;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::adapters::{HttpGeminiClient, load_attachment, write_export};
use crate::app::{WorkflowController, connect_gateway, load_config};
use crate::domain::{AppError, ExportFile, FormData, LegalArea, Register, Tone};
use crate::services::AiGateway;

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "LEXPROMPT_LOG";

#[derive(Parser)]
#[command(name = "lexprompt")]
#[command(version)]
#[command(
    about = "Assemble, refine and run prompts framed in Mexican law",
    long_about = None
)]
struct Cli {
    /// Path to a lexprompt.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List legal areas, tones and language registers
    #[clap(visible_alias = "ls")]
    Areas,
    /// Print the prompt built from the form fields
    #[clap(visible_alias = "b")]
    Build {
        #[command(flatten)]
        form: FormArgs,
        /// Directory to save prompt-juridico.txt into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Build the prompt and ask the model to improve it
    #[clap(visible_alias = "im")]
    Improve {
        #[command(flatten)]
        form: FormArgs,
        /// Directory to save prompt-juridico.txt into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Build the prompt and run it, optionally with image attachments
    #[clap(visible_alias = "x")]
    Execute {
        #[command(flatten)]
        form: FormArgs,
        /// File to attach (repeatable; only images are sent)
        #[arg(short = 'a', long = "attach")]
        attachments: Vec<PathBuf>,
        /// Improve the prompt before running it
        #[arg(long)]
        improve: bool,
        /// Directory to save prompt-juridico.txt and respuesta-ia.md into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Interactive session over the whole workflow
    #[clap(visible_alias = "s")]
    Session {
        /// Directory exports are written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct FormArgs {
    /// Legal area (e.g. Civil, Penal, Amparo)
    #[arg(long, default_value_t)]
    area: LegalArea,
    /// Role the model should adopt; defaults to the area's specialist
    #[arg(long)]
    role: Option<String>,
    /// What the model should do
    #[arg(long, default_value = "")]
    task: String,
    /// Facts and background of the case
    #[arg(long, default_value = "")]
    context: String,
    /// Tone of the answer
    #[arg(long, default_value_t)]
    tone: Tone,
    /// Language register of the answer
    #[arg(long, default_value_t)]
    language: Register,
}

impl FormArgs {
    fn into_controller(self) -> Result<WorkflowController, AppError> {
        let mut controller = WorkflowController::new();
        controller.select_area(self.area);
        if let Some(role) = self.role {
            controller.set_role(role);
        }
        controller.set_tone(self.tone);
        controller.set_language(self.language);
        controller.set_task(self.task);
        controller.set_context(self.context);

        ensure_prompt(controller.form())?;
        Ok(controller)
    }
}

fn ensure_prompt(form: &FormData) -> Result<(), AppError> {
    if form.task.is_empty() {
        return Err(AppError::MissingField("task"));
    }
    if form.context.is_empty() {
        return Err(AppError::MissingField("context"));
    }
    Ok(())
}

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Areas => {
            print_catalog();
            Ok(())
        }
        Commands::Build { form, out } => run_build(form, out.as_deref()),
        Commands::Improve { form, out } => run_improve(config_path, form, out.as_deref()),
        Commands::Execute { form, attachments, improve, out } => {
            run_execute(config_path, form, &attachments, improve, out.as_deref())
        }
        Commands::Session { out } => session::run_session(config_path, &out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_catalog() {
    println!("Materias:");
    for area in LegalArea::ALL {
        println!("  {}", area);
    }
    println!("Tonos:");
    for tone in Tone::ALL {
        println!("  {}", tone);
    }
    println!("Lenguaje:");
    for register in Register::ALL {
        println!("  {}", register);
    }
}

fn run_build(form: FormArgs, out: Option<&Path>) -> Result<(), AppError> {
    let controller = form.into_controller()?;
    println!("{}", controller.prompt());
    if let Some(dir) = out {
        save_prompt(&controller, dir)?;
    }
    Ok(())
}

fn run_improve(config: Option<&Path>, form: FormArgs, out: Option<&Path>) -> Result<(), AppError> {
    let mut controller = form.into_controller()?;
    let gateway = gateway_from(config)?;

    improve_or_fail(&mut controller, &gateway)?;
    println!("{}", controller.prompt());
    if let Some(dir) = out {
        save_prompt(&controller, dir)?;
    }
    Ok(())
}

fn run_execute(
    config: Option<&Path>,
    form: FormArgs,
    attachments: &[PathBuf],
    improve: bool,
    out: Option<&Path>,
) -> Result<(), AppError> {
    let mut controller = form.into_controller()?;
    let loaded =
        attachments.iter().map(|path| load_attachment(path)).collect::<Result<Vec<_>, _>>()?;
    controller.add_attachments(loaded);
    let gateway = gateway_from(config)?;

    if improve {
        improve_or_fail(&mut controller, &gateway)?;
    }

    controller.execute(&gateway);
    if let Some(error) = controller.error() {
        return Err(AppError::Workflow(error.to_string()));
    }

    println!("{}", controller.response());
    if let Some(dir) = out {
        save_prompt(&controller, dir)?;
        save_export(dir, &controller.export_response())?;
    }
    Ok(())
}

fn gateway_from(config: Option<&Path>) -> Result<AiGateway<HttpGeminiClient>, AppError> {
    let config = load_config(config)?;
    connect_gateway(&config)
}

fn improve_or_fail(
    controller: &mut WorkflowController,
    gateway: &AiGateway<HttpGeminiClient>,
) -> Result<(), AppError> {
    controller.improve(gateway);
    match controller.error() {
        Some(error) => Err(AppError::Workflow(error.to_string())),
        None => Ok(()),
    }
}

fn save_prompt(controller: &WorkflowController, dir: &Path) -> Result<(), AppError> {
    match controller.export_prompt() {
        Some(export) => save_export(dir, &export),
        None => Ok(()),
    }
}

fn save_export(dir: &Path, export: &ExportFile) -> Result<(), AppError> {
    let path = write_export(dir, export)?;
    tracing::info!(path = %path.display(), mime_type = export.mime_type, "export written");
    eprintln!("✅ Saved {}", path.display());
    Ok(())
}
