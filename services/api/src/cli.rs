use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use talent_intake::candidates::{CandidatePayload, CandidateValidator, IntakePolicy};
use talent_intake::config::AppConfig;
use talent_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Candidate Intake",
    about = "Validate and store candidate records for the applicant-tracking backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check a candidate payload stored as JSON without persisting it
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to a JSON candidate payload
    pub(crate) file: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let validator = CandidateValidator::new(IntakePolicy::from_config(&config.intake)?);
    let mode = validate_file(&validator, &args.file)?;
    println!("valid ({} payload)", mode);
    Ok(())
}

fn validate_file(validator: &CandidateValidator, path: &Path) -> Result<&'static str, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let payload: serde_json::Value = serde_json::from_str(&raw)?;
    validator.validate_candidate(&payload)?;
    Ok(CandidatePayload::new(&payload).mode().label())
}
