use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rfs::error::AppError;

use crate::score::{run_presets, run_score};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Fit Scorer",
    about = "Score applicant batches into a pseudonymized, reviewable ranking",
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
    /// Score an applications CSV and print the pseudonymized review table
    Score(ScoreArgs),
    /// List the available parameter presets
    Presets,
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
pub(crate) struct ScoreArgs {
    /// Applications CSV file
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Parameter preset to apply
    #[arg(long, default_value = "standard")]
    pub(crate) preset: String,
    /// Write the pseudonymized review CSV to this path
    #[arg(long)]
    pub(crate) review: Option<PathBuf>,
    /// Write the export CSV (includes raw identifiers) to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Print the decision/sector summary after the table
    #[arg(long)]
    pub(crate) summary: bool,

    /// Override the guessed column for the applicant identifier
    #[arg(long)]
    pub(crate) identifier_column: Option<String>,
    /// Override the guessed column for the organisation text
    #[arg(long)]
    pub(crate) organisation_column: Option<String>,
    /// Override the guessed column for the structured sector value
    #[arg(long)]
    pub(crate) sector_column: Option<String>,
    /// Override the guessed column for the motivation statement
    #[arg(long)]
    pub(crate) motivation_column: Option<String>,
    /// Override the guessed column for the function title
    #[arg(long)]
    pub(crate) function_column: Option<String>,
    /// Override the guessed column for the weekly time band
    #[arg(long)]
    pub(crate) time_column: Option<String>,
    /// Override the guessed column for the language comfort band
    #[arg(long)]
    pub(crate) language_column: Option<String>,
    /// Override the guessed column for the referee confirmation
    #[arg(long)]
    pub(crate) referee_column: Option<String>,
    /// Override the guessed column for the alumni referral
    #[arg(long)]
    pub(crate) alumni_column: Option<String>,
    /// Override the guessed column for the application date (enables
    /// keep-latest deduplication)
    #[arg(long)]
    pub(crate) date_column: Option<String>,
    /// Additional identifier columns to hash into HASH_<col> fields
    #[arg(long)]
    pub(crate) hash_column: Vec<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Presets => {
            run_presets();
            Ok(())
        }
    }
}
