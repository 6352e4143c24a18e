use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::commands;
use crate::config::{self, AuditoriaConfig};
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "auditoria",
    about = "Score checklist items and process audit photos",
    version
)]
struct Cli {
    /// Config file to use instead of the per-user default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one answer of a template item
    Score(ScoreArgs),
    /// Print a sequential score list
    Sequence(SequenceArgs),
    /// Check an answer against the item's photo and observation requirements
    Validate(ValidateArgs),
    /// Print a sequentially scored answer config for a template item
    Prefill(PrefillArgs),
    /// Aggregate the scores of an audit
    Summarize(SummarizeArgs),
    /// Compress an image file
    Compress(CompressArgs),
    /// Print sanitized EXIF metadata of an image file
    Exif(ExifArgs),
    /// Run a photo through compression and EXIF extraction
    Photo(PhotoArgs),
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a config file with default settings
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config in effect
    Show,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Template item JSON file
    pub item: PathBuf,
    /// Answer value, e.g. `conforme`
    pub value: String,
}

#[derive(Args, Debug)]
pub struct SequenceArgs {
    #[arg(allow_negative_numbers = true)]
    pub first: f64,
    pub count: usize,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    pub item: PathBuf,
    pub value: String,
    #[arg(long)]
    pub observation: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub photos: usize,
}

#[derive(Args, Debug)]
pub struct PrefillArgs {
    pub item: PathBuf,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub first: f64,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// JSON array of `{item, resposta}` entries
    pub audit: PathBuf,
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    /// MIME type of the input; guessed from the extension when omitted
    #[arg(long)]
    pub mime: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExifArgs {
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct PhotoArgs {
    pub input: PathBuf,
    #[arg(long)]
    pub audit: Uuid,
    #[arg(long)]
    pub item: Uuid,
    /// Directory the compressed photo is written under, at its storage key
    #[arg(long)]
    pub output_dir: PathBuf,
    #[arg(long)]
    pub mime: Option<String>,
}

pub async fn run() -> eyre::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let config = config::load_config(&config_path)?;
    telemetry::init(&config)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    dispatch(cli.command, &config, &config_path).await
}

async fn dispatch(
    command: Command,
    config: &AuditoriaConfig,
    config_path: &Path,
) -> eyre::Result<()> {
    match command {
        Command::Score(args) => commands::score(&args),
        Command::Sequence(args) => commands::sequence(&args),
        Command::Validate(args) => commands::validate(&args),
        Command::Prefill(args) => commands::prefill(&args),
        Command::Summarize(args) => commands::summarize(&args),
        Command::Compress(args) => commands::compress(&args, config).await,
        Command::Exif(args) => commands::exif(&args).await,
        Command::Photo(args) => commands::photo(&args, config).await,
        Command::Config {
            command: ConfigCommand::Init { force },
        } => commands::config_init(config_path, force),
        Command::Config {
            command: ConfigCommand::Show,
        } => commands::config_show(config),
    }
}
