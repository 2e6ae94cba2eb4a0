use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use inquire::Text;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::AppError;
use crate::models::event::EventRecord;
use crate::parser::{self, Dialect};
use crate::runtime;
use crate::service::export_service;
use crate::service::extraction_service::EventExtractor;
use crate::service::openai_service::OpenAIService;

#[derive(Parser, Debug)]
#[command(name = "calendar-stories", about = "Turn calendar text into event records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send calendar text to the completion API and print the events.
    Extract {
        /// Read the text from this file instead of prompting.
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        dialect: Option<Dialect>,
        #[arg(long, value_enum, default_value_t = PrintFormat::Json)]
        format: PrintFormat,
    },
    /// Parse a saved completion reply without calling the API.
    Parse {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        dialect: Option<Dialect>,
        #[arg(long, value_enum, default_value_t = PrintFormat::Json)]
        format: PrintFormat,
        /// Log how many lines were skipped.
        #[arg(long)]
        report: bool,
    },
    /// Read an exported CSV attachment and print it as JSON.
    Import {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    Json,
    Csv,
    /// The dialect's own textual form.
    Text,
}

pub async fn run(cli: Cli, mut settings: Settings) -> Result<(), AppError> {
    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.port = port;
            }
            runtime::run_api(settings).await
        }
        Commands::Extract {
            file,
            dialect,
            format,
        } => {
            let dialect = dialect.unwrap_or(settings.dialect);
            let Some(service) = OpenAIService::from_settings(&settings)? else {
                return Err(AppError::Config("OPENAI_API_KEY is not set".to_string()));
            };
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => specify_text()?,
            };
            let extractor = EventExtractor::new(Arc::new(service), dialect);
            let outcome = extractor.extract(&text).await?;
            println!("{}", render_output(&outcome.events, format, dialect)?);
            Ok(())
        }
        Commands::Parse {
            file,
            dialect,
            format,
            report,
        } => {
            let dialect = dialect.unwrap_or(settings.dialect);
            let reply = std::fs::read_to_string(&file)?;
            let outcome = parser::parse_events_with_report(&reply, dialect);
            if report {
                info!(
                    file = %file.display(),
                    events = outcome.events.len(),
                    skipped_lines = outcome.skipped_lines,
                    "parse report"
                );
            }
            println!("{}", render_output(&outcome.events, format, dialect)?);
            Ok(())
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let events = export_service::from_csv_attachment(&text)?;
            if events.is_empty() {
                warn!(file = %file.display(), "no dated rows found");
            }
            println!("{}", export_service::to_json(&events)?);
            Ok(())
        }
    }
}

pub fn render_output(
    events: &[EventRecord],
    format: PrintFormat,
    dialect: Dialect,
) -> Result<String, AppError> {
    match format {
        PrintFormat::Json => Ok(serde_json::to_string_pretty(events)?),
        PrintFormat::Csv => export_service::to_csv_attachment(events),
        PrintFormat::Text => Ok(parser::render_events(events, dialect)),
    }
}

fn specify_text() -> Result<String, AppError> {
    Ok(Text::new("Paste your calendar text.").prompt()?)
}
