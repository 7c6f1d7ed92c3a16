use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finsummary_common::{logger, AppConfig, FinSummaryError};
use finsummary_llm::{
    chunk_text, GenerateOptions, OllamaClient, SummarizeOptions, Summarizer, SummaryStrategy,
    SummaryStyle,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "finsummary")]
#[command(about = "FinSummary - LLM summaries and Thai translations of financial documents", long_about = None)]
struct Cli {
    /// Override the LLM model name
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a plain-text document
    Summarize {
        /// Document to summarize
        file: PathBuf,

        /// map-reduce or refine
        #[arg(long, default_value = "map-reduce")]
        strategy: SummaryStrategy,

        /// paragraph or bullet
        #[arg(long, default_value = "paragraph")]
        style: SummaryStyle,

        /// Translate the finished summary into Thai
        #[arg(long)]
        translate: bool,

        /// Write the result to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Translate a plain-text document into Thai
    Translate {
        /// Document to translate
        file: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check that the configured Ollama endpoint is reachable
    Check,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<FinSummaryError>()
            .map(FinSummaryError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    if let Some(model) = cli.model {
        config.llm_model = model;
        config.validate()?;
    }

    logger::init_from_config(&config)?;

    let client = OllamaClient::with_timeout(
        &config.ollama_base_url,
        &config.llm_model,
        config.llm_timeout_secs,
    )?
    .with_options(GenerateOptions {
        temperature: Some(config.llm_temperature),
        ..Default::default()
    });

    match cli.command {
        Commands::Summarize {
            file,
            strategy,
            style,
            translate,
            output,
        } => {
            let document = read_document(&file)?;
            let chunks = chunk_text(&document, config.chunk_size, config.chunk_overlap);
            tracing::info!(
                "Loaded {} ({} chars) into {} chunks",
                file.display(),
                document.chars().count(),
                chunks.len()
            );

            let summarizer = Summarizer::new(
                Arc::new(client),
                SummarizeOptions {
                    map_concurrency: config.map_concurrency,
                },
            );

            let mut result = summarizer.summarize(&chunks, strategy, style).await?;
            if translate {
                result = summarizer.translate(&result).await?;
            }

            write_result(&result, output.as_deref())?;
        }
        Commands::Translate { file, output } => {
            let document = read_document(&file)?;
            let translated = finsummary_llm::translate(&document, &client).await?;
            write_result(&translated, output.as_deref())?;
        }
        Commands::Check => {
            if client.test_connection().await? {
                println!("Ollama reachable at {}", client.base_url());
            } else {
                return Err(FinSummaryError::network(format!(
                    "Ollama at {} responded with an error status",
                    client.base_url()
                ))
                .into());
            }
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .map_err(FinSummaryError::from)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if text.trim().is_empty() {
        return Err(FinSummaryError::invalid_input(format!(
            "Document {} is empty",
            path.display()
        ))
        .into());
    }

    Ok(text)
}

fn write_result(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .map_err(FinSummaryError::from)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Result written to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summarize_args() {
        let cli = Cli::try_parse_from([
            "finsummary",
            "summarize",
            "outlook.txt",
            "--strategy",
            "refine",
            "--style",
            "bullet",
            "--translate",
        ])
        .unwrap();

        match cli.command {
            Commands::Summarize {
                file,
                strategy,
                style,
                translate,
                output,
            } => {
                assert_eq!(file, PathBuf::from("outlook.txt"));
                assert_eq!(strategy, SummaryStrategy::Refine);
                assert_eq!(style, SummaryStyle::Bullet);
                assert!(translate);
                assert!(output.is_none());
            }
            _ => panic!("expected summarize command"),
        }
    }

    #[test]
    fn test_rejects_unknown_style() {
        assert!(Cli::try_parse_from(["finsummary", "summarize", "a.txt", "--style", "table"]).is_err());
    }

    #[test]
    fn test_read_missing_document_is_io_error() {
        let err = read_document(Path::new("/nonexistent/finsummary/input.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FinSummaryError>(),
            Some(FinSummaryError::Io(_))
        ));
    }
}
