//! # Fact Harness CLI (`facts`)
//!
//! The `facts` binary drives an AI-powered fact generation pipeline:
//! Gemini proposes research questions for a topic, Perplexity answers
//! them with web-search citations, and Gemini distills the answers into
//! structured facts written to `facts_<topic>.txt`.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive menu (default)
//! facts
//!
//! # Scripted, non-interactive
//! facts generate "Climate Change"
//! facts stats
//! ```
//!
//! Both providers require credentials in the environment (a `.env` file
//! is honored): `PERPLEXITY_API_KEY` and `GEMINI_API_KEY`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fact_harness::answers::PerplexityAnswerGatherer;
use fact_harness::config::{self, Config, Credentials};
use fact_harness::extract::GeminiFactExtractor;
use fact_harness::gemini::GeminiClient;
use fact_harness::menu::run_menu;
use fact_harness::perplexity::PerplexityClient;
use fact_harness::pipeline::run_generate;
use fact_harness::questions::GeminiQuestionGenerator;
use fact_harness::stats::run_stats;

/// Fact Harness — generate sourced facts about any topic with AI.
#[derive(Parser)]
#[command(
    name = "facts",
    about = "Fact Harness — generate sourced facts about any topic with AI",
    version,
    long_about = "Fact Harness queries Gemini for research questions about a topic, \
    gathers web-search-augmented answers from Perplexity, extracts structured facts \
    with citations, and writes them to a topic-named text file."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional; built-in defaults are used when the file does not exist.
    #[arg(long, global = true, default_value = "./config/facts.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Non-interactive commands. With no command, the interactive menu runs.
#[derive(Subcommand)]
enum Commands {
    /// Generate facts for a topic and write them to a fact file.
    Generate {
        /// The topic to research.
        topic: String,
    },

    /// Summarize previously generated fact files.
    Stats,
}

/// The three concrete pipeline stages, built once per process.
struct Stages {
    questions: GeminiQuestionGenerator,
    gatherer: PerplexityAnswerGatherer,
    extractor: GeminiFactExtractor,
}

/// Verify credentials and build the provider-backed stages.
///
/// Called before any network activity so a missing API key fails here,
/// not mid-run.
fn build_stages(config: &Config) -> fact_harness::error::Result<Stages> {
    let credentials = Credentials::from_env()?;

    let gemini = GeminiClient::new(credentials.gemini_api_key.clone(), &config.gemini)?;
    let perplexity = PerplexityClient::new(credentials.perplexity_api_key, &config.perplexity)?;

    Ok(Stages {
        questions: GeminiQuestionGenerator::new(gemini.clone(), config.pipeline.question_count),
        gatherer: PerplexityAnswerGatherer::new(perplexity),
        extractor: GeminiFactExtractor::new(gemini, config.pipeline.extract_attempts),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Some(Commands::Stats) => {
            run_stats(&cfg.output.dir)?;
        }
        Some(Commands::Generate { topic }) => {
            let stages = build_stages(&cfg)?;
            let path = run_generate(
                &topic,
                &stages.questions,
                &stages.gatherer,
                &stages.extractor,
                &cfg.output.dir,
            )
            .await?;
            println!("Results saved to {}", path.display());
        }
        None => {
            let stages = build_stages(&cfg)?;
            run_menu(
                &cfg,
                &stages.questions,
                &stages.gatherer,
                &stages.extractor,
            )
            .await?;
        }
    }

    Ok(())
}
