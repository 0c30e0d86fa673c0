use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use streetnames::config::Config;
use streetnames::corpus::Corpus;
use streetnames::topics::classifier::Classifier;
use streetnames::topics::ranking::Selection;
use streetnames::topics::traits::TopicClassifier;

/// Streetnames: classify street name histories into a topic taxonomy.
///
/// Each entity's description is scored against a fixed keyword taxonomy
/// and assigned the most specific topic the evidence supports.
#[derive(Parser)]
#[command(name = "streetnames", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every entity in the corpus and write the name -> topic mapping
    Classify {
        /// Raw data file (overrides STREETNAMES_INPUT)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Classification output file (overrides STREETNAMES_OUTPUT)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Which candidate to keep: "first" (historical, lowest score) or "strongest"
        #[arg(long)]
        select: Option<Selection>,

        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },

    /// Show the full ranked candidate list for one entity or a piece of text
    Explain {
        /// Entity name as it appears in the corpus
        name: Option<String>,

        /// Classify this text instead of a corpus entry
        #[arg(long, conflicts_with = "name")]
        text: Option<String>,

        /// Raw data file (overrides STREETNAMES_INPUT)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Which candidate to mark as chosen
        #[arg(long)]
        select: Option<Selection>,
    },

    /// Print the topic taxonomy
    Taxonomy,

    /// Print keyword weights computed over the corpus
    Idf {
        /// How many keywords to show at each end
        #[arg(long, default_value = "15")]
        top: usize,

        /// Raw data file (overrides STREETNAMES_INPUT)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Show system status (corpus, taxonomy, last classification)
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("streetnames=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            input,
            output,
            select,
            quiet,
        } => {
            let config = load_config(input, output, select)?;
            config.require_input()?;

            let taxonomy = config.load_taxonomy()?;
            let corpus = Corpus::load(&config.input_path)?;

            println!(
                "Classifying {} entities against {} topics...",
                corpus.len(),
                taxonomy.len()
            );

            let idf = streetnames::pipeline::classify::compute_idf(&taxonomy, &corpus)?;
            let classifier = Classifier::new(&taxonomy, &idf);
            let report = streetnames::pipeline::classify::run(
                &corpus,
                &classifier,
                config.selection,
                !quiet,
            )?;

            streetnames::output::terminal::display_batch_summary(
                &taxonomy,
                &report,
                config.selection,
            );
            streetnames::pipeline::classify::write_assignments(&config.output_path, &report)?;

            println!(
                "\n{}",
                format!("Classification saved to: {}", config.output_path.display()).bold()
            );
        }

        Commands::Explain {
            name,
            text,
            input,
            select,
        } => {
            let config = load_config(input, None, select)?;
            config.require_input()?;

            let taxonomy = config.load_taxonomy()?;
            let corpus = Corpus::load(&config.input_path)?;

            let (label, info) = match (name, text) {
                (_, Some(text)) => ("<text>".to_string(), text),
                (Some(name), None) => match corpus.get(&name) {
                    Some(record) => (name.clone(), record.info.clone()),
                    None => anyhow::bail!("No entity named {name:?} in {}", config.input_path.display()),
                },
                (None, None) => anyhow::bail!("Pass an entity name or --text"),
            };

            // Weights always come from the whole corpus, even for ad-hoc text
            let idf = streetnames::pipeline::classify::compute_idf(&taxonomy, &corpus)?;
            let classifier = Classifier::new(&taxonomy, &idf);
            let ranking = classifier.classify(&info)?;
            info!(entity = label.as_str(), candidates = ranking.len(), "Classified");

            streetnames::output::terminal::display_ranking(
                &label,
                &info,
                &taxonomy,
                &ranking,
                config.selection,
            );
        }

        Commands::Taxonomy => {
            let config = Config::load()?;
            let taxonomy = config.load_taxonomy()?;
            streetnames::output::terminal::display_taxonomy(&taxonomy);
        }

        Commands::Idf { top, input } => {
            let config = load_config(input, None, None)?;
            config.require_input()?;

            let taxonomy = config.load_taxonomy()?;
            let corpus = Corpus::load(&config.input_path)?;
            let idf = streetnames::pipeline::classify::compute_idf(&taxonomy, &corpus)?;
            streetnames::output::terminal::display_idf(&idf, top);
        }

        Commands::Status => {
            let config = Config::load()?;
            streetnames::status::show(&config)?;
        }
    }

    Ok(())
}

/// Load the environment config and apply command line overrides.
fn load_config(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    select: Option<Selection>,
) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(input) = input {
        config.input_path = input;
    }
    if let Some(output) = output {
        config.output_path = output;
    }
    if let Some(select) = select {
        config.selection = select;
    }
    Ok(config)
}
