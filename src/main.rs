use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::eval::EvalArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(long, global = true, conflicts_with = "config")]
    no_config: bool,

    /// Show detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a document and write the result back to it
    Eval {
        /// File to evaluate
        file: PathBuf,

        /// Evaluator language, overriding the classification mapping
        #[arg(short, long)]
        language: Option<String>,

        /// Classification of the document (default: derived from the extension)
        #[arg(long)]
        classification: Option<String>,

        /// Force markdown mode on
        #[arg(long, conflicts_with = "no_markdown")]
        markdown: bool,

        /// Force markdown mode off
        #[arg(long)]
        no_markdown: bool,

        /// Print the result instead of writing the file
        #[arg(long)]
        stdout: bool,
    },
    /// Show the result-line decorations a document would receive
    Highlight {
        /// File to inspect
        file: PathBuf,

        /// Classification of the document (default: derived from the extension)
        #[arg(long)]
        classification: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Show built-in defaults instead of the loaded configuration
        #[arg(long)]
        defaults: bool,
    },
    /// Create a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = ".equals.toml")]
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Eval {
            file,
            language,
            classification,
            markdown,
            no_markdown,
            stdout,
        } => {
            let markdown = match (markdown, no_markdown) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::eval::handle_eval(
                EvalArgs {
                    file,
                    language,
                    classification,
                    markdown,
                    stdout,
                },
                config_path,
                cli.no_config,
            );
        }
        Commands::Highlight { file, classification } => {
            commands::highlight::handle_highlight(&file, classification, config_path, cli.no_config);
        }
        Commands::Config { defaults } => {
            commands::config::handle_config(defaults, config_path, cli.no_config);
        }
        Commands::Init { path } => {
            commands::init::handle_init(&path);
        }
    }
}
