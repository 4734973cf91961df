mod check;
mod convert;
mod debug;
mod lookup;
mod stats;
mod view;

use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tscodec::{ReadOptions, TranslationStatus};
use tscodec_cli::{Config, load_catalog, validation};

use crate::{
    check::run_validate_command,
    convert::{ConvertOptions, run_convert_command},
    debug::run_debug_command,
    lookup::{LookupQuery, run_lookup_command},
    stats::print_stats,
    view::{ViewFilter, print_view},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./tscodec.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr (otherwise RUST_LOG, default warn)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View the messages of a catalogue.
    View {
        /// The input file to view
        #[arg(short, long)]
        input: String,

        /// Only show messages of this context
        #[arg(short, long)]
        context: Option<String>,

        /// Only show messages with this status (finished, unfinished, obsolete, vanished)
        #[arg(short, long)]
        status: Option<String>,

        /// Language to assume when the file does not declare one
        #[arg(short, long)]
        lang: Option<String>,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// Look up the translation of one message.
    Lookup {
        /// The catalogue to search
        #[arg(short, long)]
        input: String,

        /// Context name, e.g. QFileDialog
        #[arg(short, long)]
        context: String,

        /// Source text of the message
        #[arg(short, long)]
        source: String,

        /// Disambiguating comment
        #[arg(long)]
        comment: Option<String>,

        /// Quantity used to pick a plural form
        #[arg(short = 'n', long)]
        count: Option<u64>,

        /// Print the source text when there is no translation
        #[arg(long)]
        fallback: bool,

        /// Language to assume when the file does not declare one
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show translation statistics.
    Stats {
        /// The input file to analyze
        #[arg(short, long)]
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a catalogue for duplicates, placeholder and plural problems.
    Validate {
        /// The input file to check
        #[arg(short, long)]
        input: String,

        /// Fail while reading on duplicate keys or a missing language
        #[arg(long)]
        strict: bool,

        /// Output issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a catalogue between .ts and JSON.
    Convert {
        /// The input file to process
        #[arg(short, long)]
        input: String,

        /// The output file to write the results to
        #[arg(short, long)]
        output: String,

        /// Input format (ts or json), inferred from the extension by default
        #[arg(long)]
        input_format: Option<String>,

        /// Output format (ts or json), inferred from the extension by default
        #[arg(long)]
        output_format: Option<String>,

        /// Language to assume when the file does not declare one
        #[arg(short, long)]
        lang: Option<String>,

        /// Fail on duplicate keys or a missing language
        #[arg(long)]
        strict: bool,
    },

    /// Dump a catalogue as JSON for debugging.
    Debug {
        /// The input file to debug
        #[arg(short, long)]
        input: String,

        /// Language to assume when the file does not declare one
        #[arg(short, long)]
        lang: Option<String>,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_options(config: &Config, lang: Option<String>, strict: bool) -> Result<ReadOptions, String> {
    let language = config.language_hint(lang);
    if let Some(lang) = &language {
        validation::validate_language_code(lang)?;
    }
    Ok(ReadOptions::new()
        .with_language_hint(language)
        .with_strict(strict || config.strict))
}

fn run(commands: Commands, config: &Config) -> Result<(), String> {
    match commands {
        Commands::View {
            input,
            context,
            status,
            lang,
            full,
        } => {
            let status = status
                .map(|s| TranslationStatus::from_str(&s))
                .transpose()?;
            let catalog = load_catalog(&input, &read_options(config, lang, false)?)?;
            print_view(&catalog, &ViewFilter { context, status }, full || config.full)
        }
        Commands::Lookup {
            input,
            context,
            source,
            comment,
            count,
            fallback,
            lang,
        } => {
            let catalog = load_catalog(&input, &read_options(config, lang, false)?)?;
            let query = LookupQuery {
                context,
                source,
                comment,
                count,
                fallback,
            };
            run_lookup_command(&catalog, &query)
        }
        Commands::Stats { input, json } => {
            let catalog = load_catalog(&input, &read_options(config, None, false)?)?;
            print_stats(&catalog, json)
        }
        Commands::Validate {
            input,
            strict,
            json,
        } => {
            let catalog = load_catalog(&input, &read_options(config, None, strict)?)?;
            run_validate_command(&catalog, &input, json)
        }
        Commands::Convert {
            input,
            output,
            input_format,
            output_format,
            lang,
            strict,
        } => {
            let options = ConvertOptions {
                input_format,
                output_format,
                language: config.language_hint(lang),
                strict: strict || config.strict,
            };
            run_convert_command(&input, &output, &options)
        }
        Commands::Debug {
            input,
            lang,
            output,
        } => {
            let catalog = load_catalog(&input, &read_options(config, lang, false)?)?;
            run_debug_command(&catalog, output.as_deref())
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args.commands, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
