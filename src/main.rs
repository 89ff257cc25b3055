use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use cvgen::surface::{FileOpener, StdoutOpener, SurfaceOpener, DEFAULT_OUTPUT_FILE};
use cvgen::{CvGenerator, GeneratorConfig, SourceDocument, StderrNotifier, DEFAULT_TRIGGER_ID};

/// Generate a printable CV from a structured resume page
#[derive(Parser, Debug)]
#[command(name = "cvgen", version, about)]
struct Cli {
    /// Source HTML page; `-` or absent reads standard input
    input: Option<PathBuf>,

    /// Where to write the generated CV
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Write the generated CV to standard output instead of a file
    #[arg(long)]
    stdout: bool,

    /// Print the extracted resume record as JSON and exit
    #[arg(long)]
    json: bool,

    /// Id of the control to activate
    #[arg(long, default_value = DEFAULT_TRIGGER_ID)]
    trigger: String,

    /// Generate even when the page has no trigger control
    #[arg(long)]
    force: bool,

    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_source(input: Option<&PathBuf>) -> anyhow::Result<SourceDocument> {
    match input {
        Some(path) if path.as_os_str() != "-" => SourceDocument::from_path(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok(SourceDocument::parse(&source))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let doc = match read_source(cli.input.as_ref()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("cvgen: {:#}", e);
            return ExitCode::from(2);
        }
    };

    let config = GeneratorConfig {
        trigger_id: cli.trigger.clone(),
        ..Default::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("cvgen: {}", e);
        return ExitCode::from(2);
    }

    let mut generator = CvGenerator::new(&doc, config);

    if cli.json {
        return match serde_json::to_string_pretty(generator.record()) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("cvgen: failed to serialize record: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if generator.bound_control().is_none() {
        if !cli.force {
            eprintln!(
                "cvgen: the page has no #{} control (use --force to generate anyway)",
                cli.trigger
            );
            return ExitCode::FAILURE;
        }
        generator.bind(cli.trigger.clone());
    }

    let mut opener: Box<dyn SurfaceOpener> = if cli.stdout {
        Box::new(StdoutOpener)
    } else {
        Box::new(FileOpener::new(&cli.output))
    };
    let mut notifier = StderrNotifier;

    match generator.activate(&cli.trigger, opener.as_mut(), &mut notifier) {
        Some(outcome) if outcome.is_displayed() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
