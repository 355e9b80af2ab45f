use clap::Parser;
use crossterm::style::Stylize;
use pun_core::core::loader::phrase_words;
use pun_core::graph::write_dot;
use pun_core::{PunConfig, PunEngine};
use std::io::{stdout, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Finds words and phrases that sound like the given phrase.
#[derive(Parser)]
#[command(name = "pun_engine", version)]
struct Args {
    /// The phrase to generate puns for
    phrase: String,

    /// Write a graph file (DOT format) of the possible puns to GRAPH
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Pronunciation dictionary in cmudict format
    #[arg(short, long)]
    dict: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Binary snapshot of the parsed dictionary, created if missing
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Refuse phrases longer than this many phonemes
    #[arg(long)]
    max_phonemes: Option<usize>,

    /// Print the phonetic similarity between PHRASE and COMPARE instead of puns
    #[arg(long)]
    compare: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> pun_core::Result<PunConfig> {
    let mut config = match &args.config {
        Some(path) => PunConfig::from_file(path)?,
        None => PunConfig::default(),
    };
    if let Some(dict) = &args.dict {
        config.dictionary_path = dict.clone();
    }
    if let Some(snapshot) = &args.snapshot {
        config.snapshot_path = Some(snapshot.clone());
    }
    if args.max_phonemes.is_some() {
        config.max_sequence_len = args.max_phonemes;
    }
    Ok(config)
}

fn run(args: &Args) -> pun_core::Result<()> {
    let config = load_config(args)?;
    let mut engine = PunEngine::open(&config)?;

    if let Some(other) = &args.compare {
        let score = engine.phrase_similarity(&args.phrase, other)?;
        println!("{:.4}", score);
        return Ok(());
    }

    let puns = engine.generate_puns(&args.phrase)?;
    let original = phrase_words(&args.phrase).join(" ");
    let styled = stdout().is_terminal();

    let mut out = stdout().lock();
    for pun in &puns {
        if styled && *pun == original {
            writeln!(out, "{}", pun.as_str().bold().green())?;
        } else {
            writeln!(out, "{}", pun)?;
        }
    }
    out.flush()?;

    if let Some(graph_path) = &args.graph {
        write_dot(&puns, graph_path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}
