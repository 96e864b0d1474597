//! Humanizer CLI - rewrites prose to read less like generated text.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use humanizer::config::Config;
use humanizer::{HumanizeError, Humanizer, Options, Tone};
use rayon::prelude::*;
use similar::TextDiff;
use tracing_subscriber::{filter::LevelFilter, fmt};

/// Rewrites English prose by contracting phrases, varying sentence length
/// and shifting vocabulary toward a tone.
#[derive(Parser, Debug)]
#[command(name = "humanizer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s) to humanize. Use - for stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write the result back to the input file(s).
    #[arg(short, long)]
    write: bool,

    /// Print a unified diff instead of the result.
    #[arg(long, conflicts_with = "write")]
    diff: bool,

    /// Read input from stdin.
    #[arg(long)]
    stdin: bool,

    /// Tone of the output.
    #[arg(short, long, value_enum)]
    tone: Option<Tone>,

    /// Language code passed to the tagger.
    #[arg(short, long)]
    language: Option<String>,

    /// Seed for reproducible sentence merging.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a configuration file (default: discover .humanizer.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(log_level(&args));

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut options = config.to_options();
    if let Some(tone) = args.tone {
        options.tone = Some(tone);
    }
    if let Some(language) = &args.language {
        options.language = language.clone();
    }
    let seed = args.seed.or(config.seed);

    let files = if args.files.is_empty() && !args.stdin {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match config.collect_files(&cwd) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error collecting files: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        args.files.clone()
    };

    let use_stdin = args.stdin || files.is_empty() || files.iter().any(|f| f == Path::new("-"));
    if use_stdin {
        let mut input = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::FAILURE;
        }

        return match run(&input, &options, seed) {
            Ok(output) => {
                if args.diff {
                    print!("{}", unified_diff(&input, &output, "<stdin>"));
                } else {
                    println!("{}", output);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error humanizing: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let results: Vec<(&PathBuf, Result<(String, String), String>)> = files
        .par_iter()
        .enumerate()
        .map(|(index, file)| {
            let file_seed = seed.map(|s| s.wrapping_add(index as u64));
            (file, process_file(file, &options, file_seed))
        })
        .collect();

    let mut failed = false;
    for (file, result) in results {
        match result {
            Ok((input, output)) => {
                if args.diff {
                    print!("{}", unified_diff(&input, &output, &file.display().to_string()));
                } else if args.write {
                    if input != output {
                        if let Err(e) = fs::write(file, &output) {
                            eprintln!("Error writing {}: {}", file.display(), e);
                            failed = true;
                        }
                    }
                } else {
                    println!("{}", output);
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn log_level(args: &Args) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config, humanizer::config::ConfigError> {
    if let Some(path) = explicit {
        return Config::from_file(path);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn run(input: &str, options: &Options, seed: Option<u64>) -> Result<String, HumanizeError> {
    match seed {
        Some(seed) => Humanizer::seeded(options.clone(), seed).humanize(input),
        None => Humanizer::new(options.clone()).humanize(input),
    }
}

fn process_file(
    file: &Path,
    options: &Options,
    seed: Option<u64>,
) -> Result<(String, String), String> {
    let input = fs::read_to_string(file)
        .map_err(|e| format!("Error reading {}: {}", file.display(), e))?;
    let output = run(&input, options, seed)
        .map_err(|e| format!("Error humanizing {}: {}", file.display(), e))?;
    Ok((input, output))
}

fn unified_diff(input: &str, output: &str, name: &str) -> String {
    let output = format!("{}\n", output.trim_end());
    TextDiff::from_lines(input, output.as_str())
        .unified_diff()
        .header(name, name)
        .to_string()
}
