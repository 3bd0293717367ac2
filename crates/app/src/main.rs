mod content;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use services::{Clock, DrillService};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use ui::{Console, run_app};

const DEFAULT_PROGRESS_PATH: &str = "progress_b2.json";
const PROGRESS_ENV: &str = "DRILL_PROGRESS_PATH";
const CONTENT_ENV: &str = "DRILL_CONTENT_PATH";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyPath { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(value))
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  deutsch-b2 [--progress <path>] [--content <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --progress {DEFAULT_PROGRESS_PATH}");
    eprintln!("  --content  built-in B2 corpus");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {PROGRESS_ENV}, {CONTENT_ENV}, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    progress_path: PathBuf,
    content_path: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
}

impl Args {
    /// Flags win over environment variables, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut progress_path = env(PROGRESS_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PROGRESS_PATH), PathBuf::from);
        let mut content_path = env(CONTENT_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--progress" => progress_path = require_path(args, "--progress")?,
                "--content" => content_path = Some(require_path(args, "--content")?),
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Run(Self {
            progress_path,
            content_path,
        }))
    }
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the drill on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Command::Run(args) => args,
        Command::Help => {
            print_usage();
            return Ok(());
        }
    };

    let catalog = Arc::new(content::load_catalog(args.content_path.as_deref())?);
    let storage = Storage::json_file(&args.progress_path);
    tracing::debug!(path = %args.progress_path.display(), "using progress file");

    let mut drill = DrillService::new(catalog, storage.progress, Clock::system());
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut rng = rand::rng();

    run_app(&mut console, &mut drill, &mut rng)?;
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_owned());
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        assert_eq!(
            parse(&[], &[]).unwrap(),
            Command::Run(Args {
                progress_path: PathBuf::from("progress_b2.json"),
                content_path: None,
            })
        );
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = [
            (PROGRESS_ENV, "/tmp/env.json"),
            (CONTENT_ENV, "/tmp/content.json"),
        ];
        assert_eq!(
            parse(&[], &env).unwrap(),
            Command::Run(Args {
                progress_path: PathBuf::from("/tmp/env.json"),
                content_path: Some(PathBuf::from("/tmp/content.json")),
            })
        );
        assert_eq!(
            parse(&["--progress", "/tmp/flag.json"], &env).unwrap(),
            Command::Run(Args {
                progress_path: PathBuf::from("/tmp/flag.json"),
                content_path: Some(PathBuf::from("/tmp/content.json")),
            })
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["--help", "--bogus"], &[]).unwrap(), Command::Help);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert_eq!(
            parse(&["--progress"], &[]).unwrap_err(),
            ArgsError::MissingValue { flag: "--progress" }
        );
        assert_eq!(
            parse(&["--content", " "], &[]).unwrap_err(),
            ArgsError::EmptyPath { flag: "--content" }
        );
        assert_eq!(
            parse(&["--db", "x"], &[]).unwrap_err(),
            ArgsError::UnknownArg("--db".into())
        );
    }
}
