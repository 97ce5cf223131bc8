//! Writes the built-in grade catalog into a `SQLite` question source.

use std::fmt;

use storage::catalog;
use storage::repository::Storage;

const DEFAULT_DB_URL: &str = "sqlite:board.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue(&'static str),
    UnknownArg(String),
    EmptyDbUrl,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "{flag} requires a value"),
            Self::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            Self::EmptyDbUrl => f.write_str("--db must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

enum Mode {
    /// Upsert every cohort, replacing stored questions.
    Overwrite,
    /// Leave a populated database untouched.
    IfEmpty,
}

struct SeedArgs {
    db_url: String,
    mode: Mode,
}

const USAGE: &str = "\
Usage: seed [--db <sqlite_url>] [--if-empty]

  --db <sqlite_url>   target database (default: sqlite:board.sqlite3, env QUIZ_DB_URL)
  --if-empty          skip seeding when cohorts already exist
  -h, --help          show this help";

/// `Ok(None)` means help was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<SeedArgs>, ArgsError> {
    let mut seed = SeedArgs {
        db_url: std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.into()),
        mode: Mode::Overwrite,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--db"))?;
                if value.trim().is_empty() {
                    return Err(ArgsError::EmptyDbUrl);
                }
                seed.db_url = value;
            }
            "--if-empty" => seed.mode = Mode::IfEmpty,
            "--help" | "-h" => return Ok(None),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Some(seed))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = parse_args(std::env::args().skip(1)).inspect_err(|e| {
        eprintln!("{e}\n\n{USAGE}");
    })?
    else {
        eprintln!("{USAGE}");
        return Ok(());
    };

    let storage = Storage::sqlite(&args.db_url).await?;
    let written = match args.mode {
        Mode::Overwrite => catalog::seed(storage.cohorts.as_ref()).await?,
        Mode::IfEmpty => catalog::seed_if_empty(storage.cohorts.as_ref()).await?,
    };

    if written == 0 {
        println!("{} already holds cohorts; nothing written", args.db_url);
    } else {
        println!("Seeded {written} cohorts into {}", args.db_url);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
