use std::fmt;
use std::path::{Path, PathBuf};

use quiz_core::model::{CohortId, QuizMode};

pub const DEFAULT_DB_URL: &str = "sqlite://board.sqlite3";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidGrade { raw: String },
    InvalidMode { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidGrade { raw } => write!(f, "invalid --grade value: {raw}"),
            ArgsError::InvalidMode { raw } => {
                write!(f, "invalid --mode value: {raw} (expected practice or timed)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

/// What `run` should do after parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(Config),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub db_url: String,
    pub grade: Option<CohortId>,
    pub mode: QuizMode,
    pub shuffle: bool,
    pub verbose: bool,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui]  [options]");
    eprintln!("  cargo run -p app -- seed  [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: {DEFAULT_DB_URL})");
    eprintln!("  --grade <n>               Grade to open first (default: lowest grade)");
    eprintln!("  --mode <practice|timed>   Initial quiz mode (default: practice)");
    eprintln!("  --shuffle                 Shuffle question order on load");
    eprintln!("  -v, --verbose             Debug logging (RUST_LOG overrides)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_GRADE, QUIZ_MODE, QUIZ_SHUFFLE=1, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_grade(raw: String) -> Result<CohortId, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(CohortId::new)
        .map_err(|_| ArgsError::InvalidGrade { raw })
}

fn parse_mode(raw: String) -> Result<QuizMode, ArgsError> {
    raw.parse::<QuizMode>()
        .map_err(|_| ArgsError::InvalidMode { raw })
}

fn parse_db_url(raw: String, cwd: &Path) -> Result<String, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw });
    }
    Ok(normalize_sqlite_url(&raw, cwd))
}

fn env_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1" | "true" | "yes" | "on")
    )
}

impl Config {
    /// Parse `argv` (without the program name), falling back to `env` for
    /// anything the flags leave unset.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags or invalid values, including
    /// invalid values coming from the environment.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Invocation, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let command = match args.peek().map(String::as_str) {
            None => Command::Ui,
            Some(first) if first.starts_with('-') => Command::Ui,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                args.next();
                command
            }
        };

        let mut db_url = env("QUIZ_DB_URL")
            .map(|raw| parse_db_url(raw, cwd))
            .transpose()?
            .unwrap_or_else(|| normalize_sqlite_url(DEFAULT_DB_URL, cwd));
        let mut grade = env("QUIZ_GRADE").map(parse_grade).transpose()?;
        let mut mode = env("QUIZ_MODE")
            .map(parse_mode)
            .transpose()?
            .unwrap_or(QuizMode::Practice);
        let mut shuffle = env_flag(env("QUIZ_SHUFFLE"));
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = parse_db_url(require_value(&mut args, "--db")?, cwd)?,
                "--grade" if command == Command::Ui => {
                    grade = Some(parse_grade(require_value(&mut args, "--grade")?)?);
                }
                "--mode" if command == Command::Ui => {
                    mode = parse_mode(require_value(&mut args, "--mode")?)?;
                }
                "--shuffle" if command == Command::Ui => shuffle = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Ok(Invocation::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Invocation::Run(Self {
            command,
            db_url,
            grade,
            mode,
            shuffle,
            verbose,
        }))
    }

    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Turn `sqlite:relative.db` style URLs into absolute `sqlite://` URLs.
#[must_use]
pub fn normalize_sqlite_url(raw: &str, cwd: &Path) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let path = Path::new(path_str);
    let absolute: PathBuf = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

/// Make sure the database file and its directory exist before connecting.
///
/// # Errors
///
/// Returns an error when the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Invocation, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::parse(
            args.iter().map(|s| (*s).to_string()),
            |key| env.get(key).cloned(),
            Path::new("/work"),
        )
    }

    fn config(args: &[&str], env: &[(&str, &str)]) -> Config {
        match parse(args, env).unwrap() {
            Invocation::Run(config) => config,
            Invocation::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults_launch_the_ui() {
        let config = config(&[], &[]);
        assert_eq!(config.command, Command::Ui);
        assert_eq!(config.db_url, "sqlite:///work/board.sqlite3");
        assert_eq!(config.grade, None);
        assert_eq!(config.mode, QuizMode::Practice);
        assert!(!config.shuffle);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn flags_override_environment() {
        let config = config(
            &["ui", "--grade", "11", "--mode", "timed", "--db", "data/q.db", "-v"],
            &[("QUIZ_GRADE", "9"), ("QUIZ_MODE", "practice"), ("QUIZ_SHUFFLE", "1")],
        );
        assert_eq!(config.grade, Some(CohortId::new(11)));
        assert_eq!(config.mode, QuizMode::Timed);
        assert_eq!(config.db_url, "sqlite:///work/data/q.db");
        assert!(config.shuffle);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn environment_values_are_validated() {
        assert_eq!(
            parse(&[], &[("QUIZ_MODE", "marathon")]).unwrap_err(),
            ArgsError::InvalidMode {
                raw: "marathon".into()
            }
        );
        assert_eq!(
            parse(&[], &[("QUIZ_GRADE", "nine")]).unwrap_err(),
            ArgsError::InvalidGrade { raw: "nine".into() }
        );
    }

    #[test]
    fn seed_rejects_ui_only_flags() {
        assert_eq!(config(&["seed"], &[]).command, Command::Seed);
        assert_eq!(
            parse(&["seed", "--grade", "9"], &[]).unwrap_err(),
            ArgsError::UnknownArg("--grade".into())
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse(&["serve"], &[]).unwrap_err(),
            ArgsError::UnknownCommand("serve".into())
        );
        assert_eq!(
            parse(&["--db"], &[]).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
        assert_eq!(parse(&["--help"], &[]).unwrap(), Invocation::Help);
    }

    #[test]
    fn sqlite_urls_become_absolute() {
        let cwd = Path::new("/work");
        assert_eq!(
            normalize_sqlite_url("sqlite:board.sqlite3", cwd),
            "sqlite:///work/board.sqlite3"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/a.db?mode=rwc", cwd),
            "sqlite:///tmp/a.db?mode=rwc"
        );
        assert_eq!(normalize_sqlite_url("sqlite::memory:", cwd), "sqlite::memory:");
    }
}
