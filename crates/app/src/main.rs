mod config;

use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{CohortId, QuizMode};
use services::{AppServices, Clock, CohortService};
use storage::catalog;
use storage::repository::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

use crate::config::{Command, Config, Invocation, prepare_sqlite_file, print_usage};

struct DesktopApp {
    services: AppServices,
    initial_grade: Option<CohortId>,
    initial_mode: QuizMode,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn cohort_service(&self) -> Arc<CohortService> {
        self.services.cohort_service()
    }

    fn initial_grade(&self) -> Option<CohortId> {
        self.initial_grade
    }

    fn initial_mode(&self) -> QuizMode {
        self.initial_mode
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let invocation = Config::parse(
        std::env::args().skip(1),
        |key| std::env::var(key).ok(),
        &cwd,
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let config = match invocation {
        Invocation::Help => {
            print_usage();
            return Ok(());
        }
        Invocation::Run(config) => config,
    };

    init_tracing(config.log_filter());
    prepare_sqlite_file(&config.db_url)?;

    match config.command {
        Command::Ui => {
            let services =
                AppServices::new_sqlite(&config.db_url, Clock::system(), config.shuffle).await?;
            info!(
                db = %config.db_url,
                mode = %config.mode,
                shuffle = config.shuffle,
                seeded = services.seeded_on_launch(),
                "launching quiz board"
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                initial_grade: config.grade,
                initial_mode: config.mode,
            });
            let context = build_app_context(&app);

            // Some tao setups default to an always-on-top window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Board")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let storage = Storage::sqlite(&config.db_url).await?;
            let written = catalog::seed(storage.cohorts.as_ref()).await?;
            println!("Seeded {written} cohorts into {}", config.db_url);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
