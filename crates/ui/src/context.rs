use std::sync::Arc;

use quiz_core::model::{CohortId, QuizMode};
use services::{Clock, CohortService};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn cohort_service(&self) -> Arc<CohortService>;

    /// Grade to open on launch; `None` picks the first cohort.
    fn initial_grade(&self) -> Option<CohortId>;
    fn initial_mode(&self) -> QuizMode;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    cohort_service: Arc<CohortService>,
    initial_grade: Option<CohortId>,
    initial_mode: QuizMode,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            cohort_service: app.cohort_service(),
            initial_grade: app.initial_grade(),
            initial_mode: app.initial_mode(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn cohort_service(&self) -> Arc<CohortService> {
        Arc::clone(&self.cohort_service)
    }

    #[must_use]
    pub fn initial_grade(&self) -> Option<CohortId> {
        self.initial_grade
    }

    #[must_use]
    pub fn initial_mode(&self) -> QuizMode {
        self.initial_mode
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
