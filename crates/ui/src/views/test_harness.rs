use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{CohortId, QuizMode};
use quiz_core::time::fixed_clock;
use services::{Clock, CohortService};
use storage::catalog;
use storage::repository::{CohortRepository, InMemoryRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::HomeView;

#[derive(Clone)]
struct TestApp {
    clock: Clock,
    cohort_service: Arc<CohortService>,
    initial_grade: Option<CohortId>,
    initial_mode: QuizMode,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn cohort_service(&self) -> Arc<CohortService> {
        Arc::clone(&self.cohort_service)
    }

    fn initial_grade(&self) -> Option<CohortId> {
        self.initial_grade
    }

    fn initial_mode(&self) -> QuizMode {
        self.initial_mode
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { HomeView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Board harness over the built-in catalog.
pub async fn setup_board_harness(
    initial_grade: Option<CohortId>,
    initial_mode: QuizMode,
) -> ViewHarness {
    let repo = InMemoryRepository::new();
    catalog::seed(&repo).await.expect("seed catalog");
    setup_board_harness_with_repo(Arc::new(repo), initial_grade, initial_mode)
}

pub fn setup_board_harness_with_repo(
    cohorts: Arc<dyn CohortRepository>,
    initial_grade: Option<CohortId>,
    initial_mode: QuizMode,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        clock: fixed_clock(),
        cohort_service: Arc::new(CohortService::new(cohorts)),
        initial_grade,
        initial_mode,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app });
    ViewHarness { dom }
}
