use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::{Cohort, CohortId, QuizMode};
use quiz_core::time::fixed_clock;
use services::QuizController;
use storage::catalog;
use storage::repository::{CohortRepository, InMemoryRepository, StorageError};

use super::QuizPanel;
use super::test_harness::{drive_dom, setup_board_harness, setup_board_harness_with_repo};

#[tokio::test(flavor = "current_thread")]
async fn board_smoke_renders_first_grade_by_default() {
    let mut harness = setup_board_harness(None, QuizMode::Practice).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Grade 9 Snapshot"), "missing snapshot in {html}");
    assert!(html.contains("Cohort 12"), "missing grade card in {html}");
    assert!(html.contains("Algebra Foundations Term Test"), "missing paper in {html}");
    assert!(html.contains("Download Paper"), "missing download link in {html}");
    assert!(html.contains("Practice Flow"), "missing quiz title in {html}");
    assert!(html.contains("Question 1/5"), "missing progress in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(!html.contains("⏱"), "timer shown before start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_smoke_honours_initial_grade_and_mode() {
    let mut harness = setup_board_harness(Some(CohortId::new(11)), QuizMode::Timed).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Grade 11 Snapshot"), "missing snapshot in {html}");
    assert!(html.contains("Motion and Forces Paper"), "missing paper in {html}");
    assert!(html.contains("Timed Sprint Quiz"), "missing quiz title in {html}");
    assert!(html.contains("Question 1/4"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_smoke_renders_empty_catalog_message() {
    let mut harness = setup_board_harness_with_repo(
        Arc::new(InMemoryRepository::new()),
        None,
        QuizMode::Practice,
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No grades are available yet"), "missing message in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

struct FailingCohortRepo;

#[async_trait::async_trait]
impl CohortRepository for FailingCohortRepo {
    async fn upsert_cohort(&self, _cohort: &Cohort) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_cohort(&self, _id: CohortId) -> Result<Option<Cohort>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_cohorts(&self) -> Result<Vec<Cohort>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn board_smoke_renders_error_state() {
    let mut harness =
        setup_board_harness_with_repo(Arc::new(FailingCohortRepo), None, QuizMode::Practice);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[derive(Props, Clone, PartialEq)]
struct PanelHarnessProps {
    cohort: Cohort,
    answer_index: usize,
}

#[component]
fn SubmittedPanel(props: PanelHarnessProps) -> Element {
    let controller = use_signal(|| {
        let mut controller = QuizController::new(fixed_clock(), &props.cohort, QuizMode::Practice);
        controller.start();
        controller.select_index(props.answer_index);
        controller.submit();
        controller
    });
    rsx! { QuizPanel { controller } }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_panel_smoke_renders_submitted_result() {
    let cohort = catalog::default_catalog().unwrap().remove(0);
    // "4" is the second option of the first grade 9 practice question.
    let mut dom = VirtualDom::new_with_props(
        SubmittedPanel,
        PanelHarnessProps {
            cohort,
            answer_index: 1,
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Completed"), "missing completed state in {html}");
    assert!(html.contains("Restart"), "missing restart control in {html}");
    assert!(html.contains("1/5"), "missing score in {html}");
    assert!(html.contains("Submitted after 0:00 (20%)"), "missing outcome in {html}");
    assert!(html.contains("quiz-option--correct"), "missing correct marker in {html}");
    assert!(html.contains("<code>2x = 8</code>"), "missing explanation in {html}");
}
