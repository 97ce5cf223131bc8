use dioxus::prelude::*;
use tracing::debug;

use quiz_core::model::CohortId;
use services::QuizController;

use crate::context::AppContext;
use crate::views::grade_selector::GradeSelector;
use crate::views::home::BoardData;
use crate::views::papers::PaperDeck;
use crate::views::quiz_panel::QuizPanel;
use crate::vm::{map_cohort_cards, map_cohort_snapshot, map_paper_cards};

/// Grade picker, resources and the quiz panel for the active cohort.
///
/// The board owns the only [`QuizController`]. Its tick stream is pumped for
/// the lifetime of the component, so ticks always land on the session the
/// controller currently holds.
#[component]
pub fn QuizBoard(data: BoardData) -> Element {
    let ctx = use_context::<AppContext>();
    let initial = data.initial.clone();
    let mut active = use_signal(|| initial.clone());
    let mut controller =
        use_signal(move || QuizController::new(ctx.clock(), &initial, ctx.initial_mode()));

    use_future(move || async move {
        let ticks = controller.peek().tick_stream();
        while let Some(tick) = ticks.next().await {
            controller.write().on_tick(tick);
        }
    });

    let cohorts = data.cohorts.clone();
    let on_select = move |id: CohortId| {
        if active.peek().id() == id {
            return;
        }
        if let Some(cohort) = cohorts.iter().find(|c| c.id() == id) {
            debug!(cohort = %id, "grade selected");
            controller.write().switch_cohort(cohort);
            active.set(cohort.clone());
        }
    };

    let cohort = active.read().clone();
    let snapshot = map_cohort_snapshot(&cohort);
    let cards = map_cohort_cards(&data.cohorts, cohort.id());
    let papers = map_paper_cards(cohort.papers());
    let cohort_name = cohort.name().to_string();

    rsx! {
        div { class: "board",
            section { class: "cohort-snapshot",
                p { class: "eyebrow", "{snapshot.heading}" }
                ul {
                    for focus in snapshot.focus_preview.iter() {
                        li { key: "{focus}", "{focus}" }
                    }
                }
                p { class: "muted", "{snapshot.counts_label}" }
            }

            section { class: "grade-picker",
                header {
                    p { class: "eyebrow", "Choose your cohort" }
                    h2 { "Grade-specific channels" }
                }
                GradeSelector { cards, on_select }
            }

            section { class: "focus-stream",
                p { class: "eyebrow", "{cohort_name} focus stream" }
                div { class: "pill-row",
                    for focus in snapshot.focus_areas.iter() {
                        span { key: "{focus}", class: "pill", "{focus}" }
                    }
                }
            }

            section { class: "papers",
                header {
                    p { class: "eyebrow", "Question papers" }
                    h2 { "Download curated practice sets" }
                }
                PaperDeck { papers }
            }

            QuizPanel { controller }
        }
    }
}
