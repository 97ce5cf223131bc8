use dioxus::prelude::*;
use tracing::warn;

use quiz_core::model::{Cohort, CohortId};

use crate::context::AppContext;
use crate::views::board::QuizBoard;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Loaded cohorts plus the one to open first.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardData {
    pub cohorts: Vec<Cohort>,
    pub initial: Cohort,
}

impl BoardData {
    /// # Errors
    ///
    /// Returns `ViewError::EmptyCatalog` when there is nothing to show.
    pub fn from_cohorts(
        cohorts: Vec<Cohort>,
        preferred: Option<CohortId>,
    ) -> Result<Self, ViewError> {
        let initial = preferred
            .and_then(|id| cohorts.iter().find(|c| c.id() == id))
            .or_else(|| cohorts.first())
            .cloned()
            .ok_or(ViewError::EmptyCatalog)?;
        Ok(Self { cohorts, initial })
    }
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let cohort_service = ctx.cohort_service();
    let preferred = ctx.initial_grade();

    let mut resource = use_resource(move || {
        let cohort_service = cohort_service.clone();
        async move {
            let cohorts = cohort_service.list_cohorts().await.map_err(|err| {
                warn!(error = %err, "failed to load cohorts");
                ViewError::Unknown
            })?;
            BoardData::from_cohorts(cohorts, preferred)
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home",
            section { class: "hero",
                span { class: "badge", "FaceBond Telegram Board" }
                h1 { "Unified learning hub for grades 9 to 12" }
                p { class: "muted",
                    "Switch between grades, grab curated question papers, and launch timed or relaxed quizzes on demand."
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading grades…" }
                },
                ViewState::Ready(data) => rsx! {
                    QuizBoard { data }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-state",
                        p { "{err.message()}" }
                        button {
                            r#type: "button",
                            class: "btn",
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionBank;

    fn cohort(grade: u64) -> Cohort {
        Cohort::new(
            CohortId::new(grade),
            format!("Grade {grade}"),
            "",
            Vec::new(),
            Vec::new(),
            QuestionBank::default(),
        )
        .unwrap()
    }

    #[test]
    fn preferred_grade_wins_when_present() {
        let data = BoardData::from_cohorts(vec![cohort(9), cohort(11)], Some(CohortId::new(11)))
            .unwrap();
        assert_eq!(data.initial.id(), CohortId::new(11));
    }

    #[test]
    fn unknown_preference_falls_back_to_first() {
        let data = BoardData::from_cohorts(vec![cohort(9), cohort(11)], Some(CohortId::new(5)))
            .unwrap();
        assert_eq!(data.initial.id(), CohortId::new(9));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert_eq!(
            BoardData::from_cohorts(Vec::new(), None).unwrap_err(),
            ViewError::EmptyCatalog
        );
    }
}
