use dioxus::prelude::*;

use quiz_core::model::CohortId;

use crate::vm::CohortCardVm;

#[component]
pub fn GradeSelector(cards: Vec<CohortCardVm>, on_select: EventHandler<CohortId>) -> Element {
    rsx! {
        div { class: "grade-grid",
            for card in cards {
                button {
                    key: "{card.id}",
                    r#type: "button",
                    class: card.class(),
                    onclick: move |_| on_select.call(card.id),
                    div { class: "grade-card__head",
                        span { class: "eyebrow", "{card.grade_label}" }
                        span { class: "muted", "{card.quizzes_label}" }
                    }
                    p { class: "grade-card__title", "{card.title}" }
                    p { class: "grade-card__summary", "{card.summary}" }
                    div { class: "pill-row",
                        for focus in card.focus_pills.iter() {
                            span { key: "{focus}", class: "pill", "{focus}" }
                        }
                    }
                }
            }
        }
    }
}
