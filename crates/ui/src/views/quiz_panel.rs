use dioxus::prelude::*;

use quiz_core::quiz::Direction;
use services::QuizController;

use crate::vm::{PrimaryAction, map_quiz_panel};

#[component]
pub fn QuizPanel(controller: Signal<QuizController>) -> Element {
    let mut controller = controller;
    let vm = {
        let guard = controller.read();
        map_quiz_panel(&guard.snapshot(), guard.summary().as_ref())
    };
    let primary = vm.primary;

    rsx! {
        section { class: "quiz-panel",
            header { class: "quiz-panel__head",
                div {
                    p { class: "eyebrow", "Quiz center" }
                    h2 { "{vm.title}" }
                }
                div { class: "mode-tabs",
                    for tab in vm.mode_tabs.iter().cloned() {
                        button {
                            key: "{tab.label}",
                            r#type: "button",
                            class: if tab.active { "mode-tab mode-tab--active" } else { "mode-tab" },
                            onclick: move |_| {
                                controller.write().switch_mode(tab.mode);
                            },
                            "{tab.label}"
                        }
                    }
                }
            }

            div { class: "quiz-panel__status",
                span { class: "progress", "{vm.progress_label}" }
                if let Some(timer) = vm.timer.as_ref() {
                    span {
                        class: if timer.urgent { "timer timer--urgent" } else { "timer" },
                        "{timer.label}"
                    }
                }
            }

            if let Some(question) = vm.question.as_ref() {
                div { class: "question-card",
                    p { class: "question-card__prompt", "{question.prompt}" }
                    div { class: "question-card__options",
                        for option in question.options.iter().cloned() {
                            button {
                                key: "{option.index}",
                                r#type: "button",
                                class: option.state.class(),
                                disabled: option.disabled,
                                onclick: move |_| {
                                    controller.write().select_index(option.index);
                                },
                                "{option.text}"
                            }
                        }
                    }
                }
            }

            div { class: "quiz-panel__actions",
                button {
                    r#type: "button",
                    class: "btn btn--ghost",
                    disabled: !vm.can_go_previous,
                    onclick: move |_| {
                        controller.write().navigate(Direction::Previous);
                    },
                    "Previous"
                }
                button {
                    r#type: "button",
                    class: "btn btn--primary",
                    disabled: !vm.primary_enabled,
                    onclick: move |_| {
                        match primary {
                            PrimaryAction::Start => {
                                controller.write().start();
                            }
                            PrimaryAction::Submit => {
                                controller.write().submit();
                            }
                            PrimaryAction::Completed => {}
                        }
                    },
                    "{primary.label()}"
                }
                button {
                    r#type: "button",
                    class: "btn btn--ghost",
                    disabled: !vm.can_go_next,
                    onclick: move |_| {
                        controller.write().navigate(Direction::Next);
                    },
                    "Next"
                }
                if vm.can_restart {
                    button {
                        r#type: "button",
                        class: "btn",
                        onclick: move |_| {
                            controller.write().reset();
                        },
                        "Restart"
                    }
                }
            }

            if let Some(result) = vm.result.as_ref() {
                div { class: "quiz-result",
                    p {
                        "Score: "
                        span { class: "score", "{result.score_label}" }
                    }
                    if let Some(outcome) = result.outcome_label.as_ref() {
                        p { class: "muted", "{outcome}" }
                    }
                    if let Some(html) = result.explanation_html.as_ref() {
                        div { class: "explanation", dangerous_inner_html: "{html}" }
                    }
                }
            }

            nav { class: "navigator",
                for cell in vm.navigator.iter().cloned() {
                    button {
                        key: "{cell.index}",
                        r#type: "button",
                        class: cell.class,
                        onclick: move |_| {
                            controller.write().jump_to(cell.index);
                        },
                        "{cell.label}"
                    }
                }
            }

            dl { class: "digest",
                for row in vm.digest.iter() {
                    div { key: "{row.label}", class: "digest__row",
                        dt { "{row.label}" }
                        dd { "{row.value}" }
                    }
                }
            }
        }
    }
}
