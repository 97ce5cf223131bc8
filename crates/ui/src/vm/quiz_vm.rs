use quiz_core::model::QuizMode;
use quiz_core::quiz::{CompletionReason, QuizSnapshot, QuizSummary};

use super::markdown_vm::markdown_to_html;
use super::time_fmt::{format_countdown, format_elapsed};

/// Remaining seconds at or below which the countdown is shown as urgent.
pub const URGENT_THRESHOLD_SECS: u32 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Incorrect,
    /// The right answer, shown after completion when it was not chosen.
    Revealed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "quiz-option",
            Self::Selected => "quiz-option quiz-option--selected",
            Self::Correct => "quiz-option quiz-option--correct",
            Self::Incorrect => "quiz-option quiz-option--incorrect",
            Self::Revealed => "quiz-option quiz-option--revealed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Start,
    Submit,
    Completed,
}

impl PrimaryAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Quiz",
            Self::Submit => "Submit",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeTabVm {
    pub mode: QuizMode,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub label: String,
    pub urgent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub text: String,
    pub state: OptionState,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub prompt: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_label: String,
    pub outcome_label: Option<String>,
    pub explanation_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavCellVm {
    pub index: usize,
    pub label: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestRowVm {
    pub label: &'static str,
    pub value: String,
}

/// Everything the quiz panel renders, derived from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizPanelVm {
    pub title: &'static str,
    pub mode_tabs: Vec<ModeTabVm>,
    pub progress_label: String,
    pub timer: Option<TimerVm>,
    pub question: Option<QuestionCardVm>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub primary: PrimaryAction,
    pub primary_enabled: bool,
    /// A finished quiz can be taken again from the first question.
    pub can_restart: bool,
    pub result: Option<ResultVm>,
    pub navigator: Vec<NavCellVm>,
    pub digest: Vec<DigestRowVm>,
}

#[must_use]
pub fn mode_tab_label(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Practice => "Normal Quiz",
        QuizMode::Timed => "Timed Quiz",
    }
}

fn mode_digest_label(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Practice => "Practice",
        QuizMode::Timed => "Timed sprint",
    }
}

#[must_use]
pub fn map_quiz_panel(snapshot: &QuizSnapshot, summary: Option<&QuizSummary>) -> QuizPanelVm {
    let title = match snapshot.mode {
        QuizMode::Practice => "Practice Flow",
        QuizMode::Timed => "Timed Sprint Quiz",
    };

    let mode_tabs = QuizMode::ALL
        .iter()
        .map(|&mode| ModeTabVm {
            mode,
            label: mode_tab_label(mode),
            active: mode == snapshot.mode,
        })
        .collect();

    let progress_label = if snapshot.has_question() {
        format!("Question {}/{}", snapshot.current_index + 1, snapshot.total)
    } else {
        "No questions available for this mode".to_string()
    };

    let timer = snapshot
        .remaining_secs
        .filter(|_| snapshot.started)
        .map(|secs| TimerVm {
            label: format_countdown(secs),
            urgent: secs <= URGENT_THRESHOLD_SECS,
        });

    let locked = !snapshot.started || snapshot.completed;
    let question = snapshot.question.as_ref().map(|q| QuestionCardVm {
        prompt: q.prompt.clone(),
        options: q
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| OptionVm {
                index,
                text: option.text.clone(),
                state: match (option.selected, option.correct) {
                    (true, Some(true)) => OptionState::Correct,
                    (true, Some(false)) => OptionState::Incorrect,
                    (true, None) => OptionState::Selected,
                    (false, Some(true)) => OptionState::Revealed,
                    (false, _) => OptionState::Idle,
                },
                disabled: locked,
            })
            .collect(),
    });

    let primary = if snapshot.completed {
        PrimaryAction::Completed
    } else if snapshot.started {
        PrimaryAction::Submit
    } else {
        PrimaryAction::Start
    };
    let primary_enabled = match primary {
        PrimaryAction::Start => snapshot.has_question(),
        PrimaryAction::Submit => true,
        PrimaryAction::Completed => false,
    };

    let result = snapshot.completed.then(|| ResultVm {
        score_label: format!("{}/{}", snapshot.score, snapshot.total),
        outcome_label: summary.map(|s| {
            let reason = match s.reason {
                CompletionReason::Submitted => "Submitted",
                CompletionReason::Expired => "Time's up",
            };
            format!("{reason} after {} ({}%)", format_elapsed(s.elapsed()), s.percent())
        }),
        explanation_html: snapshot
            .question
            .as_ref()
            .and_then(|q| q.explanation.as_deref())
            .filter(|text| !text.trim().is_empty())
            .map(markdown_to_html),
    });

    let navigator = snapshot
        .navigator
        .iter()
        .map(|cell| NavCellVm {
            index: cell.index,
            label: (cell.index + 1).to_string(),
            class: match (cell.current, cell.answered) {
                (true, _) => "nav-cell nav-cell--current",
                (false, true) => "nav-cell nav-cell--answered",
                (false, false) => "nav-cell",
            },
        })
        .collect();

    let digest = vec![
        DigestRowVm {
            label: "Mode",
            value: mode_digest_label(snapshot.mode).to_string(),
        },
        DigestRowVm {
            label: "Answered",
            value: snapshot.answered.to_string(),
        },
        DigestRowVm {
            label: "Pending",
            value: snapshot.pending.to_string(),
        },
        DigestRowVm {
            label: "Score",
            value: snapshot.score.to_string(),
        },
    ];

    QuizPanelVm {
        title,
        mode_tabs,
        progress_label,
        timer,
        question,
        can_go_previous: snapshot.has_question() && !snapshot.is_first(),
        can_go_next: snapshot.has_question() && !snapshot.is_last(),
        primary,
        primary_enabled,
        can_restart: snapshot.completed,
        result,
        navigator,
        digest,
    }
}
