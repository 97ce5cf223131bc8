use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Question, QuestionId, QuizMode};

use super::summary::QuizSummary;

/// Length of a timed sprint, in seconds.
pub const SPRINT_DURATION_SECS: u32 = 90;

const SPRINT_DURATION: NonZeroU32 = match NonZeroU32::new(SPRINT_DURATION_SECS) {
    Some(secs) => secs,
    None => panic!("sprint duration must be non-zero"),
};

//
// ─── PUBLIC STATE TYPES ────────────────────────────────────────────────────────
//

/// Identity of a session. Every session an engine creates gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionGeneration(u64);

impl SessionGeneration {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Mode-independent view of where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionReason {
    /// The user finalized the session.
    Submitted,
    /// The sprint countdown reached zero.
    Expired,
}

/// Result of delivering one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick targeted a session that has since been replaced.
    Stale,
    /// The session is not a running timed session.
    Ignored,
    Counted { remaining: u32 },
    /// The countdown ran out and the session completed in this transition.
    Expired,
}

//
// ─── INTERNAL PHASES ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PracticePhase {
    Idle,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimedPhase {
    Idle,
    // A running sprint always has time left; reaching zero completes it.
    Running { remaining: NonZeroU32 },
    Completed(CompletionReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Practice(PracticePhase),
    Timed(TimedPhase),
}

impl SessionState {
    fn idle(mode: QuizMode) -> Self {
        match mode {
            QuizMode::Practice => Self::Practice(PracticePhase::Idle),
            QuizMode::Timed => Self::Timed(TimedPhase::Idle),
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt over a fixed question sequence.
///
/// Invalid intents (answering before start, navigating past either end,
/// submitting twice) leave the session untouched and return `false`.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizSession {
    generation: SessionGeneration,
    questions: Arc<[Question]>,
    state: SessionState,
    current: usize,
    selections: Vec<Option<usize>>,
    score: usize,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create an idle session bound to `questions`.
    ///
    /// `questions` should be the sequence the cohort's bank binds to `mode`.
    #[must_use]
    pub fn new(generation: SessionGeneration, mode: QuizMode, questions: Arc<[Question]>) -> Self {
        let selections = vec![None; questions.len()];
        Self {
            generation,
            questions,
            state: SessionState::idle(mode),
            current: 0,
            selections,
            score: 0,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        match self.state {
            SessionState::Practice(_) => QuizMode::Practice,
            SessionState::Timed(_) => QuizMode::Timed,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Practice(PracticePhase::Idle)
            | SessionState::Timed(TimedPhase::Idle) => Phase::Idle,
            SessionState::Practice(PracticePhase::Active)
            | SessionState::Timed(TimedPhase::Running { .. }) => Phase::Active,
            SessionState::Practice(PracticePhase::Completed)
            | SessionState::Timed(TimedPhase::Completed(_)) => Phase::Completed,
        }
    }

    #[must_use]
    pub fn completion_reason(&self) -> Option<CompletionReason> {
        match self.state {
            SessionState::Practice(PracticePhase::Completed) => Some(CompletionReason::Submitted),
            SessionState::Timed(TimedPhase::Completed(reason)) => Some(reason),
            _ => None,
        }
    }

    /// True once the user has begun answering (stays true after completion).
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase() != Phase::Idle
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase() == Phase::Active
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase() == Phase::Completed
    }

    /// Seconds left on the sprint; always 0 in practice mode or once completed.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        match self.state {
            SessionState::Timed(TimedPhase::Idle) => SPRINT_DURATION.get(),
            SessionState::Timed(TimedPhase::Running { remaining }) => remaining.get(),
            SessionState::Timed(TimedPhase::Completed(_)) | SessionState::Practice(_) => 0,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The displayed question, or `None` for an empty sequence.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Option index chosen for the question at `index`, if answered.
    #[must_use]
    pub fn selection_at(&self, index: usize) -> Option<usize> {
        self.selections.get(index).copied().flatten()
    }

    /// Option text chosen for the question with `id`, if answered.
    #[must_use]
    pub fn selection_for(&self, id: QuestionId) -> Option<&str> {
        let index = self.questions.iter().position(|q| q.id() == id)?;
        let choice = self.selection_at(index)?;
        self.questions[index].options().get(choice).map(String::as_str)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.selections.iter().filter(|choice| choice.is_some()).count()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.total() - self.answered()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Idle → Active. Arms the sprint countdown in timed mode.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.questions.is_empty() {
            return false;
        }
        self.state = match self.state {
            SessionState::Practice(PracticePhase::Idle) => {
                SessionState::Practice(PracticePhase::Active)
            }
            SessionState::Timed(TimedPhase::Idle) => SessionState::Timed(TimedPhase::Running {
                remaining: SPRINT_DURATION,
            }),
            _ => return false,
        };
        self.started_at = Some(now);
        true
    }

    /// Count down one second of a running sprint.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let SessionState::Timed(TimedPhase::Running { remaining }) = self.state else {
            return TickOutcome::Ignored;
        };
        match NonZeroU32::new(remaining.get() - 1) {
            Some(remaining) => {
                self.state = SessionState::Timed(TimedPhase::Running { remaining });
                TickOutcome::Counted {
                    remaining: remaining.get(),
                }
            }
            None => {
                self.complete(CompletionReason::Expired, now);
                TickOutcome::Expired
            }
        }
    }

    /// Record `option` for the current question. Unknown option text is ignored.
    pub fn select(&mut self, option: &str) -> bool {
        match self.current_question().and_then(|q| q.option_index(option)) {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    /// Record the option at `option_index` for the current question,
    /// replacing any earlier choice and adjusting the score.
    pub fn select_index(&mut self, option_index: usize) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if option_index >= question.options().len() {
            return false;
        }

        let previous = self.selections[self.current].replace(option_index);
        let was_correct = previous.is_some_and(|choice| question.is_correct(choice));
        let is_correct = question.is_correct(option_index);
        match (was_correct, is_correct) {
            (false, true) => self.score += 1,
            (true, false) => self.score -= 1,
            _ => {}
        }
        true
    }

    /// Move one question forward or back; stops at either end.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Next => self.current.checked_add(1),
            Direction::Previous => self.current.checked_sub(1),
        };
        match target {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.questions.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Active → Completed. Selections are kept; the score freezes.
    pub fn submit(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.complete(CompletionReason::Submitted, now);
        true
    }

    /// Result of a finished session.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let reason = self.completion_reason()?;
        Some(QuizSummary {
            generation: self.generation,
            mode: self.mode(),
            reason,
            score: self.score,
            total: self.total(),
            answered: self.answered(),
            started_at: self.started_at?,
            completed_at: self.completed_at?,
        })
    }

    fn complete(&mut self, reason: CompletionReason, now: DateTime<Utc>) {
        self.state = match self.state {
            SessionState::Practice(_) => SessionState::Practice(PracticePhase::Completed),
            SessionState::Timed(_) => SessionState::Timed(TimedPhase::Completed(reason)),
        };
        self.completed_at = Some(now);
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("generation", &self.generation)
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answered())
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
