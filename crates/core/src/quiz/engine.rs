use crate::model::{Cohort, CohortId, QuestionBank, QuizMode};
use crate::time::Clock;

use super::session::{Direction, QuizSession, SessionGeneration, TickOutcome};
use super::snapshot::QuizSnapshot;
use super::summary::QuizSummary;

/// Owns the active quiz session for one cohort and replaces it wholesale on
/// every mode or cohort switch.
///
/// Each replacement gets a fresh [`SessionGeneration`]; ticks carry the
/// generation they were scheduled for, so a tick aimed at a superseded session
/// can never touch the current one.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    clock: Clock,
    cohort_id: CohortId,
    bank: QuestionBank,
    session: QuizSession,
}

impl QuizEngine {
    #[must_use]
    pub fn new(clock: Clock, cohort_id: CohortId, bank: QuestionBank, mode: QuizMode) -> Self {
        let generation = SessionGeneration::new(1);
        let session = QuizSession::new(generation, mode, bank.questions(mode));
        Self {
            clock,
            cohort_id,
            bank,
            session,
        }
    }

    #[must_use]
    pub fn for_cohort(clock: Clock, cohort: &Cohort, mode: QuizMode) -> Self {
        Self::new(clock, cohort.id(), cohort.bank().clone(), mode)
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.session.generation()
    }

    #[must_use]
    pub fn cohort_id(&self) -> CohortId {
        self.cohort_id
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.session.mode()
    }

    #[cfg(test)]
    fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn start(&mut self) -> bool {
        let now = self.clock.now();
        self.session.start(now)
    }

    /// Deliver a tick scheduled for `generation`.
    pub fn tick(&mut self, generation: SessionGeneration) -> TickOutcome {
        if generation != self.session.generation() {
            return TickOutcome::Stale;
        }
        let now = self.clock.now();
        self.session.tick(now)
    }

    pub fn select(&mut self, option: &str) -> bool {
        self.session.select(option)
    }

    pub fn select_index(&mut self, option_index: usize) -> bool {
        self.session.select_index(option_index)
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.session.navigate(direction)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.session.jump_to(index)
    }

    pub fn submit(&mut self) -> bool {
        let now = self.clock.now();
        self.session.submit(now)
    }

    /// Discard the current session and start over, idle, in `mode`.
    pub fn switch_mode(&mut self, mode: QuizMode) -> SessionGeneration {
        self.replace_session(mode)
    }

    /// Bind a new cohort's questions, keeping the current mode. Nothing from
    /// the previous session carries over.
    pub fn reset_for_cohort(&mut self, cohort_id: CohortId, bank: QuestionBank) -> SessionGeneration {
        self.cohort_id = cohort_id;
        self.bank = bank;
        self.replace_session(self.session.mode())
    }

    /// Restart the current mode on the same cohort.
    pub fn reset(&mut self) -> SessionGeneration {
        self.replace_session(self.session.mode())
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot::capture(self.cohort_id, &self.session)
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.session.summary()
    }

    fn replace_session(&mut self, mode: QuizMode) -> SessionGeneration {
        let generation = self.session.generation().next();
        self.session = QuizSession::new(generation, mode, self.bank.questions(mode));
        generation
    }
}
