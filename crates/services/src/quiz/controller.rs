use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use quiz_core::Clock;
use quiz_core::model::{Cohort, QuizMode};
use quiz_core::quiz::{
    Direction, QuizEngine, QuizSession, QuizSnapshot, QuizSummary, SessionGeneration, TickOutcome,
};

use super::ticker::{DEFAULT_TICK_PERIOD, SessionTicker, Tick, TickStream, TickerHandle};

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives a [`QuizEngine`] and owns the countdown for timed sessions.
///
/// The controller holds the only handle to the running ticker. Completion,
/// mode switches and cohort switches drop that handle before returning, and
/// the engine discards ticks addressed to an older generation, so a late tick
/// can never reach a replacement session.
pub struct QuizController {
    engine: QuizEngine,
    tick_period: Duration,
    sink: mpsc::UnboundedSender<Tick>,
    ticks: TickStream,
    ticker: Option<TickerHandle>,
}

impl QuizController {
    #[must_use]
    pub fn new(clock: Clock, cohort: &Cohort, mode: QuizMode) -> Self {
        Self::from_engine(QuizEngine::for_cohort(clock, cohort, mode))
    }

    #[must_use]
    pub fn from_engine(engine: QuizEngine) -> Self {
        let (sink, rx) = mpsc::unbounded_channel();
        Self {
            engine,
            tick_period: DEFAULT_TICK_PERIOD,
            sink,
            ticks: TickStream::new(rx),
            ticker: None,
        }
    }

    /// Override the countdown spacing (tests and demos).
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// A handle for pumping ticks back into [`Self::on_tick`].
    #[must_use]
    pub fn tick_stream(&self) -> TickStream {
        self.ticks.clone()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        self.engine.session()
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.engine.generation()
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.engine.mode()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.engine.snapshot()
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.engine.summary()
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    // ─── intents ───

    /// Start the session; timed sessions also start their countdown.
    ///
    /// Requires a tokio runtime when the session is timed.
    pub fn start(&mut self) -> bool {
        if !self.engine.start() {
            return false;
        }
        let generation = self.engine.generation();
        debug!(%generation, mode = %self.engine.mode(), "quiz started");
        if self.engine.mode().is_timed() {
            self.ticker = Some(SessionTicker::spawn(
                generation,
                self.tick_period,
                self.sink.clone(),
            ));
        }
        true
    }

    pub fn select(&mut self, option: &str) -> bool {
        self.engine.select(option)
    }

    pub fn select_index(&mut self, option_index: usize) -> bool {
        self.engine.select_index(option_index)
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.engine.navigate(direction)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.engine.jump_to(index)
    }

    pub fn submit(&mut self) -> bool {
        let submitted = self.engine.submit();
        if submitted {
            self.stop_ticker();
            if let Some(summary) = self.engine.summary() {
                info!(
                    generation = %summary.generation,
                    score = summary.score,
                    total = summary.total,
                    "quiz submitted"
                );
            }
        }
        submitted
    }

    /// Replace the session with a fresh, idle one in `mode`.
    pub fn switch_mode(&mut self, mode: QuizMode) -> SessionGeneration {
        self.stop_ticker();
        let generation = self.engine.switch_mode(mode);
        debug!(%generation, %mode, "mode switched");
        generation
    }

    /// Bind `cohort`'s questions in a fresh, idle session keeping the mode.
    pub fn switch_cohort(&mut self, cohort: &Cohort) -> SessionGeneration {
        self.stop_ticker();
        let generation = self
            .engine
            .reset_for_cohort(cohort.id(), cohort.bank().clone());
        debug!(%generation, cohort = %cohort.id(), "cohort switched");
        generation
    }

    /// Restart the current mode on the same cohort.
    pub fn reset(&mut self) -> SessionGeneration {
        self.stop_ticker();
        let generation = self.engine.reset();
        debug!(%generation, "quiz restarted");
        generation
    }

    /// Deliver a tick from the [`TickStream`].
    pub fn on_tick(&mut self, tick: Tick) -> TickOutcome {
        let outcome = self.engine.tick(tick.generation);
        match outcome {
            TickOutcome::Expired => {
                self.stop_ticker();
                info!(generation = %tick.generation, score = self.engine.session().score(), "sprint expired");
            }
            TickOutcome::Stale => {
                debug!(generation = %tick.generation, "dropped stale tick");
            }
            TickOutcome::Ignored | TickOutcome::Counted { .. } => {}
        }
        outcome
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            debug!(generation = %handle.generation(), "ticker stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CohortId, QuestionBank, QuestionDraft, QuestionId};
    use quiz_core::quiz::SPRINT_DURATION_SECS;
    use quiz_core::time::fixed_clock;

    fn cohort(grade: u64) -> Cohort {
        let question = |id: u64| {
            QuestionDraft {
                id: QuestionId::new(id),
                prompt: format!("Question {id}"),
                options: vec!["right".into(), "wrong".into()],
                answer: "right".into(),
                explanation: String::new(),
            }
            .validate()
            .unwrap()
        };
        let bank = QuestionBank::new(
            (1..=5).map(question).collect(),
            (11..=14).map(question).collect(),
        )
        .unwrap();
        Cohort::new(
            CohortId::new(grade),
            format!("Grade {grade}"),
            "",
            Vec::new(),
            Vec::new(),
            bank,
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn full_sprint_expires_through_the_ticker() {
        let mut controller = QuizController::new(fixed_clock(), &cohort(9), QuizMode::Timed);
        let ticks = controller.tick_stream();
        assert!(controller.start());
        assert!(controller.is_ticking());
        controller.select("right");

        let mut delivered = 0;
        loop {
            let tick = ticks.next().await.unwrap();
            delivered += 1;
            if controller.on_tick(tick) == TickOutcome::Expired {
                break;
            }
        }

        assert_eq!(delivered, SPRINT_DURATION_SECS);
        assert!(!controller.is_ticking());
        let snap = controller.snapshot();
        assert!(snap.completed);
        assert_eq!(snap.remaining_secs, Some(0));
        assert_eq!(snap.score, 1);
        assert!(!controller.select("wrong"));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_stops_the_countdown() {
        let mut controller = QuizController::new(fixed_clock(), &cohort(9), QuizMode::Timed);
        let ticks = controller.tick_stream();
        controller.start();
        assert!(controller.submit());
        assert!(!controller.is_ticking());

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(ticks.try_next().is_none());
        assert!(!controller.submit());
    }

    #[tokio::test(start_paused = true)]
    async fn tick_for_superseded_session_is_stale() {
        let mut controller = QuizController::new(fixed_clock(), &cohort(9), QuizMode::Timed);
        let ticks = controller.tick_stream();
        controller.start();
        let late = ticks.next().await.unwrap();

        controller.switch_cohort(&cohort(10));
        assert!(!controller.is_ticking());
        controller.start();

        assert_eq!(controller.on_tick(late), TickOutcome::Stale);
        assert_eq!(controller.snapshot().remaining_secs, Some(SPRINT_DURATION_SECS));
        assert_eq!(controller.snapshot().cohort_id, CohortId::new(10));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_the_countdown_and_starts_over() {
        let mut controller = QuizController::new(fixed_clock(), &cohort(9), QuizMode::Timed);
        let ticks = controller.tick_stream();
        controller.start();
        controller.select("right");
        let late = ticks.next().await.unwrap();

        let fresh = controller.reset();
        assert!(!controller.is_ticking());
        assert_eq!(controller.generation(), fresh);
        assert_eq!(controller.on_tick(late), TickOutcome::Stale);

        let snap = controller.snapshot();
        assert!(!snap.started);
        assert_eq!(snap.answered, 0);
        assert_eq!(snap.remaining_secs, Some(SPRINT_DURATION_SECS));
        assert_eq!(snap.mode, QuizMode::Timed);
    }

    #[tokio::test]
    async fn practice_sessions_never_tick() {
        let mut controller = QuizController::new(fixed_clock(), &cohort(9), QuizMode::Practice);
        assert!(controller.start());
        assert!(!controller.is_ticking());
        assert_eq!(controller.snapshot().remaining_secs, None);
    }

    #[tokio::test]
    async fn switching_mode_discards_progress() {
        let mut controller = QuizController::new(fixed_clock(), &cohort(9), QuizMode::Practice);
        controller.start();
        controller.select("right");
        controller.navigate(Direction::Next);
        controller.select("wrong");
        assert_eq!(controller.snapshot().answered, 2);

        let before = controller.generation();
        let after = controller.switch_mode(QuizMode::Timed);
        assert_ne!(before, after);
        let snap = controller.snapshot();
        assert_eq!(snap.answered, 0);
        assert_eq!(snap.total, 4);
        assert!(!snap.started);
    }
}
