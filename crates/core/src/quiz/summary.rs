use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::QuizMode;

use super::session::{CompletionReason, SessionGeneration};

/// Outcome of a completed quiz session, for the results panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub generation: SessionGeneration,
    pub mode: QuizMode,
    pub reason: CompletionReason,
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizSummary {
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }

    /// Score as a whole percentage of the question count (0 for an empty quiz).
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.score.saturating_mul(100) / self.total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn summary(score: usize, total: usize) -> QuizSummary {
        QuizSummary {
            generation: SessionGeneration::new(3),
            mode: QuizMode::Timed,
            reason: CompletionReason::Expired,
            score,
            total,
            answered: score,
            started_at: fixed_now(),
            completed_at: fixed_now() + Duration::seconds(90),
        }
    }

    #[test]
    fn percent_rounds_down() {
        assert_eq!(summary(2, 3).percent(), 66);
        assert_eq!(summary(0, 0).percent(), 0);
        assert_eq!(summary(4, 4).percent(), 100);
    }

    #[test]
    fn elapsed_covers_whole_sprint() {
        let s = summary(1, 4);
        assert_eq!(s.elapsed(), Duration::seconds(90));
        assert_eq!(s.unanswered(), 3);
    }
}
