use quiz_core::model::{Cohort, CohortId, PaperId, QuestionPaper, QuizMode};

/// Focus areas shown on a grade card and in the snapshot header.
pub const FOCUS_PREVIEW_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CohortCardVm {
    pub id: CohortId,
    pub grade_label: String,
    pub title: String,
    pub quizzes_label: String,
    pub summary: String,
    pub focus_pills: Vec<String>,
    pub active: bool,
}

impl CohortCardVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.active {
            "grade-card grade-card--active"
        } else {
            "grade-card"
        }
    }
}

#[must_use]
pub fn map_cohort_cards(cohorts: &[Cohort], active: CohortId) -> Vec<CohortCardVm> {
    cohorts
        .iter()
        .map(|cohort| CohortCardVm {
            id: cohort.id(),
            grade_label: cohort.name().to_string(),
            title: format!("Cohort {}", cohort.id()),
            quizzes_label: format!("{} quizzes", cohort.quiz_count()),
            summary: cohort.summary().to_string(),
            focus_pills: cohort
                .focus_areas()
                .iter()
                .take(FOCUS_PREVIEW_LEN)
                .cloned()
                .collect(),
            active: cohort.id() == active,
        })
        .collect()
}

/// Header block for the active cohort.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CohortSnapshotVm {
    pub heading: String,
    pub focus_preview: Vec<String>,
    pub focus_areas: Vec<String>,
    pub counts_label: String,
}

#[must_use]
pub fn map_cohort_snapshot(cohort: &Cohort) -> CohortSnapshotVm {
    let bank = cohort.bank();
    CohortSnapshotVm {
        heading: format!("{} Snapshot", cohort.name()),
        focus_preview: cohort
            .focus_areas()
            .iter()
            .take(FOCUS_PREVIEW_LEN)
            .cloned()
            .collect(),
        focus_areas: cohort.focus_areas().to_vec(),
        counts_label: format!(
            "{} timed · {} practice quizzes",
            bank.len(QuizMode::Timed),
            bank.len(QuizMode::Practice)
        ),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperCardVm {
    pub id: PaperId,
    pub subject: String,
    pub year_label: String,
    pub title: String,
    pub description: String,
    pub download_url: String,
}

#[must_use]
pub fn map_paper_cards(papers: &[QuestionPaper]) -> Vec<PaperCardVm> {
    papers
        .iter()
        .map(|paper| PaperCardVm {
            id: paper.id(),
            subject: paper.subject().to_string(),
            year_label: paper.year().to_string(),
            title: paper.title().to_string(),
            description: paper.description().to_string(),
            download_url: paper.download_url().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionBank;

    fn cohort(grade: u64, focus: &[&str]) -> Cohort {
        let paper = QuestionPaper::new(
            PaperId::new(grade * 100 + 1),
            "Mathematics",
            2024,
            "Mock Paper",
            "Full syllabus",
            "https://papers.example/mock.pdf",
        )
        .unwrap();
        Cohort::new(
            CohortId::new(grade),
            format!("Grade {grade}"),
            "Summary",
            focus.iter().map(|f| (*f).to_string()).collect(),
            vec![paper],
            QuestionBank::default(),
        )
        .unwrap()
    }

    #[test]
    fn cards_flag_the_active_grade_and_trim_focus() {
        let cohorts = vec![
            cohort(9, &["A", "B", "C", "D"]),
            cohort(10, &["E"]),
        ];
        let cards = map_cohort_cards(&cohorts, CohortId::new(10));

        assert_eq!(cards[0].focus_pills, vec!["A", "B", "C"]);
        assert_eq!(cards[0].class(), "grade-card");
        assert_eq!(cards[1].class(), "grade-card grade-card--active");
        assert_eq!(cards[1].title, "Cohort 10");
        assert_eq!(cards[1].quizzes_label, "0 quizzes");
    }

    #[test]
    fn snapshot_counts_both_modes() {
        let snapshot = map_cohort_snapshot(&cohort(12, &["X", "Y"]));
        assert_eq!(snapshot.heading, "Grade 12 Snapshot");
        assert_eq!(snapshot.counts_label, "0 timed · 0 practice quizzes");
        assert_eq!(snapshot.focus_preview.len(), 2);
    }

    #[test]
    fn paper_cards_expose_download_links() {
        let cards = map_paper_cards(cohort(11, &[]).papers());
        assert_eq!(cards[0].year_label, "2024");
        assert_eq!(cards[0].download_url, "https://papers.example/mock.pdf");
    }
}
