//! Built-in grade 9-12 catalog used to seed a fresh database.

use quiz_core::model::{
    Cohort, CohortId, PaperId, QuestionBank, QuestionDraft, QuestionId, QuestionPaper,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::repository::{CohortRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] quiz_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

struct QuestionSeed {
    prompt: &'static str,
    options: &'static [&'static str],
    answer: &'static str,
    explanation: &'static str,
}

struct PaperSeed {
    subject: &'static str,
    year: u16,
    title: &'static str,
    description: &'static str,
    url: &'static str,
}

struct CohortSeed {
    grade: u64,
    summary: &'static str,
    focus_areas: &'static [&'static str],
    papers: &'static [PaperSeed],
    practice: &'static [QuestionSeed],
    timed: &'static [QuestionSeed],
}

// Question ids are `grade * 1000 + offset + position`, timed questions sit at
// offset 500 so the two sequences of a cohort never share an id.
const TIMED_ID_OFFSET: u64 = 500;

const COHORTS: &[CohortSeed] = &[
    CohortSeed {
        grade: 9,
        summary: "Build strong foundations in algebra, biology and reading analysis.",
        focus_areas: &[
            "Linear equations",
            "Cell structure",
            "Literary devices",
            "Map skills",
        ],
        papers: &[
            PaperSeed {
                subject: "Mathematics",
                year: 2023,
                title: "Algebra Foundations Term Test",
                description: "Linear equations, inequalities and simple word problems.",
                url: "https://papers.facebond.example/grade-9/math-2023.pdf",
            },
            PaperSeed {
                subject: "Science",
                year: 2022,
                title: "Living Systems Review",
                description: "Cells, tissues and the basics of classification.",
                url: "https://papers.facebond.example/grade-9/science-2022.pdf",
            },
        ],
        practice: &[
            QuestionSeed {
                prompt: "Solve for x: 2x + 6 = 14",
                options: &["3", "4", "5", "10"],
                answer: "4",
                explanation: "Subtract 6 from both sides to get `2x = 8`, then divide by 2.",
            },
            QuestionSeed {
                prompt: "Which organelle produces most of a cell's energy?",
                options: &["Nucleus", "Ribosome", "Mitochondrion", "Vacuole"],
                answer: "Mitochondrion",
                explanation: "The **mitochondrion** carries out cellular respiration.",
            },
            QuestionSeed {
                prompt: "\"The wind whispered through the trees\" is an example of:",
                options: &["Simile", "Personification", "Hyperbole", "Alliteration"],
                answer: "Personification",
                explanation: "Giving the wind a human action is *personification*.",
            },
            QuestionSeed {
                prompt: "What is the slope of the line y = -3x + 2?",
                options: &["2", "-3", "3", "-2"],
                answer: "-3",
                explanation: "In `y = mx + b` the slope is `m`.",
            },
            QuestionSeed {
                prompt: "Lines of latitude measure distance:",
                options: &[
                    "East or west of the prime meridian",
                    "North or south of the equator",
                    "Above sea level",
                    "Between time zones",
                ],
                answer: "North or south of the equator",
                explanation: "Latitude runs parallel to the equator.",
            },
        ],
        timed: &[
            QuestionSeed {
                prompt: "Simplify: 3(a + 4) - 2a",
                options: &["a + 12", "5a + 12", "a + 4", "a - 12"],
                answer: "a + 12",
                explanation: "Expand to `3a + 12 - 2a` and collect like terms.",
            },
            QuestionSeed {
                prompt: "Which structure controls what enters and leaves a cell?",
                options: &["Cell wall", "Cell membrane", "Cytoplasm", "Chloroplast"],
                answer: "Cell membrane",
                explanation: "The membrane is selectively permeable.",
            },
            QuestionSeed {
                prompt: "Which inequality matches \"x is at most 7\"?",
                options: &["x < 7", "x > 7", "x <= 7", "x >= 7"],
                answer: "x <= 7",
                explanation: "*At most* includes 7 itself.",
            },
            QuestionSeed {
                prompt: "A story told by a character using \"I\" is in:",
                options: &["First person", "Second person", "Third person limited", "Omniscient"],
                answer: "First person",
                explanation: "First-person narrators refer to themselves as *I*.",
            },
        ],
    },
    CohortSeed {
        grade: 10,
        summary: "Bridge into geometry, chemistry and structured essay writing.",
        focus_areas: &[
            "Quadratic functions",
            "Chemical reactions",
            "Argumentative essays",
            "Coordinate geometry",
        ],
        papers: &[
            PaperSeed {
                subject: "Mathematics",
                year: 2023,
                title: "Functions and Geometry Mock",
                description: "Quadratics, similarity and coordinate proofs.",
                url: "https://papers.facebond.example/grade-10/math-2023.pdf",
            },
            PaperSeed {
                subject: "Chemistry",
                year: 2023,
                title: "Reactions and Stoichiometry",
                description: "Balancing equations and mole calculations.",
                url: "https://papers.facebond.example/grade-10/chemistry-2023.pdf",
            },
        ],
        practice: &[
            QuestionSeed {
                prompt: "What are the roots of x^2 - 5x + 6 = 0?",
                options: &["1 and 6", "2 and 3", "-2 and -3", "5 and 6"],
                answer: "2 and 3",
                explanation: "Factor as `(x - 2)(x - 3) = 0`.",
            },
            QuestionSeed {
                prompt: "Which of these is a balanced equation?",
                options: &["H2 + O2 -> H2O", "2H2 + O2 -> 2H2O", "H2 + 2O2 -> H2O", "2H2 + 2O2 -> H2O"],
                answer: "2H2 + O2 -> 2H2O",
                explanation: "Both sides carry four hydrogen and two oxygen atoms.",
            },
            QuestionSeed {
                prompt: "The midpoint of (2, 4) and (6, 8) is:",
                options: &["(4, 6)", "(3, 5)", "(8, 12)", "(4, 4)"],
                answer: "(4, 6)",
                explanation: "Average each coordinate.",
            },
            QuestionSeed {
                prompt: "A counterargument in an essay should be:",
                options: &["Ignored", "Acknowledged and rebutted", "Placed in the title", "Used as the thesis"],
                answer: "Acknowledged and rebutted",
                explanation: "Addressing the opposing view strengthens the argument.",
            },
            QuestionSeed {
                prompt: "What is the pH of a neutral solution at 25 C?",
                options: &["0", "5", "7", "14"],
                answer: "7",
                explanation: "Neutral water has equal `H+` and `OH-` concentrations.",
            },
        ],
        timed: &[
            QuestionSeed {
                prompt: "The vertex of y = (x - 3)^2 + 1 is:",
                options: &["(3, 1)", "(-3, 1)", "(1, 3)", "(3, -1)"],
                answer: "(3, 1)",
                explanation: "Vertex form is `y = (x - h)^2 + k`.",
            },
            QuestionSeed {
                prompt: "How many moles are in 36 g of water (H2O = 18 g/mol)?",
                options: &["1", "2", "18", "0.5"],
                answer: "2",
                explanation: "`36 / 18 = 2`.",
            },
            QuestionSeed {
                prompt: "Distance between (0, 0) and (3, 4):",
                options: &["5", "7", "12", "25"],
                answer: "5",
                explanation: "A 3-4-5 right triangle.",
            },
            QuestionSeed {
                prompt: "Rusting of iron is an example of:",
                options: &["Oxidation", "Sublimation", "Neutralisation", "Distillation"],
                answer: "Oxidation",
                explanation: "Iron combines with oxygen to form iron oxide.",
            },
        ],
    },
    CohortSeed {
        grade: 11,
        summary: "Sharpen problem solving in trigonometry, physics and history sources.",
        focus_areas: &[
            "Trigonometric identities",
            "Kinematics",
            "Source analysis",
            "Organic chemistry",
        ],
        papers: &[
            PaperSeed {
                subject: "Physics",
                year: 2022,
                title: "Motion and Forces Paper",
                description: "Kinematics graphs, Newton's laws and momentum.",
                url: "https://papers.facebond.example/grade-11/physics-2022.pdf",
            },
            PaperSeed {
                subject: "History",
                year: 2023,
                title: "Source-Based Questions",
                description: "Evaluating primary sources and historical bias.",
                url: "https://papers.facebond.example/grade-11/history-2023.pdf",
            },
        ],
        practice: &[
            QuestionSeed {
                prompt: "sin^2(x) + cos^2(x) equals:",
                options: &["0", "1", "tan(x)", "2"],
                answer: "1",
                explanation: "The Pythagorean identity.",
            },
            QuestionSeed {
                prompt: "A car accelerates from rest at 2 m/s^2 for 5 s. Its final speed is:",
                options: &["2 m/s", "5 m/s", "10 m/s", "25 m/s"],
                answer: "10 m/s",
                explanation: "`v = u + at = 0 + 2 * 5`.",
            },
            QuestionSeed {
                prompt: "A primary source is:",
                options: &[
                    "A textbook chapter",
                    "A diary written during the event",
                    "A documentary made decades later",
                    "An encyclopedia entry",
                ],
                answer: "A diary written during the event",
                explanation: "Primary sources are created at the time being studied.",
            },
            QuestionSeed {
                prompt: "The functional group -OH identifies an:",
                options: &["Alkane", "Alcohol", "Ester", "Aldehyde"],
                answer: "Alcohol",
                explanation: "Alcohols carry a hydroxyl group.",
            },
            QuestionSeed {
                prompt: "The exact value of cos(60 degrees) is:",
                options: &["1/2", "sqrt(3)/2", "1", "0"],
                answer: "1/2",
                explanation: "From the 30-60-90 triangle.",
            },
        ],
        timed: &[
            QuestionSeed {
                prompt: "The gradient of a velocity-time graph gives:",
                options: &["Displacement", "Acceleration", "Speed", "Force"],
                answer: "Acceleration",
                explanation: "Acceleration is the rate of change of velocity.",
            },
            QuestionSeed {
                prompt: "tan(x) is equal to:",
                options: &["sin(x)/cos(x)", "cos(x)/sin(x)", "1/sin(x)", "1/cos(x)"],
                answer: "sin(x)/cos(x)",
                explanation: "By definition on the unit circle.",
            },
            QuestionSeed {
                prompt: "Newton's third law states that forces:",
                options: &[
                    "Come in equal and opposite pairs",
                    "Cause constant velocity",
                    "Depend on mass only",
                    "Act at a distance only",
                ],
                answer: "Come in equal and opposite pairs",
                explanation: "Every action has an equal and opposite reaction.",
            },
            QuestionSeed {
                prompt: "Propaganda posters are most useful to historians for studying:",
                options: &["Exact casualty figures", "Government messaging", "Weather patterns", "Trade tariffs"],
                answer: "Government messaging",
                explanation: "They reveal what authorities wanted people to believe.",
            },
        ],
    },
    CohortSeed {
        grade: 12,
        summary: "Exam-ready revision across calculus, biology and economics.",
        focus_areas: &[
            "Differentiation",
            "Genetics",
            "Market structures",
            "Exam technique",
        ],
        papers: &[
            PaperSeed {
                subject: "Mathematics",
                year: 2024,
                title: "Calculus Final Paper",
                description: "Derivatives, integrals and optimisation problems.",
                url: "https://papers.facebond.example/grade-12/math-2024.pdf",
            },
            PaperSeed {
                subject: "Biology",
                year: 2023,
                title: "Genetics and Evolution",
                description: "Inheritance, DNA replication and natural selection.",
                url: "https://papers.facebond.example/grade-12/biology-2023.pdf",
            },
            PaperSeed {
                subject: "Economics",
                year: 2023,
                title: "Markets and Policy",
                description: "Elasticity, market failure and fiscal policy.",
                url: "https://papers.facebond.example/grade-12/economics-2023.pdf",
            },
        ],
        practice: &[
            QuestionSeed {
                prompt: "The derivative of x^3 is:",
                options: &["x^2", "3x^2", "3x", "x^4 / 4"],
                answer: "3x^2",
                explanation: "Power rule: `d/dx x^n = n x^(n-1)`.",
            },
            QuestionSeed {
                prompt: "In a cross of Aa x Aa, the proportion of aa offspring is:",
                options: &["0", "1/4", "1/2", "3/4"],
                answer: "1/4",
                explanation: "A Punnett square gives `AA : Aa : aa = 1 : 2 : 1`.",
            },
            QuestionSeed {
                prompt: "A market with a single seller is a:",
                options: &["Monopoly", "Oligopoly", "Perfect competition", "Monopsony"],
                answer: "Monopoly",
                explanation: "*Mono* means one seller.",
            },
            QuestionSeed {
                prompt: "The integral of 2x dx is:",
                options: &["x^2 + C", "2x^2 + C", "x + C", "2 + C"],
                answer: "x^2 + C",
                explanation: "Reverse the power rule and add the constant.",
            },
            QuestionSeed {
                prompt: "DNA replication is described as:",
                options: &["Conservative", "Semi-conservative", "Dispersive", "Random"],
                answer: "Semi-conservative",
                explanation: "Each new helix keeps one **original** strand.",
            },
        ],
        timed: &[
            QuestionSeed {
                prompt: "At a maximum point, the first derivative is:",
                options: &["Positive", "Negative", "Zero", "Undefined always"],
                answer: "Zero",
                explanation: "Stationary points have zero gradient.",
            },
            QuestionSeed {
                prompt: "Price elasticity of demand greater than 1 means demand is:",
                options: &["Inelastic", "Elastic", "Unit elastic", "Perfectly inelastic"],
                answer: "Elastic",
                explanation: "Quantity responds more than proportionally to price.",
            },
            QuestionSeed {
                prompt: "Natural selection acts directly on:",
                options: &["Genotypes only", "Phenotypes", "Mutations only", "Gametes only"],
                answer: "Phenotypes",
                explanation: "Selection sees the expressed traits.",
            },
            QuestionSeed {
                prompt: "The derivative of sin(x) is:",
                options: &["-cos(x)", "cos(x)", "-sin(x)", "tan(x)"],
                answer: "cos(x)",
                explanation: "A standard result worth memorising.",
            },
        ],
    },
];

fn build_questions(
    seeds: &[QuestionSeed],
    first_id: u64,
) -> Result<Vec<quiz_core::model::Question>, quiz_core::Error> {
    let mut questions = Vec::with_capacity(seeds.len());
    for (id, seed) in (first_id..).zip(seeds) {
        let question = QuestionDraft {
            id: QuestionId::new(id),
            prompt: seed.prompt.to_owned(),
            options: seed.options.iter().map(|o| (*o).to_owned()).collect(),
            answer: seed.answer.to_owned(),
            explanation: seed.explanation.to_owned(),
        }
        .validate()?;
        questions.push(question);
    }
    Ok(questions)
}

fn build_cohort(seed: &CohortSeed) -> Result<Cohort, quiz_core::Error> {
    let base = seed.grade * 1000;
    let practice = build_questions(seed.practice, base + 1)?;
    let timed = build_questions(seed.timed, base + TIMED_ID_OFFSET + 1)?;
    let bank = QuestionBank::new(practice, timed)?;

    let mut papers = Vec::with_capacity(seed.papers.len());
    for (id, paper) in (seed.grade * 100 + 1..).zip(seed.papers) {
        papers.push(QuestionPaper::new(
            PaperId::new(id),
            paper.subject,
            paper.year,
            paper.title,
            paper.description,
            paper.url,
        )?);
    }

    let cohort = Cohort::new(
        CohortId::new(seed.grade),
        format!("Grade {}", seed.grade),
        seed.summary,
        seed.focus_areas.iter().map(|f| (*f).to_owned()).collect(),
        papers,
        bank,
    )?;
    Ok(cohort)
}

/// The built-in cohorts, ordered by grade.
///
/// # Errors
///
/// Returns a domain error if any built-in entry fails validation.
pub fn default_catalog() -> Result<Vec<Cohort>, quiz_core::Error> {
    COHORTS.iter().map(build_cohort).collect()
}

/// Write the built-in catalog into `repo`, replacing cohorts with the same id.
///
/// # Errors
///
/// Returns `CatalogError` when the catalog is invalid or a write fails.
pub async fn seed(repo: &dyn CohortRepository) -> Result<usize, CatalogError> {
    let cohorts = default_catalog()?;
    for cohort in &cohorts {
        debug!(cohort = %cohort.id(), questions = cohort.quiz_count(), "seeding cohort");
        repo.upsert_cohort(cohort).await?;
    }
    info!(cohorts = cohorts.len(), "catalog seeded");
    Ok(cohorts.len())
}

/// Seed only when the repository holds no cohorts. Returns the number written.
///
/// # Errors
///
/// Returns `CatalogError` when listing or seeding fails.
pub async fn seed_if_empty(repo: &dyn CohortRepository) -> Result<usize, CatalogError> {
    if repo.list_cohorts().await?.is_empty() {
        seed(repo).await
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use quiz_core::model::QuizMode;

    #[test]
    fn catalog_covers_grades_nine_to_twelve() {
        let catalog = default_catalog().unwrap();
        let grades: Vec<u64> = catalog.iter().map(|c| c.id().value()).collect();
        assert_eq!(grades, vec![9, 10, 11, 12]);

        for cohort in &catalog {
            assert_eq!(cohort.bank().len(QuizMode::Practice), 5);
            assert_eq!(cohort.bank().len(QuizMode::Timed), 4);
            assert!(cohort.focus_areas().len() >= 3);
            assert!(!cohort.papers().is_empty());
        }
    }

    #[test]
    fn question_ids_are_namespaced_by_grade() {
        let cohort = default_catalog().unwrap().remove(1);
        let practice = cohort.bank().questions(QuizMode::Practice);
        let timed = cohort.bank().questions(QuizMode::Timed);
        assert_eq!(practice[0].id(), QuestionId::new(10_001));
        assert_eq!(timed[0].id(), QuestionId::new(10_501));
    }

    #[tokio::test]
    async fn seed_if_empty_writes_once() {
        let repo = InMemoryRepository::new();
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 4);
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 0);
        assert_eq!(repo.list_cohorts().await.unwrap().len(), 4);
    }
}
