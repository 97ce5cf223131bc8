use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

numeric_id!(
    /// Identifies a cohort. The value is the grade number (9, 10, ...).
    CohortId
);

numeric_id!(
    /// Unique identifier for a question within its bank.
    QuestionId
);

numeric_id!(
    /// Unique identifier for a downloadable question paper.
    PaperId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohort_id_displays_grade() {
        assert_eq!(CohortId::new(10).to_string(), "10");
        assert_eq!(format!("{:?}", CohortId::new(10)), "CohortId(10)");
    }

    #[test]
    fn question_id_parses_trimmed_input() {
        let id: QuestionId = " 904 ".parse().unwrap();
        assert_eq!(id, QuestionId::new(904));
    }

    #[test]
    fn invalid_id_reports_kind() {
        let err = "grade-nine".parse::<CohortId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse CohortId from string");
    }

    #[test]
    fn paper_id_orders_by_value() {
        assert!(PaperId::new(1) < PaperId::new(2));
    }
}
