use thiserror::Error;
use url::Url;

use crate::model::ids::PaperId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaperError {
    #[error("paper title cannot be empty")]
    EmptyTitle,

    #[error("invalid download URL: {0}")]
    InvalidUrl(String),
}

/// A downloadable past paper shown on the cohort's resource deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPaper {
    id: PaperId,
    subject: String,
    year: u16,
    title: String,
    description: String,
    download_url: Url,
}

impl QuestionPaper {
    /// # Errors
    ///
    /// Returns `PaperError::EmptyTitle` for a blank title and
    /// `PaperError::InvalidUrl` when `download_url` does not parse.
    pub fn new(
        id: PaperId,
        subject: impl Into<String>,
        year: u16,
        title: impl Into<String>,
        description: impl Into<String>,
        download_url: &str,
    ) -> Result<Self, PaperError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(PaperError::EmptyTitle);
        }
        let download_url =
            Url::parse(download_url).map_err(|_| PaperError::InvalidUrl(download_url.into()))?;

        Ok(Self {
            id,
            subject: subject.into(),
            year,
            title,
            description: description.into(),
            download_url,
        })
    }

    #[must_use]
    pub fn id(&self) -> PaperId {
        self.id
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn download_url(&self) -> &Url {
        &self.download_url
    }
}
