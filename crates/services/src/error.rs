//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::CohortId;
use storage::catalog::CatalogError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CohortService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CohortServiceError {
    #[error("cohort {0} not found")]
    NotFound(CohortId),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Cohort(#[from] quiz_core::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
