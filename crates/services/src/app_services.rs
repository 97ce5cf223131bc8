use std::sync::Arc;

use storage::catalog;
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::cohort_service::CohortService;
use crate::error::AppServicesError;

/// Assembles app-facing services over a populated question source.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    seeded_on_launch: usize,
    cohort_service: Arc<CohortService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, seeding the built-in catalog
    /// into an empty database.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        shuffle: bool,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, shuffle).await
    }

    /// Build services over an in-memory catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if seeding fails.
    pub async fn in_memory(clock: Clock, shuffle: bool) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, shuffle).await
    }

    async fn from_storage(
        storage: Storage,
        clock: Clock,
        shuffle: bool,
    ) -> Result<Self, AppServicesError> {
        let seeded_on_launch = catalog::seed_if_empty(storage.cohorts.as_ref()).await?;
        if seeded_on_launch > 0 {
            info!(cohorts = seeded_on_launch, "seeded empty question source");
        }
        let cohort_service =
            Arc::new(CohortService::new(Arc::clone(&storage.cohorts)).with_shuffle(shuffle));

        Ok(Self {
            clock,
            seeded_on_launch,
            cohort_service,
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Number of cohorts written because the source was empty at launch.
    #[must_use]
    pub fn seeded_on_launch(&self) -> usize {
        self.seeded_on_launch
    }

    #[must_use]
    pub fn cohort_service(&self) -> Arc<CohortService> {
        Arc::clone(&self.cohort_service)
    }
}
