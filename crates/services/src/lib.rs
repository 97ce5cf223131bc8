#![forbid(unsafe_code)]

pub mod app_services;
pub mod cohort_service;
pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use cohort_service::CohortService;
pub use error::{AppServicesError, CohortServiceError};
pub use quiz::{QuizController, Tick, TickStream};
