#![forbid(unsafe_code)]

pub mod app_services;
pub mod authoring;
pub mod catalog_service;
pub mod completion_store;
pub mod error;
pub mod sessions;

pub use lesson_core::Clock;

pub use app_services::{AppServices, ServicesConfig};
pub use authoring::{AuthoringOptions, AuthoringReport, AuthoringService, LessonPayload};
pub use catalog_service::{CatalogService, LessonListItem};
pub use completion_store::{CompletionStore, DEFAULT_COMPLETION_KEY};
pub use error::{AppServicesError, AuthoringError, CatalogServiceError, SessionError};

pub use sessions::{
    LessonLoopService, LessonOpen, LessonSession, NavigationIntent, SessionView, SubmitResult,
};
