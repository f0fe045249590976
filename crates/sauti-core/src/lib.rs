//! Core domain types for the Sauti voice-bookkeeping backend.
//!
//! This crate holds the data model, the error taxonomy, configuration, the
//! upload/quota rules, and the capability traits (stores and external-service
//! clients) that the pipeline orchestrator is composed from. It has no HTTP
//! or database engine code of its own.

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod quota;
pub mod stores;
pub mod validation;

pub use clients::{RecordExtractor, SpeechToText, Translator};
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use quota::check_quota;
pub use stores::{FinancialRecordStore, TranslatedTextStore, UploadStore};
pub use validation::{validate_upload, UploadValidationError};
