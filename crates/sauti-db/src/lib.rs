//! Postgres persistence for Sauti.
//!
//! Repositories implement the store traits from `sauti-core`. All tables are
//! append-only from the pipeline's perspective; the only concurrency-
//! sensitive operation is the quota-guarded upload insert.

pub mod db;

pub use db::audio_uploads::AudioUploadRepository;
pub use db::financial_records::FinancialRecordRepository;
pub use db::translated_texts::TranslatedTextRepository;
