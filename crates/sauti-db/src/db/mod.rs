pub mod audio_uploads;
pub mod financial_records;
pub mod translated_texts;
