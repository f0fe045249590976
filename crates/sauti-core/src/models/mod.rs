mod audio_upload;
mod financial_record;
mod translated_text;

pub use audio_upload::AudioUpload;
pub use financial_record::{
    FinancialRecord, FinancialRecordResponse, NewFinancialRecord, RecordCandidate, TransactionType,
};
pub use translated_text::TranslatedTextEntry;
