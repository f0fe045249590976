mod financial_records;
mod process_audio;
mod voice_texts;

pub use financial_records::list_financial_records;
pub use process_audio::process_audio;
pub use voice_texts::create_voice_text;
