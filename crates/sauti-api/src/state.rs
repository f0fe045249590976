//! Application state.
//!
//! Everything the handlers need: the assembled pipeline and the record store
//! used by the read-side endpoint. Stores and clients are trait objects so
//! tests can swap in in-memory implementations.

use crate::pipeline::AudioPipeline;
use sauti_core::{
    Config, FinancialRecordStore, RecordExtractor, SpeechToText, TranslatedTextStore, Translator,
    UploadStore,
};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub pipeline: AudioPipeline,
    pub financial_records: Arc<dyn FinancialRecordStore>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        uploads: Arc<dyn UploadStore>,
        texts: Arc<dyn TranslatedTextStore>,
        records: Arc<dyn FinancialRecordStore>,
        stt: Arc<dyn SpeechToText>,
        translator: Arc<dyn Translator>,
        extractor: Arc<dyn RecordExtractor>,
    ) -> Self {
        let pipeline = AudioPipeline::new(
            uploads,
            texts,
            records.clone(),
            stt,
            translator,
            extractor,
            config.max_audio_uploads,
            config.max_audio_bytes,
        );
        Self {
            config,
            pipeline,
            financial_records: records,
        }
    }
}
