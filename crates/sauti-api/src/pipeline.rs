//! Pipeline orchestrator.
//!
//! One pipeline run per accepted request, five stages strictly sequential:
//!
//! ```text
//! RECEIVED -> QUOTA_CHECKED -> VALIDATED -> UPLOAD_SAVED -> TRANSCRIBED
//!          -> TRANSLATED -> TEXT_SAVED -> EXTRACTED -> DONE
//! ```
//!
//! Any stage failure is terminal for the run. Persistence is forward-only:
//! artifacts committed by earlier stages (the AudioUpload, the
//! TranslatedTextEntry) are never rolled back, so the operator can see
//! exactly how far a request progressed. The orchestrator owns no I/O of its
//! own; stores and service clients are injected as trait objects.

use bytes::Bytes;
use sauti_core::models::{FinancialRecordResponse, NewFinancialRecord, TranslatedTextEntry};
use sauti_core::{
    check_quota, validate_upload, AppError, FinancialRecordStore, RecordExtractor, SpeechToText,
    TranslatedTextStore, Translator, UploadStore,
};
use std::sync::Arc;
use uuid::Uuid;

/// Canonical pivot language all source text is translated into.
pub const PIVOT_LANGUAGE: &str = "eng";

/// Progress marker for one run, used for stage-tagged logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    QuotaChecked,
    Validated,
    UploadSaved,
    Transcribed,
    Translated,
    TextSaved,
    Extracted,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::QuotaChecked => "quota_checked",
            PipelineStage::Validated => "validated",
            PipelineStage::UploadSaved => "upload_saved",
            PipelineStage::Transcribed => "transcribed",
            PipelineStage::Translated => "translated",
            PipelineStage::TextSaved => "text_saved",
            PipelineStage::Extracted => "extracted",
            PipelineStage::Done => "done",
        }
    }
}

/// Successful pipeline outcome.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineResponse {
    pub original_transcription: String,
    pub translated_text: String,
    pub financial_records: Vec<FinancialRecordResponse>,
}

/// Sequences the five stages and owns the persistence boundaries.
#[derive(Clone)]
pub struct AudioPipeline {
    uploads: Arc<dyn UploadStore>,
    texts: Arc<dyn TranslatedTextStore>,
    records: Arc<dyn FinancialRecordStore>,
    stt: Arc<dyn SpeechToText>,
    translator: Arc<dyn Translator>,
    extractor: Arc<dyn RecordExtractor>,
    upload_limit: i64,
    max_audio_bytes: usize,
}

impl AudioPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        uploads: Arc<dyn UploadStore>,
        texts: Arc<dyn TranslatedTextStore>,
        records: Arc<dyn FinancialRecordStore>,
        stt: Arc<dyn SpeechToText>,
        translator: Arc<dyn Translator>,
        extractor: Arc<dyn RecordExtractor>,
        upload_limit: i64,
        max_audio_bytes: usize,
    ) -> Self {
        Self {
            uploads,
            texts,
            records,
            stt,
            translator,
            extractor,
            upload_limit,
            max_audio_bytes,
        }
    }

    /// Run the full audio pipeline for one upload request.
    #[tracing::instrument(skip(self, audio), fields(user_id = %user_id, byte_len = audio.len(), language))]
    pub async fn run(
        &self,
        user_id: Uuid,
        audio: Bytes,
        language: &str,
    ) -> Result<PipelineResponse, AppError> {
        let mut stage = PipelineStage::Received;

        // Pure quota comparison first: denial starts nothing and increments
        // nothing. The guarded insert below re-checks atomically.
        let count = self
            .uploads
            .count_for_user(user_id)
            .await
            .map_err(|e| self.fail(stage, e))?;
        check_quota(count, self.upload_limit).map_err(|e| self.fail(stage, e))?;
        stage = self.advance(PipelineStage::QuotaChecked);

        validate_upload(&audio, language, self.max_audio_bytes)
            .map_err(|e| self.fail(stage, AppError::from(e)))?;
        stage = self.advance(PipelineStage::Validated);

        let upload = self
            .uploads
            .create_guarded(user_id, audio.clone(), language, self.upload_limit)
            .await
            .map_err(|e| self.fail(stage, e))?
            .ok_or_else(|| {
                // Lost the race at the ceiling; same outcome as the pure check.
                self.fail(
                    stage,
                    AppError::QuotaExceeded {
                        used: self.upload_limit,
                        limit: self.upload_limit,
                    },
                )
            })?;
        stage = self.advance(PipelineStage::UploadSaved);

        let transcription = self
            .stt
            .transcribe(audio, language)
            .await
            .map_err(|e| self.fail(stage, AppError::Transcription(e)))?;
        stage = self.advance(PipelineStage::Transcribed);

        let translated_text = self
            .translator
            .translate(&transcription, language, PIVOT_LANGUAGE)
            .await
            .map_err(|e| self.fail(stage, AppError::Translation(e)))?;
        self.advance(PipelineStage::Translated);

        let (entry, financial_records) = self.ingest_text(user_id, &translated_text).await?;
        self.advance(PipelineStage::Extracted);

        tracing::info!(
            upload_id = %upload.id,
            translated_text_id = %entry.id,
            records = financial_records.len(),
            stage = PipelineStage::Done.as_str(),
            "Pipeline run completed"
        );

        Ok(PipelineResponse {
            original_transcription: transcription,
            translated_text,
            financial_records,
        })
    }

    /// Persist a translated (or directly submitted) text entry and run
    /// structured extraction over it. Also serves the direct text endpoint.
    ///
    /// Candidates failing schema validation are dropped; zero surviving
    /// records is a normal outcome, not an error. Only a failure of the
    /// overall extraction call is hard.
    pub async fn ingest_text(
        &self,
        user_id: Uuid,
        text: &str,
    ) -> Result<(TranslatedTextEntry, Vec<FinancialRecordResponse>), AppError> {
        let entry = self
            .texts
            .create(user_id, text)
            .await
            .map_err(|e| self.fail(PipelineStage::Translated, e))?;

        let candidates = self
            .extractor
            .extract(text)
            .await
            .map_err(|e| self.fail(PipelineStage::TextSaved, AppError::Extraction(e)))?;

        let total = candidates.len();
        let valid: Vec<NewFinancialRecord> = candidates
            .into_iter()
            .filter_map(NewFinancialRecord::try_from_candidate)
            .collect();
        if valid.len() < total {
            tracing::debug!(
                dropped = total - valid.len(),
                "Dropped extraction candidates failing schema validation"
            );
        }

        let saved = self
            .records
            .insert_many(user_id, entry.id, &valid)
            .await
            .map_err(|e| self.fail(PipelineStage::Extracted, e))?;

        Ok((
            entry,
            saved.into_iter().map(FinancialRecordResponse::from).collect(),
        ))
    }

    fn advance(&self, stage: PipelineStage) -> PipelineStage {
        tracing::debug!(stage = stage.as_str(), "Pipeline stage reached");
        stage
    }

    /// Terminal failure: log which stage broke and hand the error back
    /// unchanged. Artifacts committed before this point stay committed.
    fn fail(&self, last_stage: PipelineStage, error: AppError) -> AppError {
        tracing::warn!(
            failed_after = last_stage.as_str(),
            error = %error,
            "Pipeline run failed"
        );
        error
    }
}
