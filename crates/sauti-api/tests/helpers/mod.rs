//! Test helpers: in-memory stores, scripted service clients with call
//! counters, and a builder that assembles the router for `TestServer`.
#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use chrono::Utc;
use sauti_api::setup::routes::build_router;
use sauti_api::state::AppState;
use sauti_core::models::{
    AudioUpload, FinancialRecord, NewFinancialRecord, RecordCandidate, TranslatedTextEntry,
};
use sauti_core::{
    AppError, Config, FinancialRecordStore, RecordExtractor, SpeechToText, TranslatedTextStore,
    Translator, UploadStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// One in-memory store backing all three persistence traits, mirroring the
/// relational layout closely enough to assert on partial-failure trails.
#[derive(Clone, Default)]
pub struct MemoryStore {
    uploads: Arc<Mutex<Vec<AudioUpload>>>,
    texts: Arc<Mutex<Vec<TranslatedTextEntry>>>,
    records: Arc<Mutex<Vec<FinancialRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self, user_id: Uuid) -> usize {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.user_id == user_id)
            .count()
    }

    pub fn uploads(&self) -> Vec<AudioUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<TranslatedTextEntry> {
        self.texts.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<FinancialRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Pre-populate a user with `count` historic uploads.
    pub fn seed_uploads(&self, user_id: Uuid, count: usize) {
        let mut uploads = self.uploads.lock().unwrap();
        for _ in 0..count {
            uploads.push(AudioUpload {
                id: Uuid::new_v4(),
                user_id,
                byte_len: 1,
                language: "lug".to_string(),
                created_at: Utc::now(),
            });
        }
    }
}

#[async_trait]
impl UploadStore for MemoryStore {
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AppError> {
        Ok(self.upload_count(user_id) as i64)
    }

    async fn create_guarded(
        &self,
        user_id: Uuid,
        audio: Bytes,
        language: &str,
        limit: i64,
    ) -> Result<Option<AudioUpload>, AppError> {
        let mut uploads = self.uploads.lock().unwrap();
        let count = uploads.iter().filter(|u| u.user_id == user_id).count() as i64;
        if count >= limit {
            return Ok(None);
        }
        let upload = AudioUpload {
            id: Uuid::new_v4(),
            user_id,
            byte_len: audio.len() as i64,
            language: language.to_string(),
            created_at: Utc::now(),
        };
        uploads.push(upload.clone());
        Ok(Some(upload))
    }
}

#[async_trait]
impl TranslatedTextStore for MemoryStore {
    async fn create(&self, user_id: Uuid, content: &str) -> Result<TranslatedTextEntry, AppError> {
        let entry = TranslatedTextEntry {
            id: Uuid::new_v4(),
            user_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.texts.lock().unwrap().push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl FinancialRecordStore for MemoryStore {
    async fn insert_many(
        &self,
        user_id: Uuid,
        translated_text_id: Uuid,
        records: &[NewFinancialRecord],
    ) -> Result<Vec<FinancialRecord>, AppError> {
        let mut stored = self.records.lock().unwrap();
        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            let row = FinancialRecord {
                id: Uuid::new_v4(),
                user_id,
                translated_text_id,
                product_name: record.product_name.clone(),
                quantity: record.quantity,
                unit_price: record.unit_price,
                total_price: record.total_price,
                transaction_type: record.transaction_type,
                created_at: Utc::now(),
            };
            stored.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FinancialRecord>, AppError> {
        // Reverse insertion order stands in for ORDER BY created_at DESC.
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .rev()
            .cloned()
            .collect())
    }
}

/// Scripted speech-to-text client: a fixed reply or a failure, plus a call
/// counter so tests can assert a stage was never reached.
#[derive(Clone)]
pub struct StubSpeech {
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubSpeech {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechToText for StubSpeech {
    async fn transcribe(&self, _audio: Bytes, _language: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(anyhow::anyhow!("speech-to-text service unavailable")),
        }
    }
}

#[derive(Clone)]
pub struct StubTranslator {
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubTranslator {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source_language: &str,
        _target_language: &str,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(anyhow::anyhow!("translation service timed out")),
        }
    }
}

/// Scripted extractor: candidates are given as a JSON array, parsed the same
/// lenient way the real client parses model output.
#[derive(Clone)]
pub struct StubExtractor {
    reply: Option<serde_json::Value>,
    calls: Arc<AtomicUsize>,
}

impl StubExtractor {
    pub fn ok(reply: serde_json::Value) -> Self {
        Self {
            reply: Some(reply),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordExtractor for StubExtractor {
    async fn extract(&self, _text: &str) -> anyhow::Result<Vec<RecordCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = match &self.reply {
            Some(value) => value.clone(),
            None => return Err(anyhow::anyhow!("extraction service unreachable")),
        };
        let elements = reply
            .as_array()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("stub reply must be an array"))?;
        Ok(elements
            .into_iter()
            .filter_map(RecordCandidate::from_value)
            .collect())
    }
}

fn test_config(upload_limit: i64, max_audio_bytes: usize) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 5,
        request_timeout_seconds: 5,
        max_audio_uploads: upload_limit,
        max_audio_bytes,
        sunbird_api_url: "http://unused".to_string(),
        sunbird_auth_token: "unused".to_string(),
        openrouter_api_url: "http://unused".to_string(),
        openrouter_api_key: "unused".to_string(),
        extraction_model: "unused".to_string(),
    }
}

/// Assembled test application.
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
    pub stt: StubSpeech,
    pub translator: StubTranslator,
    pub extractor: StubExtractor,
}

pub struct TestAppBuilder {
    store: MemoryStore,
    stt: StubSpeech,
    translator: StubTranslator,
    extractor: StubExtractor,
    upload_limit: i64,
    max_audio_bytes: usize,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            store: MemoryStore::new(),
            stt: StubSpeech::ok("natunda ebbugumu"),
            translator: StubTranslator::ok("I bought bread"),
            extractor: StubExtractor::ok(serde_json::json!([{
                "product_name": "bread",
                "quantity": 1,
                "unit_price": 2000.0,
                "total_price": 2000.0,
                "transaction_type": "purchase"
            }])),
            upload_limit: 100,
            max_audio_bytes: 10 * 1024 * 1024,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stt(mut self, stt: StubSpeech) -> Self {
        self.stt = stt;
        self
    }

    pub fn translator(mut self, translator: StubTranslator) -> Self {
        self.translator = translator;
        self
    }

    pub fn extractor(mut self, extractor: StubExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn max_audio_bytes(mut self, max: usize) -> Self {
        self.max_audio_bytes = max;
        self
    }

    pub fn build(self) -> TestApp {
        let config = test_config(self.upload_limit, self.max_audio_bytes);
        let state = Arc::new(AppState::new(
            config,
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.stt.clone()),
            Arc::new(self.translator.clone()),
            Arc::new(self.extractor.clone()),
        ));
        let server = TestServer::new(build_router(state)).expect("failed to build test server");
        TestApp {
            server,
            store: self.store,
            stt: self.stt,
            translator: self.translator,
            extractor: self.extractor,
        }
    }
}
