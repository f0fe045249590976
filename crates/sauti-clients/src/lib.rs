//! External-service clients for the audio pipeline.
//!
//! [`SunbirdClient`] covers speech-to-text and NLLB translation;
//! [`OpenRouterExtractor`] covers language-model structured extraction. All
//! clients take their base URL at construction (so tests can point them at a
//! local mock server) and carry a finite request timeout; none of them retry.

pub mod extraction;
pub mod sunbird;

pub use extraction::OpenRouterExtractor;
pub use sunbird::SunbirdClient;
