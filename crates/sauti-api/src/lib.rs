//! Sauti HTTP API.
//!
//! Exposes the audio-to-financial-records pipeline over axum. Library form
//! so integration tests can assemble the router with injected stores and
//! clients.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod setup;
pub mod state;
pub mod telemetry;
