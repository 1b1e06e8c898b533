//! Title-to-lyrics lookup pipeline.
//!
//! [`LyricsLookupService`] drives a [`TrackProvider`] through a fixed flow:
//! lazily initialize the provider session, search for the title, take the
//! top candidate, pick its artwork, fetch and normalize the lyrics. Every
//! fault is absorbed at the lookup boundary and reported as a structured
//! outcome rather than an error.

pub mod models;
pub mod provider;
pub mod service;

pub use models::{LookupFailure, LookupOutcome, LyricsResult};
pub use provider::{LyricsPayload, ProviderError, SongCandidate, Thumbnail, TrackProvider};
pub use service::LyricsLookupService;
