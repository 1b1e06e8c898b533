// SPDX-License-Identifier: GPL-3.0-or-later

//! YouTube Music (InnerTube) client for Cadenza.
//!
//! Talks to the same private endpoints the YouTube Music web app uses: the
//! client first scrapes the app shell for an API key and client version,
//! then issues `search`, `next` and `browse` calls with that session. Only
//! the song-search and lyrics surfaces are exposed.

pub mod client;
pub mod error;
pub mod models;

pub use client::{YtMusicClient, YtMusicClientBuilder};
pub use error::{Result, YtMusicError};
pub use models::{LyricsPayload, SongCandidate, Thumbnail};
