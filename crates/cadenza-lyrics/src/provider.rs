use async_trait::async_trait;
use thiserror::Error;

pub use cadenza_ytmusic::models::{LyricsPayload, SongCandidate, Thumbnail};
use cadenza_ytmusic::YtMusicClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("initialization failed: {0}")]
    Initialize(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("lyrics fetch failed: {0}")]
    Lyrics(String),
}

/// Remote catalog capability consumed by the lookup pipeline: one-time
/// session setup, title search, and lyrics retrieval by track id.
#[async_trait]
pub trait TrackProvider: Send + Sync {
    /// Prepare the provider session. Must complete once before the other
    /// calls; safe to call again after a failure.
    async fn initialize(&self) -> Result<(), ProviderError>;

    /// Search the catalog for tracks matching `title`, best match first.
    async fn search_tracks(&self, title: &str) -> Result<Vec<SongCandidate>, ProviderError>;

    /// Retrieve the lyrics payload for one track.
    async fn fetch_lyrics(&self, video_id: &str) -> Result<LyricsPayload, ProviderError>;
}

#[async_trait]
impl TrackProvider for YtMusicClient {
    async fn initialize(&self) -> Result<(), ProviderError> {
        YtMusicClient::initialize(self)
            .await
            .map_err(|error| ProviderError::Initialize(error.to_string()))
    }

    async fn search_tracks(&self, title: &str) -> Result<Vec<SongCandidate>, ProviderError> {
        self.search_songs(title)
            .await
            .map_err(|error| ProviderError::Search(error.to_string()))
    }

    async fn fetch_lyrics(&self, video_id: &str) -> Result<LyricsPayload, ProviderError> {
        YtMusicClient::fetch_lyrics(self, video_id)
            .await
            .map_err(|error| ProviderError::Lyrics(error.to_string()))
    }
}
