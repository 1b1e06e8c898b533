use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument, warn};

use crate::models::{LookupOutcome, LyricsResult, NO_LYRICS_FALLBACK, SEARCH_ENGINE};
use crate::provider::{ProviderError, Thumbnail, TrackProvider};

/// Title-to-lyrics lookup over a [`TrackProvider`].
///
/// The provider session is initialized lazily on the first lookup and at
/// most once for the service's lifetime; concurrent first lookups collapse
/// onto a single initialization attempt. Candidate selection always takes
/// the provider's top-ranked result, with no title similarity check.
pub struct LyricsLookupService<P> {
    provider: P,
    init: OnceCell<()>,
}

#[derive(Debug, Error)]
enum LookupError {
    #[error("search returned no candidates")]
    NoResults,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl<P: TrackProvider> LyricsLookupService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            init: OnceCell::new(),
        }
    }

    /// Look up lyrics for a song title.
    ///
    /// Never fails from the caller's point of view: an empty search yields
    /// [`LookupOutcome::NotFound`], and any provider fault is logged here
    /// and folded into [`LookupOutcome::Internal`].
    #[instrument(skip(self))]
    pub async fn lookup(&self, title: &str) -> LookupOutcome {
        match self.lookup_track(title).await {
            Ok(result) => LookupOutcome::Found(result),
            Err(LookupError::NoResults) => {
                warn!(target: "lookup", "no songs matched {:?}", title);
                LookupOutcome::not_found()
            }
            Err(LookupError::Provider(fault)) => {
                error!(target: "lookup", "lookup for {:?} failed: {}", title, fault);
                LookupOutcome::internal_error()
            }
        }
    }

    async fn lookup_track(&self, title: &str) -> Result<LyricsResult, LookupError> {
        self.ensure_initialized().await?;

        let candidates = self.provider.search_tracks(title).await?;
        let Some(track) = candidates.into_iter().next() else {
            return Err(LookupError::NoResults);
        };

        debug!(
            target: "lookup",
            "selected {:?} by {:?} ({})",
            track.title,
            track.artist,
            track.video_id
        );

        let artwork_url = select_artwork(&track.thumbnails);
        let lyrics = self
            .provider
            .fetch_lyrics(&track.video_id)
            .await?
            .into_text()
            .unwrap_or_else(|| NO_LYRICS_FALLBACK.to_string());

        Ok(LyricsResult {
            artist_name: track.artist,
            track_name: track.title,
            search_engine: SEARCH_ENGINE.to_string(),
            artwork_url,
            lyrics,
        })
    }

    /// Run the provider's one-time initialization. A failure leaves the
    /// cell empty, so a later lookup retries.
    async fn ensure_initialized(&self) -> Result<(), ProviderError> {
        self.init
            .get_or_try_init(|| self.provider.initialize())
            .await?;
        Ok(())
    }
}

/// Artwork pick: the second thumbnail when there are at least two (the
/// higher resolution variant), otherwise the only one, otherwise empty.
fn select_artwork(thumbnails: &[Thumbnail]) -> String {
    match thumbnails {
        [] => String::new(),
        [only] => only.url.clone(),
        [_, second, ..] => second.url.clone(),
    }
}
