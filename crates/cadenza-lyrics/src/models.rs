use serde::{Deserialize, Serialize};

/// Catalog tag carried on every successful lookup.
pub const SEARCH_ENGINE: &str = "YouTube";

/// Placeholder lyrics for tracks the catalog has no lyrics for.
pub const NO_LYRICS_FALLBACK: &str = "No lyrics available for this song.";

pub const NOT_FOUND_MESSAGE: &str = "No songs found for the given title.";
pub const NOT_FOUND_STATUS: &str = "404 Not Found";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred while fetching lyrics.";
pub const INTERNAL_ERROR_STATUS: &str = "500 Internal Server Error";

/// A successful lookup: the selected track plus its normalized lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsResult {
    pub artist_name: String,
    pub track_name: String,
    /// Always [`SEARCH_ENGINE`].
    pub search_engine: String,
    /// Second-smallest artwork URL of the selected track, or its only one,
    /// or empty when the track has none.
    pub artwork_url: String,
    /// Newline-joined lyrics text, or [`NO_LYRICS_FALLBACK`].
    pub lyrics: String,
}

/// A failed lookup in the `{message, response}` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFailure {
    pub message: String,
    /// Status-line tag, `"404 Not Found"` or `"500 Internal Server Error"`.
    pub response: String,
}

/// Outcome of a lookup call.
///
/// Serializes untagged, so the wire shapes stay flat: a success object or
/// a `{message, response}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    Found(LyricsResult),
    NotFound(LookupFailure),
    Internal(LookupFailure),
}

impl LookupOutcome {
    /// The search returned no candidates.
    pub fn not_found() -> Self {
        Self::NotFound(LookupFailure {
            message: NOT_FOUND_MESSAGE.to_string(),
            response: NOT_FOUND_STATUS.to_string(),
        })
    }

    /// A pipeline step failed; details stay in the logs.
    pub fn internal_error() -> Self {
        Self::Internal(LookupFailure {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            response: INTERNAL_ERROR_STATUS.to_string(),
        })
    }
}
