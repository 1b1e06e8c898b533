// SPDX-License-Identifier: GPL-3.0-or-later

//! Data models for YouTube Music search and lyrics responses.

use serde::{Deserialize, Serialize};

/// One track from a song search, in the order the backend ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongCandidate {
    /// Primary artist credited on the result.
    pub artist: String,
    /// Track title.
    pub title: String,
    /// Artwork variants, smallest first. May be empty.
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    /// Watch identifier, also the key for lyrics retrieval.
    pub video_id: String,
}

/// A single artwork variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Thumbnail {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }
}

/// Lyrics as returned for a track.
///
/// The backend is loosely shaped here: a lyrics page usually yields one
/// text block that splits into lines, but a track may have no lyrics page
/// at all. Callers collapse the payload with [`into_text`](Self::into_text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsPayload {
    /// Individual lines, joined with `'\n'` on canonicalization.
    Lines(Vec<String>),
    /// A single pre-joined block, kept verbatim.
    Text(String),
    /// The track has no lyrics attached.
    Missing,
}

impl LyricsPayload {
    /// Canonicalizes the payload into one block of text.
    ///
    /// `Lines` are joined with newlines. A `Text` value is returned
    /// untrimmed but counts as missing when blank. Empty sequences, blank
    /// text and `Missing` all yield `None`.
    pub fn into_text(self) -> Option<String> {
        match self {
            LyricsPayload::Lines(lines) => {
                let joined = lines.join("\n");
                if joined.trim().is_empty() {
                    None
                } else {
                    Some(joined)
                }
            }
            LyricsPayload::Text(text) => {
                if text.trim().is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
            LyricsPayload::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LyricsPayload;

    #[test]
    fn joins_lines_with_newlines() {
        let payload = LyricsPayload::Lines(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(payload.into_text().as_deref(), Some("a\nb"));
    }

    #[test]
    fn keeps_text_untrimmed() {
        let payload = LyricsPayload::Text("  hello \n".to_string());
        assert_eq!(payload.into_text().as_deref(), Some("  hello \n"));
    }

    #[test]
    fn blank_payloads_yield_none() {
        assert_eq!(LyricsPayload::Text(String::new()).into_text(), None);
        assert_eq!(LyricsPayload::Text("   ".to_string()).into_text(), None);
        assert_eq!(LyricsPayload::Lines(Vec::new()).into_text(), None);
        assert_eq!(
            LyricsPayload::Lines(vec![String::new(), String::new()]).into_text(),
            None
        );
        assert_eq!(LyricsPayload::Missing.into_text(), None);
    }
}
