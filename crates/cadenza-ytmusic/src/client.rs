// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{parse_innertube_body, Result, YtMusicError};
use crate::models::{LyricsPayload, SongCandidate, Thumbnail};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;

const YTMUSIC_BASE: &str = "https://music.youtube.com";
const INNERTUBE_CLIENT_NAME: &str = "WEB_REMIX";
/// Search filter restricting results to the Songs category.
const SONGS_FILTER_PARAM: &str = "Eg-KAQwIARAAGAAgACgAMABqChAEEAMQCRAFEAo%3D";
/// Browse ids of per-track lyrics pages carry this prefix.
const LYRICS_BROWSE_PREFIX: &str = "MPLYt";
/// The app shell serves a reduced page to non-browser user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Session parameters mined from the web app shell during initialization.
#[derive(Debug, Clone)]
struct InnerTubeSession {
    api_key: String,
    client_version: String,
}

/// YouTube Music API client.
///
/// [`initialize`](Self::initialize) must complete once before the search and
/// lyrics calls; it scrapes the web app shell for the InnerTube API key and
/// client version the backend expects.
#[derive(Debug)]
pub struct YtMusicClient {
    client: Client,
    base_url: String,
    language: String,
    session: OnceCell<InnerTubeSession>,
}

impl YtMusicClient {
    /// Create a new client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> YtMusicClientBuilder {
        YtMusicClientBuilder::default()
    }

    /// Establish the InnerTube session.
    ///
    /// Fetches the app shell and stores the API key and client version it
    /// advertises. Calling this again after success is a no-op; after a
    /// failure the next call retries the fetch.
    pub async fn initialize(&self) -> Result<()> {
        self.session.get_or_try_init(|| self.fetch_session()).await?;
        Ok(())
    }

    /// Search for songs matching a title, in the backend's ranking order.
    ///
    /// # Example
    /// ```no_run
    /// # use cadenza_ytmusic::YtMusicClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = YtMusicClient::new()?;
    /// client.initialize().await?;
    /// let songs = client.search_songs("Imagine").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_songs(&self, title: &str) -> Result<Vec<SongCandidate>> {
        let payload = json!({
            "context": self.request_context()?,
            "query": title,
            "params": SONGS_FILTER_PARAM,
        });

        let response = self.post("search", &payload).await?;
        let candidates = parse_search_results(&response);

        debug!(
            target: "ytmusic",
            "search for {:?} returned {} song(s)",
            title,
            candidates.len()
        );

        Ok(candidates)
    }

    /// Fetch lyrics for a track by video id.
    ///
    /// Two-step flow: the watch metadata (`next`) names the track's lyrics
    /// browse page, and the browse page carries the text. A track without a
    /// lyrics tab resolves to [`LyricsPayload::Missing`].
    ///
    /// # Example
    /// ```no_run
    /// # use cadenza_ytmusic::YtMusicClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = YtMusicClient::new()?;
    /// client.initialize().await?;
    /// let lyrics = client.fetch_lyrics("dQw4w9WgXcQ").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_lyrics(&self, video_id: &str) -> Result<LyricsPayload> {
        let payload = json!({
            "context": self.request_context()?,
            "videoId": video_id,
        });
        let next = self.post("next", &payload).await?;

        let Some(browse_id) = find_lyrics_browse_id(&next) else {
            debug!(target: "ytmusic", "track {} has no lyrics tab", video_id);
            return Ok(LyricsPayload::Missing);
        };

        let payload = json!({
            "context": self.request_context()?,
            "browseId": browse_id,
        });
        let browse = self.post("browse", &payload).await?;

        Ok(parse_lyrics(&browse))
    }

    async fn fetch_session(&self) -> Result<InnerTubeSession> {
        let url = format!("{}/", self.base_url);
        trace!(target: "ytmusic", "GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", &self.language)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(YtMusicError::HttpStatus { status, body });
        }

        let api_key = extract_shell_value(&body, "INNERTUBE_API_KEY")
            .ok_or(YtMusicError::MissingField("INNERTUBE_API_KEY"))?;
        let client_version = extract_shell_value(&body, "INNERTUBE_CLIENT_VERSION")
            .ok_or(YtMusicError::MissingField("INNERTUBE_CLIENT_VERSION"))?;

        debug!(
            target: "ytmusic",
            "initialized InnerTube session, client version {}", client_version
        );

        Ok(InnerTubeSession {
            api_key,
            client_version,
        })
    }

    fn session(&self) -> Result<&InnerTubeSession> {
        self.session.get().ok_or(YtMusicError::NotInitialized)
    }

    fn request_context(&self) -> Result<Value> {
        let session = self.session()?;
        Ok(json!({
            "client": {
                "clientName": INNERTUBE_CLIENT_NAME,
                "clientVersion": session.client_version,
                "hl": self.language,
            }
        }))
    }

    /// Internal method to perform InnerTube POST requests.
    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        let session = self.session()?;
        let url = format!("{}/youtubei/v1/{}", self.base_url, endpoint);

        trace!(target: "ytmusic", "POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "json"), ("key", session.api_key.as_str())])
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        debug!(target: "ytmusic", "{} response status: {}", endpoint, status);

        let body = response.text().await?;
        parse_innertube_body(status, &body)
    }
}

/// Extract a quoted string assigned to `key` inside the app shell page,
/// e.g. `"INNERTUBE_API_KEY":"AIza..."`.
fn extract_shell_value(shell: &str, key: &str) -> Option<String> {
    let marker = format!("\"{}\":\"", key);
    let start = shell.find(&marker)? + marker.len();
    let rest = &shell[start..];
    let end = rest.find('"')?;
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_string())
}

fn parse_search_results(value: &Value) -> Vec<SongCandidate> {
    let Some(sections) = search_sections(value) else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    for section in sections {
        let Some(items) = section
            .get("musicShelfRenderer")
            .and_then(|shelf| shelf.get("contents"))
            .and_then(Value::as_array)
        else {
            continue;
        };

        candidates.extend(items.iter().filter_map(parse_candidate));
    }
    candidates
}

fn search_sections(value: &Value) -> Option<&Vec<Value>> {
    value
        .get("contents")?
        .get("tabbedSearchResultsRenderer")?
        .get("tabs")?
        .get(0)?
        .get("tabRenderer")?
        .get("content")?
        .get("sectionListRenderer")?
        .get("contents")?
        .as_array()
}

fn parse_candidate(item: &Value) -> Option<SongCandidate> {
    let renderer = item.get("musicResponsiveListItemRenderer")?;

    let video_id = renderer
        .get("playlistItemData")
        .and_then(|data| data.get("videoId"))
        .and_then(Value::as_str)?;

    // Column 0 holds the title, column 1 the artist credit.
    let title = flex_column_run(renderer, 0)?;
    let artist = flex_column_run(renderer, 1).unwrap_or_default();

    let thumbnails = renderer
        .get("thumbnail")
        .and_then(|thumbnail| thumbnail.get("musicThumbnailRenderer"))
        .and_then(|renderer| renderer.get("thumbnail"))
        .and_then(|thumbnail| thumbnail.get("thumbnails"))
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_thumbnail).collect())
        .unwrap_or_default();

    Some(SongCandidate {
        artist,
        title,
        thumbnails,
        video_id: video_id.to_string(),
    })
}

/// Read the first text run of the item's n-th flex column.
fn flex_column_run(renderer: &Value, index: usize) -> Option<String> {
    renderer
        .get("flexColumns")?
        .get(index)?
        .get("musicResponsiveListItemFlexColumnRenderer")?
        .get("text")?
        .get("runs")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

fn parse_thumbnail(entry: &Value) -> Option<Thumbnail> {
    let url = entry.get("url")?.as_str()?;
    Some(Thumbnail {
        url: url.to_string(),
        width: entry.get("width").and_then(Value::as_u64).map(|w| w as u32),
        height: entry.get("height").and_then(Value::as_u64).map(|h| h as u32),
    })
}

/// Locate the lyrics tab's browse id in a `next` response.
fn find_lyrics_browse_id(value: &Value) -> Option<String> {
    let tabs = value
        .get("contents")?
        .get("singleColumnMusicWatchNextResultsRenderer")?
        .get("tabbedRenderer")?
        .get("watchNextTabbedResultsRenderer")?
        .get("tabs")?
        .as_array()?;

    tabs.iter().find_map(|tab| {
        let browse_id = tab
            .get("tabRenderer")?
            .get("endpoint")?
            .get("browseEndpoint")?
            .get("browseId")?
            .as_str()?;
        browse_id
            .starts_with(LYRICS_BROWSE_PREFIX)
            .then(|| browse_id.to_string())
    })
}

/// Read the lyrics text out of a browse response and split it into lines.
fn parse_lyrics(value: &Value) -> LyricsPayload {
    let text = value
        .get("contents")
        .and_then(|contents| contents.get("sectionListRenderer"))
        .and_then(|section| section.get("contents"))
        .and_then(|contents| contents.get(0))
        .and_then(|section| section.get("musicDescriptionShelfRenderer"))
        .and_then(|shelf| shelf.get("description"))
        .and_then(|description| description.get("runs"))
        .and_then(|runs| runs.get(0))
        .and_then(|run| run.get("text"))
        .and_then(Value::as_str);

    match text {
        Some(text) if !text.trim().is_empty() => {
            LyricsPayload::Lines(text.split('\n').map(str::to_string).collect())
        }
        _ => LyricsPayload::Missing,
    }
}

/// Builder for configuring a YouTube Music client.
#[derive(Debug)]
pub struct YtMusicClientBuilder {
    base_url: String,
    timeout: Duration,
    language: String,
}

impl Default for YtMusicClientBuilder {
    fn default() -> Self {
        Self {
            base_url: YTMUSIC_BASE.to_string(),
            timeout: Duration::from_secs(30),
            language: "en".to_string(),
        }
    }
}

impl YtMusicClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the interface language sent with every request.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Build the YouTube Music client.
    pub fn build(self) -> Result<YtMusicClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| YtMusicError::InvalidBaseUrl(base_url.clone()))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(YtMusicClient {
            client,
            base_url,
            language: self.language,
            session: OnceCell::new(),
        })
    }
}
