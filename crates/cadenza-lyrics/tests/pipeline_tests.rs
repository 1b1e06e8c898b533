//! End-to-end pipeline tests: the lookup service driving a real
//! [`YtMusicClient`] against a mocked InnerTube backend.

use cadenza_lyrics::{LookupOutcome, LyricsLookupService};
use cadenza_ytmusic::YtMusicClient;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_shell_page() -> String {
    "<!DOCTYPE html><html><head><script>ytcfg.set({\
     \"INNERTUBE_API_KEY\":\"AIzaSyPipelineKey42\",\
     \"INNERTUBE_CLIENT_VERSION\":\"1.20260214.01.00\"\
     });</script></head><body></body></html>"
        .to_string()
}

fn imagine_search_response() -> serde_json::Value {
    serde_json::json!({
        "contents": {
            "tabbedSearchResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [{
                                    "musicShelfRenderer": {
                                        "title": { "runs": [{ "text": "Songs" }] },
                                        "contents": [{
                                            "musicResponsiveListItemRenderer": {
                                                "playlistItemData": { "videoId": "vid-imagine" },
                                                "thumbnail": {
                                                    "musicThumbnailRenderer": {
                                                        "thumbnail": {
                                                            "thumbnails": [
                                                                { "url": "https://img.test/imagine-small.jpg", "width": 60, "height": 60 },
                                                                { "url": "https://img.test/imagine-large.jpg", "width": 120, "height": 120 }
                                                            ]
                                                        }
                                                    }
                                                },
                                                "flexColumns": [
                                                    {
                                                        "musicResponsiveListItemFlexColumnRenderer": {
                                                            "text": { "runs": [{ "text": "Imagine" }] }
                                                        }
                                                    },
                                                    {
                                                        "musicResponsiveListItemFlexColumnRenderer": {
                                                            "text": { "runs": [{ "text": "John Lennon" }] }
                                                        }
                                                    }
                                                ]
                                            }
                                        }]
                                    }
                                }]
                            }
                        }
                    }
                }]
            }
        }
    })
}

fn empty_search_response() -> serde_json::Value {
    serde_json::json!({
        "contents": {
            "tabbedSearchResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [{
                                    "itemSectionRenderer": {
                                        "contents": [{ "messageRenderer": {} }]
                                    }
                                }]
                            }
                        }
                    }
                }]
            }
        }
    })
}

fn watch_next_response(lyrics_browse_id: Option<&str>) -> serde_json::Value {
    let mut tabs = vec![serde_json::json!({
        "tabRenderer": { "title": "Up next", "selected": true }
    })];

    if let Some(browse_id) = lyrics_browse_id {
        tabs.push(serde_json::json!({
            "tabRenderer": {
                "title": "Lyrics",
                "endpoint": { "browseEndpoint": { "browseId": browse_id } }
            }
        }));
    }

    serde_json::json!({
        "contents": {
            "singleColumnMusicWatchNextResultsRenderer": {
                "tabbedRenderer": {
                    "watchNextTabbedResultsRenderer": { "tabs": tabs }
                }
            }
        }
    })
}

fn lyrics_browse_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": {
            "sectionListRenderer": {
                "contents": [{
                    "musicDescriptionShelfRenderer": {
                        "description": { "runs": [{ "text": text }] }
                    }
                }]
            }
        }
    })
}

async fn mount_app_shell(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(app_shell_page()))
        .mount(server)
        .await;
}

fn service_against(server: &MockServer) -> LyricsLookupService<YtMusicClient> {
    let client = YtMusicClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap();
    LyricsLookupService::new(client)
}

#[tokio::test]
async fn test_pipeline_returns_lyrics() {
    let mock_server = MockServer::start().await;
    mount_app_shell(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/search"))
        .and(body_partial_json(serde_json::json!({ "query": "Imagine" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(imagine_search_response()))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/next"))
        .and(body_partial_json(
            serde_json::json!({ "videoId": "vid-imagine" }),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(watch_next_response(Some("MPLYt_imagine"))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/browse"))
        .and(body_partial_json(
            serde_json::json!({ "browseId": "MPLYt_imagine" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(lyrics_browse_response(
            "Imagine there's no heaven\nIt's easy if you try",
        )))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);

    match service.lookup("Imagine").await {
        LookupOutcome::Found(result) => {
            assert_eq!(result.artist_name, "John Lennon");
            assert_eq!(result.track_name, "Imagine");
            assert_eq!(result.search_engine, "YouTube");
            assert_eq!(result.artwork_url, "https://img.test/imagine-large.jpg");
            assert_eq!(
                result.lyrics,
                "Imagine there's no heaven\nIt's easy if you try"
            );
        }
        other => panic!("expected Found, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_pipeline_initializes_once() {
    let mock_server = MockServer::start().await;
    mount_app_shell(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_search_response()))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);

    service.lookup("first").await;
    service.lookup("second").await;

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests.len(),
        3,
        "expected one app shell fetch plus two searches"
    );
}

#[tokio::test]
async fn test_pipeline_not_found() {
    let mock_server = MockServer::start().await;
    mount_app_shell(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_search_response()))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);

    match service.lookup("zzzzzz no such song").await {
        LookupOutcome::NotFound(failure) => {
            assert_eq!(failure.message, "No songs found for the given title.");
            assert_eq!(failure.response, "404 Not Found");
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_pipeline_internal_error_on_backend_failure() {
    let mock_server = MockServer::start().await;
    mount_app_shell(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);

    match service.lookup("Imagine").await {
        LookupOutcome::Internal(failure) => {
            assert_eq!(
                failure.message,
                "An internal error occurred while fetching lyrics."
            );
            assert_eq!(failure.response, "500 Internal Server Error");
        }
        other => panic!("expected Internal, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_pipeline_placeholder_without_lyrics() {
    let mock_server = MockServer::start().await;
    mount_app_shell(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(imagine_search_response()))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(watch_next_response(None)))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);

    match service.lookup("Imagine").await {
        LookupOutcome::Found(result) => {
            assert_eq!(result.lyrics, "No lyrics available for this song.");
        }
        other => panic!("expected Found, got: {other:?}"),
    }
}
