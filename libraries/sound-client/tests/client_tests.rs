//! Tests for the episode API client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real API.

use sound_client::{ClientConfig, ClientError, EpisodeClient, EpisodeQuery, SortOrder};
use sound_core::EpisodeId;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn episode_json(id: &str, duration: serde_json::Value, published_at: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Episode {}", id),
        "members": "Diego Fernandes e Richard Lopes",
        "published_at": published_at,
        "thumbnail": format!("https://storage.example.com/{}.jpg", id),
        "description": format!("<p>About {}</p>", id),
        "file": {
            "url": format!("https://storage.example.com/{}.m4a", id),
            "type": "audio/x-m4a",
            "duration": duration
        }
    })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        let client = EpisodeClient::new(ClientConfig::new("http://localhost:3333"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = EpisodeClient::new(ClientConfig::new(""));

        match result {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = EpisodeClient::new(ClientConfig::new("localhost:3333"));

        match result {
            Err(ClientError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_normalization_trailing_slash() {
        let client = EpisodeClient::new(ClientConfig::new("https://example.com/")).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_list_sends_query_and_maps_records() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes"))
            .and(query_param("_limit", "12"))
            .and(query_param("_order", "desc"))
            .and(query_param("_sort", "published_at"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                episode_json("a11y", serde_json::json!(3981), "2021-01-22 12:00:00"),
                episode_json("opensource", serde_json::json!("2230"), "2021-01-08 16:00:00"),
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let episodes = client.list_episodes(&EpisodeQuery::default()).await.unwrap();

        assert_eq!(episodes.len(), 2);

        let first = &episodes[0];
        assert_eq!(first.id.as_str(), "a11y");
        assert_eq!(first.duration, 3981);
        assert_eq!(first.duration_as_string, "01:06:21");
        assert_eq!(first.published_at, "22 jan 21");
        assert_eq!(first.url, "https://storage.example.com/a11y.m4a");

        let second = &episodes[1];
        assert_eq!(second.duration, 2230);
        assert_eq!(second.duration_as_string, "00:37:10");
        assert_eq!(second.published_at, "8 jan 21");
    }

    #[tokio::test]
    async fn test_list_custom_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes"))
            .and(query_param("_order", "asc"))
            .and(query_param("_sort", "title"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let query = EpisodeQuery {
            limit: None,
            order: SortOrder::Asc,
            sort: "title".to_string(),
        };

        let episodes = client.list_episodes(&query).await.unwrap();
        assert!(episodes.is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_malformed_records() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                episode_json("good", serde_json::json!("60"), "2021-01-22 12:00:00"),
                episode_json("bad-duration", serde_json::json!("forever"), "2021-01-22 12:00:00"),
                episode_json("bad-date", serde_json::json!(60), "someday"),
            ])))
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let episodes = client.list_episodes(&EpisodeQuery::default()).await.unwrap();

        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id.as_str(), "good");
    }

    #[tokio::test]
    async fn test_list_skips_structurally_broken_records() {
        let mock_server = MockServer::start().await;

        let mut missing_file = episode_json("no-file", serde_json::json!(60), "2021-01-22 12:00:00");
        missing_file
            .as_object_mut()
            .unwrap()
            .remove("file");

        Mock::given(method("GET"))
            .and(path("/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                episode_json("good", serde_json::json!("3981"), "2021-01-22 12:00:00"),
                episode_json("null-duration", serde_json::Value::Null, "2021-01-22 12:00:00"),
                episode_json("bool-duration", serde_json::json!(true), "2021-01-22 12:00:00"),
                missing_file,
                serde_json::json!("not an object"),
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let episodes = client.list_episodes(&EpisodeQuery::default()).await.unwrap();

        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id.as_str(), "good");
        assert_eq!(episodes[0].duration, 3981);
    }

    #[tokio::test]
    async fn test_list_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let result = client.list_episodes(&EpisodeQuery::default()).await;

        match result {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let result = client.list_episodes(&EpisodeQuery::default()).await;

        assert!(matches!(result, Err(ClientError::ParseError(_))));
    }
}

// =============================================================================
// Detail Tests
// =============================================================================

mod detail {
    use super::*;

    #[tokio::test]
    async fn test_get_episode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes/a11y"))
            .respond_with(ResponseTemplate::new(200).set_body_json(episode_json(
                "a11y",
                serde_json::json!("3981"),
                "2021-01-22T12:00:00",
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let episode = client.get_episode(&EpisodeId::new("a11y")).await.unwrap();

        assert_eq!(episode.title, "Episode a11y");
        assert_eq!(episode.members, "Diego Fernandes e Richard Lopes");
        assert_eq!(episode.duration_as_string, "01:06:21");
        assert_eq!(episode.published_at, "22 jan 21");
        assert_eq!(episode.description.as_deref(), Some("<p>About a11y</p>"));
    }

    #[tokio::test]
    async fn test_get_episode_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let result = client.get_episode(&EpisodeId::new("missing")).await;

        match result {
            Err(ClientError::NotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_episode_rejects_bad_duration() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/episodes/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(episode_json(
                "broken",
                serde_json::json!("-30"),
                "2021-01-22 12:00:00",
            )))
            .mount(&mock_server)
            .await;

        let client = EpisodeClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let result = client.get_episode(&EpisodeId::new("broken")).await;

        match result {
            Err(ClientError::InvalidRecord { id, reason }) => {
                assert_eq!(id, "broken");
                assert!(reason.contains("negative"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }
}

// =============================================================================
// Connection Tests
// =============================================================================

mod connection {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server() {
        // Port 9 (discard) is almost never listening locally
        let client = EpisodeClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let result = client.list_episodes(&EpisodeQuery::default()).await;

        match result {
            Err(ClientError::ServerUnreachable(_)) | Err(ClientError::Request(_)) => {}
            other => panic!("Expected ServerUnreachable or Request error, got {:?}", other),
        }
    }
}
