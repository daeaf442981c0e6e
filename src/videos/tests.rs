// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod videos_test {
    use crate::common::{Error, ScrapConfig};
    use crate::videos::{Video, VideoId, VideoSearch, YoutubeVideos};
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const SEARCH_RESPONSE: &str = r#"{
        "kind": "youtube#searchListResponse",
        "items": [
            {
                "id": { "kind": "youtube#video", "videoId": "a" },
                "snippet": {
                    "publishedAt": "2024-05-01T09:00:00Z",
                    "title": "LH 청약 총정리",
                    "description": "first",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/a/default.jpg" },
                        "medium": { "url": "https://i.ytimg.com/vi/a/mqdefault.jpg", "width": 320 }
                    }
                }
            },
            {
                "id": { "kind": "youtube#video", "videoId": "b" },
                "snippet": {
                    "publishedAt": "2024-05-02T09:00:00Z",
                    "title": "신혼부부 특별공급",
                    "description": "second",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/b/default.jpg" }
                    }
                }
            }
        ]
    }"#;

    fn youtube_for(base_url: &str) -> YoutubeVideos {
        let scrap_config = ScrapConfig::builder()
            .toml_string(format!(
                r#"
                [youtube]
                api_key = "k&y"
                base_url = "{base_url}/"
                "#
            ))
            .build()
            .expect("youtube config");
        YoutubeVideos::new(&scrap_config).expect("youtube client")
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[test]
    fn parse_videos_tests() {
        let videos = YoutubeVideos::parse_videos(SEARCH_RESPONSE).expect("parse");
        assert_eq!(
            videos,
            vec![
                Video {
                    id: VideoId("a".to_string()),
                    title: "LH 청약 총정리".to_string(),
                    description: "first".to_string(),
                    thumbnail: "https://i.ytimg.com/vi/a/mqdefault.jpg".to_string(),
                    upload_date: "2024-05-01T09:00:00Z".to_string(),
                    is_shorts: None,
                },
                Video {
                    id: VideoId("b".to_string()),
                    title: "신혼부부 특별공급".to_string(),
                    description: "second".to_string(),
                    thumbnail: String::new(),
                    upload_date: "2024-05-02T09:00:00Z".to_string(),
                    is_shorts: None,
                },
            ]
        );

        assert!(YoutubeVideos::parse_videos(r#"{"items": []}"#)
            .expect("empty")
            .is_empty());
        assert!(matches!(
            YoutubeVideos::parse_videos(r#"{"items": [{"snippet": {}}]}"#),
            Err(Error::Serde(_))
        ));
    }

    #[test]
    fn search_url_tests() {
        let youtube = youtube_for("http://localhost:9");
        assert_eq!(
            youtube.search_url("LH 청약", 8),
            "http://localhost:9/search?part=snippet&type=video&maxResults=8&q=LH%20%EC%B2%AD%EC%95%BD&key=k%26y"
        );
        assert!(youtube.search_url("x", 0).contains("maxResults=1&"));
        assert!(youtube.search_url("x", 500).contains("maxResults=50&"));
        assert!(youtube
            .search_url("  ", 8)
            .contains("&q=%EC%B2%AD%EC%95%BD&"));
    }

    #[tokio::test]
    async fn youtube_search_tests() {
        let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Default::default();
        let seen_by_server = Arc::clone(&seen);
        let router = Router::new().route(
            "/search",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let seen = Arc::clone(&seen_by_server);
                async move {
                    *seen.lock().unwrap() = Some(params);
                    SEARCH_RESPONSE
                }
            }),
        );
        let youtube = youtube_for(&serve(router).await);

        let videos = youtube.search("LH청약", 2).await.expect("search");
        let ids: Vec<&str> = videos.iter().map(|video| video.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let params = seen.lock().unwrap().clone().expect("request seen");
        assert_eq!(params["part"], "snippet");
        assert_eq!(params["type"], "video");
        assert_eq!(params["maxResults"], "2");
        assert_eq!(params["q"], "LH청약");
        assert_eq!(params["key"], "k&y");
        assert!(!youtube.logger().contains_warnings());
    }

    #[tokio::test]
    async fn youtube_error_tests() {
        let router = Router::new().route(
            "/search",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    r#"{"error": {"code": 403, "message": "quota exceeded"}}"#,
                )
            }),
        );
        let youtube = youtube_for(&serve(router).await);
        match youtube.search("청약", 8).await {
            Err(Error::Http(status, message)) => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(message, "youtube error: quota exceeded");
            }
            other => panic!("unexpected {other:?}"),
        }

        let unreachable = youtube_for("http://127.0.0.1:9");
        assert!(matches!(
            unreachable.search("청약", 8).await,
            Err(Error::Http(_, _))
        ));
    }

    #[tokio::test]
    async fn youtube_error_hides_api_key_tests() {
        let scrap_config = ScrapConfig::builder()
            .toml_str(
                r#"
                [youtube]
                api_key = "SECRET123"
                base_url = "http://127.0.0.1:9"
                "#,
            )
            .build()
            .expect("youtube config");
        let youtube = YoutubeVideos::new(&scrap_config).expect("youtube client");
        let e = youtube.search("x", 8).await.expect_err("unreachable");
        let text = format!("{e} {e:?}");
        assert!(!text.contains("SECRET123"), "{text}");
    }
}
