// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod scraps_test {
    use crate::common::{Error, ScrapConfig};
    use crate::log::DiagnosticLog;
    use crate::scraps::{MemoryScraps, ScrapPersistence, ScrapStore, SupabaseScraps};
    use crate::videos::{Video, VideoId};
    use async_trait::async_trait;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct FailingScraps;

    #[async_trait]
    impl ScrapPersistence for FailingScraps {
        async fn load(&self) -> Result<Vec<Video>, Error> {
            Err(Error::String("offline".to_string()))
        }

        async fn save(&self, _video: &Video) -> Result<(), Error> {
            Err(Error::String("offline".to_string()))
        }

        async fn remove(&self, _id: &VideoId) -> Result<(), Error> {
            Err(Error::String("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn scrap_store_tests() {
        let persistence = Arc::new(MemoryScraps::with_videos(vec![Video::new("a")]));
        let store = ScrapStore::new(persistence.clone(), DiagnosticLog::default());
        assert!(store.scrapped_ids().is_empty());

        store.load_persisted().await;
        assert!(store.is_scrapped("a"));
        assert_eq!(store.scrapped_ids().len(), 1);

        let shared = store.clone();
        shared.set_scraps(vec![Video::new("a"), Video::new("b")]);
        assert_eq!(store.scraps().len(), 2);

        let b = Video::new("b");
        assert!(store.toggle_scrap(&b).await.expect("scrap b"));
        assert!(store.is_scrapped("b"));
        assert_eq!(persistence.load().await.expect("load").len(), 2);

        assert!(!store.toggle_scrap(&b).await.expect("unscrap b"));
        assert!(!store.is_scrapped("b"));
        let ids: Vec<VideoId> = persistence
            .load()
            .await
            .expect("load")
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![VideoId("a".to_string())]);
        assert!(!store.logger().contains_warnings());
    }

    #[tokio::test]
    async fn scrap_store_failure_tests() {
        let store = ScrapStore::new(Arc::new(FailingScraps), DiagnosticLog::default());
        store.set_scraps(vec![Video::new("a")]);
        store.load_persisted().await;
        assert!(store.scrapped_ids().is_empty());
        assert!(store.logger().contains("load persisted scraps failed"));

        assert!(store.toggle_scrap(&Video::new("a")).await.is_err());
        assert!(!store.is_scrapped("a"));
        assert_eq!(store.scraps().len(), 1);
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

    #[tokio::test]
    async fn supabase_tests() {
        #[derive(Default)]
        struct Seen {
            apikey: Option<String>,
            inserted: Option<Value>,
            deleted: Option<HashMap<String, String>>,
        }
        let seen: Arc<Mutex<Seen>> = Default::default();

        let (list_seen, insert_seen, delete_seen) =
            (Arc::clone(&seen), Arc::clone(&seen), Arc::clone(&seen));
        let router = Router::new().route(
            "/rest/v1/bookmarks",
            get(move |headers: HeaderMap| {
                let seen = Arc::clone(&list_seen);
                async move {
                    seen.lock().unwrap().apikey = headers
                        .get("apikey")
                        .and_then(|v| v.to_str().ok())
                        .map(|v| v.to_string());
                    Json(serde_json::json!([
                        {
                            "id": "a",
                            "title": "LH 청약",
                            "description": "",
                            "thumbnail": "https://i.ytimg.com/vi/a/mqdefault.jpg",
                            "upload_date": "2024-05-01T09:00:00Z"
                        }
                    ]))
                }
            })
            .post(move |Json(body): Json<Value>| {
                let seen = Arc::clone(&insert_seen);
                async move {
                    seen.lock().unwrap().inserted = Some(body);
                    StatusCode::CREATED
                }
            })
            .delete(move |Query(params): Query<HashMap<String, String>>| {
                let seen = Arc::clone(&delete_seen);
                async move {
                    seen.lock().unwrap().deleted = Some(params);
                    StatusCode::NO_CONTENT
                }
            }),
        );
        let base_url = serve(router).await;
        let scrap_config = ScrapConfig::builder()
            .toml_string(format!(
                r#"
                [supabase]
                url = "{base_url}"
                anon_key = "anon"
                table = "bookmarks"
                "#
            ))
            .build()
            .expect("supabase config");
        let supabase = SupabaseScraps::new(&scrap_config).expect("supabase");

        let videos = supabase.load().await.expect("load");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id.as_str(), "a");
        assert_eq!(videos[0].is_shorts, None);
        assert_eq!(seen.lock().unwrap().apikey.as_deref(), Some("anon"));

        supabase
            .save(&Video::new("b").title("신혼부부".to_string()))
            .await
            .expect("save");
        let inserted = seen.lock().unwrap().inserted.clone().expect("inserted");
        assert_eq!(inserted["id"], "b");
        assert_eq!(inserted["title"], "신혼부부");
        assert!(inserted.get("isShorts").is_none());

        supabase
            .remove(&VideoId("b".to_string()))
            .await
            .expect("remove");
        let deleted = seen.lock().unwrap().deleted.clone().expect("deleted");
        assert_eq!(deleted["id"], "eq.b");
    }

    #[tokio::test]
    async fn supabase_error_tests() {
        let router = Router::new().route(
            "/rest/v1/scraps",
            get(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base_url = serve(router).await;
        let scrap_config = ScrapConfig::builder()
            .toml_string(format!(
                r#"
                [supabase]
                url = "{base_url}/"
                anon_key = "bad"
                "#
            ))
            .build()
            .expect("supabase config");
        let supabase = SupabaseScraps::new(&scrap_config).expect("supabase");
        match supabase.load().await {
            Err(Error::Http(status, message)) => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(message, "supabase select: invalid api key");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
