//! User timeline fetching.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Post;
use crate::services::TwitterSession;

const USER_TIMELINE_PATH: &str = "1.1/statuses/user_timeline.json";

/// Source of recent posts for a user.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Fetch at most `count` posts of `screen_name`, most recent first.
    async fn user_timeline(&self, screen_name: &str, count: u32) -> Result<Vec<Post>>;
}

#[async_trait]
impl TimelineSource for TwitterSession {
    async fn user_timeline(&self, screen_name: &str, count: u32) -> Result<Vec<Post>> {
        let params = vec![
            ("screen_name".to_string(), screen_name.to_string()),
            ("count".to_string(), count.to_string()),
        ];
        let items: Vec<Value> = self.get(USER_TIMELINE_PATH, &params).await?;
        decode_timeline(screen_name, items, count)
    }
}

/// Decode raw timeline items, failing on the first one of the wrong shape.
pub fn decode_timeline(screen_name: &str, items: Vec<Value>, count: u32) -> Result<Vec<Post>> {
    items
        .into_iter()
        .take(count as usize)
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| AppError::malformed_post(screen_name, index, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiConfig, Credentials};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header_exists, method, path, query_param},
    };

    fn post_json(id: u64, text: &str) -> Value {
        json!({
            "id": id,
            "text": text,
            "created_at": "Thu Apr 18 12:00:00 +0000 2013",
            "user": {
                "screen_name": "antidot",
                "name": "Antidot",
                "profile_image_url": "http://img/a.png",
                "description": "search"
            },
            "entities": {"hashtags": [], "user_mentions": []}
        })
    }

    async fn session(server: &MockServer) -> TwitterSession {
        let creds = Credentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            access_key: "ak".into(),
            access_secret: "as".into(),
        };
        let api = ApiConfig {
            base_url: server.uri(),
            verify_credentials: false,
            ..ApiConfig::default()
        };
        TwitterSession::open(&creds, &api).await.unwrap()
    }

    #[test]
    fn test_decode_truncates_to_count() {
        let items = vec![post_json(3, "c"), post_json(2, "b"), post_json(1, "a")];
        let posts = decode_timeline("antidot", items, 2).unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 2]);
    }

    #[test]
    fn test_decode_reports_malformed_index() {
        let mut broken = post_json(2, "b");
        broken.as_object_mut().unwrap().remove("entities");
        let err = decode_timeline("antidot", vec![post_json(1, "a"), broken], 10).unwrap_err();
        match err {
            AppError::MalformedPost { user, index, message } => {
                assert_eq!(user, "antidot");
                assert_eq!(index, 1);
                assert!(message.contains("entities"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_user_timeline_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .and(query_param("screen_name", "antidot"))
            .and(query_param("count", "2"))
            .and(header_exists("Authorization"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([post_json(2, "b"), post_json(1, "a")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let posts = session(&server).await.user_timeline("antidot", 2).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "b");
    }

    #[tokio::test]
    async fn test_user_timeline_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let posts = session(&server).await.user_timeline("quiet", 100).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_user_timeline_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{"code": 34, "message": "Sorry, that page does not exist."}]
            })))
            .mount(&server)
            .await;

        let err = session(&server)
            .await
            .user_timeline("ghost", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_protected_timeline_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "request": "/1.1/statuses/user_timeline.json",
                "error": "Not authorized."
            })))
            .mount(&server)
            .await;

        let err = session(&server)
            .await
            .user_timeline("locked", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 401, ref message } if message == "Not authorized."));
    }
}
