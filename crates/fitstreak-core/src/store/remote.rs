//! Remote session store client.
//!
//! Speaks the hosted realtime database's REST surface: records live
//! under `users/{uid}/workouts` as a map of push-id to document, and
//! appending is a POST that returns the generated id. Every request
//! carries a bounded timeout from configuration; transport failures
//! map onto [`StoreError`] so callers never see `reqwest` types.

use serde::Deserialize;
use std::time::Duration;

use super::SessionStore;
use crate::error::StoreError;
use crate::session::{RecordId, SessionRecord};
use crate::storage::StoreConfig;

/// REST client for the hosted session store.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

impl RemoteStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    fn workouts_url(&self, user_id: &str) -> String {
        format!("{}/users/{}/workouts.json", self.base_url, user_id)
    }

    fn auth_query(&self) -> Vec<(&'static str, String)> {
        self.auth_token
            .iter()
            .map(|token| ("auth", token.clone()))
            .collect()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn read_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            StoreError::Read {
                message: err.to_string(),
            }
        }
    }

    fn write_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            StoreError::Write {
                message: err.to_string(),
            }
        }
    }

    /// The store returns `null` for an empty stream and a push-id map
    /// otherwise.
    fn records_from(body: serde_json::Value) -> Result<Vec<SessionRecord>, StoreError> {
        match body {
            serde_json::Value::Null => Ok(Vec::new()),
            serde_json::Value::Object(map) => map
                .into_values()
                .map(|value| serde_json::from_value(value).map_err(StoreError::from))
                .collect(),
            other => Err(StoreError::Read {
                message: format!("unexpected response shape: {other}"),
            }),
        }
    }
}

impl SessionStore for RemoteStore {
    async fn query_latest(&self, user_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let body: serde_json::Value = self
            .client
            .get(self.workouts_url(user_id))
            .query(&[("orderBy", "\"completed_at\""), ("limitToLast", "1")])
            .query(&self.auth_query())
            .timeout(self.timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.read_error(e))?
            .json()
            .await
            .map_err(|e| self.read_error(e))?;

        // limitToLast already narrows the response; picking the max is
        // what disambiguates should the server return more than one.
        let records = Self::records_from(body)?;
        Ok(records.into_iter().max_by_key(|r| r.completed_at))
    }

    async fn query_all(&self, user_id: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let body: serde_json::Value = self
            .client
            .get(self.workouts_url(user_id))
            .query(&self.auth_query())
            .timeout(self.timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.read_error(e))?
            .json()
            .await
            .map_err(|e| self.read_error(e))?;

        let mut records = Self::records_from(body)?;
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(records)
    }

    async fn append(
        &self,
        user_id: &str,
        record: &SessionRecord,
    ) -> Result<RecordId, StoreError> {
        let push: PushResponse = self
            .client
            .post(self.workouts_url(user_id))
            .query(&self.auth_query())
            .json(record)
            .timeout(self.timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.write_error(e))?
            .json()
            .await
            .map_err(|e| self.write_error(e))?;

        Ok(RecordId(push.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn store_for(server: &mockito::ServerGuard) -> RemoteStore {
        RemoteStore::new(&StoreConfig {
            base_url: server.url(),
            auth_token: None,
            request_timeout_secs: 5,
        })
    }

    const RECORD_BODY: &str = r#"{
        "-NxPushId1": {
            "title": "Push-Ups",
            "difficulty": "beginner",
            "duration_min": 10,
            "completed_at": "2024-11-24T10:00:00Z",
            "streak": 3
        }
    }"#;

    #[tokio::test]
    async fn query_latest_parses_push_id_map() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/u1/workouts.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(RECORD_BODY)
            .create_async()
            .await;

        let latest = store_for(&server).query_latest("u1").await.unwrap();
        mock.assert_async().await;

        let latest = latest.unwrap();
        assert_eq!(latest.title, "Push-Ups");
        assert_eq!(latest.streak, 3);
    }

    #[tokio::test]
    async fn query_latest_treats_null_as_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/u1/workouts.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;

        let latest = store_for(&server).query_latest("u1").await.unwrap();
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn append_returns_generated_push_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/users/u1/workouts.json")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJsonString(
                r#"{"title": "Push-Ups", "streak": 1}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "-NxGenerated"}"#)
            .create_async()
            .await;

        let record = SessionRecord {
            title: "Push-Ups".into(),
            difficulty: crate::session::Difficulty::Beginner,
            duration_min: 10,
            completed_at: "2024-11-25T09:00:00Z".parse().unwrap(),
            streak: 1,
        };
        let id = store_for(&server).append("u1", &record).await.unwrap();
        mock.assert_async().await;
        assert_eq!(id, RecordId("-NxGenerated".to_string()));
    }

    #[tokio::test]
    async fn server_error_maps_to_read_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/u1/workouts.json")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = store_for(&server).query_latest("u1").await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[tokio::test]
    async fn server_error_maps_to_write_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/users/u1/workouts.json")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let record = SessionRecord {
            title: "Push-Ups".into(),
            difficulty: crate::session::Difficulty::Beginner,
            duration_min: 10,
            completed_at: "2024-11-25T09:00:00Z".parse().unwrap(),
            streak: 1,
        };
        let err = store_for(&server).append("u1", &record).await.unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[tokio::test]
    async fn auth_token_is_sent_as_query_parameter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/u1/workouts.json")
            .match_query(Matcher::UrlEncoded("auth".into(), "secret".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;

        let store = RemoteStore::new(&StoreConfig {
            base_url: server.url(),
            auth_token: Some("secret".into()),
            request_timeout_secs: 5,
        });
        store.query_all("u1").await.unwrap();
        mock.assert_async().await;
    }
}
