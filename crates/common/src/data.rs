//! Generic keyed data access against the ledger REST server.
//!
//! Every entity kind is exposed by the server under a namespace path
//! (`{base}/{namespace}`, `{base}/{namespace}/{id}`). The caller picks the
//! namespace; this layer only performs the HTTP call and collapses failures
//! into the three [`DataError`] markers.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::DataError;

/// Remote data-access contract: list/get/add/update/delete keyed by an
/// entity-type namespace string. Each call either resolves with data or
/// fails with a [`DataError`]; there are no retries, no cancellation and no
/// queueing, so concurrent callers race freely.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn get_all<T>(&self, namespace: &str) -> Result<Vec<T>, DataError>
    where
        T: DeserializeOwned + Send;

    async fn get_single<T>(&self, namespace: &str, id: &str) -> Result<T, DataError>
    where
        T: DeserializeOwned + Send;

    async fn add<P, T>(&self, namespace: &str, item: &P) -> Result<T, DataError>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned + Send;

    async fn update<P, T>(&self, namespace: &str, id: &str, item: &P) -> Result<T, DataError>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned + Send;

    async fn delete<T>(&self, namespace: &str, id: &str) -> Result<T, DataError>
    where
        T: DeserializeOwned + Send;
}

/// reqwest-backed implementation talking to the REST server mount point,
/// e.g. `http://localhost:3000/api`.
pub struct RestDataService {
    client: reqwest::Client,
    base_url: String,
}

impl RestDataService {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts etc.).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, namespace: &str) -> String {
        format!("{}/{}", self.base_url, namespace)
    }

    fn record_url(&self, namespace: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, namespace, id)
    }

    fn transport_error(namespace: &str, err: reqwest::Error) -> DataError {
        warn!(namespace, error = %err, "rest request failed");
        DataError::Server
    }

    /// Map a response to data or a [`DataError`]. A 404 becomes the fixed
    /// not-found marker; any other non-success status surfaces its body (or
    /// status line) verbatim. An empty success body decodes as JSON null so
    /// that DELETE responses without content still typecheck.
    async fn read_body<T>(resp: Response) -> Result<T, DataError>
    where
        T: DeserializeOwned,
    {
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DataError::NotFound);
        }
        let text = resp.text().await.map_err(|err| {
            warn!(error = %err, "failed reading rest response body");
            DataError::Server
        })?;
        if !status.is_success() {
            let message = if text.trim().is_empty() {
                status.to_string()
            } else {
                text
            };
            return Err(DataError::Other(message));
        }
        if text.trim().is_empty() {
            serde_json::from_value(Value::Null).map_err(|e| DataError::Other(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| DataError::Other(e.to_string()))
        }
    }
}

#[async_trait]
impl DataService for RestDataService {
    async fn get_all<T>(&self, namespace: &str) -> Result<Vec<T>, DataError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.collection_url(namespace);
        debug!(namespace, %url, "get_all");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_error(namespace, e))?;
        Self::read_body(resp).await
    }

    async fn get_single<T>(&self, namespace: &str, id: &str) -> Result<T, DataError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.record_url(namespace, id);
        debug!(namespace, id, "get_single");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_error(namespace, e))?;
        Self::read_body(resp).await
    }

    async fn add<P, T>(&self, namespace: &str, item: &P) -> Result<T, DataError>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.collection_url(namespace);
        debug!(namespace, "add");
        let resp = self
            .client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(|e| Self::transport_error(namespace, e))?;
        Self::read_body(resp).await
    }

    async fn update<P, T>(&self, namespace: &str, id: &str, item: &P) -> Result<T, DataError>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.record_url(namespace, id);
        debug!(namespace, id, "update");
        let resp = self
            .client
            .put(&url)
            .json(item)
            .send()
            .await
            .map_err(|e| Self::transport_error(namespace, e))?;
        Self::read_body(resp).await
    }

    async fn delete<T>(&self, namespace: &str, id: &str) -> Result<T, DataError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.record_url(namespace, id);
        debug!(namespace, id, "delete");
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::transport_error(namespace, e))?;
        Self::read_body(resp).await
    }
}

/// Simple in-memory mock data service for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records keyed by (namespace, primary key), stored as raw JSON so the
    /// store stays generic over entity kinds. A one-shot failure can be
    /// injected to exercise the error paths.
    #[derive(Default)]
    pub struct MemoryDataService {
        records: Mutex<HashMap<(String, String), Value>>,
        fail_next: Mutex<Option<DataError>>,
    }

    impl MemoryDataService {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the next operation fail with `err` instead of touching the
        /// store.
        pub fn fail_next(&self, err: DataError) {
            *self.fail_next.lock().unwrap() = Some(err);
        }

        /// Seed a raw record, bypassing serialization. Useful for partial
        /// server responses.
        pub fn insert_raw(&self, namespace: &str, id: &str, value: Value) {
            self.records
                .lock()
                .unwrap()
                .insert((namespace.to_string(), id.to_string()), value);
        }

        /// Inspect the raw stored payload for a record.
        pub fn raw(&self, namespace: &str, id: &str) -> Option<Value> {
            self.records
                .lock()
                .unwrap()
                .get(&(namespace.to_string(), id.to_string()))
                .cloned()
        }

        pub fn len(&self, namespace: &str) -> usize {
            self.records
                .lock()
                .unwrap()
                .keys()
                .filter(|(ns, _)| ns == namespace)
                .count()
        }

        fn take_failure(&self) -> Option<DataError> {
            self.fail_next.lock().unwrap().take()
        }

        /// Records carry their own key field; `id` for participants,
        /// `reqId` for assets.
        fn record_key(value: &Value) -> String {
            value
                .get("id")
                .or_else(|| value.get("reqId"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        }
    }

    #[async_trait]
    impl DataService for MemoryDataService {
        async fn get_all<T>(&self, namespace: &str) -> Result<Vec<T>, DataError>
        where
            T: DeserializeOwned + Send,
        {
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let records = self.records.lock().unwrap();
            let mut entries: Vec<(&String, &Value)> = records
                .iter()
                .filter(|((ns, _), _)| ns == namespace)
                .map(|((_, id), value)| (id, value))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            entries
                .into_iter()
                .map(|(_, value)| {
                    serde_json::from_value(value.clone())
                        .map_err(|e| DataError::Other(e.to_string()))
                })
                .collect()
        }

        async fn get_single<T>(&self, namespace: &str, id: &str) -> Result<T, DataError>
        where
            T: DeserializeOwned + Send,
        {
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let records = self.records.lock().unwrap();
            let value = records
                .get(&(namespace.to_string(), id.to_string()))
                .ok_or(DataError::NotFound)?;
            serde_json::from_value(value.clone()).map_err(|e| DataError::Other(e.to_string()))
        }

        async fn add<P, T>(&self, namespace: &str, item: &P) -> Result<T, DataError>
        where
            P: Serialize + Send + Sync,
            T: DeserializeOwned + Send,
        {
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let value = serde_json::to_value(item).map_err(|e| DataError::Other(e.to_string()))?;
            let key = Self::record_key(&value);
            self.records
                .lock()
                .unwrap()
                .insert((namespace.to_string(), key), value.clone());
            serde_json::from_value(value).map_err(|e| DataError::Other(e.to_string()))
        }

        async fn update<P, T>(&self, namespace: &str, id: &str, item: &P) -> Result<T, DataError>
        where
            P: Serialize + Send + Sync,
            T: DeserializeOwned + Send,
        {
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let patch = serde_json::to_value(item).map_err(|e| DataError::Other(e.to_string()))?;
            let mut records = self.records.lock().unwrap();
            let stored = records
                .get_mut(&(namespace.to_string(), id.to_string()))
                .ok_or(DataError::NotFound)?;
            // Update payloads omit the primary key; merge so it survives.
            match (stored.as_object_mut(), patch.as_object()) {
                (Some(existing), Some(fields)) => {
                    for (k, v) in fields {
                        existing.insert(k.clone(), v.clone());
                    }
                }
                _ => *stored = patch,
            }
            serde_json::from_value(stored.clone()).map_err(|e| DataError::Other(e.to_string()))
        }

        async fn delete<T>(&self, namespace: &str, id: &str) -> Result<T, DataError>
        where
            T: DeserializeOwned + Send,
        {
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let removed = self
                .records
                .lock()
                .unwrap()
                .remove(&(namespace.to_string(), id.to_string()))
                .ok_or(DataError::NotFound)?;
            serde_json::from_value(removed).map_err(|e| DataError::Other(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemoryDataService;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn mock_round_trip_by_namespace() {
        let data = MemoryDataService::new();
        let created: Value = data
            .add("Bank", &json!({"id": "B1", "minCommitment": 100.0}))
            .await
            .expect("add");
        assert_eq!(created["id"], "B1");

        let all: Vec<Value> = data.get_all("Bank").await.expect("get_all");
        assert_eq!(all.len(), 1);
        // Other namespaces stay empty.
        let other: Vec<Value> = data.get_all("LoanRequest").await.expect("get_all");
        assert!(other.is_empty());

        let one: Value = data.get_single("Bank", "B1").await.expect("get_single");
        assert_eq!(one["minCommitment"], 100.0);

        let _: Value = data.delete("Bank", "B1").await.expect("delete");
        assert!(matches!(
            data.get_single::<Value>("Bank", "B1").await,
            Err(DataError::NotFound)
        ));
    }

    #[tokio::test]
    async fn mock_update_preserves_primary_key() {
        let data = MemoryDataService::new();
        data.insert_raw("Bank", "B1", json!({"id": "B1", "minCommitment": 1.0}));
        let updated: Value = data
            .update("Bank", "B1", &json!({"minCommitment": 2.0}))
            .await
            .expect("update");
        assert_eq!(updated["id"], "B1");
        assert_eq!(updated["minCommitment"], 2.0);
    }

    #[tokio::test]
    async fn mock_injected_failure_is_one_shot() {
        let data = MemoryDataService::new();
        data.fail_next(DataError::Server);
        assert!(matches!(
            data.get_all::<Value>("Bank").await,
            Err(DataError::Server)
        ));
        assert!(data.get_all::<Value>("Bank").await.is_ok());
    }
}
