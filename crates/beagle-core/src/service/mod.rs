// ── Generic resource service ──
//
// One service type drives all four entity collections. Each call consults
// the source mode: the mock path slices fixtures after a simulated delay,
// the live path goes through the transport and the response extractor.
// Failures on the live path are logged and degraded to an empty result;
// only the platform access-link calls hand errors back to the caller.

mod instance;
mod platform;

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use beagle_api::Transport;

use crate::config::{MockLatency, SourceMode};
use crate::error::CoreError;
use crate::extract::{extract_list, extract_one};
use crate::mock;
use crate::model::{Card, Instance, ListPage, ListParams, Node, Platform, Resource};

pub type NodeService = ResourceService<Node>;
pub type PlatformService = ResourceService<Platform>;
pub type CardService = ResourceService<Card>;
pub type InstanceService = ResourceService<Instance>;

/// CRUD access to one entity collection over either data source.
pub struct ResourceService<E: Resource> {
    mode: SourceMode,
    latency: MockLatency,
    fixtures: Arc<[E]>,
    transport: Arc<dyn Transport>,
}

impl<E: Resource> Clone for ResourceService<E> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            latency: self.latency,
            fixtures: Arc::clone(&self.fixtures),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<E: Resource> fmt::Debug for ResourceService<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("kind", &E::KIND)
            .field("mode", &self.mode)
            .field("fixtures", &self.fixtures.len())
            .finish_non_exhaustive()
    }
}

impl<E: Resource> ResourceService<E> {
    pub(crate) fn new(
        mode: SourceMode,
        latency: MockLatency,
        fixtures: Arc<[E]>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            mode,
            latency,
            fixtures,
            transport,
        }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    fn is_live(&self) -> bool {
        self.mode == SourceMode::Live
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// One page of the collection. Never fails: any live-path problem
    /// yields an empty page.
    pub async fn get_list(&self, params: &ListParams) -> ListPage<E> {
        if !self.is_live() {
            mock::delay(self.latency.read).await;
            let page = params.page_or_default();
            let size = params.page_size_or_default();
            return match params.keyword.as_deref() {
                Some(keyword) if !keyword.is_empty() => {
                    let hits = mock::search(&self.fixtures, keyword, E::SEARCH_FIELDS);
                    mock::paginate(&hits, page, size)
                }
                _ => mock::paginate(&self.fixtures, page, size),
            };
        }

        match self.fetch_list(params).await {
            Ok(page) => page,
            Err(e) => {
                report::<E>("get_list", params, &e);
                ListPage::empty()
            }
        }
    }

    /// A single record, or `None` when it does not exist or cannot be
    /// fetched.
    pub async fn get_detail(&self, id: &str) -> Option<E> {
        if !self.is_live() {
            mock::delay(self.latency.read).await;
            return self.fixtures.iter().find(|e| e.id() == id).cloned();
        }

        match self.fetch_detail(id).await {
            Ok(found) => found,
            Err(e) if e.status() == Some(404) => {
                debug!(kind = E::KIND, id, "record not found");
                None
            }
            Err(e) => {
                report::<E>("get_detail", &id, &e);
                None
            }
        }
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create a record and return its id, or `""` on failure.
    ///
    /// The mock path returns a synthetic id and leaves the fixtures
    /// untouched.
    pub async fn create<D>(&self, data: &D) -> String
    where
        D: Serialize + ?Sized + Sync,
    {
        if !self.is_live() {
            mock::delay(self.latency.write).await;
            return format!("mock-{}-id-{}", E::KIND, unix_millis());
        }

        let body = match to_body("create", data) {
            Ok(body) => body,
            Err(e) => {
                report::<E>("create", &"<unserializable payload>", &e);
                return String::new();
            }
        };
        match self.send_create(&body).await {
            Ok(id) => id,
            Err(e) => {
                report::<E>("create", &format_args!("{body}"), &e);
                String::new()
            }
        }
    }

    pub async fn update<D>(&self, id: &str, data: &D) -> bool
    where
        D: Serialize + ?Sized + Sync,
    {
        if !self.is_live() {
            mock::delay(self.latency.write).await;
            return true;
        }

        let result = match to_body("update", data) {
            Ok(body) => self
                .transport
                .put(&self.item_path(id), &body)
                .await
                .map_err(|e| CoreError::transport("update", e)),
            Err(e) => Err(e),
        };
        succeeded::<E>("update", id, result)
    }

    pub async fn delete(&self, id: &str) -> bool {
        if !self.is_live() {
            mock::delay(self.latency.write).await;
            return true;
        }

        let result = self
            .transport
            .delete(&self.item_path(id))
            .await
            .map_err(|e| CoreError::transport("delete", e));
        succeeded::<E>("delete", id, result)
    }

    // ── Live-path helpers ────────────────────────────────────────────

    async fn fetch_list(&self, params: &ListParams) -> Result<ListPage<E>, CoreError> {
        let response = self
            .transport
            .get(E::PATH, &params.to_query())
            .await
            .map_err(|e| CoreError::transport("get_list", e))?;

        let ListPage { list, total } = extract_list(response);
        let list = list
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<E>, _>>()
            .map_err(|e| CoreError::shape("get_list", e))?;
        Ok(ListPage { list, total })
    }

    async fn fetch_detail(&self, id: &str) -> Result<Option<E>, CoreError> {
        let response = self
            .transport
            .get(&self.item_path(id), &[])
            .await
            .map_err(|e| CoreError::transport("get_detail", e))?;

        match extract_one(response, Value::Null) {
            Value::Null => Ok(None),
            record => serde_json::from_value(record)
                .map(Some)
                .map_err(|e| CoreError::shape("get_detail", e)),
        }
    }

    async fn send_create(&self, body: &Value) -> Result<String, CoreError> {
        let response = self
            .transport
            .post(E::PATH, Some(body))
            .await
            .map_err(|e| CoreError::transport("create", e))?;

        match extract_one(response, Value::Null).get("id") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(CoreError::shape("create", "response carries no id")),
        }
    }

    /// `POST {path}/{id}/{action}` reduced to a success flag.
    pub(crate) async fn post_action(&self, operation: &'static str, id: &str, action: &str) -> bool {
        if !self.is_live() {
            mock::delay(self.latency.write).await;
            return true;
        }

        let path = format!("{}/{action}", self.item_path(id));
        let result = self
            .transport
            .post(&path, None)
            .await
            .map_err(|e| CoreError::transport(operation, e));
        succeeded::<E>(operation, id, result)
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", E::PATH)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn succeeded<E: Resource>(operation: &'static str, id: &str, result: Result<Value, CoreError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            report::<E>(operation, &id, &e);
            false
        }
    }
}

fn to_body<D: Serialize + ?Sized>(operation: &'static str, data: &D) -> Result<Value, CoreError> {
    serde_json::to_value(data).map_err(|e| CoreError::shape(operation, e))
}

/// Log a degraded live-path failure with enough context to reproduce it.
fn report<E: Resource>(operation: &'static str, input: &dyn fmt::Debug, err: &CoreError) {
    warn!(
        kind = E::KIND,
        operation,
        input = ?input,
        error = %err,
        "live request failed; returning empty result"
    );
}

pub(crate) fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    /// Transport for mock-mode tests: any call is a bug.
    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn get(&self, path: &str, _: &[(&str, String)]) -> Result<Value, beagle_api::Error> {
            panic!("mock path reached transport: GET {path}")
        }
        async fn post(&self, path: &str, _: Option<&Value>) -> Result<Value, beagle_api::Error> {
            panic!("mock path reached transport: POST {path}")
        }
        async fn put(&self, path: &str, _: &Value) -> Result<Value, beagle_api::Error> {
            panic!("mock path reached transport: PUT {path}")
        }
        async fn delete(&self, path: &str) -> Result<Value, beagle_api::Error> {
            panic!("mock path reached transport: DELETE {path}")
        }
    }

    fn card(id: &str, name: &str) -> Card {
        Card {
            id: id.into(),
            name: name.into(),
            ..Card::default()
        }
    }

    /// Transport whose every call answers HTTP 500.
    struct Rejecting;

    fn rejected() -> Result<Value, beagle_api::Error> {
        Err(beagle_api::Error::Http {
            status: 500,
            message: "boom".into(),
        })
    }

    #[async_trait]
    impl Transport for Rejecting {
        async fn get(&self, _: &str, _: &[(&str, String)]) -> Result<Value, beagle_api::Error> {
            rejected()
        }
        async fn post(&self, _: &str, _: Option<&Value>) -> Result<Value, beagle_api::Error> {
            rejected()
        }
        async fn put(&self, _: &str, _: &Value) -> Result<Value, beagle_api::Error> {
            rejected()
        }
        async fn delete(&self, _: &str) -> Result<Value, beagle_api::Error> {
            rejected()
        }
    }

    fn mock_service(cards: Vec<Card>) -> CardService {
        ResourceService::new(
            SourceMode::Mock,
            MockLatency::default(),
            cards.into(),
            Arc::new(Unreachable),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn mock_list_defaults_to_first_page() {
        let cards = (1..=12).map(|i| card(&format!("c{i}"), "Game")).collect();
        let page = mock_service(cards).get_list(&ListParams::default()).await;
        assert_eq!(page.total, 12);
        assert_eq!(page.list.len(), 10);
        assert_eq!(page.list[0].id, "c1");
    }

    #[tokio::test(start_paused = true)]
    async fn mock_list_filters_before_paginating() {
        let service = mock_service(vec![
            card("a", "Elden Ring"),
            card("b", "Cyberpunk 2077"),
            card("c", "Elden Ring: Nightreign"),
        ]);
        let page = service
            .get_list(&ListParams::page(1, 1).with_keyword("ELDEN"))
            .await;
        assert_eq!(page.total, 2);
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].id, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn mock_create_returns_synthetic_id() {
        let id = mock_service(Vec::new()).create(&card("x", "New")).await;
        assert!(id.starts_with("mock-card-id-"), "{id}");
        assert!(id["mock-card-id-".len()..].parse::<u128>().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn mock_writes_take_write_latency() {
        let service = mock_service(vec![card("a", "A")]);
        let start = tokio::time::Instant::now();
        assert!(service.update("a", &serde_json::json!({"name": "B"})).await);
        assert!(service.delete("a").await);
        assert!(start.elapsed() >= Duration::from_millis(1000));
        // fixtures are never mutated
        assert_eq!(service.get_detail("a").await.unwrap().name, "A");
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_create_logs_the_payload() {
        let service: CardService = ResourceService::new(
            SourceMode::Live,
            MockLatency::default(),
            Vec::<Card>::new().into(),
            Arc::new(Rejecting),
        );
        let id = service
            .create(&serde_json::json!({"name": "Hades", "platformId": "steam"}))
            .await;
        assert_eq!(id, "");
        assert!(logs_contain("create"));
        assert!(logs_contain("Hades"));
    }
}
