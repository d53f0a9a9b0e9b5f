//! # Store Backends
//!
//! The hosted data store is an external collaborator; this module only
//! issues the one update this core needs: writing a component's title
//! and documentation. Backends:
//! - **Rest**: the hosted backend's REST endpoint
//! - **Memory**: in-process, for tests and offline tooling

use crate::error::StoreError;
use figdocs_common::ComponentRecord;
use figdocs_doc::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// The update payload. `title` is always re-derived from the title node
/// at save time; it is never edited independently of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    pub title: String,
    pub documentation: Document,
}

impl ComponentPatch {
    pub fn from_document(document: &Document) -> Self {
        Self {
            title: document.title_text(),
            documentation: document.clone(),
        }
    }
}

/// Backing store strategy.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Hosted backend over REST.
    Rest(RestStore),

    /// In-memory (tests, offline tooling).
    Memory(MemoryStore),
}

impl StoreBackend {
    pub async fn update_component(
        &self,
        component_id: &str,
        patch: ComponentPatch,
    ) -> Result<(), StoreError> {
        match self {
            StoreBackend::Rest(store) => store.update_component(component_id, patch).await,
            StoreBackend::Memory(store) => store.update_component(component_id, patch).await,
        }
    }

    pub async fn fetch_component(
        &self,
        component_id: &str,
    ) -> Result<ComponentRecord, StoreError> {
        match self {
            StoreBackend::Rest(store) => store.fetch_component(component_id).await,
            StoreBackend::Memory(store) => store.fetch_component(component_id).await,
        }
    }
}

/// REST client for the hosted store.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent("figdocs")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub async fn update_component(
        &self,
        component_id: &str,
        patch: ComponentPatch,
    ) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/component?id=eq.{}", self.base_url, component_id);
        debug!(component_id, "updating component record");

        let response = self
            .http
            .patch(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&patch)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected(status.as_u16()));
        }
        Ok(())
    }

    /// Load one component record by id. The result set filter yields an
    /// array; an empty array means the id does not exist.
    pub async fn fetch_component(
        &self,
        component_id: &str,
    ) -> Result<ComponentRecord, StoreError> {
        let url = format!(
            "{}/rest/v1/component?id=eq.{}&select=*",
            self.base_url, component_id
        );
        debug!(component_id, "loading component record");

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected(status.as_u16()));
        }
        let records: Vec<ComponentRecord> = response.json().await?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(component_id.to_string()))
    }
}

/// One recorded save, for assertions.
#[derive(Debug, Clone)]
pub struct RecordedSave {
    pub component_id: String,
    pub patch: ComponentPatch,
    pub at: tokio::time::Instant,
}

/// In-memory store. Clones share the same save log, so a test can keep
/// one handle while the bridge owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, ComponentRecord>>>,
    saves: Arc<Mutex<Vec<RecordedSave>>>,
    fail_next: Arc<AtomicBool>,
    delay: Arc<Mutex<Duration>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next update fail, then recover.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Make every update take this long. Lets tests hold a save in
    /// flight under virtual time.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().expect("delay poisoned") = delay;
    }

    pub async fn update_component(
        &self,
        component_id: &str,
        patch: ComponentPatch,
    ) -> Result<(), StoreError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = *self.delay.lock().expect("delay poisoned");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Failed("injected failure".to_string()));
        }
        if let Some(record) = self
            .records
            .lock()
            .expect("records poisoned")
            .get_mut(component_id)
        {
            record.title = patch.title.clone();
            record.documentation = patch.documentation.clone();
        }
        self.saves
            .lock()
            .expect("save log poisoned")
            .push(RecordedSave {
                component_id: component_id.to_string(),
                patch,
                at: tokio::time::Instant::now(),
            });
        Ok(())
    }

    /// Seed a record so `fetch_component` can serve it.
    pub fn insert_record(&self, record: ComponentRecord) {
        self.records
            .lock()
            .expect("records poisoned")
            .insert(record.id.clone(), record);
    }

    pub async fn fetch_component(
        &self,
        component_id: &str,
    ) -> Result<ComponentRecord, StoreError> {
        self.records
            .lock()
            .expect("records poisoned")
            .get(component_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(component_id.to_string()))
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().expect("save log poisoned").len()
    }

    pub fn saves(&self) -> Vec<RecordedSave> {
        self.saves.lock().expect("save log poisoned").clone()
    }

    /// Highest number of updates ever observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}
