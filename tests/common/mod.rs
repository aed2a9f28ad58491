//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::{Timelike, Utc};
use tower::ServiceExt;

use data_app::config::{RetryConfig, ServiceConfig};
use data_app::store::{Record, RecordStore, StoreError, StoreResult};
use data_app::{AppState, HttpServer, ServiceKind};

/// In-memory stand-in for `data_table`.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Record>>,
    table_exists: AtomicBool,
    down: AtomicBool,
    failures_left: AtomicU32,
    lost_acks_left: AtomicU32,
    broken: AtomicBool,
    calls: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails as if MySQL were unreachable.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// The next `n` calls fail as if MySQL were unreachable.
    pub fn fail_next(&self, n: u32) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    /// The next `n` inserts store their row, then fail as if the connection
    /// dropped before the commit was acknowledged.
    pub fn lose_commit_acks(&self, n: u32) {
        self.lost_acks_left.store(n, Ordering::SeqCst);
    }

    /// Every select fails with a statement error.
    pub fn break_queries(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn table_exists(&self) -> bool {
        self.table_exists.load(Ordering::SeqCst)
    }

    fn check_reachable(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Connection refused (os error 111)".into()));
        }
        let consumed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if consumed.is_ok() {
            return Err(StoreError::Unavailable("Connection refused (os error 111)".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_table(&self) -> StoreResult<()> {
        self.check_reachable()?;
        self.table_exists.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, data: &str) -> StoreResult<i64> {
        self.ensure_table().await?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.last().map(|r| r.id).unwrap_or(0) + 1;
        rows.push(Record {
            id,
            data: data.to_string(),
            created_at: Utc::now().naive_utc().with_nanosecond(0).unwrap(),
        });
        let lost = self
            .lost_acks_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if lost.is_ok() {
            return Err(StoreError::Unavailable("connection reset by peer".into()));
        }
        Ok(id)
    }

    async fn list_newest_first(&self) -> StoreResult<Vec<Record>> {
        self.check_reachable()?;
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Query(
                "Unknown column 'data' in 'field list'".into(),
            ));
        }
        // Same contract as MySqlStore: no table yet reads as no rows.
        if !self.table_exists() {
            return Ok(Vec::new());
        }
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_reachable()
    }
}

/// Service defaults with retry delays shrunk to milliseconds.
pub fn test_config(kind: ServiceKind) -> ServiceConfig {
    let mut config = match kind {
        ServiceKind::Reader => ServiceConfig::reader(),
        ServiceKind::Writer => ServiceConfig::writer(),
    };
    config.retries = RetryConfig {
        max_attempts: config.retries.max_attempts.min(4),
        base_delay_ms: 1,
        max_delay_ms: 5,
        deadline_secs: 2,
    };
    config.pod_name = "test-pod".to_string();
    config
}

pub fn app(kind: ServiceKind, store: Arc<MemoryStore>) -> Router {
    HttpServer::new(kind, AppState::new(store, test_config(kind))).into_router()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
