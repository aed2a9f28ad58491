//! Reader service behaviour, driven through the full middleware stack.

use std::time::{Duration, Instant};

use axum::http::{header, StatusCode};
use data_app::{RecordStore, ServiceKind};

mod common;

use common::{app, body_json, body_string, get, send, MemoryStore};

#[tokio::test]
async fn test_api_rows_newest_first() {
    let store = MemoryStore::new();
    for data in ["first", "second", "third"] {
        store.insert(data).await.unwrap();
    }
    let app = app(ServiceKind::Reader, store);

    let res = send(&app, get("/api/rows")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let rows = body_json(res).await;
    let rows = rows.as_array().unwrap();
    let data: Vec<&str> = rows.iter().map(|r| r["data"].as_str().unwrap()).collect();
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(data, ["third", "second", "first"]);
    assert_eq!(ids, [3, 2, 1]);
    for row in rows {
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(row["created_at"].is_string());
    }
}

#[tokio::test]
async fn test_missing_table_reads_as_empty() {
    let store = MemoryStore::new();
    assert!(!store.table_exists());
    let app = app(ServiceKind::Reader, store.clone());

    let res = send(&app, get("/api/rows")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, serde_json::json!([]));

    let res = send(&app, get("/")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!body_string(res).await.contains("<td>"));
}

#[tokio::test]
async fn test_statement_error_is_not_read_as_empty() {
    let store = MemoryStore::new();
    store.insert("kept").await.unwrap();
    store.break_queries();
    let app = app(ServiceKind::Reader, store.clone());

    for path in ["/", "/api/rows"] {
        let res = send(&app, get(path)).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert!(body["error"].as_str().unwrap().starts_with("query failed"));
    }
}

#[tokio::test]
async fn test_index_renders_escaped_table() {
    let store = MemoryStore::new();
    store.insert("plain").await.unwrap();
    store.insert("<script>alert(1)</script>").await.unwrap();
    let app = app(ServiceKind::Reader, store);

    let res = send(&app, get("/")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;

    assert!(html.contains("<th>Created At</th>"));
    assert!(html.contains(r#"<a class="refresh" href="/">Refresh</a>"#));
    assert!(html.contains("test-pod"));
    assert!(!html.contains("<script>"));
    let newest = html
        .find("<td>&#60;script&#62;alert(1)&#60;/script&#62;</td>")
        .expect("escaped cell");
    let oldest = html.find("<td>plain</td>").unwrap();
    assert!(newest < oldest, "newest record must come first");
}

#[tokio::test]
async fn test_unreachable_store_fails_fast_with_json() {
    let store = MemoryStore::new();
    store.set_down(true);
    let app = app(ServiceKind::Reader, store.clone());

    for path in ["/", "/api/rows"] {
        let start = Instant::now();
        let res = send(&app, get(path)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("Connection refused"));
    }
    assert_eq!(store.calls(), 2, "reader makes a single attempt per request");
}

#[tokio::test]
async fn test_row_count_gauge_follows_reads() {
    let store = MemoryStore::new();
    store.insert("a").await.unwrap();
    store.insert("b").await.unwrap();
    let app = app(ServiceKind::Reader, store);

    send(&app, get("/api/rows")).await;

    // The recorder is process-wide and other tests read concurrently, so only
    // the presence of a numeric sample is checked here.
    let text = body_string(send(&app, get("/metrics")).await).await;
    let sample = text
        .lines()
        .find_map(|line| line.strip_prefix("row_count "))
        .expect("row_count sample");
    assert!(sample.trim().parse::<f64>().is_ok());
    assert!(text.contains("mysql_read_time_seconds_count"));
}

#[tokio::test]
async fn test_health_probes() {
    let store = MemoryStore::new();
    let app = app(ServiceKind::Reader, store.clone());

    let live = send(&app, get("/healthz")).await;
    assert_eq!(live.status(), StatusCode::OK);

    let ready = send(&app, get("/readyz")).await;
    assert_eq!(ready.status(), StatusCode::OK);

    store.set_down(true);
    let not_ready = send(&app, get("/readyz")).await;
    assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}
