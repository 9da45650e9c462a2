//! Demo backend for trying trendwatch without a real search service.
//!
//! Serves the full API the client consumes, with in-memory state and a mix
//! of item shapes (bare strings, `{value, score}` objects, raw ZSET-style
//! `{member, score}` objects) to exercise the payload normalizer.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example demo-backend
//! # in another terminal
//! cargo run -- --url http://localhost:8080
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Default)]
struct Store {
    counts: HashMap<String, i64>,
    recent: Vec<String>,
}

type Shared = Arc<Mutex<Store>>;

fn popular_items(store: &Store) -> Vec<Value> {
    let mut ranked: Vec<_> = store.counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(10)
        .map(|(kw, count)| json!({"value": kw, "score": count}))
        .collect()
}

async fn submit(State(store): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let keyword = body["keyword"].as_str().unwrap_or_default().to_string();
    let mut store = store.lock().unwrap();
    *store.counts.entry(keyword.clone()).or_insert(0) += 1;
    store.recent.insert(0, keyword);
    store.recent.truncate(30);
    Json(json!({"ok": true}))
}

async fn popular(State(store): State<Shared>) -> Json<Value> {
    Json(Value::Array(popular_items(&store.lock().unwrap())))
}

async fn recent(State(store): State<Shared>) -> Json<Value> {
    Json(json!(store.lock().unwrap().recent))
}

async fn generate(State(store): State<Shared>) -> Json<Value> {
    let samples = ["노트북", "키보드", "모니터", "마우스", "의자", "신발", "가방"];
    let mut store = store.lock().unwrap();
    for (i, kw) in samples.iter().enumerate() {
        *store.counts.entry((*kw).to_string()).or_insert(0) += (samples.len() - i) as i64;
        store.recent.insert(0, (*kw).to_string());
    }
    store.recent.truncate(30);
    Json(json!({"generated": samples.len()}))
}

async fn clear(State(store): State<Shared>) -> Json<Value> {
    let mut store = store.lock().unwrap();
    store.counts.clear();
    store.recent.clear();
    Json(json!({"cleared": true}))
}

async fn status(State(store): State<Shared>) -> Json<Value> {
    let store = store.lock().unwrap();
    // Raw ZSET-member shape on purpose: the client must normalize it.
    let popular: Vec<Value> = store
        .counts
        .iter()
        .map(|(kw, count)| json!({"member": kw, "score": count}))
        .collect();
    Json(json!({
        "popularKeywords": popular,
        "recentKeywords": store.recent,
        "totalPopularCount": store.counts.len(),
        "totalRecentCount": store.recent.len(),
    }))
}

async fn compare(State(store): State<Shared>) -> Json<Value> {
    let store = store.lock().unwrap();
    let t0 = Instant::now();
    let redis_result: Vec<String> =
        popular_items(&store).iter().map(|v| v["value"].as_str().unwrap().to_string()).collect();
    let redis_time = t0.elapsed();
    // Pretend the DB walk is two orders of magnitude slower.
    let db_time = redis_time * 100 + std::time::Duration::from_millis(12);
    Json(json!({
        "redisResult": redis_result.clone(),
        "dbResult": redis_result,
        "redisTime": format!("{}ms", redis_time.as_millis()),
        "dbTime": format!("{}ms", db_time.as_millis()),
        "performanceImprovement": format!("{:.1}x", db_time.as_secs_f64().max(0.001) / redis_time.as_secs_f64().max(0.001)),
    }))
}

#[tokio::main]
async fn main() {
    let store: Shared = Arc::new(Mutex::new(Store::default()));
    let app = Router::new()
        .route("/api/search", post(submit))
        .route("/api/search/popular", get(popular))
        .route("/api/search/recent", get(recent))
        .route("/api/test/generate-data", post(generate))
        .route("/api/test/clear-cache", post(clear))
        .route("/api/search/debug/redis-status", get(status))
        .route("/api/search/compare/redis-vs-db", get(compare))
        .with_state(store);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    println!("Demo backend listening on http://localhost:8080");
    println!("Run the client with: cargo run -- --url http://localhost:8080");
    axum::serve(listener, app).await.unwrap();
}
