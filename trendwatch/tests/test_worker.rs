//! End-to-end worker flows against an in-process backend.
//!
//! Each test wires the real worker loop to an axum server, drives it with
//! commands, and asserts on the exact update sequence the TUI would apply.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use crossbeam_channel::Receiver;
use serde_json::json;

use trendwatch::domain::{Severity, Trigger};
use trendwatch::gateway::ApiClient;
use trendwatch::model::{Command, Update};
use trendwatch::worker;

const LONG_POLL: Duration = Duration::from_secs(3600);
const RECV_WINDOW: Duration = Duration::from_secs(5);

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

struct Harness {
    commands: tokio::sync::mpsc::UnboundedSender<Command>,
    updates: Receiver<Update>,
    worker: tokio::task::JoinHandle<()>,
}

impl Harness {
    async fn start(addr: SocketAddr, poll: Duration) -> Self {
        let client = Arc::new(
            ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap(),
        );
        let (update_tx, update_rx) = crossbeam_channel::bounded(1000);
        let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();
        let worker = tokio::spawn(worker::run(client, command_rx, update_tx, poll));
        Self { commands: command_tx, updates: update_rx, worker }
    }

    fn next(&self) -> Update {
        self.updates.recv_timeout(RECV_WINDOW).expect("update within window")
    }

    /// Drain the two updates the startup load always emits.
    fn drain_initial_load(&self) {
        assert!(matches!(self.next(), Update::Popular(_)));
        assert!(matches!(self.next(), Update::Recent(_)));
    }

    async fn shutdown(self) {
        drop(self.commands);
        self.worker.await.unwrap();
    }
}

fn ok_backend() -> Router {
    Router::new()
        .route("/api/search", post(|| async { Json(json!({"ok": true})) }))
        .route(
            "/api/search/popular",
            get(|| async { Json(json!([{"value": "laptop", "score": 1}])) }),
        )
        .route("/api/search/recent", get(|| async { Json(json!(["older"])) }))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn successful_search_emits_the_full_sequence() {
    let addr = serve(ok_backend()).await;
    let harness = Harness::start(addr, LONG_POLL).await;
    harness.drain_initial_load();

    harness.commands.send(Command::Search("laptop".to_string())).unwrap();

    assert_eq!(harness.next(), Update::Busy(Trigger::Search));
    assert_eq!(harness.next(), Update::SearchOk { keyword: "laptop".to_string() });
    // Forced refresh, ahead of the next scheduled poll tick.
    let Update::Popular(entries) = harness.next() else {
        panic!("expected forced popular refresh");
    };
    assert_eq!(entries[0].value, "laptop");
    match harness.next() {
        Update::Toast { message, severity } => {
            assert!(message.contains("laptop"));
            assert_eq!(severity, Severity::Success);
        }
        other => panic!("expected success toast, got {other:?}"),
    }
    // Busy release comes last, after both branches completed.
    assert_eq!(harness.next(), Update::BusyDone(Trigger::Search));

    harness.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_search_releases_busy_and_touches_no_list() {
    let router = Router::new()
        .route("/api/search", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/search/popular", get(|| async { Json(json!(["laptop"])) }))
        .route("/api/search/recent", get(|| async { Json(json!([])) }));
    let addr = serve(router).await;
    let harness = Harness::start(addr, LONG_POLL).await;
    harness.drain_initial_load();

    harness.commands.send(Command::Search("laptop".to_string())).unwrap();

    assert_eq!(harness.next(), Update::Busy(Trigger::Search));
    match harness.next() {
        Update::Toast { message, severity } => {
            assert_eq!(message, "검색 중 오류가 발생했습니다.");
            assert_eq!(severity, Severity::Error);
        }
        other => panic!("expected error toast, got {other:?}"),
    }
    assert_eq!(harness.next(), Update::BusyDone(Trigger::Search));

    harness.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn status_dump_delivers_payload_then_info_toast() {
    let router = ok_backend().route(
        "/api/search/debug/redis-status",
        get(|| async {
            Json(json!({
                "popularKeywords": [],
                "recentKeywords": [],
                "totalPopularCount": 0,
                "totalRecentCount": 0
            }))
        }),
    );
    let addr = serve(router).await;
    let harness = Harness::start(addr, LONG_POLL).await;
    harness.drain_initial_load();

    harness.commands.send(Command::Status).unwrap();

    assert_eq!(harness.next(), Update::Busy(Trigger::Status));
    let Update::Status(status) = harness.next() else {
        panic!("expected status payload");
    };
    assert_eq!(status.total_popular_count, 0);
    match harness.next() {
        Update::Toast { severity, .. } => assert_eq!(severity, Severity::Info),
        other => panic!("expected info toast, got {other:?}"),
    }
    assert_eq!(harness.next(), Update::BusyDone(Trigger::Status));

    harness.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generate_data_reloads_both_lists() {
    let router = ok_backend()
        .route("/api/test/generate-data", post(|| async { Json(json!({"generated": 20})) }));
    let addr = serve(router).await;
    let harness = Harness::start(addr, LONG_POLL).await;
    harness.drain_initial_load();

    harness.commands.send(Command::GenerateData).unwrap();

    assert_eq!(harness.next(), Update::Busy(Trigger::GenerateData));
    assert!(matches!(harness.next(), Update::Popular(_)));
    assert!(matches!(harness.next(), Update::Recent(_)));
    match harness.next() {
        Update::Toast { severity, .. } => assert_eq!(severity, Severity::Success),
        other => panic!("expected success toast, got {other:?}"),
    }
    assert_eq!(harness.next(), Update::BusyDone(Trigger::GenerateData));

    harness.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_initial_load_renders_both_lists_empty() {
    let router = Router::new()
        .route("/api/search/popular", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/search/recent", get(|| async { Json(json!(["older"])) }));
    let addr = serve(router).await;
    let harness = Harness::start(addr, LONG_POLL).await;

    assert_eq!(harness.next(), Update::Popular(Vec::new()));
    assert_eq!(harness.next(), Update::Recent(Vec::new()));

    harness.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn poller_keeps_refreshing_and_swallows_failures() {
    // Every other popular fetch fails; the poller must keep ticking.
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new()
        .route(
            "/api/search/popular",
            get(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n % 2 == 1 {
                        Err(StatusCode::INTERNAL_SERVER_ERROR)
                    } else {
                        Ok(Json(json!([format!("kw{n}")])))
                    }
                }
            }),
        )
        .route("/api/search/recent", get(|| async { Json(json!([])) }));
    let addr = serve(router).await;
    let harness = Harness::start(addr, Duration::from_millis(50)).await;
    harness.drain_initial_load();

    // At least two poll results survive interleaved failures.
    let mut seen = Vec::new();
    while seen.len() < 2 {
        if let Update::Popular(entries) = harness.next() {
            seen.push(entries[0].value.clone());
        }
    }
    assert_ne!(seen[0], seen[1]);
    assert!(calls.load(Ordering::SeqCst) >= 3);

    harness.shutdown().await;
}
