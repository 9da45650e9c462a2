//! Background worker: executes user commands against the gateway and runs
//! the popularity poller.
//!
//! Commands arrive over a tokio mpsc channel from the TUI thread and are
//! executed one at a time, so two requests from the same trigger never
//! overlap. Every outcome is reported back as [`Update`] messages on a
//! crossbeam channel; the worker never touches the model directly.
//!
//! The poller is a separate task on a fixed period, so a scheduled tick and
//! a post-search forced refresh can race. Both just replace the popular
//! list, the later message wins, and neither is correctness-critical.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::domain::{Severity, Trigger};
use crate::gateway::ApiClient;
use crate::model::{Command, Update};

/// Scoped busy state around one user-triggered operation.
///
/// Construction puts the trigger into its busy state; `Drop` releases it.
/// Riding the release on `Drop` is what makes it unconditional: every exit
/// path out of the operation body, including `?`, restores the trigger
/// exactly once. Timer-driven work constructs no scope.
struct BusyScope<'a> {
    updates: &'a Sender<Update>,
    trigger: Trigger,
}

impl<'a> BusyScope<'a> {
    fn new(updates: &'a Sender<Update>, trigger: Trigger) -> Self {
        let _ = updates.send(Update::Busy(trigger));
        Self { updates, trigger }
    }
}

impl Drop for BusyScope<'_> {
    fn drop(&mut self) {
        let _ = self.updates.send(Update::BusyDone(self.trigger));
    }
}

/// Run the worker until the command channel closes.
///
/// Startup order mirrors the session lifecycle: one combined load of both
/// lists first, then the poller starts with its first fetch one full period
/// out. The poller lives for the whole session and is only stopped here, at
/// teardown.
pub async fn run(
    client: Arc<ApiClient>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    updates: Sender<Update>,
    poll_interval: Duration,
) {
    load_keywords(&client, &updates).await;

    let poller = tokio::spawn(poll_popular(client.clone(), updates.clone(), poll_interval));

    while let Some(command) = commands.recv().await {
        match command {
            Command::Search(keyword) => search(&client, &updates, &keyword).await,
            Command::GenerateData => generate_data(&client, &updates).await,
            Command::ClearCache => clear_cache(&client, &updates).await,
            Command::Status => status_dump(&client, &updates).await,
            Command::Compare => compare_stores(&client, &updates).await,
        }
    }

    info!("command channel closed, stopping poller");
    poller.abort();
}

/// Recurring popular-list refresh. Fetch failures are swallowed (the
/// previous render stays); a closed update channel ends the task.
async fn poll_popular(client: Arc<ApiClient>, updates: Sender<Update>, period: Duration) {
    let start = tokio::time::Instant::now() + period;
    let mut ticker = tokio::time::interval_at(start, period);
    loop {
        ticker.tick().await;
        match client.fetch_popular().await {
            Ok(entries) => {
                if updates.send(Update::Popular(entries)).is_err() {
                    break;
                }
            }
            Err(e) => debug!("popular poll failed: {e}"),
        }
    }
}

/// Combined load of both lists (startup and after data-mutating commands).
/// Any failure renders both lists empty rather than stale-vs-fresh halves.
async fn load_keywords(client: &ApiClient, updates: &Sender<Update>) {
    let (popular, recent) = tokio::join!(client.fetch_popular(), client.fetch_recent());
    match (popular, recent) {
        (Ok(popular), Ok(recent)) => {
            let _ = updates.send(Update::Popular(popular));
            let _ = updates.send(Update::Recent(recent));
        }
        (popular, recent) => {
            if let Err(e) = popular.and(recent) {
                warn!("keyword load failed: {e}");
            }
            let _ = updates.send(Update::Popular(Vec::new()));
            let _ = updates.send(Update::Recent(Vec::new()));
        }
    }
}

fn notify(updates: &Sender<Update>, message: impl Into<String>, severity: Severity) {
    let _ = updates.send(Update::Toast { message: message.into(), severity });
}

/// Submit one keyword. The input was validated (trimmed, non-empty) before
/// the command was sent, so the busy scope opens unconditionally here.
async fn search(client: &ApiClient, updates: &Sender<Update>, keyword: &str) {
    let _busy = BusyScope::new(updates, Trigger::Search);
    match client.submit_keyword(keyword).await {
        Ok(()) => {
            let _ = updates.send(Update::SearchOk { keyword: keyword.to_string() });
            // Forced refresh: don't wait for the next poll tick. A failure
            // here leaves the previous popular render in place.
            match client.fetch_popular().await {
                Ok(entries) => {
                    let _ = updates.send(Update::Popular(entries));
                }
                Err(e) => debug!("post-search refresh failed: {e}"),
            }
            notify(updates, format!("\"{keyword}\" 검색이 완료되었습니다!"), Severity::Success);
        }
        Err(e) => {
            warn!("search failed: {e}");
            notify(updates, "검색 중 오류가 발생했습니다.", Severity::Error);
        }
    }
}

async fn generate_data(client: &ApiClient, updates: &Sender<Update>) {
    let _busy = BusyScope::new(updates, Trigger::GenerateData);
    match client.generate_sample_data().await {
        Ok(()) => {
            load_keywords(client, updates).await;
            notify(updates, "테스트 데이터가 성공적으로 생성되었습니다!", Severity::Success);
        }
        Err(e) => {
            warn!("sample data generation failed: {e}");
            notify(updates, "테스트 데이터 생성 중 오류가 발생했습니다.", Severity::Error);
        }
    }
}

async fn clear_cache(client: &ApiClient, updates: &Sender<Update>) {
    let _busy = BusyScope::new(updates, Trigger::ClearCache);
    match client.clear_cache().await {
        Ok(()) => {
            load_keywords(client, updates).await;
            notify(updates, "캐시가 성공적으로 초기화되었습니다!", Severity::Info);
        }
        Err(e) => {
            warn!("cache clear failed: {e}");
            notify(updates, "캐시 초기화 중 오류가 발생했습니다.", Severity::Error);
        }
    }
}

async fn status_dump(client: &ApiClient, updates: &Sender<Update>) {
    let _busy = BusyScope::new(updates, Trigger::Status);
    match client.fetch_status().await {
        Ok(status) => {
            let _ = updates.send(Update::Status(status));
            notify(updates, "Redis 상태를 확인했습니다.", Severity::Info);
        }
        Err(e) => {
            warn!("status dump failed: {e}");
            notify(updates, "Redis 상태 확인 중 오류가 발생했습니다.", Severity::Error);
        }
    }
}

async fn compare_stores(client: &ApiClient, updates: &Sender<Update>) {
    let _busy = BusyScope::new(updates, Trigger::Compare);
    match client.fetch_comparison().await {
        Ok(cmp) => {
            let _ = updates.send(Update::Comparison(cmp));
            notify(updates, "성능 비교가 완료되었습니다!", Severity::Success);
        }
        Err(e) => {
            warn!("store comparison failed: {e}");
            notify(updates, "성능 비교 중 오류가 발생했습니다.", Severity::Error);
        }
    }
}
