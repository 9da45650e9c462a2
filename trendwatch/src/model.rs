//! Application state and the messages that mutate it.
//!
//! The model is owned by the TUI thread and mutated only through [`Update`]
//! messages coming off the worker channel (plus local input editing). That
//! single-owner rule is what keeps the reconciliation race-free: the recent
//! list has exactly one writer, and concurrent popular-list refreshes resolve
//! as last-message-wins on an idempotent replace.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::domain::{Severity, Trigger};
use crate::payload::{ComparisonPayload, KeywordEntry, StatusPayload};

/// Maximum entries kept in the recent list; inserting past this evicts the
/// oldest (tail) entry.
pub const RECENT_CAP: usize = 15;

/// How long a toast stays visible, measured from when its content was shown.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// Requests from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a trimmed, non-empty keyword.
    Search(String),
    GenerateData,
    ClearCache,
    Status,
    Compare,
}

impl Command {
    #[must_use]
    pub const fn trigger(&self) -> Trigger {
        match self {
            Self::Search(_) => Trigger::Search,
            Self::GenerateData => Trigger::GenerateData,
            Self::ClearCache => Trigger::ClearCache,
            Self::Status => Trigger::Status,
            Self::Compare => Trigger::Compare,
        }
    }
}

/// State mutations from the worker to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Replace the popular list (poller tick or post-search refresh).
    Popular(Vec<KeywordEntry>),
    /// Replace the recent list from the server's rendition.
    Recent(Vec<KeywordEntry>),
    /// A keyword submission succeeded: clear the input, record the keyword.
    SearchOk { keyword: String },
    /// Show a transient notification (newest wins).
    Toast { message: String, severity: Severity },
    /// A trigger's request went in flight; swap in its busy label.
    Busy(Trigger),
    /// The trigger's request finished (any outcome); restore its label.
    BusyDone(Trigger),
    /// Diagnostics: backing-store status dump arrived.
    Status(StatusPayload),
    /// Diagnostics: two-store comparison arrived.
    Comparison(ComparisonPayload),
}

/// One row of the recent panel. Entries recorded from the user's own
/// submissions carry the "just searched" highlight; entries loaded from the
/// server do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub value: String,
    pub score: Option<String>,
    pub just_searched: bool,
}

/// The single visible notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

/// Contents of the on-demand diagnostics panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Diagnostics {
    #[default]
    Hidden,
    Status(StatusPayload),
    Comparison(ComparisonPayload),
}

/// Everything the render surface draws from.
#[derive(Debug, Default)]
pub struct AppModel {
    pub input: String,
    pub popular: Vec<KeywordEntry>,
    pub recent: Vec<RecentEntry>,
    pub toast: Option<Toast>,
    pub diagnostics: Diagnostics,
    busy: HashSet<Trigger>,
}

impl AppModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one worker update. `now` stamps toast visibility.
    pub fn apply(&mut self, update: Update, now: Instant) {
        match update {
            Update::Popular(entries) => self.popular = entries,
            Update::Recent(entries) => {
                self.recent = entries
                    .into_iter()
                    .map(|e| RecentEntry { value: e.value, score: e.score, just_searched: false })
                    .collect();
            }
            Update::SearchOk { keyword } => {
                self.input.clear();
                self.record_recent(&keyword);
            }
            Update::Toast { message, severity } => {
                // Newest message wins and restarts its own hide window.
                self.toast = Some(Toast { message, severity, shown_at: now });
            }
            Update::Busy(trigger) => {
                self.busy.insert(trigger);
            }
            Update::BusyDone(trigger) => {
                self.busy.remove(&trigger);
            }
            Update::Status(status) => self.diagnostics = Diagnostics::Status(status),
            Update::Comparison(cmp) => self.diagnostics = Diagnostics::Comparison(cmp),
        }
    }

    /// Expire the toast once its window has elapsed. Visibility is keyed to
    /// the currently shown content, so a replaced toast starts a fresh
    /// window and stale expiries are naturally no-ops.
    pub fn tick(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now.duration_since(toast.shown_at) >= TOAST_TTL {
                self.toast = None;
            }
        }
    }

    /// Prepend a just-searched entry, evicting the tail past [`RECENT_CAP`].
    pub fn record_recent(&mut self, keyword: &str) {
        self.recent.insert(
            0,
            RecentEntry { value: keyword.to_string(), score: None, just_searched: true },
        );
        self.recent.truncate(RECENT_CAP);
    }

    #[must_use]
    pub fn is_busy(&self, trigger: Trigger) -> bool {
        self.busy.contains(&trigger)
    }

    /// Label to display for a trigger right now.
    #[must_use]
    pub fn trigger_label(&self, trigger: Trigger) -> &'static str {
        if self.is_busy(trigger) {
            trigger.busy_label()
        } else {
            trigger.label()
        }
    }
}
