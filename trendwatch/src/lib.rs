//! # trendwatch - Keyword Trend Dashboard Client
//!
//! A terminal client that synchronizes and renders the state of a remote
//! keyword-search backend: a server-ranked "popular" list refreshed on a
//! timer, a client-owned bounded "recent" history, and on-demand diagnostics
//! comparing the backend's two stores.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Search Backend (HTTP/JSON)              │
//! └───────────────┬─────────────────────────────────────────────┘
//!                 │ gateway (reqwest + deadline)
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Worker (tokio tasks)                          │
//! │                                                             │
//! │  ┌────────────┐       ┌───────────────────────────────┐    │
//! │  │  Poller    │       │  Command executor             │    │
//! │  │  (3s tick) │       │  search / generate / clear /  │    │
//! │  │            │       │  status / compare             │    │
//! │  └─────┬──────┘       └──────────────┬────────────────┘    │
//! │        │       Update messages       │                     │
//! └────────┴───────────────┬─────────────┴─────────────────────┘
//!                          ▼ crossbeam channel
//! ┌─────────────────────────────────────────────────────────────┐
//! │               TUI thread (ratatui)                          │
//! │   AppModel: input, popular, recent, toast, busy states      │
//! │   redraw at 10 Hz, commands back over tokio mpsc            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`gateway`]: HTTP client with a per-request deadline; timeout,
//!   transport, and non-success status collapse into one error surface
//! - [`payload`]: tolerant decoding of the backend's polymorphic list items
//!   (bare string, or object keyed by `value`/`member`/`element`)
//! - [`model`]: the single-owner application state and the `Command`/
//!   `Update` messages that cross the thread boundary
//! - [`worker`]: command execution, busy scopes, and the popularity poller
//! - [`tui`]: render surface and input handling
//! - [`cli`]: command-line configuration
//! - [`domain`]: triggers, severities, and structured errors
//!
//! ## Consistency rules
//!
//! The model lives on the TUI thread and is mutated only by `Update`
//! messages, so the recent list has a single writer and concurrent
//! popular-list refreshes (poll tick vs post-search refresh) resolve as
//! last-message-wins on an idempotent replace.

pub mod cli;
pub mod domain;
pub mod gateway;
pub mod model;
pub mod payload;
pub mod tui;
pub mod worker;
