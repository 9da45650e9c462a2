//! CLI argument definitions

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "trendwatch",
    about = "Terminal dashboard for a keyword-search backend",
    after_help = "\
EXAMPLES:
    trendwatch                                   Connect to http://localhost:8080
    trendwatch --url http://search.internal      Explicit backend
    trendwatch --poll-ms 1000                    Faster popular-list polling"
)]
pub struct Args {
    /// Base URL of the search backend
    #[arg(long, default_value = "http://localhost:8080")]
    pub url: String,

    /// Per-request deadline in milliseconds
    #[arg(long, default_value = "8000")]
    pub timeout_ms: u64,

    /// Popular-list poll interval in milliseconds
    #[arg(long, default_value = "3000")]
    pub poll_ms: u64,

    /// Suppress the startup banner
    #[arg(short, long)]
    pub quiet: bool,
}
