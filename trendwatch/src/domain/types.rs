//! Core domain types shared between the worker tasks and the TUI.

/// A user-facing action that acquires a busy state while its request is
/// in flight. Timer-driven work (the popularity poller) has no trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Search,
    GenerateData,
    ClearCache,
    Status,
    Compare,
}

impl Trigger {
    /// Label shown while the trigger is idle.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "검색",
            Self::GenerateData => "테스트 데이터 생성",
            Self::ClearCache => "캐시 초기화",
            Self::Status => "Redis 상태 확인",
            Self::Compare => "성능 비교",
        }
    }

    /// Label swapped in while the trigger's request is in flight.
    #[must_use]
    pub const fn busy_label(self) -> &'static str {
        match self {
            Self::Search => "검색 중...",
            Self::GenerateData => "데이터 생성 중...",
            Self::ClearCache => "초기화 중...",
            Self::Status => "확인 중...",
            Self::Compare => "비교 중...",
        }
    }

    /// Key bound to the trigger in the TUI.
    #[must_use]
    pub const fn key_hint(self) -> &'static str {
        match self {
            Self::Search => "Enter",
            Self::GenerateData => "F2",
            Self::ClearCache => "F3",
            Self::Status => "F4",
            Self::Compare => "F5",
        }
    }
}

/// Severity of a transient notification. Selects the toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}
