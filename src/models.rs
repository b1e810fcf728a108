use std::fmt;

/// Opaque identity of a solve for the lifetime of the process.
///
/// Ids are handed out by [`crate::history::History`] and never reused, so a
/// list selection can be translated into an id once and stay valid even if
/// other rows move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolveId(pub(crate) u64);

impl fmt::Display for SolveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveRecord {
    pub id: SolveId,
    /// wall-clock duration of the solve in seconds
    pub seconds: f64,
    /// local date-time the solve finished, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
}

impl SolveRecord {
    pub fn minutes(&self) -> f64 {
        self.seconds / 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown in the status bar until the next user action.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}
