//! Debugging feature flags.

pub struct LogFlags {
    /// Per-symbol fetch start/finish and row counts.
    pub log_fetch: bool,

    /// Fibonacci tool state transitions.
    pub log_fibonacci: bool,

    /// Symbol / time window / overlay changes coming from the UI.
    pub log_view_changes: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_fetch: true,
    log_fibonacci: false,
    log_view_changes: false,
    log_performance: false,
};
