//! Structured logging conventions for stellaris.
//!
//! Events carry fields as `tracing` key-value pairs. The recurring names are
//! `op`, `user_id`, `query`, `star_name`, `constellation`,
//! `is_new_discovery`, `duration_ms`, `result_count` and `error`. New call
//! sites reuse them so log tooling can filter across crates.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), new discoveries |
//! | DEBUG | Decision points (local hit, canonical-name hit, conflict retried) |
//! | TRACE | Per-item iteration (chart entries, candidate rows) |
