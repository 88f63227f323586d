//! Structured logging and operation timing for the audit engine.
//!
//! Built on `tracing`, this module adds two things the bare crate doesn't
//! give you: a typed field bag so callers don't have to remember which
//! macro arm takes a `Duration` vs a `&str`, and a `start_operation` timer
//! that emits matched `operation started` / `operation completed` events
//! without the caller having to thread a `Instant` through by hand.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self as fmt_layer},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// One value in a structured log field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Duration(Duration),
    Err(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Duration(d) => write!(f, "{:.3}s", d.as_secs_f64()),
            Self::Err(e) => write!(f, "{e}"),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `verbose` widens the default filter from `info,warn` to `debug,info` and
/// switches the formatter to include target names; it does not change what
/// is logged, only how much of it is shown.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("repoauditor=debug,info")
            } else {
                EnvFilter::try_new("repoauditor=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt_layer::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;
    Ok(())
}

/// A logger carrying a fixed set of fields (repository, checker, phase, …)
/// that get attached to every message emitted through it.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefix: Option<String>,
    fields: HashMap<String, FieldValue>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a child logger with a dotted prefix appended (`"engine"` ->
    /// `"engine.checker"`).
    #[must_use]
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.prefix = Some(match &next.prefix {
            Some(existing) => format!("{existing}.{}", prefix.into()),
            None => prefix.into(),
        });
        next
    }

    /// Return a child logger with one additional structured field.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: FieldValue) -> Self {
        let mut next = self.clone();
        next.fields.insert(key.into(), value);
        next
    }

    fn render_fields(&self) -> String {
        let mut parts: Vec<String> = self.fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        parts.sort();
        parts.join(" ")
    }

    pub fn debug(&self, message: &str) {
        debug!(target: "repoauditor", prefix = self.prefix.as_deref().unwrap_or(""), fields = %self.render_fields(), "{message}");
    }

    pub fn info(&self, message: &str) {
        info!(target: "repoauditor", prefix = self.prefix.as_deref().unwrap_or(""), fields = %self.render_fields(), "{message}");
    }

    pub fn warn(&self, message: &str) {
        warn!(target: "repoauditor", prefix = self.prefix.as_deref().unwrap_or(""), fields = %self.render_fields(), "{message}");
    }

    pub fn error(&self, message: &str) {
        tracing::error!(target: "repoauditor", prefix = self.prefix.as_deref().unwrap_or(""), fields = %self.render_fields(), "{message}");
    }

    /// Start a timed operation. Emits `operation started` now and returns a
    /// closure that, when called, emits `operation completed` with the
    /// elapsed duration attached.
    ///
    /// ```
    /// # use repoauditor_utils::logging::Logger;
    /// let logger = Logger::new().with_prefix("engine");
    /// let (scoped, done) = logger.start_operation("plan_repository");
    /// scoped.debug("building checker list");
    /// done();
    /// ```
    #[must_use]
    pub fn start_operation(&self, name: &str) -> (Logger, impl FnOnce() + '_) {
        let scoped = self.with_field("operation", FieldValue::Str(name.to_string()));
        scoped.info("operation started");
        let start = Instant::now();
        let done_logger = scoped.clone();
        (scoped, move || {
            let elapsed = start.elapsed();
            done_logger
                .with_field("duration", FieldValue::Duration(elapsed))
                .info("operation completed");
        })
    }
}

/// Write-only counters/gauges/timers collector.
///
/// Guarded by a single `RwLock` per map: components only ever call
/// `incr`/`set`/`record`, and the reporter reads the maps once at the end of
/// a run (many-writers-few-readers is backwards here, so a plain `RwLock`
/// is sufficient — there is no hot read path to starve).
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: std::sync::RwLock<HashMap<String, u64>>,
    gauges: std::sync::RwLock<HashMap<String, f64>>,
    timers: std::sync::RwLock<HashMap<String, Vec<Duration>>>,
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr(&self, name: &str) {
        self.incr_by(name, 1);
    }

    pub fn incr_by(&self, name: &str, amount: u64) {
        let mut counters = self.counters.write().expect("counters lock poisoned");
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    pub fn set_gauge(&self, name: &str, value: f64) {
        let mut gauges = self.gauges.write().expect("gauges lock poisoned");
        gauges.insert(name.to_string(), value);
    }

    pub fn record_timer(&self, name: &str, value: Duration) {
        let mut timers = self.timers.write().expect("timers lock poisoned");
        timers.entry(name.to_string()).or_default().push(value);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .read()
            .expect("counters lock poisoned")
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.read().expect("gauges lock poisoned").get(name).copied()
    }

    #[must_use]
    pub fn timer_samples(&self, name: &str) -> Vec<Duration> {
        self.timers
            .read()
            .expect("timers lock poisoned")
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_prefix_nests_with_dots() {
        let logger = Logger::new().with_prefix("engine").with_prefix("checker");
        assert_eq!(logger.prefix.as_deref(), Some("engine.checker"));
    }

    #[test]
    fn metrics_collector_accumulates_counters() {
        let metrics = MetricsCollector::new();
        metrics.incr("repos_scanned");
        metrics.incr_by("repos_scanned", 2);
        assert_eq!(metrics.counter("repos_scanned"), 3);
        assert_eq!(metrics.counter("unused"), 0);
    }

    #[test]
    fn metrics_collector_tracks_gauges_and_timers() {
        let metrics = MetricsCollector::new();
        metrics.set_gauge("avg_score", 87.5);
        assert_eq!(metrics.gauge("avg_score"), Some(87.5));

        metrics.record_timer("checker.duration", Duration::from_millis(10));
        metrics.record_timer("checker.duration", Duration::from_millis(20));
        assert_eq!(metrics.timer_samples("checker.duration").len(), 2);
    }
}
