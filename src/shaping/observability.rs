use std::fmt;
use std::sync::Arc;

use crate::error::ShapeError;

/// How bad a failed shaping call is, ordered from least to most severe.
///
/// Compared against [`crate::ShapeOptions::alert_at_or_above`] to decide whether a failure
/// also raises an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShapeSeverity {
    /// Rejected caller input (unknown or repeated field names).
    Warning,
    /// Shaped records could not be encoded.
    Error,
    /// Critical error (missing source, I/O failures).
    Critical,
}

impl ShapeSeverity {
    /// Severity assigned to a failed shaping call.
    pub fn of(error: &ShapeError) -> Self {
        match error {
            ShapeError::MissingSource | ShapeError::Io(_) => Self::Critical,
            ShapeError::UnknownField { .. } | ShapeError::DuplicateField { .. } => Self::Warning,
            ShapeError::Json(_) | ShapeError::Csv(_) => Self::Error,
        }
    }
}

/// The record type and raw field list of the call being reported.
#[derive(Debug, Clone)]
pub struct ShapeContext {
    /// Name of the source record type.
    pub type_name: &'static str,
    /// Raw field specification, as supplied by the caller.
    pub fields: Option<String>,
}

/// Stats reported on successful shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeStats {
    /// Number of shaped records (equals the source length).
    pub records: usize,
    /// Number of resolved fields per record.
    pub fields: usize,
}

/// Receives the outcome of every [`crate::project_with_options`] call.
///
/// Each call reports exactly one success or one failure. A failure at or above the alert
/// threshold is then also passed to [`Self::on_alert`].
pub trait ShapeObserver: Send + Sync {
    /// Every record was shaped; `stats` counts records and resolved fields.
    fn on_success(&self, _ctx: &ShapeContext, _stats: ShapeStats) {}

    /// The call failed; `severity` comes from [`ShapeSeverity::of`].
    fn on_failure(&self, _ctx: &ShapeContext, _severity: ShapeSeverity, _error: &ShapeError) {}

    /// The failure just reported met the alert threshold. Forwards to [`Self::on_failure`]
    /// unless overridden.
    fn on_alert(&self, ctx: &ShapeContext, severity: ShapeSeverity, error: &ShapeError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Reports each shaping outcome to several observers, in insertion order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ShapeObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ShapeObserver>>) -> Self {
        Self { observers }
    }

    /// Add another observer to the fan-out list.
    pub fn push(&mut self, observer: Arc<dyn ShapeObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ShapeObserver for CompositeObserver {
    fn on_success(&self, ctx: &ShapeContext, stats: ShapeStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ShapeContext, severity: ShapeSeverity, error: &ShapeError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ShapeContext, severity: ShapeSeverity, error: &ShapeError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards shaping events to `tracing`.
///
/// Successes are logged at `debug`, failures at `warn`, alerts at `error`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ShapeObserver for TracingObserver {
    fn on_success(&self, ctx: &ShapeContext, stats: ShapeStats) {
        tracing::debug!(
            type_name = ctx.type_name,
            fields = ctx.fields.as_deref().unwrap_or(""),
            records = stats.records,
            resolved_fields = stats.fields,
            "shaped records"
        );
    }

    fn on_failure(&self, ctx: &ShapeContext, severity: ShapeSeverity, error: &ShapeError) {
        tracing::warn!(
            type_name = ctx.type_name,
            fields = ctx.fields.as_deref().unwrap_or(""),
            ?severity,
            error = %error,
            "shaping failed"
        );
    }

    fn on_alert(&self, ctx: &ShapeContext, severity: ShapeSeverity, error: &ShapeError) {
        tracing::error!(
            type_name = ctx.type_name,
            fields = ctx.fields.as_deref().unwrap_or(""),
            ?severity,
            error = %error,
            "shaping failed (alert)"
        );
    }
}
