//! Parallel execution engine for large projections.
//!
//! This module sits "above" [`crate::shaping`] and provides:
//!
//! - Chunked, parallel shaping over a `rayon` thread pool
//! - Real-time metrics + observer hooks for monitoring
//!
//! Results are identical to [`crate::project`]: same records, same order, same errors.

mod observer;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::error::ShapeResult;
use crate::shaping::{DuplicateFields, Projector, Shape};
use crate::types::ShapedRecord;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    TracingExecutionObserver,
};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of records per chunk.
    pub chunk_size: usize,
    /// Policy for repeated field names.
    pub duplicates: DuplicateFields,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            chunk_size: 4_096,
            duplicates: DuplicateFields::default(),
        }
    }
}

/// A configurable execution engine for shaping large in-memory collections.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size == 0`, `num_threads == Some(0)`, or the thread pool cannot be built.
    pub fn new(opts: ExecutionOptions) -> Self {
        assert!(opts.chunk_size > 0, "chunk_size must be > 0");
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .expect("failed to build rayon thread pool");

        Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Shape `source` in parallel chunks.
    ///
    /// The field list is resolved once, before the run starts. A resolution error is returned
    /// without starting a run: no events are emitted and the metrics are left untouched.
    pub fn project_parallel<T>(&self, source: &[T], fields: Option<&str>) -> ShapeResult<Vec<ShapedRecord>>
    where
        T: Shape + Sync,
    {
        let projector = Projector::<T>::with_duplicates(fields, self.opts.duplicates)?;

        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);
        self.emit(ExecutionEvent::FieldsResolved {
            type_name: T::type_name(),
            fields: projector.field_count(),
        });

        let out = self.pool.install(|| self.shape_chunks(&projector, source));

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });
        tracing::debug!(
            type_name = T::type_name(),
            records = out.len(),
            "parallel projection finished"
        );

        Ok(out)
    }

    fn shape_chunks<T: Sync>(&self, projector: &Projector<T>, source: &[T]) -> Vec<ShapedRecord> {
        let per_chunk: Vec<Vec<ShapedRecord>> = source
            .par_chunks(self.opts.chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                self.metrics.on_chunk_start();
                self.emit(ExecutionEvent::ChunkStarted {
                    start_row: idx * self.opts.chunk_size,
                    row_count: chunk.len(),
                });

                let out = projector.project(chunk);

                self.metrics.on_records_shaped(out.len());
                self.emit(ExecutionEvent::ChunkFinished {
                    output_rows: out.len(),
                });
                self.metrics.on_chunk_end();
                out
            })
            .collect();

        per_chunk.into_iter().flatten().collect()
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
