//! # Aggregation Service
//!
//! Evaluates every (region, product, language) cell of a scope under one
//! policy. Cells are independent: the fact store, catalog and index are
//! shared read-only across scoped worker threads. Workers check the lowest
//! failing plan index and the caller's cancel flag between cells.

pub mod errors;
pub mod gather;
pub mod index;
pub mod scope;

pub use errors::{CellError, EvaluationError};
pub use gather::gather_dependencies;
pub use index::StatusIndex;
pub use scope::EvaluationScope;

use crate::policies::AvailabilityPolicy;
use crate::results::{CellKey, CellOutcome, StatusTable};
use matrix_core::config::compile_time::evaluation::{
    DEFAULT_WORKER_THREADS, MAX_CHUNK_SIZE, MAX_WORKER_THREADS, MIN_CHUNK_SIZE,
    PARALLEL_CELL_THRESHOLD,
};
use matrix_core::logging::{self, codes, CellContext};
use matrix_core::{DependencyCatalog, FactStore, Product, Region, Service};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct EvaluationOptions {
    /// Abort the run on the first cell error
    pub fail_fast: bool,

    /// Worker threads (0 = detect, 1 = sequential)
    pub max_threads: usize,

    /// Set by the caller to abandon remaining cells
    pub cancel_flag: Option<Arc<AtomicBool>>,
}

impl EvaluationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Threads actually used for `cells` cells
    pub fn effective_threads(&self, cells: usize) -> usize {
        let requested = if self.max_threads == 0 {
            if cells < PARALLEL_CELL_THRESHOLD {
                1
            } else {
                thread::available_parallelism()
                    .map(|n| n.get().min(MAX_WORKER_THREADS))
                    .unwrap_or(DEFAULT_WORKER_THREADS)
            }
        } else {
            self.max_threads
        };

        requested.clamp(1, cells.max(1))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// One cell to evaluate, with its product's required services
struct CellPlan<'a> {
    key: CellKey,
    services: &'a [Service],
}

/// Read-only state shared by every worker
struct EvaluationContext<'a> {
    store: &'a FactStore,
    index: &'a StatusIndex,
    regions: &'a [Region],
    policy: &'a dyn AvailabilityPolicy,
    global_view: bool,
    fail_fast: bool,
    options: &'a EvaluationOptions,
    /// Plan index of the earliest failed cell seen so far (fail-fast only)
    first_failure: AtomicUsize,
}

impl EvaluationContext<'_> {
    fn first_failure(&self) -> Option<usize> {
        match self.first_failure.load(Ordering::Acquire) {
            usize::MAX => None,
            index => Some(index),
        }
    }

    /// Cells after an already failed cell are never needed
    fn should_skip(&self, index: usize) -> bool {
        self.options.is_cancelled() || self.first_failure().is_some_and(|first| index > first)
    }

    fn evaluate_cell(&self, plan: &CellPlan<'_>) -> CellOutcome {
        let key = &plan.key;
        let context = CellContext::new(&key.product, &key.region, &key.language);

        logging::with_cell_context(context, || {
            let outcome = gather_dependencies(
                self.store,
                self.index,
                self.regions,
                &key.region,
                &key.language,
                plan.services,
                self.global_view,
            )
            .map(|dependencies| self.policy.evaluate(&dependencies));

            if let Err(e) = &outcome {
                matrix_core::log_error!(e.code(), "Cell evaluation failed", "error" => e);
            }
            outcome
        })
    }

    /// Evaluate `chunk`, which starts at plan index `offset`, in order
    fn run_chunk(&self, offset: usize, chunk: &[CellPlan<'_>]) -> Vec<(CellKey, CellOutcome)> {
        let mut results = Vec::with_capacity(chunk.len());

        for (index, plan) in (offset..).zip(chunk) {
            if self.should_skip(index) {
                break;
            }

            let outcome = self.evaluate_cell(plan);
            if outcome.is_err() && self.fail_fast {
                self.first_failure.fetch_min(index, Ordering::AcqRel);
            }
            results.push((plan.key.clone(), outcome));
        }

        results
    }
}

/// Evaluate every cell of `scope` under `policy`.
///
/// Cells are planned region by region, then product by product in scope
/// (or catalog) order, then language by language. An unknown product is
/// fatal. Missing facts fail only the cells that need them unless
/// `options.fail_fast` is set, in which case the error of the first failing
/// cell in plan order is returned, whatever the thread count.
pub fn evaluate(
    scope: &EvaluationScope,
    catalog: &DependencyCatalog,
    store: &FactStore,
    policy: &dyn AvailabilityPolicy,
    options: &EvaluationOptions,
) -> Result<StatusTable, EvaluationError> {
    let products: Vec<Product> = match scope.products() {
        Some(selected) => selected.to_vec(),
        None => catalog.products().to_vec(),
    };

    let mut dependencies = Vec::with_capacity(products.len());
    for product in &products {
        dependencies.push((product, catalog.dependencies_of(product)?));
    }

    let mut plan = Vec::with_capacity(
        scope.regions().len() * products.len() * scope.languages().len(),
    );
    for region in scope.regions() {
        for &(product, services) in &dependencies {
            for language in scope.languages() {
                plan.push(CellPlan {
                    key: CellKey::new(region.clone(), product.clone(), language.clone()),
                    services,
                });
            }
        }
    }

    let services: BTreeSet<&Service> = dependencies
        .iter()
        .flat_map(|(_, services)| services.iter())
        .collect();
    let known = store.services();
    for service in services.iter().filter(|service| !known.contains(**service)) {
        matrix_core::log_warning!("No facts for required service", "service" => service);
    }
    let index = StatusIndex::build(store, scope.regions(), services, scope.languages());

    let threads = options.effective_threads(plan.len());
    matrix_core::log_info!("Starting matrix evaluation",
        "policy" => policy.policy_id(),
        "cells" => plan.len(),
        "threads" => threads
    );

    let context = EvaluationContext {
        store,
        index: &index,
        regions: scope.regions(),
        policy,
        global_view: policy.requires_global_view(),
        fail_fast: options.fail_fast,
        options,
        first_failure: AtomicUsize::new(usize::MAX),
    };

    let outcomes = if threads <= 1 {
        context.run_chunk(0, &plan)
    } else {
        run_parallel(&context, &plan, threads)?
    };

    let total = plan.len();
    let mut table = StatusTable::new(
        policy.policy_id(),
        scope.regions().to_vec(),
        products,
        scope.languages().to_vec(),
    );
    for (key, outcome) in outcomes {
        table.insert(key, outcome);
    }

    if let Some(first) = context.first_failure() {
        let cell = &plan[first].key;
        if let Some(Err(error)) = table.get(cell) {
            let error = EvaluationError::FailFast {
                cell: cell.clone(),
                source: error.clone(),
            };
            matrix_core::log_error!(error.code(), "Evaluation aborted on cell error",
                "cell" => cell,
                "plan_index" => first
            );
            return Err(error);
        }
    }

    if table.len() < total {
        let error = EvaluationError::Cancelled {
            completed: table.len(),
            total,
        };
        matrix_core::log_error!(error.code(), "Evaluation cancelled",
            "completed" => table.len(),
            "total" => total
        );
        return Err(error);
    }

    let summary = table.summary();
    matrix_core::log_success!(
        codes::success::EVALUATION_COMPLETED,
        "Matrix evaluation completed",
        "policy" => policy.policy_id(),
        "cells" => summary.total,
        "failed" => summary.failed
    );

    Ok(table)
}

/// Split the plan into chunks and evaluate them on scoped threads, at most
/// `threads` at a time
fn run_parallel(
    context: &EvaluationContext<'_>,
    plan: &[CellPlan<'_>],
    threads: usize,
) -> Result<Vec<(CellKey, CellOutcome)>, EvaluationError> {
    let chunk_size = calculate_chunk_size(plan.len(), threads);
    let mut outcomes = Vec::with_capacity(plan.len());

    for (wave_index, wave) in plan.chunks(chunk_size * threads).enumerate() {
        let wave_offset = wave_index * chunk_size * threads;
        if context.should_skip(wave_offset) {
            break;
        }

        let wave_results = thread::scope(|s| {
            let handles: Vec<_> = wave
                .chunks(chunk_size)
                .enumerate()
                .map(|(i, chunk)| {
                    let offset = wave_offset + i * chunk_size;
                    s.spawn(move || context.run_chunk(offset, chunk))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });

        for result in wave_results {
            match result {
                Ok(chunk_outcomes) => outcomes.extend(chunk_outcomes),
                Err(_) => {
                    matrix_core::log_error!(
                        codes::evaluation::WORKER_FAILURE,
                        "Evaluation worker panicked"
                    );
                    return Err(EvaluationError::WorkerFailed {
                        reason: "worker thread panicked".to_string(),
                    });
                }
            }
        }
    }

    Ok(outcomes)
}

/// Cells per worker chunk
fn calculate_chunk_size(cells: usize, threads: usize) -> usize {
    let threads = threads.max(1);
    let ideal_chunk_size = cells.div_ceil(threads);
    ideal_chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}
