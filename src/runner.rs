//! Execution & Timing Engine. Runs every descriptor for a fixed iteration
//! count, measuring wall-clock elapsed time per call on a monotonic clock.
//!
//! Two scheduling groups exist. Blocking operations run first, strictly
//! sequentially on the calling thread. Suspending operations run afterwards
//! under one cooperative scheduler instance for the whole group; control
//! returns to the sequential driver loop between iterations, so nothing ever
//! runs concurrently with anything else. Mixing the two call models in one
//! execution context would add synchronization overhead that contaminates
//! the measurements, hence the split.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use mongodb::bson::doc;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::Error,
    models::{BENCHMARK_MARKER, CATEGORIES, ORDERS},
    registry::{self, AsyncCtx, BenchmarkDescriptor, OpKind, Operation, Strategy, SyncCtx},
    stats::BenchmarkResult,
    targets::{self, Targets},
    Result,
};

/// Run-scoped knobs. `iterations` applies identically to every benchmark in
/// the run so cross-strategy statistics stay comparable.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub strategy: Option<Strategy>,
    pub kind: Option<OpKind>,
    pub iterations: u32,
}

/// One execution regime. Both implementations receive the same descriptor
/// list shape and produce one result per descriptor, in order.
pub trait OperationRunner {
    fn run_group(
        &self,
        group: &[BenchmarkDescriptor],
        iterations: u32,
    ) -> Result<Vec<BenchmarkResult>>;
}

/// Top-level driver: selects targets once, runs the blocking group, purges
/// benchmark-tagged documents, runs the cooperative group, purges again.
pub fn run_benchmarks(config: &Config, options: &RunOptions) -> Result<Vec<BenchmarkResult>> {
    if options.iterations < 1 {
        return Err(Error::Configuration(format!(
            "iteration count must be at least 1, got {}",
            options.iterations
        )));
    }

    let descriptors = registry::filter(registry::all_benchmarks(), options.strategy, options.kind);
    if descriptors.is_empty() {
        return Ok(Vec::new());
    }

    let client = mongodb::sync::Client::with_uri_str(&config.uri)?;
    let db = client.database(&config.db_name);

    let targets = targets::select_targets(&db)?;
    info!(
        category_slug = %targets.category_slug,
        order_number = %targets.order_number,
        bulk_status = %targets.bulk_status,
        "selected benchmark targets"
    );

    let (mut suspending, mut blocking): (Vec<_>, Vec<_>) =
        descriptors.into_iter().partition(|d| d.info.suspending);
    schedule(&mut blocking);
    schedule(&mut suspending);

    let mut results = Vec::with_capacity(blocking.len() + suspending.len());

    let blocking_runner = BlockingRunner {
        cx: SyncCtx {
            db: db.clone(),
            targets: targets.clone(),
        },
    };
    results.extend(blocking_runner.run_group(&blocking, options.iterations)?);
    purge_benchmark_documents(&db)?;

    let cooperative_runner = CooperativeRunner {
        uri: config.uri.clone(),
        db_name: config.db_name.clone(),
        targets,
    };
    results.extend(cooperative_runner.run_group(&suspending, options.iterations)?);
    purge_benchmark_documents(&db)?;

    Ok(results)
}

/// Orders a scheduling group: all reads before all writes, and a fixed
/// strategy order within each kind, so write side effects cannot skew read
/// measurements and run-to-run comparisons stay valid.
fn schedule(group: &mut [BenchmarkDescriptor]) {
    group.sort_by_key(|d| (d.info.kind, d.info.strategy));
}

/// Deletes every benchmark-tagged document, restoring the seeded population
/// for whatever runs next.
fn purge_benchmark_documents(db: &mongodb::sync::Database) -> Result<()> {
    for collection in [CATEGORIES, ORDERS] {
        let deleted = db
            .collection::<mongodb::bson::Document>(collection)
            .delete_many(doc! { BENCHMARK_MARKER: true })
            .run()?;
        debug!(collection, count = deleted.deleted_count, "purged benchmark documents");
    }
    Ok(())
}

/// Runs blocking operations one full iteration loop at a time.
struct BlockingRunner {
    cx: SyncCtx,
}

impl OperationRunner for BlockingRunner {
    fn run_group(
        &self,
        group: &[BenchmarkDescriptor],
        iterations: u32,
    ) -> Result<Vec<BenchmarkResult>> {
        let mut results = Vec::with_capacity(group.len());
        for descriptor in group {
            let Operation::Blocking(op) = descriptor.op else {
                return Err(Error::Configuration(format!(
                    "benchmark `{}` cannot run on the blocking runner",
                    descriptor.info.name
                )));
            };
            let bar = iteration_bar(iterations, descriptor);
            let samples = time_n(descriptor.info.name, iterations, Some(&bar), || {
                op(&self.cx)
            })?;
            bar.finish();
            results.push(BenchmarkResult::new(descriptor.info.clone(), samples));
        }
        Ok(results)
    }
}

/// Runs suspending operations under a single current-thread scheduler for
/// the whole group. Iterations are awaited one at a time; suspension only
/// happens at the underlying driver call.
struct CooperativeRunner {
    uri: String,
    db_name: String,
    targets: Targets,
}

impl OperationRunner for CooperativeRunner {
    fn run_group(
        &self,
        group: &[BenchmarkDescriptor],
        iterations: u32,
    ) -> Result<Vec<BenchmarkResult>> {
        if group.is_empty() {
            return Ok(Vec::new());
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async {
            let client = mongodb::Client::with_uri_str(&self.uri).await?;
            let cx = AsyncCtx {
                db: client.database(&self.db_name),
                targets: self.targets.clone(),
            };

            let mut results = Vec::with_capacity(group.len());
            for descriptor in group {
                let Operation::Suspending(op) = descriptor.op else {
                    return Err(Error::Configuration(format!(
                        "benchmark `{}` cannot run on the cooperative runner",
                        descriptor.info.name
                    )));
                };
                let bar = iteration_bar(iterations, descriptor);
                let mut samples = Vec::with_capacity(iterations as usize);
                for iteration in 0..iterations {
                    bar.inc(1);
                    let timer = Instant::now();
                    op(&cx)
                        .await
                        .map_err(|e| Error::operation(descriptor.info.name, iteration, e))?;
                    samples.push(timer.elapsed());
                }
                bar.finish();
                results.push(BenchmarkResult::new(descriptor.info.clone(), samples));
            }
            Ok(results)
        })
    }
}

/// Times `call` exactly `iterations` times. Any failure aborts the loop:
/// statistics over fewer than the configured samples would be misleading, so
/// there is no skip-and-continue path.
pub(crate) fn time_n<F>(
    name: &str,
    iterations: u32,
    progress: Option<&ProgressBar>,
    mut call: F,
) -> Result<Vec<Duration>>
where
    F: FnMut() -> Result<()>,
{
    let mut samples = Vec::with_capacity(iterations as usize);
    for iteration in 0..iterations {
        if let Some(bar) = progress {
            bar.inc(1);
        }
        let timer = Instant::now();
        call().map_err(|e| Error::operation(name, iteration, e))?;
        samples.push(timer.elapsed());
    }
    Ok(samples)
}

fn iteration_bar(iterations: u32, descriptor: &BenchmarkDescriptor) -> ProgressBar {
    let bar = ProgressBar::new(iterations as u64).with_message(format!(
        "{}: {}",
        descriptor.info.strategy, descriptor.info.name
    ));
    if let Ok(style) =
        ProgressStyle::with_template("{msg:40} [{bar:30.cyan/blue}] {pos}/{len} ({eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BenchmarkDescriptor;

    fn nop(_: &SyncCtx) -> Result<()> {
        Ok(())
    }

    fn failing(_: &SyncCtx) -> Result<()> {
        Err(Error::Configuration("boom".to_string()))
    }

    fn descriptor(name: &'static str, strategy: Strategy, kind: OpKind) -> BenchmarkDescriptor {
        BenchmarkDescriptor::blocking(name, strategy, kind, "categories", "", nop)
    }

    #[test]
    fn time_n_produces_exactly_n_samples() {
        for n in [1u32, 2, 5, 100] {
            let samples = time_n("nop", n, None, || Ok(())).unwrap();
            assert_eq!(samples.len(), n as usize);
            assert!(samples.iter().all(|d| *d >= Duration::ZERO));
        }
    }

    #[test]
    fn time_n_failure_is_fatal_and_indexed() {
        let mut calls = 0;
        let err = time_n("flaky", 10, None, || {
            calls += 1;
            if calls == 3 {
                Err(Error::Configuration("boom".to_string()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        // Third call fails -> iteration index 2, and the loop stops there.
        assert_eq!(calls, 3);
        match err {
            Error::Operation {
                benchmark,
                iteration,
                ..
            } => {
                assert_eq!(benchmark, "flaky");
                assert_eq!(iteration, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_iterations_is_a_configuration_error() {
        let options = RunOptions {
            strategy: None,
            kind: None,
            iterations: 0,
        };
        let err = run_benchmarks(&Config::from_env(), &options).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn schedule_orders_reads_before_writes_and_strategies_in_declared_order() {
        let mut group = vec![
            descriptor("w_record", Strategy::Record, OpKind::Write),
            descriptor("r_record", Strategy::Record, OpKind::Read),
            descriptor("w_raw", Strategy::Raw, OpKind::Write),
            descriptor("r_typed", Strategy::Typed, OpKind::Read),
            descriptor("r_raw", Strategy::Raw, OpKind::Read),
        ];
        schedule(&mut group);

        let order: Vec<&str> = group.iter().map(|d| d.info.name).collect();
        assert_eq!(order, ["r_raw", "r_typed", "r_record", "w_raw", "w_record"]);
    }

    #[test]
    fn blocking_runner_rejects_suspending_descriptors() {
        // A suspending descriptor routed to the blocking runner is a
        // programming error surfaced as a configuration failure, not a hang.
        fn suspending_nop(
            _: &AsyncCtx,
        ) -> futures::future::BoxFuture<'_, Result<()>> {
            Box::pin(async { Ok(()) })
        }

        let descriptor = BenchmarkDescriptor::suspending(
            "bad",
            Strategy::Repo,
            OpKind::Read,
            "categories",
            "",
            suspending_nop,
        );

        // The blocking runner never opens a connection before inspecting the
        // descriptor, so an unreachable URI is fine here.
        let runner = BlockingRunner {
            cx: SyncCtx {
                db: mongodb::sync::Client::with_uri_str("mongodb://localhost:27017")
                    .unwrap()
                    .database("never_used"),
                targets: Targets {
                    category_slug: String::new(),
                    order_number: String::new(),
                    bulk_status: String::new(),
                },
            },
        };
        let err = runner.run_group(&[descriptor], 1).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn failing_operation_aborts_with_benchmark_name() {
        let descriptor = BenchmarkDescriptor::blocking(
            "always_fails",
            Strategy::Raw,
            OpKind::Read,
            "categories",
            "",
            failing,
        );
        let runner = BlockingRunner {
            cx: SyncCtx {
                db: mongodb::sync::Client::with_uri_str("mongodb://localhost:27017")
                    .unwrap()
                    .database("never_used"),
                targets: Targets {
                    category_slug: String::new(),
                    order_number: String::new(),
                    bulk_status: String::new(),
                },
            },
        };
        let err = runner.run_group(&[descriptor], 3).unwrap_err();
        match err {
            Error::Operation { benchmark, iteration, .. } => {
                assert_eq!(benchmark, "always_fails");
                assert_eq!(iteration, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
