//! Static catalog of benchmark operations. The catalog is built explicitly by
//! [`all_benchmarks`] rather than populated as a side effect of module
//! initialization, so there is no hidden global state and no import-order
//! dependency: callers get an immutable descriptor list and hand it to the
//! runner.

use std::{fmt, str::FromStr};

use futures::future::BoxFuture;

use crate::{error::Error, ops, targets::Targets, Result};

/// One of the compared data-access strategies, in execution order.
/// `Raw` is the baseline every overhead multiplier is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strategy {
    /// Blocking driver calls on raw BSON documents.
    Raw,
    /// Blocking driver calls on serde-typed collections.
    Typed,
    /// Async repository layer, run under a cooperative scheduler.
    Repo,
    /// Blocking active-record layer with validation and document round-trips.
    Record,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Raw,
        Strategy::Typed,
        Strategy::Repo,
        Strategy::Record,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::Raw => "raw",
            Strategy::Typed => "typed",
            Strategy::Repo => "repo",
            Strategy::Record => "record",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::Raw => "Raw driver",
            Strategy::Typed => "Typed structs",
            Strategy::Repo => "Async repo",
            Strategy::Record => "Active record",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(Strategy::Raw),
            "typed" => Ok(Strategy::Typed),
            "repo" => Ok(Strategy::Repo),
            "record" => Ok(Strategy::Record),
            other => Err(Error::Configuration(format!(
                "unknown strategy `{other}` (expected raw, typed, repo or record)"
            ))),
        }
    }
}

/// Read or write classification. Within a scheduling group all reads run
/// before any write so insert side effects cannot skew read measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpKind {
    Read,
    Write,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpKind::Read => "read",
            OpKind::Write => "write",
        })
    }
}

/// Shared inputs for blocking operations: one database handle per scheduling
/// group plus the preselected query targets. Read-only during execution.
pub struct SyncCtx {
    pub db: mongodb::sync::Database,
    pub targets: Targets,
}

/// Shared inputs for suspending operations.
pub struct AsyncCtx {
    pub db: mongodb::Database,
    pub targets: Targets,
}

pub type BlockingFn = fn(&SyncCtx) -> Result<()>;
pub type SuspendingFn = fn(&AsyncCtx) -> BoxFuture<'_, Result<()>>;

/// The executable half of a descriptor. Blocking operations run strictly
/// sequentially on the calling thread; suspending operations run under a
/// single cooperative scheduler instance shared by the whole group.
#[derive(Clone, Copy)]
pub enum Operation {
    Blocking(BlockingFn),
    Suspending(SuspendingFn),
}

/// Static metadata identifying one benchmark operation.
#[derive(Debug, Clone)]
pub struct BenchmarkInfo {
    pub name: &'static str,
    pub strategy: Strategy,
    pub kind: OpKind,
    pub collection: &'static str,
    pub description: &'static str,
    /// True when the operation must run under the cooperative scheduler.
    pub suspending: bool,
}

pub struct BenchmarkDescriptor {
    pub info: BenchmarkInfo,
    pub op: Operation,
}

impl BenchmarkDescriptor {
    pub fn blocking(
        name: &'static str,
        strategy: Strategy,
        kind: OpKind,
        collection: &'static str,
        description: &'static str,
        op: BlockingFn,
    ) -> Self {
        BenchmarkDescriptor {
            info: BenchmarkInfo {
                name,
                strategy,
                kind,
                collection,
                description,
                suspending: false,
            },
            op: Operation::Blocking(op),
        }
    }

    pub fn suspending(
        name: &'static str,
        strategy: Strategy,
        kind: OpKind,
        collection: &'static str,
        description: &'static str,
        op: SuspendingFn,
    ) -> Self {
        BenchmarkDescriptor {
            info: BenchmarkInfo {
                name,
                strategy,
                kind,
                collection,
                description,
                suspending: true,
            },
            op: Operation::Suspending(op),
        }
    }
}

/// Builds the full descriptor list: every operation of the suite, once per
/// strategy, in declared strategy order.
pub fn all_benchmarks() -> Vec<BenchmarkDescriptor> {
    let mut out = Vec::with_capacity(60);
    ops::raw::register(&mut out);
    ops::typed::register(&mut out);
    ops::repo::register(&mut out);
    ops::record::register(&mut out);
    out
}

/// Restricts a descriptor list to one strategy and/or operation kind.
pub fn filter(
    descriptors: Vec<BenchmarkDescriptor>,
    strategy: Option<Strategy>,
    kind: Option<OpKind>,
) -> Vec<BenchmarkDescriptor> {
    descriptors
        .into_iter()
        .filter(|d| strategy.is_none_or(|s| d.info.strategy == s))
        .filter(|d| kind.is_none_or(|k| d.info.kind == k))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_is_complete() {
        let all = all_benchmarks();
        assert_eq!(all.len(), 60);

        let mut seen = HashSet::new();
        for d in &all {
            assert!(
                seen.insert((d.info.name, d.info.strategy)),
                "duplicate benchmark: {} / {}",
                d.info.name,
                d.info.strategy
            );
        }

        // Every strategy implements the same operation set.
        for strategy in Strategy::ALL {
            let names: HashSet<_> = all
                .iter()
                .filter(|d| d.info.strategy == strategy)
                .map(|d| d.info.name)
                .collect();
            assert_eq!(names.len(), 15, "{strategy} is missing operations");
        }
    }

    #[test]
    fn only_repo_suspends() {
        for d in all_benchmarks() {
            let expected = d.info.strategy == Strategy::Repo;
            assert_eq!(d.info.suspending, expected, "{}", d.info.name);
            match d.op {
                Operation::Blocking(_) => assert!(!d.info.suspending),
                Operation::Suspending(_) => assert!(d.info.suspending),
            }
        }
    }

    #[test]
    fn filters_restrict() {
        let reads = filter(all_benchmarks(), None, Some(OpKind::Read));
        assert_eq!(reads.len(), 40);
        assert!(reads.iter().all(|d| d.info.kind == OpKind::Read));

        let raw_writes = filter(all_benchmarks(), Some(Strategy::Raw), Some(OpKind::Write));
        assert_eq!(raw_writes.len(), 5);
        assert!(raw_writes.iter().all(|d| d.info.strategy == Strategy::Raw));
    }

    #[test]
    fn strategy_tags_round_trip() {
        for s in Strategy::ALL {
            assert_eq!(s.tag().parse::<Strategy>().unwrap(), s);
        }
        assert!(matches!(
            "mongoengine".parse::<Strategy>(),
            Err(Error::Configuration(_))
        ));
    }
}
