//! Comparison logic over the flat result list: grouping by operation name,
//! fastest-strategy flagging, and overhead multipliers against the baseline
//! strategy. Pure derivation, no I/O; rendering lives in the submodules.

pub mod charts;
pub mod tables;

use std::collections::BTreeMap;

use crate::{
    registry::{OpKind, Strategy},
    stats::BenchmarkResult,
};

/// The strategy every overhead multiplier is computed against.
pub const BASELINE: Strategy = Strategy::Raw;

/// Results for one operation name, indexed by strategy. `BTreeMap` keeps
/// both the operation names and the strategies in a stable display order.
pub type Grouped<'a> = BTreeMap<&'a str, BTreeMap<Strategy, &'a BenchmarkResult>>;

pub fn group_by_name(results: &[BenchmarkResult]) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = BTreeMap::new();
    for result in results {
        grouped
            .entry(result.info.name)
            .or_default()
            .insert(result.info.strategy, result);
    }
    grouped
}

/// Splits a grouped view by operation kind. A group's kind comes from any of
/// its members; strategies never disagree on it.
pub fn split_by_kind<'a>(grouped: &Grouped<'a>) -> (Grouped<'a>, Grouped<'a>) {
    let mut reads: Grouped<'a> = BTreeMap::new();
    let mut writes: Grouped<'a> = BTreeMap::new();
    for (&name, by_strategy) in grouped {
        let is_read = by_strategy
            .values()
            .next()
            .is_some_and(|r| r.info.kind == OpKind::Read);
        let target = if is_read { &mut reads } else { &mut writes };
        target.insert(name, by_strategy.clone());
    }
    (reads, writes)
}

/// Strategies sharing the minimum median within a group. Ties are all
/// flagged, not just the first.
pub fn fastest_strategies(group: &BTreeMap<Strategy, &BenchmarkResult>) -> Vec<Strategy> {
    let Some(min) = group
        .values()
        .map(|r| r.summary.median_ms)
        .min_by(f64::total_cmp)
    else {
        return Vec::new();
    };
    group
        .iter()
        .filter(|(_, r)| r.summary.median_ms == min)
        .map(|(&s, _)| s)
        .collect()
}

/// Overhead multipliers for one operation. `None` means "not applicable":
/// the strategy was not measured, the baseline is missing, or the baseline
/// median is exactly zero. Never a division result in those cases.
#[derive(Debug, Clone, PartialEq)]
pub struct OverheadRow {
    pub name: String,
    pub multipliers: Vec<(Strategy, Option<f64>)>,
}

/// One row per operation group, covering every non-baseline strategy.
pub fn overhead_rows(grouped: &Grouped<'_>) -> Vec<OverheadRow> {
    let others: Vec<Strategy> = Strategy::ALL
        .into_iter()
        .filter(|&s| s != BASELINE)
        .collect();

    grouped
        .iter()
        .map(|(name, by_strategy)| {
            let baseline_median = by_strategy
                .get(&BASELINE)
                .map(|r| r.summary.median_ms)
                .filter(|&m| m != 0.0);

            let multipliers = others
                .iter()
                .map(|&strategy| {
                    let multiplier = match (baseline_median, by_strategy.get(&strategy)) {
                        (Some(base), Some(result)) => Some(result.summary.median_ms / base),
                        _ => None,
                    };
                    (strategy, multiplier)
                })
                .collect();

            OverheadRow {
                name: name.to_string(),
                multipliers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::registry::BenchmarkInfo;

    fn result(name: &'static str, strategy: Strategy, medians_ms: &[u64]) -> BenchmarkResult {
        let samples: Vec<Duration> = medians_ms
            .iter()
            .map(|&v| Duration::from_millis(v))
            .collect();
        BenchmarkResult::new(
            BenchmarkInfo {
                name,
                strategy,
                kind: OpKind::Read,
                collection: "categories",
                description: "",
                suspending: strategy == Strategy::Repo,
            },
            samples,
        )
    }

    fn multiplier(rows: &[OverheadRow], name: &str, strategy: Strategy) -> Option<f64> {
        rows.iter()
            .find(|r| r.name == name)
            .and_then(|r| {
                r.multipliers
                    .iter()
                    .find(|(s, _)| *s == strategy)
                    .map(|(_, m)| *m)
            })
            .flatten()
    }

    #[test]
    fn identical_medians_give_exactly_one() {
        let results = vec![
            result("op", Strategy::Raw, &[4, 4, 4]),
            result("op", Strategy::Typed, &[4, 4, 4]),
        ];
        let grouped = group_by_name(&results);
        let rows = overhead_rows(&grouped);
        assert_eq!(multiplier(&rows, "op", Strategy::Typed), Some(1.0));
    }

    #[test]
    fn missing_baseline_yields_not_applicable() {
        let results = vec![result("op", Strategy::Typed, &[4])];
        let grouped = group_by_name(&results);
        let rows = overhead_rows(&grouped);
        assert_eq!(multiplier(&rows, "op", Strategy::Typed), None);
    }

    #[test]
    fn zero_baseline_median_yields_not_applicable() {
        let results = vec![
            result("op", Strategy::Raw, &[0, 0, 0]),
            result("op", Strategy::Typed, &[4]),
        ];
        let grouped = group_by_name(&results);
        let rows = overhead_rows(&grouped);
        assert_eq!(multiplier(&rows, "op", Strategy::Typed), None);
    }

    #[test]
    fn absent_strategy_yields_not_applicable() {
        let results = vec![result("op", Strategy::Raw, &[2])];
        let grouped = group_by_name(&results);
        let rows = overhead_rows(&grouped);
        assert_eq!(multiplier(&rows, "op", Strategy::Repo), None);
        assert_eq!(multiplier(&rows, "op", Strategy::Record), None);
    }

    #[test]
    fn multiplier_is_median_ratio() {
        let results = vec![
            result("op", Strategy::Raw, &[2, 2, 2]),
            result("op", Strategy::Record, &[6, 6, 6]),
        ];
        let grouped = group_by_name(&results);
        let rows = overhead_rows(&grouped);
        assert_eq!(multiplier(&rows, "op", Strategy::Record), Some(3.0));
    }

    #[test]
    fn all_tied_minima_are_flagged() {
        let results = vec![
            result("op", Strategy::Raw, &[3]),
            result("op", Strategy::Typed, &[3]),
            result("op", Strategy::Record, &[9]),
        ];
        let grouped = group_by_name(&results);
        let fastest = fastest_strategies(&grouped["op"]);
        assert_eq!(fastest, vec![Strategy::Raw, Strategy::Typed]);
    }

    #[test]
    fn fast_noop_beats_slower_sibling() {
        // A no-op style read that returns in ~0ms must be flagged fastest
        // against a slower sibling strategy.
        let results = vec![
            result("op", Strategy::Raw, &[0, 0, 0, 0, 0]),
            result("op", Strategy::Record, &[5, 5, 5, 5, 5]),
        ];
        assert_eq!(results[0].samples.len(), 5);
        let grouped = group_by_name(&results);
        assert_eq!(fastest_strategies(&grouped["op"]), vec![Strategy::Raw]);
    }

    #[test]
    fn groups_split_by_kind() {
        let mut write = result("w", Strategy::Raw, &[1]);
        write.info.kind = OpKind::Write;
        let results = vec![result("r", Strategy::Raw, &[1]), write];
        let grouped = group_by_name(&results);
        let (reads, writes) = split_by_kind(&grouped);
        assert!(reads.contains_key("r") && !reads.contains_key("w"));
        assert!(writes.contains_key("w") && !writes.contains_key("r"));
    }
}
