//! Console rendering of the comparison and overhead tables.

use crate::{
    report::{fastest_strategies, group_by_name, overhead_rows, split_by_kind, Grouped, BASELINE},
    registry::Strategy,
    stats::BenchmarkResult,
};

/// Prints the per-kind comparison tables followed by the overhead summary.
pub fn print_results(results: &[BenchmarkResult]) {
    if results.is_empty() {
        println!("No benchmark results to display.");
        return;
    }

    let grouped = group_by_name(results);
    let (reads, writes) = split_by_kind(&grouped);

    if !reads.is_empty() {
        println!("\nRead benchmarks");
        print_comparison_table(&reads);
    }
    if !writes.is_empty() {
        println!("\nWrite benchmarks");
        print_comparison_table(&writes);
    }

    println!("\nOverhead vs {}", BASELINE.display_name());
    print_overhead_table(&grouped);
}

fn print_comparison_table(grouped: &Grouped<'_>) {
    println!(
        "{:<32} {:<14} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "benchmark", "strategy", "median ms", "min ms", "max ms", "p95 ms", "mean ms"
    );
    println!("{}", "-".repeat(102));

    for (name, by_strategy) in grouped {
        let fastest = fastest_strategies(by_strategy);
        let mut first = true;
        for (strategy, result) in by_strategy {
            let marker = if fastest.contains(strategy) { "*" } else { " " };
            let s = &result.summary;
            println!(
                "{:<32} {:<13}{} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                if first { label(name) } else { String::new() },
                strategy.display_name(),
                marker,
                s.median_ms,
                s.min_ms,
                s.max_ms,
                s.p95_ms,
                s.mean_ms,
            );
            first = false;
        }
        println!();
    }
    println!("* lowest median in group");
}

fn print_overhead_table(grouped: &Grouped<'_>) {
    let others: Vec<Strategy> = Strategy::ALL
        .into_iter()
        .filter(|&s| s != BASELINE)
        .collect();

    print!("{:<32}", "benchmark");
    for strategy in &others {
        print!(" {:>14}", strategy.display_name());
    }
    println!();
    println!("{}", "-".repeat(32 + 15 * others.len()));

    for row in overhead_rows(grouped) {
        print!("{:<32}", label(&row.name));
        for (_, multiplier) in &row.multipliers {
            match multiplier {
                Some(m) => print!(" {:>13.1}x", m),
                None => print!(" {:>14}", "n/a"),
            }
        }
        println!();
    }
}

/// Human-readable label for an operation name.
pub(crate) fn label(name: &str) -> String {
    match name {
        "read_single_field_category" => "Read 1 field (category)".to_string(),
        "read_single_field_order" => "Read 1 field (order)".to_string(),
        "read_full_record_category" => "Read full record (category)".to_string(),
        "read_full_record_order" => "Read full record (order)".to_string(),
        "read_100_orders" => "Read 100 orders".to_string(),
        "read_1000_orders" => "Read 1,000 orders".to_string(),
        "read_10000_orders" => "Read 10,000 orders".to_string(),
        "read_100_categories" => "Read 100 categories".to_string(),
        "read_1000_categories" => "Read 1,000 categories".to_string(),
        "read_10000_categories" => "Read 10,000 categories".to_string(),
        "insert_single" => "Insert 1".to_string(),
        "insert_batch_100" => "Insert 100".to_string(),
        "insert_batch_1000" => "Insert 1,000".to_string(),
        "update_single" => "Update 1".to_string(),
        "delete_single" => "Delete 1".to_string(),
        other => other.replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_have_labels() {
        assert_eq!(label("read_100_orders"), "Read 100 orders");
        assert_eq!(label("insert_batch_1000"), "Insert 1,000");
    }

    #[test]
    fn unknown_names_fall_back_to_words() {
        assert_eq!(label("some_new_benchmark"), "some new benchmark");
    }
}
