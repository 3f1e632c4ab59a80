//! Grouped-bar SVG charts derived from the benchmark results: one chart per
//! operation kind (median latency per strategy) and one overhead chart
//! (multiplier vs the baseline).

use std::{
    collections::BTreeSet,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    registry::Strategy,
    report::{group_by_name, overhead_rows, split_by_kind, tables::label, Grouped, BASELINE},
    stats::BenchmarkResult,
    Result,
};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 640;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 140.0;
const MARGIN_TOP: f64 = 50.0;

fn color(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Raw => "#2196f3",
        Strategy::Typed => "#9c27b0",
        Strategy::Repo => "#ff9800",
        Strategy::Record => "#4caf50",
    }
}

/// Renders all charts under `output_dir`, creating it if needed.
pub fn render_all(results: &[BenchmarkResult], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let grouped = group_by_name(results);
    let (reads, writes) = split_by_kind(&grouped);

    let mut written = Vec::new();
    if !reads.is_empty() {
        let path = output_dir.join("read_benchmarks.svg");
        fs::write(&path, median_chart(&reads, "Read benchmarks (median ms)"))?;
        info!(path = %path.display(), "chart saved");
        written.push(path);
    }
    if !writes.is_empty() {
        let path = output_dir.join("write_benchmarks.svg");
        fs::write(&path, median_chart(&writes, "Write benchmarks (median ms)"))?;
        info!(path = %path.display(), "chart saved");
        written.push(path);
    }
    if !grouped.is_empty() {
        let path = output_dir.join("overhead_comparison.svg");
        fs::write(&path, overhead_chart(&grouped))?;
        info!(path = %path.display(), "chart saved");
        written.push(path);
    }
    Ok(written)
}

/// Grouped bars of median latency, one group per operation, one bar per
/// strategy present.
fn median_chart(grouped: &Grouped<'_>, title: &str) -> String {
    let series: Vec<(String, Vec<(Strategy, f64)>)> = grouped
        .iter()
        .map(|(name, by_strategy)| {
            let bars = by_strategy
                .iter()
                .map(|(&s, r)| (s, r.summary.median_ms))
                .collect();
            (label(name), bars)
        })
        .collect();
    bar_chart(title, "median ms", &series, None)
}

/// Grouped bars of overhead multipliers with a reference line at 1.0x.
fn overhead_chart(grouped: &Grouped<'_>) -> String {
    let series: Vec<(String, Vec<(Strategy, f64)>)> = overhead_rows(grouped)
        .into_iter()
        .map(|row| {
            let bars = row
                .multipliers
                .iter()
                .filter_map(|&(s, m)| m.map(|m| (s, m)))
                .collect();
            (label(&row.name), bars)
        })
        .collect();
    bar_chart(
        &format!("Overhead vs {} (multiplier)", BASELINE.display_name()),
        "multiplier",
        &series,
        Some(1.0),
    )
}

fn bar_chart(
    title: &str,
    y_label: &str,
    series: &[(String, Vec<(Strategy, f64)>)],
    reference: Option<f64>,
) -> String {
    let max_value = series
        .iter()
        .flat_map(|(_, bars)| bars.iter().map(|&(_, v)| v))
        .chain(reference)
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let plot_width = WIDTH as f64 - MARGIN_LEFT - 20.0;
    let plot_height = HEIGHT as f64 - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline_y = HEIGHT as f64 - MARGIN_BOTTOM;
    let groups = series.len().max(1) as f64;
    let group_width = plot_width / groups;
    let bar_width = (group_width * 0.8) / Strategy::ALL.len() as f64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="28" font-size="18" font-family="sans-serif">{}</text>"#,
        MARGIN_LEFT,
        escape(title)
    );
    let _ = writeln!(
        svg,
        r#"<text x="16" y="{}" font-size="12" font-family="sans-serif" transform="rotate(-90 16 {})">{}</text>"#,
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0,
        escape(y_label)
    );

    // Axes.
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline_y}" stroke="black"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{baseline_y}" x2="{}" y2="{baseline_y}" stroke="black"/>"#,
        MARGIN_LEFT + plot_width
    );

    // Horizontal gridlines with value labels.
    for step in 1..=4 {
        let value = max_value * step as f64 / 4.0;
        let y = baseline_y - plot_height * step as f64 / 4.0;
        let _ = writeln!(
            svg,
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="#dddddd"/>"##,
            MARGIN_LEFT + plot_width
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" font-family="sans-serif" text-anchor="end">{value:.1}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0
        );
    }

    // Bars.
    for (group_idx, (name, bars)) in series.iter().enumerate() {
        let group_x = MARGIN_LEFT + group_idx as f64 * group_width + group_width * 0.1;
        for (bar_idx, &(strategy, value)) in bars.iter().enumerate() {
            let height = plot_height * value / max_value;
            let x = group_x + bar_idx as f64 * bar_width;
            let _ = writeln!(
                svg,
                r#"<rect x="{x:.1}" y="{:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{}"/>"#,
                baseline_y - height,
                color(strategy)
            );
        }
        let label_x = group_x + group_width * 0.4;
        let label_y = baseline_y + 12.0;
        let _ = writeln!(
            svg,
            r#"<text x="{label_x:.1}" y="{label_y:.1}" font-size="11" font-family="sans-serif" text-anchor="end" transform="rotate(-45 {label_x:.1} {label_y:.1})">{}</text>"#,
            escape(name)
        );
    }

    // Reference line (e.g. the 1.0x baseline on the overhead chart).
    if let Some(value) = reference {
        let y = baseline_y - plot_height * value / max_value;
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="{}" stroke-dasharray="6 4" stroke-width="2"/>"#,
            MARGIN_LEFT + plot_width,
            color(BASELINE)
        );
    }

    // Legend, restricted to the strategies that actually have bars so a
    // filtered run does not show empty swatches.
    let present: BTreeSet<Strategy> = series
        .iter()
        .flat_map(|(_, bars)| bars.iter().map(|&(s, _)| s))
        .collect();
    for (i, strategy) in present.into_iter().enumerate() {
        let x = MARGIN_LEFT + plot_width - 160.0;
        let y = MARGIN_TOP + 18.0 * i as f64;
        let _ = writeln!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="12" height="12" fill="{}"/>"#,
            color(strategy)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" font-family="sans-serif">{}</text>"#,
            x + 18.0,
            y + 10.0,
            escape(strategy.display_name())
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::registry::{BenchmarkInfo, OpKind};

    fn result(name: &'static str, strategy: Strategy, millis: u64) -> BenchmarkResult {
        BenchmarkResult::new(
            BenchmarkInfo {
                name,
                strategy,
                kind: OpKind::Read,
                collection: "categories",
                description: "",
                suspending: false,
            },
            vec![Duration::from_millis(millis)],
        )
    }

    #[test]
    fn charts_are_written() {
        let dir = std::env::temp_dir().join(format!("odm-bench-charts-{}", std::process::id()));
        let results = vec![
            result("read_100_orders", Strategy::Raw, 2),
            result("read_100_orders", Strategy::Typed, 3),
        ];
        let written = render_all(&results, &dir).unwrap();
        // Reads chart plus overhead chart; no writes were measured.
        assert_eq!(written.len(), 2);
        for path in &written {
            let contents = std::fs::read_to_string(path).unwrap();
            assert!(contents.starts_with("<svg"));
            assert!(contents.ends_with("</svg>\n"));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn legend_only_lists_plotted_strategies() {
        let series = vec![("op".to_string(), vec![(Strategy::Raw, 2.0)])];
        let chart = bar_chart("t", "ms", &series, None);
        assert!(chart.contains(Strategy::Raw.display_name()));
        for strategy in [Strategy::Typed, Strategy::Repo, Strategy::Record] {
            assert!(!chart.contains(strategy.display_name()));
        }
    }

    #[test]
    fn svg_labels_are_escaped() {
        let chart = bar_chart("a < b", "ms", &[("x&y".to_string(), vec![])], None);
        assert!(chart.contains("a &lt; b"));
        assert!(chart.contains("x&amp;y"));
    }
}
