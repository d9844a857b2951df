//! Text rendering of benchmark results.

use std::fmt::Write as _;

use crate::harness::{CurveResult, Operation, ResultTable};
use crate::modp::{GroupResult, PrimeOrderGroup};
use crate::stats::Summary;

const RULE_WIDTH: usize = 85;
const ROWS_HEADER: &str = "curve op samples warmup min_ns p50_ns p95_ns max_ns mean_ns stddev_ns\n";
const COLUMN_WIDTH: usize = 15;

/// Names and table layout of one timed operation: `key` for data rows,
/// `title` for the table heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationLabel {
    pub key: &'static str,
    pub title: &'static str,
    /// Character of the rule printed under the title.
    pub title_rule: char,
    /// Whether a `-` rule separates the column header from the rows.
    pub header_rule: bool,
}

pub const ARITHMETIC_LABELS: [OperationLabel; 2] = [
    OperationLabel {
        key: "add",
        title: "Benchmarking cost of point addition",
        title_rule: '=',
        header_rule: true,
    },
    OperationLabel {
        key: "mul",
        title: "Benchmarking cost of scalar multiplication",
        title_rule: '=',
        header_rule: true,
    },
];

// No rule under the decryption table's header.
pub const ELGAMAL_LABELS: [OperationLabel; 2] = [
    OperationLabel {
        key: "enc",
        title: "Encryption cost benchmark",
        title_rule: '-',
        header_rule: true,
    },
    OperationLabel {
        key: "dec",
        title: "Decryption cost benchmark",
        title_rule: '-',
        header_rule: false,
    },
];

pub fn arithmetic_banner(repeat: usize) -> String {
    format!(
        "Starting benchmark of operations over elliptic curves {repeat} operations per test\n{}",
        "-".repeat(100)
    )
}

pub fn elgamal_banner(repeat: usize) -> String {
    format!(
        "Starting benchmark of elgamal encryption and decryption scheme with {repeat} operations per test\n{}",
        "-".repeat(100)
    )
}

/// One fixed-width table per operation, values multiplied by `unit_scale`
/// and printed with two decimals.
pub fn render(table: &ResultTable, labels: &[OperationLabel; 2], unit_scale: f64) -> String {
    let mut out = String::new();
    for (label, op) in labels.iter().zip(Operation::BOTH) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{}", label.title);
        let _ = writeln!(out, "{}", label.title_rule.to_string().repeat(RULE_WIDTH));
        let _ = writeln!(
            out,
            "{:<w$} | {:<w$} | {:<w$} | {:<w$}",
            "Curve Name",
            "Min CPU (µs)",
            "Max CPU (µs)",
            "Average CPU (µs)",
            w = COLUMN_WIDTH
        );
        if label.header_rule {
            let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        }
        for res in table {
            let _ = writeln!(out, "{}", render_row(res.curve.display_name, res.summary(op), unit_scale));
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    out
}

fn render_row(name: &str, s: &Summary, unit_scale: f64) -> String {
    format!(
        "{:<w$} | {:<w$.2} | {:<w$.2} | {:<w$.2}",
        name,
        s.min * unit_scale,
        s.max * unit_scale,
        s.avg * unit_scale,
        w = COLUMN_WIDTH
    )
}

/// Space-separated statistics rows in nanoseconds, header first.
pub fn render_rows(table: &ResultTable, labels: &[OperationLabel; 2], warmup: usize) -> String {
    let mut out = String::from(ROWS_HEADER);
    for res in table {
        for (label, op) in labels.iter().zip(Operation::BOTH) {
            let _ = writeln!(out, "{}", data_row(res.curve.display_name, label.key, res.summary(op), warmup));
        }
    }
    out
}

pub fn modp_banner(repeat: usize) -> String {
    format!("Starting benchmark of modular arithmetic in prime-order groups {repeat} operations per test")
}

/// Parameters of a freshly generated group, printed before it is timed.
pub fn render_group_header(group: &PrimeOrderGroup) -> String {
    format!(
        "Prime group generated order-{} modulus-{}\np ({} bits) = {}\nq ({} bits) = {}\ng = {}\n\nBenchmarking.....\n",
        group.size.order_bits,
        group.size.modulus_bits,
        group.size.modulus_bits,
        group.p,
        group.size.order_bits,
        group.q,
        group.g
    )
}

/// Min/mean/max of both timed operations of one group, scaled by
/// `unit_scale`.
pub fn render_group_summary(result: &GroupResult, unit_scale: f64) -> String {
    let mut out = String::new();
    for (op, s) in [("mul", &result.mul), ("exp", &result.exp)] {
        let _ = writeln!(out, "Min {op} time:\t{:.3} us", s.min * unit_scale);
        let _ = writeln!(out, "Mean {op} time:\t{:.3} us", s.avg * unit_scale);
        let _ = writeln!(out, "Max {op} time:\t{:.3} us", s.max * unit_scale);
    }
    let _ = writeln!(out, "{}", "-".repeat(107));
    out
}

/// Statistics rows for the modular-arithmetic run, same columns as
/// [`render_rows`].
pub fn render_group_rows(results: &[GroupResult], warmup: usize) -> String {
    let mut out = String::from(ROWS_HEADER);
    for res in results {
        let label = res.size.to_string();
        let _ = writeln!(out, "{}", data_row(&label, "mulmod", &res.mul, warmup));
        let _ = writeln!(out, "{}", data_row(&label, "powmod", &res.exp, warmup));
    }
    out
}

fn data_row(name: &str, key: &str, s: &Summary, warmup: usize) -> String {
    const NS: f64 = 1e9;
    format!(
        "{} {} {} {} {:.0} {:.0} {:.0} {:.0} {:.3} {:.3}",
        name,
        key,
        s.n,
        warmup,
        s.min * NS,
        s.p50 * NS,
        s.p95 * NS,
        s.max * NS,
        s.avg * NS,
        s.stddev * NS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurveSpec, TO_MICRO};
    use crate::provider::CurveId;

    fn summary(min: f64, max: f64, avg: f64) -> Summary {
        Summary { n: 3, min, max, avg, p50: avg, p95: max, stddev: 0.0 }
    }

    fn table() -> ResultTable {
        vec![
            CurveResult {
                curve: CurveSpec::new(CurveId::Prime256v1),
                first: summary(0.000001, 0.000005, 0.000003),
                second: summary(0.00002, 0.00004, 0.00003),
            },
            CurveResult {
                curve: CurveSpec::new(CurveId::Sect233r1),
                first: summary(0.0001, 0.0002, 0.00015),
                second: summary(0.001, 0.003, 0.002),
            },
        ]
    }

    #[test]
    fn row_is_in_microseconds() {
        let text = render(&table(), &ARITHMETIC_LABELS, TO_MICRO);
        let row = text.lines().find(|l| l.starts_with("prime256v1")).unwrap();
        let cells: Vec<_> = row.split('|').map(str::trim).collect();
        assert_eq!(cells, ["prime256v1", "1.00", "5.00", "3.00"]);
        assert_eq!(
            row,
            "prime256v1      | 1.00            | 5.00            | 3.00           "
        );
    }

    #[test]
    fn one_table_per_operation_in_curve_order() {
        let text = render(&table(), &ELGAMAL_LABELS, TO_MICRO);
        let enc = text.find("Encryption cost benchmark").unwrap();
        let dec = text.find("Decryption cost benchmark").unwrap();
        assert!(enc < dec);

        let rows: Vec<_> = text
            .lines()
            .filter(|l| l.starts_with("prime256v1") || l.starts_with("sect233r1"))
            .collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("prime256v1") && rows[1].starts_with("sect233r1"));
        assert!(rows[3].contains("| 3000.00"));
    }

    #[test]
    fn header_columns_are_aligned() {
        let text = render(&table(), &ARITHMETIC_LABELS, TO_MICRO);
        let header = text.lines().find(|l| l.starts_with("Curve Name")).unwrap();
        let row = text.lines().find(|l| l.starts_with("prime256v1")).unwrap();
        let bars = |s: &str| -> Vec<usize> {
            s.chars().enumerate().filter(|&(_, c)| c == '|').map(|(i, _)| i).collect()
        };
        assert_eq!(bars(header), bars(row));
        assert!(text.contains(&"=".repeat(85)));
    }

    #[test]
    fn data_rows_are_in_nanoseconds() {
        let text = render_rows(&table(), &ARITHMETIC_LABELS, 10);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "curve op samples warmup min_ns p50_ns p95_ns max_ns mean_ns stddev_ns"
        );
        assert_eq!(
            lines.next().unwrap(),
            "prime256v1 add 3 10 1000 3000 5000 5000 3000.000 0.000"
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn elgamal_tables_use_dash_rules() {
        let text = render(&table(), &ELGAMAL_LABELS, TO_MICRO);
        let lines: Vec<_> = text.lines().collect();
        let dash = "-".repeat(85);

        let enc = lines.iter().position(|l| *l == "Encryption cost benchmark").unwrap();
        assert_eq!(lines[enc - 1], "=".repeat(85));
        assert_eq!(lines[enc + 1], dash);
        assert!(lines[enc + 2].starts_with("Curve Name"));
        assert_eq!(lines[enc + 3], dash);

        let dec = lines.iter().position(|l| *l == "Decryption cost benchmark").unwrap();
        assert_eq!(lines[dec + 1], dash);
        assert!(lines[dec + 2].starts_with("Curve Name"));
        assert!(lines[dec + 3].starts_with("prime256v1"));
    }

    #[test]
    fn arithmetic_tables_use_double_rules() {
        let text = render(&table(), &ARITHMETIC_LABELS, TO_MICRO);
        let lines: Vec<_> = text.lines().collect();
        for title in ["Benchmarking cost of point addition", "Benchmarking cost of scalar multiplication"] {
            let at = lines.iter().position(|l| *l == title).unwrap();
            assert_eq!(lines[at - 1], "=".repeat(85));
            assert_eq!(lines[at + 1], "=".repeat(85));
            assert_eq!(lines[at + 3], "-".repeat(85));
        }
    }
}
