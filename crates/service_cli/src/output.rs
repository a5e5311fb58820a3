//! Report rendering
//!
//! Every command produces a serialisable report that renders either as a
//! boxed two-column table or as pretty-printed JSON.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A command result that can be printed as a table or as JSON.
pub trait Report: Serialize {
    /// Heading shown above the table.
    fn title(&self) -> String;

    /// Label and formatted value for each table row.
    fn rows(&self) -> Vec<(String, String)>;
}

/// Render a report in the requested format.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(table(&report.title(), &report.rows())),
    }
}

/// Print a report to stdout.
pub fn emit<R: Report>(report: &R, format: OutputFormat) -> Result<()> {
    println!("{}", render(report, format)?);
    Ok(())
}

fn table(title: &str, rows: &[(String, String)]) -> String {
    let key_w = rows
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let val_w = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_w + 2),
            mid,
            "─".repeat(val_w + 2),
            right
        )
    };

    let mut out = Vec::with_capacity(rows.len() + 5);
    out.push(title.to_string());
    out.push(rule("┌", "┬", "┐"));
    for (i, (key, value)) in rows.iter().enumerate() {
        if i > 0 && key.is_empty() {
            out.push(rule("├", "┼", "┤"));
            continue;
        }
        out.push(format!("│ {:<kw$} │ {:>vw$} │", key, value, kw = key_w, vw = val_w));
    }
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}

/// Row helper: label and fixed-precision number.
pub fn row(label: &str, value: f64, decimals: usize) -> (String, String) {
    (label.to_string(), format!("{:.*}", decimals, value))
}

/// Row separator inside a table.
pub fn separator() -> (String, String) {
    (String::new(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        price: f64,
    }

    impl Report for Sample {
        fn title(&self) -> String {
            "Sample".to_string()
        }

        fn rows(&self) -> Vec<(String, String)> {
            vec![row("Price", self.price, 2), separator(), row("Twice", 2.0 * self.price, 1)]
        }
    }

    #[test]
    fn test_table_layout() {
        let text = render(&Sample { price: 12.346 }, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Sample");
        assert_eq!(lines[2], "│ Price │ 12.35 │");
        assert!(lines[3].starts_with('├'));
        assert_eq!(lines[4], "│ Twice │  24.7 │");
        assert!(lines[5].starts_with('└'));
        // Every boxed line has the same width
        let widths: Vec<usize> = lines[1..].iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_json() {
        let text = render(&Sample { price: 1.5 }, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["price"], 1.5);
    }
}
