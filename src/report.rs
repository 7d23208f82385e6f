//! Report writers for projection output
//!
//! Renders the monthly rows as a CSV table, a fixed-width console table,
//! the three-series trend data, or JSON. All writers take any `io::Write`
//! so the binaries can target stdout or a file.

use std::io::Write;

use serde::Serialize;

use crate::error::CashflowResult;
use crate::projection::{MonthlyRecord, ProjectionResult, ProjectionSummary};

pub const TABLE_HEADERS: [&str; 6] = [
    "Month",
    "Students",
    "Gross Revenue",
    "Realized Inflow",
    "Total Outflow",
    "Net Cash Flow",
];

pub const TREND_HEADERS: [&str; 4] = ["Month", "Realized Inflow", "Total Outflow", "Net Cash Flow"];

/// Write the monthly breakdown as CSV
pub fn write_csv<W: Write>(writer: W, records: &[MonthlyRecord]) -> CashflowResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TABLE_HEADERS)?;

    for row in records {
        wtr.write_record([
            row.month.to_string(),
            row.students.to_string(),
            format!("{:.2}", row.gross_revenue),
            format!("{:.2}", row.realized_inflow),
            format!("{:.2}", row.total_outflow),
            format!("{:.2}", row.net_cash_flow),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the chart series (inflow, outflow, net against month) as CSV
pub fn write_trend_csv<W: Write>(writer: W, result: &ProjectionResult) -> CashflowResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TREND_HEADERS)?;

    for point in result.trend() {
        wtr.write_record([
            point.month.to_string(),
            format!("{:.2}", point.realized_inflow),
            format!("{:.2}", point.total_outflow),
            format!("{:.2}", point.net_cash_flow),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: ProjectionSummary,
    records: &'a [MonthlyRecord],
}

/// Write summary and rows as pretty-printed JSON
pub fn write_json<W: Write>(mut writer: W, result: &ProjectionResult) -> CashflowResult<()> {
    let report = JsonReport {
        summary: result.summary(),
        records: &result.records,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write headline metrics followed by the monthly breakdown
pub fn write_table<W: Write>(mut writer: W, result: &ProjectionResult) -> CashflowResult<()> {
    let summary = result.summary();

    writeln!(writer, "Total Projected Profit: {}", format_currency(summary.total_projected_profit))?;
    writeln!(writer, "Final Student Count:    {}", summary.final_student_count)?;
    writeln!(writer, "Avg Monthly Burn:       {}", format_currency(summary.avg_monthly_burn))?;
    writeln!(writer)?;

    writeln!(
        writer,
        "{:>5} {:>8} {:>16} {:>16} {:>14} {:>16}",
        "Month", "Students", "Gross Revenue", "Realized Inflow", "Total Outflow", "Net Cash Flow"
    )?;
    writeln!(writer, "{}", "-".repeat(80))?;

    for row in &result.records {
        writeln!(
            writer,
            "{:>5} {:>8} {:>16.2} {:>16.2} {:>14.2} {:>16.2}",
            row.month,
            row.students,
            row.gross_revenue,
            row.realized_inflow,
            row.total_outflow,
            row.net_cash_flow,
        )?;
    }

    Ok(())
}

/// Format as dollars with thousands separators, e.g. `$2,335,455.00`
///
/// The sign goes after the dollar sign (`$-1,500.00`, `$-0.00`).
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Negative amounts keep their sign even when they round to zero
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    fn one_month() -> ProjectionResult {
        let config = ProjectionConfig {
            projection_months: 1,
            ..Default::default()
        };
        ProjectionEngine::new(config).unwrap().project()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(2_335_455.0), "$2,335,455.00");
        assert_eq!(format_currency(67_000.0), "$67,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-1_500.25), "$-1,500.25");
        assert_eq!(format_currency(-0.001), "$-0.00");
        assert_eq!(format_currency(-0.0), "$-0.00");
    }

    #[test]
    fn test_csv_uses_table_headings() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &one_month().records).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Month,Students,Gross Revenue,Realized Inflow,Total Outflow,Net Cash Flow")
        );
        assert_eq!(lines.next(), Some("1,504,2873750.00,2402455.00,67000.00,2335455.00"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_trend_csv_has_three_series() {
        let mut buf = Vec::new();
        write_trend_csv(&mut buf, &one_month()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Month,Realized Inflow,Total Outflow,Net Cash Flow\n1,2402455.00,67000.00,2335455.00\n"
        );
    }

    #[test]
    fn test_json_report_round_trips_summary() {
        let mut buf = Vec::new();
        write_json(&mut buf, &one_month()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["summary"]["final_student_count"], 504);
        assert_eq!(value["summary"]["total_months"], 1);
        assert_eq!(value["records"][0]["month"], 1);
        assert_eq!(value["records"][0]["net_cash_flow"], 2_335_455.0);
    }

    #[test]
    fn test_table_leads_with_headline_metrics() {
        let mut buf = Vec::new();
        write_table(&mut buf, &one_month()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Total Projected Profit: $2,335,455.00");
        assert_eq!(lines[1], "Final Student Count:    504");
        assert_eq!(lines[2], "Avg Monthly Burn:       $67,000.00");
        assert!(lines[4].trim_start().starts_with("Month"));
        assert!(lines[6].contains("2873750.00"));
        assert_eq!(lines.len(), 7);
    }
}
