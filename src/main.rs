//! School cash flow CLI
//!
//! Collects projection parameters from flags and/or a JSON config file,
//! runs the projection once and prints or writes the report.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use school_cashflow::{report, ProjectionConfig, ProjectionEngine, ProjectionError};

/// Financial cash flow and fee revenue projection for a school
#[derive(Parser, Debug)]
#[command(name = "school-cashflow", version, about)]
struct Cli {
    /// JSON file with projection parameters (omitted fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Average monthly tuition fee per student
    #[arg(long)]
    tuition_base: Option<f64>,

    /// Average monthly transport fee per student
    #[arg(long)]
    transport_fee: Option<f64>,

    /// Admission/exam fees per student per month
    #[arg(long)]
    other_fees: Option<f64>,

    /// Monthly salary total
    #[arg(long)]
    salaries: Option<f64>,

    /// Monthly rent and utilities
    #[arg(long)]
    fixed_costs: Option<f64>,

    /// Monthly marketing spend
    #[arg(long)]
    marketing: Option<f64>,

    /// Profit markup level (recorded only, not used by the projection)
    #[arg(long, allow_hyphen_values = true)]
    profit_markup: Option<f64>,

    /// Fee waiver/discount rate
    #[arg(long, allow_hyphen_values = true)]
    waiver_rate: Option<f64>,

    /// Expected arrears (pending dues) rate
    #[arg(long, allow_hyphen_values = true)]
    arrears_rate: Option<f64>,

    /// Current student count
    #[arg(long)]
    enrollment: Option<u32>,

    /// Expected annual enrollment growth rate
    #[arg(long, allow_hyphen_values = true)]
    growth_rate: Option<f64>,

    /// Projection period in months
    #[arg(long)]
    months: Option<u32>,

    /// Read rate flags as whole percentages (e.g. 12 for 12%)
    #[arg(long)]
    percent: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Headline metrics and monthly breakdown
    Table,
    /// Monthly breakdown as CSV
    Csv,
    /// Summary and rows as JSON
    Json,
    /// Inflow, outflow and net cash flow series as CSV
    Trend,
}

impl Cli {
    fn build_config(&self) -> Result<ProjectionConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProjectionConfig::default(),
        };

        let rate = |value: f64| if self.percent { value / 100.0 } else { value };

        if let Some(v) = self.tuition_base {
            config.tuition_base = v;
        }
        if let Some(v) = self.transport_fee {
            config.transport_fee = v;
        }
        if let Some(v) = self.other_fees {
            config.other_fees = v;
        }
        if let Some(v) = self.salaries {
            config.salaries = v;
        }
        if let Some(v) = self.fixed_costs {
            config.fixed_costs = v;
        }
        if let Some(v) = self.marketing {
            config.marketing = v;
        }
        if let Some(v) = self.profit_markup {
            config.profit_target_multiplier = rate(v);
        }
        if let Some(v) = self.waiver_rate {
            config.waiver_rate = rate(v);
        }
        if let Some(v) = self.arrears_rate {
            config.arrears_rate = rate(v);
        }
        if let Some(v) = self.enrollment {
            config.current_enrollment = v;
        }
        if let Some(v) = self.growth_rate {
            config.growth_rate = rate(v);
        }
        if let Some(v) = self.months {
            config.projection_months = v;
        }

        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<ProjectionConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config '{}'", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.build_config()?;

    let engine = ProjectionEngine::new(config).map_err(|e| {
        if let ProjectionError::InvalidConfiguration { violations } = &e {
            warn!("Configuration rejected ({} field(s))", violations.len());
        }
        e
    })?;
    let result = engine.project();
    info!("Projected {} months", result.records.len());

    let mut writer: Box<dyn Write> = match &cli.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Unable to create '{}'", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match cli.output {
        OutputFormat::Table => report::write_table(&mut writer, &result)?,
        OutputFormat::Csv => report::write_csv(&mut writer, &result.records)?,
        OutputFormat::Json => report::write_json(&mut writer, &result)?,
        OutputFormat::Trend => report::write_trend_csv(&mut writer, &result)?,
    }
    writer.flush().context("Failed to flush output")?;

    if let Some(path) = &cli.out {
        eprintln!("Results written to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "school-cashflow",
            "--enrollment",
            "320",
            "--growth-rate",
            "-0.15",
            "--months",
            "24",
        ]);
        let config = cli.build_config().unwrap();
        assert_eq!(config.current_enrollment, 320);
        assert_eq!(config.growth_rate, -0.15);
        assert_eq!(config.projection_months, 24);
        assert_eq!(config.tuition_base, 5000.0);
    }

    #[test]
    fn test_percent_flag_scales_rates_only() {
        let cli = Cli::parse_from([
            "school-cashflow",
            "--percent",
            "--waiver-rate",
            "5",
            "--arrears-rate",
            "12",
            "--growth-rate",
            "-20",
            "--profit-markup",
            "20",
            "--salaries",
            "45000",
        ]);
        let config = cli.build_config().unwrap();
        assert_eq!(config.waiver_rate, 0.05);
        assert_eq!(config.arrears_rate, 0.12);
        assert_eq!(config.growth_rate, -0.20);
        assert_eq!(config.profit_target_multiplier, 0.20);
        assert_eq!(config.salaries, 45_000.0);
    }

    #[test]
    fn test_output_format_parses() {
        let cli = Cli::parse_from(["school-cashflow", "--output", "trend"]);
        assert!(matches!(cli.output, OutputFormat::Trend));
    }
}
