//! Command line arguments and report dispatch.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use keelbook_core::dashboard::DashboardSummary;
use keelbook_core::fiscal::{Period, PeriodType};
use keelbook_core::reports::{HierarchicalTreeBuilder, LinearReportGenerator, PivotTableBuilder};
use keelbook_shared::AppConfig;
use keelbook_shared::types::Currency;
use serde::Serialize;
use tracing::info;

use crate::snapshot::Snapshot;

/// Generate expense reports from a Keelbook snapshot.
#[derive(Debug, Parser)]
#[command(name = "keelbook", version, about)]
pub struct Cli {
    /// Snapshot file with entries, classifications and actors.
    #[arg(long, short, env = "KEELBOOK_INPUT")]
    pub input: PathBuf,

    /// Report currency; defaults to the configured base currency.
    #[arg(long)]
    pub currency: Option<String>,

    /// Report to generate.
    #[command(subcommand)]
    pub command: Command,
}

/// Available reports.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Category-by-month report for a calendar year.
    Annual {
        /// Calendar year.
        #[arg(long)]
        year: i32,
    },
    /// Category-by-month report for a date range.
    Period {
        /// First day (inclusive).
        #[arg(long)]
        start: NaiveDate,
        /// Last day (inclusive).
        #[arg(long)]
        end: NaiveDate,
    },
    /// Classification / category / actor expense tree.
    Tree {
        /// `2025` or `2025-03`.
        #[arg(long)]
        period: String,
        /// How to read `--period`.
        #[arg(long, default_value = "YEAR")]
        period_type: PeriodType,
    },
    /// Expense tree broken down by month.
    Pivot {
        /// Calendar year.
        #[arg(long)]
        year: i32,
    },
    /// Income/expense summary for a date range.
    Summary {
        /// First day (inclusive).
        #[arg(long)]
        start: NaiveDate,
        /// Last day (inclusive).
        #[arg(long)]
        end: NaiveDate,
    },
}

impl Cli {
    /// Runs the selected report and returns it as JSON.
    pub fn run(&self, config: &AppConfig) -> anyhow::Result<String> {
        let currency = match &self.currency {
            Some(code) => Currency::parse(code)?,
            None => config.base_currency()?,
        };

        let (entries, dimensions) = Snapshot::load(&self.input)?.into_parts()?;
        info!(
            input = %self.input.display(),
            entries = entries.len(),
            classifications = dimensions.classification_count(),
            actors = dimensions.actor_count(),
            currency = %currency,
            "Snapshot loaded"
        );

        let pretty = config.report.pretty_output;
        match &self.command {
            Command::Annual { year } => render(
                &LinearReportGenerator::new(currency).generate_annual_report(&entries, *year)?,
                pretty,
            ),
            Command::Period { start, end } => {
                let period = Period::new(*start, *end)?;
                render(
                    &LinearReportGenerator::new(currency).generate_period_report(&entries, &period)?,
                    pretty,
                )
            }
            Command::Tree {
                period,
                period_type,
            } => {
                let period = Period::parse(period, *period_type)?;
                render(
                    &HierarchicalTreeBuilder::new(&dimensions, currency).build(&entries, &period)?,
                    pretty,
                )
            }
            Command::Pivot { year } => render(
                &PivotTableBuilder::new(&dimensions, currency).build(&entries, *year)?,
                pretty,
            ),
            Command::Summary { start, end } => {
                let period = Period::new(*start, *end)?;
                render(
                    &DashboardSummary::from_entries(&entries, &period, currency)?,
                    pretty,
                )
            }
        }
    }
}

fn render<T: Serialize>(report: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "entries": [
            {
                "id": "0190a5a8-0000-7000-8000-000000000001",
                "date": "2025-01-15",
                "kind": "INCOME",
                "category_id": "0190a5a8-0000-7000-8000-0000000000a1",
                "category_name": "Charter",
                "base_amount": {"amount": "1000", "currency": "EUR"}
            },
            {
                "id": "0190a5a8-0000-7000-8000-000000000002",
                "date": "2025-01-20",
                "kind": "EXPENSE",
                "category_id": "0190a5a8-0000-7000-8000-0000000000a2",
                "category_name": "A",
                "classification_id": 1,
                "actor_id": 7,
                "base_amount": {"amount": "500", "currency": "EUR"}
            },
            {
                "id": "0190a5a8-0000-7000-8000-000000000003",
                "date": "2025-02-10",
                "kind": "EXPENSE",
                "category_id": "0190a5a8-0000-7000-8000-0000000000a2",
                "category_name": "A",
                "base_amount": {"amount": "300", "currency": "EUR"}
            }
        ],
        "classifications": [{"id": 1, "name": "Operations"}],
        "actors": []
    }"#;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        file
    }

    fn run(file: &tempfile::NamedTempFile, args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let path = file.path().to_str().unwrap();
        let mut argv = vec!["keelbook", "--input", path];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv)?;
        let mut config = AppConfig::default();
        config.report.pretty_output = false;
        Ok(serde_json::from_str(&cli.run(&config)?)?)
    }

    #[test]
    fn test_annual_command() {
        let file = snapshot_file();
        let json = run(&file, &["annual", "--year", "2025"]).unwrap();

        assert_eq!(json["year"], 2025);
        assert_eq!(json["totals"]["total_income"], "1000.00");
        assert_eq!(json["totals"]["remaining_money"], "200.00");
    }

    #[test]
    fn test_tree_command_with_month_period() {
        let file = snapshot_file();
        let json = run(&file, &["tree", "--period", "2025-01", "--period-type", "MONTH"]).unwrap();

        assert_eq!(json["total_amount"], "500.00");
        assert_eq!(json["rows"][0]["name"], "Operations");
        assert_eq!(
            json["rows"][0]["children"][0]["children"][0]["name"],
            "Unknown Who (ID: 7)"
        );
    }

    #[test]
    fn test_pivot_and_summary_commands() {
        let file = snapshot_file();

        let pivot = run(&file, &["pivot", "--year", "2025"]).unwrap();
        assert_eq!(pivot["columns"].as_array().unwrap().len(), 13);
        assert_eq!(pivot["column_totals"]["TOTAL"], "800.00");

        let summary = run(
            &file,
            &["summary", "--start", "2025-01-01", "--end", "2025-01-31"],
        )
        .unwrap();
        assert_eq!(summary["income_count"], 1);
        assert_eq!(summary["expense_count"], 1);
    }

    #[test]
    fn test_currency_override_must_match_entries() {
        let file = snapshot_file();
        let err = run(&file, &["--currency", "USD", "annual", "--year", "2025"]).unwrap_err();
        assert!(err.to_string().contains("Mixed currencies"));
    }

    #[test]
    fn test_inverted_period_is_rejected() {
        let file = snapshot_file();
        let err = run(
            &file,
            &["period", "--start", "2025-03-01", "--end", "2025-01-01"],
        )
        .unwrap_err();
        assert!(err.to_string().contains("after end"));
    }
}
