//! This module contains the main entrypoint to the univar cli, which loads a csv file, runs the univariate analysis engine over it, and prints the resulting tables.

use anyhow::Result;
use clap::Clap;
use colored::Colorize;
use std::path::PathBuf;
use univar_dataframe::{DataFrame, FromCsvOptions};
use univar_stats::{Analyzer, ColumnSummary};
use univar_util::table::Table;

#[derive(Clap)]
#[clap(
	about = "Univariate exploratory analysis for csv files.",
	setting = clap::AppSettings::DisableHelpSubcommand,
)]
struct Options {
	#[clap(about = "the path to your .csv file")]
	file: PathBuf,
	#[clap(
		short,
		long,
		about = "print a frequency table for this column, may be repeated"
	)]
	frequency: Vec<String>,
}

/// The measure labels of the descriptive table, one row per measure.
const MEASURE_LABELS: &[&str] = &[
	"Mean",
	"Median",
	"Mode",
	"Q1:25%",
	"Q2:50%",
	"Q3:75%",
	"Q4:100%",
	"IQR",
	"1.5Rule",
	"LesserOutlier",
	"GreaterOutlier",
	"Min",
	"Max",
	"Skew",
	"Kurtosis",
];

fn main() {
	let options = Options::parse();
	if let Err(error) = cli_analyze(options) {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_analyze(options: Options) -> Result<()> {
	let dataframe = DataFrame::from_path(&options.file, FromCsvOptions::default(), |_| {})?;
	let analyzer = Analyzer::new(dataframe);

	let classification = analyzer.classification();
	println!(
		"{} {}",
		"Quantitative Columns:".bold(),
		classification.quantitative.join(", ")
	);
	println!(
		"{} {}",
		"Qualitative Columns:".bold(),
		classification.qualitative.join(", ")
	);
	println!();

	println!("{}", "Descriptive Statistics".bold());
	println!("{}", descriptive_table(analyzer.summaries()));

	let flags = analyzer.detect();
	println!("{}", "Outlier Columns".bold());
	println!("LesserOutlier: {}", flags.lesser.join(", "));
	println!("GreaterOutlier: {}", flags.greater.join(", "));
	println!();

	println!("{}", "Outlier Comparison".bold());
	println!("{}", comparison_table(&analyzer));

	for column_name in options.frequency.iter() {
		println!("{} {}", "Frequency Table:".bold(), column_name);
		println!("{}", frequency_table(&analyzer, column_name)?);
	}

	Ok(())
}

fn descriptive_table(summaries: &[ColumnSummary]) -> Table {
	let mut header = vec![String::new()];
	header.extend(
		summaries
			.iter()
			.map(|summary| summary.column_name().to_owned()),
	);
	let mut table = Table::new(header);
	for (index, label) in MEASURE_LABELS.iter().enumerate() {
		let mut row = vec![label.to_string()];
		for summary in summaries.iter() {
			let cell = match summary {
				ColumnSummary::Empty(_) => "-".to_owned(),
				ColumnSummary::Number(summary) => {
					let values = [
						Some(summary.mean),
						Some(summary.median),
						Some(summary.mode),
						Some(summary.q1),
						Some(summary.q2),
						Some(summary.q3),
						Some(summary.q4),
						Some(summary.iqr),
						Some(summary.fence_width),
						Some(summary.lower_fence),
						Some(summary.upper_fence),
						Some(summary.min),
						Some(summary.max),
						summary.skewness,
						summary.kurtosis,
					];
					values[index]
						.map(format_number)
						.unwrap_or_else(|| "-".to_owned())
				}
			};
			row.push(cell);
		}
		table.add_row(row);
	}
	table
}

fn comparison_table(analyzer: &Analyzer) -> Table {
	let mut table = Table::new(
		[
			"Column",
			"LesserOutliers",
			"GreaterOutliers",
			"ReplacedLesser",
			"ReplacedGreater",
			"Min",
			"Max",
			"ReplacedMin",
			"ReplacedMax",
		]
		.iter()
		.map(|header| header.to_string())
		.collect(),
	);
	for comparison in analyzer.compare() {
		table.add_row(vec![
			comparison.column_name.clone(),
			format_outliers(&comparison.original.lesser),
			format_outliers(&comparison.original.greater),
			format_outliers(&comparison.replaced.lesser),
			format_outliers(&comparison.replaced.greater),
			format_number(comparison.original_min),
			format_number(comparison.original_max),
			format_number(comparison.replaced_min),
			format_number(comparison.replaced_max),
		]);
	}
	table
}

fn frequency_table(analyzer: &Analyzer, column_name: &str) -> Result<Table> {
	let mut table = Table::new(
		["Value", "Frequency", "Relative", "Cumulative"]
			.iter()
			.map(|header| header.to_string())
			.collect(),
	);
	for entry in analyzer.frequency_table(column_name)? {
		table.add_row(vec![
			entry.value.clone(),
			entry.frequency.to_string(),
			format_number(entry.relative_frequency),
			format_number(entry.cumulative_frequency),
		]);
	}
	Ok(table)
}

fn format_outliers(values: &[f64]) -> String {
	let values: Vec<String> = values.iter().copied().map(format_number).collect();
	format!("{} [{}]", values.len(), values.join(", "))
}

fn format_number(value: f64) -> String {
	if value == value.trunc() && value.abs() < 1e15 {
		format!("{}", value)
	} else {
		format!("{:.4}", value)
	}
}
