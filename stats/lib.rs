/*!
This crate implements the univariate analysis engine: column classification, descriptive statistics with IQR outlier fences, outlier detection and winsorization, before/after comparison, and frequency tables.

All computation happens in pure functions that take a [`DataFrame`](../univar_dataframe/struct.DataFrame.html) and previously computed results as explicit parameters, so every downstream consumer sees the same statistics snapshot. The [`Analyzer`](struct.Analyzer.html) facade owns a dataframe and memoizes the classification and summaries for callers that prefer the lazy style.
*/

use thiserror::Error;

mod analyzer;
mod classify;
mod compare;
mod describe;
mod frequency;
mod outlier;

pub use self::analyzer::Analyzer;
pub use self::classify::{classify, Classification};
pub use self::compare::{compare, ColumnComparison, OutlierValues};
pub use self::describe::{
	summarize, ColumnSummary, EmptyColumnSummary, NumberColumnSummary,
};
pub use self::frequency::{frequency_table, FrequencyEntry};
pub use self::outlier::{detect, replace, values_above, values_below, OutlierFlags};

#[derive(Debug, Error)]
pub enum StatsError {
	#[error("column \"{0}\" not found")]
	ColumnNotFound(String),
	#[error("column \"{0}\" is not a number column")]
	NotNumber(String),
}
