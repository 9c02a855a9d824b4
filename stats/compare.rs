use crate::{
	describe::{ColumnSummary, NumberColumnSummary},
	StatsError,
};
use univar_dataframe::DataFrame;

/// The values of one column that fall outside its fences, split by direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlierValues {
	pub lesser: Vec<f64>,
	pub greater: Vec<f64>,
}

impl OutlierValues {
	pub fn lesser_count(&self) -> usize {
		self.lesser.len()
	}

	pub fn greater_count(&self) -> usize {
		self.greater.len()
	}
}

/// The before/after outlier summary for one quantitative column. Both sides are judged against the fences of the original table.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnComparison {
	pub column_name: String,
	pub original: OutlierValues,
	pub replaced: OutlierValues,
	pub original_min: f64,
	pub original_max: f64,
	pub replaced_min: f64,
	pub replaced_max: f64,
}

/// Cross-reference the original and replaced tables. For each quantitative column with defined statistics, outlier membership is recomputed against the original fences on both tables, along with min and max before and after. Columns with undefined statistics are skipped.
pub fn compare(
	original: &DataFrame,
	replaced: &DataFrame,
	summaries: &[ColumnSummary],
) -> Result<Vec<ColumnComparison>, StatsError> {
	let mut comparisons = Vec::new();
	for summary in summaries.iter() {
		let summary = match summary {
			ColumnSummary::Number(summary) => summary,
			ColumnSummary::Empty(_) => continue,
		};
		let original_column = number_column(original, &summary.column_name)?;
		let replaced_column = number_column(replaced, &summary.column_name)?;
		let original_outliers = partition(original_column, summary);
		let replaced_outliers = partition(replaced_column, summary);
		let (original_min, original_max) = min_max(original_column);
		let (replaced_min, replaced_max) = min_max(replaced_column);
		comparisons.push(ColumnComparison {
			column_name: summary.column_name.clone(),
			original: original_outliers,
			replaced: replaced_outliers,
			original_min,
			original_max,
			replaced_min,
			replaced_max,
		});
	}
	Ok(comparisons)
}

fn number_column<'a>(
	dataframe: &'a DataFrame,
	column_name: &str,
) -> Result<&'a [f64], StatsError> {
	let column = dataframe
		.column(column_name)
		.ok_or_else(|| StatsError::ColumnNotFound(column_name.to_owned()))?;
	let column = column
		.as_number()
		.ok_or_else(|| StatsError::NotNumber(column_name.to_owned()))?;
	Ok(&column.data)
}

fn partition(data: &[f64], summary: &NumberColumnSummary) -> OutlierValues {
	let mut outliers = OutlierValues::default();
	for value in data.iter().copied().filter(|value| value.is_finite()) {
		if value < summary.lower_fence {
			outliers.lesser.push(value);
		} else if value > summary.upper_fence {
			outliers.greater.push(value);
		}
	}
	outliers
}

fn min_max(data: &[f64]) -> (f64, f64) {
	let mut min = std::f64::INFINITY;
	let mut max = std::f64::NEG_INFINITY;
	for value in data.iter().copied().filter(|value| value.is_finite()) {
		min = f64::min(min, value);
		max = f64::max(max, value);
	}
	(min, max)
}

impl ColumnComparison {
	/// True when clamping left no value outside the original fences.
	pub fn is_bounded(&self) -> bool {
		self.replaced.lesser.is_empty() && self.replaced.greater.is_empty()
	}
}
