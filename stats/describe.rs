use crate::{classify::Classification, StatsError};
use num_traits::ToPrimitive;
use rayon::prelude::*;
use std::{cmp::Ordering, collections::BTreeMap};
use univar_dataframe::{DataFrame, NumberColumn};
use univar_util::finite::Finite;

/// The descriptive summary of one quantitative column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnSummary {
	/// The column had no non-missing values, so every statistic is undefined. Downstream outlier logic skips these columns.
	Empty(EmptyColumnSummary),
	Number(NumberColumnSummary),
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmptyColumnSummary {
	pub column_name: String,
	/// The total number of rows, all of which were missing.
	pub count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumberColumnSummary {
	pub column_name: String,
	/// This is the total number of rows.
	pub count: usize,
	/// This is the number of non-missing values.
	pub valid_count: usize,
	/// This is the number of missing values.
	pub invalid_count: usize,
	pub mean: f64,
	pub median: f64,
	/// The value with the highest frequency. Ties are broken by the first occurrence in the column, in non-missing order.
	pub mode: f64,
	/// This is the 25th percentile.
	pub q1: f64,
	/// This is the 50th percentile, equal to the median.
	pub q2: f64,
	/// This is the 75th percentile.
	pub q3: f64,
	/// This is the 100th percentile, equal to the max.
	pub q4: f64,
	/// This is the interquartile range, q3 - q1.
	pub iqr: f64,
	/// This is 1.5 times the interquartile range.
	pub fence_width: f64,
	/// Values strictly below this are outliers.
	pub lower_fence: f64,
	/// Values strictly above this are outliers.
	pub upper_fence: f64,
	pub min: f64,
	pub max: f64,
	pub variance: f64,
	pub std: f64,
	/// The adjusted Fisher-Pearson sample skewness. `None` when there are fewer than three values or the variance is zero.
	pub skewness: Option<f64>,
	/// The adjusted sample excess kurtosis. `None` when there are fewer than four values or the variance is zero.
	pub kurtosis: Option<f64>,
}

impl ColumnSummary {
	pub fn column_name(&self) -> &str {
		match self {
			Self::Empty(summary) => &summary.column_name,
			Self::Number(summary) => &summary.column_name,
		}
	}

	pub fn as_number(&self) -> Option<&NumberColumnSummary> {
		match self {
			Self::Number(summary) => Some(summary),
			_ => None,
		}
	}
}

/// Compute a summary for each quantitative column in the classification. Columns are summarized in parallel; the returned vec is in classification order and is only assembled after every column finishes.
pub fn summarize(
	dataframe: &DataFrame,
	classification: &Classification,
) -> Result<Vec<ColumnSummary>, StatsError> {
	classification
		.quantitative
		.par_iter()
		.map(|column_name| {
			let column = dataframe
				.column(column_name)
				.ok_or_else(|| StatsError::ColumnNotFound(column_name.clone()))?;
			let column = column
				.as_number()
				.ok_or_else(|| StatsError::NotNumber(column_name.clone()))?;
			Ok(summarize_number_column(column))
		})
		.collect()
}

#[derive(Clone, Debug)]
struct ValueCount {
	count: usize,
	first_index: usize,
}

fn summarize_number_column(column: &NumberColumn) -> ColumnSummary {
	// Build a histogram of the non-missing values. The first occurrence index of each distinct value is kept for mode tie-breaking.
	let mut histogram: BTreeMap<Finite<f64>, ValueCount> = BTreeMap::new();
	let mut valid_count = 0;
	let mut valid_index = 0;
	for value in column.data.iter() {
		if let Ok(value) = Finite::new(*value) {
			let entry = histogram.entry(value).or_insert(ValueCount {
				count: 0,
				first_index: valid_index,
			});
			entry.count += 1;
			valid_count += 1;
			valid_index += 1;
		}
	}
	let count = column.data.len();
	if histogram.is_empty() {
		return ColumnSummary::Empty(EmptyColumnSummary {
			column_name: column.name.clone(),
			count,
		});
	}
	let invalid_count = count - valid_count;
	let n = valid_count.to_f64().unwrap();
	let min = histogram.iter().next().unwrap().0.get();
	let max = histogram.iter().next_back().unwrap().0.get();
	// mean and mode in one pass over the distinct values
	let mut sum = 0.0;
	let mut mode: Option<(f64, &ValueCount)> = None;
	for (value, value_count) in histogram.iter() {
		sum += value.get() * value_count.count.to_f64().unwrap();
		let better = match mode {
			None => true,
			Some((_, best)) => {
				value_count.count > best.count
					|| (value_count.count == best.count
						&& value_count.first_index < best.first_index)
			}
		};
		if better {
			mode = Some((value.get(), value_count));
		}
	}
	let mean = sum / n;
	let mode = mode.unwrap().0;
	// central moments for variance, skewness, and kurtosis
	let mut m2 = 0.0;
	let mut m3 = 0.0;
	let mut m4 = 0.0;
	for (value, value_count) in histogram.iter() {
		let d = value.get() - mean;
		let c = value_count.count.to_f64().unwrap();
		m2 += c * d * d;
		m3 += c * d * d * d;
		m4 += c * d * d * d * d;
	}
	let m2 = m2 / n;
	let m3 = m3 / n;
	let m4 = m4 / n;
	let variance = m2;
	let skewness = if valid_count >= 3 && m2 > 0.0 {
		let g1 = m3 / m2.powf(1.5);
		Some((n * (n - 1.0)).sqrt() / (n - 2.0) * g1)
	} else {
		None
	};
	let kurtosis = if valid_count >= 4 && m2 > 0.0 {
		let g2 = m4 / (m2 * m2) - 3.0;
		Some((n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0))
	} else {
		None
	};
	let quantiles = compute_quantiles(&histogram, valid_count, &[0.25, 0.50, 0.75, 1.00]);
	let q1 = quantiles[0];
	let q2 = quantiles[1];
	let q3 = quantiles[2];
	let q4 = quantiles[3];
	let iqr = q3 - q1;
	let fence_width = 1.5 * iqr;
	let lower_fence = q1 - fence_width;
	let upper_fence = q3 + fence_width;
	ColumnSummary::Number(NumberColumnSummary {
		column_name: column.name.clone(),
		count,
		valid_count,
		invalid_count,
		mean,
		median: q2,
		mode,
		q1,
		q2,
		q3,
		q4,
		iqr,
		fence_width,
		lower_fence,
		upper_fence,
		min,
		max,
		variance,
		std: variance.sqrt(),
		skewness,
		kurtosis,
	})
}

/// Compute percentiles with linear interpolation between order statistics: for probability p over n sorted values, the rank is p * (n - 1) and the result interpolates between the values at the floor and ceil of the rank.
fn compute_quantiles(
	histogram: &BTreeMap<Finite<f64>, ValueCount>,
	valid_count: usize,
	probabilities: &[f64],
) -> Vec<f64> {
	let n = valid_count.to_f64().unwrap();
	let quantile_indexes: Vec<usize> = probabilities
		.iter()
		.map(|p| ((n - 1.0) * p).trunc().to_usize().unwrap())
		.collect();
	// This is the fractional part of the rank, used to interpolate between two adjacent values.
	let quantile_fracts: Vec<f64> = probabilities.iter().map(|p| ((n - 1.0) * p).fract()).collect();
	let mut quantiles: Vec<Option<f64>> = vec![None; probabilities.len()];
	let mut current_count: usize = 0;
	let mut iter = histogram.iter().peekable();
	while let Some((value, value_count)) = iter.next() {
		let value = value.get();
		current_count += value_count.count;
		let quantiles_iter = quantiles
			.iter_mut()
			.zip(quantile_indexes.iter().zip(quantile_fracts.iter()))
			.filter(|(q, (_, _))| q.is_none());
		for (quantile, (index, fract)) in quantiles_iter {
			match (current_count - 1).cmp(index) {
				Ordering::Equal => {
					if *fract > 0.0 {
						// Interpolate between two values.
						let next_value = iter.peek().unwrap().0.get();
						*quantile = Some(value * (1.0 - fract) + next_value * fract);
					} else {
						*quantile = Some(value);
					}
				}
				Ordering::Greater => *quantile = Some(value),
				Ordering::Less => {}
			}
		}
	}
	quantiles.into_iter().map(|q| q.unwrap()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::classify::classify;
	use univar_dataframe::Column;

	fn number_dataframe(name: &str, data: Vec<f64>) -> DataFrame {
		DataFrame {
			columns: vec![Column::Number(NumberColumn {
				name: name.to_owned(),
				data,
			})],
		}
	}

	fn number_summary(dataframe: &DataFrame) -> NumberColumnSummary {
		let classification = classify(dataframe);
		let summaries = summarize(dataframe, &classification).unwrap();
		summaries[0].as_number().unwrap().clone()
	}

	#[test]
	fn test_quartiles_and_fences() {
		let dataframe = number_dataframe("x", vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
		let summary = number_summary(&dataframe);
		assert_eq!(summary.q1, 2.25);
		assert_eq!(summary.q2, 3.5);
		assert_eq!(summary.median, 3.5);
		assert_eq!(summary.q3, 4.75);
		assert_eq!(summary.q4, 100.0);
		assert_eq!(summary.iqr, 2.5);
		assert_eq!(summary.fence_width, 3.75);
		assert_eq!(summary.lower_fence, -1.5);
		assert_eq!(summary.upper_fence, 8.5);
		assert_eq!(summary.min, 1.0);
		assert_eq!(summary.max, 100.0);
		assert_eq!(summary.mean, 115.0 / 6.0);
		assert!(summary.skewness.unwrap() > 0.0);
		assert!(summary.kurtosis.is_some());
	}

	#[test]
	fn test_fence_ordering() {
		let dataframe = number_dataframe("x", vec![10.0, 2.0, 8.0, 4.0, 6.0, 12.0, 0.0]);
		let summary = number_summary(&dataframe);
		assert!(summary.lower_fence <= summary.q1);
		assert!(summary.q1 <= summary.median);
		assert!(summary.median <= summary.q3);
		assert!(summary.q3 <= summary.upper_fence);
		assert!(summary.iqr >= 0.0);
	}

	#[test]
	fn test_identical_values() {
		let dataframe = number_dataframe("x", vec![7.0, 7.0, 7.0, 7.0]);
		let summary = number_summary(&dataframe);
		assert_eq!(summary.q1, 7.0);
		assert_eq!(summary.q3, 7.0);
		assert_eq!(summary.iqr, 0.0);
		assert_eq!(summary.lower_fence, 7.0);
		assert_eq!(summary.upper_fence, 7.0);
		assert_eq!(summary.mode, 7.0);
		assert_eq!(summary.skewness, None);
		assert_eq!(summary.kurtosis, None);
	}

	#[test]
	fn test_missing_values_dropped() {
		let dataframe = number_dataframe("x", vec![1.0, 2.0, std::f64::NAN, 4.0]);
		let summary = number_summary(&dataframe);
		assert_eq!(summary.count, 4);
		assert_eq!(summary.valid_count, 3);
		assert_eq!(summary.invalid_count, 1);
		assert_eq!(summary.mean, 7.0 / 3.0);
		assert_eq!(summary.q1, 1.5);
		assert_eq!(summary.median, 2.0);
		assert_eq!(summary.q3, 3.0);
		assert_eq!(summary.min, 1.0);
		assert_eq!(summary.max, 4.0);
	}

	#[test]
	fn test_empty_column_is_undefined() {
		let dataframe = number_dataframe("x", vec![std::f64::NAN, std::f64::NAN]);
		let classification = classify(&dataframe);
		let summaries = summarize(&dataframe, &classification).unwrap();
		match &summaries[0] {
			ColumnSummary::Empty(summary) => {
				assert_eq!(summary.column_name, "x");
				assert_eq!(summary.count, 2);
			}
			_ => panic!("expected an empty summary"),
		}
	}

	#[test]
	fn test_mode_tie_breaks_on_first_occurrence() {
		let dataframe = number_dataframe("x", vec![5.0, 3.0, 5.0, 3.0, 1.0]);
		let summary = number_summary(&dataframe);
		assert_eq!(summary.mode, 5.0);
	}

	#[test]
	fn test_mode_all_unique_is_first_value() {
		let dataframe = number_dataframe("x", vec![9.0, 1.0, 4.0]);
		let summary = number_summary(&dataframe);
		assert_eq!(summary.mode, 9.0);
	}

	#[test]
	fn test_mode_skips_missing_values() {
		let dataframe = number_dataframe("x", vec![std::f64::NAN, 8.0, 2.0, 8.0]);
		let summary = number_summary(&dataframe);
		assert_eq!(summary.mode, 8.0);
	}

	#[test]
	fn test_missing_column_fails() {
		let dataframe = number_dataframe("x", vec![1.0]);
		let classification = Classification {
			quantitative: vec!["y".to_owned()],
			qualitative: vec![],
		};
		let result = summarize(&dataframe, &classification);
		assert!(matches!(result, Err(StatsError::ColumnNotFound(_))));
	}
}
