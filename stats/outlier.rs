use crate::{
	describe::{ColumnSummary, NumberColumnSummary},
	StatsError,
};
use univar_dataframe::{Column, DataFrame};

/// The names of the columns that contain at least one value outside their fences. Columns with undefined statistics never appear here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlierFlags {
	/// Columns with at least one value strictly below their lower fence.
	pub lesser: Vec<String>,
	/// Columns with at least one value strictly above their upper fence.
	pub greater: Vec<String>,
}

/// Flag the columns whose values fall outside the fences in `summaries`. The summaries must have been computed from `dataframe`.
pub fn detect(dataframe: &DataFrame, summaries: &[ColumnSummary]) -> OutlierFlags {
	let mut flags = OutlierFlags::default();
	for summary in summaries.iter() {
		let summary = match summary {
			ColumnSummary::Number(summary) => summary,
			ColumnSummary::Empty(_) => continue,
		};
		let column = match dataframe
			.column(&summary.column_name)
			.and_then(Column::as_number)
		{
			Some(column) => column,
			None => continue,
		};
		if column
			.data
			.iter()
			.any(|value| value.is_finite() && *value < summary.lower_fence)
		{
			flags.lesser.push(summary.column_name.clone());
		}
		if column
			.data
			.iter()
			.any(|value| value.is_finite() && *value > summary.upper_fence)
		{
			flags.greater.push(summary.column_name.clone());
		}
	}
	flags
}

/// The literal values of `column_name` strictly below its lower fence, in original row order.
pub fn values_below(
	dataframe: &DataFrame,
	summaries: &[ColumnSummary],
	column_name: &str,
) -> Result<Vec<f64>, StatsError> {
	out_of_fence(dataframe, summaries, column_name, |value, summary| {
		value < summary.lower_fence
	})
}

/// The literal values of `column_name` strictly above its upper fence, in original row order.
pub fn values_above(
	dataframe: &DataFrame,
	summaries: &[ColumnSummary],
	column_name: &str,
) -> Result<Vec<f64>, StatsError> {
	out_of_fence(dataframe, summaries, column_name, |value, summary| {
		value > summary.upper_fence
	})
}

fn out_of_fence(
	dataframe: &DataFrame,
	summaries: &[ColumnSummary],
	column_name: &str,
	outside: impl Fn(f64, &NumberColumnSummary) -> bool,
) -> Result<Vec<f64>, StatsError> {
	let column = dataframe
		.column(column_name)
		.ok_or_else(|| StatsError::ColumnNotFound(column_name.to_owned()))?;
	let column = column
		.as_number()
		.ok_or_else(|| StatsError::NotNumber(column_name.to_owned()))?;
	let summary = summaries
		.iter()
		.find(|summary| summary.column_name() == column_name);
	// A column with undefined statistics has no fences and therefore no outliers.
	let summary = match summary {
		Some(ColumnSummary::Number(summary)) => summary,
		_ => return Ok(Vec::new()),
	};
	Ok(column
		.data
		.iter()
		.copied()
		.filter(|value| value.is_finite() && outside(*value, summary))
		.collect())
}

/// Return a copy of `dataframe` where every number value outside its column's fences is clamped to the nearest fence. Missing values and values inside the fences pass through unchanged; the original dataframe is not touched. The summaries must come from the original dataframe, which makes the operation idempotent: clamped values sit exactly on the fence and are inside the inclusive fence interval.
pub fn replace(dataframe: &DataFrame, summaries: &[ColumnSummary]) -> DataFrame {
	let mut replaced = dataframe.clone();
	for summary in summaries.iter() {
		let summary = match summary {
			ColumnSummary::Number(summary) => summary,
			ColumnSummary::Empty(_) => continue,
		};
		let column = match replaced
			.column_mut(&summary.column_name)
			.and_then(Column::as_number_mut)
		{
			Some(column) => column,
			None => continue,
		};
		for value in column.data.iter_mut() {
			if !value.is_finite() {
				continue;
			}
			if *value < summary.lower_fence {
				*value = summary.lower_fence;
			} else if *value > summary.upper_fence {
				*value = summary.upper_fence;
			}
		}
	}
	replaced
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{classify::classify, describe::summarize};
	use univar_dataframe::NumberColumn;

	fn number_dataframe(name: &str, data: Vec<f64>) -> DataFrame {
		DataFrame {
			columns: vec![Column::Number(NumberColumn {
				name: name.to_owned(),
				data,
			})],
		}
	}

	fn summaries_for(dataframe: &DataFrame) -> Vec<ColumnSummary> {
		let classification = classify(dataframe);
		summarize(dataframe, &classification).unwrap()
	}

	#[test]
	fn test_detect_greater_outlier() {
		let dataframe = number_dataframe("x", vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
		let summaries = summaries_for(&dataframe);
		let flags = detect(&dataframe, &summaries);
		assert!(flags.lesser.is_empty());
		assert_eq!(flags.greater, vec!["x"]);
		assert_eq!(
			values_above(&dataframe, &summaries, "x").unwrap(),
			vec![100.0]
		);
		assert!(values_below(&dataframe, &summaries, "x").unwrap().is_empty());
	}

	#[test]
	fn test_replace_clamps_to_fence() {
		let dataframe = number_dataframe("x", vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
		let summaries = summaries_for(&dataframe);
		let replaced = replace(&dataframe, &summaries);
		let column = replaced.column("x").unwrap().as_number().unwrap();
		assert_eq!(column.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 8.5]);
		// the original dataframe is untouched
		let original = dataframe.column("x").unwrap().as_number().unwrap();
		assert_eq!(original.data[5], 100.0);
	}

	#[test]
	fn test_replace_is_idempotent() {
		let dataframe = number_dataframe("x", vec![-50.0, 1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
		let summaries = summaries_for(&dataframe);
		let replaced_once = replace(&dataframe, &summaries);
		// the second pass computes fences from the already clamped table
		let replaced_summaries = summaries_for(&replaced_once);
		let replaced_twice = replace(&replaced_once, &replaced_summaries);
		assert_eq!(replaced_once, replaced_twice);
	}

	#[test]
	fn test_no_outliers_after_replace() {
		let dataframe = number_dataframe("x", vec![-50.0, 1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
		let summaries = summaries_for(&dataframe);
		let replaced = replace(&dataframe, &summaries);
		let flags = detect(&replaced, &summaries);
		assert!(flags.lesser.is_empty());
		assert!(flags.greater.is_empty());
	}

	#[test]
	fn test_degenerate_distribution() {
		let dataframe = number_dataframe("x", vec![7.0, 7.0, 7.0, 7.0]);
		let summaries = summaries_for(&dataframe);
		let flags = detect(&dataframe, &summaries);
		assert!(flags.lesser.is_empty());
		assert!(flags.greater.is_empty());
		let replaced = replace(&dataframe, &summaries);
		assert_eq!(replaced, dataframe);
	}

	#[test]
	fn test_degenerate_distribution_flags_any_other_value() {
		// fences collapse to 7, so 7.1 is a greater outlier even though it is close
		let dataframe = number_dataframe("x", vec![7.0, 7.0, 7.0, 7.0, 7.0, 7.1]);
		let summaries = summaries_for(&dataframe);
		let flags = detect(&dataframe, &summaries);
		assert_eq!(flags.greater, vec!["x"]);
	}

	#[test]
	fn test_empty_column_never_flagged() {
		let dataframe = number_dataframe("x", vec![std::f64::NAN, std::f64::NAN]);
		let summaries = summaries_for(&dataframe);
		let flags = detect(&dataframe, &summaries);
		assert!(flags.lesser.is_empty());
		assert!(flags.greater.is_empty());
		assert!(values_below(&dataframe, &summaries, "x").unwrap().is_empty());
		let replaced = replace(&dataframe, &summaries);
		assert_eq!(replaced.nrows(), 2);
	}

	#[test]
	fn test_missing_values_pass_through() {
		let dataframe = number_dataframe("x", vec![1.0, 2.0, std::f64::NAN, 4.0]);
		let summaries = summaries_for(&dataframe);
		let replaced = replace(&dataframe, &summaries);
		let column = replaced.column("x").unwrap().as_number().unwrap();
		assert!(column.data[2].is_nan());
	}

	#[test]
	fn test_values_for_missing_column_fails() {
		let dataframe = number_dataframe("x", vec![1.0]);
		let summaries = summaries_for(&dataframe);
		let result = values_below(&dataframe, &summaries, "y");
		assert!(matches!(result, Err(StatsError::ColumnNotFound(_))));
	}
}
