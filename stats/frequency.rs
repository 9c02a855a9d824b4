use crate::StatsError;
use std::collections::BTreeMap;
use univar_dataframe::{Column, DataFrame};

/// One row of a frequency table.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyEntry {
	pub value: String,
	pub frequency: usize,
	/// frequency divided by the total number of rows, missing rows included.
	pub relative_frequency: f64,
	/// The running sum of the relative frequencies in table order.
	pub cumulative_frequency: f64,
}

/// Compute the frequency distribution of any column, quantitative or qualitative. Rows are ordered by descending frequency, ties by first appearance in the column. Missing values are excluded from the distinct value set but stay in the denominator, so the cumulative column tops out at one minus the missing fraction.
pub fn frequency_table(
	dataframe: &DataFrame,
	column_name: &str,
) -> Result<Vec<FrequencyEntry>, StatsError> {
	let column = dataframe
		.column(column_name)
		.ok_or_else(|| StatsError::ColumnNotFound(column_name.to_owned()))?;
	let nrows = column.len();
	// distinct values with counts, in first-appearance order
	let mut counts: Vec<(String, usize)> = Vec::new();
	let mut positions: BTreeMap<String, usize> = BTreeMap::new();
	let mut tally = |value: String| match positions.get(&value) {
		Some(position) => counts[*position].1 += 1,
		None => {
			positions.insert(value.clone(), counts.len());
			counts.push((value, 1));
		}
	};
	match column {
		Column::Unknown(_) => {}
		Column::Number(column) => {
			for value in column.data.iter().filter(|value| value.is_finite()) {
				tally(value.to_string());
			}
		}
		Column::Enum(column) => {
			for index in 0..column.data.len() {
				if let Some(option) = column.option_at(index) {
					tally(option.to_owned());
				}
			}
		}
		Column::Text(column) => {
			for value in column.data.iter() {
				tally(value.clone());
			}
		}
	}
	// a stable sort by descending count preserves first-appearance order among ties
	counts.sort_by(|a, b| b.1.cmp(&a.1));
	let total = nrows as f64;
	let mut cumulative = 0.0;
	let entries = counts
		.into_iter()
		.map(|(value, frequency)| {
			let relative_frequency = frequency as f64 / total;
			cumulative += relative_frequency;
			FrequencyEntry {
				value,
				frequency,
				relative_frequency,
				cumulative_frequency: cumulative,
			}
		})
		.collect();
	Ok(entries)
}

#[cfg(test)]
mod tests {
	use super::*;
	use univar_dataframe::{EnumColumn, NumberColumn, TextColumn};

	#[test]
	fn test_frequency_table_orders_by_descending_frequency() {
		let dataframe = DataFrame {
			columns: vec![Column::Number(NumberColumn {
				name: "x".to_owned(),
				data: vec![3.0, 1.0, 3.0, 2.0, 3.0, 2.0],
			})],
		};
		let table = frequency_table(&dataframe, "x").unwrap();
		let values: Vec<&str> = table.iter().map(|entry| entry.value.as_str()).collect();
		assert_eq!(values, vec!["3", "2", "1"]);
		assert_eq!(table[0].frequency, 3);
		assert_eq!(table[1].frequency, 2);
		assert_eq!(table[2].frequency, 1);
		let last = table.last().unwrap();
		assert!((last.cumulative_frequency - 1.0).abs() < 1e-9);
	}

	#[test]
	fn test_frequency_table_ties_break_by_first_appearance() {
		let dataframe = DataFrame {
			columns: vec![Column::Text(TextColumn {
				name: "t".to_owned(),
				data: vec![
					"b".to_owned(),
					"a".to_owned(),
					"b".to_owned(),
					"a".to_owned(),
				],
			})],
		};
		let table = frequency_table(&dataframe, "t").unwrap();
		let values: Vec<&str> = table.iter().map(|entry| entry.value.as_str()).collect();
		// both have frequency 2; "b" appeared first
		assert_eq!(values, vec!["b", "a"]);
	}

	#[test]
	fn test_frequency_table_excludes_missing_from_distinct_values() {
		let dataframe = DataFrame {
			columns: vec![Column::Number(NumberColumn {
				name: "x".to_owned(),
				data: vec![1.0, 2.0, std::f64::NAN, 4.0],
			})],
		};
		let table = frequency_table(&dataframe, "x").unwrap();
		assert_eq!(table.len(), 3);
		let sum: f64 = table.iter().map(|entry| entry.relative_frequency).sum();
		assert!((sum - 0.75).abs() < 1e-9);
		assert!((table.last().unwrap().cumulative_frequency - 0.75).abs() < 1e-9);
	}

	#[test]
	fn test_frequency_table_for_enum_column() {
		let dataframe = DataFrame {
			columns: vec![Column::Enum(EnumColumn {
				name: "city".to_owned(),
				options: vec!["lyon".to_owned(), "oslo".to_owned()],
				data: vec![
					std::num::NonZeroUsize::new(2),
					std::num::NonZeroUsize::new(1),
					std::num::NonZeroUsize::new(2),
					None,
				],
			})],
		};
		let table = frequency_table(&dataframe, "city").unwrap();
		assert_eq!(table[0].value, "oslo");
		assert_eq!(table[0].frequency, 2);
		assert_eq!(table[0].relative_frequency, 0.5);
		assert_eq!(table[1].value, "lyon");
		assert_eq!(table[1].frequency, 1);
	}

	#[test]
	fn test_frequency_table_missing_column_fails() {
		let dataframe = DataFrame { columns: vec![] };
		let result = frequency_table(&dataframe, "x");
		assert!(matches!(result, Err(StatsError::ColumnNotFound(_))));
	}
}
