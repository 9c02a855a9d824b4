use univar_dataframe::DataFrame;

/// The partition of a dataframe's column names into quantitative (numeric) and qualitative (everything else) sets. Column order is preserved from the dataframe.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
	pub quantitative: Vec<String>,
	pub qualitative: Vec<String>,
}

/// Partition the columns of `dataframe` by their declared kind. A column is quantitative iff it is a number column. Every column lands in exactly one of the two sets.
pub fn classify(dataframe: &DataFrame) -> Classification {
	let mut quantitative = Vec::new();
	let mut qualitative = Vec::new();
	for column in dataframe.columns.iter() {
		if column.is_number() {
			quantitative.push(column.name().to_owned());
		} else {
			qualitative.push(column.name().to_owned());
		}
	}
	Classification {
		quantitative,
		qualitative,
	}
}

impl Classification {
	pub fn is_quantitative(&self, column_name: &str) -> bool {
		self.quantitative.iter().any(|name| name == column_name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use univar_dataframe::{Column, EnumColumn, NumberColumn, TextColumn};

	#[test]
	fn test_classify_partitions_every_column() {
		let dataframe = DataFrame {
			columns: vec![
				Column::Number(NumberColumn {
					name: "age".to_owned(),
					data: vec![1.0, 2.0],
				}),
				Column::Enum(EnumColumn {
					name: "city".to_owned(),
					options: vec!["a".to_owned(), "b".to_owned()],
					data: vec![None, None],
				}),
				Column::Text(TextColumn {
					name: "note".to_owned(),
					data: vec!["x".to_owned(), "y".to_owned()],
				}),
				Column::Number(NumberColumn {
					name: "salary".to_owned(),
					data: vec![3.0, 4.0],
				}),
			],
		};
		let classification = classify(&dataframe);
		assert_eq!(classification.quantitative, vec!["age", "salary"]);
		assert_eq!(classification.qualitative, vec!["city", "note"]);
		// every column appears in exactly one set
		for column in dataframe.columns.iter() {
			let in_quantitative = classification.is_quantitative(column.name());
			let in_qualitative = classification
				.qualitative
				.iter()
				.any(|name| name == column.name());
			assert!(in_quantitative != in_qualitative);
		}
	}
}
