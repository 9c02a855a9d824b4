use crate::{
	classify::{classify, Classification},
	compare::{compare, ColumnComparison},
	describe::{summarize, ColumnSummary},
	frequency::{frequency_table, FrequencyEntry},
	outlier::{detect, replace, values_above, values_below, OutlierFlags},
	StatsError,
};
use once_cell::sync::OnceCell;
use univar_dataframe::DataFrame;

/// A facade that owns a dataframe and memoizes the classification and the column summaries, so any operation can be called first and classification happens lazily. All computation is delegated to the pure functions in this crate; the memoized values are immutable once computed.
pub struct Analyzer {
	dataframe: DataFrame,
	classification: OnceCell<Classification>,
	summaries: OnceCell<Vec<ColumnSummary>>,
}

impl Analyzer {
	pub fn new(dataframe: DataFrame) -> Self {
		Self {
			dataframe,
			classification: OnceCell::new(),
			summaries: OnceCell::new(),
		}
	}

	pub fn dataframe(&self) -> &DataFrame {
		&self.dataframe
	}

	/// The column classification, computed on first access.
	pub fn classification(&self) -> &Classification {
		self.classification
			.get_or_init(|| classify(&self.dataframe))
	}

	/// The per-column summaries, computed on first access. The classification is derived from this analyzer's own dataframe, so summarization cannot fail.
	pub fn summaries(&self) -> &[ColumnSummary] {
		self.summaries
			.get_or_init(|| summarize(&self.dataframe, self.classification()).unwrap())
	}

	pub fn detect(&self) -> OutlierFlags {
		detect(&self.dataframe, self.summaries())
	}

	pub fn values_below(&self, column_name: &str) -> Result<Vec<f64>, StatsError> {
		values_below(&self.dataframe, self.summaries(), column_name)
	}

	pub fn values_above(&self, column_name: &str) -> Result<Vec<f64>, StatsError> {
		values_above(&self.dataframe, self.summaries(), column_name)
	}

	/// Return a copy of the dataframe with out-of-fence values clamped. The analyzer's own dataframe is never mutated.
	pub fn replace(&self) -> DataFrame {
		replace(&self.dataframe, self.summaries())
	}

	/// Clamp outliers and cross-reference the result with the original dataframe. Both tables share this analyzer's column set, so comparison cannot fail.
	pub fn compare(&self) -> Vec<ColumnComparison> {
		let replaced = self.replace();
		compare(&self.dataframe, &replaced, self.summaries()).unwrap()
	}

	pub fn frequency_table(&self, column_name: &str) -> Result<Vec<FrequencyEntry>, StatsError> {
		frequency_table(&self.dataframe, column_name)
	}
}
