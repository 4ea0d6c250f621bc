use thiserror::Error;

/// Convenience result type for dataset, filter and summary operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised by the in-memory filter-and-aggregate engine.
///
/// These are deterministic: the same dataset and criteria always produce the same error,
/// so callers surface them (or render a placeholder) rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Bounds were requested for a metric that has no known value in the dataset.
    #[error("no known values for metric '{metric}' in the dataset")]
    EmptyDataset { metric: String },

    /// An aggregate (mean, median) was requested over zero known values.
    #[error("no data: the selection has no known values for '{metric}'")]
    NoData { metric: String },

    /// A categorical selection is empty, so no record can match.
    #[error("nothing selected for '{attribute}'")]
    EmptySelection { attribute: String },

    /// A metric or attribute name is not part of the dataset schema.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// A numeric range with a non-finite bound or a lower bound above its upper bound.
    #[error("invalid range for '{metric}': [{min}, {max}]")]
    InvalidRange { metric: String, min: f64, max: f64 },

    /// The same label names two columns of the schema.
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A record does not carry the same columns as the schema.
    #[error("schema mismatch at row {row}: {message}")]
    SchemaMismatch { row: usize, message: String },

    /// A known metric value is NaN or infinite.
    #[error("non-finite value for '{metric}' at row {row}")]
    NonFiniteMetric { row: usize, metric: String },
}

/// Errors raised while writing or reading the CSV export format.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying I/O error (e.g. file not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parsed rows do not form a valid dataset.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The header row does not match the schema's column order.
    #[error("header mismatch: expected [{expected}], found [{found}]")]
    Header { expected: String, found: String },

    /// A cell could not be parsed into its column type.
    #[error("failed to parse value at row {row} column '{column}' (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
    },
}
