//! Error types for dataset loading.
//!
//! Loading is the only fallible stage of the analytics pipeline: once a
//! [`DatasetStore`](super::DatasetStore) exists every query over it is total.

use std::fmt;

/// Result type for dataset store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Structured context for store errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "load_dataset", "read_column")
    pub operation: Option<String>,
    /// The dataset involved (e.g., "queue_zone_compliance")
    pub dataset: Option<String>,
    /// The column involved, if any
    pub column: Option<String>,
    /// Zero-based row index, if the failure is row specific
    pub row: Option<usize>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref dataset) = self.dataset {
            parts.push(format!("dataset={}", dataset));
        }
        if let Some(ref column) = self.column {
            parts.push(format!("column={}", column));
        }
        if let Some(row) = self.row {
            parts.push(format!("row={}", row));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for dataset store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The dataset file could not be opened or read.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },

    /// A required dataset or column is missing, or a column has the wrong shape.
    #[error("Schema violation: {message} {context}")]
    Schema {
        message: String,
        context: ErrorContext,
    },

    /// A cell could not be decoded (bad date, null in a required column, ...).
    #[error("Parse error: {message} {context}")]
    Parse {
        message: String,
        context: ErrorContext,
    },

    /// Invalid store configuration (data directory, file format).
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl StoreError {
    pub fn io(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Io {
            message: message.into(),
            context,
        }
    }

    pub fn schema(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Schema {
            message: message.into(),
            context,
        }
    }

    pub fn parse(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Parse {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Io { context, .. }
            | Self::Schema { context, .. }
            | Self::Parse { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    /// Attach the dataset name if the error does not carry one yet.
    pub fn in_dataset(mut self, dataset: &str) -> Self {
        match &mut self {
            Self::Io { context, .. }
            | Self::Schema { context, .. }
            | Self::Parse { context, .. }
            | Self::Configuration { context, .. } => {
                if context.dataset.is_none() {
                    context.dataset = Some(dataset.to_string());
                }
            }
        }
        self
    }
}

impl From<polars::prelude::PolarsError> for StoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        use polars::prelude::PolarsError;
        match err {
            PolarsError::ColumnNotFound(name) => StoreError::schema(
                format!("missing column: {}", name),
                ErrorContext::new("read_column"),
            ),
            PolarsError::SchemaMismatch(msg) => {
                StoreError::schema(msg.to_string(), ErrorContext::new("read_column"))
            }
            other => StoreError::parse(other.to_string(), ErrorContext::new("decode")),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::io(err.to_string(), ErrorContext::new("read_file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("read_column")
            .with_dataset("security_lanes_daily")
            .with_column("cleared_volume")
            .with_row(3);
        assert_eq!(
            ctx.to_string(),
            "[operation=read_column, dataset=security_lanes_daily, column=cleared_volume, row=3]"
        );
    }

    #[test]
    fn test_in_dataset_keeps_existing_name() {
        let err = StoreError::schema(
            "missing column: zone",
            ErrorContext::new("read_column").with_dataset("queue_zone_compliance"),
        )
        .in_dataset("voc_feedback");
        assert_eq!(
            err.context().dataset.as_deref(),
            Some("queue_zone_compliance")
        );
    }

    #[test]
    fn test_error_message_includes_context() {
        let err = StoreError::parse(
            "bad date 'yesterday'",
            ErrorContext::new("read_dates").with_column("date"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Parse error: bad date"));
        assert!(msg.contains("column=date"));
    }
}
