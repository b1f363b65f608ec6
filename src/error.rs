use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the timeline engine and the task model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// A date string was not in `YYYY-MM-DD` form.
    #[error("malformed date '{input}': expected YYYY-MM-DD")]
    Format { input: String },

    #[error("project window start {start} must be before end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("unknown granularity '{0}': expected day, week or month")]
    UnknownGranularity(String),

    #[error("invalid hex color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Errors raised by a renderer dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("dataset already contains an item with id '{0}'")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
