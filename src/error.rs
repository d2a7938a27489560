use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Dimension;

/// Failure to turn the input file into a [`Dataset`](crate::data::model::Dataset).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Failure of one component of a report pass.
///
/// The dashboard never shows these to the user; every variant collapses
/// into the same generic warning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("no {0} selected")]
    EmptySelection(Dimension),

    #[error("{statistic} is undefined on an empty view")]
    EmptyView { statistic: &'static str },

    #[error("investment mode is undefined ({modes} candidate values)")]
    AmbiguousOrEmptyMode { modes: usize },

    #[error("target must be a positive number, got {0}")]
    InvalidTarget(f64),
}
