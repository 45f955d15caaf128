//! Weighing error types.

use thiserror::Error;

/// Errors that can abort weigher resolution or a weighing pass.
#[derive(Debug, Error)]
pub enum WeighError {
    /// A host lacks a metric the metrics weigher requires.
    #[error("metric {name} not found on compute host {host} (node {node})")]
    MetricNotFound {
        host: String,
        node: String,
        name: String,
    },

    #[error("unknown weigher: {0}")]
    UnknownWeigher(String),

    #[error("weigher already registered: {0}")]
    DuplicateWeigher(String),
}

pub type WeighResult<T> = Result<T, WeighError>;
