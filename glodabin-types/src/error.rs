use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the glodabin workspace.
///
/// This covers interval validation, boundary enumeration limits, malformed bin
/// input, and failures surfaced by a message index implementation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GlodaError {
    /// The granularity token is unknown, or the interval is declared but not supported
    /// by the requested operation (quarters).
    #[error("invalid interval: {interval}")]
    InvalidInterval {
        /// The offending token or interval name.
        interval: String,
    },

    /// Boundary enumeration produced more boundaries than allowed, or stopped advancing.
    #[error("interval enumeration aborted: {interval} exceeded {limit} boundaries")]
    IntervalEnumeration {
        /// The configured boundary cap.
        limit: usize,
        /// The interval being enumerated.
        interval: String,
    },

    /// A bin list handed to the fuser is not strictly ascending by start date.
    #[error("bins for source '{source_name}' are not ascending at index {index}")]
    UnorderedBins {
        /// Name of the source list.
        source_name: String,
        /// Position of the first bin that breaks ascending order.
        index: usize,
    },

    /// Calendar arithmetic left the representable date range.
    #[error("time out of range: {0}")]
    TimeOutOfRange(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A message index implementation returned an error.
    #[error("{index} failed: {msg}")]
    Index {
        /// Index name that failed.
        index: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A contact or other resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "contact 42".
        what: String,
    },

    /// An individual index call exceeded the configured timeout.
    #[error("index timed out: {operation} via {index}")]
    IndexTimeout {
        /// Index name that timed out.
        index: String,
        /// Operation label (e.g. "messages", "top_contacts").
        operation: String,
    },
}

impl GlodaError {
    /// Helper: build an `InvalidInterval` error for a token or interval name.
    pub fn invalid_interval(interval: impl Into<String>) -> Self {
        Self::InvalidInterval {
            interval: interval.into(),
        }
    }

    /// Helper: build an `Index` error with the index name and message.
    pub fn index(index: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Index {
            index: index.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `IndexTimeout` error.
    pub fn index_timeout(index: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::IndexTimeout {
            index: index.into(),
            operation: operation.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Caller mistakes (bad intervals, unordered input, invalid arguments) are
    /// actionable; index failures and timeouts are environmental.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInterval { .. }
                | Self::IntervalEnumeration { .. }
                | Self::UnorderedBins { .. }
                | Self::InvalidArg(_)
                | Self::NotFound { .. }
        )
    }
}
