//! Error types.
//!
//! No error in this crate is fatal: configuration errors leave caller state
//! untouched, and lookup failures are reported as typed results rather than
//! panics. Malformed individual records are skipped with a logged warning and
//! never surface as an `Err`.

use thiserror::Error;

use crate::pipeline::StageId;
use crate::row::RowId;

/// Errors reported by the row collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// `load` was handed something other than an array of records.
    ///
    /// Prior collection state is left untouched.
    #[error("invalid dataset: expected an array of records, received {kind}")]
    InvalidDataset {
        /// JSON type name of the rejected value.
        kind: &'static str,
    },

    /// A refresh named a stage that was never registered.
    ///
    /// The refresh is a no-op; pipeline state is unaffected.
    #[error("unable to refresh data, unknown pipeline stage {stage}")]
    UnknownStage {
        /// The unrecognised stage id.
        stage: StageId,
    },
}

/// Errors surfaced by viewport renderer implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RendererError {
    /// The row is absent from the current display projection.
    #[error("row {row} is not in the current display projection")]
    RowNotFound {
        /// Identity of the missing row.
        row: RowId,
    },
}

/// JSON type name for diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
