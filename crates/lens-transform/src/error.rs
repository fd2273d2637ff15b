//! Error types for transformations.
//!
//! Only configuration problems are errors. Irregular data never fails a
//! transformation; it is reported through `QualityIssue`s instead.

use lens_model::DataKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A role the builder cannot run without has no column mapped to it.
    #[error("{kind} transformation requires a column mapped to role '{role}'")]
    MissingRole { kind: DataKind, role: &'static str },

    /// The requested schema is not part of the supplied schema set.
    #[error("unknown schema '{id}'")]
    UnknownSchema { id: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
