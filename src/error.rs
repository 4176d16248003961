use std::result;
use thiserror::Error;

use crate::Row;

/// An error found somewhere in the transformation chain.
///
/// Selector and configuration problems are surfaced as the first item of
/// an iteration, never at view construction. Row-shape irregularities are
/// not errors at all; every transform repairs them with its missing-value
/// sentinel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A field named in a selector does not exist in the header.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// A positional selector points past the end of the header.
    #[error("field index {index} out of range for width {width}")]
    IndexOutOfRange { index: usize, width: usize },

    /// A transform was configured in a way that cannot be evaluated.
    /// Reserved for misuse; new transforms should reuse this rather than
    /// invent their own variants.
    #[error("invalid transform configuration: {0}")]
    Transform(String),
}

pub type Result<T> = result::Result<T, Error>;

/// The type that actually flows the transformation chain. Either a row or
/// an error. The first `Ok` item of any iteration is the header row.
pub type RowResult = result::Result<Row, Error>;
