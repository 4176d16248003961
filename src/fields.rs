//! Field selectors, name-to-index resolution and the shared row repair
//! helpers every transform leans on.
use crate::{
    error::{Error, Result},
    Row, Value,
};

/// Identifies one column of a table, either by its header label or by its
/// zero-based position. Both kinds may be mixed freely in one selection.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Name(Value),
    Index(usize),
}

impl From<usize> for FieldSpec {
    fn from(index: usize) -> FieldSpec {
        FieldSpec::Index(index)
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> FieldSpec {
        FieldSpec::Name(Value::from(name))
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> FieldSpec {
        FieldSpec::Name(Value::from(name))
    }
}

impl From<Value> for FieldSpec {
    fn from(name: Value) -> FieldSpec {
        FieldSpec::Name(name)
    }
}

/// Maps a field selection onto column indices of `fields`.
///
/// Names resolve to the first matching header position; duplicate labels
/// beyond the first can only be reached positionally. Positional selectors
/// must lie within the header width. Fails on the first selector that
/// cannot be resolved.
pub fn resolve_indices(fields: &[Value], spec: &[FieldSpec]) -> Result<Vec<usize>> {
    spec.iter()
        .map(|s| match s {
            FieldSpec::Index(index) => {
                if *index < fields.len() {
                    Ok(*index)
                } else {
                    Err(Error::IndexOutOfRange {
                        index: *index,
                        width: fields.len(),
                    })
                }
            }
            FieldSpec::Name(name) => fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| Error::FieldNotFound(name.to_string())),
        })
        .collect()
}

/// Strict row projection: the values of `row` at `indices`, in order.
/// Fails if any index is out of range.
pub fn project(row: &[Value], indices: &[usize]) -> Result<Row> {
    indices
        .iter()
        .map(|&i| {
            row.get(i).cloned().ok_or(Error::IndexOutOfRange {
                index: i,
                width: row.len(),
            })
        })
        .collect()
}

/// Repairing row projection: out-of-range indices yield a clone of
/// `missing` instead of failing. This is how every selector-driven
/// transform tolerates short rows.
pub fn project_or(row: &[Value], indices: &[usize], missing: &Value) -> Row {
    indices
        .iter()
        .map(|&i| row.get(i).cloned().unwrap_or_else(|| missing.clone()))
        .collect()
}

/// Pads a short row with `missing` and truncates a long one so the result
/// is exactly `width` values.
pub fn square(mut row: Row, width: usize, missing: &Value) -> Row {
    if row.len() > width {
        row.truncate(width);
    } else {
        while row.len() < width {
            row.push(missing.clone());
        }
    }
    row
}
