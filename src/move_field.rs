//! Repositions one field within the header.
use crate::{
    error::{Error, RowResult},
    fields::project_or,
    Rows, Table, Value,
};

/// Moves the named field to a new header position. The index permutation
/// is derived from the current header once per iteration; data rows are
/// permuted with the same short-row repair as column selection. An unknown
/// field name is a resolution error, surfaced at iteration.
pub struct MoveField<T> {
    source: T,
    field: Value,
    index: usize,
    missing: Value,
}

impl<T> MoveField<T>
where
    T: Table,
{
    pub fn new<N: Into<Value>>(source: T, field: N, index: usize) -> MoveField<T> {
        MoveField {
            source,
            field: field.into(),
            index,
            missing: Value::Null,
        }
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> MoveField<T> {
        self.missing = missing.into();
        self
    }
}

impl<T> Table for MoveField<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            field: &self.field,
            index: self.index,
            missing: &self.missing,
            indices: None,
            failed: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    field: &'a Value,
    index: usize,
    missing: &'a Value,
    indices: Option<Vec<usize>>,
    failed: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(indices) = &self.indices {
            return match self.iter.next()? {
                Ok(row) => Some(Ok(project_or(&row, indices, self.missing))),
                Err(e) => Some(Err(e)),
            };
        }

        let fields = match self.iter.next()? {
            Ok(fields) => fields,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let from = match fields.iter().position(|f| f == self.field) {
            Some(from) => from,
            None => {
                self.failed = true;
                return Some(Err(Error::FieldNotFound(self.field.to_string())));
            }
        };

        let mut indices: Vec<usize> = (0..fields.len()).filter(|&i| i != from).collect();
        let at = self.index.min(indices.len());
        indices.insert(at, from);

        let header = project_or(&fields, &indices, self.missing);
        self.indices = Some(indices);
        Some(Ok(header))
    }
}
