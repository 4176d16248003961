//! Column selection: keep chosen columns or everything but them.
use crate::{
    error::RowResult,
    fields::{project_or, resolve_indices, FieldSpec},
    Rows, Table, Value,
};

#[derive(Clone, Copy)]
enum Mode {
    Keep,
    Drop,
}

/// Keeps only the selected columns of each row, in selector order.
///
/// Selectors may repeat a source column (producing duplicate output
/// columns) and reorder freely. The selection is resolved against the
/// source header once per iteration; rows too short for a resolved index
/// get the missing-value sentinel in that position.
pub struct Cut<T> {
    source: T,
    spec: Vec<FieldSpec>,
    missing: Value,
}

impl<T> Cut<T>
where
    T: Table,
{
    pub fn new<I>(source: T, spec: I) -> Cut<T>
    where
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
    {
        Cut {
            source,
            // snapshot the selection so nothing can change it midstream
            spec: spec.into_iter().map(Into::into).collect(),
            missing: Value::Null,
        }
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> Cut<T> {
        self.missing = missing.into();
        self
    }
}

impl<T> Table for Cut<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            spec: &self.spec,
            missing: &self.missing,
            mode: Mode::Keep,
            indices: None,
            failed: false,
        })
    }
}

/// Keeps every column NOT matched by the selection, preserving the
/// original relative order. Same resolution and repair policy as [`Cut`].
pub struct CutOut<T> {
    source: T,
    spec: Vec<FieldSpec>,
    missing: Value,
}

impl<T> CutOut<T>
where
    T: Table,
{
    pub fn new<I>(source: T, spec: I) -> CutOut<T>
    where
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
    {
        CutOut {
            source,
            spec: spec.into_iter().map(Into::into).collect(),
            missing: Value::Null,
        }
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> CutOut<T> {
        self.missing = missing.into();
        self
    }
}

impl<T> Table for CutOut<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            spec: &self.spec,
            missing: &self.missing,
            mode: Mode::Drop,
            indices: None,
            failed: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    spec: &'a [FieldSpec],
    missing: &'a Value,
    mode: Mode,
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

        // first pull: derive the projection from the current header
        let fields = match self.iter.next()? {
            Ok(fields) => fields,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let selected = match resolve_indices(&fields, self.spec) {
            Ok(selected) => selected,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let indices: Vec<usize> = match self.mode {
            Mode::Keep => selected,
            Mode::Drop => (0..fields.len()).filter(|i| !selected.contains(i)).collect(),
        };

        let header = project_or(&fields, &indices, self.missing);
        self.indices = Some(indices);
        Some(Ok(header))
    }
}
