//! Adds a column computed per row by a caller-supplied closure.
use std::rc::Rc;

use crate::{
    cat::Cat,
    error::RowResult,
    record::{FieldIndex, Record},
    Rows, Table, Value,
};

/// Adds a field whose value is computed for each row by a closure over the
/// row wrapped as a [`Record`], at an optional insertion position
/// (default: appended).
///
/// The source is squared through the single-table [`Cat`] policy first, so
/// the closure always sees header-length rows. A panicking closure is a
/// caller logic defect and propagates as-is.
pub struct AddFieldWith<T, F> {
    source: Cat<T>,
    field: Value,
    f: F,
    index: Option<usize>,
}

impl<T, F> AddFieldWith<T, F>
where
    T: Table,
    F: Fn(&Record) -> Value,
{
    pub fn new<N>(source: T, field: N, f: F) -> AddFieldWith<T, F>
    where
        N: Into<Value>,
    {
        AddFieldWith {
            source: Cat::new(vec![source]),
            field: field.into(),
            f,
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> AddFieldWith<T, F> {
        self.index = Some(index);
        self
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> AddFieldWith<T, F> {
        self.source = self.source.with_missing(missing);
        self
    }
}

impl<T, F> Table for AddFieldWith<T, F>
where
    T: Table,
    F: Fn(&Record) -> Value,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            field: &self.field,
            f: &self.f,
            index: self.index,
            state: None,
            failed: false,
        })
    }
}

struct Iter<'a, F> {
    iter: Rows<'a>,
    field: &'a Value,
    f: &'a F,
    index: Option<usize>,
    // insertion position and the field index shared by this iteration's
    // records, both derived from the header on first pull
    state: Option<(usize, Rc<FieldIndex>)>,
    failed: bool,
}

impl<'a, F> Iterator for Iter<'a, F>
where
    F: Fn(&Record) -> Value,
{
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some((at, fields)) = &self.state {
            return match self.iter.next()? {
                Ok(row) => {
                    let rec = Record::new(row, Rc::clone(fields));
                    let v = (self.f)(&rec);
                    let mut row = rec.into_row();
                    let at = (*at).min(row.len());
                    row.insert(at, v);
                    Some(Ok(row))
                }
                Err(e) => Some(Err(e)),
            };
        }

        match self.iter.next()? {
            Ok(fields) => {
                let at = self.index.unwrap_or(fields.len()).min(fields.len());
                let mut outflds = fields.clone();
                outflds.insert(at, self.field.clone());
                // records keep addressing rows by the original fields
                self.state = Some((at, Rc::new(FieldIndex::from_row(fields))));
                Some(Ok(outflds))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
