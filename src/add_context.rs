//! Adds a column computed from a one-row window around each row.
use std::rc::Rc;

use crate::{
    error::RowResult,
    record::{FieldIndex, Record},
    Rows, Table, Value,
};

/// Appends a field whose value is computed by a closure over the previous,
/// current and next rows, each wrapped as a [`Record`]. The first row sees
/// `prev = None` and the last row sees `next = None`.
///
/// One row of lookahead is buffered at all times: a row's output is only
/// emitted once the following row (or end of input) is known, so output
/// lags input by exactly one row.
pub struct AddFieldUsingContext<T, F> {
    source: T,
    field: Value,
    query: F,
}

impl<T, F> AddFieldUsingContext<T, F>
where
    T: Table,
    F: Fn(Option<&Record>, &Record, Option<&Record>) -> Value,
{
    pub fn new<N: Into<Value>>(source: T, field: N, query: F) -> AddFieldUsingContext<T, F> {
        AddFieldUsingContext {
            source,
            field: field.into(),
            query,
        }
    }
}

impl<T, F> Table for AddFieldUsingContext<T, F>
where
    T: Table,
    F: Fn(Option<&Record>, &Record, Option<&Record>) -> Value,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            field: &self.field,
            query: &self.query,
            fields: None,
            prev: None,
            cur: None,
            done: false,
        })
    }
}

struct Iter<'a, F> {
    iter: Rows<'a>,
    field: &'a Value,
    query: &'a F,
    fields: Option<Rc<FieldIndex>>,
    prev: Option<Record>,
    cur: Option<Record>,
    done: bool,
}

impl<'a, F> Iter<'a, F>
where
    F: Fn(Option<&Record>, &Record, Option<&Record>) -> Value,
{
    fn emit(&mut self, next: Option<&Record>) -> RowResult {
        // self.cur is always present when this is called
        let cur = self.cur.take().expect("emit without a current record");
        let v = (self.query)(self.prev.as_ref(), &cur, next);
        let mut outrow = cur.as_row().clone();
        outrow.push(v);
        self.prev = Some(cur);
        Ok(outrow)
    }
}

impl<'a, F> Iterator for Iter<'a, F>
where
    F: Fn(Option<&Record>, &Record, Option<&Record>) -> Value,
{
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.fields.is_none() {
            return match self.iter.next()? {
                Ok(fields) => {
                    let mut header = fields.clone();
                    header.push(self.field.clone());
                    self.fields = Some(Rc::new(FieldIndex::from_row(fields)));
                    Some(Ok(header))
                }
                Err(e) => {
                    self.done = true;
                    Some(Err(e))
                }
            };
        }

        loop {
            match self.iter.next() {
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(row)) => {
                    let fields = self.fields.as_ref().map(Rc::clone)?;
                    let rec = Record::new(row, fields);
                    if self.cur.is_none() {
                        // first data row, need one more before emitting
                        self.cur = Some(rec);
                    } else {
                        let out = self.emit(Some(&rec));
                        self.cur = Some(rec);
                        return Some(out);
                    }
                }
                None => {
                    self.done = true;
                    if self.cur.is_some() {
                        return Some(self.emit(None));
                    }
                    return None;
                }
            }
        }
    }
}
