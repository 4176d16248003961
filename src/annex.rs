//! Row-order join of tables.
use std::iter::Fuse;

use crate::{error::RowResult, fields::square, Row, Rows, Table, Value};

/// Joins two or more tables by row order.
pub fn annex<T: Table>(sources: Vec<T>) -> Annex<T> {
    Annex::new(sources)
}

/// The view behind [`annex`]: a structural, positional join.
///
/// The output header is the concatenation of all source headers, each
/// contributing its full header as a contiguous block (duplicate names
/// across sources are kept, not merged). The Nth output row pairs the Nth
/// row of every source; a source that has run out contributes a block of
/// sentinels. Present rows are squared to their own source's header width:
/// short rows padded, long rows truncated. This positional repair is
/// deliberately different from [`cat`](crate::cat)'s name-keyed fill.
pub struct Annex<T> {
    sources: Vec<T>,
    missing: Value,
}

impl<T> Annex<T>
where
    T: Table,
{
    pub fn new(sources: Vec<T>) -> Annex<T> {
        Annex {
            sources,
            missing: Value::Null,
        }
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> Annex<T> {
        self.missing = missing.into();
        self
    }
}

impl<T> Table for Annex<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            its: self.sources.iter().map(|s| s.rows().fuse()).collect(),
            missing: &self.missing,
            widths: Vec::new(),
            started: false,
            failed: false,
            pending: None,
        })
    }
}

struct Iter<'a> {
    its: Vec<Fuse<Rows<'a>>>,
    missing: &'a Value,
    widths: Vec<usize>,
    started: bool,
    failed: bool,
    // a partially assembled output step, kept across an in-band error so
    // the rows already pulled from earlier sources are not lost
    pending: Option<Pending>,
}

struct Pending {
    outrow: Row,
    next_source: usize,
    any: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if !self.started {
            let mut header = Row::new();
            for it in self.its.iter_mut() {
                match it.next() {
                    Some(Ok(fields)) => {
                        self.widths.push(fields.len());
                        header.extend(fields);
                    }
                    Some(Err(e)) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                    None => self.widths.push(0),
                }
            }
            self.started = true;
            return Some(Ok(header));
        }

        let mut step = self.pending.take().unwrap_or(Pending {
            outrow: Row::new(),
            next_source: 0,
            any: false,
        });

        while step.next_source < self.its.len() {
            let i = step.next_source;
            match self.its[i].next() {
                Some(Ok(row)) => {
                    step.any = true;
                    step.outrow.extend(square(row, self.widths[i], self.missing));
                    step.next_source += 1;
                }
                // emit the error and resume this same step on the next
                // call; the errored source still owes its row
                Some(Err(e)) => {
                    self.pending = Some(step);
                    return Some(Err(e));
                }
                None => {
                    for _ in 0..self.widths[i] {
                        step.outrow.push(self.missing.clone());
                    }
                    step.next_source += 1;
                }
            }
        }

        if step.any {
            Some(Ok(step.outrow))
        } else {
            None
        }
    }
}
