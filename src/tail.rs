//! The last n data rows of a table.
use std::collections::VecDeque;

use crate::{error::RowResult, Row, Rows, Table};

/// Retains exactly the last `n` data rows without knowing the row count in
/// advance: a bounded deque evicts the oldest row whenever it grows past
/// capacity, so the source is consumed in full before any data row comes
/// out. Upstream errors are emitted as soon as they are seen rather than
/// buffered, so eviction can never drop one.
pub struct Tail<T> {
    source: T,
    n: usize,
}

impl<T> Tail<T>
where
    T: Table,
{
    pub fn new(source: T, n: usize) -> Tail<T> {
        Tail { source, n }
    }
}

impl<T> Table for Tail<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            n: self.n,
            cache: VecDeque::new(),
            header_done: false,
            buffered: false,
            failed: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    n: usize,
    cache: VecDeque<Row>,
    header_done: bool,
    buffered: bool,
    failed: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if !self.header_done {
            self.header_done = true;
            return match self.iter.next()? {
                Ok(fields) => Some(Ok(fields)),
                Err(e) => {
                    self.failed = true;
                    Some(Err(e))
                }
            };
        }

        while !self.buffered {
            match self.iter.next() {
                Some(Ok(row)) => {
                    self.cache.push_back(row);
                    if self.cache.len() > self.n {
                        self.cache.pop_front();
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => self.buffered = true,
            }
        }

        self.cache.pop_front().map(Ok)
    }
}
