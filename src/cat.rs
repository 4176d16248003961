//! Concatenation of tables with header reconciliation.
use crate::{error::RowResult, Row, Rows, Table, Value};

/// Concatenates one or more tables, reconciling their headers.
pub fn cat<T: Table>(sources: Vec<T>) -> Cat<T> {
    Cat::new(sources)
}

/// The view behind [`cat`].
///
/// The output header is the union of all source headers in first-seen
/// order, or a verbatim override set with [`with_header`](Cat::with_header).
/// Each output cell is filled by name from the matching source column, or
/// with the missing-value sentinel when the source has no such column or
/// the row is too short. Source columns absent from the output header are
/// dropped, which also silently drops unnamed trailing values of long rows.
///
/// With a single source this squares every row to the header width.
pub struct Cat<T> {
    sources: Vec<T>,
    header: Option<Row>,
    missing: Value,
}

impl<T> Cat<T>
where
    T: Table,
{
    pub fn new(sources: Vec<T>) -> Cat<T> {
        Cat {
            sources,
            header: None,
            missing: Value::Null,
        }
    }

    /// Fixes the output header instead of deriving the union.
    pub fn with_header(mut self, header: Row) -> Cat<T> {
        self.header = Some(header);
        self
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> Cat<T> {
        self.missing = missing.into();
        self
    }
}

impl<T> Table for Cat<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            its: self.sources.iter().map(|s| s.rows()).collect(),
            header: self.header.as_ref(),
            missing: &self.missing,
            fields: Vec::new(),
            outflds: Row::new(),
            mapping: Vec::new(),
            current: 0,
            started: false,
            failed: false,
        })
    }
}

struct Iter<'a> {
    its: Vec<Rows<'a>>,
    header: Option<&'a Row>,
    missing: &'a Value,
    fields: Vec<Row>,
    outflds: Row,
    mapping: Vec<Option<usize>>,
    current: usize,
    started: bool,
    failed: bool,
}

impl<'a> Iter<'a> {
    /// Column mapping for one source: output position -> source position,
    /// keyed by field name, first occurrence wins.
    fn mapping_for(&self, source: usize) -> Vec<Option<usize>> {
        let fields = &self.fields[source];
        self.outflds
            .iter()
            .map(|f| fields.iter().position(|g| g == f))
            .collect()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if !self.started {
            // gather every source header before the first output row
            for it in self.its.iter_mut() {
                match it.next() {
                    Some(Ok(fields)) => self.fields.push(fields),
                    Some(Err(e)) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                    // an empty source contributes no fields and no rows
                    None => self.fields.push(Row::new()),
                }
            }

            self.outflds = match self.header {
                Some(header) => header.clone(),
                None => {
                    let mut outflds = Row::new();
                    for fields in &self.fields {
                        for f in fields {
                            if !outflds.contains(f) {
                                outflds.push(f.clone());
                            }
                        }
                    }
                    outflds
                }
            };

            self.started = true;
            if !self.its.is_empty() {
                self.mapping = self.mapping_for(0);
            }
            return Some(Ok(self.outflds.clone()));
        }

        loop {
            if self.current >= self.its.len() {
                return None;
            }

            match self.its[self.current].next() {
                Some(Ok(row)) => {
                    let outrow = self
                        .mapping
                        .iter()
                        .map(|m| match m {
                            Some(i) if *i < row.len() => row[*i].clone(),
                            _ => self.missing.clone(),
                        })
                        .collect();
                    return Some(Ok(outrow));
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.current += 1;
                    if self.current < self.its.len() {
                        self.mapping = self.mapping_for(self.current);
                    }
                }
            }
        }
    }
}
