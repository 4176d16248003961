//! Injects a column from an externally supplied value sequence.
use crate::{error::RowResult, Row, Rows, Table, Value};

/// Adds a column whose values come from a vector supplied at construction,
/// paired with the data rows by position.
///
/// If the table runs out of rows before the values, a full sentinel row of
/// header width is synthesized to carry each remaining value; if the
/// values run out first, the sentinel is used as the column value for the
/// remaining rows. Rows are expected to be header-length already; this
/// transform does not square its source.
pub struct AddColumn<T> {
    source: T,
    field: Value,
    values: Vec<Value>,
    index: Option<usize>,
    missing: Value,
}

impl<T> AddColumn<T>
where
    T: Table,
{
    pub fn new<N: Into<Value>>(source: T, field: N, values: Vec<Value>) -> AddColumn<T> {
        AddColumn {
            source,
            field: field.into(),
            values,
            index: None,
            missing: Value::Null,
        }
    }

    pub fn with_index(mut self, index: usize) -> AddColumn<T> {
        self.index = Some(index);
        self
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> AddColumn<T> {
        self.missing = missing.into();
        self
    }
}

impl<T> Table for AddColumn<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            field: &self.field,
            values: &self.values,
            index: self.index,
            missing: &self.missing,
            state: None,
            cursor: 0,
            failed: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    field: &'a Value,
    values: &'a [Value],
    index: Option<usize>,
    missing: &'a Value,
    // insertion position and source header width, derived on first pull
    state: Option<(usize, usize)>,
    cursor: usize,
    failed: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (at, width) = match self.state {
            Some(state) => state,
            None => {
                return match self.iter.next()? {
                    Ok(mut fields) => {
                        let at = self.index.unwrap_or(fields.len()).min(fields.len());
                        self.state = Some((at, fields.len()));
                        fields.insert(at, self.field.clone());
                        Some(Ok(fields))
                    }
                    Err(e) => {
                        self.failed = true;
                        Some(Err(e))
                    }
                };
            }
        };

        match self.iter.next() {
            // errors pass through without consuming a value
            Some(Err(e)) => Some(Err(e)),
            Some(Ok(mut row)) => {
                let value = match self.values.get(self.cursor) {
                    Some(v) => v.clone(),
                    None => self.missing.clone(),
                };
                self.cursor += 1;
                let at = at.min(row.len());
                row.insert(at, value);
                Some(Ok(row))
            }
            None => {
                // rows exhausted; synthesize sentinel rows for the values left
                let value = self.values.get(self.cursor)?.clone();
                self.cursor += 1;
                let mut row: Row = std::iter::repeat(self.missing.clone()).take(width).collect();
                let at = at.min(row.len());
                row.insert(at, value);
                Some(Ok(row))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{mock::MockTable, row, Error, Row, Table, Value};

    #[test]
    fn test_add_column() {
        let table = vec![row!["foo", "bar"], row!["A", 1], row!["B", 2]];

        let out = table.add_column("baz", row![true, false]);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(
            rows,
            vec![
                row!["foo", "bar", "baz"],
                row!["A", 1, true],
                row!["B", 2, false],
            ],
        );
    }

    #[test]
    fn test_add_column_at_index() {
        let table = vec![row!["foo", "bar"], row!["A", 1]];

        let out = table.add_column("baz", row![9]).with_index(1);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows, vec![row!["foo", "baz", "bar"], row!["A", 9, 1]]);
    }

    #[test]
    fn test_values_shorter_than_table() {
        let table = vec![row!["foo"], row!["A"], row!["B"]];

        let out = table.add_column("baz", row![1]);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows[1], row!["A", 1]);
        assert_eq!(rows[2], row!["B", Value::Null]);
    }

    #[test]
    fn test_errors_dont_consume_values() {
        let table = MockTable::new(vec![
            Ok(row!["foo"]),
            Ok(row!["A"]),
            Err(Error::Transform("boom".to_string())),
            Ok(row!["B"]),
        ]);

        let out = table.add_column("baz", row![1, 2]);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "baz"]);
        assert_eq!(it.next().unwrap().unwrap(), row!["A", 1]);
        match it.next() {
            Some(Err(Error::Transform(_))) => {}
            _ => unreachable!(),
        }
        assert_eq!(it.next().unwrap().unwrap(), row!["B", 2]);
        assert!(it.next().is_none());
    }

    #[test]
    fn test_values_longer_than_table() {
        let table = vec![row!["foo", "bar"], row!["A", 1]];

        let out = table.add_column("baz", row![true, false, true]);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows[1], row!["A", 1, true]);
        // synthesized sentinel rows carry the surplus values
        assert_eq!(rows[2], row![Value::Null, Value::Null, false]);
        assert_eq!(rows[3], row![Value::Null, Value::Null, true]);
        assert_eq!(rows.len(), 4);
    }
}
