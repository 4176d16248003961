//! Numbers the data rows.
use crate::{error::RowResult, Row, Rows, Table, Value};

/// Prepends a `row` field whose value for the k-th data row (0-based) is
/// `start + k * step`. The existing field order is preserved after the new
/// leading column. Upstream errors pass through without consuming a
/// number.
pub struct AddRowNumbers<T> {
    source: T,
    start: i64,
    step: i64,
}

impl<T> AddRowNumbers<T>
where
    T: Table,
{
    pub fn new(source: T, start: i64, step: i64) -> AddRowNumbers<T> {
        AddRowNumbers {
            source,
            start,
            step,
        }
    }
}

impl<T> Table for AddRowNumbers<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            next_number: self.start,
            step: self.step,
            header_done: false,
            failed: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    next_number: i64,
    step: i64,
    header_done: bool,
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
                Ok(fields) => {
                    let mut header = Row::with_capacity(fields.len() + 1);
                    header.push(Value::from("row"));
                    header.extend(fields);
                    Some(Ok(header))
                }
                Err(e) => {
                    self.failed = true;
                    Some(Err(e))
                }
            };
        }

        match self.iter.next()? {
            Ok(row) => {
                let mut outrow = Row::with_capacity(row.len() + 1);
                outrow.push(Value::Int(self.next_number));
                outrow.extend(row);
                self.next_number += self.step;
                Some(Ok(outrow))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{mock::MockTable, row, Error, Row, Table};

    #[test]
    fn test_add_row_numbers() {
        let table = vec![row!["foo", "bar"], row!["A", 9], row!["C", 2], row!["F", 1]];

        let out = table.add_row_numbers(1, 1);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(
            rows,
            vec![
                row!["row", "foo", "bar"],
                row![1, "A", 9],
                row![2, "C", 2],
                row![3, "F", 1],
            ],
        );
    }

    #[test]
    fn test_add_row_numbers_start_and_step() {
        let table = vec![row!["foo"], row!["a"], row!["b"]];

        let out = table.add_row_numbers(10, 5);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows[1], row![10, "a"]);
        assert_eq!(rows[2], row![15, "b"]);
    }

    #[test]
    fn test_errors_dont_consume_numbers() {
        let table = MockTable::new(vec![
            Ok(row!["foo"]),
            Ok(row!["a"]),
            Err(Error::Transform("boom".to_string())),
            Ok(row!["b"]),
        ]);

        let out = table.add_row_numbers(1, 1);
        let mut it = out.rows();

        it.next();
        assert_eq!(it.next().unwrap().unwrap(), row![1, "a"]);
        assert!(it.next().unwrap().is_err());
        assert_eq!(it.next().unwrap().unwrap(), row![2, "b"]);
    }
}
