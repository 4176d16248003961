//! Adds a column holding a fixed value.
use crate::{cat::Cat, error::RowResult, Rows, Table, Value};

/// Adds a field with the same fixed value on every row, at an optional
/// insertion position (default: appended).
///
/// The source is first squared through the single-table [`Cat`] policy so
/// every row is exactly header-length before insertion.
pub struct AddField<T> {
    source: Cat<T>,
    field: Value,
    value: Value,
    index: Option<usize>,
}

impl<T> AddField<T>
where
    T: Table,
{
    pub fn new<N, V>(source: T, field: N, value: V) -> AddField<T>
    where
        N: Into<Value>,
        V: Into<Value>,
    {
        AddField {
            source: Cat::new(vec![source]),
            field: field.into(),
            value: value.into(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> AddField<T> {
        self.index = Some(index);
        self
    }

    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> AddField<T> {
        self.source = self.source.with_missing(missing);
        self
    }
}

impl<T> Table for AddField<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            field: &self.field,
            value: &self.value,
            index: self.index,
            insert_at: None,
            failed: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    field: &'a Value,
    value: &'a Value,
    index: Option<usize>,
    insert_at: Option<usize>,
    failed: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(at) = self.insert_at {
            return match self.iter.next()? {
                Ok(mut row) => {
                    let at = at.min(row.len());
                    row.insert(at, self.value.clone());
                    Some(Ok(row))
                }
                Err(e) => Some(Err(e)),
            };
        }

        match self.iter.next()? {
            Ok(mut fields) => {
                let at = self.index.unwrap_or(fields.len()).min(fields.len());
                self.insert_at = Some(at);
                fields.insert(at, self.field.clone());
                Some(Ok(fields))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{row, Table, Value};

    #[test]
    fn test_add_field_fixed_value() {
        let table = vec![row!["foo", "bar"], row!["M", 12], row!["F", 34]];

        let out = table.add_field("baz", 42);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar", "baz"]);
        assert_eq!(it.next().unwrap().unwrap(), row!["M", 12, 42]);
        assert_eq!(it.next().unwrap().unwrap(), row!["F", 34, 42]);
    }

    #[test]
    fn test_add_field_at_index() {
        let table = vec![row!["foo", "bar"], row!["M", 12]];

        let out = table.add_field("baz", 42).with_index(0);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["baz", "foo", "bar"]);
        assert_eq!(it.next().unwrap().unwrap(), row![42, "M", 12]);
    }

    #[test]
    fn test_add_field_squares_ragged_rows_first() {
        let table = vec![row!["foo", "bar"], row!["M"], row!["F", 34, true]];

        let out = table.add_field("baz", 0);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar", "baz"]);
        assert_eq!(it.next().unwrap().unwrap(), row!["M", Value::Null, 0]);
        assert_eq!(it.next().unwrap().unwrap(), row!["F", 34, 0]);
    }
}
