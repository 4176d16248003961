//! Name-and-position addressable row wrapper handed to user callables.
use std::collections::HashMap;
use std::ops::Index;
use std::rc::Rc;

use crate::{Row, Value};

/// A structure keeping the relationship between header labels and their
/// positions. Built once per iteration and shared by every [`Record`] of
/// that iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIndex {
    indexes: HashMap<String, usize>,
    names: Row,
}

impl FieldIndex {
    pub fn from_row(row: Row) -> FieldIndex {
        let mut indexes = HashMap::new();

        for (index, entry) in row.iter().enumerate() {
            if let Value::Str(name) = entry {
                // first occurrence wins among duplicate labels
                indexes.entry(name.clone()).or_insert(index);
            }
        }

        FieldIndex {
            indexes,
            names: row,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_row(&self) -> &Row {
        &self.names
    }

    pub fn get(&self, field: &str) -> Option<usize> {
        self.indexes.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }
}

/// One data row paired with its field index, so user callables can read
/// values by name or by position.
///
/// `get` and `value` return `None` for unknown names and for positions a
/// short row does not cover; the `Index` impls panic instead, for terse
/// closures where absence is a caller logic defect.
#[derive(Debug, Clone)]
pub struct Record {
    values: Row,
    fields: Rc<FieldIndex>,
}

impl Record {
    pub fn new(values: Row, fields: Rc<FieldIndex>) -> Record {
        Record { values, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).and_then(|i| self.values.get(i))
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_row(&self) -> &Row {
        &self.values
    }

    pub fn into_row(self) -> Row {
        self.values
    }
}

impl Index<usize> for Record {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl Index<&str> for Record {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        match self.get(field) {
            Some(v) => v,
            None => panic!("no value for field: {}", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{FieldIndex, Record};
    use crate::{row, Value};

    #[test]
    fn test_field_index() {
        let fields = FieldIndex::from_row(row!["foo", "bar"]);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("bar"), Some(1));
        assert_eq!(fields.get("baz"), None);
        assert!(fields.contains("foo"));
    }

    #[test]
    fn test_field_index_duplicates() {
        let fields = FieldIndex::from_row(row!["a", "b", "a"]);

        assert_eq!(fields.get("a"), Some(0));
    }

    #[test]
    fn test_record_access() {
        let fields = Rc::new(FieldIndex::from_row(row!["foo", "bar"]));
        let rec = Record::new(row!["A", 9], fields);

        assert_eq!(rec.get("bar"), Some(&Value::Int(9)));
        assert_eq!(rec.value(0), Some(&Value::Str("A".to_string())));
        assert_eq!(rec["foo"], Value::Str("A".to_string()));
        assert_eq!(rec[1], Value::Int(9));
    }

    #[test]
    fn test_record_short_row() {
        let fields = Rc::new(FieldIndex::from_row(row!["foo", "bar"]));
        let rec = Record::new(row!["A"], fields);

        assert_eq!(rec.get("bar"), None);
    }
}
