//! Per-field value conversion.
use crate::{
    error::RowResult,
    fields::{resolve_indices, FieldSpec},
    Rows, Table, Value,
};

/// Transforms the values under the selected fields with a closure. The
/// header and every unselected column pass through untouched.
///
/// The selection is resolved against the source header once per
/// iteration. A row too short to reach a selected position is left as it
/// is; conversion only applies where a value actually exists.
pub struct Convert<T, F> {
    source: T,
    spec: Vec<FieldSpec>,
    f: F,
}

impl<T, F> Convert<T, F>
where
    T: Table,
    F: Fn(&Value) -> Value,
{
    pub fn new<I>(source: T, spec: I, f: F) -> Convert<T, F>
    where
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
    {
        Convert {
            source,
            spec: spec.into_iter().map(Into::into).collect(),
            f,
        }
    }
}

impl<T, F> Table for Convert<T, F>
where
    T: Table,
    F: Fn(&Value) -> Value,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            spec: &self.spec,
            mapper: Mapper::With(&self.f),
            indices: None,
            failed: false,
        })
    }
}

/// Replaces every occurrence of one value with another under the given
/// field. A convenience over [`Convert`].
pub struct Replace<T> {
    source: T,
    spec: Vec<FieldSpec>,
    from: Value,
    to: Value,
}

impl<T> Replace<T>
where
    T: Table,
{
    pub fn new<N, A, B>(source: T, field: N, from: A, to: B) -> Replace<T>
    where
        N: Into<FieldSpec>,
        A: Into<Value>,
        B: Into<Value>,
    {
        Replace {
            source,
            spec: vec![field.into()],
            from: from.into(),
            to: to.into(),
        }
    }
}

impl<T> Table for Replace<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            spec: &self.spec,
            mapper: Mapper::Replace {
                from: &self.from,
                to: &self.to,
            },
            indices: None,
            failed: false,
        })
    }
}

/// Overwrites the given field with a fixed value on every row. A
/// convenience over [`Convert`].
pub struct Update<T> {
    source: T,
    spec: Vec<FieldSpec>,
    value: Value,
}

impl<T> Update<T>
where
    T: Table,
{
    pub fn new<N, V>(source: T, field: N, value: V) -> Update<T>
    where
        N: Into<FieldSpec>,
        V: Into<Value>,
    {
        Update {
            source,
            spec: vec![field.into()],
            value: value.into(),
        }
    }
}

impl<T> Table for Update<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            spec: &self.spec,
            mapper: Mapper::Update(&self.value),
            indices: None,
            failed: false,
        })
    }
}

enum Mapper<'a> {
    With(&'a dyn Fn(&Value) -> Value),
    Replace { from: &'a Value, to: &'a Value },
    Update(&'a Value),
}

impl<'a> Mapper<'a> {
    fn apply(&self, v: &Value) -> Value {
        match self {
            Mapper::With(f) => f(v),
            Mapper::Replace { from, to } => {
                if v == *from {
                    (*to).clone()
                } else {
                    v.clone()
                }
            }
            Mapper::Update(value) => (*value).clone(),
        }
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    spec: &'a [FieldSpec],
    mapper: Mapper<'a>,
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
                Ok(mut row) => {
                    for &i in indices {
                        if i < row.len() {
                            let v = self.mapper.apply(&row[i]);
                            row[i] = v;
                        }
                    }
                    Some(Ok(row))
                }
                Err(e) => Some(Err(e)),
            };
        }

        let fields = match self.iter.next()? {
            Ok(fields) => fields,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        match resolve_indices(&fields, self.spec) {
            Ok(indices) => {
                self.indices = Some(indices);
                // the header itself is never converted
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
    use crate::{fields, mock::MockTable, row, Error, Row, Table, Value};

    fn sample() -> Vec<Row> {
        vec![
            row!["foo", "bar", "baz"],
            row!["A", 2.4, 12],
            row!["B", 5.7, 34],
            row!["C", 1.2, 56],
        ]
    }

    fn double(v: &Value) -> Value {
        match v.as_int() {
            Some(n) => Value::from(n * 2),
            None => v.clone(),
        }
    }

    #[test]
    fn test_convert_single_field() {
        let out = sample().convert(fields!["baz"], double);
        let mut it = out.rows();

        // header untouched
        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar", "baz"]);
        assert_eq!(it.next().unwrap().unwrap(), row!["A", 2.4, 24]);
        assert_eq!(it.next().unwrap().unwrap(), row!["B", 5.7, 68]);
        assert_eq!(it.next().unwrap().unwrap(), row!["C", 1.2, 112]);
    }

    #[test]
    fn test_convert_multiple_fields() {
        fn stringify(v: &Value) -> Value {
            Value::from(v.to_string())
        }

        let out = sample().convert(fields!["bar", "baz"], stringify);
        let mut it = out.rows();

        it.next();
        assert_eq!(it.next().unwrap().unwrap(), row!["A", "2.4", "12"]);
    }

    #[test]
    fn test_convert_by_position() {
        let out = sample().convert(fields![2], double);
        let mut it = out.rows();

        it.next();
        assert_eq!(it.next().unwrap().unwrap(), row!["A", 2.4, 24]);
    }

    #[test]
    fn test_convert_leaves_short_rows_alone() {
        let table = vec![row!["foo", "bar"], row!["A", 1], row!["B"]];

        let out = table.convert(fields!["bar"], double);
        let mut it = out.rows();

        it.next();
        assert_eq!(it.next().unwrap().unwrap(), row!["A", 2]);
        // no value under bar, nothing to convert, row stays short
        assert_eq!(it.next().unwrap().unwrap(), row!["B"]);
    }

    #[test]
    fn test_convert_unknown_field_fails_at_iteration() {
        let out = sample().convert(fields!["quux"], double);

        let mut it = out.rows();
        match it.next() {
            Some(Err(Error::FieldNotFound(name))) => assert_eq!(name, "quux"),
            _ => unreachable!(),
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn test_convert_doesnt_swallow_errors() {
        let table = MockTable::new(vec![
            Ok(row!["foo"]),
            Ok(row![1]),
            Err(Error::Transform("boom".to_string())),
            Ok(row![2]),
        ]);

        let out = table.convert(fields!["foo"], double);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo"]);
        assert_eq!(it.next().unwrap().unwrap(), row![2]);
        match it.next() {
            Some(Err(Error::Transform(_))) => {}
            _ => unreachable!(),
        }
        assert_eq!(it.next().unwrap().unwrap(), row![4]);
    }

    #[test]
    fn test_replace() {
        let table = vec![row!["foo", "bar"], row!["M", 12], row!["-", 56]];

        let out = table.replace("foo", "-", "NA");
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar"]);
        assert_eq!(it.next().unwrap().unwrap(), row!["M", 12]);
        assert_eq!(it.next().unwrap().unwrap(), row!["NA", 56]);
    }

    #[test]
    fn test_replace_only_touches_its_field() {
        let table = vec![row!["foo", "bar"], row!["-", "-"]];

        let out = table.replace("bar", "-", "NA");
        let mut it = out.rows();

        it.next();
        assert_eq!(it.next().unwrap().unwrap(), row!["-", "NA"]);
    }

    #[test]
    fn test_update() {
        let table = vec![row!["foo", "bar"], row!["M", 12], row!["F", 34]];

        let out = table.update("bar", 0);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar"]);
        assert_eq!(it.next().unwrap().unwrap(), row!["M", 0]);
        assert_eq!(it.next().unwrap().unwrap(), row!["F", 0]);
    }
}
