//! Strips comment rows by prefix.
use crate::{Rows, Table, Value};

/// Drops every row whose first value is a string starting with the given
/// prefix, and every empty row. The header is not exempt: if it looks like
/// a comment it is dropped too, and the next surviving row becomes the
/// header. A non-string first value never counts as a comment.
pub struct SkipComments<T> {
    source: T,
    prefix: String,
}

impl<T> SkipComments<T>
where
    T: Table,
{
    pub fn new(source: T, prefix: &str) -> SkipComments<T> {
        SkipComments {
            source,
            prefix: prefix.to_string(),
        }
    }
}

impl<T> Table for SkipComments<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        let prefix = &self.prefix;
        Box::new(self.source.rows().filter(move |result| match result {
            Ok(row) => match row.first() {
                None => false,
                Some(Value::Str(s)) => !s.starts_with(prefix.as_str()),
                Some(_) => true,
            },
            Err(_) => true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::{row, Row, Table};

    #[test]
    fn test_skip_comments() {
        let table = vec![
            row!["##aaa", "bbb", "ccc"],
            row!["##mmm"],
            row!["#foo", "bar"],
            row!["##nnn", 1],
            row!["a", 1],
            row!["b", 2],
        ];

        let out = table.skip_comments("##");
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        // the original header was itself a comment; '#foo' survives as the
        // new header since a single '#' does not match the prefix
        assert_eq!(
            rows,
            vec![row!["#foo", "bar"], row!["a", 1], row!["b", 2]],
        );
    }

    #[test]
    fn test_non_string_first_value_always_passes() {
        let table = vec![row!["foo", "bar"], row![1, "##not a comment"], row![2, "x"]];

        let out = table.skip_comments("##");
        assert_eq!(out.rows().count(), 3);
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let table = vec![row!["foo"], row![], row!["a"], Row::new()];

        let out = table.skip_comments("##");
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows, vec![row!["foo"], row!["a"]]);
    }
}
