//! Start/stop/step windowing over data rows.
use crate::{
    error::{Error, RowResult},
    Rows, Table,
};

/// Selects a start/stop/step subsequence of the data rows. The header
/// passes through unconditionally and the slice positions count data rows
/// only. A zero step is a configuration error, surfaced at iteration.
pub struct RowSlice<T> {
    source: T,
    start: usize,
    stop: Option<usize>,
    step: usize,
}

impl<T> RowSlice<T>
where
    T: Table,
{
    pub fn new(source: T, start: usize, stop: Option<usize>, step: usize) -> RowSlice<T> {
        RowSlice {
            source,
            start,
            stop,
            step,
        }
    }
}

impl<T> Table for RowSlice<T>
where
    T: Table,
{
    fn rows(&self) -> Rows<'_> {
        Box::new(Iter {
            iter: self.source.rows(),
            start: self.start,
            stop: self.stop,
            step: self.step,
            pos: 0,
            header_done: false,
            done: false,
        })
    }
}

struct Iter<'a> {
    iter: Rows<'a>,
    start: usize,
    stop: Option<usize>,
    step: usize,
    pos: usize,
    header_done: bool,
    done: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.header_done {
            self.header_done = true;
            return match self.iter.next()? {
                Ok(fields) => Some(Ok(fields)),
                Err(e) => {
                    self.done = true;
                    Some(Err(e))
                }
            };
        }

        if self.step == 0 {
            self.done = true;
            return Some(Err(Error::Transform(
                "row_slice step must be positive".to_string(),
            )));
        }

        loop {
            if let Some(stop) = self.stop {
                if self.pos >= stop {
                    self.done = true;
                    return None;
                }
            }

            match self.iter.next()? {
                // errors pass through without taking up a slice position
                Err(e) => return Some(Err(e)),
                Ok(row) => {
                    let pos = self.pos;
                    self.pos += 1;
                    if pos >= self.start && (pos - self.start) % self.step == 0 {
                        return Some(Ok(row));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{mock::MockTable, row, Error, Row, Table};

    fn sample() -> Vec<Row> {
        vec![
            row!["foo", "bar"],
            row!["a", 1],
            row!["b", 2],
            row!["c", 5],
            row!["d", 7],
            row!["f", 42],
        ]
    }

    #[test]
    fn test_stop_only() {
        let out = sample().row_slice(0, Some(2), 1);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows, vec![row!["foo", "bar"], row!["a", 1], row!["b", 2]]);
    }

    #[test]
    fn test_start_and_stop() {
        let out = sample().row_slice(1, Some(4), 1);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(
            rows,
            vec![row!["foo", "bar"], row!["b", 2], row!["c", 5], row!["d", 7]],
        );
    }

    #[test]
    fn test_step() {
        let out = sample().row_slice(0, Some(5), 2);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(
            rows,
            vec![row!["foo", "bar"], row!["a", 1], row!["c", 5], row!["f", 42]],
        );
    }

    #[test]
    fn test_head() {
        let out = sample().head(4);
        let rows: Vec<Row> = out.rows().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 5); // header + 4
        assert_eq!(rows[4], row!["d", 7]);
    }

    #[test]
    fn test_head_is_idempotent() {
        let once: Vec<Row> = sample().head(3).rows().map(|r| r.unwrap()).collect();
        let twice: Vec<Row> = sample()
            .head(3)
            .head(3)
            .rows()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_step_is_config_error() {
        let out = sample().row_slice(0, None, 0);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar"]);
        match it.next() {
            Some(Err(Error::Transform(_))) => {}
            _ => unreachable!(),
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn test_errors_dont_count_as_rows() {
        let table = MockTable::new(vec![
            Ok(row!["foo"]),
            Ok(row![1]),
            Err(Error::Transform("boom".to_string())),
            Ok(row![2]),
            Ok(row![3]),
        ]);

        let out = table.head(2);
        let mut it = out.rows();

        assert_eq!(it.next().unwrap().unwrap(), row!["foo"]);
        assert_eq!(it.next().unwrap().unwrap(), row![1]);
        match it.next() {
            Some(Err(Error::Transform(_))) => {}
            _ => unreachable!(),
        }
        assert_eq!(it.next().unwrap().unwrap(), row![2]);
        assert!(it.next().is_none());
    }
}
