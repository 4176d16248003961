use std::cell::RefCell;

use crate::{
    add_column::AddColumn,
    add_context::AddFieldUsingContext,
    add_field::AddField,
    add_field_with::AddFieldWith,
    add_row_numbers::AddRowNumbers,
    convert::{Convert, Replace, Update},
    cut::{Cut, CutOut},
    error::RowResult,
    fields::FieldSpec,
    move_field::MoveField,
    record::Record,
    row_slice::RowSlice,
    skip_comments::SkipComments,
    tail::Tail,
    Row, Value,
};

/// A fresh pull cursor over one table. The first `Ok` item is the header
/// row; every later item is a data row. `Err` items carry in-band errors.
pub type Rows<'a> = Box<dyn Iterator<Item = RowResult> + 'a>;

/// This trait describes the behaviour of every stage in a transformation
/// chain: anything that can produce its rows, header first, as many times
/// as asked.
///
/// Each call to [`rows`](Table::rows) starts an independent iteration that
/// re-reads the current state of the underlying data; nothing is cached on
/// the view between calls, and building a view never touches its sources.
/// Selector problems therefore surface as the first item of an iteration,
/// not at construction.
///
/// Implement this trait to extend `rowviews` with your own transforms.
pub trait Table {
    /// Must yield the header as it is at this point of the chain, then the
    /// data rows, computed freshly for this call.
    fn rows(&self) -> Rows<'_>;

    /// Keeps only the selected columns, in selector order. Selectors may
    /// repeat and reorder source columns; short rows are repaired with the
    /// missing-value sentinel.
    fn cut<I>(self, spec: I) -> Cut<Self>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
    {
        Cut::new(self, spec)
    }

    /// Keeps every column NOT matched by the selection, preserving the
    /// original relative order.
    fn cutout<I>(self, spec: I) -> CutOut<Self>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
    {
        CutOut::new(self, spec)
    }

    /// Adds a column holding the same fixed value on every row.
    fn add_field<N, V>(self, field: N, value: V) -> AddField<Self>
    where
        Self: Sized,
        N: Into<Value>,
        V: Into<Value>,
    {
        AddField::new(self, field, value)
    }

    /// Adds a column computed per row by a closure over the row wrapped as
    /// a [`Record`].
    fn add_field_with<N, F>(self, field: N, f: F) -> AddFieldWith<Self, F>
    where
        Self: Sized,
        N: Into<Value>,
        F: Fn(&Record) -> Value,
    {
        AddFieldWith::new(self, field, f)
    }

    /// Transforms the values under the selected fields with a closure,
    /// leaving the header and all other columns untouched.
    fn convert<I, F>(self, spec: I, f: F) -> Convert<Self, F>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
        F: Fn(&Value) -> Value,
    {
        Convert::new(self, spec, f)
    }

    /// Replaces every occurrence of `from` with `to` under one field.
    fn replace<N, A, B>(self, field: N, from: A, to: B) -> Replace<Self>
    where
        Self: Sized,
        N: Into<FieldSpec>,
        A: Into<Value>,
        B: Into<Value>,
    {
        Replace::new(self, field, from, to)
    }

    /// Overwrites one field with a fixed value on every row.
    fn update<N, V>(self, field: N, value: V) -> Update<Self>
    where
        Self: Sized,
        N: Into<FieldSpec>,
        V: Into<Value>,
    {
        Update::new(self, field, value)
    }

    /// Selects a start/stop/step subsequence of the data rows. The header
    /// always passes through untouched.
    fn row_slice(self, start: usize, stop: Option<usize>, step: usize) -> RowSlice<Self>
    where
        Self: Sized,
    {
        RowSlice::new(self, start, stop, step)
    }

    /// The first `n` data rows.
    fn head(self, n: usize) -> RowSlice<Self>
    where
        Self: Sized,
    {
        self.row_slice(0, Some(n), 1)
    }

    /// The last `n` data rows. Consumes the whole source before yielding.
    fn tail(self, n: usize) -> Tail<Self>
    where
        Self: Sized,
    {
        Tail::new(self, n)
    }

    /// Drops empty rows and any row whose first value is a string starting
    /// with `prefix`. The header is not exempt.
    fn skip_comments(self, prefix: &str) -> SkipComments<Self>
    where
        Self: Sized,
    {
        SkipComments::new(self, prefix)
    }

    /// Moves the named field to a new header position.
    fn move_field<N>(self, field: N, index: usize) -> MoveField<Self>
    where
        Self: Sized,
        N: Into<Value>,
    {
        MoveField::new(self, field, index)
    }

    /// Prepends a `row` field numbering the data rows `start`,
    /// `start + step`, ...
    fn add_row_numbers(self, start: i64, step: i64) -> AddRowNumbers<Self>
    where
        Self: Sized,
    {
        AddRowNumbers::new(self, start, step)
    }

    /// Adds a column from an externally supplied vector of values, paired
    /// with the data rows by position.
    fn add_column<N>(self, field: N, values: Vec<Value>) -> AddColumn<Self>
    where
        Self: Sized,
        N: Into<Value>,
    {
        AddColumn::new(self, field, values)
    }

    /// Adds a column computed from a one-row window around each row: the
    /// closure sees the previous record (`None` on the first row), the
    /// current record and the next record (`None` on the last row).
    fn add_field_using_context<N, F>(self, field: N, query: F) -> AddFieldUsingContext<Self, F>
    where
        Self: Sized,
        N: Into<Value>,
        F: Fn(Option<&Record>, &Record, Option<&Record>) -> Value,
    {
        AddFieldUsingContext::new(self, field, query)
    }
}

/// The plain in-memory table: a vec of rows, first row the header. Each
/// iteration clones rows lazily, so re-iterating reflects the vec as it is
/// now, not as it was.
impl Table for Vec<Row> {
    fn rows(&self) -> Rows<'_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}

/// A mutable in-memory table. Each iteration snapshots the current
/// contents, so a view over it observes mutations made between two of its
/// own iterations.
impl Table for RefCell<Vec<Row>> {
    fn rows(&self) -> Rows<'_> {
        Box::new(self.borrow().clone().into_iter().map(Ok))
    }
}

impl<T: Table + ?Sized> Table for &T {
    fn rows(&self) -> Rows<'_> {
        (**self).rows()
    }
}

impl<'t> Table for Box<dyn Table + 't> {
    fn rows(&self) -> Rows<'_> {
        (**self).rows()
    }
}
