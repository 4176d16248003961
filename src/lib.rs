//! Lazy, composable transforms over header-first row tables.
//!
//! A *table* is anything that can produce its rows on demand, first row
//! the header, any number of times. Every transform wraps its source into
//! a new [`Table`] without reading a single row; iteration pulls lazily
//! through the whole chain and re-derives headers from the source's
//! current state each time.
//!
//! ```
//! use rowviews::{cat, row, Table, Value};
//!
//! let t1 = vec![row!["foo", "bar"], row![1, "A"], row![2, "B"]];
//! let t2 = vec![row!["bar", "baz"], row!["C", true], row!["D", false]];
//!
//! let out = cat(vec![t1, t2]);
//! let mut it = out.rows();
//!
//! assert_eq!(it.next().unwrap().unwrap(), row!["foo", "bar", "baz"]);
//! assert_eq!(it.next().unwrap().unwrap(), row![1, "A", Value::Null]);
//! ```

mod add_column;
mod add_context;
mod add_field;
mod add_field_with;
mod add_row_numbers;
mod annex;
mod cat;
mod convert;
mod cut;
mod error;
mod fields;
mod move_field;
mod record;
mod row_slice;
mod skip_comments;
mod table;
mod tail;
mod value;

pub mod mock;

pub use add_column::AddColumn;
pub use add_context::AddFieldUsingContext;
pub use add_field::AddField;
pub use add_field_with::AddFieldWith;
pub use add_row_numbers::AddRowNumbers;
pub use annex::{annex, Annex};
pub use cat::{cat, Cat};
pub use convert::{Convert, Replace, Update};
pub use cut::{Cut, CutOut};
pub use error::{Error, Result, RowResult};
pub use fields::{project, project_or, resolve_indices, square, FieldSpec};
pub use move_field::MoveField;
pub use record::{FieldIndex, Record};
pub use row_slice::RowSlice;
pub use skip_comments::SkipComments;
pub use table::{Rows, Table};
pub use tail::Tail;
pub use value::Value;

/// One row of a table: an ordered list of values. The header is a row
/// whose values are field labels.
pub type Row = Vec<Value>;

/// Builds a [`Row`] from anything convertible into [`Value`]s.
///
/// ```
/// use rowviews::{row, Value};
///
/// assert_eq!(row!["foo", 1, 2.7], vec![
///     Value::Str("foo".to_string()),
///     Value::Int(1),
///     Value::Float(2.7),
/// ]);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($($v:expr),+ $(,)?) => {
        vec![$($crate::Value::from($v)),+]
    };
}

/// Builds a `Vec<FieldSpec>` selection, mixing names and positions.
///
/// ```
/// use rowviews::{fields, FieldSpec, Value};
///
/// assert_eq!(fields!["bar", 0], vec![
///     FieldSpec::Name(Value::Str("bar".to_string())),
///     FieldSpec::Index(0),
/// ]);
/// ```
#[macro_export]
macro_rules! fields {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::FieldSpec::from($v)),*]
    };
}
