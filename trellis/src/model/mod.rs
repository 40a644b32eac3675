//! Data model: values, rows, columns.

mod column;
mod row;
mod value;

pub use column::{Column, CellType, DEFAULT_COLUMN_WIDTH, SELECT_COLUMN_ID};
pub use row::{materialize, Row, RowData, RowId};
pub use value::{compare, Value};
