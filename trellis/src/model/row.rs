//! Row data: the source forest and the materialized engine row.

use std::collections::HashMap;

use super::column::Column;
use super::value::Value;

/// Stable identifier for a row.
pub type RowId = String;

/// A source row as supplied by the data source.
///
/// The data source owns the forest and replaces it wholesale on
/// refresh; the engine never mutates it. `fields` holds the raw record
/// keyed by field name, `children` the nested rows.
#[derive(Debug, Clone, Default)]
pub struct RowData {
    /// Stable row id.
    pub id: RowId,
    /// Raw record fields.
    pub fields: HashMap<String, Value>,
    /// Nested child rows.
    pub children: Vec<RowData>,
}

impl RowData {
    /// Create a row with the given id and no fields.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Append a child row.
    pub fn child(mut self, child: RowData) -> Self {
        self.children.push(child);
        self
    }
}

/// A materialized engine row.
///
/// `values` is projected from `original` through each column's accessor
/// when the data is materialized, keyed by column id. The flags and
/// `row_index` are derived per recompute cycle and never persisted.
#[derive(Debug, Clone)]
pub struct Row {
    /// Stable row id.
    pub id: RowId,
    /// The raw source record.
    pub original: HashMap<String, Value>,
    /// Cell values keyed by column id.
    pub values: HashMap<String, Value>,
    /// Depth in the forest (0 = root). Rewritten when a row is promoted.
    pub depth: u16,
    /// Child rows. Empty for a leaf.
    pub sub_rows: Vec<Row>,
    /// Position in the flat pre-order sequence of surviving rows.
    pub row_index: usize,
    /// Whether the row is in the current selection set.
    pub is_selected: bool,
    /// Whether the row is the active row.
    pub is_active: bool,
    /// Whether the row is expanded in the display sequence.
    pub is_expanded: bool,
}

impl Row {
    /// Get the cell value for a column id.
    pub fn value(&self, column_id: &str) -> Option<&Value> {
        self.values.get(column_id)
    }

    /// Check if the row has child rows.
    pub fn has_children(&self) -> bool {
        !self.sub_rows.is_empty()
    }
}

/// Materialize a source forest into engine rows.
///
/// Each row's `values` map gets one entry per configured column whose
/// accessor is present in the source record.
pub fn materialize(data: &[RowData], columns: &[Column], depth: u16) -> Vec<Row> {
    data.iter()
        .map(|source| {
            let mut values = HashMap::new();
            for column in columns {
                if let Some(value) = source.fields.get(&column.accessor) {
                    values.insert(column.id.clone(), value.clone());
                }
            }
            Row {
                id: source.id.clone(),
                original: source.fields.clone(),
                values,
                depth,
                sub_rows: materialize(&source.children, columns, depth + 1),
                row_index: 0,
                is_selected: false,
                is_active: false,
                is_expanded: false,
            }
        })
        .collect()
}
