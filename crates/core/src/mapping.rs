//! Board column to database column mapping, and the row mapper built on it.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::item::{BoardItem, ColumnValue};

/// Mapping key that copies the item's own name instead of a column value.
pub const NAME_KEY: &str = "name";

/// Mapping used when no `COLUMN_MAP_PATH` is configured.
pub const DEFAULT_COLUMN_MAP: &[(&str, &str)] = &[
    (NAME_KEY, "item_name"),
    ("color_mksysrr6", "status"),
    ("person", "owner"),
    ("date4", "due_date"),
    ("text", "notes"),
];

/// Ordered `board column id -> database column` pairs.
///
/// Order is preserved so generated INSERT statements are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
}

impl ColumnMapping {
    /// Build from pairs, rejecting blank names and duplicate board columns.
    pub fn new<I, K, V>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (board_col, db_col) in pairs {
            let (board_col, db_col) = (board_col.into(), db_col.into());
            if board_col.trim().is_empty() || db_col.trim().is_empty() {
                return Err(CoreError::Validation(
                    "column mapping entries must not be blank".into(),
                ));
            }
            if entries.iter().any(|(existing, _)| *existing == board_col) {
                return Err(CoreError::Validation(format!(
                    "board column '{board_col}' is mapped more than once"
                )));
            }
            entries.push((board_col, db_col));
        }
        Ok(Self { entries })
    }

    /// Parse a JSON object such as `{"name": "title", "status": "state"}`.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("invalid column map JSON: {e}")))?;
        let object = value.as_object().ok_or_else(|| {
            CoreError::Validation("column map must be a JSON object".into())
        })?;

        let mut pairs = Vec::with_capacity(object.len());
        for (board_col, db_col) in object {
            let db_col = db_col.as_str().ok_or_else(|| {
                CoreError::Validation(format!(
                    "column map value for '{board_col}' must be a string"
                ))
            })?;
            pairs.push((board_col.clone(), db_col.to_owned()));
        }
        Self::new(pairs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(b, d)| (b.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COLUMN_MAP
                .iter()
                .map(|(b, d)| ((*b).to_owned(), (*d).to_owned()))
                .collect(),
        }
    }
}

/// A database row: ordered column names with nullable text values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Option<String>)>,
}

impl Row {
    /// Set a column, replacing any earlier value for the same name.
    pub fn set(&mut self, column: impl Into<String>, value: Option<String>) {
        let column = column.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Option<String>> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.columns.iter().map(|(_, value)| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Map a fetched item to a database row.
///
/// The `name` entry copies the item name. Every other entry takes the matching
/// column value's `text`; missing columns and empty text become NULL.
pub fn build_row(item: &BoardItem, mapping: &ColumnMapping) -> Row {
    let by_id: HashMap<&str, &ColumnValue> = item
        .column_values
        .iter()
        .map(|cv| (cv.id.as_str(), cv))
        .collect();

    let mut row = Row::default();
    for (board_col, db_col) in mapping.iter() {
        let value = if board_col == NAME_KEY {
            item.name.clone()
        } else {
            by_id
                .get(board_col)
                .and_then(|cv| cv.text.as_deref())
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };
        row.set(db_col, value);
    }
    row
}
