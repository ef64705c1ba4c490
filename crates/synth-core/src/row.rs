//! Flat row representation of a record.
//!
//! Tabular exporters consume [`FlatRow`] rather than walking the record tree.
//! Column order is fixed by [`crate::Record::to_flat_row`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single cell of a flat row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Int(i64),
    Text(String),
    Null,
}

impl FlatValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text cell, or `Null` when the value is absent.
    pub fn optional_text(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::Text(v.to_string()),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Int(i) => write!(f, "{i}"),
            FlatValue::Text(s) => f.write_str(s),
            FlatValue::Null => Ok(()),
        }
    }
}

/// Flat projection of a record: the identifier plus ordered named cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub id: Uuid,
    pub fields: Vec<(&'static str, FlatValue)>,
}

impl FlatRow {
    pub fn new(id: Uuid, fields: Vec<(&'static str, FlatValue)>) -> Self {
        Self { id, fields }
    }

    /// Look up a cell by column name.
    pub fn get(&self, name: &str) -> Option<&FlatValue> {
        self.fields
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }

    /// Column names, starting with `id`.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names = vec!["id"];
        names.extend(self.fields.iter().map(|(name, _)| *name));
        names
    }

    /// Cell values rendered as strings, in column order (`Null` renders empty).
    pub fn to_strings(&self) -> Vec<String> {
        let mut values = vec![self.id.to_string()];
        values.extend(self.fields.iter().map(|(_, value)| value.to_string()));
        values
    }
}
