//! Table entity - ordered columns plus key membership
//!
//! A table is created once when its `CREATE TABLE` block is parsed and
//! afterwards only mutated by `ALTER TABLE` application (adding keys).
//! Column order is the order the parser encountered them, which may
//! differ from declaration order when a constraint clause names a column
//! before its declaration line.

use crate::column::Column;
use crate::thesaurus::Equivalence;
use serde::{Deserialize, Serialize};

/// A foreign-key triple: local column, referenced table, referenced column.
///
/// Recorded exactly as written - the referenced table/column may not exist
/// in the registry at parse time (forward references are never resolved
/// eagerly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Local column name
    pub column: String,
    /// Referenced table name
    pub references_table: String,
    /// Referenced column name
    pub references_column: String,
}

impl ForeignKey {
    /// Create a new foreign-key triple
    pub fn new(
        column: impl Into<String>,
        references_table: impl Into<String>,
        references_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            references_table: references_table.into(),
            references_column: references_column.into(),
        }
    }
}

impl std::fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}.{}",
            self.column, self.references_table, self.references_column
        )
    }
}

/// A table in the parsed schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table name from the `CREATE TABLE` header line
    pub name: String,
    /// Alternate names for the table name
    pub equivalences: Vec<Equivalence>,
    columns: Vec<Column>,
    primary_keys: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered columns, insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether a column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column. First writer wins: a column whose name is already
    /// present is dropped rather than duplicated or overwritten.
    pub fn add_column(&mut self, mut column: Column) {
        if self.has_column(&column.name) {
            return;
        }
        column.is_primary = self.primary_keys.contains(&column.name);
        column.is_foreign = self.foreign_keys.iter().any(|fk| fk.column == column.name);
        self.columns.push(column);
    }

    /// Primary-key column names, insertion order (composite keys keep the
    /// order the constraint listed them)
    pub fn primary_key_names(&self) -> &[String] {
        &self.primary_keys
    }

    /// Primary-key columns that exist in the column list
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.primary_keys
            .iter()
            .filter_map(|name| self.column(name))
            .collect()
    }

    /// Record primary-key membership for a column name. Set semantics:
    /// re-adding an existing member is a no-op.
    pub fn add_primary_key(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(column) = self.columns.iter_mut().find(|c| c.name == name) {
            column.is_primary = true;
        }
        if !self.primary_keys.contains(&name) {
            self.primary_keys.push(name);
        }
    }

    /// Foreign-key triples in the order they were recorded
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Local column names of the foreign keys
    pub fn foreign_key_names(&self) -> Vec<&str> {
        self.foreign_keys
            .iter()
            .map(|fk| fk.column.as_str())
            .collect()
    }

    /// Append a foreign-key triple
    pub fn add_foreign_key(&mut self, foreign_key: ForeignKey) {
        if let Some(column) = self
            .columns
            .iter_mut()
            .find(|c| c.name == foreign_key.column)
        {
            column.is_foreign = true;
        }
        self.foreign_keys.push(foreign_key);
    }
}
