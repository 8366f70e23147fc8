//! Column types - typed view of a parsed column declaration
//!
//! Every declaration fragment is mapped to one of five coarse tags:
//! - `Int`: integer-ish storage (INT, BIGINT, SMALLINT, ...)
//! - `String`: character data (CHAR, VARCHAR, TEXT, ...)
//! - `Date`: temporal data (DATE, DATETIME, ...)
//! - `Double`: floating point
//! - `Unknown`: anything the heuristic cannot place

use crate::thesaurus::Equivalence;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse column type tags.
///
/// Inference is a case-insensitive substring scan over the whole
/// declaration line, so precision, length, and signedness are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Integer storage of any width
    Int,
    /// Character data - CHAR, VARCHAR, TEXT families
    String,
    /// Temporal data
    Date,
    /// Floating point
    Double,
    /// Declaration did not match any known type keyword
    Unknown,
}

impl ColumnType {
    /// Infer a type tag from a raw declaration line.
    ///
    /// First match wins, checked in this order: "int", "char"/"text",
    /// "date", "double". Everything else is [`ColumnType::Unknown`].
    pub fn infer(declaration: &str) -> Self {
        let lower = declaration.to_lowercase();
        if lower.contains("int") {
            ColumnType::Int
        } else if lower.contains("char") || lower.contains("text") {
            ColumnType::String
        } else if lower.contains("date") {
            ColumnType::Date
        } else if lower.contains("double") {
            ColumnType::Double
        } else {
            ColumnType::Unknown
        }
    }

    /// Get the string representation of the type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::String => "string",
            ColumnType::Date => "date",
            ColumnType::Double => "double",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Get all type tags
    pub fn all() -> &'static [ColumnType] {
        &[
            ColumnType::Int,
            ColumnType::String,
            ColumnType::Date,
            ColumnType::Double,
            ColumnType::Unknown,
        ]
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" | "integer" | "bigint" | "smallint" => Ok(ColumnType::Int),
            "string" | "char" | "varchar" | "text" => Ok(ColumnType::String),
            "date" | "datetime" | "timestamp" => Ok(ColumnType::Date),
            "double" | "float" | "real" => Ok(ColumnType::Double),
            "unknown" => Ok(ColumnType::Unknown),
            _ => Err(Error::Parse(format!("Unknown column type: {}", s))),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A column in a parsed table.
///
/// Key membership flags are maintained by the owning [`Table`](crate::Table)
/// as primary/foreign keys are recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within the owning table
    pub name: String,
    /// Inferred coarse type
    pub column_type: ColumnType,
    /// Alternate names: the lowercase name itself plus thesaurus output
    pub equivalences: Vec<Equivalence>,
    /// Member of the owning table's primary key
    pub is_primary: bool,
    /// Local side of one of the owning table's foreign keys
    pub is_foreign: bool,
}

impl Column {
    /// Create a new column with no key membership
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        equivalences: Vec<Equivalence>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            equivalences,
            is_primary: false,
            is_foreign: false,
        }
    }

    /// Get a short description for display
    pub fn short_description(&self) -> String {
        format!("{} ({})", self.name, self.column_type)
    }
}
