//! # Schemascan - DDL schema extraction engine
//!
//! Builds a structured relational-schema model from raw SQL DDL text.
//!
//! Schemascan provides:
//! - Best-effort textual segmentation of DDL dumps into statement blocks
//! - `CREATE TABLE` parsing into typed table/column entities
//! - `ALTER TABLE` application for late primary/foreign key patches
//! - Coarse column type inference from declaration text
//! - An in-memory registry with by-name lookups and schema aggregations
//!
//! The extraction is deliberately not a SQL grammar parser: it recognizes
//! a MySQL-style backtick-quoted subset and silently skips everything else,
//! so a downstream consumer (e.g. a natural-language-to-query layer) gets
//! whatever structure the dump actually yields.

pub mod alter;
pub mod column;
pub mod config;
pub mod parser;
pub mod registry;
pub mod splitter;
pub mod table;
pub mod thesaurus;
pub mod ui;

// Re-exports for convenient access
pub use column::{Column, ColumnType};
pub use registry::{SchemaRegistry, SchemaStats};
pub use splitter::DdlKeyword;
pub use table::{ForeignKey, Table};
pub use thesaurus::{Equivalence, Thesaurus};

/// Result type alias for Schemascan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Schemascan operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed table header: {0}")]
    MalformedTableHeader(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
