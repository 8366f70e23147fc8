//! Schema registry - in-memory store for the extracted schema model
//!
//! Owns the ordered table collection and orchestrates the load pipeline:
//! every CREATE block is parsed before any ALTER block is applied, no
//! matter how the two interleave in the source. ALTER statements may
//! therefore reference tables that appear later in the dump, which is how
//! schema exporters emit multi-table foreign-key patches.

use crate::alter::apply_alter;
use crate::column::Column;
use crate::parser::parse_create_table;
use crate::splitter::{statement_blocks, DdlKeyword};
use crate::table::{ForeignKey, Table};
use crate::thesaurus::Thesaurus;
use crate::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// In-memory registry of parsed tables.
///
/// Table names are not required to be unique: duplicates stay in the
/// sequence and every by-name lookup returns the first match in insertion
/// order.
#[derive(Default)]
pub struct SchemaRegistry {
    tables: Vec<Table>,
    thesaurus: Option<Arc<dyn Thesaurus>>,
}

impl SchemaRegistry {
    /// Create an empty registry with no thesaurus
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that consults `thesaurus` for every
    /// name-equivalence build. The `Arc` may be shared read-only across
    /// registry instances.
    pub fn with_thesaurus(thesaurus: Arc<dyn Thesaurus>) -> Self {
        Self {
            tables: Vec::new(),
            thesaurus: Some(thesaurus),
        }
    }

    /// Load DDL source text into the registry.
    ///
    /// All `CREATE` blocks are parsed first, then all `ALTER` blocks are
    /// applied, each set in source order. Blocks without the `TABLE`
    /// token are skipped.
    pub fn load(&mut self, source: &str) -> Result<()> {
        for block in statement_blocks(source, DdlKeyword::Create) {
            if block.contains("TABLE") {
                let table = parse_create_table(block, self.thesaurus.as_deref())?;
                tracing::debug!(table = %table.name, columns = table.column_count(), "table created");
                self.add_table(table);
            }
        }
        for block in statement_blocks(source, DdlKeyword::Alter) {
            if block.contains("TABLE") {
                apply_alter(block, self);
            }
        }
        Ok(())
    }

    /// Read a DDL file and load its contents
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "loading schema file");
        self.load(&source)
    }

    /// Append a table, keeping duplicates
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Number of tables, duplicates included
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// All tables in insertion order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// First table with this name
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub(crate) fn table_by_name_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// First column with this name, scanning tables in insertion order
    /// and columns in insertion order within each table
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.tables.iter().find_map(|t| t.column(name))
    }

    /// Table name -> column-name list for the whole schema
    pub fn tables_to_columns(&self) -> HashMap<String, Vec<String>> {
        self.tables
            .iter()
            .map(|t| {
                (
                    t.name.clone(),
                    t.columns().iter().map(|c| c.name.clone()).collect(),
                )
            })
            .collect()
    }

    /// Table name -> primary-key names for the whole schema
    pub fn primary_keys_by_table(&self) -> HashMap<String, Vec<String>> {
        self.tables
            .iter()
            .map(|t| (t.name.clone(), t.primary_key_names().to_vec()))
            .collect()
    }

    /// Table name -> foreign-key triples for the whole schema
    pub fn foreign_keys_by_table(&self) -> HashMap<String, Vec<ForeignKey>> {
        self.tables
            .iter()
            .map(|t| (t.name.clone(), t.foreign_keys().to_vec()))
            .collect()
    }

    /// Primary-key columns of the first table with this name
    pub fn primary_key_columns_of_table(&self, table_name: &str) -> Option<Vec<&Column>> {
        self.table_by_name(table_name).map(Table::primary_key_columns)
    }

    /// Primary-key names of the first table with this name
    pub fn primary_key_names_of_table(&self, table_name: &str) -> Option<&[String]> {
        self.table_by_name(table_name).map(Table::primary_key_names)
    }

    /// Foreign-key triples of the first table with this name
    pub fn foreign_keys_of_table(&self, table_name: &str) -> Option<&[ForeignKey]> {
        self.table_by_name(table_name).map(Table::foreign_keys)
    }

    /// Local foreign-key column names of the first table with this name
    pub fn foreign_key_names_of_table(&self, table_name: &str) -> Option<Vec<&str>> {
        self.table_by_name(table_name).map(Table::foreign_key_names)
    }

    /// Get statistics about the registry
    pub fn stats(&self) -> SchemaStats {
        SchemaStats {
            tables: self.tables.len(),
            columns: self.tables.iter().map(Table::column_count).sum(),
            primary_keys: self.tables.iter().map(|t| t.primary_key_names().len()).sum(),
            foreign_keys: self.tables.iter().map(|t| t.foreign_keys().len()).sum(),
        }
    }
}

/// Statistics about a loaded schema
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaStats {
    pub tables: usize,
    pub columns: usize,
    pub primary_keys: usize,
    pub foreign_keys: usize,
}

impl std::fmt::Display for SchemaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Schema Statistics:")?;
        writeln!(f, "  Tables: {}", self.tables)?;
        writeln!(f, "  Columns: {}", self.columns)?;
        writeln!(
            f,
            "  Keys: {} primary, {} foreign",
            self.primary_keys, self.foreign_keys
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::thesaurus::tests::WordMap;
    use crate::thesaurus::Equivalence;

    const DUMP: &str = "\
CREATE TABLE `users` (
  `id` INT NOT NULL,
  `name` VARCHAR(255),
  PRIMARY KEY (`id`)
);

CREATE TABLE `orders` (
  `id` INT NOT NULL,
  `user_id` INT,
  `placed_on` DATE,
  PRIMARY KEY (`id`)
);

ALTER TABLE `orders`
  ADD FOREIGN KEY (`user_id`) REFERENCES `users` (`id`);
";

    #[test]
    fn test_load_full_dump() {
        let mut registry = SchemaRegistry::new();
        registry.load(DUMP).unwrap();

        assert_eq!(registry.table_count(), 2);
        let orders = registry.table_by_name("orders").unwrap();
        assert_eq!(
            orders.foreign_keys(),
            [ForeignKey::new("user_id", "users", "id")]
        );
        assert!(orders.column("user_id").unwrap().is_foreign);
    }

    #[test]
    fn test_create_order_does_not_matter_for_alter() {
        // the patched table is created before the table it references;
        // the trailing ALTER still lands exactly once
        let source = "\
CREATE TABLE `orders` (
  `id` INT,
  `user_id` INT
);

CREATE TABLE `users` (
  `id` INT
);

ALTER TABLE `orders`
  ADD FOREIGN KEY (`user_id`) REFERENCES `users` (`id`);
";
        let mut registry = SchemaRegistry::new();
        registry.load(source).unwrap();

        let orders = registry.table_by_name("orders").unwrap();
        assert_eq!(
            orders.foreign_keys(),
            [ForeignKey::new("user_id", "users", "id")]
        );
    }

    #[test]
    fn test_forward_reference_is_recorded_unresolved() {
        let source = "\
CREATE TABLE `orders` (
  `user_id` INT,
  FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)
);
";
        let mut registry = SchemaRegistry::new();
        registry.load(source).unwrap();

        // `users` is never created; the triple is still recorded
        assert!(registry.table_by_name("users").is_none());
        assert_eq!(
            registry.foreign_keys_of_table("orders").unwrap(),
            [ForeignKey::new("user_id", "users", "id")]
        );
    }

    #[test]
    fn test_reload_yields_identical_shape() {
        let mut first = SchemaRegistry::new();
        first.load(DUMP).unwrap();
        let mut second = SchemaRegistry::new();
        second.load(DUMP).unwrap();

        let names = |r: &SchemaRegistry| -> Vec<String> {
            r.tables().iter().map(|t| t.name.clone()).collect()
        };
        assert_eq!(names(&first), names(&second));
        assert_eq!(first.tables_to_columns(), second.tables_to_columns());
        assert_eq!(first.primary_keys_by_table(), second.primary_keys_by_table());
        assert_eq!(first.foreign_keys_by_table(), second.foreign_keys_by_table());
    }

    #[test]
    fn test_duplicate_table_names_first_match_wins() {
        let source = "\
CREATE TABLE `t` (
  `first` INT
);
CREATE TABLE `t` (
  `second` INT
);
";
        let mut registry = SchemaRegistry::new();
        registry.load(source).unwrap();

        assert_eq!(registry.table_count(), 2);
        assert_eq!(
            registry.table_by_name("t").unwrap().column_names(),
            ["first"]
        );
    }

    #[test]
    fn test_lookups_return_none_for_missing_names() {
        let mut registry = SchemaRegistry::new();
        registry.load(DUMP).unwrap();

        assert!(registry.table_by_name("missing").is_none());
        assert!(registry.column_by_name("missing").is_none());
        assert!(registry.primary_key_names_of_table("missing").is_none());
        assert!(registry.foreign_keys_of_table("missing").is_none());
    }

    #[test]
    fn test_column_lookup_scans_tables_in_order() {
        let mut registry = SchemaRegistry::new();
        registry.load(DUMP).unwrap();

        // both tables declare `id`; the first table wins
        let id = registry.column_by_name("id").unwrap();
        assert_eq!(id.column_type, ColumnType::Int);
        assert!(id.is_primary);
        assert_eq!(registry.column_by_name("placed_on").unwrap().column_type, ColumnType::Date);
    }

    #[test]
    fn test_aggregations() {
        let mut registry = SchemaRegistry::new();
        registry.load(DUMP).unwrap();

        let columns = registry.tables_to_columns();
        assert_eq!(columns["users"], ["id", "name"]);
        assert_eq!(columns["orders"], ["id", "user_id", "placed_on"]);

        let primary = registry.primary_keys_by_table();
        assert_eq!(primary["users"], ["id"]);

        let foreign = registry.foreign_keys_by_table();
        assert!(foreign["users"].is_empty());
        assert_eq!(foreign["orders"].len(), 1);
    }

    #[test]
    fn test_stats() {
        let mut registry = SchemaRegistry::new();
        registry.load(DUMP).unwrap();

        let stats = registry.stats();
        assert_eq!(stats.tables, 2);
        assert_eq!(stats.columns, 5);
        assert_eq!(stats.primary_keys, 2);
        assert_eq!(stats.foreign_keys, 1);
    }

    #[test]
    fn test_thesaurus_reaches_every_equivalence_build() {
        let thesaurus = Arc::new(WordMap::with(&[("users", &["people"])]));
        let mut registry = SchemaRegistry::with_thesaurus(thesaurus);
        registry.load(DUMP).unwrap();

        let users = registry.table_by_name("users").unwrap();
        assert_eq!(
            users.equivalences,
            vec![
                Equivalence::Word("users".to_string()),
                Equivalence::Group(vec!["people".to_string()]),
            ]
        );
        // columns get a (possibly empty) group entry too
        assert_eq!(users.column("name").unwrap().equivalences.len(), 2);
    }

    #[test]
    fn test_load_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{DUMP}").unwrap();

        let mut registry = SchemaRegistry::new();
        registry.load_file(file.path()).unwrap();
        assert_eq!(registry.table_count(), 2);
    }

    #[test]
    fn test_load_file_missing_path_is_io_error() {
        let mut registry = SchemaRegistry::new();
        let err = registry.load_file(Path::new("/no/such/schema.sql")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
