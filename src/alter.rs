//! ALTER TABLE application
//!
//! An ALTER block is flattened to one line and split on `;` so a single
//! block can carry several `ADD` clauses. Each clause patches an already
//! registered table; clauses naming an unknown table are logged no-ops,
//! which cannot happen for well-formed input because the registry applies
//! every CREATE block first.

use crate::parser::foreign_key_re;
use crate::registry::SchemaRegistry;
use crate::table::{ForeignKey, Table};
use regex::Regex;
use std::sync::OnceLock;

static TABLE_NAME: OnceLock<Regex> = OnceLock::new();
static PRIMARY_KEY: OnceLock<Regex> = OnceLock::new();

/// `TABLE `name``
fn table_name_re() -> &'static Regex {
    TABLE_NAME.get_or_init(|| Regex::new(r"TABLE `(\w+)`").expect("table name pattern"))
}

/// `PRIMARY KEY (`col`)`
fn primary_key_re() -> &'static Regex {
    PRIMARY_KEY.get_or_init(|| Regex::new(r"PRIMARY KEY \(`(\w+)`\)").expect("primary key pattern"))
}

/// Apply one `ALTER TABLE ... ;` statement against the registry's tables.
///
/// Sub-clauses matching neither key pattern are ignored.
pub fn apply_alter(statement: &str, registry: &mut SchemaRegistry) {
    let flattened = statement.replace('\n', " ");

    for clause in flattened.split(';') {
        if clause.contains("PRIMARY KEY") {
            let Some(table) = target_table(clause, registry) else {
                continue;
            };
            for caps in primary_key_re().captures_iter(clause) {
                table.add_primary_key(&caps[1]);
            }
        } else if clause.contains("FOREIGN KEY") {
            let Some(table) = target_table(clause, registry) else {
                continue;
            };
            for caps in foreign_key_re().captures_iter(clause) {
                table.add_foreign_key(ForeignKey::new(&caps[1], &caps[2], &caps[3]));
            }
        }
    }
}

/// Resolve the clause's target table, logging the clauses that go nowhere
fn target_table<'a>(clause: &str, registry: &'a mut SchemaRegistry) -> Option<&'a mut Table> {
    let name = table_name_re()
        .captures(clause)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let Some(name) = name else {
        tracing::debug!(clause = clause.trim(), "alter clause without a table name");
        return None;
    };

    let table = registry.table_by_name_mut(&name);
    if table.is_none() {
        tracing::warn!(table = %name, "alter references a table the registry does not hold");
    }
    table
}
