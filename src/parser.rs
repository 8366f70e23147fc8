//! CREATE TABLE block parsing
//!
//! Walks a block line by line and extracts the table name, columns,
//! primary-key membership, and inline foreign-key triples. The branch
//! order matters: a header line wins over a constraint line, and a
//! constraint line wins over a plain declaration line.

use crate::column::{Column, ColumnType};
use crate::table::{ForeignKey, Table};
use crate::thesaurus::{build_equivalences, Thesaurus};
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
static FOREIGN_KEY: OnceLock<Regex> = OnceLock::new();

/// Backtick-quoted identifier
pub(crate) fn identifier_re() -> &'static Regex {
    IDENTIFIER.get_or_init(|| Regex::new(r"`(\w+)`").expect("identifier pattern"))
}

/// `FOREIGN KEY (`col`) REFERENCES `table` (`refcol`)`
pub(crate) fn foreign_key_re() -> &'static Regex {
    FOREIGN_KEY.get_or_init(|| {
        Regex::new(r"FOREIGN KEY \(`(\w+)`\) REFERENCES `(\w+)` \(`(\w+)`\)")
            .expect("foreign key pattern")
    })
}

/// First backtick-quoted identifier on a line, if any
pub(crate) fn first_identifier(line: &str) -> Option<&str> {
    identifier_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse one `CREATE TABLE ... ;` block into a [`Table`].
///
/// Callers pass only blocks already known to contain the `TABLE` token.
/// A header line without a backtick-quoted identifier is the one fatal
/// condition; every other unrecognized line is skipped.
pub fn parse_create_table(block: &str, thesaurus: Option<&dyn Thesaurus>) -> Result<Table> {
    let mut table = Table::new();

    for line in block.lines() {
        if line.contains("TABLE") {
            let name = first_identifier(line)
                .ok_or_else(|| Error::MalformedTableHeader(line.trim().to_string()))?;
            table.name = name.to_string();
            table.equivalences = build_equivalences(name, thesaurus);
        } else if line.contains("PRIMARY KEY") {
            for caps in identifier_re().captures_iter(line) {
                let name = caps[1].to_string();
                if !table.has_column(&name) {
                    // the column's true declaration line is not in reach
                    // here, so the type comes from the constraint line
                    tracing::debug!(column = %name, "column synthesized from primary key clause");
                    table.add_column(declared_column(&name, line, thesaurus));
                }
                table.add_primary_key(name);
            }
        } else if line.contains("FOREIGN KEY") {
            for caps in foreign_key_re().captures_iter(line) {
                table.add_foreign_key(ForeignKey::new(&caps[1], &caps[2], &caps[3]));
            }
        } else if let Some(name) = first_identifier(line) {
            let column = declared_column(name, line, thesaurus);
            table.add_column(column);
        }
    }

    Ok(table)
}

fn declared_column(name: &str, line: &str, thesaurus: Option<&dyn Thesaurus>) -> Column {
    Column::new(
        name,
        ColumnType::infer(line),
        build_equivalences(name, thesaurus),
    )
}
