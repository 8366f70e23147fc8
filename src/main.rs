//! Schemascan CLI - inspect the schema model extracted from a DDL dump

use clap::{Parser, Subcommand};
use schemascan::ui::{self, Icons};
use schemascan::{config, SchemaRegistry};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "schemascan")]
#[command(version)]
#[command(about = "DDL-to-schema extraction - tables, columns, and keys from a schema dump")]
#[command(long_about = r#"
Schemascan parses a MySQL-style DDL dump into a relational schema model:
  • Tables and columns with coarse inferred types
  • Primary and foreign keys, including late ALTER TABLE patches
  • By-name lookups and whole-schema aggregations

Example usage:
  schemascan show --schema store.sql
  schemascan columns --schema store.sql --table orders
  schemascan lookup --schema store.sql --column user_id
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the whole schema as boxed tables
    Show {
        /// Path to the DDL file
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// List table names
    Tables {
        /// Path to the DDL file
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Emit JSON (table name -> column names)
        #[arg(short, long)]
        json: bool,
    },

    /// List the columns of one table
    Columns {
        /// Path to the DDL file
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Table name
        #[arg(short, long)]
        table: String,
    },

    /// List primary and foreign keys, per table
    Keys {
        /// Path to the DDL file
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Restrict to one table
        #[arg(short, long)]
        table: Option<String>,

        /// Emit JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Find the first column with a given name across all tables
    Lookup {
        /// Path to the DDL file
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Column name
        #[arg(short, long)]
        column: String,
    },

    /// Show statistics about the loaded schema
    Stats {
        /// Path to the DDL file
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// Write a starter schemascan.toml in the current directory
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Show { schema } => {
            let registry = open_registry(schema)?;
            println!("{}", ui::render_schema(&registry));
        }

        Commands::Tables { schema, json } => {
            let registry = open_registry(schema)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&registry.tables_to_columns())?);
            } else {
                ui::header(&format!("{} tables", registry.table_count()));
                for table in registry.tables() {
                    ui::status(Icons::TABLE, &table.name, &format!("{} columns", table.column_count()));
                }
            }
        }

        Commands::Columns { schema, table } => {
            let registry = open_registry(schema)?;
            match registry.table_by_name(&table) {
                Some(table) => {
                    ui::section(&table.name);
                    for column in table.columns() {
                        let marker = if column.is_primary {
                            Icons::PRIMARY_KEY
                        } else if column.is_foreign {
                            Icons::FOREIGN_KEY
                        } else {
                            " "
                        };
                        println!("{} {}", marker, column.short_description());
                    }
                }
                None => {
                    ui::error(&format!("no table named {}", table));
                    std::process::exit(1);
                }
            }
        }

        Commands::Keys { schema, table, json } => {
            let registry = open_registry(schema)?;
            if json {
                let data = serde_json::json!({
                    "primary": registry.primary_keys_by_table(),
                    "foreign": registry.foreign_keys_by_table(),
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let tables = registry.tables().iter().filter(|t| match &table {
                    Some(name) => &t.name == name,
                    None => true,
                });
                for table in tables {
                    ui::section(&table.name);
                    for name in table.primary_key_names() {
                        println!("{} {}", Icons::PRIMARY_KEY, name);
                    }
                    for foreign_key in table.foreign_keys() {
                        println!("{} {}", Icons::LINK, foreign_key);
                    }
                }
            }
        }

        Commands::Lookup { schema, column } => {
            let registry = open_registry(schema)?;
            match registry.column_by_name(&column) {
                Some(column) => {
                    ui::info("column", &column.short_description());
                    ui::summary_row("primary", &column.is_primary.to_string());
                    ui::summary_row("foreign", &column.is_foreign.to_string());
                    ui::summary_row("equivalences", &serde_json::to_string(&column.equivalences)?);
                }
                None => {
                    ui::error(&format!("no column named {}", column));
                    std::process::exit(1);
                }
            }
        }

        Commands::Stats { schema } => {
            let registry = open_registry(schema)?;
            ui::header("Schema statistics");
            let stats = registry.stats();
            ui::summary_row("tables", &stats.tables.to_string());
            ui::summary_row("columns", &stats.columns.to_string());
            ui::summary_row("primary keys", &stats.primary_keys.to_string());
            ui::summary_row("foreign keys", &stats.foreign_keys.to_string());
        }

        Commands::Init { force } => {
            let path = config::default_config_path();
            config::write_config(&path, &config::SchemascanConfig::default(), force)?;
            ui::success(&format!("wrote {}", path.display()));
        }
    }

    Ok(())
}

/// Resolve the schema path from the CLI argument and config file, then
/// load it into a fresh registry.
fn open_registry(schema: Option<PathBuf>) -> anyhow::Result<SchemaRegistry> {
    let config = config::load_config(None)?.unwrap_or_default();
    let base_dir = config.base_dir.as_ref().map(PathBuf::from);

    let path = schema
        .or_else(|| config.schema.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow::anyhow!("no schema file given (pass --schema or set one in schemascan.toml)")
        })?;
    let path = config::resolve_schema_path(base_dir.as_deref(), &path);

    let mut registry = SchemaRegistry::new();
    registry.load_file(&path)?;
    Ok(registry)
}
