use crate::registry::SchemaRegistry;
use crate::table::Table;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render one table as a box: name header, then one row per column with
/// key markers on primary and foreign columns.
pub fn render_table(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record([table
        .name
        .to_uppercase()
        .style(theme().table_name.clone())
        .to_string()]);

    for column in table.columns() {
        let marker = if column.is_primary {
            Icons::PRIMARY_KEY
        } else if column.is_foreign {
            Icons::FOREIGN_KEY
        } else {
            "  "
        };
        let label = if column.is_primary || column.is_foreign {
            column
                .short_description()
                .style(theme().key_column.clone())
                .to_string()
        } else {
            column.short_description()
        };
        builder.push_record([format!("{marker} {label}")]);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Render every table in the registry, in insertion order
pub fn render_schema(registry: &SchemaRegistry) -> String {
    let views: Vec<String> = registry.tables().iter().map(render_table).collect();
    views.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_create_table;

    fn sample_table() -> Table {
        parse_create_table(
            " TABLE `orders` (
  `id` INT,
  `user_id` INT,
  PRIMARY KEY (`id`),
  FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)
)",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_render_contains_name_and_markers() {
        let view = render_table(&sample_table());

        assert!(view.contains("ORDERS"));
        assert!(view.contains(Icons::PRIMARY_KEY));
        assert!(view.contains(Icons::FOREIGN_KEY));
        assert!(view.contains("id (int)"));
    }

    #[test]
    fn test_render_schema_joins_tables() {
        let mut registry = SchemaRegistry::new();
        registry.add_table(sample_table());
        registry.add_table(sample_table());

        let view = render_schema(&registry);
        assert_eq!(view.matches("ORDERS").count(), 2);
    }
}
