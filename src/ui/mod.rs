pub mod icons;
pub mod output;
pub mod schema;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, muted, section, status, success, summary_row, warn};
pub use schema::{render_schema, render_table};
pub use theme::{theme, Theme};
