//! Terminal output helpers: spinners and result tables.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::domain::models::SourceRef;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

/// Create a spinner for indeterminate operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Render the citation list as a table.
pub fn format_sources_table(sources: &[SourceRef]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Title", "URL", "Score"]);
    for source in sources {
        table.add_row(vec![
            source.title.clone(),
            source.url.clone(),
            format!("{:.4}", source.score),
        ]);
    }
    table
}
