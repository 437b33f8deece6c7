//! Plain-text rendering of a search result for download.

use crate::models::{split_points, ExportEntry, ExportRequest};
use chrono::{DateTime, Utc};

const TITLE: &str = "Ingredient Search Result";

/// Render the search term and each suggestion's name and description, stamped now.
pub fn render_search_document(request: &ExportRequest) -> String {
    render_search_document_at(request, Utc::now())
}

/// Render with an explicit generation timestamp.
pub fn render_search_document_at(request: &ExportRequest, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(TITLE.len()));
    out.push_str("\n\n");
    out.push_str(&format!("You searched for: {}\n", request.interpreted.trim()));
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if request.suggestions.is_empty() {
        out.push_str("\nNo suggestions.\n");
        return out;
    }

    for (i, entry) in request.suggestions.iter().enumerate() {
        out.push('\n');
        render_entry(&mut out, i + 1, entry);
    }
    out
}

fn render_entry(out: &mut String, position: usize, entry: &ExportEntry) {
    out.push_str(&format!("{}. {}\n", position, entry.name.trim()));
    for point in split_points(&entry.description) {
        out.push_str(&format!("   • {}\n", point));
    }
}
