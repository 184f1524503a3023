//! Rendering search results for the terminal.

use comfy_table::{Attribute, Cell, Color, Table};

use crate::models::LibraryResult;

/// Widest title shown in table output
const TITLE_WIDTH: usize = 48;
const AUTHOR_WIDTH: usize = 28;

/// Truncate text to fit within `max_width` display columns, appending "..." if cut.
///
/// # Examples
///
/// ```
/// use library_search::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_c, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width.saturating_sub(3) {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Short human description of when a title can be borrowed
pub fn availability_label(result: &LibraryResult) -> String {
    if result.is_available {
        format!(
            "available ({}/{})",
            result.available_copies, result.total_copies
        )
    } else if !result.needs_hold() {
        "not owned".to_string()
    } else if result.estimated_wait_days > 0 {
        format!(
            "~{} days, {} holds",
            result.estimated_wait_days, result.holds_count
        )
    } else {
        format!("on hold, {} holds", result.holds_count)
    }
}

/// Render results as a table
pub fn render_table(results: &[LibraryResult]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Title", "Author", "Format", "Library", "Availability"]);

    for result in results {
        let availability = Cell::new(availability_label(result));
        let availability = if result.is_available {
            availability.fg(Color::Green)
        } else {
            availability
        };

        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&result.long_title, TITLE_WIDTH))
                .add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&result.author, AUTHOR_WIDTH)),
            Cell::new(result.media_type.to_string()),
            Cell::new(&result.library),
            availability,
        ]);
    }

    table.to_string()
}

/// Render results as plain text, one block per result
pub fn render_plain(results: &[LibraryResult]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!(
            "{} - {} ({})\n",
            result.long_title, result.author, result.media_type
        ));
        out.push_str(&format!(
            "  Library: {}  Copies: {}  {}\n\n",
            result.library,
            result.total_copies,
            availability_label(result)
        ));
    }
    out
}

/// Render results as pretty-printed JSON
pub fn render_json(results: &[LibraryResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
