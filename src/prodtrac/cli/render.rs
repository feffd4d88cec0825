//! # Rendering
//!
//! Turns products, drafts and messages into terminal text. Everything here
//! returns `String`s; callers decide where to print them. Column widths are
//! measured with `unicode-width` so names in any script line up.

use colored::{ColoredString, Colorize};
use prodtrac::api::{CmdMessage, MessageLevel};
use prodtrac::draft::{DraftField, FormDraft};
use prodtrac::model::Product;
use prodtrac::state::AppState;
use prodtrac::view::{SortDirection, SortField, ViewState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const EMPTY_MESSAGE: &str = "No products found";
const NAME_WIDTH: usize = 24;
const DESCRIPTION_WIDTH: usize = 40;
const GAP: &str = "  ";

fn paint(text: &str, use_color: bool, style: fn(&str) -> ColoredString) -> String {
    if use_color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Header line plus the table, or the empty marker.
pub fn render_listing(rows: &[&Product], total: usize, view: &ViewState, use_color: bool) -> String {
    let mut out = String::new();

    let mut summary = format!("Total: {}", total);
    if !view.filter.trim().is_empty() {
        summary.push_str(&format!(
            "{GAP}Showing: {}{GAP}Search: \"{}\"",
            rows.len(),
            view.filter.trim()
        ));
    }
    out.push_str(&paint(&summary, use_color, |s| s.dimmed()));
    out.push('\n');

    if rows.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    out.push_str(&render_table(rows, view, use_color));
    out
}

pub fn render_state(state: &AppState, use_color: bool) -> String {
    render_listing(&state.rows(), state.products.len(), &state.view, use_color)
}

fn header_label(field: SortField, view: &ViewState) -> String {
    let label = match field {
        SortField::Id => "ID",
        SortField::Name => "Name",
        SortField::Description => "Description",
        SortField::Price => "Price",
        SortField::Quantity => "Quantity",
    };
    if view.sort_field != field {
        return label.to_string();
    }
    match view.sort_direction {
        SortDirection::Asc => format!("{} ^", label),
        SortDirection::Desc => format!("{} v", label),
    }
}

fn render_table(rows: &[&Product], view: &ViewState, use_color: bool) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                truncate_to_width(&p.name, NAME_WIDTH),
                truncate_to_width(&p.description, DESCRIPTION_WIDTH),
                p.price_display(),
                p.quantity.map(|q| q.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    let headers: Vec<String> = SortField::ALL
        .iter()
        .map(|f| header_label(*f, view))
        .collect();

    let mut widths = [0usize; 5];
    for (i, width) in widths.iter_mut().enumerate() {
        *width = cells
            .iter()
            .map(|row| row[i].width())
            .chain(std::iter::once(headers[i].width()))
            .max()
            .unwrap_or(0);
    }
    // Numeric columns are right-aligned.
    let right = [true, false, false, true, true];

    let mut out = String::new();
    let header_line = join_cells(&headers, &widths, &right);
    out.push_str(&paint(&header_line, use_color, |s| s.bold()));
    out.push('\n');

    for row in &cells {
        let line = join_cells(row, &widths, &right);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn join_cells(cells: &[String], widths: &[usize; 5], right: &[bool; 5]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let padding = " ".repeat(widths[i].saturating_sub(cell.width()));
            if right[i] {
                format!("{}{}", padding, cell)
            } else {
                format!("{}{}", cell, padding)
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
}

pub fn render_product(product: &Product, use_color: bool) -> String {
    let label = |l: &str| paint(&format!("{:<12}", l), use_color, |s| s.dimmed());
    let mut out = String::new();
    out.push_str(&format!("{}{}\n", label("ID"), product.id));
    out.push_str(&format!("{}{}\n", label("Name"), product.name));
    out.push_str(&format!("{}{}\n", label("Description"), product.description));
    out.push_str(&format!("{}{}\n", label("Price"), product.price_display()));
    out.push_str(&format!(
        "{}{}\n",
        label("Quantity"),
        product.quantity.map(|q| q.to_string()).unwrap_or_default()
    ));
    out
}

pub fn render_draft(draft: &FormDraft, use_color: bool) -> String {
    let title = match draft.edit_id {
        Some(id) => format!("Edit Product {}", id),
        None => "Add Product".to_string(),
    };
    let mut out = paint(&title, use_color, |s| s.bold());
    out.push('\n');
    for field in DraftField::ALL {
        let locked = field == DraftField::Id && draft.is_editing();
        let value = draft.get(field);
        let shown = if value.is_empty() { "-" } else { value };
        out.push_str(&format!(
            "  {:<12}{}{}\n",
            field.label(),
            shown,
            if locked { " (locked)" } else { "" }
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => paint(&message.content, use_color, |s| s.dimmed()),
            MessageLevel::Success => paint(&message.content, use_color, |s| s.green()),
            MessageLevel::Warning => paint(&message.content, use_color, |s| s.yellow()),
            MessageLevel::Error => paint(&message.content, use_color, |s| s.red()),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// The success and error banners of a state, as messages.
pub fn banners(state: &AppState) -> Vec<CmdMessage> {
    let mut messages = Vec::new();
    if let Some(notice) = &state.notice {
        messages.push(CmdMessage::success(notice.clone()));
    }
    if let Some(error) = &state.error {
        messages.push(CmdMessage::error(error.clone()));
    }
    messages
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new(2, "B", "second", 5.0, 1),
            Product::new(1, "A", "first", 10.0, 2),
        ]
    }

    #[test]
    fn renders_rows_in_given_order() {
        let products = sample();
        let rows: Vec<&Product> = products.iter().collect();
        let view = ViewState::default();
        let output = render_listing(&rows, 2, &view, false);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Total: 2");
        assert!(lines[1].contains("ID ^"));
        assert!(lines[1].contains("Quantity"));
        assert!(lines[2].trim_start().starts_with('2'));
        assert!(lines[2].contains("$5.00"));
        assert!(lines[3].contains("$10.00"));
    }

    #[test]
    fn marks_descending_sort_column() {
        let products = sample();
        let rows: Vec<&Product> = products.iter().collect();
        let view = ViewState::new("", SortField::Price, SortDirection::Desc);
        let output = render_listing(&rows, 2, &view, false);
        assert!(output.contains("Price v"));
        assert!(!output.contains("ID ^"));
    }

    #[test]
    fn empty_projection_renders_marker() {
        let view = ViewState::new("zzz", SortField::Id, SortDirection::Asc);
        let output = render_listing(&[], 4, &view, false);
        assert_eq!(
            output,
            "Total: 4  Showing: 0  Search: \"zzz\"\nNo products found\n"
        );
    }

    #[test]
    fn columns_line_up() {
        let products = vec![
            Product::new(1, "Pen", "ink", 1.99, 100),
            Product::new(100, "Notebook", "paper", 12.5, 3),
        ];
        let rows: Vec<&Product> = products.iter().collect();
        let output = render_listing(&rows, 2, &ViewState::default(), false);
        let lines: Vec<&str> = output.lines().skip(1).collect();
        // Right-aligned: "$1.99" sits under "Price" in a six-wide column.
        assert_eq!(lines[1].find("$1.99"), lines[0].find("Price"));
        assert!(lines[2].starts_with(" 100"));
    }

    #[test]
    fn truncates_long_text() {
        let long = "x".repeat(60);
        let truncated = truncate_to_width(&long, 10);
        assert_eq!(truncated.width(), 10);
        assert!(truncated.ends_with('…'));
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn draft_shows_lock_when_editing() {
        let draft = FormDraft::from_product(&Product::new(3, "Pen", "ink", 1.99, 100));
        let output = render_draft(&draft, false);
        assert!(output.starts_with("Edit Product 3"));
        assert!(output.contains("3 (locked)"));

        let output = render_draft(&FormDraft::new(), false);
        assert!(output.starts_with("Add Product"));
    }

    #[test]
    fn messages_render_plain_without_color() {
        let output = render_messages(
            &[CmdMessage::error("name required"), CmdMessage::success("ok")],
            false,
        );
        assert_eq!(output, "name required\nok\n");
    }
}
