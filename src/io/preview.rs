use crate::application::Session;
use crate::format::{FormatConfig, format_currency, format_date};

use super::REPORT_COLUMNS;

pub const EMPTY_LEDGER_MESSAGE: &str =
    "No entries yet. Add an item above to start creating your report.";

/// Render the session as a plain-text table for terminals.
pub fn render_preview(session: &Session, format: &FormatConfig) -> String {
    let rows: Vec<[String; 6]> = session
        .ledger()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            [
                (index + 1).to_string(),
                entry.description.clone(),
                entry.period.label(),
                format_currency(entry.amount_cents, format),
                format_date(entry.deadline, format),
                entry.status.to_string(),
            ]
        })
        .collect();

    let total_label = "TOTAL EXPENSES";
    let total = format_currency(session.total(), format);

    let mut widths = REPORT_COLUMNS.map(|label| label.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths[3] = widths[3].max(total.chars().count());

    let line_width: usize = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    let rule = "-".repeat(line_width);

    let mut out = String::new();
    out.push_str(center(&session.title().heading(), line_width).trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format_row(&REPORT_COLUMNS.map(|l| l.to_uppercase()), &widths));
    out.push_str(&rule);
    out.push('\n');

    if rows.is_empty() {
        out.push_str(center(EMPTY_LEDGER_MESSAGE, line_width).trim_end());
        out.push('\n');
    } else {
        for row in &rows {
            out.push_str(&format_row(row, &widths));
        }
    }

    // label spans the first three columns
    let label_width = widths[0] + widths[1] + widths[2] + 6;
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{} | {}\n",
        center(total_label, label_width),
        pad_left(&total, widths[3])
    ));

    out
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| match col {
            // numeric columns
            0 | 3 => pad_left(cell, *width),
            _ => pad_right(cell, *width),
        })
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let padding = width.saturating_sub(len);
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(padding - left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryRequest, Period};

    #[test]
    fn test_empty_preview() {
        let session = Session::with_title("July upkeep");
        let preview = render_preview(&session, &FormatConfig::default());

        assert!(preview.contains("JULY UPKEEP"));
        assert!(preview.contains(EMPTY_LEDGER_MESSAGE));
        assert!(preview.contains("TOTAL EXPENSES"));
        assert!(preview.trim_end().ends_with("₹0"));
    }

    #[test]
    fn test_preview_lists_rows_in_order() {
        let mut session = Session::new();
        let july = Period::new(2025, 7).unwrap();
        session.add_entry(EntryRequest::new("Plumbing", july, 10000)).unwrap();
        session.add_entry(EntryRequest::new("Painting", july, 25000)).unwrap();

        let preview = render_preview(&session, &FormatConfig::default());

        let plumbing = preview.find("Plumbing").unwrap();
        let painting = preview.find("Painting").unwrap();
        assert!(plumbing < painting);
        assert!(!preview.contains(EMPTY_LEDGER_MESSAGE));
        assert!(preview.contains("₹350"));
    }
}
