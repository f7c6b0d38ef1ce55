//! Change-table rendering for notification bodies.
//!
//! Two renderers share one contract: every row must carry exactly as many
//! cells as there are headers. The markdown flavor is for destinations with
//! full rich-text rendering; the monospace flavor is for chat destinations
//! where only a padded code block lines up.

use itertools::Itertools;

/// Rendering style for a notification destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Dense pipe-delimited markdown wrapped in `%%%` sentinel lines.
    Markdown,
    /// Column-padded ASCII wrapped in a code fence.
    Monospace,
}

/// Sentinel line the rich-text destination uses to detect markdown bodies.
const MARKDOWN_SENTINEL: &str = "%%%";

const ERROR_BANNER: &str =
    "ERROR - the following error occurred while processing this topic:";
const CHANGES_STILL_MADE: &str = "The following changes were still made:";
const NO_CHANGES_MADE: &str = "No changes were made.";

/// Formats a change table for one destination.
///
/// An empty `rows` slice means "no changes": the table body is omitted and,
/// when an error message is present, the overlay says so explicitly instead
/// of rendering a header-only table.
///
/// # Panics
///
/// Panics if any row's cell count differs from the header count. Rows come
/// from the change model, never from user input, so a mismatch is a bug.
pub fn make_table(
    headers: &[&str],
    rows: &[Vec<String>],
    error_message: Option<&str>,
    style: TableStyle,
) -> String {
    if headers.is_empty() && rows.is_empty() {
        return String::new();
    }
    for row in rows {
        assert_eq!(
            row.len(),
            headers.len(),
            "table row has {} cells, expected {}",
            row.len(),
            headers.len()
        );
    }

    let mut table = if rows.is_empty() {
        String::new()
    } else {
        match style {
            TableStyle::Markdown => render_dense(headers, rows),
            TableStyle::Monospace => render_padded(headers, rows),
        }
    };

    if style == TableStyle::Monospace && !table.is_empty() {
        table = format!("```\n{table}```");
    }

    if let Some(message) = error_message {
        let footer = if rows.is_empty() {
            NO_CHANGES_MADE
        } else {
            CHANGES_STILL_MADE
        };
        let (banner, footer) = match style {
            TableStyle::Markdown => {
                (format!("# {ERROR_BANNER}\n"), format!("# {footer}\n"))
            }
            TableStyle::Monospace => (
                format!(":warning: *{ERROR_BANNER}*\n"),
                format!(":warning: *{footer}*\n"),
            ),
        };
        table = format!("{banner}{message}\n\n{footer}{table}");
    }

    if style == TableStyle::Markdown {
        table = format!("{MARKDOWN_SENTINEL}\n{table}{MARKDOWN_SENTINEL}");
    }

    table
}

/// Pipe-joined cells with no padding; the separator row is a single dash per
/// column regardless of column width.
fn render_dense(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&headers.iter().join("|"));
    out.push('\n');
    out.push_str(&headers.iter().map(|_| "-").join("|"));
    out.push('\n');
    for row in rows {
        out.push_str(&row.iter().join("|"));
        out.push('\n');
    }
    out
}

/// Every cell padded to its column's widest member, one space of breathing
/// room on each side, leading and trailing pipes.
fn render_padded(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].len())
                .fold(header.len(), usize::max)
        })
        .collect();

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = padded_row(headers, &widths);
    out.push_str(&padded_row(&separator, &widths));
    for row in rows {
        out.push_str(&padded_row(row, &widths));
    }
    out
}

fn padded_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let body = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!(" {:<w$} ", cell.as_ref(), w = *width))
        .join("|");
    format!("|{body}|\n")
}
