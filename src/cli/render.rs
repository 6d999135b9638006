//! Plain-text rendering of the summary cards and the expense table.

use crate::ledger::{format_amount, ExpenseRecord, Totals};

const COLUMN_GAP: &str = "  ";

/// One line with the three cards: `Budget: $150  Expenses: $25  Balance: $125`.
pub fn summary_cards(totals: &Totals) -> String {
    totals
        .cards()
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Expense table in ledger order. `show_ids` controls the leading id column.
pub fn expense_table(records: &[ExpenseRecord], show_ids: bool) -> String {
    if records.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let mut headers = vec!["Title", "Amount", "Qty", "Total"];
    if show_ids {
        headers.insert(0, "ID");
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut row = vec![
                record.title.clone(),
                format_amount(record.amount),
                record.quantity.to_string(),
                format_amount(record.line_total()),
            ];
            if show_ids {
                row.insert(0, record.id.to_string());
            }
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![render_row(&header_cells, &widths)];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    );
    lines.extend(rows.iter().map(|row| render_row(row, &widths)));
    lines.join("\n")
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}
