//! Plain-text rendering of the bill preview.
//!
//! Everything printed here comes straight out of the engine; the renderer
//! aligns columns and never does arithmetic of its own.

use engine::{Bill, Money};

fn money(symbol: &str, amount: Money) -> String {
    format!("{symbol}{amount}")
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn render_table(header: &[String], rows: &[Vec<String>], out: &mut String) {
    let mut widths: Vec<usize> = header.iter().map(|cell| width(cell)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if width(cell) > widths[i] {
                widths[i] = width(cell);
            }
        }
    }

    push_row(&widths, header, out);
    for row in rows {
        push_row(&widths, row, out);
    }
}

/// First column left-aligned, every other column right-aligned.
fn push_row(widths: &[usize], row: &[String], out: &mut String) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let pad = widths[i] - width(cell);
        if i == 0 {
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
        } else {
            out.push_str(&" ".repeat(pad));
            out.push_str(cell);
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

pub fn render(bill: &Bill, symbol: &str) -> String {
    let mut out = String::new();
    let totals = bill.totals();

    if !bill.items.is_empty() {
        let mut header: Vec<String> = ["Item", "Price", "Qty", "Total"]
            .into_iter()
            .map(str::to_string)
            .collect();
        header.extend(bill.participants.iter().map(|p| p.name.clone()));

        let mut rows: Vec<Vec<String>> = Vec::new();
        for item in &bill.items {
            let mut row = vec![
                item.name.clone(),
                money(symbol, item.price),
                item.quantity.to_string(),
                money(symbol, item.total()),
            ];
            for participant in &bill.participants {
                row.push(if item.is_shared_by(&participant.id) {
                    money(symbol, item.share_of(&participant.id))
                } else {
                    "-".to_string()
                });
            }
            rows.push(row);
        }

        let mut subtotal_row = vec![
            "SUBTOTAL".to_string(),
            "-".to_string(),
            "-".to_string(),
            money(symbol, totals.subtotal),
        ];
        subtotal_row.extend(
            bill.participants
                .iter()
                .map(|p| money(symbol, bill.participant_subtotal(&p.id))),
        );
        rows.push(subtotal_row);

        let mut net_row = vec![
            "NET TOTAL".to_string(),
            "-".to_string(),
            "-".to_string(),
            money(symbol, totals.grand_total),
        ];
        net_row.extend(
            bill.participants
                .iter()
                .map(|p| money(symbol, bill.participant_totals(&p.id).grand_total)),
        );
        rows.push(net_row);

        render_table(&header, &rows, &mut out);
        out.push('\n');
    }

    let summary = [
        ("Subtotal".to_string(), totals.subtotal),
        (
            format!("Service Charge ({}%)", bill.service_charge),
            totals.service_charge,
        ),
        (format!("Tax ({}%)", bill.tax), totals.tax),
        ("Grand Total".to_string(), totals.grand_total),
    ];
    let label_width = summary.iter().map(|(label, _)| width(label)).max().unwrap_or(0);
    let amount_width = summary
        .iter()
        .map(|(_, amount)| width(&money(symbol, *amount)))
        .max()
        .unwrap_or(0);

    out.push_str("Summary\n");
    for (label, amount) in &summary {
        let amount = money(symbol, *amount);
        out.push_str(&format!(
            "{label}{}  {}{amount}\n",
            " ".repeat(label_width - width(label)),
            " ".repeat(amount_width - width(&amount)),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bill() -> Bill {
        let mut bill = Bill::new();
        let alice = bill.add_participant("Alice", None).unwrap();
        let bob = bill.add_participant("Bob", None).unwrap();
        bill.add_item("Platter", Money::new(90_00), 1, Some(vec![alice, bob]))
            .unwrap();
        bill.set_service_charge("10".parse().unwrap());
        bill.set_tax("7".parse().unwrap());
        bill
    }

    #[test]
    fn preview_carries_engine_figures() {
        let report = render(&sample_bill(), "฿");

        assert!(report.contains("Platter"));
        assert!(report.contains("฿45.00"));
        assert!(report.contains("SUBTOTAL"));
        assert!(report.contains("NET TOTAL"));
        // 90.00 -> +10% -> 99.00 -> +7% -> 105.93
        assert!(report.contains("฿105.93"));
        assert!(report.contains("Service Charge (10%)"));
        assert!(report.contains("Tax (7%)"));
    }

    #[test]
    fn empty_bill_still_prints_summary() {
        let report = render(&Bill::new(), "$");
        assert!(report.contains("Summary"));
        assert!(report.contains("$0.00"));
        assert!(!report.contains("SUBTOTAL"));
    }
}
