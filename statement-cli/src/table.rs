//! Plain-text rendering of a statement page for non-interactive output

use statement_core::{Column, StatementSummary, StatementView, Transaction};

const MAX_WIDTH: usize = 48;

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

fn widths(rows: &[Transaction]) -> Vec<usize> {
    Column::ALL
        .iter()
        .map(|c| {
            rows.iter()
                .map(|t| t.display(*c).chars().count())
                .chain(std::iter::once(c.header().len()))
                .max()
                .unwrap_or(0)
                .min(MAX_WIDTH)
        })
        .collect()
}

fn pad(s: &str, width: usize, right: bool) -> String {
    let s = clip(s, width);
    if right {
        format!("{s:>width$}")
    } else {
        format!("{s:<width$}")
    }
}

/// Current page of the view as an aligned table with a page footer.
pub fn render_page(view: &StatementView) -> String {
    if !view.shows_table() {
        return "No transactions.\n".to_string();
    }

    let rows = view.page_rows();
    let widths = widths(rows);
    let mut out = String::new();

    let header: Vec<String> = Column::ALL
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(c.header(), *w, c.is_amount()))
        .collect();
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for t in rows {
        let cells: Vec<String> = Column::ALL
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&t.display(*c), *w, c.is_amount()))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }

    out.push_str(&format!("\nPage {} of {}\n", view.page(), view.total_pages()));
    out
}

pub fn render_summary(s: &StatementSummary) -> String {
    let mut out = format!(
        "{} transactions ({} labeled) | debits {:.2} | credits {:.2} | net {:.2}",
        s.rows,
        s.labeled,
        s.total_debit,
        s.total_credit,
        s.net()
    );
    if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
        out.push_str(&format!(" | {} to {}", first, last));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use statement_core::Cell;

    fn loaded(n: usize) -> StatementView {
        let rows = (0..n)
            .map(|i| Transaction {
                date: Some(Cell::Text("01/04/2023".into())),
                particulars: Some(Cell::Text(format!("UPI/{i}"))),
                dr_amount: Some(Cell::Number(10.5)),
                ..Default::default()
            })
            .collect();
        let mut v = StatementView::default();
        v.select_file("s.pdf").unwrap();
        let p = v.begin_submit().unwrap();
        v.finish_upload(p.request_id, Ok(rows));
        v
    }

    #[test]
    fn test_empty_view() {
        assert_eq!(render_page(&StatementView::default()), "No transactions.\n");
    }

    #[test]
    fn test_page_render() {
        let mut v = loaded(55);
        let first = render_page(&v);
        assert!(first.starts_with("Date"));
        assert!(first.contains("Dr Amount"));
        assert!(first.contains("UPI/0 "));
        assert!(!first.contains("UPI/50"));
        assert!(first.ends_with("Page 1 of 2\n"));

        v.next_page();
        let second = render_page(&v);
        assert!(second.contains("UPI/54"));
        assert!(second.ends_with("Page 2 of 2\n"));
        // header, rule, 5 rows, blank, footer
        assert_eq!(second.lines().count(), 9);
    }

    #[test]
    fn test_clip_long_text() {
        let s = "X".repeat(60);
        let c = clip(&s, MAX_WIDTH);
        assert_eq!(c.chars().count(), MAX_WIDTH);
        assert!(c.ends_with("..."));
    }

    #[test]
    fn test_summary_line() {
        let v = loaded(2);
        let s = StatementSummary::from_rows(v.transactions().rows());
        assert_eq!(
            render_summary(&s),
            "2 transactions (0 labeled) | debits 21.00 | credits 0.00 | net -21.00 | 2023-04-01 to 2023-04-01\n"
        );
    }
}
