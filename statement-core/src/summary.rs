//! Totals over a loaded statement

use chrono::NaiveDate;
use serde::Serialize;

use crate::transaction::{Cell, Transaction};

const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d %b %Y"];

/// Parse a statement date cell. Indian bank statements print day first.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    let Cell::Text(s) = cell else {
        return None;
    };
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatementSummary {
    pub rows: usize,
    pub labeled: usize,
    pub total_debit: f64,
    pub total_credit: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl StatementSummary {
    pub fn from_rows(rows: &[Transaction]) -> Self {
        let mut s = Self {
            rows: rows.len(),
            ..Default::default()
        };

        for t in rows {
            if t.has_label() {
                s.labeled += 1;
            }
            s.total_debit += t.dr_amount.as_ref().and_then(Cell::as_amount).unwrap_or(0.0);
            s.total_credit += t.cr_amount.as_ref().and_then(Cell::as_amount).unwrap_or(0.0);

            if let Some(d) = t.date.as_ref().and_then(parse_date) {
                s.first_date = Some(s.first_date.map_or(d, |f| f.min(d)));
                s.last_date = Some(s.last_date.map_or(d, |l| l.max(d)));
            }
        }

        s
    }

    /// Credits minus debits.
    pub fn net(&self) -> f64 {
        self.total_credit - self.total_debit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, dr: Option<Cell>, cr: Option<Cell>, label: Option<&str>) -> Transaction {
        Transaction {
            date: Some(Cell::Text(date.to_string())),
            dr_amount: dr,
            cr_amount: cr,
            label: label.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
        assert_eq!(parse_date(&Cell::Text("01/04/2023".into())), Some(expected));
        assert_eq!(parse_date(&Cell::Text("01-04-2023".into())), Some(expected));
        assert_eq!(parse_date(&Cell::Text("2023-04-01".into())), Some(expected));
        assert_eq!(parse_date(&Cell::Text("01 Apr 2023".into())), Some(expected));
        assert_eq!(parse_date(&Cell::Text("B/F".into())), None);
        assert_eq!(parse_date(&Cell::Number(1.0)), None);
    }

    #[test]
    fn test_summary_totals() {
        let rows = vec![
            row("03/04/2023", Some(Cell::Number(250.0)), None, Some("food")),
            row("01/04/2023", None, Some(Cell::Text("1,000.50".into())), None),
            row("B/F", Some(Cell::Text("".into())), None, Some("")),
            row("15/04/2023", Some(Cell::Number(49.5)), None, None),
        ];
        let s = StatementSummary::from_rows(&rows);

        assert_eq!(s.rows, 4);
        assert_eq!(s.labeled, 1);
        assert_eq!(s.total_debit, 299.5);
        assert_eq!(s.total_credit, 1000.5);
        assert_eq!(s.net(), 701.0);
        assert_eq!(s.first_date, NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(s.last_date, NaiveDate::from_ymd_opt(2023, 4, 15));
    }

    #[test]
    fn test_empty_summary() {
        let s = StatementSummary::from_rows(&[]);
        assert_eq!(s, StatementSummary::default());
    }
}
