//! Transaction rows as the statement-processing backend returns them.
//!
//! The backend converts a parsed statement table straight into JSON records,
//! so every column is nullable and may come back as a number or a string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A nullable scalar cell from the statement table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Numeric value of the cell, tolerating thousands separators in text.
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => {
                let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
                if cleaned.is_empty() {
                    return None;
                }
                cleaned.parse().ok()
            }
            Cell::Bool(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Columns shown for every transaction row, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Particulars,
    Instruments,
    DrAmount,
    CrAmount,
    TotalAmount,
    Label,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Date,
        Column::Particulars,
        Column::Instruments,
        Column::DrAmount,
        Column::CrAmount,
        Column::TotalAmount,
        Column::Label,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Particulars => "Particulars",
            Column::Instruments => "Instruments",
            Column::DrAmount => "Dr Amount",
            Column::CrAmount => "Cr Amount",
            Column::TotalAmount => "Total Amount",
            Column::Label => "Label",
        }
    }

    pub fn is_amount(&self) -> bool {
        matches!(self, Column::DrAmount | Column::CrAmount | Column::TotalAmount)
    }
}

/// One parsed statement line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend identifier, when the backend supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "Date", default)]
    pub date: Option<Cell>,
    #[serde(rename = "Particulars", default)]
    pub particulars: Option<Cell>,
    #[serde(rename = "Instruments", default)]
    pub instruments: Option<Cell>,
    #[serde(rename = "Dr Amount", default)]
    pub dr_amount: Option<Cell>,
    #[serde(rename = "Cr Amount", default)]
    pub cr_amount: Option<Cell>,
    #[serde(rename = "Total Amount", default)]
    pub total_amount: Option<Cell>,
    /// User-assigned label
    #[serde(default)]
    pub label: Option<String>,
    /// Columns the view does not know about, kept as received
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Transaction {
    pub fn cell(&self, column: Column) -> Option<&Cell> {
        match column {
            Column::Date => self.date.as_ref(),
            Column::Particulars => self.particulars.as_ref(),
            Column::Instruments => self.instruments.as_ref(),
            Column::DrAmount => self.dr_amount.as_ref(),
            Column::CrAmount => self.cr_amount.as_ref(),
            Column::TotalAmount => self.total_amount.as_ref(),
            Column::Label => None,
        }
    }

    /// Text shown in the table for `column`.
    ///
    /// Amount columns print `-` only for a missing value; text columns also
    /// print `-` for an empty string.
    pub fn display(&self, column: Column) -> String {
        if column == Column::Label {
            return self.label_text().to_string();
        }
        match self.cell(column) {
            None => "-".to_string(),
            Some(c) if !column.is_amount() && c.is_blank() => "-".to_string(),
            Some(c) => c.to_string(),
        }
    }

    pub fn label_text(&self) -> &str {
        match self.label.as_deref() {
            Some(l) if !l.is_empty() => l,
            _ => "-",
        }
    }

    /// Current label as the edit draft starts from it.
    pub fn label_draft(&self) -> String {
        self.label.clone().unwrap_or_default()
    }

    pub fn has_label(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// Identifier sent with a label update: the backend id, else the row position.
    pub fn identifier(&self, key: RowKey) -> Value {
        match &self.id {
            Some(v) if !v.is_null() => v.clone(),
            _ => Value::from(key.0),
        }
    }

    fn with_label(&self, label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..self.clone()
        }
    }
}

/// Position of a row within the list it was loaded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub usize);

/// Ordered transactions from the most recent successful upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionList {
    rows: Vec<Transaction>,
    generation: u64,
}

impl TransactionList {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows, generation: 0 }
    }

    /// Replace every row; nothing from the previous list carries over.
    pub fn replace(&mut self, rows: Vec<Transaction>) {
        self.rows = rows;
        self.generation += 1;
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn get(&self, key: RowKey) -> Option<&Transaction> {
        self.rows.get(key.0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bumped on every wholesale replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A new list where only the row at `key` carries `label`.
    pub fn with_label(&self, key: RowKey, label: &str) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, t)| if i == key.0 { t.with_label(label) } else { t.clone() })
            .collect();
        Self {
            rows,
            generation: self.generation,
        }
    }
}
