use crate::record::Record;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "id")]
    pub id: i64,
    #[tabled(rename = "name")]
    pub name: String,
    #[tabled(rename = "price")]
    pub price: String,
    #[tabled(rename = "qty")]
    pub qty: i64,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            price: format!("{:.2}", record.price),
            qty: record.qty,
        }
    }
}

/// Render records as a rounded table; empty input renders nothing
pub fn records_table(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
