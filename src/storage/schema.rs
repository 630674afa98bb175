//! Database schema definitions

/// Name of the catalog table
pub const RECORDS_TABLE: &str = "records";

/// SQL to create the records table
pub const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    qty INTEGER NOT NULL
)
"#;

/// Column list shared by every SELECT, in `Record` field order
pub const RECORD_COLUMNS: &str = "id, name, price, qty";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_RECORDS_TABLE]
}
