//! Partial update statement construction
//!
//! [`UpdateBuilder`] collects `(column, value)` pairs for exactly the fields a
//! caller supplied. The SET clause and the bound values are emitted from the
//! same ordered list, and the row id is always the final parameter.

use rusqlite::types::Value;

use super::schema::RECORDS_TABLE;
use crate::record::RecordPatch;

/// A parameterized UPDATE ready to execute
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Accumulates column assignments for a single-row UPDATE.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: &'static str,
    key: &'static str,
    assignments: Vec<(&'static str, Value)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str, key: &'static str) -> Self {
        Self {
            table,
            key,
            assignments: Vec::new(),
        }
    }

    /// Builder for the records table with every field present in `patch`
    pub fn for_patch(patch: &RecordPatch) -> Self {
        Self::new(RECORDS_TABLE, "id")
            .set_opt("name", patch.name.clone())
            .set_opt("price", patch.price)
            .set_opt("qty", patch.qty)
    }

    /// Assign `value` to `column`
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    /// Assign only when a value is present
    pub fn set_opt<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Emit the statement targeting row `id`, or `None` when nothing is assigned.
    pub fn build(self, id: i64) -> Option<UpdateStatement> {
        if self.assignments.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(self.assignments.len());
        let mut params = Vec::with_capacity(self.assignments.len() + 1);
        for (index, (column, value)) in self.assignments.into_iter().enumerate() {
            clauses.push(format!("{} = ?{}", column, index + 1));
            params.push(value);
        }
        params.push(Value::Integer(id));

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            self.table,
            clauses.join(", "),
            self.key,
            params.len()
        );

        Some(UpdateStatement { sql, params })
    }
}
