//! Record types - the persisted catalog entity
//!
//! A [`Record`] is one product row. A [`RecordPatch`] is the partial field set
//! used by updates: a `None` field is left untouched in storage.

use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// `id` is assigned by the storage engine on insert and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Storage-assigned identifier
    pub id: i64,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Quantity on hand
    pub qty: i64,
}

/// The fields an update may change. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub qty: Option<i64>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the new price
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the new quantity
    pub fn with_qty(mut self, qty: i64) -> Self {
        self.qty = Some(qty);
        self
    }

    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.qty.is_none()
    }

    /// Number of supplied fields
    pub fn len(&self) -> usize {
        [self.name.is_some(), self.price.is_some(), self.qty.is_some()]
            .iter()
            .filter(|set| **set)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        let patch = RecordPatch::new();
        assert!(patch.is_empty());
        assert_eq!(patch.len(), 0);
    }

    #[test]
    fn test_patch_builder() {
        let patch = RecordPatch::new().with_price(2.5).with_qty(7);
        assert!(!patch.is_empty());
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.name, None);
        assert_eq!(patch.price, Some(2.5));
        assert_eq!(patch.qty, Some(7));
    }
}
