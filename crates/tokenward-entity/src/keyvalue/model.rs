//! Key/value picklist entry.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One option of a named picklist (e.g. `name = "Region"`, `value = "EU"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Picklist the entry belongs to.
    pub name: String,
    /// Stored value.
    pub value: String,
    /// Label shown to users.
    pub text: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl KeyValue {
    /// Create an entry without label or description.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            text: None,
            description: None,
        }
    }

    /// Picklist ordering: by name, then by value.
    pub fn picklist_order(a: &Self, b: &Self) -> Ordering {
        a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picklist_order() {
        let mut items = vec![
            KeyValue::new("Status", "Open"),
            KeyValue::new("Region", "US"),
            KeyValue::new("Region", "EU"),
        ];
        items.sort_by(KeyValue::picklist_order);
        let flat: Vec<_> = items
            .iter()
            .map(|kv| format!("{}:{}", kv.name, kv.value))
            .collect();
        assert_eq!(flat, vec!["Region:EU", "Region:US", "Status:Open"]);
    }
}
