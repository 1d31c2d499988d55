// Items on a pick list.
//
// An item is a thing on a shelf: what to show the picker (description and
// shelf slot) and where it is, so the router can steer toward it.

use pickar_nav::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickItem {
    /// Text shown in the details overlay.
    pub description: String,
    pub shelf_column: u32,
    pub shelf_row: u32,
    pub position: Vec3,
}

impl PickItem {
    pub fn new(description: impl Into<String>, shelf_column: u32, shelf_row: u32, position: Vec3) -> Self {
        Self {
            description: description.into(),
            shelf_column,
            shelf_row,
            position,
        }
    }

    /// One-line summary for the details overlay.
    pub fn details(&self) -> String {
        format!(
            "{} (column {}, row {})",
            self.description, self.shelf_column, self.shelf_row
        )
    }
}

/// Parse a pick list: a JSON array of items in picking order.
pub fn items_from_json(json: &str) -> Result<Vec<PickItem>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_include_shelf_slot() {
        let item = PickItem::new("M6 hex bolts, box of 100", 3, 2, Vec3::ZERO);
        assert_eq!(item.details(), "M6 hex bolts, box of 100 (column 3, row 2)");
    }

    #[test]
    fn pick_list_loads_in_order() {
        let json = r#"[
            { "description": "tape", "shelf_column": 1, "shelf_row": 0,
              "position": { "x": 4.0, "y": 1.2, "z": 4.5 } },
            { "description": "gloves", "shelf_column": 6, "shelf_row": 3,
              "position": { "x": 8.0, "y": 0.4, "z": 8.5 } }
        ]"#;
        let items = items_from_json(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "tape");
        assert_eq!(items[1].position, Vec3::new(8.0, 0.4, 8.5));
    }
}
