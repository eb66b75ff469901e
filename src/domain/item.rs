//! Food Item Entity
//!
//! A single named food option belonging to exactly one list.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::id::ItemId;

/// Icon tag for items typed in by the user
pub const USER_ICON: &str = "restaurant";
/// Icon tag marking machine-suggested items
pub const SUGGESTED_ICON: &str = "smart_toy";

/// A food option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Unique within the owning list
    pub id: ItemId,
    /// Display name, never empty after trimming
    pub name: String,
    /// Presentation hint only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl FoodItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
        }
    }

    pub fn with_icon(id: impl Into<ItemId>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: Some(icon.into()),
        }
    }

    /// Whether this item came from the suggestion gateway
    pub fn is_suggested(&self) -> bool {
        self.icon.as_deref() == Some(SUGGESTED_ICON)
    }
}

impl Entity for FoodItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = FoodItem::new("1", "Phở");
        assert_eq!(item.id().as_str(), "1");
        assert_eq!(item.name, "Phở");
        assert!(item.icon.is_none());
        assert!(!item.is_suggested());
    }

    #[test]
    fn test_icon_omitted_when_absent() {
        let json = serde_json::to_string(&FoodItem::new("1", "Phở")).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"Phở"}"#);

        let suggested = FoodItem::with_icon("2", "Salad", SUGGESTED_ICON);
        assert!(suggested.is_suggested());
    }
}
