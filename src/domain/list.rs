//! Food List Entity
//!
//! A named, ordered list of items. Newest items sit at the front.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::id::ListId;
use super::item::FoodItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodList {
    /// Unique within the collection
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<FoodItem>,
    /// Seed lists the shell should not offer to delete. Not enforced here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl FoodList {
    pub fn new(id: impl Into<ListId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
            is_default: None,
        }
    }

    /// Seed list carrying the default flag
    pub fn seeded(id: impl Into<ListId>, name: impl Into<String>, items: Vec<FoodItem>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items,
            is_default: Some(true),
        }
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_default.unwrap_or(false)
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id.as_str() == id)
    }
}

impl Entity for FoodList {
    type Id = ListId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flag_is_camel_case() {
        let list = FoodList::seeded("normal", "Lộn Xộn", Vec::new());
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains(r#""isDefault":true"#));
        assert!(!list.is_deletable());
    }

    #[test]
    fn test_user_list_is_deletable() {
        let list = FoodList::new("a", "Tối nay");
        assert!(list.is_deletable());
        let json = serde_json::to_string(&list).unwrap();
        assert!(!json.contains("isDefault"));
    }

    #[test]
    fn test_missing_items_deserialize_empty() {
        let list: FoodList = serde_json::from_str(r#"{"id":"a","name":"A"}"#).unwrap();
        assert!(list.items.is_empty());
    }
}
