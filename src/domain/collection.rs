//! Collection Document
//!
//! The ordered sequence of lists, persisted as a single JSON array.

use serde::{Deserialize, Serialize};

use super::entity::position_by_id;
use super::id::ListId;
use super::item::FoodItem;
use super::list::FoodList;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    lists: Vec<FoodList>,
}

impl Collection {
    pub fn new(lists: Vec<FoodList>) -> Self {
        Self { lists }
    }

    /// The seed used when nothing has been stored yet
    pub fn defaults() -> Self {
        Self::new(vec![
            FoodList::seeded(
                "normal",
                "Lộn Xộn",
                vec![
                    FoodItem::with_icon("1", "Phở Bò", "ramen_dining"),
                    FoodItem::with_icon("2", "Cơm Thu", "rice_bowl"),
                    FoodItem::with_icon("3", "Bún Chả", "lunch_dining"),
                    FoodItem::with_icon("6", "Bánh Mì", "bakery_dining"),
                ],
            ),
            FoodList::seeded(
                "healthy",
                "Healthy/Ăn Kiêng",
                vec![
                    FoodItem::with_icon("4", "Gỏi Cuốn", "local_pizza"),
                    FoodItem::with_icon("5", "Salad", "nutrition"),
                ],
            ),
        ])
    }

    pub fn lists(&self) -> &[FoodList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn find(&self, id: &ListId) -> Option<&FoodList> {
        self.lists.iter().find(|list| &list.id == id)
    }

    pub fn contains(&self, id: &ListId) -> bool {
        self.find(id).is_some()
    }

    pub fn contains_list_id(&self, id: &str) -> bool {
        self.lists.iter().any(|list| list.id.as_str() == id)
    }

    pub fn first_id(&self) -> Option<&ListId> {
        self.lists.first().map(|list| &list.id)
    }

    pub(crate) fn position(&self, id: &ListId) -> Option<usize> {
        position_by_id(&self.lists, id)
    }

    pub(crate) fn lists_mut(&mut self) -> &mut Vec<FoodList> {
        &mut self.lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seed() {
        let seed = Collection::defaults();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed.first_id(), Some(&ListId::new("normal")));

        let normal = seed.find(&ListId::new("normal")).unwrap();
        assert_eq!(normal.items.len(), 4);
        assert_eq!(normal.items[0].name, "Phở Bò");
        assert!(seed.lists().iter().all(|list| !list.is_deletable()));
    }

    #[test]
    fn test_document_is_plain_array() {
        let collection = Collection::new(vec![FoodList::new("a", "A")]);
        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, r#"[{"id":"a","name":"A","items":[]}]"#);

        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
