//! Active List Repair
//!
//! Run after every structural change: the pointer must name a live list,
//! fall back to the first list, or be cleared when there are none.

use crate::domain::{Collection, ListId};

pub fn repair_active(collection: &Collection, active: Option<&ListId>) -> Option<ListId> {
    match active {
        Some(id) if collection.contains(id) => Some(id.clone()),
        _ => collection.first_id().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FoodList;

    fn collection(ids: &[&str]) -> Collection {
        Collection::new(ids.iter().map(|id| FoodList::new(*id, id.to_uppercase())).collect())
    }

    #[test]
    fn test_keeps_valid_pointer() {
        let lists = collection(&["a", "b"]);
        assert_eq!(repair_active(&lists, Some(&ListId::new("b"))), Some(ListId::new("b")));
    }

    #[test]
    fn test_stale_pointer_moves_to_first() {
        let lists = collection(&["a", "b"]);
        assert_eq!(repair_active(&lists, Some(&ListId::new("gone"))), Some(ListId::new("a")));
    }

    #[test]
    fn test_missing_pointer_picks_first() {
        let lists = collection(&["a"]);
        assert_eq!(repair_active(&lists, None), Some(ListId::new("a")));
    }

    #[test]
    fn test_empty_collection_clears_pointer() {
        let lists = collection(&[]);
        assert_eq!(repair_active(&lists, Some(&ListId::new("a"))), None);
        assert_eq!(repair_active(&lists, None), None);
    }
}
