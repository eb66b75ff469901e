//! Item Operations
//!
//! New items are always prepended: the front of a list is its newest entry.

use tracing::debug;

use super::validated_name;
use crate::domain::{
    position_by_id, Collection, DomainError, DomainResult, FoodItem, IdGenerator, ItemId, ListId,
    SUGGESTED_ICON,
};

fn list_index(collection: &Collection, list_id: &ListId) -> DomainResult<usize> {
    collection
        .position(list_id)
        .ok_or_else(|| DomainError::NotFound(format!("list {}", list_id)))
}

/// Prepend a new item to a list. Returns the new collection and the item's id.
pub fn add_item(
    collection: &Collection,
    ids: &mut IdGenerator,
    list_id: &ListId,
    name: &str,
    icon: Option<&str>,
) -> DomainResult<(Collection, ItemId)> {
    let name = validated_name(name, "item")?;
    let index = list_index(collection, list_id)?;

    let mut next = collection.clone();
    let list = &mut next.lists_mut()[index];
    let id = ids.next_item_id(|candidate| list.contains_item(candidate));
    list.items.insert(
        0,
        FoodItem {
            id: id.clone(),
            name,
            icon: icon.map(str::to_string),
        },
    );
    debug!(list_id = %list_id, item_id = %id, "added item");
    Ok((next, id))
}

pub fn delete_item(collection: &Collection, list_id: &ListId, item_id: &ItemId) -> DomainResult<Collection> {
    let index = list_index(collection, list_id)?;
    let item_index = position_by_id(&collection.lists()[index].items, item_id)
        .ok_or_else(|| DomainError::NotFound(format!("item {} in list {}", item_id, list_id)))?;

    let mut next = collection.clone();
    next.lists_mut()[index].items.remove(item_index);
    debug!(list_id = %list_id, item_id = %item_id, "deleted item");
    Ok(next)
}

/// Prepend gateway suggestions as one block, keeping their order.
///
/// Names are trimmed and blanks skipped. Returns the new collection and the
/// number of items actually added.
pub fn apply_suggestions<S: AsRef<str>>(
    collection: &Collection,
    ids: &mut IdGenerator,
    list_id: &ListId,
    names: &[S],
) -> DomainResult<(Collection, usize)> {
    let index = list_index(collection, list_id)?;

    let mut next = collection.clone();
    let list = &mut next.lists_mut()[index];
    let mut fresh: Vec<FoodItem> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        let id = ids.next_item_id(|candidate| {
            list.contains_item(candidate) || fresh.iter().any(|item| item.id.as_str() == candidate)
        });
        fresh.push(FoodItem::with_icon(id, name, SUGGESTED_ICON));
    }

    let added = fresh.len();
    list.items.splice(0..0, fresh);
    debug!(list_id = %list_id, added, "applied suggestions");
    Ok((next, added))
}
