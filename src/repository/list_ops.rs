//! List Operations

use tracing::debug;

use super::validated_name;
use crate::domain::{Collection, DomainError, DomainResult, FoodList, IdGenerator, ListId};

/// Append a new empty list. Returns the new collection and the list's id.
pub fn create_list(
    collection: &Collection,
    ids: &mut IdGenerator,
    name: &str,
) -> DomainResult<(Collection, ListId)> {
    let name = validated_name(name, "list")?;
    let id = ids.next_list_id(|candidate| collection.contains_list_id(candidate));

    let mut next = collection.clone();
    next.lists_mut().push(FoodList::new(id.clone(), name));
    debug!(list_id = %id, "created list");
    Ok((next, id))
}

pub fn rename_list(collection: &Collection, id: &ListId, name: &str) -> DomainResult<Collection> {
    let name = validated_name(name, "list")?;
    let index = collection
        .position(id)
        .ok_or_else(|| DomainError::NotFound(format!("list {}", id)))?;

    let mut next = collection.clone();
    next.lists_mut()[index].name = name;
    Ok(next)
}

/// Remove a list and all of its items
pub fn delete_list(collection: &Collection, id: &ListId) -> DomainResult<Collection> {
    let index = collection
        .position(id)
        .ok_or_else(|| DomainError::NotFound(format!("list {}", id)))?;

    let mut next = collection.clone();
    next.lists_mut().remove(index);
    debug!(list_id = %id, "deleted list");
    Ok(next)
}
