//! Repository Layer
//!
//! Pure operations over the collection document. Every operation takes the
//! current collection by reference and returns a new one; on error the
//! caller keeps what it had.
//! - list_ops: create, rename, delete lists
//! - item_ops: add, delete items and apply gateway suggestions
//! - active: active-list pointer repair

mod active;
mod item_ops;
mod list_ops;

#[cfg(test)]
mod tests;

pub use active::repair_active;
pub use item_ops::{add_item, apply_suggestions, delete_item};
pub use list_ops::{create_list, delete_list, rename_list};

use crate::domain::{DomainError, DomainResult};

/// Trimmed name, or a validation error naming `what`
pub(crate) fn validated_name(name: &str, what: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{} name is empty", what)));
    }
    Ok(trimmed.to_string())
}
