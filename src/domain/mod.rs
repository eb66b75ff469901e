//! Domain Layer
//!
//! Food lists, their items, and the collection document they live in.
//! Nothing here touches storage, timers or the network.

mod collection;
mod entity;
mod id;
mod item;
mod list;

pub use collection::Collection;
pub use entity::{position_by_id, DomainError, DomainResult, Entity};
pub use id::{IdGenerator, ItemId, ListId};
pub use item::{FoodItem, SUGGESTED_ICON, USER_ICON};
pub use list::FoodList;
