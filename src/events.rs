//! Session Events
//!
//! What the shell listens to instead of polling the session.

use tokio::sync::mpsc;

use crate::domain::{Collection, FoodItem, ListId};
use crate::engine::SpinRejection;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A mutation was committed; carries the new collection
    ListsChanged(Collection),
    /// The active pointer named a list that no longer exists and was repaired
    ActiveListInvalid,
    SpinRejected(SpinRejection),
    SpinResult(FoodItem),
    /// A suggestion request produced nothing usable
    SuggestError(ListId),
}

pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;
pub(crate) type EventSender = mpsc::UnboundedSender<SessionEvent>;
