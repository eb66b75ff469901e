//! Session
//!
//! Shell-facing state: the collection, the active-list pointer, the spin
//! engine, in-flight suggestion requests and the event channel. Every
//! structural change goes through `commit`, which repairs the active
//! pointer, persists the collection and notifies the shell. A session whose
//! stored document could not be read keeps its changes in memory only.

use std::collections::HashSet;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::{Collection, DomainError, DomainResult, FoodItem, FoodList, IdGenerator, ItemId, ListId, USER_ICON};
use crate::engine::{SpinEngine, SpinRequest};
use crate::events::{EventReceiver, EventSender, SessionEvent};
use crate::gateway::SuggestionGateway;
use crate::repository;
use crate::store::DocumentStore;

/// Names requested per suggestion call unless configured otherwise
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

/// An outstanding suggestion request for one list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestTicket {
    list_id: ListId,
    context: String,
    count: usize,
}

impl SuggestTicket {
    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// The list's name, handed to the gateway as context
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

fn items_of<'a>(collection: &'a Collection, active: Option<&ListId>) -> &'a [FoodItem] {
    active
        .and_then(|id| collection.find(id))
        .map(|list| list.items.as_slice())
        .unwrap_or(&[])
}

pub struct Session {
    collection: Collection,
    active_list_id: Option<ListId>,
    engine: SpinEngine,
    ids: IdGenerator,
    store: DocumentStore,
    events: Option<EventSender>,
    suggesting: HashSet<ListId>,
    last_result: Option<FoodItem>,
    suggestion_count: usize,
    writable: bool,
}

impl Session {
    /// Load the collection from `store`, seeding and saving defaults if needed
    pub async fn open(store: DocumentStore, engine: SpinEngine) -> Self {
        let loaded = store.load().await;
        info!(source = ?loaded.source, lists = loaded.collection.len(), "session opened");

        let mut session = Self::with_collection(loaded.collection, store, engine);
        session.writable = loaded.source.is_writable();
        if loaded.source.needs_initial_save() {
            session.persist().await;
        }
        session
    }

    pub async fn from_config(config: &Config) -> Self {
        Self::open(config.document_store(), SpinEngine::new(config.spin_settings()))
            .await
            .with_suggestion_count(config.gateway.suggestion_count)
    }

    /// Session over an already loaded collection. Nothing is written.
    pub fn with_collection(collection: Collection, store: DocumentStore, engine: SpinEngine) -> Self {
        let active_list_id = repository::repair_active(&collection, None);
        Self {
            collection,
            active_list_id,
            engine,
            ids: IdGenerator::new(),
            store,
            events: None,
            suggesting: HashSet::new(),
            last_result: None,
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
            writable: true,
        }
    }

    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self
    }

    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Start receiving events. A later call replaces the earlier receiver.
    pub fn subscribe(&mut self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    // ========================
    // Queries
    // ========================

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn active_list_id(&self) -> Option<&ListId> {
        self.active_list_id.as_ref()
    }

    pub fn active_list(&self) -> Option<&FoodList> {
        self.active_list_id.as_ref().and_then(|id| self.collection.find(id))
    }

    /// Items of the active list; empty when no list is active
    pub fn active_items(&self) -> &[FoodItem] {
        items_of(&self.collection, self.active_list_id.as_ref())
    }

    pub fn engine(&self) -> &SpinEngine {
        &self.engine
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    pub fn is_suggesting(&self, list_id: &ListId) -> bool {
        self.suggesting.contains(list_id)
    }

    /// False when the stored document could not be read and is left alone
    pub fn is_persistent(&self) -> bool {
        self.writable
    }

    /// Winner of the last settled spin, until dismissed
    pub fn last_result(&self) -> Option<&FoodItem> {
        self.last_result.as_ref()
    }

    // ========================
    // List and item mutations
    // ========================

    /// Make `list_id` active. An unknown id leaves the current pointer alone.
    pub fn select_list(&mut self, list_id: &ListId) -> DomainResult<()> {
        if self.collection.contains(list_id) {
            self.active_list_id = Some(list_id.clone());
            return Ok(());
        }

        // Only a pointer that no longer resolves gets moved
        self.repair_pointer();
        Err(DomainError::NotFound(format!("list {}", list_id)))
    }

    /// Create a list and make it active
    pub async fn create_list(&mut self, name: &str) -> DomainResult<ListId> {
        let (next, id) = repository::create_list(&self.collection, &mut self.ids, name)?;
        self.active_list_id = Some(id.clone());
        self.commit(next).await;
        Ok(id)
    }

    pub async fn rename_list(&mut self, list_id: &ListId, name: &str) -> DomainResult<()> {
        let next = repository::rename_list(&self.collection, list_id, name)?;
        self.commit(next).await;
        Ok(())
    }

    pub async fn delete_list(&mut self, list_id: &ListId) -> DomainResult<()> {
        let next = repository::delete_list(&self.collection, list_id)?;
        self.suggesting.remove(list_id);
        self.commit(next).await;
        Ok(())
    }

    /// Add a user-typed item to the front of a list
    pub async fn add_item(&mut self, list_id: &ListId, name: &str) -> DomainResult<ItemId> {
        let (next, id) = repository::add_item(&self.collection, &mut self.ids, list_id, name, Some(USER_ICON))?;
        self.commit(next).await;
        Ok(id)
    }

    pub async fn delete_item(&mut self, list_id: &ListId, item_id: &ItemId) -> DomainResult<()> {
        let next = repository::delete_item(&self.collection, list_id, item_id)?;
        self.commit(next).await;
        Ok(())
    }

    /// Prepend already fetched suggestions. Returns how many were added.
    pub async fn apply_suggestions(&mut self, list_id: &ListId, names: &[String]) -> DomainResult<usize> {
        let (next, added) = repository::apply_suggestions(&self.collection, &mut self.ids, list_id, names)?;
        if added > 0 {
            self.commit(next).await;
        }
        Ok(added)
    }

    // ========================
    // Suggestions
    // ========================

    /// Mark a suggestion request for `list_id` as outstanding.
    ///
    /// Fails with `Conflict` while another request for the same list is
    /// still in flight.
    pub fn begin_suggest(&mut self, list_id: &ListId) -> DomainResult<SuggestTicket> {
        let context = self
            .collection
            .find(list_id)
            .map(|list| list.name.clone())
            .ok_or_else(|| DomainError::NotFound(format!("list {}", list_id)))?;

        if !self.suggesting.insert(list_id.clone()) {
            return Err(DomainError::Conflict(format!("suggestions already pending for list {}", list_id)));
        }
        Ok(SuggestTicket {
            list_id: list_id.clone(),
            context,
            count: self.suggestion_count,
        })
    }

    /// Close an outstanding request and apply what the gateway returned
    pub async fn finish_suggest(&mut self, ticket: SuggestTicket, names: Vec<String>) -> DomainResult<usize> {
        self.suggesting.remove(&ticket.list_id);

        match self.apply_suggestions(&ticket.list_id, &names).await {
            Ok(0) => {
                warn!(list_id = %ticket.list_id, "no usable suggestions");
                self.emit(SessionEvent::SuggestError(ticket.list_id));
                Ok(0)
            }
            Ok(added) => Ok(added),
            Err(e) => {
                self.emit(SessionEvent::SuggestError(ticket.list_id));
                Err(e)
            }
        }
    }

    /// Ask `gateway` for names and prepend them to `list_id`
    pub async fn suggest(&mut self, gateway: &dyn SuggestionGateway, list_id: &ListId) -> DomainResult<usize> {
        let ticket = self.begin_suggest(list_id)?;
        let names = gateway.suggest(ticket.context(), ticket.count()).await;
        self.finish_suggest(ticket, names).await
    }

    // ========================
    // Spinning
    // ========================

    /// Start a spin over the active list's items
    pub fn request_spin(&mut self) -> SpinRequest {
        let items = items_of(&self.collection, self.active_list_id.as_ref());
        let request = self.engine.request_spin(items);
        if let SpinRequest::Rejected(reason) = &request {
            debug!(?reason, "spin rejected");
            self.emit(SessionEvent::SpinRejected(*reason));
        }
        request
    }

    /// Settle the running spin and report its winner
    pub fn complete_spin(&mut self) -> Option<FoodItem> {
        let winner = self.engine.complete()?;
        info!(item_id = %winner.id, name = %winner.name, "spin settled");
        self.last_result = Some(winner.clone());
        self.emit(SessionEvent::SpinResult(winner.clone()));
        Some(winner)
    }

    /// Request, wait out the settle duration, complete. `None` if rejected.
    pub async fn spin(&mut self) -> Option<FoodItem> {
        let settle = match self.request_spin() {
            SpinRequest::Accepted(plan) => plan.settle,
            SpinRequest::Rejected(_) => return None,
        };
        tokio::time::sleep(settle).await;
        self.complete_spin()
    }

    pub fn dismiss_result(&mut self) -> Option<FoodItem> {
        self.last_result.take()
    }

    // ========================
    // Internals
    // ========================

    async fn commit(&mut self, next: Collection) {
        self.collection = next;
        self.repair_pointer();
        self.persist().await;
        self.emit(SessionEvent::ListsChanged(self.collection.clone()));
    }

    fn repair_pointer(&mut self) {
        let repaired = repository::repair_active(&self.collection, self.active_list_id.as_ref());
        if self.active_list_id.is_some() && repaired != self.active_list_id {
            debug!(from = ?self.active_list_id, to = ?repaired, "active list repaired");
            self.emit(SessionEvent::ActiveListInvalid);
        }
        self.active_list_id = repaired;
    }

    async fn persist(&self) {
        if !self.writable {
            warn!(key = %self.store.key(), "stored collection is unavailable, change kept in memory only");
            return;
        }
        if let Err(e) = self.store.save(&self.collection).await {
            error!(key = %self.store.key(), error = %e, "failed to persist collection");
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
