//! Client-side session and cart state management.
//!
//! [`SessionCartStore`] owns the chat sessions and the shopping cart of the
//! active user, enforces identifier and ordering invariants, and mirrors
//! every mutation to a key-value persistence collaborator. All operations
//! are synchronous and assume single-threaded, UI-event-driven access; a
//! multi-threaded host must serialize calls externally.

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod persistence;
pub mod types;

pub use config::StoreConfig;
pub use error::StoreError;
pub use events::StoreEvent;
pub use ids::SessionId;
pub use persistence::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use types::{
    CartLine, CartTotals, ChatSession, Message, OrderConfirmation, Product, Sender,
};

use serde::Serialize;
use tracing::{debug, info, warn};

use events::Observer;
use ids::IdGenerator;

/// Owns chat sessions and the shopping cart for the active user.
///
/// In-memory state is authoritative for the session's lifetime; persistence
/// is best-effort caching for restart recovery. A write failure is logged
/// and never rolls back a mutation.
pub struct SessionCartStore {
    config: StoreConfig,
    storage: Box<dyn StorageBackend>,
    sessions: Vec<ChatSession>,
    cart: Vec<CartLine>,
    active_session: Option<SessionId>,
    active_user: Option<String>,
    ids: IdGenerator,
    observers: Vec<Observer>,
}

impl SessionCartStore {
    /// Create a store over `storage` with default configuration.
    #[must_use]
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    /// Create a store over `storage` with an explicit configuration.
    #[must_use]
    pub fn with_config(storage: Box<dyn StorageBackend>, config: StoreConfig) -> Self {
        Self {
            config,
            storage,
            sessions: Vec::new(),
            cart: Vec::new(),
            active_session: None,
            active_user: None,
            ids: IdGenerator::default(),
            observers: Vec::new(),
        }
    }

    /// Load persisted sessions and cart for `user` and make them live.
    ///
    /// Missing or malformed persisted data never fails the caller: it is
    /// discarded with a warning and replaced by a single fresh default
    /// session. The first session in the restored list becomes active.
    pub fn activate(&mut self, user: impl Into<String>) {
        let user = user.into();
        self.sessions.clear();
        self.cart.clear();
        self.active_session = None;

        let chats_key = persistence::chats_key(&self.config.storage_prefix, &user);
        if let Some(raw) = self.storage.read(&chats_key) {
            match serde_json::from_str::<Vec<ChatSession>>(&raw) {
                Ok(sessions) => self.sessions = sessions,
                Err(err) => warn!("discarding malformed session data for {user}: {err}"),
            }
        }

        let cart_key = persistence::cart_key(&self.config.storage_prefix, &user);
        if let Some(raw) = self.storage.read(&cart_key) {
            match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(cart) => self.cart = cart,
                Err(err) => warn!("discarding malformed cart data for {user}: {err}"),
            }
        }

        // Seed the id generator past restored ids so new ids stay unique.
        for session in &self.sessions {
            self.ids.observe(&session.id);
        }

        if self.sessions.is_empty() {
            let session = self.default_session();
            self.active_session = Some(session.id.clone());
            self.sessions.push(session);
        } else {
            self.active_session = self.sessions.first().map(|s| s.id.clone());
        }

        self.active_user = Some(user.clone());
        self.persist();

        let session_count = self.sessions.len();
        info!("activated user {user} with {session_count} session(s)");
        self.emit(&StoreEvent::Activated { user, session_count });
    }

    /// Clear all in-memory state. Persisted data is left intact for later
    /// restoration.
    pub fn deactivate(&mut self) {
        if let Some(user) = self.active_user.take() {
            debug!("deactivated user {user}");
        }
        self.sessions.clear();
        self.cart.clear();
        self.active_session = None;
    }

    /// Create a new default-titled session at the front of the list and
    /// make it active. Returns the new session's id.
    pub fn create_session(&mut self) -> SessionId {
        let session = self.default_session();
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.active_session = Some(id.clone());
        self.persist();
        self.emit(&StoreEvent::SessionCreated(id.clone()));
        id
    }

    /// Append `message` to the session `id`.
    ///
    /// While the session still carries the default title, the first
    /// non-empty user message also sets the title to its leading characters
    /// (at most [`StoreConfig::title_max_chars`]). This happens at most once
    /// per session and never after an explicit rename.
    ///
    /// # Errors
    /// [`StoreError::SessionNotFound`] when `id` does not exist.
    pub fn append_message(&mut self, id: &SessionId, message: Message) -> Result<(), StoreError> {
        let default_title = self.config.default_title.clone();
        let max_chars = self.config.title_max_chars;

        let session = self
            .sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;

        let text = message.text.trim();
        let derive_title =
            session.title == default_title && message.sender == Sender::User && !text.is_empty();
        if derive_title {
            session.title = text.chars().take(max_chars).collect();
        }
        session.messages.push(message);

        self.persist();
        self.emit(&StoreEvent::MessageAppended(id.clone()));
        if derive_title {
            self.emit(&StoreEvent::SessionRenamed(id.clone()));
        }
        Ok(())
    }

    /// Overwrite the title of session `id` unconditionally.
    ///
    /// An explicit rename always wins: it bypasses the default-title guard,
    /// and later messages never touch the title again.
    ///
    /// # Errors
    /// [`StoreError::SessionNotFound`] when `id` does not exist,
    /// [`StoreError::InvalidTitle`] when `new_title` is empty after trimming.
    pub fn rename_session(&mut self, id: &SessionId, new_title: &str) -> Result<(), StoreError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;

        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidTitle);
        }
        session.title = trimmed.to_string();

        self.persist();
        self.emit(&StoreEvent::SessionRenamed(id.clone()));
        Ok(())
    }

    /// Remove session `id`.
    ///
    /// When the deleted session was active, the first remaining session
    /// becomes active. The session set is never left empty while a user is
    /// active: deleting the last session creates a fresh default one.
    ///
    /// # Errors
    /// [`StoreError::SessionNotFound`] when `id` does not exist.
    pub fn delete_session(&mut self, id: &SessionId) -> Result<(), StoreError> {
        let idx = self
            .sessions
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        let was_active = self.active_session.as_ref() == Some(id);
        self.sessions.remove(idx);

        if self.sessions.is_empty() {
            let session = self.default_session();
            self.active_session = Some(session.id.clone());
            self.sessions.push(session);
        } else if was_active {
            self.active_session = self.sessions.first().map(|s| s.id.clone());
        }

        self.persist();
        self.emit(&StoreEvent::SessionDeleted(id.clone()));
        Ok(())
    }

    /// Switch the active session to `id`.
    ///
    /// # Errors
    /// [`StoreError::SessionNotFound`] when `id` does not exist.
    pub fn set_active_session(&mut self, id: &SessionId) -> Result<(), StoreError> {
        if !self.sessions.iter().any(|s| &s.id == id) {
            return Err(StoreError::SessionNotFound(id.to_string()));
        }
        self.active_session = Some(id.clone());
        self.persist();
        self.emit(&StoreEvent::ActiveSessionChanged(id.clone()));
        Ok(())
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// Lines are keyed by [`Product::identity_key`]: adding a product whose
    /// key already exists increments that line instead of duplicating it.
    /// New lines are appended after existing ones.
    ///
    /// # Errors
    /// [`StoreError::InvalidQuantity`] when `quantity` is not a positive
    /// integer.
    pub fn add_to_cart(&mut self, product: Product, quantity: i64) -> Result<(), StoreError> {
        if quantity < 1 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| StoreError::InvalidQuantity(quantity))?;

        if let Some(line) = self
            .cart
            .iter_mut()
            .find(|line| line.product.identity_key() == product.identity_key())
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.cart.push(CartLine { product, quantity });
        }

        self.persist();
        self.emit(&StoreEvent::CartChanged {
            line_count: self.cart.len(),
        });
        Ok(())
    }

    /// Remove the cart line at `index`.
    ///
    /// # Errors
    /// [`StoreError::IndexOutOfRange`] when `index` is outside the cart.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<(), StoreError> {
        let len = self.cart.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        self.cart.remove(index);

        self.persist();
        self.emit(&StoreEvent::CartChanged {
            line_count: self.cart.len(),
        });
        Ok(())
    }

    /// Set the quantity of the cart line at `index`, clamped to a minimum
    /// of 1. Removal goes through [`Self::remove_from_cart`], never through
    /// a decrement to zero.
    ///
    /// # Errors
    /// [`StoreError::IndexOutOfRange`] when `index` is outside the cart,
    /// [`StoreError::InvalidQuantity`] when `qty` does not fit a `u32`, the
    /// same bound [`Self::add_to_cart`] enforces.
    pub fn set_quantity(&mut self, index: usize, qty: i64) -> Result<(), StoreError> {
        let len = self.cart.len();
        let line = self
            .cart
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        line.quantity =
            u32::try_from(qty.max(1)).map_err(|_| StoreError::InvalidQuantity(qty))?;

        self.persist();
        self.emit(&StoreEvent::CartChanged {
            line_count: self.cart.len(),
        });
        Ok(())
    }

    /// Sum of `price * quantity` over all cart lines. Pure, no side effects.
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units in the cart, for the sidebar badge.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    /// Write the active user's sessions and cart to the persistence
    /// collaborator. A no-op while no user is active; failures are logged
    /// and absorbed.
    pub fn persist(&mut self) {
        let Some(user) = self.active_user.as_deref() else {
            return;
        };
        let chats_key = persistence::chats_key(&self.config.storage_prefix, user);
        let cart_key = persistence::cart_key(&self.config.storage_prefix, user);
        Self::write_json(self.storage.as_mut(), &chats_key, &self.sessions);
        Self::write_json(self.storage.as_mut(), &cart_key, &self.cart);
    }

    /// Register an observer notified after every mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Sessions in display order, most recently created first.
    #[must_use]
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Identifier of the active session, if a user is active.
    #[must_use]
    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.active_session.as_ref()
    }

    /// The active session, if a user is active.
    #[must_use]
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_session.as_ref()?;
        self.sessions.iter().find(|s| &s.id == id)
    }

    /// The active user identifier, if any.
    #[must_use]
    pub fn active_user(&self) -> Option<&str> {
        self.active_user.as_deref()
    }

    /// Look up a session by id.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    fn default_session(&mut self) -> ChatSession {
        ChatSession {
            id: self.ids.next(),
            title: self.config.default_title.clone(),
            messages: Vec::new(),
        }
    }

    fn write_json<T: Serialize>(storage: &mut dyn StorageBackend, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(err) = storage.write(key, &raw) {
                    warn!("persist of {key} failed: {err}");
                }
            }
            Err(err) => warn!("serialization for {key} failed: {err}"),
        }
    }

    fn emit(&self, event: &StoreEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}
