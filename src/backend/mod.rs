//! Consumer side of the chat/commerce backend.
//!
//! The backend itself is external: it owns recommendation logic, checkout
//! and payment capture. This module carries the wire types it speaks, a
//! thin async HTTP client, and an offline mock agent for demos and tests.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::BackendClient;
pub use error::BackendError;
pub use mock::MockAgent;
pub use types::{CartAddRequest, CartRemoveRequest, CartSummary, ChatReply, ChatRequest};
