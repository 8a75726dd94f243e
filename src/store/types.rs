//! Data model for chat sessions, messages and the shopping cart.
//!
//! Serialized shapes stay compatible with the browser client's
//! `localStorage` payloads: string session ids, lowercase sender tags and
//! cart lines flattened next to their quantity.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::ids::SessionId;

/// Originator of a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human customer.
    User,
    /// The sales agent.
    Bot,
}

/// A single product, either a recommendation or a cart line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier. Optional in mock flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Display name.
    pub name: String,
    /// Brand label.
    #[serde(default)]
    pub brand: String,
    /// Unit price, non-negative, in currency-agnostic units.
    pub price: f64,
    /// Image reference. Never fetched by the store.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Cart identity key: the sku when present, the display name otherwise.
    #[must_use]
    pub fn identity_key(&self) -> &str {
        self.sku.as_deref().unwrap_or(&self.name)
    }
}

/// One distinct cart entry with an aggregated quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line holds.
    #[serde(flatten)]
    pub product: Product,
    /// Aggregated quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Point-in-time cart totals, as computed by the commerce backend.
///
/// Attached to a bot message as a snapshot render, never the live cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line totals before tax and shipping.
    pub subtotal: f64,
    /// Tax amount.
    #[serde(default)]
    pub tax: f64,
    /// Shipping cost.
    pub shipping: f64,
    /// Grand total.
    pub total: f64,
    /// Total number of units across all lines.
    #[serde(default)]
    pub item_count: u32,
}

/// Order confirmation payload attached to a bot message after checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Backend-assigned order identifier.
    pub order_id: String,
    /// Order status label, e.g. `"confirmed"`.
    pub status: String,
    /// Charged total.
    pub total: f64,
}

/// A single chat message in a session transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message.
    pub sender: Sender,
    /// Displayable text. May be empty when structured payloads are present.
    #[serde(default)]
    pub text: String,
    /// Recommended products, in backend order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Product>,
    /// Optional cart snapshot attached to a bot message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartTotals>,
    /// Optional order confirmation attached to a bot message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderConfirmation>,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl Message {
    /// Build a plain user message timestamped now.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(Sender::User, text)
    }

    /// Build a plain bot message timestamped now.
    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self::plain(Sender::Bot, text)
    }

    fn plain(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            recommendations: Vec::new(),
            cart: None,
            order: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Attach a recommendation list.
    #[must_use]
    pub fn with_recommendations(mut self, recommendations: Vec<Product>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Attach a cart snapshot.
    #[must_use]
    pub fn with_cart(mut self, cart: CartTotals) -> Self {
        self.cart = Some(cart);
        self
    }

    /// Attach an order confirmation.
    #[must_use]
    pub fn with_order(mut self, order: OrderConfirmation) -> Self {
        self.order = Some(order);
        self
    }
}

/// One chat conversation thread with its own message history and title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier within the active user's session set.
    pub id: SessionId,
    /// Display title shown in the sidebar.
    pub title: String,
    /// Messages in append order, which is also display order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_prefers_sku() {
        let product = Product {
            sku: Some("JEANS_001".to_string()),
            name: "Minimalist Black Jeans".to_string(),
            brand: "Studio".to_string(),
            price: 2990.0,
            image: String::new(),
        };
        assert_eq!(product.identity_key(), "JEANS_001");
    }

    #[test]
    fn test_identity_key_falls_back_to_name() {
        let product = Product {
            sku: None,
            name: "White Oversized Tee".to_string(),
            brand: String::new(),
            price: 1490.0,
            image: String::new(),
        };
        assert_eq!(product.identity_key(), "White Oversized Tee");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::User).unwrap();
        assert_eq!(json, "\"user\"");
        let back: Sender = serde_json::from_str("\"bot\"").unwrap();
        assert_eq!(back, Sender::Bot);
    }

    #[test]
    fn test_cart_line_flattens_product_fields() {
        let line = CartLine {
            product: Product {
                sku: Some("TEE_001".to_string()),
                name: "White Oversized Tee".to_string(),
                brand: "Maison".to_string(),
                price: 1490.0,
                image: String::new(),
            },
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["sku"], "TEE_001");
        assert_eq!(json["quantity"], 2);

        let back: CartLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_message_deserializes_without_optional_fields() {
        let raw = r#"{"sender":"user","text":"hello"}"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.sender, Sender::User);
        assert!(message.recommendations.is_empty());
        assert!(message.cart.is_none());
        assert!(message.order.is_none());
        assert_eq!(message.timestamp, 0);
    }

    #[test]
    fn test_message_builders() {
        let message = Message::bot("Here you go").with_cart(CartTotals {
            subtotal: 100.0,
            tax: 18.0,
            shipping: 200.0,
            total: 318.0,
            item_count: 1,
        });
        assert_eq!(message.sender, Sender::Bot);
        assert!(message.cart.is_some());
        assert!(message.timestamp > 0);
    }
}
