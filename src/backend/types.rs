//! Wire types for the chat/commerce backend.
//!
//! Field names follow the backend's JSON (snake_case), so these types
//! serialize to exactly what the service expects.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::store::types::{CartLine, CartTotals, Message, OrderConfirmation, Product, Sender};

/// Channel tag sent with chat requests from this client.
pub const DEFAULT_CHANNEL: &str = "web";

/// Fallback text used when the backend returns an empty reply.
pub const EMPTY_REPLY_FALLBACK: &str = "No reply";

/// Request body for `POST /chat`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Session the message belongs to.
    pub session_id: String,
    /// Customer identifier, the login email in this client.
    pub customer_id: String,
    /// Originating channel, e.g. `"web"`.
    pub channel: String,
    /// The user's message text.
    pub message: String,
}

impl ChatRequest {
    /// Build a request on the default channel.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        customer_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            customer_id: customer_id.into(),
            channel: DEFAULT_CHANNEL.to_string(),
            message: message.into(),
        }
    }

    /// Override the channel tag.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }
}

/// Response body of `POST /chat`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Agent reply text.
    #[serde(default)]
    pub reply: String,
    /// Recommended products, in backend order.
    #[serde(default)]
    pub recommendations: Vec<Product>,
    /// Cart totals snapshot, when the turn touched the cart.
    #[serde(default)]
    pub cart: Option<CartTotals>,
    /// Order confirmation, when the turn completed a checkout.
    #[serde(default)]
    pub order: Option<OrderConfirmation>,
}

impl ChatReply {
    /// Translate into a bot [`Message`] for the session transcript.
    ///
    /// An empty reply degrades to [`EMPTY_REPLY_FALLBACK`];
    /// recommendation order is preserved.
    #[must_use]
    pub fn into_message(self) -> Message {
        let text = if self.reply.trim().is_empty() {
            EMPTY_REPLY_FALLBACK.to_string()
        } else {
            self.reply
        };
        Message {
            sender: Sender::Bot,
            text,
            recommendations: self.recommendations,
            cart: self.cart,
            order: self.order,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Request body for `POST /cart/add`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartAddRequest {
    /// Customer identifier.
    pub customer_id: String,
    /// Catalog identifier of the product to add.
    pub sku: String,
    /// Units to add.
    pub quantity: u32,
    /// Size label; the backend defaults to `"M"`.
    pub size: String,
    /// Optional color label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartAddRequest {
    /// Build a single-unit, size-M request.
    #[must_use]
    pub fn new(customer_id: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            sku: sku.into(),
            quantity: 1,
            size: "M".to_string(),
            color: None,
        }
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the size label.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }
}

/// Request body for `POST /cart/remove`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartRemoveRequest {
    /// Customer identifier.
    pub customer_id: String,
    /// Catalog identifier of the product to remove.
    pub sku: String,
    /// Optional size label to disambiguate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Response body of `GET /cart/{customer_id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Customer the cart belongs to.
    pub customer_id: String,
    /// Server-side cart lines.
    #[serde(default)]
    pub items: Vec<CartLine>,
    /// Server-computed totals.
    pub totals: CartTotals,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_snake_case() {
        let request = ChatRequest::new("1712000000000", "a@b.com", "hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "1712000000000");
        assert_eq!(json["customer_id"], "a@b.com");
        assert_eq!(json["channel"], "web");
        assert_eq!(json["message"], "hello");
    }

    #[test]
    fn test_reply_translates_to_bot_message() {
        let reply = ChatReply {
            reply: "Here are a few picks".to_string(),
            recommendations: vec![
                Product {
                    sku: Some("JEANS_001".to_string()),
                    name: "Minimalist Black Jeans".to_string(),
                    brand: "Studio".to_string(),
                    price: 2990.0,
                    image: String::new(),
                },
                Product {
                    sku: Some("TEE_001".to_string()),
                    name: "White Oversized Tee".to_string(),
                    brand: "Maison".to_string(),
                    price: 1490.0,
                    image: String::new(),
                },
            ],
            cart: None,
            order: None,
        };

        let message = reply.into_message();
        assert_eq!(message.sender, Sender::Bot);
        assert_eq!(message.text, "Here are a few picks");
        assert_eq!(message.recommendations.len(), 2);
        assert_eq!(message.recommendations[0].name, "Minimalist Black Jeans");
        assert_eq!(message.recommendations[1].name, "White Oversized Tee");
    }

    #[test]
    fn test_empty_reply_degrades_to_fallback() {
        let message = ChatReply::default().into_message();
        assert_eq!(message.text, EMPTY_REPLY_FALLBACK);

        let message = ChatReply {
            reply: "   ".to_string(),
            ..ChatReply::default()
        }
        .into_message();
        assert_eq!(message.text, EMPTY_REPLY_FALLBACK);
    }

    #[test]
    fn test_reply_deserializes_with_missing_fields() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply":"ok"}"#).unwrap();
        assert_eq!(reply.reply, "ok");
        assert!(reply.recommendations.is_empty());
        assert!(reply.cart.is_none());
        assert!(reply.order.is_none());
    }

    #[test]
    fn test_cart_add_request_defaults() {
        let request = CartAddRequest::new("a@b.com", "JEANS_001").with_quantity(2);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["size"], "M");
        assert!(json.get("color").is_none());
    }
}
