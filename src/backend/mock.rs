//! Offline reply generation for demos and tests.
//!
//! Mirrors the browser client's temporary mock: greeting detection, a
//! garment-keyword path returning two curated recommendations, and a
//! generic fallback prompt.

use crate::store::types::Product;

use super::types::ChatReply;

/// Words treated as greetings.
const GREETINGS: [&str; 3] = ["hello", "hi", "hey"];

/// Garment keywords that trigger curated recommendations.
const GARMENTS: [&str; 6] = ["jeans", "kurta", "dress", "tee", "shirt", "kurti"];

/// Canned agent that answers without a backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockAgent;

impl MockAgent {
    /// Create a mock agent.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Produce a reply for `input`, never failing.
    #[must_use]
    pub fn reply(&self, input: &str) -> ChatReply {
        let lowered = input.to_lowercase();

        if contains_word(&lowered, &GREETINGS) {
            return ChatReply {
                reply: "Hello, welcome! How can I help you style an outfit today?".to_string(),
                ..ChatReply::default()
            };
        }

        if contains_word(&lowered, &GARMENTS) {
            return ChatReply {
                reply: format!("Got it, here are a few curated items matching \"{input}\"."),
                recommendations: curated_recommendations(),
                ..ChatReply::default()
            };
        }

        ChatReply {
            reply: "I can help with outfits. Tell me what occasion, color or budget you prefer."
                .to_string(),
            ..ChatReply::default()
        }
    }
}

/// Word-boundary membership test over a lowercased input.
fn contains_word(text: &str, words: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| words.contains(&word))
}

fn curated_recommendations() -> Vec<Product> {
    vec![
        Product {
            sku: Some("JEANS_001".to_string()),
            name: "Minimalist Black Jeans".to_string(),
            brand: "Studio".to_string(),
            price: 2990.0,
            image: "https://via.placeholder.com/300x400?text=Black+Jeans".to_string(),
        },
        Product {
            sku: Some("TEE_001".to_string()),
            name: "White Oversized Tee".to_string(),
            brand: "Maison".to_string(),
            price: 1490.0,
            image: "https://via.placeholder.com/300x400?text=White+Tee".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_has_no_recommendations() {
        let reply = MockAgent::new().reply("Hey there!");
        assert!(reply.reply.contains("welcome"));
        assert!(reply.recommendations.is_empty());
    }

    #[test]
    fn test_garment_keyword_returns_two_items() {
        let reply = MockAgent::new().reply("I need black JEANS for work");
        assert_eq!(reply.recommendations.len(), 2);
        assert_eq!(
            reply.recommendations[0].sku.as_deref(),
            Some("JEANS_001")
        );
    }

    #[test]
    fn test_keyword_matches_whole_words_only() {
        // "shirtless" must not match "shirt", same as the \b regex it mirrors.
        let reply = MockAgent::new().reply("shirtless summer looks");
        assert!(reply.recommendations.is_empty());
    }

    #[test]
    fn test_fallback_prompts_for_details() {
        let reply = MockAgent::new().reply("what can you do?");
        assert!(reply.recommendations.is_empty());
        assert!(reply.reply.contains("occasion"));
    }
}
