use serde::Serialize;

use crate::models::Property;
use crate::scoring::ranked_opportunities;
use crate::scrapers::slug::fold;

const MAX_LISTED: usize = 5;
const OPPORTUNITY_KEYWORDS: [&str; 4] = ["oportunidad", "opportunit", "descuento", "barat"];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// Listing reference shown inside a chat reply
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertySummary {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: f64,
}

impl From<&Property> for PropertySummary {
    fn from(p: &Property) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            location: p.location.clone(),
            price: p.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatBody {
    Text { text: String },
    PropertyList { properties: Vec<PropertySummary> },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    #[serde(flatten)]
    pub body: ChatBody,
}

/// Keyword assistant answering questions about the scored listings
#[derive(Debug, Default)]
pub struct ChatAssistant {
    history: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    fn push(&mut self, sender: Sender, body: ChatBody) -> &ChatMessage {
        self.next_id += 1;
        self.history.push(ChatMessage {
            id: self.next_id,
            sender,
            body,
        });
        &self.history[self.history.len() - 1]
    }

    /// Record the user's question and append the reply.
    pub fn ask(&mut self, question: &str, scored: &[Property]) -> &ChatMessage {
        self.push(
            Sender::User,
            ChatBody::Text {
                text: question.to_string(),
            },
        );
        let reply = answer(question, scored);
        self.push(Sender::Ai, reply)
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Longest zone name mentioned in the folded query, matched on whole words.
fn mentioned_zone<'a>(query: &str, scored: &'a [Property]) -> Option<&'a str> {
    let query_words = words(query);
    scored
        .iter()
        .filter_map(Property::zone)
        .filter(|zone| {
            let folded = fold(zone);
            let zone_words = words(&folded);
            !zone_words.is_empty()
                && query_words
                    .windows(zone_words.len())
                    .any(|window| window == zone_words.as_slice())
        })
        .max_by_key(|zone| zone.len())
}

pub fn answer(question: &str, scored: &[Property]) -> ChatBody {
    let query = fold(question);
    let zone = mentioned_zone(&query, scored);
    let wants_opportunities = OPPORTUNITY_KEYWORDS.iter().any(|k| query.contains(k));

    if wants_opportunities {
        let found: Vec<PropertySummary> = ranked_opportunities(scored)
            .into_iter()
            .filter(|p| zone.map_or(true, |z| p.zone() == Some(z)))
            .take(MAX_LISTED)
            .map(PropertySummary::from)
            .collect();

        if found.is_empty() {
            let text = match zone {
                Some(z) => format!("No encontré oportunidades en {z}."),
                None => "No encontré oportunidades con los datos actuales.".to_string(),
            };
            return ChatBody::Text { text };
        }
        return ChatBody::PropertyList { properties: found };
    }

    if let Some(zone) = zone {
        let mut in_zone: Vec<&Property> = scored.iter().filter(|p| p.zone() == Some(zone)).collect();
        in_zone.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.id.cmp(&b.id)));
        return ChatBody::PropertyList {
            properties: in_zone.into_iter().take(MAX_LISTED).map(PropertySummary::from).collect(),
        };
    }

    ChatBody::Text {
        text: "Puedo mostrarte oportunidades o propiedades de una zona. Probá con \"oportunidades en Palermo\"."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score, tests::listing};
    use serde_json::json;

    fn sample() -> Vec<Property> {
        score(&[
            listing("A", Some("Palermo"), 100_000.0, Some(50.0)),
            listing("B", Some("Palermo"), 150_000.0, Some(50.0)),
            listing("C", Some("Palermo Soho"), 90_000.0, Some(50.0)),
            listing("D", Some("Palermo Soho"), 140_000.0, Some(50.0)),
            listing("E", Some("Núñez"), 120_000.0, Some(50.0)),
        ])
    }

    fn ids(body: &ChatBody) -> Vec<&str> {
        match body {
            ChatBody::PropertyList { properties } => properties.iter().map(|p| p.id.as_str()).collect(),
            ChatBody::Text { .. } => Vec::new(),
        }
    }

    #[test]
    fn lists_ranked_opportunities() {
        let body = answer("¿Qué oportunidades hay?", &sample());
        assert_eq!(ids(&body), vec!["C", "A"]);
    }

    #[test]
    fn prefers_longest_zone_match() {
        let body = answer("oportunidades en palermo soho", &sample());
        assert_eq!(ids(&body), vec!["C"]);
    }

    #[test]
    fn zone_listing_is_accent_insensitive() {
        let body = answer("mostrame nunez", &sample());
        assert_eq!(ids(&body), vec!["E"]);
    }

    #[test]
    fn zone_must_be_a_whole_word() {
        let mut set = sample();
        set.extend(score(&[listing("F", Some("Boca"), 80_000.0, Some(50.0))]));

        let body = answer("quiero un bocadillo", &set);
        assert!(matches!(body, ChatBody::Text { .. }));

        let body = answer("¿qué hay en la boca?", &set);
        assert_eq!(ids(&body), vec!["F"]);
    }

    #[test]
    fn no_opportunities_in_zone() {
        let body = answer("oportunidades en Núñez", &sample());
        assert_eq!(
            body,
            ChatBody::Text {
                text: "No encontré oportunidades en Núñez.".to_string()
            }
        );
    }

    #[test]
    fn assistant_keeps_history() {
        let mut assistant = ChatAssistant::new();
        let reply = assistant.ask("hola", &sample()).clone();
        assert_eq!(reply.sender, Sender::Ai);
        assert_eq!(assistant.history().len(), 2);
        assert_eq!(assistant.history()[0].id, 1);
        assert_eq!(reply.id, 2);
    }

    #[test]
    fn message_wire_shape() {
        let message = ChatMessage {
            id: 7,
            sender: Sender::Ai,
            body: ChatBody::Text {
                text: "hola".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "id": 7, "sender": "ai", "type": "text", "text": "hola" })
        );
    }
}
