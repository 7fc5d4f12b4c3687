use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::deserializers::de_rating_forgiving;

/// One historical event with the model's insanity rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatedEvent {
    pub event: String,
    pub description: String,
    #[serde(rename = "insanityRating", deserialize_with = "de_rating_forgiving")]
    pub insanity_rating: i64,
}

/// `POST /compare` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub query: String,
}

/// `POST /compare` success body. Events are passed through as the model wrote them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub events: Vec<Value>,
}

/// Typed decode of untyped events; elements that do not fit are returned separately.
pub fn decode_events(items: Vec<Value>) -> (Vec<RatedEvent>, Vec<(usize, String)>) {
    let mut events = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RatedEvent>(item) {
            Ok(event) => events.push(event),
            Err(e) => rejected.push((idx, e.to_string())),
        }
    }
    (events, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_field_names() {
        let event = RatedEvent {
            event: "Tulip mania".to_string(),
            description: "Bulbs for the price of houses".to_string(),
            insanity_rating: 6,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "Tulip mania",
                "description": "Bulbs for the price of houses",
                "insanityRating": 6
            })
        );
    }

    #[test]
    fn decode_keeps_order_and_reports_rejects() {
        let (events, rejected) = decode_events(vec![
            json!({"event":"Y2K bug panic","description":"...","insanityRating":4}),
            json!({"event":"No rating","description":"..."}),
            json!({"event":"Fractional","description":"...","insanityRating":7.6}),
            json!("not an object"),
        ]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, "Y2K bug panic");
        assert_eq!(events[1].insanity_rating, 8);
        let indexes: Vec<usize> = rejected.iter().map(|(i, _)| *i).collect();
        assert_eq!(indexes, vec![1, 3]);
    }
}
