//! Prompt construction for the insanity comparison request.

use crate::clients::{ChatMessage, MessageRequest};
use crate::config::ModelSettings;

/// JSON fields every rated event must carry, in prompt order.
pub const EVENT_FIELDS: [&str; 3] = ["event", "description", "insanityRating"];

/// Number of comparable events requested besides the input event.
pub const COMPARISON_COUNT: usize = 3;

/// Build the single user prompt for `query`. The query is embedded verbatim.
pub fn build_prompt(query: &str) -> String {
    let [event, description, rating] = EVENT_FIELDS;
    format!(
        "Given this historical event or situation: \"{query}\", rate it on an \"insanity scale\" \
         from 1-10 (where 10 is the most insane, using whole numbers only) and then find exactly \
         {COMPARISON_COUNT} similar historical events, also rating each on the same scale. For the \
         input event and each comparison, provide a brief description explaining the rating. \
         Format your response as a JSON array with objects containing \"{event}\", \
         \"{description}\", and \"{rating}\" fields, with the input event as the first item. \
         Be objective and factual in your comparisons."
    )
}

pub fn build_request(query: &str, settings: &ModelSettings) -> MessageRequest {
    MessageRequest {
        model: settings.name.clone(),
        max_tokens: settings.max_tokens,
        messages: vec![ChatMessage::user(build_prompt(query))],
    }
}
