pub mod anthropic;
pub mod traits;

pub use anthropic::AnthropicClient;
pub use traits::{
    ChatMessage, ContentBlock, MessageRequest, MessageResponse, ModelClient, ModelError,
};
