mod chat_model;
mod text_extractor;

pub use chat_model::{ChatFailure, ChatModel};
pub use text_extractor::TextExtractor;
