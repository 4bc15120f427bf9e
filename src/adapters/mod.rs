mod ollama_chat_client;
mod tesseract_text_extractor;

pub use ollama_chat_client::OllamaChatClient;
pub use tesseract_text_extractor::TesseractTextExtractor;
