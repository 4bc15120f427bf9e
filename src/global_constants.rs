#![allow(dead_code)]

pub const APPLICATION_NAME: &str = "Snap Explain - Desktop";

pub const LOG_TAG_MAIN: &str = "[MAIN]";
pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_CAPTURE: &str = "[CAPTURE]";
pub const LOG_TAG_ENUMERATOR: &str = "[ENUMERATOR]";
pub const LOG_TAG_OVERLAY: &str = "[OVERLAY]";
pub const LOG_TAG_OCR: &str = "[OCR]";
pub const LOG_TAG_OLLAMA: &str = "[OLLAMA]";
pub const LOG_TAG_PIPELINE: &str = "[PIPELINE]";
pub const LOG_TAG_STORE: &str = "[STORE]";

pub const OLLAMA_CHAT_ENDPOINT: &str = "http://localhost:11434/api/chat";
pub const OLLAMA_MODEL_NAME: &str = "llama3.1:8b";

pub const FREEFORM_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Keep your answers concise and clear.";

pub const OCR_LANGUAGE: &str = "eng";

/// Wait after hiding the overlay so the compositor stops drawing it before
/// the next frame grab. Pragmatic constant, not an acknowledgment; slow
/// compositors can still lose the race.
pub const OVERLAY_SETTLE_DELAY_MS: u64 = 120;

pub const FALLBACK_THUMBNAIL_WIDTH: u32 = 800;
pub const FALLBACK_THUMBNAIL_HEIGHT: u32 = 600;

pub const SCREENSHOT_FILE_PREFIX: &str = "screenshot";

pub const STARTUP_BANNER: &str = r#"
╔════════════════════════════════════════════════════════╗
║  Snap Explain - Desktop                                ║
║                                                        ║
║  Core pipeline is running!                             ║
║                                                        ║
║  Send one JSON request per line on stdin, e.g.         ║
║    {"op":"ask-ai","prompt":"What is 2+2?"}             ║
║                                                        ║
║  Requires a local Ollama service on localhost:11434    ║
║                                                        ║
╚════════════════════════════════════════════════════════╝
"#;
