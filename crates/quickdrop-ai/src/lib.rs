//! Gemini client for document summaries, filename suggestions, and Q&A.

mod gemini;

pub use gemini::{GeminiClient, DEFAULT_MODEL, NO_TEXT_PLACEHOLDER};
