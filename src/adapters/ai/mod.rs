//! AI adapters - Gemini REST client and the test/dev mock.

mod gemini_client;
mod mock_client;

pub use gemini_client::{GeminiClient, GeminiConfig};
pub use mock_client::MockAiClient;
