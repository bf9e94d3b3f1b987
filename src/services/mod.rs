pub mod gemini_client;
pub mod generation;
pub mod output;
pub mod prompt;

pub use gemini_client::GeminiClient;
pub use generation::{GenerationClient, GenerationReply};
pub use output::normalize;
pub use prompt::build_trip_prompt;
