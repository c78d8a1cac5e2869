pub mod analysis;
pub mod client;
pub mod types;

pub use analysis::OpenAiFoodAnalysisClient;
pub use client::OpenAiHttpClient;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
