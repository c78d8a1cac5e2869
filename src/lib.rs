//! Food photo analysis - estimates calories for the dominant food in a photo
//!
//! A captured photo is JPEG-encoded, sent to a hosted multimodal
//! chat-completions model, and the model's JSON answer is normalized into an
//! [`models::AnalysisResult`] or a typed [`Error`].

pub mod ai;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod session;

pub use error::{Error, Result};
