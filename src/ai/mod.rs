//! Food recognition through a hosted multimodal model
//!
//! [`FoodAnalysisService`] is the seam callers depend on; the OpenAI-backed
//! client and the in-memory mock both implement it.

pub mod mock;
pub mod openai;

pub use mock::MockFoodAnalysisClient;
pub use openai::OpenAiFoodAnalysisClient;

use crate::image::CapturedImage;
use crate::models::AnalysisResult;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait FoodAnalysisService: Send + Sync {
    /// Single attempt: no retry, no cancellation.
    async fn analyze(&self, image: &CapturedImage) -> Result<AnalysisResult>;
}
