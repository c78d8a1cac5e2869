use super::FoodAnalysisService;
use crate::image::CapturedImage;
use crate::models::AnalysisResult;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockFoodAnalysisClient {
    responses: Arc<Mutex<Vec<AnalysisResult>>>,
    server_error: Arc<Mutex<Option<(u16, String)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockFoodAnalysisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            server_error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queues a canned result; `food_name` is trimmed and must not be blank.
    pub fn with_response(self, food_name: &str, calories: u32) -> Self {
        let result = AnalysisResult::new(food_name, calories)
            .expect("mock food_name must not be blank");
        self.responses.lock().unwrap().push(result);
        self
    }

    /// Every call fails with `Error::Server` carrying `status` and `body`.
    pub fn with_server_error(self, status: u16, body: &str) -> Self {
        *self.server_error.lock().unwrap() = Some((status, body.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockFoodAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodAnalysisService for MockFoodAnalysisClient {
    async fn analyze(&self, _image: &CapturedImage) -> Result<AnalysisResult> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if let Some((status, body)) = self.server_error.lock().unwrap().clone() {
            return Err(Error::Server { status, body });
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(AnalysisResult {
                food_name: "Apple".to_string(),
                calories: 95,
            })
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
