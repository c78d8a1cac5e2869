use super::client::OpenAiHttpClient;
use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatMessageContent, FoodPayload,
    MessagePart, ResponseFormat,
};
use crate::ai::FoodAnalysisService;
use crate::image::{jpeg_data_url, CapturedImage, JpegEncoder};
use crate::models::{AnalysisResult, Config, DEFAULT_JPEG_QUALITY, DEFAULT_TEMPERATURE};
use crate::{prompts, Error, Result};
use async_trait::async_trait;

pub struct OpenAiFoodAnalysisClient {
    http: OpenAiHttpClient,
    model: String,
    temperature: f32,
    encoder: JpegEncoder,
}

impl OpenAiFoodAnalysisClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, client),
            model,
            temperature: DEFAULT_TEMPERATURE,
            encoder: JpegEncoder::new(DEFAULT_JPEG_QUALITY),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.request_timeout)
            .with_temperature(config.temperature)
            .with_encoder(
                JpegEncoder::new(config.jpeg_quality).with_max_dimension(config.max_dimension),
            )
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_encoder(mut self, encoder: JpegEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Builds the two-message (system, user) completion request for a JPEG.
    pub fn build_request(&self, jpeg: &[u8]) -> ChatCompletionRequest {
        let system_message = ChatMessage {
            role: "system".to_string(),
            content: Some(ChatMessageContent::Parts(vec![MessagePart::text(
                prompts::ANALYSIS_SYSTEM,
            )])),
        };

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(ChatMessageContent::Parts(vec![
                MessagePart::text(prompts::ANALYSIS_USER),
                MessagePart::image_url(jpeg_data_url(jpeg)),
            ])),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            response_format: ResponseFormat::json_object(),
            messages: vec![system_message, user_message],
            temperature: self.temperature,
        }
    }

    /// Picks the model's text out of the first choice.
    ///
    /// A string body is used as-is; a parts array yields the first part with
    /// non-empty text.
    fn extract_text(response: &ChatCompletionResponse) -> Result<&str> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| Error::malformed("Empty response: no choices returned"))?;

        match &choice.message.content {
            Some(ChatMessageContent::Text(text)) => Ok(text.as_str()),
            Some(ChatMessageContent::Parts(parts)) => parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .find(|text| !text.is_empty())
                .ok_or_else(|| Error::malformed("No text content returned in message parts")),
            None => Err(Error::malformed(format!(
                "Message has no content (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }

    fn parse_payload(text: &str) -> Result<AnalysisResult> {
        let payload: FoodPayload = serde_json::from_str(text).map_err(|e| {
            tracing::error!("Failed to parse food analysis payload: {}\nText: {}", e, text);
            Error::malformed(format!(
                "Failed to parse food analysis payload: {}. Text: {}",
                e, text
            ))
        })?;

        AnalysisResult::new(&payload.food_name, payload.calories)
    }

    async fn encode(&self, image: &CapturedImage) -> Result<Vec<u8>> {
        let encoder = self.encoder;
        let image = image.clone();
        tokio::task::spawn_blocking(move || encoder.encode(&image))
            .await
            .map_err(|e| Error::Encoding(format!("JPEG encoding task join error: {}", e)))?
    }
}

#[async_trait]
impl FoodAnalysisService for OpenAiFoodAnalysisClient {
    async fn analyze(&self, image: &CapturedImage) -> Result<AnalysisResult> {
        let jpeg = self.encode(image).await.map_err(|e| {
            tracing::error!("Could not prepare photo for upload: {}", e);
            e
        })?;
        tracing::debug!(
            "Analyzing {}x{} photo ({} JPEG bytes) with {}",
            image.width(),
            image.height(),
            jpeg.len(),
            self.model
        );

        let request = self.build_request(&jpeg);
        let response = self.http.chat_completion(&request).await?;

        let text = Self::extract_text(&response).map_err(|e| {
            tracing::error!("{}", e);
            e
        })?;
        let result = Self::parse_payload(text)?;

        tracing::info!(
            "Food analysis result: {} ({} kcal)",
            result.food_name,
            result.calories
        );

        Ok(result)
    }
}
