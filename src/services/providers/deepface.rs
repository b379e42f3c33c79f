/// DeepFace REST API provider
///
/// Talks to a DeepFace service started with `deepface api` (or the official Docker
/// image). Only the `emotion` action is requested.
///
/// API Flow:
/// 1. POST /analyze with a base64 data URI → `results[]`, one entry per detected face
/// 2. The first entry is the primary face; its `emotion` map holds per-label scores
use crate::{
    error::{AppError, AppResult},
    models::EmotionScores,
    services::providers::EmotionProvider,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    img: String,
    actions: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    results: Vec<FaceAnalysis>,
}

#[derive(Debug, Deserialize)]
struct FaceAnalysis {
    #[serde(default)]
    emotion: EmotionScores,
}

#[derive(Clone)]
pub struct DeepFaceProvider {
    http_client: HttpClient,
    api_url: String,
}

impl DeepFaceProvider {
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn encode_image(image: &[u8]) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(image))
    }

    fn primary_face(response: AnalyzeResponse) -> AppResult<EmotionScores> {
        let face = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Classification("No face detected".to_string()))?;

        if face.emotion.is_empty() {
            return Err(AppError::Classification(
                "Analyzer returned no emotion scores".to_string(),
            ));
        }

        Ok(face.emotion)
    }
}

#[async_trait::async_trait]
impl EmotionProvider for DeepFaceProvider {
    async fn analyze(&self, image: &[u8]) -> AppResult<EmotionScores> {
        if image.is_empty() {
            return Err(AppError::InvalidInput("Image is empty".to_string()));
        }

        let url = format!("{}/analyze", self.api_url);
        let request = AnalyzeRequest {
            img: Self::encode_image(image),
            actions: ["emotion"],
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "DeepFace API returned status {}: {}",
                status, body
            )));
        }

        let analysis: AnalyzeResponse = response.json().await?;
        let scores = Self::primary_face(analysis)?;

        tracing::debug!(
            provider = self.name(),
            labels = scores.0.len(),
            "Received emotion scores"
        );

        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "deepface"
    }
}
