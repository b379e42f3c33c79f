use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Classification, Emotion, ImageInput},
    services::providers::EmotionProvider,
};

/// Best-effort emotion classification over a pluggable analysis provider
///
/// One provider call per classification, no retries. Failures never reach the
/// caller of [`EmotionClassifier::classify`]; they are logged and replaced by
/// `neutral`.
#[derive(Clone)]
pub struct EmotionClassifier {
    provider: Arc<dyn EmotionProvider>,
}

impl EmotionClassifier {
    pub fn new(provider: Arc<dyn EmotionProvider>) -> Self {
        Self { provider }
    }

    /// Classify an image, falling back to `neutral` on any failure
    pub async fn classify(&self, image: &ImageInput) -> Emotion {
        self.classify_detailed(image).await.emotion
    }

    /// Classify an image and report whether the fallback was used
    pub async fn classify_detailed(&self, image: &ImageInput) -> Classification {
        match self.try_classify(image).await {
            Ok(emotion) => {
                tracing::info!(emotion = %emotion, "Detected emotion");
                Classification::detected(emotion)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    "Emotion detection failed, defaulting to neutral"
                );
                Classification::fallback()
            }
        }
    }

    /// Classify an image, surfacing provider and I/O failures
    pub async fn try_classify(&self, image: &ImageInput) -> AppResult<Emotion> {
        let scores = match image {
            ImageInput::Path(path) => {
                let bytes = tokio::fs::read(path).await?;
                self.provider.analyze(&bytes).await?
            }
            ImageInput::Bytes(bytes) => self.provider.analyze(bytes).await?,
        };

        scores
            .dominant()
            .ok_or_else(|| AppError::Classification("Empty emotion distribution".to_string()))
    }
}
