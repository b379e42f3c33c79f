/// Facial emotion analysis provider abstraction
///
/// Emotion inference is delegated to an external pre-trained model. Each provider
/// wraps one such backend and reports the probability distribution for the primary
/// detected face; picking the winning label is left to the classifier.
use crate::{error::AppResult, models::EmotionScores};

pub mod deepface;

pub use deepface::DeepFaceProvider;

/// Trait for facial emotion analysis backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmotionProvider: Send + Sync {
    /// Analyze an encoded image and return emotion scores for the primary face
    ///
    /// Fails when no face is found, the image cannot be decoded, or the backend
    /// is unreachable.
    async fn analyze(&self, image: &[u8]) -> AppResult<EmotionScores>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
