pub mod emotion;
pub mod recommendation;

pub use emotion::{Emotion, EmotionScores, Genre};
pub use recommendation::{Classification, ImageInput, MovieTitle, Recommendation};
