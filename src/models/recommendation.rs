use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Emotion;

/// Raw text of a movie title scraped from a listings page
pub type MovieTitle = String;

/// Image handed to the classifier
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Image stored on the local filesystem
    Path(PathBuf),
    /// Image already held in memory
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

/// Outcome of a single classification attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub emotion: Emotion,
    /// `false` when the provider failed and `neutral` was substituted
    pub detected: bool,
}

impl Classification {
    pub fn detected(emotion: Emotion) -> Self {
        Self {
            emotion,
            detected: true,
        }
    }

    pub fn fallback() -> Self {
        Self {
            emotion: Emotion::Neutral,
            detected: false,
        }
    }
}

/// Movies picked for one request, along with the emotion that drove the pick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub emotion: Emotion,
    pub movies: Vec<MovieTitle>,
}

impl Recommendation {
    pub fn empty(emotion: Emotion) -> Self {
        Self {
            emotion,
            movies: Vec::new(),
        }
    }
}
