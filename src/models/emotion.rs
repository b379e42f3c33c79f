use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

/// Coarse affect label inferred from a face image
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    #[default]
    Neutral,
}

impl Emotion {
    /// Every emotion the classifier can report, in table order
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Strict parse of a provider label (case-insensitive)
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "angry" => Some(Emotion::Angry),
            "disgust" => Some(Emotion::Disgust),
            "fear" => Some(Emotion::Fear),
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "surprise" => Some(Emotion::Surprise),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    /// Parse a label, coercing anything outside the known set to `Neutral`
    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or(Emotion::Neutral)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Genre target used to build the listings query for this emotion
    pub fn genre(&self) -> Genre {
        match self {
            Emotion::Angry => Genre::Action,
            Emotion::Disgust | Emotion::Fear => Genre::Horror,
            Emotion::Happy => Genre::Comedy,
            Emotion::Sad | Emotion::Surprise | Emotion::Neutral => Genre::Drama,
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Movie genre filter understood by the listings site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Action,
    Horror,
    Comedy,
    Drama,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Horror => "horror",
            Genre::Comedy => "comedy",
            Genre::Drama => "drama",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability distribution over emotion labels for the primary detected face
///
/// Labels are kept as the provider reported them; coercion to [`Emotion`]
/// happens when the dominant label is picked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EmotionScores(pub BTreeMap<String, f64>);

impl EmotionScores {
    pub fn new(scores: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(scores.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Emotion with the highest score, or `None` for an empty distribution.
    ///
    /// NaN scores are ignored. Unknown labels coerce to `Neutral`.
    pub fn dominant(&self) -> Option<Emotion> {
        self.0
            .iter()
            .filter(|(_, score)| !score.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(label, _)| Emotion::from_label(label))
    }
}
