use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Emotion, Genre};

/// One row of the emotion → listings query table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreEntry {
    pub emotion: Emotion,
    pub genre: Genre,
    pub url: String,
}

/// Emotion → listings URL lookup, built once at startup and never mutated
#[derive(Debug, Clone)]
pub struct GenreQueries {
    queries: HashMap<Emotion, String>,
    neutral: String,
}

impl GenreQueries {
    pub fn new(listings_url: &str) -> Self {
        let queries: HashMap<Emotion, String> = Emotion::ALL
            .iter()
            .map(|emotion| (*emotion, Self::build_url(listings_url, emotion.genre())))
            .collect();
        let neutral = Self::build_url(listings_url, Emotion::Neutral.genre());

        Self { queries, neutral }
    }

    fn build_url(listings_url: &str, genre: Genre) -> String {
        let separator = if listings_url.contains('?') { '&' } else { '?' };
        format!("{}{}genres={}", listings_url, separator, genre)
    }

    /// Listings URL for an emotion
    pub fn url_for(&self, emotion: Emotion) -> &str {
        self.queries
            .get(&emotion)
            .map(String::as_str)
            .unwrap_or(self.neutral.as_str())
    }

    /// Listings URL for a raw label; unrecognized labels get the neutral entry
    pub fn url_for_label(&self, label: &str) -> &str {
        self.url_for(Emotion::from_label(label))
    }

    /// Full table in emotion order
    pub fn entries(&self) -> Vec<GenreEntry> {
        Emotion::ALL
            .iter()
            .map(|emotion| GenreEntry {
                emotion: *emotion,
                genre: emotion.genre(),
                url: self.url_for(*emotion).to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMDB: &str = "https://www.imdb.com/search/title/?title_type=feature";

    #[test]
    fn test_every_emotion_maps_to_its_genre_url() {
        let queries = GenreQueries::new(IMDB);
        let expected = [
            (Emotion::Angry, "action"),
            (Emotion::Disgust, "horror"),
            (Emotion::Fear, "horror"),
            (Emotion::Happy, "comedy"),
            (Emotion::Sad, "drama"),
            (Emotion::Surprise, "drama"),
            (Emotion::Neutral, "drama"),
        ];

        for (emotion, genre) in expected {
            assert_eq!(
                queries.url_for(emotion),
                format!("{}&genres={}", IMDB, genre)
            );
        }
    }

    #[test]
    fn test_unknown_label_resolves_to_neutral_entry() {
        let queries = GenreQueries::new(IMDB);
        assert_eq!(
            queries.url_for_label("contempt"),
            queries.url_for(Emotion::Neutral)
        );
        assert_eq!(queries.url_for_label("happy"), queries.url_for(Emotion::Happy));
    }

    #[test]
    fn test_base_without_query_string() {
        let queries = GenreQueries::new("http://127.0.0.1:8080/search");
        assert_eq!(
            queries.url_for(Emotion::Angry),
            "http://127.0.0.1:8080/search?genres=action"
        );
    }

    #[test]
    fn test_entries_cover_all_emotions() {
        let entries = GenreQueries::new(IMDB).entries();
        assert_eq!(entries.len(), Emotion::ALL.len());
        assert_eq!(entries[3].emotion, Emotion::Happy);
        assert_eq!(entries[3].genre, Genre::Comedy);
    }
}
