use std::sync::Arc;

use rand::{seq::SliceRandom, Rng};

use crate::{
    models::{Emotion, ImageInput, MovieTitle, Recommendation},
    services::{classifier::EmotionClassifier, genres::GenreQueries, scraper::TitleSource},
};

/// Number of titles returned when the caller does not ask for a specific count
pub const DEFAULT_LIMIT: usize = 10;

/// Generates mood-based watch recommendations
///
/// Classifies the face in the image once, resolves the matching genre listing,
/// scrapes candidate titles and returns a random subset. Every downstream failure
/// is absorbed: a failed classification becomes `neutral`, a failed fetch becomes
/// an empty list. The recommender itself never fails.
#[derive(Clone)]
pub struct Recommender {
    classifier: EmotionClassifier,
    queries: Arc<GenreQueries>,
    titles: Arc<dyn TitleSource>,
}

impl Recommender {
    pub fn new(
        classifier: EmotionClassifier,
        queries: Arc<GenreQueries>,
        titles: Arc<dyn TitleSource>,
    ) -> Self {
        Self {
            classifier,
            queries,
            titles,
        }
    }

    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    pub fn queries(&self) -> &GenreQueries {
        &self.queries
    }

    /// Full pipeline: classify, resolve, scrape, sample
    pub async fn recommend(&self, image: &ImageInput, limit: usize) -> Recommendation {
        let emotion = self.classifier.classify(image).await;
        self.recommend_for_emotion(emotion, limit).await
    }

    /// Pipeline for an emotion the caller already classified
    pub async fn recommend_for_emotion(&self, emotion: Emotion, limit: usize) -> Recommendation {
        let candidates = self.candidates(emotion).await;

        if candidates.is_empty() {
            tracing::info!(emotion = %emotion, "No titles found");
            return Recommendation::empty(emotion);
        }

        let movies = sample_titles(candidates, limit, &mut rand::thread_rng());

        tracing::info!(
            emotion = %emotion,
            returned = movies.len(),
            limit = limit,
            "Recommendations ready"
        );

        Recommendation { emotion, movies }
    }

    /// Every title listed for the emotion's genre, failures absorbed
    pub async fn candidates(&self, emotion: Emotion) -> Vec<MovieTitle> {
        let url = self.queries.url_for(emotion);

        match self.titles.fetch_titles(url).await {
            Ok(titles) => titles,
            Err(e) => {
                tracing::warn!(emotion = %emotion, url = %url, error = %e, "Error fetching titles");
                Vec::new()
            }
        }
    }
}

/// Uniformly shuffle `titles` and keep at most `limit` of them.
///
/// A seeded rng makes the order reproducible.
pub fn sample_titles<R: Rng + ?Sized>(
    mut titles: Vec<MovieTitle>,
    limit: usize,
    rng: &mut R,
) -> Vec<MovieTitle> {
    titles.shuffle(rng);
    titles.truncate(limit);
    titles
}
