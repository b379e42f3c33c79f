pub mod classifier;
pub mod genres;
pub mod providers;
pub mod recommendations;
pub mod scraper;

pub use classifier::EmotionClassifier;
pub use genres::{GenreEntry, GenreQueries};
pub use recommendations::{sample_titles, Recommender, DEFAULT_LIMIT};
pub use scraper::{ListingScraper, TitleSource};
