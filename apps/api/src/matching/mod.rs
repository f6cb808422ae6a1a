//! CV-to-job matching engine.
//!
//! Pipeline: extract skills from both texts against the vocabulary, split the job's skills into
//! must-have and nice-to-have, add a TF-IDF similarity bonus, score, then suggest what to add.
//! Everything here is synchronous and free of I/O apart from `Vocabulary::from_path`.

pub mod classifier;
pub mod defaults;
pub mod engine;
pub mod extractor;
pub mod report;
pub mod scorer;
pub mod similarity;
pub mod skills;
pub mod suggestions;
pub mod vocabulary;

pub use engine::{JobPosting, MatchEngine, RankedMatch};
pub use vocabulary::{Vocabulary, VocabularyError};
