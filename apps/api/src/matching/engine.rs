//! Match Engine: wires extractor, classifier, similarity, scorer, and suggestions together.
//!
//! Built once at startup from an injected vocabulary and shared behind an `Arc`. Every method
//! is a synchronous, side-effect-free function of its arguments.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::classifier::{Requirement, RequirementClassifier};
use crate::matching::extractor::SkillExtractor;
use crate::matching::scorer::{MatchResult, MatchScorer};
use crate::matching::similarity;
use crate::matching::skills::SkillSet;
use crate::matching::suggestions::{missing_skills, MissingSkill, Suggestion, SuggestionGenerator};
use crate::matching::vocabulary::{CueTable, SkillLookup, Vocabulary, VocabularyError};

/// A job to score in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub rank: usize,
    pub job_id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    #[serde(flatten)]
    pub result: MatchResult,
}

pub struct MatchEngine {
    lookup: Arc<dyn SkillLookup>,
    extractor: SkillExtractor,
    classifier: RequirementClassifier,
    scorer: MatchScorer,
    suggester: SuggestionGenerator,
}

impl MatchEngine {
    /// Engine over a vocabulary and its own cue table.
    pub fn new(vocabulary: Vocabulary) -> Result<Self, VocabularyError> {
        let cues = vocabulary.cues().clone();
        Self::with_lookup(Arc::new(vocabulary), &cues)
    }

    /// Engine over any lookup implementation and cue table.
    pub fn with_lookup(
        lookup: Arc<dyn SkillLookup>,
        cues: &CueTable,
    ) -> Result<Self, VocabularyError> {
        let extractor = SkillExtractor::new(lookup.as_ref())?;
        let classifier = RequirementClassifier::new(extractor.clone(), cues)?;
        Ok(Self {
            scorer: MatchScorer::new(lookup.clone()),
            suggester: SuggestionGenerator::new(lookup.clone()),
            lookup,
            extractor,
            classifier,
        })
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        self.extractor.extract(text)
    }

    /// Skills in vocabulary declaration order, for responses.
    pub fn ordered(&self, skills: &SkillSet) -> Vec<String> {
        skills
            .ordered(self.lookup.as_ref())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn classify(&self, job_text: &str, extracted: &SkillSet) -> Requirement {
        self.classifier.classify(job_text, extracted)
    }

    /// Extract + classify in one step.
    pub fn requirements(&self, job_text: &str) -> Requirement {
        self.classify(job_text, &self.extract(job_text))
    }

    pub fn similarity(&self, cv_text: &str, job_text: &str) -> f64 {
        similarity::similarity(cv_text, job_text)
    }

    pub fn score(
        &self,
        profile_skills: &SkillSet,
        requirement: &Requirement,
        similarity: f64,
    ) -> MatchResult {
        self.scorer.score(profile_skills, requirement, similarity)
    }

    pub fn suggest(&self, result: &MatchResult, missing: &[MissingSkill]) -> Vec<Suggestion> {
        self.suggester.suggest(result, missing)
    }

    /// Full pipeline for one CV and one job description.
    pub fn evaluate(&self, cv_text: &str, job_text: &str) -> MatchResult {
        let profile_skills = self.extract(cv_text);
        self.evaluate_with_profile(&profile_skills, cv_text, job_text)
    }

    fn evaluate_with_profile(
        &self,
        profile_skills: &SkillSet,
        cv_text: &str,
        job_text: &str,
    ) -> MatchResult {
        let requirement = self.requirements(job_text);
        let similarity = self.similarity(cv_text, job_text);
        let result = self.score(profile_skills, &requirement, similarity);
        let suggestions = self.suggest(&result, &missing_skills(&result));
        result.with_suggestions(suggestions)
    }

    /// Scores one CV against many jobs, best match first. Equal scores keep input order.
    pub fn evaluate_batch(&self, cv_text: &str, jobs: &[JobPosting]) -> Vec<RankedMatch> {
        let profile_skills = self.extract(cv_text);

        let mut scored: Vec<(&JobPosting, MatchResult)> = jobs
            .iter()
            .map(|job| {
                let result = self.evaluate_with_profile(&profile_skills, cv_text, &job.description);
                (job, result)
            })
            .collect();
        scored.sort_by(|a, b| b.1.match_score().total_cmp(&a.1.match_score()));

        debug!("Ranked {} jobs for one profile", scored.len());

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (job, result))| RankedMatch {
                rank: i + 1,
                job_id: job.id.clone(),
                title: job.title.clone(),
                company: job.company.clone(),
                result,
            })
            .collect()
    }
}
