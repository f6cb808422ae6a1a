//! Match Scorer: turns skill coverage and text similarity into an auditable 0–100 score.
//!
//! Formula:
//!   must_have_coverage    = |profile ∩ must_have| / |must_have|        (1.0 if must_have empty)
//!   nice_to_have_coverage = |profile ∩ nice_to_have| / |nice_to_have|  (1.0 if empty)
//!   tfidf_bonus           = similarity × 10
//!   match_score           = clamp(70 × must + 30 × nice + tfidf_bonus, 0, 100), 2 decimals
//!
//! Every considered skill gets one reason whose weight is its share of the 100 points
//! (a must-have out of five weighs 70 / 5 / 100 = 0.14), so matched weights × 100 plus the
//! bonus rebuild the score.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::classifier::Requirement;
use crate::matching::skills::SkillSet;
use crate::matching::suggestions::Suggestion;
use crate::matching::vocabulary::SkillLookup;

pub const MUST_HAVE_POINTS: f64 = 70.0;
pub const NICE_TO_HAVE_POINTS: f64 = 30.0;
pub const TFIDF_BONUS_POINTS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCategory {
    MustHave,
    NiceToHave,
}

impl RequirementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RequirementCategory::MustHave => "must-have",
            RequirementCategory::NiceToHave => "nice-to-have",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Missing,
}

/// Per-skill audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReason {
    pub skill: String,
    pub category: RequirementCategory,
    pub status: MatchStatus,
    /// Fraction of the 100-point total this skill contributes (matched) or would contribute (missing).
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub must_have_coverage: f64,
    pub nice_to_have_coverage: f64,
    pub tfidf_bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    match_score: f64,
    reasons: Vec<MatchReason>,
    suggestions: Vec<Suggestion>,
    breakdown: ScoreBreakdown,
}

impl MatchResult {
    pub fn match_score(&self) -> f64 {
        self.match_score
    }

    pub fn reasons(&self) -> &[MatchReason] {
        &self.reasons
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    /// Attaches generated suggestions, consuming the scored result.
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

fn coverage(profile: &SkillSet, required: &SkillSet) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    profile.intersection_count(required) as f64 / required.len() as f64
}

pub struct MatchScorer {
    lookup: Arc<dyn SkillLookup>,
}

impl MatchScorer {
    pub fn new(lookup: Arc<dyn SkillLookup>) -> Self {
        Self { lookup }
    }

    pub fn score(
        &self,
        profile_skills: &SkillSet,
        requirement: &Requirement,
        similarity: f64,
    ) -> MatchResult {
        let similarity = if similarity.is_finite() {
            similarity.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let must_have_coverage = coverage(profile_skills, requirement.must_have());
        let nice_to_have_coverage = coverage(profile_skills, requirement.nice_to_have());
        let tfidf_bonus = similarity * TFIDF_BONUS_POINTS;

        let raw = must_have_coverage * MUST_HAVE_POINTS
            + nice_to_have_coverage * NICE_TO_HAVE_POINTS
            + tfidf_bonus;
        let match_score = round_to(raw.clamp(0.0, 100.0), 2);

        let mut reasons =
            Vec::with_capacity(requirement.must_have().len() + requirement.nice_to_have().len());
        self.push_reasons(
            &mut reasons,
            profile_skills,
            requirement.must_have(),
            RequirementCategory::MustHave,
            MUST_HAVE_POINTS,
        );
        self.push_reasons(
            &mut reasons,
            profile_skills,
            requirement.nice_to_have(),
            RequirementCategory::NiceToHave,
            NICE_TO_HAVE_POINTS,
        );

        debug!(
            "Match score {match_score:.2} (must {must_have_coverage:.3}, nice {nice_to_have_coverage:.3}, bonus {tfidf_bonus:.2})"
        );

        MatchResult {
            match_score,
            reasons,
            suggestions: Vec::new(),
            breakdown: ScoreBreakdown {
                must_have_coverage: round_to(must_have_coverage, 4),
                nice_to_have_coverage: round_to(nice_to_have_coverage, 4),
                tfidf_bonus: round_to(tfidf_bonus, 4),
            },
        }
    }

    fn push_reasons(
        &self,
        reasons: &mut Vec<MatchReason>,
        profile_skills: &SkillSet,
        skills: &SkillSet,
        category: RequirementCategory,
        category_points: f64,
    ) {
        if skills.is_empty() {
            return;
        }
        let weight = category_points / skills.len() as f64 / 100.0;
        for skill in skills.ordered(self.lookup.as_ref()) {
            let status = if profile_skills.contains(skill) {
                MatchStatus::Matched
            } else {
                MatchStatus::Missing
            };
            reasons.push(MatchReason {
                skill: skill.to_string(),
                category,
                status,
                weight,
            });
        }
    }
}
