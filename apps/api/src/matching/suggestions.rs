//! Suggestion Generator: missing-skill driven CV advice and ATS keyword recommendations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::defaults::{category_learning_path, LEARNING_PATHS};
use crate::matching::scorer::{MatchResult, MatchStatus, RequirementCategory};
use crate::matching::vocabulary::SkillLookup;

pub const MAX_CV_SUGGESTIONS: usize = 3;
pub const MAX_KEYWORD_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    CvImprovement,
    KeywordOptimization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub suggestion: String,
    pub rationale: String,
    pub priority: Priority,
}

/// A requirement the profile does not cover, with the weight it would add.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingSkill {
    pub skill: String,
    pub category: RequirementCategory,
    pub weight: f64,
}

/// Missing skills from a scored result: must-have gaps first, then nice-to-have, each in
/// reason order.
pub fn missing_skills(result: &MatchResult) -> Vec<MissingSkill> {
    let gaps = |category: RequirementCategory| {
        result
            .reasons()
            .iter()
            .filter(move |r| r.status == MatchStatus::Missing && r.category == category)
            .map(|r| MissingSkill {
                skill: r.skill.clone(),
                category: r.category,
                weight: r.weight,
            })
    };
    gaps(RequirementCategory::MustHave)
        .chain(gaps(RequirementCategory::NiceToHave))
        .collect()
}

pub struct SuggestionGenerator {
    lookup: Arc<dyn SkillLookup>,
}

impl SuggestionGenerator {
    pub fn new(lookup: Arc<dyn SkillLookup>) -> Self {
        Self { lookup }
    }

    /// Up to three CV improvements and three keyword recommendations. A full match gets none.
    pub fn suggest(&self, result: &MatchResult, missing: &[MissingSkill]) -> Vec<Suggestion> {
        if missing.is_empty() {
            return Vec::new();
        }

        let by_priority = missing
            .iter()
            .filter(|m| m.category == RequirementCategory::MustHave)
            .chain(
                missing
                    .iter()
                    .filter(|m| m.category == RequirementCategory::NiceToHave),
            );

        let cv = by_priority
            .clone()
            .take(MAX_CV_SUGGESTIONS)
            .map(|gap| self.cv_improvement(result, gap));
        let keywords = by_priority
            .take(MAX_KEYWORD_SUGGESTIONS)
            .map(keyword_optimization);

        cv.chain(keywords).collect()
    }

    fn cv_improvement(&self, result: &MatchResult, gap: &MissingSkill) -> Suggestion {
        let points = gap.weight * 100.0;
        let projected = (result.match_score() + points).min(100.0);
        Suggestion {
            kind: SuggestionType::CvImprovement,
            suggestion: format!(
                "Show hands-on {} experience in your CV: {}",
                gap.skill,
                self.learning_path(&gap.skill)
            ),
            rationale: format!(
                "{} is a {} requirement for this role; covering it adds {:.2} points, taking the match from {:.2} to {:.2}",
                gap.skill,
                gap.category.label(),
                points,
                result.match_score(),
                projected
            ),
            priority: match gap.category {
                RequirementCategory::MustHave => Priority::High,
                RequirementCategory::NiceToHave => Priority::Medium,
            },
        }
    }

    fn learning_path(&self, skill: &str) -> String {
        if let Some((_, path)) = LEARNING_PATHS.iter().find(|(s, _)| *s == skill) {
            return path.to_string();
        }
        match self.lookup.category(skill) {
            Some(category) => category_learning_path(category).replace("{skill}", skill),
            None => format!("build a small project that uses {skill} and describe the outcome"),
        }
    }
}

fn keyword_optimization(gap: &MissingSkill) -> Suggestion {
    Suggestion {
        kind: SuggestionType::KeywordOptimization,
        suggestion: format!(
            "Use the exact keyword \"{}\" in your skills summary and experience bullets",
            gap.skill
        ),
        rationale: format!(
            "Applicant tracking systems match literal terms; \"{}\" is a {} keyword in this posting",
            gap.skill,
            gap.category.label()
        ),
        priority: match gap.category {
            RequirementCategory::MustHave => Priority::Medium,
            RequirementCategory::NiceToHave => Priority::Low,
        },
    }
}
