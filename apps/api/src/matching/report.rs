//! Profile analytics over a history of match results: score distribution, recurring
//! strengths, recurring must-have gaps, a score trend, and next-step recommendations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::scorer::{round_to, MatchResult, MatchStatus, RequirementCategory};

pub const TREND_WINDOW: usize = 10;
pub const MIN_TREND_POINTS: usize = 3;
pub const STABLE_THRESHOLD: f64 = 2.0;
pub const MAX_LISTED_SKILLS: usize = 10;

const EXCELLENT_SCORE: f64 = 90.0;
const GOOD_SCORE: f64 = 60.0;

/// One stored match outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub created_at: DateTime<Utc>,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchTrend {
    pub direction: TrendDirection,
    /// Later-half average minus earlier-half average.
    pub change: f64,
    pub earlier_average: Option<f64>,
    pub recent_average: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub poor: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillStrength {
    pub skill: String,
    pub match_frequency: usize,
    /// Share of analysed matches in which the skill was matched.
    pub match_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapImpact {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGap {
    pub skill: String,
    pub gap_frequency: usize,
    pub impact: GapImpact,
    /// 1 (learn first) to 3.
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub total_matches_analyzed: usize,
    pub average_match_score: f64,
    pub median_match_score: f64,
    pub score_distribution: ScoreDistribution,
    pub top_matched_skills: Vec<SkillStrength>,
    pub skill_gaps: Vec<SkillGap>,
    pub trend: MatchTrend,
    pub recommendations: Vec<String>,
}

fn mean(scores: &[f64]) -> f64 {
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Direction of the most recent scores. Needs at least three records.
pub fn match_trend(history: &[MatchRecord]) -> MatchTrend {
    if history.len() < MIN_TREND_POINTS {
        return MatchTrend {
            direction: TrendDirection::InsufficientData,
            change: 0.0,
            earlier_average: None,
            recent_average: None,
        };
    }

    let mut chronological: Vec<&MatchRecord> = history.iter().collect();
    chronological.sort_by_key(|r| r.created_at);
    let window: Vec<f64> = chronological
        .iter()
        .rev()
        .take(TREND_WINDOW)
        .rev()
        .map(|r| r.result.match_score())
        .collect();

    let (earlier, recent) = window.split_at(window.len() / 2);
    let earlier_average = mean(earlier);
    let recent_average = mean(recent);
    let change = recent_average - earlier_average;

    let direction = if change.abs() < STABLE_THRESHOLD {
        TrendDirection::Stable
    } else if change > 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Declining
    };

    MatchTrend {
        direction,
        change: round_to(change, 2),
        earlier_average: Some(round_to(earlier_average, 2)),
        recent_average: Some(round_to(recent_average, 2)),
    }
}

/// Counts skills satisfying `keep` across the history. Most frequent first; ties keep
/// first-appearance order.
fn tally<F>(history: &[MatchRecord], keep: F) -> Vec<(String, usize)>
where
    F: Fn(MatchStatus, RequirementCategory) -> bool,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in history {
        for reason in record.result.reasons() {
            if !keep(reason.status, reason.category) {
                continue;
            }
            let count = counts.entry(reason.skill.clone()).or_insert_with(|| {
                order.push(reason.skill.clone());
                0
            });
            *count += 1;
        }
    }

    let mut tallied: Vec<(String, usize)> = order
        .into_iter()
        .map(|skill| {
            let count = counts.get(&skill).copied().unwrap_or(0);
            (skill, count)
        })
        .collect();
    tallied.sort_by(|a, b| b.1.cmp(&a.1));
    tallied
}

fn gap_impact(frequency: usize, total: usize) -> GapImpact {
    let share = frequency as f64 / total as f64;
    if share > 0.7 {
        GapImpact::Critical
    } else if share > 0.4 {
        GapImpact::High
    } else {
        GapImpact::Medium
    }
}

fn gap_priority(frequency: usize, total: usize) -> u8 {
    let share = frequency as f64 / total as f64;
    if share > 0.5 {
        1
    } else if share > 0.3 {
        2
    } else {
        3
    }
}

fn recommendations(average: f64, gaps: &[SkillGap], strengths: &[SkillStrength]) -> Vec<String> {
    let mut out: Vec<String> = match average {
        a if a < 50.0 => vec![
            "Focus on fundamental skill development; most roles you match against need skills you have not shown yet".to_string(),
            "Prioritize the most in-demand skills across your target roles".to_string(),
        ],
        a if a < 70.0 => vec![
            "Good foundation; close the critical skill gaps to lift your match scores".to_string(),
            "Target roles that align more closely with your current skill set".to_string(),
        ],
        a if a < 85.0 => vec![
            "Strong profile; fine-tune the remaining gaps and showcase measurable achievements".to_string(),
            "Consider senior or specialized roles that match your expertise".to_string(),
        ],
        _ => vec![
            "Excellent profile; build leadership skills and explore emerging technologies".to_string(),
            "Consider thought leadership through writing, speaking, or open source work".to_string(),
        ],
    };

    let critical: Vec<&str> = gaps
        .iter()
        .filter(|g| g.impact == GapImpact::Critical)
        .take(3)
        .map(|g| g.skill.as_str())
        .collect();
    if !critical.is_empty() {
        out.push(format!(
            "Critical gaps that recur across your matches: {}",
            critical.join(", ")
        ));
    }

    if !strengths.is_empty() {
        let top: Vec<&str> = strengths.iter().take(3).map(|s| s.skill.as_str()).collect();
        out.push(format!(
            "Lead with your strongest skills when applying: {}",
            top.join(", ")
        ));
    }

    out
}

/// Aggregate report over any number of past results, in any order.
pub fn profile_report(history: &[MatchRecord]) -> ProfileReport {
    let trend = match_trend(history);
    if history.is_empty() {
        return ProfileReport {
            total_matches_analyzed: 0,
            average_match_score: 0.0,
            median_match_score: 0.0,
            score_distribution: ScoreDistribution::default(),
            top_matched_skills: Vec::new(),
            skill_gaps: Vec::new(),
            trend,
            recommendations: vec![
                "No matches yet; run your profile against a few job descriptions to get insights"
                    .to_string(),
            ],
        };
    }

    let total = history.len();
    let mut scores: Vec<f64> = history.iter().map(|r| r.result.match_score()).collect();
    let average = mean(&scores);
    scores.sort_by(f64::total_cmp);

    let mut distribution = ScoreDistribution::default();
    for &score in &scores {
        if score >= EXCELLENT_SCORE {
            distribution.excellent += 1;
        } else if score >= GOOD_SCORE {
            distribution.good += 1;
        } else {
            distribution.poor += 1;
        }
    }

    let strengths: Vec<SkillStrength> = tally(history, |status, _| status == MatchStatus::Matched)
        .into_iter()
        .take(MAX_LISTED_SKILLS)
        .map(|(skill, count)| SkillStrength {
            skill,
            match_frequency: count,
            match_rate: round_to(count as f64 / total as f64, 2),
        })
        .collect();

    let gaps: Vec<SkillGap> = tally(history, |status, category| {
        status == MatchStatus::Missing && category == RequirementCategory::MustHave
    })
    .into_iter()
    .take(MAX_LISTED_SKILLS)
    .map(|(skill, count)| SkillGap {
        skill,
        gap_frequency: count,
        impact: gap_impact(count, total),
        priority: gap_priority(count, total),
    })
    .collect();

    ProfileReport {
        total_matches_analyzed: total,
        average_match_score: round_to(average, 2),
        median_match_score: round_to(median(&scores), 2),
        score_distribution: distribution,
        recommendations: recommendations(average, &gaps, &strengths),
        top_matched_skills: strengths,
        skill_gaps: gaps,
        trend,
    }
}
