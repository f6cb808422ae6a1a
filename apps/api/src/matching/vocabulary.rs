//! Skill vocabulary: canonical skill table, synonym map, and requirement cue phrases.
//!
//! The vocabulary is an immutable value built once at startup (from the built-in defaults or a
//! versioned JSON file) and shared read-only across requests. The engine only sees it through
//! the `SkillLookup` trait so tests can inject a minimal table.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::defaults;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Load-time configuration errors. Never produced while scoring.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("skill name cannot be empty")]
    EmptySkillName,

    #[error("skill '{0}' is declared more than once")]
    DuplicateSkill(String),

    #[error("empty alias registered for '{canonical}'")]
    EmptyAlias { canonical: String },

    #[error("alias '{alias}' maps to '{canonical}', which is not a declared skill")]
    UnknownCanonical { alias: String, canonical: String },

    #[error("alias '{alias}' maps to both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("{0} cue list cannot be empty")]
    EmptyCueList(CueKind),

    #[error("cue phrase cannot be empty")]
    EmptyCue,

    #[error("cue '{0}' is listed as both must-have and nice-to-have")]
    AmbiguousCue(String),

    #[error("failed to build matcher: {0}")]
    Matcher(String),

    #[error("malformed vocabulary file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read vocabulary file: {0}")]
    Io(#[from] std::io::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Frontend,
    Backend,
    Database,
    Cloud,
    Tools,
    DataAi,
    Architecture,
    Methodology,
    SoftSkill,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Database => "database",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Tools => "tools",
            SkillCategory::DataAi => "data_ai",
            SkillCategory::Architecture => "architecture",
            SkillCategory::Methodology => "methodology",
            SkillCategory::SoftSkill => "soft_skill",
        }
    }
}

/// Which requirement tier a cue phrase signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    MustHave,
    NiceToHave,
}

impl std::fmt::Display for CueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueKind::MustHave => write!(f, "must-have"),
            CueKind::NiceToHave => write!(f, "nice-to-have"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub name: String,
    pub category: SkillCategory,
}

/// Phrase lists that mark must-have vs nice-to-have requirements in a job description.
/// Phrases are stored lowercased and trimmed; the two lists are disjoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueTable {
    must_have: Vec<String>,
    nice_to_have: Vec<String>,
}

impl CueTable {
    pub fn new<S: AsRef<str>>(must_have: &[S], nice_to_have: &[S]) -> Result<Self, VocabularyError> {
        let must_have = normalize_cues(must_have, CueKind::MustHave)?;
        let nice_to_have = normalize_cues(nice_to_have, CueKind::NiceToHave)?;

        if let Some(shared) = must_have.iter().find(|c| nice_to_have.contains(c)) {
            return Err(VocabularyError::AmbiguousCue(shared.clone()));
        }

        Ok(Self {
            must_have,
            nice_to_have,
        })
    }

    pub fn must_have(&self) -> &[String] {
        &self.must_have
    }

    pub fn nice_to_have(&self) -> &[String] {
        &self.nice_to_have
    }

    /// All phrases with their kind, must-have first.
    pub fn phrases(&self) -> impl Iterator<Item = (&str, CueKind)> {
        self.must_have
            .iter()
            .map(|c| (c.as_str(), CueKind::MustHave))
            .chain(
                self.nice_to_have
                    .iter()
                    .map(|c| (c.as_str(), CueKind::NiceToHave)),
            )
    }
}

impl Default for CueTable {
    fn default() -> Self {
        Self {
            must_have: defaults::MUST_HAVE_CUES.iter().map(|c| c.to_string()).collect(),
            nice_to_have: defaults::NICE_TO_HAVE_CUES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

fn normalize_cues<S: AsRef<str>>(
    cues: &[S],
    kind: CueKind,
) -> Result<Vec<String>, VocabularyError> {
    if cues.is_empty() {
        return Err(VocabularyError::EmptyCueList(kind));
    }
    let mut out: Vec<String> = Vec::with_capacity(cues.len());
    for cue in cues {
        let cue = normalize_term(cue.as_ref());
        if cue.is_empty() {
            return Err(VocabularyError::EmptyCue);
        }
        if !out.contains(&cue) {
            out.push(cue);
        }
    }
    Ok(out)
}

/// Lowercased with whitespace runs collapsed to one space, the same shape `fold` gives text.
pub(crate) fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .map(|word| word.chars().flat_map(char::to_lowercase).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup trait
// ────────────────────────────────────────────────────────────────────────────

/// Read-only alias to canonical lookup the engine depends on.
pub trait SkillLookup: Send + Sync {
    /// Canonical name for a canonical skill or any registered synonym (case-insensitive).
    fn canonical(&self, term: &str) -> Option<&str>;

    /// Every matchable term paired with its canonical name.
    fn terms(&self) -> Vec<(&str, &str)>;

    /// Declaration position of a canonical skill; drives every reason ordering.
    fn rank(&self, canonical: &str) -> Option<usize>;

    fn category(&self, canonical: &str) -> Option<SkillCategory>;
}

// ────────────────────────────────────────────────────────────────────────────
// Vocabulary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Vocabulary {
    version: String,
    skills: Vec<SkillDef>,
    ranks: HashMap<String, usize>,
    /// alias → index into `skills`
    synonyms: BTreeMap<String, usize>,
    cues: CueTable,
}

impl Vocabulary {
    pub fn builder(version: impl Into<String>) -> VocabularyBuilder {
        VocabularyBuilder {
            version: version.into(),
            skills: Vec::new(),
            synonyms: Vec::new(),
            cues: None,
        }
    }

    /// The built-in table from `defaults`.
    pub fn builtin() -> Result<Self, VocabularyError> {
        let mut builder = Self::builder(defaults::VERSION);
        for (name, category) in defaults::SKILLS {
            builder = builder.skill(*name, *category);
        }
        for (alias, canonical) in defaults::SYNONYMS {
            builder = builder.synonym(*alias, *canonical);
        }
        builder.build()
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = serde_json::from_str(json)?;

        let mut builder = Self::builder(file.version);
        for skill in file.skills {
            builder = builder.skill(skill.name, skill.category);
        }
        for (alias, canonical) in file.synonyms {
            builder = builder.synonym(alias, canonical);
        }
        if let Some(cues) = file.cues {
            builder = builder.cues(CueTable::new(
                cues.must_have.as_slice(),
                cues.nice_to_have.as_slice(),
            )?);
        }
        builder.build()
    }

    pub fn from_path(path: &Path) -> Result<Self, VocabularyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn skills(&self) -> &[SkillDef] {
        &self.skills
    }

    pub fn synonym_count(&self) -> usize {
        self.synonyms.len()
    }

    pub fn cues(&self) -> &CueTable {
        &self.cues
    }
}

impl SkillLookup for Vocabulary {
    fn canonical(&self, term: &str) -> Option<&str> {
        let term = normalize_term(term);
        self.ranks
            .get(&term)
            .or_else(|| self.synonyms.get(&term))
            .map(|&idx| self.skills[idx].name.as_str())
    }

    fn terms(&self) -> Vec<(&str, &str)> {
        let canonical = self.skills.iter().map(|s| (s.name.as_str(), s.name.as_str()));
        let aliases = self
            .synonyms
            .iter()
            .map(|(alias, &idx)| (alias.as_str(), self.skills[idx].name.as_str()));
        canonical.chain(aliases).collect()
    }

    fn rank(&self, canonical: &str) -> Option<usize> {
        self.ranks.get(canonical).copied()
    }

    fn category(&self, canonical: &str) -> Option<SkillCategory> {
        self.ranks.get(canonical).map(|&idx| self.skills[idx].category)
    }
}

/// Collects skills, synonyms, and cues, then validates them together in `build`.
pub struct VocabularyBuilder {
    version: String,
    skills: Vec<(String, SkillCategory)>,
    synonyms: Vec<(String, String)>,
    cues: Option<CueTable>,
}

impl VocabularyBuilder {
    pub fn skill(mut self, name: impl Into<String>, category: SkillCategory) -> Self {
        self.skills.push((name.into(), category));
        self
    }

    pub fn synonym(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.synonyms.push((alias.into(), canonical.into()));
        self
    }

    pub fn cues(mut self, cues: CueTable) -> Self {
        self.cues = Some(cues);
        self
    }

    pub fn build(self) -> Result<Vocabulary, VocabularyError> {
        let mut skills = Vec::with_capacity(self.skills.len());
        let mut ranks = HashMap::with_capacity(self.skills.len());

        for (name, category) in self.skills {
            let name = normalize_term(&name);
            if name.is_empty() {
                return Err(VocabularyError::EmptySkillName);
            }
            if ranks.contains_key(&name) {
                return Err(VocabularyError::DuplicateSkill(name));
            }
            ranks.insert(name.clone(), skills.len());
            skills.push(SkillDef { name, category });
        }

        let mut synonyms: BTreeMap<String, usize> = BTreeMap::new();
        for (alias, canonical) in self.synonyms {
            let alias = normalize_term(&alias);
            let canonical = normalize_term(&canonical);
            if alias.is_empty() {
                return Err(VocabularyError::EmptyAlias { canonical });
            }
            let target = *ranks
                .get(&canonical)
                .ok_or_else(|| VocabularyError::UnknownCanonical {
                    alias: alias.clone(),
                    canonical: canonical.clone(),
                })?;

            // An alias that is itself a canonical name may only point at that same skill.
            if let Some(&own) = ranks.get(&alias) {
                if own != target {
                    return Err(VocabularyError::AliasConflict {
                        alias,
                        first: skills[own].name.clone(),
                        second: canonical,
                    });
                }
                continue;
            }

            match synonyms.get(&alias) {
                Some(&existing) if existing != target => {
                    return Err(VocabularyError::AliasConflict {
                        alias,
                        first: skills[existing].name.clone(),
                        second: canonical,
                    });
                }
                Some(_) => {}
                None => {
                    synonyms.insert(alias, target);
                }
            }
        }

        Ok(Vocabulary {
            version: self.version,
            skills,
            ranks,
            synonyms,
            cues: self.cues.unwrap_or_default(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    version: String,
    skills: Vec<SkillDef>,
    #[serde(default)]
    synonyms: BTreeMap<String, String>,
    #[serde(default)]
    cues: Option<CueFile>,
}

#[derive(Debug, Deserialize)]
struct CueFile {
    must_have: Vec<String>,
    nice_to_have: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
