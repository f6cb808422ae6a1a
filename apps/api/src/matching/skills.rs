use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::SkillLookup;

/// A set of canonical skill identifiers (lowercase). Iteration is lexical; use
/// `ordered` when a vocabulary-stable order is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a skill, lowercasing it. Returns false if it was already present.
    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        let skill = skill.as_ref().trim().to_lowercase();
        if skill.is_empty() {
            return false;
        }
        self.0.insert(skill)
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        self.0.remove(skill)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection_count(&self, other: &SkillSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    /// Skills sorted by vocabulary declaration order. Skills the vocabulary does not
    /// know sort after all known ones, lexically.
    pub fn ordered<'a>(&'a self, lookup: &dyn SkillLookup) -> Vec<&'a str> {
        let mut skills: Vec<&str> = self.iter().collect();
        skills.sort_by_key(|s| (lookup.rank(s).unwrap_or(usize::MAX), *s));
        skills
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vocabulary::{SkillCategory, Vocabulary};

    #[test]
    fn test_insert_normalizes_case_and_dedups() {
        let mut set = SkillSet::new();
        assert!(set.insert("Python"));
        assert!(!set.insert("python "));
        assert!(!set.insert("  "));
        assert_eq!(set.len(), 1);
        assert!(set.contains("python"));
    }

    #[test]
    fn test_intersection_count() {
        let a: SkillSet = ["python", "django", "aws"].into_iter().collect();
        let b: SkillSet = ["AWS", "python", "rust"].into_iter().collect();
        assert_eq!(a.intersection_count(&b), 2);
    }

    #[test]
    fn test_ordered_uses_vocabulary_rank_then_unknowns() {
        let vocab = Vocabulary::builder("test")
            .skill("rust", SkillCategory::Programming)
            .skill("docker", SkillCategory::Cloud)
            .skill("agile", SkillCategory::Methodology)
            .build()
            .unwrap();
        let set: SkillSet = ["zig", "agile", "docker", "rust", "cobol"].into_iter().collect();
        assert_eq!(
            set.ordered(&vocab),
            vec!["rust", "docker", "agile", "cobol", "zig"]
        );
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let set: SkillSet = ["redis", "go"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["go","redis"]"#);
    }
}
