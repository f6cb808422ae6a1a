//! Skill Extractor: finds vocabulary terms in free text and normalizes them to canonical names.
//!
//! Matching runs over a folded copy of the text (lowercased, horizontal whitespace collapsed)
//! with one precompiled automaton for all canonical names and synonyms. Candidates must sit on
//! word boundaries; among overlapping candidates the leftmost wins, and at one position the
//! longest wins, so "javascript" is never also reported as "java".

use aho_corasick::AhoCorasick;
use tracing::debug;

use crate::matching::skills::SkillSet;
use crate::matching::vocabulary::{normalize_term, SkillLookup, VocabularyError};

/// Lowercases and collapses runs of spaces/tabs into one space. Newlines are kept because
/// requirement classification reads line and section structure from them.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c != '\n' && c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            if c != '\n' && !out.is_empty() && !out.ends_with('\n') {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
    }
    out
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `text[start..end]` is not glued to a neighbouring word. A side whose edge
/// character is punctuation (the `+` of `c++`, the `.` of `.net core`) needs no boundary.
pub(crate) fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let term = &text[start..end];
    let starts_with_word = term.chars().next().is_some_and(is_word_char);
    let ends_with_word = term.chars().next_back().is_some_and(is_word_char);

    let before_ok = !starts_with_word || !text[..start].chars().next_back().is_some_and(is_word_char);
    let after_ok = !ends_with_word || !text[end..].chars().next().is_some_and(is_word_char);

    before_ok && after_ok
}

/// A selected phrase occurrence, in byte offsets of the folded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TermMatch {
    pub start: usize,
    pub end: usize,
    pub pattern: usize,
}

/// Multi-phrase matcher with word-boundary filtering and longest-match-first selection.
/// Shared by the skill extractor and the requirement cue scanner.
#[derive(Debug, Clone)]
pub(crate) struct TermMatcher {
    automaton: AhoCorasick,
}

impl TermMatcher {
    pub fn new<P: AsRef<str>>(patterns: &[P]) -> Result<Self, VocabularyError> {
        let automaton = AhoCorasick::new(patterns.iter().map(|p| p.as_ref()))
            .map_err(|e| VocabularyError::Matcher(e.to_string()))?;
        Ok(Self { automaton })
    }

    /// Non-overlapping matches, left to right. `folded` must already be folded.
    pub fn find(&self, folded: &str) -> Vec<TermMatch> {
        let mut candidates: Vec<TermMatch> = self
            .automaton
            .find_overlapping_iter(folded)
            .filter(|m| on_word_boundary(folded, m.start(), m.end()))
            .map(|m| TermMatch {
                start: m.start(),
                end: m.end(),
                pattern: m.pattern().as_usize(),
            })
            .collect();

        // Leftmost first; at equal start the longest first.
        candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut selected = Vec::with_capacity(candidates.len());
        let mut cursor = 0;
        for candidate in candidates {
            if candidate.start < cursor {
                continue;
            }
            cursor = candidate.end;
            selected.push(candidate);
        }
        selected
    }
}

/// One occurrence of a skill in folded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMention {
    pub skill: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct SkillExtractor {
    matcher: TermMatcher,
    /// pattern id → canonical name
    canonicals: Vec<String>,
}

impl SkillExtractor {
    /// Terms from `lookup` are normalized here, so custom lookups may return them in any case.
    pub fn new(lookup: &dyn SkillLookup) -> Result<Self, VocabularyError> {
        let (patterns, canonicals): (Vec<String>, Vec<String>) = lookup
            .terms()
            .into_iter()
            .map(|(term, canonical)| (normalize_term(term), normalize_term(canonical)))
            .filter(|(term, _)| !term.is_empty())
            .unzip();

        Ok(Self {
            matcher: TermMatcher::new(patterns.as_slice())?,
            canonicals,
        })
    }

    /// Skill occurrences in already-folded text, left to right.
    pub fn mentions(&self, folded: &str) -> Vec<SkillMention> {
        self.matcher
            .find(folded)
            .into_iter()
            .map(|m| SkillMention {
                skill: self.canonicals[m.pattern].clone(),
                start: m.start,
                end: m.end,
            })
            .collect()
    }

    /// Canonical skills mentioned anywhere in `text`. Empty or blank text yields an empty set.
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return SkillSet::new();
        }
        let skills: SkillSet = self
            .mentions(&fold(text))
            .into_iter()
            .map(|m| m.skill)
            .collect();
        debug!("Extracted {} skills from {} bytes", skills.len(), text.len());
        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vocabulary::{SkillCategory, Vocabulary};

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(&Vocabulary::builtin().unwrap()).unwrap()
    }

    fn extract(text: &str) -> Vec<String> {
        extractor()
            .extract(text)
            .iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_fold_lowercases_and_collapses_spaces() {
        assert_eq!(fold("Team \t  Leadership\n  Go"), "team leadership\ngo");
        assert_eq!(fold("  "), "");
    }

    #[test]
    fn test_empty_and_blank_text_yield_empty_set() {
        let ex = extractor();
        assert!(ex.extract("").is_empty());
        assert!(ex.extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_synonyms_normalize_to_canonical() {
        let ex = extractor();
        let short = ex.extract("JS and K8s experience");
        let long = ex.extract("JavaScript and Kubernetes experience");
        assert_eq!(short, long);
        assert!(short.contains("javascript"));
        assert!(short.contains("kubernetes"));
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn test_java_not_matched_inside_javascript() {
        assert_eq!(extract("Senior JavaScript engineer"), vec!["javascript"]);
        let both = extract("Java and JavaScript");
        assert_eq!(both, vec!["java", "javascript"]);
    }

    #[test]
    fn test_partial_words_are_not_matched() {
        // scala ⊂ scalable, rest ⊂ interest, sql ⊂ mysql
        assert_eq!(extract("A scalable system of interest"), Vec::<String>::new());
        assert_eq!(extract("MySQL tuning"), vec!["mysql"]);
    }

    #[test]
    fn test_longest_match_wins_at_same_position() {
        assert_eq!(extract("Built with Node.js"), vec!["node.js"]);
        assert_eq!(extract("Spring Boot services"), vec!["spring boot"]);
        assert_eq!(extract("SQL Server admin"), vec!["sql server"]);
    }

    #[test]
    fn test_punctuated_terms_match() {
        let skills = extract("Proficient in C++, C# and CI/CD.");
        assert_eq!(skills, vec!["c#", "c++", "ci/cd"]);
    }

    #[test]
    fn test_multiword_terms_tolerate_extra_spaces() {
        assert_eq!(extract("Proven TEAM   leadership"), vec!["team leadership"]);
    }

    #[test]
    fn test_bullets_and_sections() {
        let text = "Skills:\n• Python (5 years)\n• Django framework\n- PostgreSQL database design\n\nTechnologies used:\n- React.js frontend\n- AWS cloud services\n- Docker containerization";
        let skills = extractor().extract(text);
        for expected in ["python", "django", "postgresql", "react", "aws", "docker"] {
            assert!(skills.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_mentions_report_offsets_in_folded_text() {
        let ex = extractor();
        let folded = fold("Go and Rust");
        let mentions = ex.mentions(&folded);
        assert_eq!(mentions.len(), 2);
        assert_eq!(&folded[mentions[1].start..mentions[1].end], "rust");
        assert_eq!(mentions[0].skill, "go");
    }

    #[test]
    fn test_extraction_is_order_independent() {
        let ex = extractor();
        assert_eq!(
            ex.extract("Docker, Python, AWS"),
            ex.extract("AWS, Python, Docker")
        );
    }

    #[test]
    fn test_minimal_injected_vocabulary() {
        let vocab = Vocabulary::builder("test")
            .skill("rust", SkillCategory::Programming)
            .synonym("rustlang", "rust")
            .build()
            .unwrap();
        let ex = SkillExtractor::new(&vocab).unwrap();
        let skills = ex.extract("RustLang and Python");
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("rust"));
    }

    #[test]
    fn test_alias_with_extra_spaces_still_matches() {
        let vocab = Vocabulary::builder("test")
            .skill("rest", SkillCategory::Architecture)
            .synonym("REST   API", "rest")
            .build()
            .unwrap();
        let ex = SkillExtractor::new(&vocab).unwrap();
        assert!(ex.extract("Designs REST API contracts").contains("rest"));
    }

    /// Lookup that hands back terms exactly as a caller typed them.
    struct RawLookup;

    impl SkillLookup for RawLookup {
        fn canonical(&self, term: &str) -> Option<&str> {
            (term.eq_ignore_ascii_case("kafka") || term.eq_ignore_ascii_case("apache kafka"))
                .then_some("kafka")
        }

        fn terms(&self) -> Vec<(&str, &str)> {
            vec![("Kafka", "Kafka"), ("Apache  Kafka", "Kafka"), ("  ", "Kafka")]
        }

        fn rank(&self, canonical: &str) -> Option<usize> {
            (canonical == "kafka").then_some(0)
        }

        fn category(&self, _canonical: &str) -> Option<SkillCategory> {
            Some(SkillCategory::DataAi)
        }
    }

    #[test]
    fn test_custom_lookup_terms_are_normalized() {
        let ex = SkillExtractor::new(&RawLookup).unwrap();
        let skills = ex.extract("Streams on Apache Kafka");
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("kafka"));

        let mentions = ex.mentions(&fold("apache kafka"));
        assert_eq!(mentions.len(), 1);
        assert_eq!((mentions[0].start, mentions[0].end), (0, 12));
    }

    #[test]
    fn test_word_boundary_helper() {
        assert!(on_word_boundary("use go.", 4, 6));
        assert!(!on_word_boundary("google", 0, 2));
        assert!(on_word_boundary("c++11", 0, 3));
    }
}
