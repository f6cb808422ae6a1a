//! Requirement Classifier: splits a job description's skills into must-have and nice-to-have.
//!
//! Cue phrases come from the `CueTable`; for each mention of a skill the classifier looks, in
//! order, for:
//! 1. the nearest cue earlier in the same clause,
//! 2. the first cue later in the same clause ("Python required, Docker a plus"),
//! 3. the nearest cue earlier in the same sentence,
//! 4. the first cue later in the same sentence ("Kafka and Redis experience is a plus"),
//! 5. the nearest cue earlier in the same section (sections are separated by blank lines),
//! 6. otherwise must-have.
//!
//! Clauses end at a comma followed by whitespace. A skill is must-have if any of its mentions
//! is. Layout offsets are computed once per text and every lookup is a binary search, so
//! classification stays linear in the text length.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::matching::extractor::{fold, SkillExtractor, SkillMention, TermMatch, TermMatcher};
use crate::matching::skills::SkillSet;
use crate::matching::vocabulary::{CueKind, CueTable, VocabularyError};

/// Job-side requirement: two disjoint skill sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Requirement {
    must_have: SkillSet,
    nice_to_have: SkillSet,
}

impl Requirement {
    /// Builds a requirement; any skill present in both sets stays must-have only.
    pub fn new(must_have: SkillSet, mut nice_to_have: SkillSet) -> Self {
        for skill in must_have.iter() {
            nice_to_have.remove(skill);
        }
        Self {
            must_have,
            nice_to_have,
        }
    }

    pub fn must_have(&self) -> &SkillSet {
        &self.must_have
    }

    pub fn nice_to_have(&self) -> &SkillSet {
        &self.nice_to_have
    }

    pub fn is_empty(&self) -> bool {
        self.must_have.is_empty() && self.nice_to_have.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RequirementClassifier {
    extractor: SkillExtractor,
    cues: TermMatcher,
    /// pattern id → cue kind
    kinds: Vec<CueKind>,
}

impl RequirementClassifier {
    pub fn new(extractor: SkillExtractor, cues: &CueTable) -> Result<Self, VocabularyError> {
        let (phrases, kinds): (Vec<&str>, Vec<CueKind>) = cues.phrases().unzip();
        Ok(Self {
            extractor,
            cues: TermMatcher::new(phrases.as_slice())?,
            kinds,
        })
    }

    pub fn classify(&self, job_text: &str, extracted: &SkillSet) -> Requirement {
        if extracted.is_empty() {
            return Requirement::default();
        }

        let folded = fold(job_text);
        let layout = TextLayout::new(&folded);
        let cues = self.cues.find(&folded);
        let mentions = self.extractor.mentions(&folded);

        let mut verdicts: HashMap<&str, CueKind> = HashMap::new();
        for mention in mentions.iter().filter(|m| extracted.contains(&m.skill)) {
            let kind = self.classify_mention(&layout, &cues, mention);
            let verdict = verdicts.entry(mention.skill.as_str()).or_insert(kind);
            if kind == CueKind::MustHave {
                *verdict = CueKind::MustHave;
            }
        }

        let mut must_have = SkillSet::new();
        let mut nice_to_have = SkillSet::new();
        for skill in extracted.iter() {
            match verdicts.get(skill) {
                Some(CueKind::NiceToHave) => nice_to_have.insert(skill),
                _ => must_have.insert(skill),
            };
        }

        debug!(
            "Classified {} skills from {} mentions: {} must-have, {} nice-to-have",
            extracted.len(),
            mentions.len(),
            must_have.len(),
            nice_to_have.len()
        );

        Requirement::new(must_have, nice_to_have)
    }

    fn classify_mention(
        &self,
        layout: &TextLayout,
        cues: &[TermMatch],
        mention: &SkillMention,
    ) -> CueKind {
        let sentence = layout.sentence_around(mention.start, mention.end);
        let clause = layout.clause_around(mention.start, mention.end, sentence);

        let found = preceding_cue(cues, clause.0, mention.start)
            .or_else(|| trailing_cue(cues, mention.end, clause.1))
            .or_else(|| preceding_cue(cues, sentence.0, mention.start))
            .or_else(|| trailing_cue(cues, mention.end, sentence.1))
            .or_else(|| preceding_cue(cues, layout.section_start(mention.start), mention.start));

        match found {
            Some(cue) => self.kinds[cue.pattern],
            None => CueKind::MustHave,
        }
    }
}

/// Nearest cue lying entirely within `from..to`. `cues` is sorted and non-overlapping, so
/// ordering by start is also ordering by end.
fn preceding_cue(cues: &[TermMatch], from: usize, to: usize) -> Option<&TermMatch> {
    let idx = cues.partition_point(|c| c.end <= to);
    idx.checked_sub(1)
        .map(|i| &cues[i])
        .filter(|c| c.start >= from)
}

/// First cue lying entirely within `from..to`.
fn trailing_cue(cues: &[TermMatch], from: usize, to: usize) -> Option<&TermMatch> {
    let idx = cues.partition_point(|c| c.start < from);
    cues.get(idx).filter(|c| c.end <= to)
}

/// Sentence, clause, and section boundaries of folded text, as sorted byte offsets.
struct TextLayout {
    len: usize,
    /// Positions of line breaks and sentence terminators (`!`, `?`, `;`, or a `.` followed by
    /// whitespace or end of text, so `node.js` does not split).
    sentence_breaks: Vec<usize>,
    /// Positions of commas followed by whitespace or end of text.
    clause_breaks: Vec<usize>,
    /// Offsets where a section begins: 0 and the line after every blank line.
    section_starts: Vec<usize>,
}

impl TextLayout {
    fn new(text: &str) -> Self {
        let mut sentence_breaks = Vec::new();
        let mut clause_breaks = Vec::new();
        let mut section_starts = vec![0];

        let mut line_blank = true;
        let mut chars = text.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            let followed_by_space = chars.peek().map_or(true, |&(_, n)| n.is_whitespace());
            match c {
                '\n' => {
                    sentence_breaks.push(pos);
                    if line_blank {
                        section_starts.push(pos + 1);
                    }
                    line_blank = true;
                    continue;
                }
                '!' | '?' | ';' => sentence_breaks.push(pos),
                '.' if followed_by_space => sentence_breaks.push(pos),
                ',' if followed_by_space => clause_breaks.push(pos),
                _ => {}
            }
            if !c.is_whitespace() {
                line_blank = false;
            }
        }

        Self {
            len: text.len(),
            sentence_breaks,
            clause_breaks,
            section_starts,
        }
    }

    fn section_start(&self, pos: usize) -> usize {
        let idx = self.section_starts.partition_point(|&s| s <= pos);
        idx.checked_sub(1).map_or(0, |i| self.section_starts[i])
    }

    /// Sentence containing `start..end`. Every break character is one byte wide.
    fn sentence_around(&self, start: usize, end: usize) -> (usize, usize) {
        enclosing(&self.sentence_breaks, start, end, (0, self.len))
    }

    /// Clause containing `start..end`, limited to its sentence.
    fn clause_around(&self, start: usize, end: usize, sentence: (usize, usize)) -> (usize, usize) {
        enclosing(&self.clause_breaks, start, end, sentence)
    }
}

/// Span between the last break before `start` and the first break at or after `end`, clipped
/// to `bounds`.
fn enclosing(breaks: &[usize], start: usize, end: usize, bounds: (usize, usize)) -> (usize, usize) {
    let before = breaks.partition_point(|&b| b < start);
    let span_start = before
        .checked_sub(1)
        .map_or(bounds.0, |i| (breaks[i] + 1).max(bounds.0));

    let after = breaks.partition_point(|&b| b < end);
    let span_end = breaks.get(after).map_or(bounds.1, |&b| b.min(bounds.1));

    (span_start, span_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vocabulary::Vocabulary;

    fn classify(job_text: &str) -> Requirement {
        let vocab = Vocabulary::builtin().unwrap();
        let extractor = SkillExtractor::new(&vocab).unwrap();
        let classifier = RequirementClassifier::new(extractor.clone(), vocab.cues()).unwrap();
        let extracted = extractor.extract(job_text);
        classifier.classify(job_text, &extracted)
    }

    #[test]
    fn test_section_headings_drive_classification() {
        let req = classify(
            "Required Skills:\n- 5+ years Python development\n- Django framework experience\n- PostgreSQL database knowledge\n\nPreferred Skills:\n- Redis caching experience\n- Docker containerization",
        );
        for skill in ["python", "django", "postgresql"] {
            assert!(req.must_have().contains(skill), "{skill} should be must-have");
        }
        for skill in ["redis", "docker"] {
            assert!(req.nice_to_have().contains(skill), "{skill} should be nice-to-have");
        }
    }

    #[test]
    fn test_headings_without_blank_lines() {
        let req = classify("Essential: Python, Django\nNice to have: Python, Redis\nBonus: Django, Kubernetes");
        assert!(req.must_have().contains("python"));
        assert!(req.must_have().contains("django"));
        assert!(!req.nice_to_have().contains("python"));
        assert!(!req.nice_to_have().contains("django"));
        assert!(req.nice_to_have().contains("redis"));
        assert!(req.nice_to_have().contains("kubernetes"));
    }

    #[test]
    fn test_trailing_cue_in_same_sentence() {
        let req = classify(
            "We need a developer with Python and Django experience. Knowledge of Kubernetes and AWS would be beneficial.",
        );
        assert!(req.must_have().contains("python"));
        assert!(req.must_have().contains("django"));
        assert!(req.nice_to_have().contains("kubernetes"));
        assert!(req.nice_to_have().contains("aws"));
    }

    #[test]
    fn test_uncued_skills_default_to_must_have() {
        let req = classify("Backend role working on Go services and gRPC APIs.");
        assert!(req.must_have().contains("go"));
        assert!(req.must_have().contains("grpc"));
        assert!(req.nice_to_have().is_empty());
    }

    #[test]
    fn test_dotted_terms_do_not_split_sentences() {
        let req = classify("Node.js and TypeScript are a plus.");
        assert!(req.nice_to_have().contains("node.js"));
        assert!(req.nice_to_have().contains("typescript"));
    }

    #[test]
    fn test_blank_line_ends_a_section() {
        let req = classify("Nice to have:\n- Redis\n\nAbout the team:\nWe ship Rust daily.");
        assert!(req.nice_to_have().contains("redis"));
        assert!(req.must_have().contains("rust"));
    }

    #[test]
    fn test_extracted_skill_absent_from_text_is_must_have() {
        let vocab = Vocabulary::builtin().unwrap();
        let extractor = SkillExtractor::new(&vocab).unwrap();
        let classifier = RequirementClassifier::new(extractor, vocab.cues()).unwrap();
        let extracted: SkillSet = ["kafka"].into_iter().collect();
        let req = classifier.classify("Preferred: nothing in particular", &extracted);
        assert!(req.must_have().contains("kafka"));
    }

    #[test]
    fn test_empty_text_and_empty_skills() {
        assert!(classify("").is_empty());
        assert!(classify("   ").is_empty());
    }

    #[test]
    fn test_requirement_new_enforces_disjointness() {
        let must: SkillSet = ["python", "django"].into_iter().collect();
        let nice: SkillSet = ["python", "redis"].into_iter().collect();
        let req = Requirement::new(must, nice);
        assert!(req.must_have().contains("python"));
        assert!(!req.nice_to_have().contains("python"));
        assert_eq!(req.nice_to_have().len(), 1);
    }

    #[test]
    fn test_clause_cue_beats_earlier_sentence_cue() {
        let req = classify("Python required, Docker a plus.");
        assert!(req.must_have().contains("python"));
        assert!(req.nice_to_have().contains("docker"), "{req:?}");

        // A list after a heading cue still inherits it clause by clause.
        let req = classify("Preferred: Redis, Kafka, Docker.");
        assert_eq!(req.nice_to_have().len(), 3, "{req:?}");
    }

    #[test]
    fn test_numbers_with_commas_do_not_split_clauses() {
        let req = classify("Kafka at 10,000 events per second is a plus.");
        assert!(req.nice_to_have().contains("kafka"));
    }

    #[test]
    fn test_long_single_line_classifies_quickly() {
        let text = "python, docker, required, ".repeat(4_000);
        assert!(text.len() > 100_000);

        let started = std::time::Instant::now();
        let req = classify(&text);
        let elapsed = started.elapsed();

        assert!(req.must_have().contains("python"));
        assert!(req.must_have().contains("docker"));
        assert!(
            elapsed < std::time::Duration::from_secs(1),
            "classification of {} bytes took {elapsed:?}",
            text.len()
        );
    }

    #[test]
    fn test_custom_cue_table() {
        let vocab = Vocabulary::builtin().unwrap();
        let extractor = SkillExtractor::new(&vocab).unwrap();
        let cues = CueTable::new(&["core stack"], &["ideally"]).unwrap();
        let classifier = RequirementClassifier::new(extractor.clone(), &cues).unwrap();
        let text = "Core stack: Rust. Ideally Kafka.";
        let req = classifier.classify(text, &extractor.extract(text));
        assert!(req.must_have().contains("rust"));
        assert!(req.nice_to_have().contains("kafka"));
    }
}
