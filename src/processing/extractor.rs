//! Whole-token skill detection over normalized resume text

use crate::error::{Result, ResumeFitError};
use crate::processing::taxonomy::Skill;
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeSet, HashMap};

/// Detects which of a fixed set of skills occur in a piece of text.
///
/// Every name and alias is normalized the same way as the text. A multi-token
/// form also matches its concatenation, so "Node.js", "node js" and "NodeJS"
/// are equivalent. Patterns and text are padded with a space on both sides, so
/// a hit always covers whole tokens: "java" never fires inside "javascript".
///
/// Each skill is detected on its own: a form that also occurs inside another
/// skill's longer form still counts, and two skills sharing a form are both
/// detected.
pub struct SkillExtractor {
    matcher: Option<AhoCorasick>,
    pattern_owners: Vec<Vec<usize>>,
    skill_names: Vec<String>,
    processor: TextProcessor,
}

impl SkillExtractor {
    pub fn new<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> Result<Self> {
        let processor = TextProcessor::new();
        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_owners: Vec<Vec<usize>> = Vec::new();
        let mut pattern_index: HashMap<String, usize> = HashMap::new();
        let mut skill_names = Vec::new();

        for (index, skill) in skills.into_iter().enumerate() {
            skill_names.push(skill.name.clone());

            let mut forms: Vec<String> = Vec::new();
            for form in skill.forms() {
                let normalized = processor.normalize(form);
                if normalized.is_empty() {
                    continue;
                }
                if normalized.contains(' ') {
                    forms.push(normalized.replace(' ', ""));
                }
                forms.push(normalized);
            }
            forms.sort();
            forms.dedup();

            for form in forms {
                let pattern = format!(" {} ", form);
                match pattern_index.get(&pattern) {
                    Some(&existing) => pattern_owners[existing].push(index),
                    None => {
                        pattern_index.insert(pattern.clone(), patterns.len());
                        patterns.push(pattern);
                        pattern_owners.push(vec![index]);
                    }
                }
            }
        }

        let matcher = if patterns.is_empty() {
            None
        } else {
            let built = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&patterns)
                .map_err(|e| ResumeFitError::InvalidTaxonomy(format!("Failed to build skill matcher: {}", e)))?;
            Some(built)
        };

        Ok(Self {
            matcher,
            pattern_owners,
            skill_names,
            processor,
        })
    }

    /// Canonical names of the skills present in `text`.
    pub fn detect(&self, text: &str) -> BTreeSet<String> {
        let Some(matcher) = &self.matcher else {
            return BTreeSet::new();
        };

        let padded = format!(" {} ", self.processor.normalize(text));
        let mut detected = vec![false; self.skill_names.len()];
        for hit in matcher.find_overlapping_iter(&padded) {
            for &skill in &self.pattern_owners[hit.pattern().as_usize()] {
                detected[skill] = true;
            }
        }

        detected
            .iter()
            .zip(&self.skill_names)
            .filter(|(found, _)| **found)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Number of skills this extractor looks for.
    pub fn vocabulary_size(&self) -> usize {
        self.skill_names.len()
    }

    /// Number of normalized patterns (names, aliases and joined forms).
    pub fn pattern_count(&self) -> usize {
        self.pattern_owners.len()
    }
}

/// One-shot detection against an ad-hoc skill list.
pub fn detect<'a>(text: &str, candidate_skills: impl IntoIterator<Item = &'a Skill>) -> Result<BTreeSet<String>> {
    Ok(SkillExtractor::new(candidate_skills)?.detect(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::taxonomy::SkillTaxonomy;

    fn skills(names: &[&str]) -> Vec<Skill> {
        names.iter().map(|n| Skill::new(*n)).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_whole_token_matching() {
        let candidates = skills(&["Java", "JavaScript"]);

        assert_eq!(detect("JavaScript developer", &candidates).unwrap(), set(&["JavaScript"]));
        assert_eq!(detect("Java and JavaScript", &candidates).unwrap(), set(&["Java", "JavaScript"]));
        assert_eq!(detect("java javascript", &candidates).unwrap(), set(&["Java", "JavaScript"]));
        assert!(detect("Javanese cooking", &candidates).unwrap().is_empty());
    }

    #[test]
    fn test_node_variants() {
        let candidates = skills(&["Node.js"]);

        for text in ["Built APIs in Node.js", "NodeJS services", "node js", "NODE.JS!"] {
            assert_eq!(detect(text, &candidates).unwrap(), set(&["Node.js"]), "text: {}", text);
        }
        assert!(detect("Nodes and edges", &candidates).unwrap().is_empty());
    }

    #[test]
    fn test_aliases_detect_canonical_name() {
        let candidates = vec![
            Skill::with_aliases("Machine Learning", &["ML"]),
            Skill::with_aliases("Kubernetes", &["K8s"]),
        ];

        let detected = detect("Deployed ML models on k8s clusters", &candidates).unwrap();
        assert_eq!(detected, set(&["Kubernetes", "Machine Learning"]));

        // "html" contains "ml" but is a different token
        assert!(detect("HTML templates", &candidates).unwrap().is_empty());
    }

    #[test]
    fn test_symbol_skills() {
        let candidates = skills(&["C++", "C#", "CI/CD", "C"]);

        assert_eq!(detect("Wrote C++ daemons", &candidates).unwrap(), set(&["C++"]));
        assert_eq!(detect("Shipped C# tooling", &candidates).unwrap(), set(&["C#"]));
        assert_eq!(detect("Owned the CI/CD pipeline", &candidates).unwrap(), set(&["CI/CD"]));
        assert_eq!(detect("cicd", &candidates).unwrap(), set(&["CI/CD"]));
        assert_eq!(detect("Embedded C firmware", &candidates).unwrap(), set(&["C"]));
    }

    #[test]
    fn test_detection_is_independent_of_other_candidates() {
        let text = "Administered SQL Server clusters";

        assert_eq!(detect(text, &skills(&["SQL"])).unwrap(), set(&["SQL"]));
        assert_eq!(
            detect(text, &skills(&["SQL", "SQL Server"])).unwrap(),
            set(&["SQL", "SQL Server"])
        );
        assert_eq!(detect(text, &skills(&["SQL Server"])).unwrap(), set(&["SQL Server"]));
    }

    #[test]
    fn test_shared_alias_detects_both() {
        let candidates = vec![
            Skill::with_aliases("Amazon Web Services", &["cloud"]),
            Skill::with_aliases("Google Cloud", &["cloud"]),
        ];

        let detected = detect("Cloud infrastructure", &candidates).unwrap();
        assert_eq!(detected, set(&["Amazon Web Services", "Google Cloud"]));
    }

    #[test]
    fn test_multi_word_skill_needs_all_tokens() {
        let candidates = skills(&["Machine Learning", "Problem Solving"]);

        assert!(detect("machine operator, learning fast", &candidates).unwrap().is_empty());
        assert_eq!(
            detect("Strong problem-solving skills", &candidates).unwrap(),
            set(&["Problem Solving"])
        );
    }

    #[test]
    fn test_empty_vocabulary_and_text() {
        let extractor = SkillExtractor::new(std::iter::empty::<&Skill>()).unwrap();
        assert!(extractor.detect("Python").is_empty());
        assert_eq!(extractor.vocabulary_size(), 0);

        let candidates = skills(&["Python"]);
        assert!(detect("", &candidates).unwrap().is_empty());
    }

    #[test]
    fn test_builtin_general_vocabulary() {
        let taxonomy = SkillTaxonomy::builtin();
        let general = taxonomy.general();
        let extractor = SkillExtractor::new(general.skills.iter().map(|s| &s.skill)).unwrap();

        assert_eq!(extractor.vocabulary_size(), general.skills.len());
        assert!(extractor.pattern_count() > extractor.vocabulary_size());

        let detected = extractor.detect("Python, SQL and Amazon Web Services; some NodeJS");
        assert_eq!(detected, set(&["AWS", "Node.js", "Python", "SQL"]));
    }
}
