//! Skill taxonomy: weighted job profiles and the general fallback profile

use crate::error::{Result, ResumeFitError};
use crate::processing::text_processor::name_key;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use strsim::jaro_winkler;

/// Lowest and highest importance a skill can carry within a profile.
pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 5;

pub const GENERAL_PROFILE_ID: &str = "general";
pub const GENERAL_PROFILE_TITLE: &str = "General";

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A named competency. Aliases are only used for detection and never appear in output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Identity of the skill: case-insensitive, whitespace-normalized name.
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Canonical name followed by every alias.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|a| a.as_str()))
    }

    fn merge_aliases(&mut self, other: &Skill) {
        for alias in &other.aliases {
            let key = name_key(alias);
            if !self.aliases.iter().any(|a| name_key(a) == key) {
                self.aliases.push(alias.clone());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSkill {
    #[serde(flatten)]
    pub skill: Skill,
    pub weight: u8,
}

impl WeightedSkill {
    pub fn new(skill: Skill, weight: u8) -> Self {
        Self { skill, weight }
    }

    pub fn name(&self) -> &str {
        &self.skill.name
    }
}

/// A target role with its weighted skill set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProfile {
    pub id: String,
    pub title: String,
    pub skills: Vec<WeightedSkill>,
}

impl JobProfile {
    pub fn is_general(&self) -> bool {
        self.id == GENERAL_PROFILE_ID
    }

    /// Sum of every skill weight; the denominator of the coverage score.
    pub fn total_weight(&self) -> u32 {
        self.skills.iter().map(|s| s.weight as u32).sum()
    }

    pub fn weight_of(&self, skill_name: &str) -> Option<u8> {
        let key = name_key(skill_name);
        self.skills
            .iter()
            .find(|s| s.skill.key() == key)
            .map(|s| s.weight)
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name())
    }

    fn matches_label(&self, label_key: &str) -> bool {
        name_key(&self.id) == label_key || name_key(&self.title) == label_key
    }
}

/// How a job label is turned into a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobResolution {
    /// Unknown labels fall back to the general profile.
    #[default]
    Lenient,
    /// Unknown labels fail with `UnknownJobKind`.
    Strict,
}

/// On-disk representation of a taxonomy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyFile {
    /// General skill catalog; aliases declared here apply wherever the skill appears.
    #[serde(default)]
    pub skills: Vec<WeightedSkill>,
    #[serde(default)]
    pub jobs: Vec<JobProfile>,
}

/// Immutable registry of job profiles, built once and shared by every analysis.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    catalog: Vec<WeightedSkill>,
    jobs: Vec<JobProfile>,
    general: JobProfile,
}

impl SkillTaxonomy {
    /// Validate the raw data and derive the general profile.
    pub fn new(catalog: Vec<WeightedSkill>, jobs: Vec<JobProfile>) -> Result<Self> {
        validate_skills("skill catalog", &catalog, true)?;

        let mut seen_labels = HashSet::from([GENERAL_PROFILE_ID.to_string()]);
        for job in &jobs {
            if job.id.trim().is_empty() || job.title.trim().is_empty() {
                return Err(ResumeFitError::InvalidTaxonomy(
                    "job profiles need a non-empty id and title".to_string(),
                ));
            }
            if !seen_labels.insert(name_key(&job.id)) {
                return Err(ResumeFitError::InvalidTaxonomy(format!(
                    "duplicate or reserved job id '{}'",
                    job.id
                )));
            }
            let title_key = name_key(&job.title);
            if title_key != name_key(&job.id) && !seen_labels.insert(title_key) {
                return Err(ResumeFitError::InvalidTaxonomy(format!(
                    "duplicate or reserved job title '{}'",
                    job.title
                )));
            }
            validate_skills(&format!("job '{}'", job.id), &job.skills, false)?;
        }

        let jobs: Vec<JobProfile> = jobs
            .into_iter()
            .map(|job| with_catalog_aliases(job, &catalog))
            .collect();
        let general = build_general_profile(&catalog, &jobs);

        if general.skills.is_empty() {
            return Err(ResumeFitError::InvalidTaxonomy(
                "taxonomy declares no skills".to_string(),
            ));
        }

        debug!(
            "Taxonomy built: {} job profiles, {} skills in general profile",
            jobs.len(),
            general.skills.len()
        );

        Ok(Self {
            catalog,
            jobs,
            general,
        })
    }

    pub fn from_file(file: TaxonomyFile) -> Result<Self> {
        Self::new(file.skills, file.jobs)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content)
            .map_err(|e| ResumeFitError::InvalidTaxonomy(format!("Failed to parse taxonomy: {}", e)))?;
        Self::from_file(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading skill taxonomy from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_file(&self) -> TaxonomyFile {
        TaxonomyFile {
            skills: self.catalog.clone(),
            jobs: self.jobs.clone(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(&self.to_file())
            .map_err(|e| ResumeFitError::Configuration(format!("Failed to serialize taxonomy: {}", e)))
    }

    /// Job profiles in declaration order (the general profile is not included).
    pub fn jobs(&self) -> &[JobProfile] {
        &self.jobs
    }

    pub fn general(&self) -> &JobProfile {
        &self.general
    }

    /// Every profile, general first.
    pub fn profiles(&self) -> impl Iterator<Item = &JobProfile> {
        std::iter::once(&self.general).chain(self.jobs.iter())
    }

    /// Lenient resolution: empty or unknown labels resolve to the general profile.
    pub fn resolve(&self, label: Option<&str>) -> &JobProfile {
        match self.find(label) {
            Some(profile) => profile,
            None => {
                if let Some(label) = label.filter(|l| !l.trim().is_empty()) {
                    info!("No job profile matches '{}', using the general profile", label.trim());
                }
                &self.general
            }
        }
    }

    /// Strict resolution: an absent label still means "general", an unknown one is an error.
    pub fn resolve_strict(&self, label: Option<&str>) -> Result<&JobProfile> {
        match label.map(str::trim).filter(|l| !l.is_empty()) {
            None => Ok(&self.general),
            Some(label) => self.find(Some(label)).ok_or_else(|| ResumeFitError::UnknownJobKind {
                label: label.to_string(),
                suggestion: self.suggest(label),
            }),
        }
    }

    pub fn resolve_with(&self, label: Option<&str>, mode: JobResolution) -> Result<&JobProfile> {
        match mode {
            JobResolution::Lenient => Ok(self.resolve(label)),
            JobResolution::Strict => self.resolve_strict(label),
        }
    }

    fn find(&self, label: Option<&str>) -> Option<&JobProfile> {
        let key = name_key(label?);
        if key.is_empty() {
            return None;
        }
        self.profiles().find(|p| p.matches_label(&key))
    }

    /// Closest known job title, if any is similar enough.
    pub fn suggest(&self, label: &str) -> Option<String> {
        let key = name_key(label);
        self.jobs
            .iter()
            .map(|job| (jaro_winkler(&key, &name_key(&job.title)), &job.title))
            .filter(|(similarity, _)| *similarity >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, title)| title.clone())
    }

    /// Built-in taxonomy: the general skill catalog and four engineering roles.
    pub fn builtin() -> Self {
        let catalog = builtin_catalog();
        let jobs = builtin_jobs();
        let jobs: Vec<JobProfile> = jobs
            .into_iter()
            .map(|job| with_catalog_aliases(job, &catalog))
            .collect();
        let general = build_general_profile(&catalog, &jobs);
        Self {
            catalog,
            jobs,
            general,
        }
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_skills(owner: &str, skills: &[WeightedSkill], allow_empty: bool) -> Result<()> {
    if skills.is_empty() && !allow_empty {
        return Err(ResumeFitError::InvalidTaxonomy(format!(
            "{} has an empty skill set",
            owner
        )));
    }

    let mut keys = HashSet::new();
    for weighted in skills {
        let key = weighted.skill.key();
        if key.is_empty() {
            return Err(ResumeFitError::InvalidTaxonomy(format!(
                "{} contains a skill with an empty name",
                owner
            )));
        }
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weighted.weight) {
            return Err(ResumeFitError::InvalidTaxonomy(format!(
                "{}: weight {} for '{}' is outside {}..={}",
                owner, weighted.weight, weighted.skill.name, MIN_WEIGHT, MAX_WEIGHT
            )));
        }
        if !keys.insert(key) {
            return Err(ResumeFitError::InvalidTaxonomy(format!(
                "{} lists '{}' more than once",
                owner, weighted.skill.name
            )));
        }
    }
    Ok(())
}

fn with_catalog_aliases(mut job: JobProfile, catalog: &[WeightedSkill]) -> JobProfile {
    let by_key: HashMap<String, &Skill> = catalog.iter().map(|w| (w.skill.key(), &w.skill)).collect();
    for weighted in &mut job.skills {
        if let Some(catalog_skill) = by_key.get(&weighted.skill.key()) {
            weighted.skill.merge_aliases(catalog_skill);
        }
    }
    job
}

/// Union of the catalog and all job tables, each skill at its highest observed weight.
fn build_general_profile(catalog: &[WeightedSkill], jobs: &[JobProfile]) -> JobProfile {
    let mut skills: Vec<WeightedSkill> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for weighted in catalog.iter().chain(jobs.iter().flat_map(|j| j.skills.iter())) {
        let key = weighted.skill.key();
        match index.get(&key) {
            Some(&i) => {
                let existing = &mut skills[i];
                existing.weight = existing.weight.max(weighted.weight);
                existing.skill.merge_aliases(&weighted.skill);
            }
            None => {
                index.insert(key, skills.len());
                skills.push(weighted.clone());
            }
        }
    }

    JobProfile {
        id: GENERAL_PROFILE_ID.to_string(),
        title: GENERAL_PROFILE_TITLE.to_string(),
        skills,
    }
}

fn weighted(name: &str, weight: u8) -> WeightedSkill {
    WeightedSkill::new(Skill::new(name), weight)
}

fn weighted_alias(name: &str, weight: u8, aliases: &[&str]) -> WeightedSkill {
    WeightedSkill::new(Skill::with_aliases(name, aliases), weight)
}

fn job(id: &str, title: &str, skills: &[(&str, u8)]) -> JobProfile {
    JobProfile {
        id: id.to_string(),
        title: title.to_string(),
        skills: skills.iter().map(|(name, w)| weighted(name, *w)).collect(),
    }
}

fn builtin_catalog() -> Vec<WeightedSkill> {
    vec![
        // Technical skills
        weighted("Python", 5),
        weighted("Java", 4),
        weighted_alias("JavaScript", 4, &["ECMAScript"]),
        weighted("C++", 3),
        weighted("SQL", 5),
        weighted_alias("Machine Learning", 5, &["ML"]),
        weighted("Data Analysis", 4),
        weighted("Statistics", 4),
        weighted_alias("Deep Learning", 4, &["DL"]),
        weighted("TensorFlow", 3),
        weighted("PyTorch", 3),
        weighted_alias("AWS", 3, &["Amazon Web Services"]),
        weighted("React", 4),
        weighted_alias("Node.js", 3, &["NodeJS"]),
        weighted("HTML", 3),
        weighted("CSS", 3),
        weighted("Docker", 3),
        weighted_alias("Kubernetes", 3, &["K8s"]),
        weighted("Git", 3),
        weighted("Spark", 3),
        weighted("Pandas", 4),
        weighted("Numpy", 3),
        // Soft skills
        weighted("Communication", 2),
        weighted("Leadership", 2),
        weighted("Teamwork", 2),
        weighted("Problem Solving", 3),
        // Role-specific skills that only appear in job tables
        weighted_alias("TypeScript", 3, &["TS"]),
        weighted_alias("UI/UX", 3, &["UX Design", "UI Design"]),
        weighted("Linux", 4),
        weighted_alias("CI/CD", 4, &["Continuous Integration"]),
    ]
}

fn builtin_jobs() -> Vec<JobProfile> {
    vec![
        job(
            "data-scientist",
            "Data Scientist",
            &[
                ("Python", 5),
                ("Machine Learning", 5),
                ("Statistics", 4),
                ("SQL", 4),
                ("Data Analysis", 4),
                ("Deep Learning", 3),
                ("TensorFlow", 3),
                ("Pandas", 4),
            ],
        ),
        job(
            "frontend-developer",
            "Frontend Developer",
            &[
                ("JavaScript", 5),
                ("React", 5),
                ("HTML", 4),
                ("CSS", 4),
                ("TypeScript", 3),
                ("UI/UX", 3),
                ("Node.js", 3),
            ],
        ),
        job(
            "backend-developer",
            "Backend Developer",
            &[
                ("Python", 4),
                ("Java", 4),
                ("SQL", 4),
                ("AWS", 3),
                ("Docker", 3),
                ("Kubernetes", 3),
                ("Node.js", 4),
            ],
        ),
        job(
            "devops-engineer",
            "DevOps Engineer",
            &[
                ("Docker", 5),
                ("Kubernetes", 5),
                ("AWS", 4),
                ("Git", 4),
                ("Python", 3),
                ("Linux", 4),
                ("CI/CD", 4),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let builtin = SkillTaxonomy::builtin();
        let rebuilt = SkillTaxonomy::new(builtin.catalog.clone(), builtin.jobs.clone()).unwrap();

        assert_eq!(rebuilt.jobs().len(), 4);
        assert_eq!(rebuilt.general(), builtin.general());
    }

    #[test]
    fn test_resolution_is_case_insensitive_on_id_and_title() {
        let taxonomy = SkillTaxonomy::builtin();

        assert_eq!(taxonomy.resolve(Some("data scientist")).id, "data-scientist");
        assert_eq!(taxonomy.resolve(Some("  DevOps   Engineer ")).id, "devops-engineer");
        assert_eq!(taxonomy.resolve(Some("FRONTEND-DEVELOPER")).title, "Frontend Developer");
    }

    #[test]
    fn test_lenient_fallback_to_general() {
        let taxonomy = SkillTaxonomy::builtin();

        assert!(taxonomy.resolve(None).is_general());
        assert!(taxonomy.resolve(Some("")).is_general());
        assert!(taxonomy.resolve(Some("   ")).is_general());
        assert!(taxonomy.resolve(Some("Astronaut")).is_general());
        assert!(taxonomy.resolve(Some("general")).is_general());
    }

    #[test]
    fn test_strict_resolution() {
        let taxonomy = SkillTaxonomy::builtin();

        assert!(taxonomy.resolve_strict(None).unwrap().is_general());
        assert_eq!(
            taxonomy.resolve_strict(Some("Backend Developer")).unwrap().id,
            "backend-developer"
        );

        match taxonomy.resolve_strict(Some("Astronaut")) {
            Err(ResumeFitError::UnknownJobKind { label, suggestion }) => {
                assert_eq!(label, "Astronaut");
                assert_eq!(suggestion, None);
            }
            other => panic!("expected UnknownJobKind, got {:?}", other),
        }

        match taxonomy.resolve_with(Some("Data Scientst"), JobResolution::Strict) {
            Err(ResumeFitError::UnknownJobKind { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("Data Scientist"));
            }
            other => panic!("expected UnknownJobKind, got {:?}", other),
        }
    }

    #[test]
    fn test_general_profile_uses_max_weight() {
        let catalog = vec![weighted("Python", 2), weighted("Git", 1)];
        let jobs = vec![
            job("a", "Role A", &[("Python", 4), ("Rust", 3)]),
            job("b", "Role B", &[("python", 5), ("Rust", 1)]),
        ];
        let taxonomy = SkillTaxonomy::new(catalog, jobs).unwrap();
        let general = taxonomy.general();

        assert_eq!(general.title, GENERAL_PROFILE_TITLE);
        assert_eq!(general.skills.len(), 3);
        assert_eq!(general.weight_of("Python"), Some(5));
        assert_eq!(general.weight_of("rust"), Some(3));
        assert_eq!(general.weight_of("Git"), Some(1));
    }

    #[test]
    fn test_catalog_aliases_flow_into_jobs() {
        let taxonomy = SkillTaxonomy::builtin();
        let devops = taxonomy.resolve(Some("DevOps Engineer"));
        let kubernetes = devops
            .skills
            .iter()
            .find(|s| s.name() == "Kubernetes")
            .unwrap();

        assert!(kubernetes.skill.aliases.contains(&"K8s".to_string()));
    }

    #[test]
    fn test_validation_rejects_bad_data() {
        let empty_job = vec![job("empty", "Empty", &[])];
        assert!(matches!(
            SkillTaxonomy::new(vec![], empty_job),
            Err(ResumeFitError::InvalidTaxonomy(_))
        ));

        let bad_weight = vec![job("a", "A", &[("Python", 6)])];
        assert!(SkillTaxonomy::new(vec![], bad_weight).is_err());

        let zero_weight = vec![job("a", "A", &[("Python", 0)])];
        assert!(SkillTaxonomy::new(vec![], zero_weight).is_err());

        let duplicate_ids = vec![job("a", "A", &[("Python", 3)]), job("A", "B", &[("SQL", 3)])];
        assert!(SkillTaxonomy::new(vec![], duplicate_ids).is_err());

        let duplicate_skill = vec![job("a", "A", &[("Python", 3), ("python", 2)])];
        assert!(SkillTaxonomy::new(vec![], duplicate_skill).is_err());

        let reserved = vec![job("General", "Anything", &[("Python", 3)])];
        assert!(SkillTaxonomy::new(vec![], reserved).is_err());

        let reserved_title = vec![job("misc", "general", &[("Python", 3)])];
        assert!(SkillTaxonomy::new(vec![], reserved_title).is_err());

        assert!(SkillTaxonomy::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_toml_round_trip_preserves_profiles() {
        let builtin = SkillTaxonomy::builtin();
        let toml = builtin.to_toml_string().unwrap();
        let loaded = SkillTaxonomy::from_toml_str(&toml).unwrap();

        assert_eq!(loaded.jobs(), builtin.jobs());
        assert_eq!(loaded.general(), builtin.general());
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
[[skills]]
name = "Rust"
weight = 4
aliases = ["rustlang"]

[[jobs]]
id = "systems"
title = "Systems Engineer"

[[jobs.skills]]
name = "Rust"
weight = 5

[[jobs.skills]]
name = "Linux"
weight = 3
"#;
        let taxonomy = SkillTaxonomy::from_toml_str(content).unwrap();
        let systems = taxonomy.resolve(Some("systems engineer"));

        assert_eq!(systems.total_weight(), 8);
        assert_eq!(systems.skills[0].skill.aliases, vec!["rustlang".to_string()]);
        assert_eq!(taxonomy.general().weight_of("Rust"), Some(5));
    }
}
