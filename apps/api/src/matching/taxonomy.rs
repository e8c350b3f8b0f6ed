//! Skill taxonomy: categorized, tiered skill tokens and their importance weights.
//!
//! The taxonomy is built once at startup and shared read-only (`Arc<SkillTaxonomy>`
//! in `AppState`). Iteration order is declaration order: category by category,
//! tier by tier (critical → basic), token by token.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Tiers and weights
// ────────────────────────────────────────────────────────────────────────────

/// Importance tier of a skill within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    Critical,
    Important,
    Preferred,
    Basic,
}

impl SkillTier {
    pub const ALL: [SkillTier; 4] = [
        SkillTier::Critical,
        SkillTier::Important,
        SkillTier::Preferred,
        SkillTier::Basic,
    ];

    /// critical=3.0, important=2.0, preferred=1.5, basic=1.0
    pub fn weight(self) -> f64 {
        match self {
            SkillTier::Critical => 3.0,
            SkillTier::Important => 2.0,
            SkillTier::Preferred => 1.5,
            SkillTier::Basic => 1.0,
        }
    }
}

/// Weight used when a skill is looked up but is not part of the taxonomy.
pub const BASIC_WEIGHT: f64 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Source data
// ────────────────────────────────────────────────────────────────────────────

/// One category of the taxonomy as declared (or loaded from JSON).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub critical: Vec<String>,
    #[serde(default)]
    pub important: Vec<String>,
    #[serde(default)]
    pub preferred: Vec<String>,
    #[serde(default)]
    pub basic: Vec<String>,
}

impl SkillCategory {
    fn tier(&self, tier: SkillTier) -> &[String] {
        match tier {
            SkillTier::Critical => &self.critical,
            SkillTier::Important => &self.important,
            SkillTier::Preferred => &self.preferred,
            SkillTier::Basic => &self.basic,
        }
    }
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("taxonomy contains no skills")]
    Empty,
}

// ────────────────────────────────────────────────────────────────────────────
// Flattened taxonomy
// ────────────────────────────────────────────────────────────────────────────

/// A single registered skill token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillEntry {
    pub token: String,
    pub category: String,
    pub tier: SkillTier,
    pub weight: f64,
}

/// Immutable skill knowledge base.
///
/// A token registered twice keeps the position of its first registration and
/// the category/tier/weight of its last one.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
    entries: Vec<SkillEntry>,
    index: HashMap<String, usize>,
}

impl SkillTaxonomy {
    pub fn from_categories(categories: Vec<SkillCategory>) -> Self {
        let categories: Vec<SkillCategory> = categories
            .into_iter()
            .map(|c| SkillCategory {
                name: c.name,
                critical: lowercase_all(c.critical),
                important: lowercase_all(c.important),
                preferred: lowercase_all(c.preferred),
                basic: lowercase_all(c.basic),
            })
            .collect();

        let mut entries: Vec<SkillEntry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for category in &categories {
            for tier in SkillTier::ALL {
                for token in category.tier(tier) {
                    let entry = SkillEntry {
                        token: token.clone(),
                        category: category.name.clone(),
                        tier,
                        weight: tier.weight(),
                    };
                    match index.get(token) {
                        Some(&pos) => entries[pos] = entry,
                        None => {
                            index.insert(token.clone(), entries.len());
                            entries.push(entry);
                        }
                    }
                }
            }
        }

        Self {
            categories,
            entries,
            index,
        }
    }

    /// Parses a JSON array of categories.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let categories: Vec<SkillCategory> = serde_json::from_str(json)?;
        let taxonomy = Self::from_categories(categories);
        if taxonomy.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        Ok(taxonomy)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Weight of a registered token, `None` if the taxonomy does not know it.
    pub fn weight_of(&self, token: &str) -> Option<f64> {
        self.index.get(token).map(|&pos| self.entries[pos].weight)
    }

    /// Weight of a token, falling back to [`BASIC_WEIGHT`] for unknown tokens.
    pub fn weight_or_basic(&self, token: &str) -> f64 {
        self.weight_of(token).unwrap_or(BASIC_WEIGHT)
    }

    #[cfg(test)]
    pub fn get(&self, token: &str) -> Option<&SkillEntry> {
        self.index.get(token).map(|&pos| &self.entries[pos])
    }

    /// Registered tokens in declaration order.
    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::from_categories(default_categories())
    }
}

fn lowercase_all(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().map(|t| t.to_lowercase()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in taxonomy
// ────────────────────────────────────────────────────────────────────────────

type TierLists = [&'static [&'static str]; 4];

const DEFAULT_CATEGORIES: &[(&str, TierLists)] = &[
    (
        "languages",
        [
            &["javascript", "python", "java"],
            &["typescript", "c#", "go", "rust"],
            &["kotlin", "swift", "ruby", "php"],
            &["perl", "r", "matlab", "lua"],
        ],
    ),
    (
        "frontend",
        [
            &["react", "html", "css"],
            &["angular", "vue", "next.js", "webpack"],
            &["gatsby", "svelte", "sass", "less"],
            &["jquery", "bootstrap", "material-ui"],
        ],
    ),
    (
        "backend",
        [
            &["node.js", "express", "rest api"],
            &["django", "spring", "graphql"],
            &["fastapi", "laravel", "rails"],
            &["websocket", "grpc", "soap"],
        ],
    ),
    (
        "database",
        [
            &["sql", "mongodb", "postgresql"],
            &["mysql", "redis", "elasticsearch"],
            &["cassandra", "dynamodb", "oracle"],
            &["sqlite", "mariadb", "neo4j"],
        ],
    ),
    (
        "cloud",
        [
            &["aws", "docker", "kubernetes"],
            &["azure", "gcp", "terraform"],
            &["jenkins", "gitlab ci", "ansible"],
            &["vagrant", "puppet", "chef"],
        ],
    ),
    (
        "testing",
        [
            &["jest", "cypress", "selenium"],
            &["mocha", "pytest", "junit"],
            &["karma", "jasmine", "testng"],
            &["chai", "sinon", "enzyme"],
        ],
    ),
];

/// The built-in categories, in declaration order.
pub fn default_categories() -> Vec<SkillCategory> {
    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, [critical, important, preferred, basic])| SkillCategory {
            name: name.to_string(),
            critical: owned(critical),
            important: owned(important),
            preferred: owned(preferred),
            basic: owned(basic),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_taxonomy_weights() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.weight_of("python"), Some(3.0));
        assert_eq!(taxonomy.weight_of("docker"), Some(3.0));
        assert_eq!(taxonomy.weight_of("rust"), Some(2.0));
        assert_eq!(taxonomy.weight_of("svelte"), Some(1.5));
        assert_eq!(taxonomy.weight_of("neo4j"), Some(1.0));
        assert_eq!(taxonomy.weight_of("cobol"), None);
    }

    #[test]
    fn test_default_taxonomy_has_no_duplicates() {
        let taxonomy = SkillTaxonomy::default();
        let declared: usize = default_categories()
            .iter()
            .map(|c| c.critical.len() + c.important.len() + c.preferred.len() + c.basic.len())
            .sum();
        assert_eq!(taxonomy.len(), declared);
    }

    #[test]
    fn test_every_weight_is_a_tier_weight() {
        let taxonomy = SkillTaxonomy::default();
        for entry in taxonomy.entries() {
            assert!(
                [1.0, 1.5, 2.0, 3.0].contains(&entry.weight),
                "{} has weight {}",
                entry.token,
                entry.weight
            );
        }
    }

    #[test]
    fn test_unknown_token_falls_back_to_basic() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.weight_or_basic("cobol"), BASIC_WEIGHT);
        assert_eq!(taxonomy.weight_or_basic("java"), 3.0);
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let taxonomy = SkillTaxonomy::default();
        let first: Vec<&str> = taxonomy
            .entries()
            .iter()
            .take(4)
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(first, vec!["javascript", "python", "java", "typescript"]);
        assert_eq!(taxonomy.entries().last().unwrap().token, "enzyme");
    }

    #[test]
    fn test_duplicate_registration_last_wins_first_position_kept() {
        let taxonomy = SkillTaxonomy::from_categories(vec![
            SkillCategory {
                name: "a".to_string(),
                critical: vec!["docker".to_string()],
                basic: vec!["bash".to_string()],
                ..Default::default()
            },
            SkillCategory {
                name: "b".to_string(),
                preferred: vec!["docker".to_string()],
                ..Default::default()
            },
        ]);

        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.entries()[0].token, "docker");
        let docker = taxonomy.get("docker").unwrap();
        assert_eq!(docker.weight, 1.5);
        assert_eq!(docker.category, "b");
        assert_eq!(docker.tier, SkillTier::Preferred);
    }

    #[test]
    fn test_from_json_lowercases_and_defaults_missing_tiers() {
        let taxonomy =
            SkillTaxonomy::from_json(r#"[{"name": "data", "critical": ["Spark", "Kafka"]}]"#)
                .unwrap();
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.weight_of("spark"), Some(3.0));
        assert_eq!(taxonomy.categories()[0].basic.len(), 0);
    }

    #[test]
    fn test_from_json_rejects_empty_taxonomy() {
        let err = SkillTaxonomy::from_json(r#"[{"name": "empty"}]"#).unwrap_err();
        assert!(matches!(err, TaxonomyError::Empty));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = SkillTaxonomy::from_json("{not json").unwrap_err();
        assert!(matches!(err, TaxonomyError::Parse(_)));
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "ops", "important": ["nomad"]}}]"#).unwrap();
        let taxonomy = SkillTaxonomy::from_path(file.path()).unwrap();
        assert_eq!(taxonomy.weight_of("nomad"), Some(2.0));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SkillTaxonomy::from_path(Path::new("/nonexistent/taxonomy.json")).unwrap_err();
        assert!(matches!(err, TaxonomyError::Read { .. }));
    }
}
