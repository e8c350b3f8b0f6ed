//! Weighted skill extraction: normalizes free text and reports which taxonomy
//! skills it mentions.
//!
//! Matching is literal substring containment on the normalized text, not
//! word-boundary matching: "go" is found inside "ongoing", and tokens holding
//! characters the normalizer strips ("c#", "node.js") never match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::taxonomy::SkillTaxonomy;

/// Skills found in one text blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Found tokens, in taxonomy declaration order.
    pub skills: Vec<String>,
    pub weights: BTreeMap<String, f64>,
}

/// Lower-cases `text` and replaces every character outside `[a-z0-9\s]` with a space.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Normalizes `text` and collects every taxonomy token it contains.
pub fn extract_weighted_skills(text: &str, taxonomy: &SkillTaxonomy) -> ExtractionResult {
    let normalized = normalize(text);
    extract_from_normalized(&normalized, taxonomy)
}

/// Extraction over text that has already been through [`normalize`].
pub fn extract_from_normalized(normalized: &str, taxonomy: &SkillTaxonomy) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    if normalized.trim().is_empty() {
        return result;
    }

    for entry in taxonomy.entries() {
        if normalized.contains(entry.token.as_str()) {
            result.skills.push(entry.token.clone());
            result.weights.insert(entry.token.clone(), entry.weight);
        }
    }

    result
}
