use crate::domain::ports::EquivalenceRules;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Raw lookup tables, as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryTables {
    /// Non-Latin spelling -> canonical Latin token (manufacturers and the
    /// local inverter word).
    pub transliterations: BTreeMap<String, String>,
    pub synonym_groups: Vec<Vec<String>>,
    pub optional_tokens: Vec<String>,
    pub stopwords: Vec<String>,
    pub noise_words: Vec<String>,
    pub type_marker: String,
}

impl Default for RegistryTables {
    fn default() -> Self {
        let transliterations = [
            ("טורנדו", "TORNADO"),
            ("טורנאדו", "TORNADO"),
            ("אלקטרה", "ELECTRA"),
            ("אלקטרא", "ELECTRA"),
            ("תדיראן", "TADIRAN"),
            ("תדירן", "TADIRAN"),
            ("אלקו", "ELCO"),
            ("גרי", "GREE"),
            ("מידאה", "MIDEA"),
            ("מידיאה", "MIDEA"),
            ("האייר", "HAIER"),
            ("הייר", "HAIER"),
            ("אינוורטר", "INVERTER"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            transliterations,
            synonym_groups: vec![strings(&["INV", "INVERTER", "אינוורטר"])],
            optional_tokens: strings(&["1PH", "3PH", "1PHASE", "3PHASE", "SINGLE", "THREE"]),
            stopwords: strings(&[
                "כ\"ס", "כס", "שנת", "דגם", "מזגן", "עילי", "מיני", "מרכזי", "MODEL", "YEAR",
            ]),
            noise_words: strings(&["ZAP", "SHOP", "LOGO", "מזגן", "עילי", "מיני", "מרכזי"]),
            type_marker: "INV".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn upper_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|item| item.to_uppercase()).collect()
}

/// Validated, upper-cased form of [`RegistryTables`].
#[derive(Debug, Clone)]
pub struct EquivalenceRegistry {
    transliterations: Vec<(String, String)>,
    synonym_groups: Vec<HashSet<String>>,
    optional_tokens: HashSet<String>,
    stopwords: HashSet<String>,
    noise_words: HashSet<String>,
    type_markers: Vec<String>,
}

impl EquivalenceRegistry {
    pub fn new(tables: RegistryTables) -> Result<Self> {
        Self::check(&tables)?;
        Ok(Self::build(tables))
    }

    fn check(tables: &RegistryTables) -> Result<()> {
        for (from, to) in &tables.transliterations {
            if from.is_ascii() {
                return Err(MatchError::InvalidConfigValueError {
                    field: "tables.transliterations".to_string(),
                    value: from.clone(),
                    reason: "Transliteration keys must contain non-ASCII characters".to_string(),
                });
            }
            if !to.is_ascii() || to.trim().is_empty() {
                return Err(MatchError::InvalidConfigValueError {
                    field: "tables.transliterations".to_string(),
                    value: to.clone(),
                    reason: "Canonical names must be non-empty ASCII".to_string(),
                });
            }
        }

        for group in &tables.synonym_groups {
            if group.is_empty() || group.iter().any(|token| token.trim().is_empty()) {
                return Err(MatchError::InvalidConfigValueError {
                    field: "tables.synonym_groups".to_string(),
                    value: format!("{:?}", group),
                    reason: "Synonym groups must list at least one non-empty token".to_string(),
                });
            }
        }

        validate_non_empty_string("tables.type_marker", &tables.type_marker)
    }

    fn build(tables: RegistryTables) -> Self {
        let synonym_groups: Vec<HashSet<String>> =
            tables.synonym_groups.iter().map(|group| upper_set(group)).collect();

        let marker = tables.type_marker.trim().to_uppercase();
        let mut type_markers: Vec<String> = synonym_groups
            .iter()
            .find(|group| group.contains(&marker))
            .map(|group| group.iter().cloned().collect())
            .unwrap_or_else(|| vec![marker.clone()]);
        type_markers.sort();

        // Longest spelling first so a short alias never splits a longer one.
        let mut transliterations: Vec<(String, String)> = tables
            .transliterations
            .into_iter()
            .map(|(from, to)| (from, to.trim().to_string()))
            .collect();
        transliterations.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });

        Self {
            transliterations,
            synonym_groups,
            optional_tokens: upper_set(&tables.optional_tokens),
            stopwords: upper_set(&tables.stopwords),
            noise_words: upper_set(&tables.noise_words),
            type_markers,
        }
    }
}

impl Default for EquivalenceRegistry {
    fn default() -> Self {
        Self::build(RegistryTables::default())
    }
}

impl EquivalenceRules for EquivalenceRegistry {
    fn is_equivalent(&self, a: &str, b: &str) -> bool {
        let a = a.to_uppercase();
        let b = b.to_uppercase();
        if a == b {
            return true;
        }
        self.synonym_groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }

    fn is_optional(&self, token: &str) -> bool {
        self.optional_tokens.contains(&token.to_uppercase())
    }

    fn type_markers(&self) -> &[String] {
        &self.type_markers
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_uppercase())
    }

    fn is_noise_word(&self, token: &str) -> bool {
        self.noise_words.contains(&token.to_uppercase())
    }

    fn transliterations(&self) -> &[(String, String)] {
        &self.transliterations
    }
}
