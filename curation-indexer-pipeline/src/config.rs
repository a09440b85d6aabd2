//! Static lookup tables injected into the validator and compiler.

use std::collections::HashMap;

use crate::errors::PipelineError;

const DEFAULT_LANGUAGE_INDICES: [(&str, &str); 5] = [
    ("en", "corpus_en"),
    ("de", "corpus_de"),
    ("es", "corpus_es"),
    ("fr", "corpus_fr"),
    ("it", "corpus_it"),
];

const DEFAULT_GRADE_RANKS: [(&str, u32); 3] = [("A", 3), ("B", 2), ("C", 1)];

/// Parse `key=value,key=value` into pairs.
fn parse_pairs(mapping: &str) -> Result<Vec<(String, String)>, PipelineError> {
    mapping.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| PipelineError::config(format!("expected key=value, got '{}'", entry)))?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(PipelineError::config(format!("empty key or value in '{}'", entry)));
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Language code to index name.
///
/// Lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct LanguageIndexTable {
    indices: HashMap<String, String>,
}

impl Default for LanguageIndexTable {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE_INDICES)
    }
}

impl LanguageIndexTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            indices: entries
                .into_iter()
                .map(|(language, index)| (language.as_ref().to_lowercase(), index.into()))
                .collect(),
        }
    }

    /// Parse a table from `en=corpus_en,de=corpus_de`.
    pub fn parse(mapping: &str) -> Result<Self, PipelineError> {
        let pairs = parse_pairs(mapping)?;
        if pairs.is_empty() {
            return Err(PipelineError::config("language index table is empty"));
        }
        Ok(Self::new(pairs))
    }

    /// The index for a language, if the language is known.
    pub fn resolve(&self, language: &str) -> Option<&str> {
        self.indices
            .get(&language.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Letter grade to numeric quality rank.
#[derive(Debug, Clone)]
pub struct GradeRankTable {
    ranks: HashMap<String, u32>,
}

impl Default for GradeRankTable {
    fn default() -> Self {
        Self::new(DEFAULT_GRADE_RANKS)
    }
}

impl GradeRankTable {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        Self {
            ranks: entries
                .into_iter()
                .map(|(grade, rank)| (grade.as_ref().to_uppercase(), rank))
                .collect(),
        }
    }

    /// Parse a table from `A=3,B=2,C=1`.
    pub fn parse(mapping: &str) -> Result<Self, PipelineError> {
        let entries = parse_pairs(mapping)?
            .into_iter()
            .map(|(grade, rank)| {
                rank.parse::<u32>()
                    .map(|rank| (grade, rank))
                    .map_err(|e| PipelineError::config(format!("invalid rank '{}': {}", rank, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(entries))
    }

    /// The rank for a grade, if the grade is known.
    pub fn rank(&self, grade: &str) -> Option<u32> {
        self.ranks.get(&grade.trim().to_uppercase()).copied()
    }
}
