//! Serialized tagger model format
//!
//! Models are JSON documents tagged with a format marker and version:
//!
//! ```json
//! {
//!   "format": "ner-tagger",
//!   "version": 1,
//!   "case_sensitive": false,
//!   "entries": [{"term": "Patrick Star", "type": "PERSON", "aliases": ["Patrick"]}],
//!   "patterns": [{"pattern": "\\b[A-Z]\\w+ Inc\\b", "type": "ORG", "confidence": 0.85}]
//! }
//! ```

use ner_core::EntityType;
use serde::{Deserialize, Serialize};

/// Format marker every model file must carry
pub const MODEL_FORMAT: &str = "ner-tagger";

/// The only model version this build understands
pub const MODEL_FORMAT_VERSION: u32 = 1;

fn default_pattern_confidence() -> f32 {
    0.8
}

/// Dictionary entry: a canonical term and its aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GazetteerEntry {
    pub term: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Regex rule tagging every match with an entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternRule {
    pub pattern: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default = "default_pattern_confidence")]
    pub confidence: f32,
}

/// On-disk tagger model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaggerModel {
    pub format: String,
    pub version: u32,
    /// Match gazetteer terms case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub entries: Vec<GazetteerEntry>,
    #[serde(default)]
    pub patterns: Vec<PatternRule>,
}

impl TaggerModel {
    /// Empty model with the current format header
    pub fn new() -> Self {
        Self {
            format: MODEL_FORMAT.to_string(),
            version: MODEL_FORMAT_VERSION,
            case_sensitive: false,
            entries: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Parse a model from JSON without validating its contents
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add a dictionary entry
    pub fn with_entry(mut self, term: &str, entity_type: EntityType, aliases: &[&str]) -> Self {
        self.entries.push(GazetteerEntry {
            term: term.to_string(),
            entity_type,
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Add a regex rule
    pub fn with_pattern(mut self, pattern: &str, entity_type: EntityType, confidence: f32) -> Self {
        self.patterns.push(PatternRule {
            pattern: pattern.to_string(),
            entity_type,
            confidence,
        });
        self
    }

    /// Check the header and the structural constraints serde cannot express
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format != MODEL_FORMAT {
            return Err(ModelError::InvalidFormat(self.format.clone()));
        }
        if self.version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.version,
                supported: MODEL_FORMAT_VERSION,
            });
        }

        for entry in &self.entries {
            if entry.term.trim().is_empty() {
                return Err(ModelError::InvalidEntry("empty term".to_string()));
            }
            if entry.aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(ModelError::InvalidEntry(format!(
                    "empty alias for term '{}'",
                    entry.term
                )));
            }
        }

        for rule in &self.patterns {
            if !(0.0..=1.0).contains(&rule.confidence) {
                return Err(ModelError::InvalidEntry(format!(
                    "confidence {} out of range for pattern '{}'",
                    rule.confidence, rule.pattern
                )));
            }
        }

        Ok(())
    }
}

impl Default for TaggerModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors in the contents of a parsed model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unexpected format marker '{0}', expected 'ner-tagger'")]
    InvalidFormat(String),

    #[error("unsupported model version {found}, this build reads version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
