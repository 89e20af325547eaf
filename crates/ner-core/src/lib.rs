//! NER Core - Entity types, tagger abstraction, and shared configuration
//!
//! This crate defines the abstractions shared by the tagger implementations
//! and the HTTP layer:
//! - The closed set of entity type tags
//! - The `Tagger` capability
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, LoggingConfig, ModelConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for NER operations
#[derive(Error, Debug)]
pub enum NerError {
    #[error("Tagger error: {0}")]
    Tagger(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NerError>;

// ============================================================================
// Entity Types
// ============================================================================

/// Entity type tags a tagger may assign to a mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    /// A person
    Person,
    /// A geo-political entity (country, city, state)
    Gpe,
    /// A place that is not a geo-political entity
    Location,
    /// An organization
    Org,
}

impl EntityType {
    /// Every tag, in declaration order
    pub const ALL: [EntityType; 4] = [Self::Person, Self::Gpe, Self::Location, Self::Org];

    /// Get the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Gpe => "GPE",
            Self::Location => "LOCATION",
            Self::Org => "ORG",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mapping from entity mention to its type.
///
/// Keys are unique; inserting a mention twice keeps the last type.
pub type EntityMap = BTreeMap<String, EntityType>;

// ============================================================================
// Tagger
// ============================================================================

/// A NER tagger which extracts named entities from an input text.
///
/// Implementations are shared read-only across concurrent requests and must
/// not mutate shared state from `get_entities`.
pub trait Tagger: Send + Sync {
    /// Get a mapping from entities mentioned in the text to their entity type
    fn get_entities(&self, text: &str) -> Result<EntityMap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_wire_names() {
        let names: Vec<&str> = EntityType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["PERSON", "GPE", "LOCATION", "ORG"]);
        assert_eq!(EntityType::Gpe.to_string(), "GPE");
    }

    #[test]
    fn test_entity_type_serde() {
        let json = serde_json::to_string(&EntityType::Location).unwrap();
        assert_eq!(json, "\"LOCATION\"");

        let parsed: EntityType = serde_json::from_str("\"ORG\"").unwrap();
        assert_eq!(parsed, EntityType::Org);

        assert!(serde_json::from_str::<EntityType>("\"DATE\"").is_err());
        assert!(serde_json::from_str::<EntityType>("\"person\"").is_err());
    }

    #[test]
    fn test_entity_map_last_insert_wins() {
        let mut map = EntityMap::new();
        map.insert("Paris".to_string(), EntityType::Person);
        map.insert("Paris".to_string(), EntityType::Gpe);

        assert_eq!(map.len(), 1);
        assert_eq!(map["Paris"], EntityType::Gpe);
    }
}
