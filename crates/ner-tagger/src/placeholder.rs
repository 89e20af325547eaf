//! Placeholder tagger used when no model file is available

use ner_core::{EntityMap, EntityType, Result, Tagger};

/// A placeholder NER tagger that does no real tagging.
///
/// Returns the same two entities for every input, including entities that do
/// not occur in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTagger;

impl PlaceholderTagger {
    pub fn new() -> Self {
        Self
    }
}

impl Tagger for PlaceholderTagger {
    fn get_entities(&self, _text: &str) -> Result<EntityMap> {
        Ok(EntityMap::from([
            ("Patrick".to_string(), EntityType::Person),
            ("Bikini Bottom".to_string(), EntityType::Location),
        ]))
    }
}
