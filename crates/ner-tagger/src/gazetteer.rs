//! Gazetteer tagger
//!
//! Rule-based tagging from a loaded model:
//! - Dictionary: canonical terms and aliases, matched on word boundaries
//! - Patterns: regex rules with per-rule confidence
//!
//! Overlapping matches are resolved left to right, keeping the highest
//! confidence (then longest) candidate at each start position.

use regex::Regex;

use ner_core::{EntityMap, EntityType, Result, Tagger};

use crate::model::{ModelError, TaggerModel};

/// Confidence assigned to canonical dictionary terms
const TERM_CONFIDENCE: f32 = 0.95;

/// Confidence assigned to dictionary aliases
const ALIAS_CONFIDENCE: f32 = 0.9;

/// A compiled matching rule
#[derive(Debug)]
struct Rule {
    regex: Regex,
    entity_type: EntityType,
    confidence: f32,
}

/// A candidate match in the input text
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    entity_type: EntityType,
    confidence: f32,
}

/// Dictionary and pattern tagger compiled from a `TaggerModel`
#[derive(Debug)]
pub struct GazetteerTagger {
    rules: Vec<Rule>,
}

impl GazetteerTagger {
    /// Validate the model and compile its rules
    pub fn from_model(model: &TaggerModel) -> std::result::Result<Self, ModelError> {
        model.validate()?;

        let mut rules = Vec::new();

        for entry in &model.entries {
            rules.push(Rule {
                regex: term_regex(&entry.term, model.case_sensitive)?,
                entity_type: entry.entity_type,
                confidence: TERM_CONFIDENCE,
            });

            for alias in &entry.aliases {
                rules.push(Rule {
                    regex: term_regex(alias, model.case_sensitive)?,
                    entity_type: entry.entity_type,
                    confidence: ALIAS_CONFIDENCE,
                });
            }
        }

        for rule in &model.patterns {
            let regex = Regex::new(&rule.pattern).map_err(|e| ModelError::InvalidPattern {
                pattern: rule.pattern.clone(),
                source: e,
            })?;
            rules.push(Rule {
                regex,
                entity_type: rule.entity_type,
                confidence: rule.confidence,
            });
        }

        Ok(Self { rules })
    }

    /// Number of compiled rules (terms, aliases, and patterns)
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn candidate_spans(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for rule in &self.rules {
            for mat in rule.regex.find_iter(text) {
                if mat.is_empty() {
                    continue;
                }
                spans.push(Span {
                    start: mat.start(),
                    end: mat.end(),
                    entity_type: rule.entity_type,
                    confidence: rule.confidence,
                });
            }
        }

        spans
    }

    /// Remove overlapping spans, keeping highest confidence then longest
    fn resolve_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
        spans.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.confidence.total_cmp(&a.confidence))
                .then((b.end - b.start).cmp(&(a.end - a.start)))
        });

        let mut result = Vec::new();
        let mut covered_until = 0;

        for span in spans {
            // Spans are visited by start, so only the furthest accepted end matters
            if span.start >= covered_until {
                covered_until = span.end;
                result.push(span);
            }
        }

        result
    }
}

impl Tagger for GazetteerTagger {
    fn get_entities(&self, text: &str) -> Result<EntityMap> {
        let spans = Self::resolve_overlaps(self.candidate_spans(text));

        let mut entities = EntityMap::new();
        for span in spans {
            entities.insert(text[span.start..span.end].to_string(), span.entity_type);
        }

        Ok(entities)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build a literal matcher for a dictionary term.
///
/// Word boundaries are only required on edges that are word characters, so
/// terms such as "U.S." still match.
fn term_regex(term: &str, case_sensitive: bool) -> std::result::Result<Regex, ModelError> {
    let term = term.trim();
    let mut pattern = String::new();

    if !case_sensitive {
        pattern.push_str("(?i)");
    }
    if term.starts_with(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if term.ends_with(is_word_char) {
        pattern.push_str(r"\b");
    }

    Regex::new(&pattern).map_err(|e| ModelError::InvalidPattern {
        pattern: term.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bikini_bottom_model() -> TaggerModel {
        TaggerModel::new()
            .with_entry("Patrick Star", EntityType::Person, &["Patrick"])
            .with_entry("SpongeBob SquarePants", EntityType::Person, &["SpongeBob"])
            .with_entry("Bikini Bottom", EntityType::Location, &[])
            .with_entry("Krusty Krab", EntityType::Org, &[])
            .with_entry("U.S.", EntityType::Gpe, &[])
            .with_pattern(r"\b[A-Z][a-z]+ (?:Inc|Corp|Ltd)\b", EntityType::Org, 0.85)
    }

    fn tagger() -> GazetteerTagger {
        GazetteerTagger::from_model(&bikini_bottom_model()).unwrap()
    }

    #[test]
    fn test_rule_count() {
        // 5 terms + 2 aliases + 1 pattern
        assert_eq!(tagger().rule_count(), 8);
    }

    #[test]
    fn test_dictionary_terms() {
        let entities = tagger()
            .get_entities("SpongeBob works at the Krusty Krab in Bikini Bottom.")
            .unwrap();

        assert_eq!(entities.len(), 3);
        assert_eq!(entities["SpongeBob"], EntityType::Person);
        assert_eq!(entities["Krusty Krab"], EntityType::Org);
        assert_eq!(entities["Bikini Bottom"], EntityType::Location);
    }

    #[test]
    fn test_longest_term_beats_alias() {
        let entities = tagger().get_entities("Patrick Star lives under a rock.").unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities["Patrick Star"], EntityType::Person);
    }

    #[test]
    fn test_word_boundaries() {
        let entities = tagger().get_entities("Patricks and Bikini Bottomless").unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_non_word_edges() {
        let entities = tagger().get_entities("Flights to the U.S. resume.").unwrap();
        assert_eq!(entities["U.S."], EntityType::Gpe);
    }

    #[test]
    fn test_case_insensitive_keeps_input_casing() {
        let entities = tagger().get_entities("welcome to BIKINI BOTTOM").unwrap();
        assert_eq!(entities["BIKINI BOTTOM"], EntityType::Location);
    }

    #[test]
    fn test_case_sensitive_model() {
        let mut model = bikini_bottom_model();
        model.case_sensitive = true;
        let tagger = GazetteerTagger::from_model(&model).unwrap();

        assert!(tagger.get_entities("welcome to bikini bottom").unwrap().is_empty());
        assert_eq!(tagger.get_entities("welcome to Bikini Bottom").unwrap().len(), 1);
    }

    #[test]
    fn test_patterns() {
        let entities = tagger().get_entities("Plankton founded Chum Corp last year.").unwrap();
        assert_eq!(entities["Chum Corp"], EntityType::Org);
    }

    #[test]
    fn test_repeated_mentions_collapse() {
        let entities = tagger()
            .get_entities("Patrick met Patrick, and patrick left.")
            .unwrap();

        assert_eq!(entities.len(), 2);
        assert!(entities.contains_key("Patrick"));
        assert!(entities.contains_key("patrick"));
    }

    #[test]
    fn test_higher_confidence_wins_at_same_start() {
        let model = TaggerModel::new()
            .with_entry("Georgia", EntityType::Gpe, &[])
            .with_pattern(r"\bGeorgia\b", EntityType::Person, 0.99);
        let tagger = GazetteerTagger::from_model(&model).unwrap();

        let entities = tagger.get_entities("Georgia is a state. Georgia said hi.").unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities["Georgia"], EntityType::Person);
    }

    #[test]
    fn test_unicode_text() {
        let model = TaggerModel::new().with_entry("Zürich", EntityType::Gpe, &[]);
        let tagger = GazetteerTagger::from_model(&model).unwrap();

        let entities = tagger.get_entities("Grüße aus ZÜRICH!").unwrap();
        assert_eq!(entities["ZÜRICH"], EntityType::Gpe);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let model = TaggerModel::new().with_pattern(r"(unclosed", EntityType::Org, 0.5);
        let err = GazetteerTagger::from_model(&model).unwrap_err();
        assert!(matches!(err, ModelError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_text() {
        assert!(tagger().get_entities("").unwrap().is_empty());
    }
}
