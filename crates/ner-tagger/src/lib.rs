//! NER Tagger - Tagger implementations and model loading
//!
//! Provides the two `Tagger` variants served by the API:
//! - Gazetteer: dictionary + regex tagger built from a versioned JSON model
//! - Placeholder: fixed output, used when no model file is available

pub mod gazetteer;
pub mod loader;
pub mod model;
pub mod placeholder;

pub use gazetteer::GazetteerTagger;
pub use loader::{load_tagger, LoadError, LoadedTagger, TaggerSource};
pub use model::{GazetteerEntry, PatternRule, TaggerModel, MODEL_FORMAT, MODEL_FORMAT_VERSION};
pub use placeholder::PlaceholderTagger;
