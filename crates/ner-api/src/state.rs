//! Application state management
//!
//! Author: hephaex@gmail.com

use ner_core::config::AppConfig;
use ner_core::Tagger;
use ner_tagger::{LoadedTagger, TaggerSource};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Tagger selected at startup; never replaced while serving
    pub tagger: Arc<dyn Tagger>,
    /// Where the active tagger came from
    pub tagger_source: TaggerSource,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state from the startup tagger
    pub fn new(config: AppConfig, loaded: LoadedTagger) -> Self {
        Self {
            config,
            tagger: loaded.tagger,
            tagger_source: loaded.source,
            start_time: Instant::now(),
        }
    }

    /// Create state around an arbitrary tagger
    pub fn with_tagger(config: AppConfig, tagger: Arc<dyn Tagger>, source: TaggerSource) -> Self {
        Self::new(config, LoadedTagger { tagger, source })
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether the placeholder tagger is serving requests
    pub fn is_degraded(&self) -> bool {
        self.tagger_source.is_placeholder()
    }
}
