//! Startup tagger loading
//!
//! Loads the model file once before the server starts. A missing file is the
//! only recovered failure: it degrades to the placeholder tagger. Every other
//! failure is returned so startup aborts.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ner_core::Tagger;
use tracing::{info, warn};

use crate::gazetteer::GazetteerTagger;
use crate::model::{ModelError, TaggerModel};
use crate::placeholder::PlaceholderTagger;

/// Which tagger variant is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggerSource {
    /// Model loaded from the given path
    Model { path: PathBuf },
    /// No model at the given path; serving placeholder output
    Placeholder { missing_path: PathBuf },
}

impl TaggerSource {
    /// Short label for health reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Model { .. } => "model",
            Self::Placeholder { .. } => "placeholder",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// The tagger selected at startup together with its origin
#[derive(Clone)]
pub struct LoadedTagger {
    pub tagger: Arc<dyn Tagger>,
    pub source: TaggerSource,
}

impl LoadedTagger {
    /// Placeholder tagger standing in for a model missing at `path`
    pub fn placeholder(path: impl Into<PathBuf>) -> Self {
        Self {
            tagger: Arc::new(PlaceholderTagger::new()),
            source: TaggerSource::Placeholder {
                missing_path: path.into(),
            },
        }
    }
}

impl fmt::Debug for LoadedTagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedTagger")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Fatal tagger loading errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read tagger model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse tagger model {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid tagger model {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Load the tagger model at `path`, falling back to the placeholder if the
/// file does not exist.
pub fn load_tagger(path: &Path) -> Result<LoadedTagger, LoadError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "Couldn't load NER tagger {}; falling back on placeholder",
                path.display()
            );
            return Ok(LoadedTagger::placeholder(path));
        }
        Err(e) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let model = TaggerModel::from_json(&content).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tagger = GazetteerTagger::from_model(&model).map_err(|e| LoadError::Invalid {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        path = %path.display(),
        entries = model.entries.len(),
        patterns = model.patterns.len(),
        "Loaded NER tagger model"
    );

    Ok(LoadedTagger {
        tagger: Arc::new(tagger),
        source: TaggerSource::Model {
            path: path.to_path_buf(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ner_core::EntityType;
    use std::io::Write;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn write_model(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ner_tagger.json");

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let loaded = tracing::subscriber::with_default(subscriber, || load_tagger(&path)).unwrap();

        assert_eq!(
            loaded.source,
            TaggerSource::Placeholder {
                missing_path: path.clone()
            }
        );
        assert!(loaded.source.is_placeholder());

        let entities = loaded.tagger.get_entities("anything").unwrap();
        assert_eq!(entities["Patrick"], EntityType::Person);
        assert_eq!(entities["Bikini Bottom"], EntityType::Location);

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains(&path.display().to_string()));
        assert!(output.contains("falling back on placeholder"));
    }

    #[test]
    fn test_valid_model_loads() {
        let file = write_model(
            br#"{"format": "ner-tagger", "version": 1,
                 "entries": [{"term": "Sandy Cheeks", "type": "PERSON"}]}"#,
        );

        let loaded = load_tagger(file.path()).unwrap();
        assert_eq!(loaded.source.kind(), "model");

        let entities = loaded.tagger.get_entities("Sandy Cheeks is from Texas").unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities["Sandy Cheeks"], EntityType::Person);
    }

    #[test]
    fn test_corrupt_json_is_fatal() {
        let file = write_model(b"{\"format\": \"ner-tagger\", \"version\": ");
        let err = load_tagger(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_binary_blob_is_fatal() {
        // Native object dumps are not readable as a model
        let file = write_model(&[0x80, 0x04, 0x95, 0xff, 0xfe, 0x00]);
        let err = load_tagger(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_unsupported_version_is_fatal() {
        let file = write_model(br#"{"format": "ner-tagger", "version": 7}"#);
        let err = load_tagger(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: ModelError::UnsupportedVersion { found: 7, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_directory_path_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tagger(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_sample_model_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/sample_tagger.json");
        let loaded = load_tagger(&path).unwrap();

        assert!(!loaded.source.is_placeholder());
        let entities = loaded
            .tagger
            .get_entities("Patrick Star and SpongeBob live in Bikini Bottom.")
            .unwrap();
        assert_eq!(entities["Patrick Star"], EntityType::Person);
        assert_eq!(entities["SpongeBob"], EntityType::Person);
        assert_eq!(entities["Bikini Bottom"], EntityType::Location);
    }
}
