//! Font cache for fetching each typeface once
//!
//! Resolved fonts are kept for the life of the cache; there is no eviction,
//! which is fine for the small fixed set of supported ids. A failed fetch is
//! not remembered, so the next resolve retries it.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use super::font::FontResource;
use crate::config::FontConfig;

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The id is not in the registry
    #[error("Unknown font id: {0}")]
    UnknownFont(String),

    /// The font source could not be read
    #[error("Failed to read font {font} from {}: {source}", .path.display())]
    Io {
        /// Font id
        font: String,
        /// Source location
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The font source was read but is not a valid typeface
    #[error("Failed to parse font {font}: {message}")]
    Parse {
        /// Font id
        font: String,
        /// Parser message
        message: String,
    },
}

/// Fetches a font resource from its source location
pub trait FontFetcher {
    /// Fetch font `id` stored under `source`
    fn fetch(&self, id: &str, source: &str) -> Result<FontResource, FontLoadError>;
}

/// Reads typeface JSON files from a directory
#[derive(Debug, Clone)]
pub struct TypefaceFileFetcher {
    directory: PathBuf,
}

impl TypefaceFileFetcher {
    /// Create a fetcher rooted at `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl FontFetcher for TypefaceFileFetcher {
    fn fetch(&self, id: &str, source: &str) -> Result<FontResource, FontLoadError> {
        let path = self.directory.join(source);
        let json = std::fs::read_to_string(&path).map_err(|source| FontLoadError::Io {
            font: id.to_string(),
            path: path.clone(),
            source,
        })?;
        FontResource::from_typeface_json(id, &json)
    }
}

/// Supported font ids and where each one is stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRegistry {
    sources: BTreeMap<String, String>,
}

impl FontRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-point) a font id
    pub fn register(&mut self, id: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(id.into(), source.into());
    }

    /// Builder pattern: register a font id
    pub fn with_font(mut self, id: impl Into<String>, source: impl Into<String>) -> Self {
        self.register(id, source);
        self
    }

    /// Source location for `id`
    pub fn source(&self, id: &str) -> Option<&str> {
        self.sources.get(id).map(String::as_str)
    }

    /// Whether `id` is supported
    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Supported ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

impl From<&FontConfig> for FontRegistry {
    fn from(config: &FontConfig) -> Self {
        Self {
            sources: config.files.clone(),
        }
    }
}

/// Font id → loaded resource, fetched on first use
pub struct FontCache {
    fetcher: Box<dyn FontFetcher>,
    registry: FontRegistry,
    cache: HashMap<String, Arc<FontResource>>,
}

impl FontCache {
    /// Create an empty cache over `fetcher`
    pub fn new(fetcher: impl FontFetcher + 'static, registry: FontRegistry) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            registry,
            cache: HashMap::new(),
        }
    }

    /// Create a cache reading typeface files as configured
    pub fn from_config(config: &FontConfig) -> Self {
        Self::new(
            TypefaceFileFetcher::new(config.directory.clone()),
            FontRegistry::from(config),
        )
    }

    /// Return the font for `id`, fetching it on first request
    pub fn resolve(&mut self, id: &str) -> Result<Arc<FontResource>, FontLoadError> {
        if let Some(font) = self.cache.get(id) {
            return Ok(Arc::clone(font));
        }

        let Some(source) = self.registry.source(id) else {
            log::warn!(
                "Unknown font '{}' (known: {})",
                id,
                self.registry.ids().collect::<Vec<_>>().join(", ")
            );
            return Err(FontLoadError::UnknownFont(id.to_string()));
        };

        log::info!("Loading font '{}' from {}", id, source);
        let font = Arc::new(self.fetcher.fetch(id, source)?);
        log::debug!(
            "Font '{}' loaded: {} ({} glyphs)",
            id,
            font.family_name(),
            font.glyph_count()
        );

        self.cache.insert(id.to_string(), Arc::clone(&font));
        Ok(font)
    }

    /// Check if a font is cached
    pub fn is_cached(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    /// Get the number of cached fonts
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached font
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Supported font ids
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }
}
