use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::catalog::Catalog;
use crate::config::ContentConfig;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug regex is invalid"));

/// Quiz documents and the catalog, read from the static content directory.
#[derive(Debug, Clone)]
pub struct QuizLibrary {
    quizzes_dir: PathBuf,
    catalog_path: PathBuf,
}

impl QuizLibrary {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            quizzes_dir: config.quizzes_dir(),
            catalog_path: config.catalog_path(),
        }
    }

    pub fn quizzes_dir(&self) -> &Path {
        &self.quizzes_dir
    }

    /// Candidate file stems for `slug`: as given, `-` to `_`, then `_` to `-`.
    pub fn slug_candidates(slug: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::with_capacity(3);
        for candidate in [slug.to_string(), slug.replace('-', "_"), slug.replace('_', "-")] {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }

    /// Raw quiz document for `slug`, trying each spelling in turn.
    pub fn load(&self, slug: &str) -> Result<Value, LibraryError> {
        if !SLUG.is_match(slug) {
            return Err(LibraryError::InvalidSlug(slug.to_string()));
        }

        let candidates = Self::slug_candidates(slug);
        for candidate in &candidates {
            let path = self.quizzes_dir.join(format!("{candidate}.json"));
            match std::fs::read(&path) {
                Ok(bytes) => {
                    if candidate != slug {
                        debug!(slug, resolved = %candidate, "quiz found under alternate slug");
                    }
                    return serde_json::from_slice(&bytes)
                        .map_err(|source| LibraryError::Json { path, source });
                }
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => return Err(LibraryError::Io { path, source }),
            }
        }

        Err(LibraryError::NotFound {
            slug: slug.to_string(),
            tried: candidates,
        })
    }

    /// The catalog, or an empty one when the file does not exist.
    pub fn catalog(&self) -> Result<Catalog, LibraryError> {
        let bytes = match std::fs::read(&self.catalog_path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.catalog_path.display(), "catalog file missing");
                return Ok(Catalog::default());
            }
            Err(source) => {
                return Err(LibraryError::Io {
                    path: self.catalog_path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| LibraryError::Json {
            path: self.catalog_path.clone(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("invalid quiz slug `{0}`")]
    InvalidSlug(String),
    #[error("quiz `{slug}` not found (tried {})", tried.join(", "))]
    NotFound { slug: String, tried: Vec<String> },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
