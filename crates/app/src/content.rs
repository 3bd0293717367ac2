use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use drill_core::model::{Catalog, CatalogDraft, CatalogError};

/// Corpus compiled into the binary.
const EMBEDDED: &str = include_str!("../content/deutsch_b2.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("content rejected: {0}")]
    Invalid(#[from] CatalogError),
}

/// Parse and validate a catalog from JSON text.
///
/// # Errors
///
/// Returns `ContentError::Parse` for malformed JSON and
/// `ContentError::Invalid` for content that fails validation.
pub fn parse_catalog(raw: &str) -> Result<Catalog, ContentError> {
    let draft: CatalogDraft = serde_json::from_str(raw)?;
    Ok(draft.validate()?)
}

/// The embedded corpus, or the file at `path` when given.
///
/// # Errors
///
/// Returns `ContentError` if the file cannot be read or the content is
/// malformed.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, ContentError> {
    let catalog = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_catalog(&raw)?
        }
        None => parse_catalog(EMBEDDED)?,
    };

    debug!(
        source = %path.map_or_else(|| "embedded".to_owned(), |p| p.display().to_string()),
        vocabulary = catalog.vocabulary_levels().len(),
        grammar = catalog.grammar_levels().len(),
        comprehension = catalog.comprehension_levels().len(),
        "content loaded"
    );
    Ok(catalog)
}
