//! hdrgen Parser
//!
//! Signature extraction from C and C++ sources.
//!
//! ## Modules
//!
//! - `lexer` - Tokenizer for declaration text
//! - `matcher` - Recursive-descent matcher for declaration heads
//! - `comments` - Comment stripping
//! - `block` - Extractor for `extern "C"` blocks in C++ sources
//! - `heuristic` - Line-based extractor for plain C sources
//! - `params` - Parameter fragment helpers

pub mod block;
pub mod comments;
pub mod heuristic;
pub mod lexer;
pub mod matcher;
pub mod params;

use hdrgen_core::{Error, Extraction, ExtractConfig, Result, SourceDocument, SourceKind};
use std::path::Path;
use tracing::{debug, info, warn};

pub use block::BlockExtractor;
pub use heuristic::HeuristicExtractor;

/// Extractor trait shared by both pipelines
pub trait Extractor {
    /// Extract signatures from source text
    fn extract(&self, source: &str, filename: &str) -> Extraction;

    /// Get extractor name
    fn name(&self) -> &str;
}

/// Get the extractor for a source kind
pub fn extractor_for<'c>(kind: SourceKind, config: &'c ExtractConfig) -> Box<dyn Extractor + 'c> {
    match kind {
        SourceKind::LinkageBlock => Box::new(BlockExtractor::new(config)),
        SourceKind::Heuristic => Box::new(HeuristicExtractor::new(config)),
    }
}

/// Run the extractor matching the document's kind
pub fn extract_document(document: &SourceDocument, config: &ExtractConfig) -> Extraction {
    let extractor = extractor_for(document.kind, config);
    debug!("Extracting {} with {} extractor", document.path, extractor.name());
    extractor.extract(&document.text, &document.path)
}

/// Read a source file and resolve its kind
pub fn load_document(path: &Path, config: &ExtractConfig) -> Result<SourceDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::SourceRead {
        path: path.display().to_string(),
        source,
    })?;
    let kind = SourceKind::for_path(path, &config.block_extensions);
    Ok(SourceDocument::new(path.display().to_string(), text, kind))
}

/// Extract every file in order. Each file is read, extracted and dropped
/// before the next one is opened; the first unreadable file aborts the run.
pub fn collect_signatures<P: AsRef<Path>>(paths: &[P], config: &ExtractConfig) -> Result<Extraction> {
    let mut collected = Extraction::default();

    for path in paths {
        let document = load_document(path.as_ref(), config)?;
        let extraction = extract_document(&document, config);

        info!(
            "{}: {} signatures ({})",
            document.path,
            extraction.signatures.len(),
            document.kind
        );
        for diagnostic in &extraction.diagnostics {
            warn!("{}", diagnostic);
        }

        collected.merge(extraction);
    }

    Ok(collected)
}
