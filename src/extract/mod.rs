mod filter;

pub use filter::{BlockFilter, CellTransformer, DirectiveStripper, ShellTransform};

use std::fs;
use std::path::Path;

use crate::config::Conventions;
use crate::document::parse_document;
use crate::error::{ImportError, Result};
use crate::types::Block;

/// Produces module source text from notebooks and plain source files.
pub struct SourceExtractor {
    filter: Box<dyn BlockFilter>,
    conventions: Conventions,
}

impl SourceExtractor {
    /// Build an extractor in strip mode, or in transform mode when `strip` is false.
    ///
    /// Transform mode needs a shell transformer; without one this fails with
    /// [`ImportError::TransformerUnavailable`] here rather than at load time.
    pub fn new(
        strip: bool,
        transformer: Option<Box<dyn CellTransformer>>,
        conventions: Conventions,
    ) -> Result<Self> {
        let filter: Box<dyn BlockFilter> = if strip {
            Box::new(DirectiveStripper::new(conventions.directive_sigil))
        } else {
            let transformer = transformer.ok_or(ImportError::TransformerUnavailable)?;
            Box::new(ShellTransform::new(transformer))
        };

        Ok(Self::with_filter(filter, conventions))
    }

    /// Build an extractor around any block filter.
    pub fn with_filter(filter: Box<dyn BlockFilter>, conventions: Conventions) -> Self {
        Self {
            filter,
            conventions,
        }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Concatenate the filtered code blocks, each followed by a newline.
    pub fn extract(&self, blocks: &[Block]) -> String {
        let mut source = String::new();

        for block in blocks.iter().filter(|b| b.kind.is_code()) {
            if let Some(text) = self.filter.filter(block) {
                source.push_str(&text);
                source.push('\n');
            }
        }

        source
    }

    /// Notebooks are parsed and extracted; any other file is returned verbatim.
    pub fn extract_from_file(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).map_err(|source| ImportError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;

        if !self.conventions.is_document(path) {
            return Ok(content);
        }

        let blocks = parse_document(&content).map_err(|source| ImportError::CorruptDocument {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), blocks = blocks.len(), "extracting notebook");

        Ok(self.extract(&blocks))
    }
}

impl Default for SourceExtractor {
    fn default() -> Self {
        let conventions = Conventions::default();
        Self::with_filter(
            Box::new(DirectiveStripper::new(conventions.directive_sigil)),
            conventions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_drops_non_code_and_directives() {
        let blocks = vec![
            Block::code("%magic\nx=1"),
            Block::markdown("text"),
            Block::code("y=2"),
        ];
        assert_eq!(SourceExtractor::default().extract(&blocks), "x=1\ny=2\n");
    }

    #[test]
    fn test_cell_directive_drops_whole_block() {
        let blocks = vec![Block::code("%%omit\nsecret = 1"), Block::code("x = 2")];
        assert_eq!(SourceExtractor::default().extract(&blocks), "x = 2\n");
    }

    #[test]
    fn test_no_code_blocks_is_empty() {
        let blocks = vec![Block::markdown("# Only prose")];
        assert_eq!(SourceExtractor::default().extract(&blocks), "");
        assert_eq!(SourceExtractor::default().extract(&[]), "");
    }

    #[test]
    fn test_transform_mode_needs_transformer() {
        let result = SourceExtractor::new(false, None, Conventions::default());
        assert!(matches!(result, Err(ImportError::TransformerUnavailable)));
    }

    #[test]
    fn test_transform_mode_keeps_directives() {
        let transformer: Box<dyn CellTransformer> =
            Box::new(|text: &str| text.replace("%time ", "get_ipython().run_line_magic('time', '") + "')");
        let extractor = SourceExtractor::new(false, Some(transformer), Conventions::default()).unwrap();

        let blocks = vec![Block::code("%time f()"), Block::markdown("skip")];
        assert_eq!(
            extractor.extract(&blocks),
            "get_ipython().run_line_magic('time', 'f()')\n"
        );
    }

    #[test]
    fn test_extract_from_plain_file_is_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("__init__.py");
        std::fs::write(&path, "%not_a_directive_here\n").unwrap();

        let source = SourceExtractor::default().extract_from_file(&path).unwrap();
        assert_eq!(source, "%not_a_directive_here\n");
    }

    #[test]
    fn test_extract_from_notebook() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("module.ipynb");
        std::fs::write(
            &path,
            r#"{"nbformat": 4, "cells": [
                {"cell_type": "code", "source": ["%load_ext autoreload\n", "def f():\n", "    return 1"]},
                {"cell_type": "markdown", "source": "notes"}
            ]}"#,
        )
        .unwrap();

        let source = SourceExtractor::default().extract_from_file(&path).unwrap();
        assert_eq!(source, "def f():\n    return 1\n");
    }

    #[test]
    fn test_extract_from_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = SourceExtractor::default().extract_from_file(&temp.path().join("gone.ipynb"));
        assert!(matches!(result, Err(ImportError::UnreadableSource { .. })));
    }

    #[test]
    fn test_extract_from_corrupt_notebook() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ipynb");
        std::fs::write(&path, "not json").unwrap();

        let result = SourceExtractor::default().extract_from_file(&path);
        assert!(matches!(result, Err(ImportError::CorruptDocument { .. })));
    }

    #[test]
    fn test_round_trip_without_directives() {
        let temp = TempDir::new().unwrap();
        let blocks = vec![Block::code("a = 1"), Block::code("def b():\n    return a")];
        let out = temp.path().join("out.py");

        std::fs::write(&out, SourceExtractor::default().extract(&blocks)).unwrap();
        let read_back = std::fs::read_to_string(&out).unwrap();

        assert_eq!(read_back, "a = 1\ndef b():\n    return a\n");
    }
}
