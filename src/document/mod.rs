//! Notebook container parsing.
//!
//! Supports nbformat 4 (`cells`) and nbformat 3 (`worksheets[*].cells`,
//! code text under `input`). Cell text may be a string or a list of
//! fragments, which are joined verbatim.

use serde::Deserialize;

use crate::error::DocumentError;
use crate::types::{Block, BlockKind};

#[derive(Debug, Deserialize)]
struct RawNotebook {
    nbformat: Option<u64>,
    cells: Option<Vec<RawCell>>,
    worksheets: Option<Vec<RawWorksheet>>,
}

#[derive(Debug, Deserialize)]
struct RawWorksheet {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: BlockKind,
    source: Option<CellText>,
    input: Option<CellText>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellText {
    Whole(String),
    Lines(Vec<String>),
}

impl CellText {
    fn into_string(self) -> String {
        match self {
            CellText::Whole(s) => s,
            CellText::Lines(lines) => lines.concat(),
        }
    }
}

impl RawCell {
    fn into_block(self) -> Block {
        // v3 code cells keep their text under `input`
        let text = match self.source.or(self.input) {
            Some(text) => text.into_string(),
            None => String::new(),
        };
        Block::new(self.cell_type, text)
    }
}

/// Parse notebook JSON into its ordered blocks.
pub fn parse_document(content: &str) -> Result<Vec<Block>, DocumentError> {
    let raw: RawNotebook = serde_json::from_str(content)?;

    let cells = match raw.nbformat {
        Some(4) | None if raw.cells.is_some() => raw.cells.unwrap_or_default(),
        Some(3) => raw
            .worksheets
            .ok_or(DocumentError::MissingCells)?
            .into_iter()
            .flat_map(|w| w.cells)
            .collect(),
        Some(4) | None => return Err(DocumentError::MissingCells),
        Some(version) => return Err(DocumentError::UnsupportedVersion(version)),
    };

    Ok(cells.into_iter().map(RawCell::into_block).collect())
}
