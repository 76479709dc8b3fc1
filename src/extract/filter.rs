use crate::types::Block;

/// Turns one code block into the text that goes into the module source.
/// Returning `None` drops the block entirely.
pub trait BlockFilter: Send + Sync {
    fn filter(&self, block: &Block) -> Option<String>;
}

/// Rewrites a cell's directives into executable code. Supplied by an
/// interactive shell when directives should be kept rather than stripped.
pub trait CellTransformer: Send + Sync {
    fn transform_cell(&self, text: &str) -> String;
}

impl<F> CellTransformer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform_cell(&self, text: &str) -> String {
        self(text)
    }
}

/// Drops directive lines, and whole blocks that open with a cell directive.
#[derive(Debug, Clone)]
pub struct DirectiveStripper {
    sigil: char,
    cell_prefix: String,
}

impl DirectiveStripper {
    pub fn new(sigil: char) -> Self {
        Self {
            sigil,
            cell_prefix: [sigil, sigil].iter().collect(),
        }
    }

    pub fn strip(&self, text: &str) -> Option<String> {
        // cell directives address the whole block
        if text.starts_with(&self.cell_prefix) {
            return None;
        }

        let kept: Vec<&str> = text
            .split('\n')
            .filter(|line| !line.trim_start().starts_with(self.sigil))
            .collect();
        Some(kept.join("\n"))
    }
}

impl Default for DirectiveStripper {
    fn default() -> Self {
        Self::new('%')
    }
}

impl BlockFilter for DirectiveStripper {
    fn filter(&self, block: &Block) -> Option<String> {
        self.strip(&block.text)
    }
}

/// Passes every block through a shell transformer.
pub struct ShellTransform {
    transformer: Box<dyn CellTransformer>,
}

impl ShellTransform {
    pub fn new(transformer: Box<dyn CellTransformer>) -> Self {
        Self { transformer }
    }
}

impl BlockFilter for ShellTransform {
    fn filter(&self, block: &Block) -> Option<String> {
        Some(self.transformer.transform_cell(&block.text))
    }
}
