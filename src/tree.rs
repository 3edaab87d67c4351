// Parse tree handle
//
// Exclusively-owned wrapper around a tree-sitter tree. The underlying tree
// is released when the handle drops, on every exit path. Parse failures are
// fatal for the current input and reported as `ParseError`; retrying is the
// caller's concern.

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::registry::LanguageSupport;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
    #[error("failed to load {language} grammar")]
    Grammar {
        language: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },
    #[error("parser produced no tree for {language} input")]
    Unparseable { language: &'static str },
}

/// An owned parse tree plus root access. Node navigation is tree-sitter's
/// own `Node` API (kind, byte range, points, children, parent).
pub struct ParseTree {
    tree: tree_sitter::Tree,
}

impl ParseTree {
    /// Parse `source` with the language's grammar. One handle per
    /// flattening invocation; nothing here is shared or reused.
    pub fn parse(support: &LanguageSupport, source: &str) -> Result<ParseTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&(support.grammar)())
            .map_err(|source_err| ParseError::Grammar {
                language: support.name,
                source: source_err,
            })?;
        let tree = parser
            .parse(source, None)
            .ok_or(ParseError::Unparseable {
                language: support.name,
            })?;
        Ok(ParseTree { tree })
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}
