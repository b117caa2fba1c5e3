//! tree-sitter front end
//!
//! Parsing is lossless: the tree keeps byte ranges into the original text,
//! so printing is just returning the text.

use crate::error::AstError;
use crate::tree::SourceTree;
use tree_sitter::{Node, Parser, Point, Tree};

/// Parse TypeScript source into a [`SourceTree`]
///
/// # Errors
/// - `AstError::ParserInit` if the grammar cannot be loaded
/// - `AstError::Syntax` if the source contains a syntax error
pub fn parse(source: &str) -> Result<SourceTree, AstError> {
    let tree = parse_tree(source, None)?;
    Ok(SourceTree::from_parts(source.to_string(), tree))
}

/// Parse (or incrementally reparse) and reject trees with errors
pub(crate) fn parse_tree(source: &str, old: Option<&Tree>) -> Result<Tree, AstError> {
    let language: tree_sitter::Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| AstError::ParserInit(e.to_string()))?;

    let tree = parser.parse(source, old).ok_or(AstError::ParseFailed)?;

    if let Some(node) = first_error(tree.root_node()) {
        let position = node.start_position();
        return Err(AstError::Syntax {
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    Ok(tree)
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    Some(found.unwrap_or(node))
}

/// Row/column of a byte offset (column counted in bytes, as tree-sitter does)
pub(crate) fn point_at(source: &str, byte: usize) -> Point {
    let before = &source.as_bytes()[..byte];
    let row = before.iter().filter(|&&b| b == b'\n').count();
    let column = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(byte, |newline| byte - newline - 1);
    Point::new(row, column)
}
