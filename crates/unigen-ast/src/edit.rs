//! Structural edits on a [`SourceTree`]
//!
//! Each edit resolves its target node first, copies the byte range out, and
//! only then splices. A failed lookup never modifies the tree.

use crate::error::AstError;
use crate::member::ClassMember;
use crate::tree::{ImportSelector, SourceTree};
use std::ops::Range;

impl SourceTree {
    /// Replace the source literal of one top-level import
    ///
    /// The original quote character is kept.
    ///
    /// # Errors
    /// `AstError::ImportNotFound` if no import matches the selector.
    pub fn replace_import_source(
        &mut self,
        selector: &ImportSelector,
        new_source: &str,
    ) -> Result<(), AstError> {
        let info = self
            .find_import(selector)
            .ok_or_else(|| AstError::ImportNotFound(selector.to_string()))?;

        let (range, quote) = {
            let node = self
                .import_nodes()
                .into_iter()
                .nth(info.index)
                .and_then(|import| import.child_by_field_name("source"))
                .ok_or_else(|| AstError::ImportNotFound(selector.to_string()))?;
            let quote = self.text(node).chars().next().unwrap_or('\'');
            (node.byte_range(), quote)
        };

        self.splice(range, &quote_literal(new_source, quote))
    }

    /// Rename a top-level declaration (class, variable or function)
    ///
    /// # Errors
    /// `AstError::DeclarationNotFound` if nothing is declared as `current`.
    pub fn rename_declaration(&mut self, current: &str, new_name: &str) -> Result<(), AstError> {
        let range = self
            .declarations()
            .into_iter()
            .find(|d| d.name == current)
            .map(|d| d.name_range)
            .ok_or_else(|| AstError::DeclarationNotFound(current.to_string()))?;

        self.splice(range, new_name)
    }

    /// Rename the only top-level declaration
    ///
    /// # Errors
    /// - `AstError::DeclarationNotFound` if the file declares nothing
    /// - `AstError::AmbiguousDeclaration` if it declares more than one name
    pub fn rename_sole_declaration(&mut self, new_name: &str) -> Result<(), AstError> {
        let declarations = self.declarations();
        match declarations.as_slice() {
            [only] => {
                let range = only.name_range.clone();
                self.splice(range, new_name)
            }
            [] => Err(AstError::DeclarationNotFound(new_name.to_string())),
            others => Err(AstError::AmbiguousDeclaration(others.len())),
        }
    }

    /// Replace the `extends` expression of an exported class
    ///
    /// # Errors
    /// - `AstError::DeclarationNotFound` if the class is absent
    /// - `AstError::StructuralMismatch` if it extends nothing
    pub fn replace_superclass(&mut self, class: &str, expression: &str) -> Result<(), AstError> {
        let range = {
            let node = self
                .exported_class_node(class)
                .ok_or_else(|| AstError::DeclarationNotFound(class.to_string()))?;
            self.superclass_node(node)
                .ok_or_else(|| AstError::mismatch(format!("class {class} has no extends clause")))?
                .byte_range()
        };

        self.splice(range, expression)
    }

    /// Append a member to the end of an exported class body
    ///
    /// Indentation follows the first existing member. Returns `false` (tree
    /// unchanged) when the class already declares a member with that name.
    ///
    /// # Errors
    /// `AstError::DeclarationNotFound` if the class is absent.
    pub fn append_class_member(
        &mut self,
        class: &str,
        member: &ClassMember,
    ) -> Result<bool, AstError> {
        let Some((range, text)) = self.member_insertion(class, member)? else {
            return Ok(false);
        };

        self.splice(range, &text)?;
        Ok(true)
    }

    fn member_insertion(
        &self,
        class: &str,
        member: &ClassMember,
    ) -> Result<Option<(Range<usize>, String)>, AstError> {
        let node = self
            .exported_class_node(class)
            .ok_or_else(|| AstError::DeclarationNotFound(class.to_string()))?;
        let body = node
            .child_by_field_name("body")
            .ok_or_else(|| AstError::mismatch(format!("class {class} has no body")))?;

        if self.member_names(body).iter().any(|n| n == member.name()) {
            return Ok(None);
        }

        let mut cursor = body.walk();
        let children: Vec<_> = body.children(&mut cursor).collect();
        let (open, close) = match (children.first(), children.last()) {
            (Some(open), Some(close)) if open.kind() == "{" && close.kind() == "}" => {
                (*open, *close)
            }
            _ => return Err(AstError::mismatch(format!("class {class} body is not braced"))),
        };

        let inner = &children[1..children.len() - 1];
        let anchor = inner.last().map_or(open.end_byte(), |n| n.end_byte());
        let class_indent = line_indent(self.print(), node.start_byte());

        let indent = match inner.iter().find(|n| n.kind() != "comment") {
            Some(first) if !same_line(self.print(), open.start_byte(), first.start_byte()) => {
                line_indent(self.print(), first.start_byte())
            }
            _ => format!("{class_indent}    "),
        };

        let mut text = String::new();
        text.push_str(if inner.is_empty() { "\n" } else { member.separator() });
        text.push_str(&member.render(&indent));
        // a single-line body gets its closing brace moved onto its own line
        let mut end = anchor;
        if !self.print()[anchor..close.start_byte()].contains('\n') {
            text.push('\n');
            text.push_str(&class_indent);
            end = close.start_byte();
        }

        Ok(Some((anchor..end, text)))
    }
}

/// Quote a module path for a string literal
pub(crate) fn quote_literal(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        if c == quote || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Leading whitespace of the line containing `byte`
fn line_indent(source: &str, byte: usize) -> String {
    let line_start = source[..byte].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

fn same_line(source: &str, a: usize, b: usize) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    !source[lo..hi].contains('\n')
}
