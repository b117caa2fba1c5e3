//! Source tree and structural queries
//!
//! A [`SourceTree`] is the text of one file plus its concrete syntax tree.
//! Queries address nodes by meaning (which import, which class) rather than
//! by statement position, so template edits cannot silently shift offsets.

use crate::error::AstError;
use crate::parser::{parse_tree, point_at};
use std::fmt;
use std::ops::Range;
use tree_sitter::{InputEdit, Node, Tree};

/// Parsed representation of one TypeScript file
///
/// Owned by a single generator invocation. Cloning is cheap enough for
/// speculative edits but trees are never shared across invocations.
#[derive(Clone)]
pub struct SourceTree {
    source: String,
    tree: Tree,
}

/// How to pick a top-level import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSelector {
    /// Nth import statement (0-based, counting imports only)
    Nth(usize),
    /// Import whose source literal equals this value
    Source(String),
    /// Import that binds this name
    Binding(String),
}

impl fmt::Display for ImportSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nth(index) => write!(f, "import #{index}"),
            Self::Source(source) => write!(f, "import from '{source}'"),
            Self::Binding(name) => write!(f, "import of {name}"),
        }
    }
}

/// Snapshot of one top-level import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Position among import statements
    pub index: usize,
    /// Module source literal, without quotes
    pub source: String,
    /// Local bindings: named specifiers (alias when renamed), namespace and default
    pub names: Vec<String>,
    /// Byte range of the whole statement
    pub range: Range<usize>,
}

/// Kind of a top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `class` or `abstract class`
    Class,
    /// `const` / `let` / `var` binding
    Variable,
    /// `function`
    Function,
}

/// Snapshot of one top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationInfo {
    /// Declared identifier
    pub name: String,
    /// Declaration kind
    pub kind: DeclarationKind,
    /// Whether the declaration sits inside an `export` statement
    pub exported: bool,
    /// Byte range of the identifier
    pub name_range: Range<usize>,
}

/// Snapshot of a class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Class name
    pub name: String,
    /// Text of the `extends` expression, if any
    pub superclass: Option<String>,
    /// Names of methods and fields in declaration order
    pub members: Vec<String>,
    /// Byte range of the class body, braces included
    pub body_range: Range<usize>,
}

impl SourceTree {
    pub(crate) fn from_parts(source: String, tree: Tree) -> Self {
        Self { source, tree }
    }

    /// Current source text
    ///
    /// For an unmodified tree this is exactly the parsed input.
    #[inline]
    #[must_use]
    pub fn print(&self) -> &str {
        &self.source
    }

    /// Consume the tree, returning its text
    #[inline]
    #[must_use]
    pub fn into_source(self) -> String {
        self.source
    }

    /// Root node of the syntax tree
    #[inline]
    pub(crate) fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by a node
    #[inline]
    pub(crate) fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// Top-level statements, comments skipped
    pub(crate) fn statements(&self) -> Vec<Node<'_>> {
        let root = self.root();
        let mut cursor = root.walk();
        let statements = root
            .named_children(&mut cursor)
            .filter(|node| node.kind() != "comment")
            .collect();
        statements
    }

    /// Top-level import statement nodes in order
    pub(crate) fn import_nodes(&self) -> Vec<Node<'_>> {
        self.statements()
            .into_iter()
            .filter(|node| node.kind() == "import_statement")
            .collect()
    }

    /// All top-level imports
    #[must_use]
    pub fn imports(&self) -> Vec<ImportInfo> {
        self.import_nodes()
            .into_iter()
            .enumerate()
            .map(|(index, node)| ImportInfo {
                index,
                source: node
                    .child_by_field_name("source")
                    .map(|literal| self.string_value(literal).to_string())
                    .unwrap_or_default(),
                names: self.import_names(node),
                range: node.byte_range(),
            })
            .collect()
    }

    /// Find one import by selector
    #[must_use]
    pub fn find_import(&self, selector: &ImportSelector) -> Option<ImportInfo> {
        self.imports().into_iter().find(|import| match selector {
            ImportSelector::Nth(index) => import.index == *index,
            ImportSelector::Source(source) => import.source == *source,
            ImportSelector::Binding(name) => import.names.iter().any(|n| n == name),
        })
    }

    /// Whether any top-level import binds `name`
    #[must_use]
    pub fn imports_name(&self, name: &str) -> bool {
        self.find_import(&ImportSelector::Binding(name.to_string()))
            .is_some()
    }

    /// All top-level declarations in source order
    #[must_use]
    pub fn declarations(&self) -> Vec<DeclarationInfo> {
        let mut out = Vec::new();
        for statement in self.statements() {
            let (declaration, exported) = unwrap_export(statement);
            let Some(declaration) = declaration else {
                continue;
            };

            match declaration.kind() {
                "class_declaration" | "abstract_class_declaration" => {
                    self.push_named(&mut out, declaration, DeclarationKind::Class, exported);
                }
                "function_declaration" => {
                    self.push_named(&mut out, declaration, DeclarationKind::Function, exported);
                }
                "lexical_declaration" | "variable_declaration" => {
                    let mut cursor = declaration.walk();
                    for declarator in declaration
                        .named_children(&mut cursor)
                        .filter(|n| n.kind() == "variable_declarator")
                    {
                        self.push_named(&mut out, declarator, DeclarationKind::Variable, exported);
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Names of all top-level declarations
    #[must_use]
    pub fn declaration_names(&self) -> Vec<String> {
        self.declarations().into_iter().map(|d| d.name).collect()
    }

    /// Locate an exported class by name
    ///
    /// # Errors
    /// `AstError::DeclarationNotFound` if no exported class has this name.
    pub fn find_exported_class(&self, name: &str) -> Result<ClassInfo, AstError> {
        let class = self
            .exported_class_node(name)
            .ok_or_else(|| AstError::DeclarationNotFound(name.to_string()))?;
        let body = class
            .child_by_field_name("body")
            .ok_or_else(|| AstError::mismatch(format!("class {name} has no body")))?;

        Ok(ClassInfo {
            name: name.to_string(),
            superclass: self.superclass_node(class).map(|n| self.text(n).to_string()),
            members: self.member_names(body),
            body_range: body.byte_range(),
        })
    }

    pub(crate) fn exported_class_node(&self, name: &str) -> Option<Node<'_>> {
        self.statements().into_iter().find_map(|statement| {
            let (declaration, exported) = unwrap_export(statement);
            declaration.filter(|d| {
                exported
                    && matches!(d.kind(), "class_declaration" | "abstract_class_declaration")
                    && d.child_by_field_name("name")
                        .is_some_and(|n| self.text(n) == name)
            })
        })
    }

    /// `value` of the class's `extends` clause
    pub(crate) fn superclass_node<'t>(&self, class: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = class.walk();
        let heritage = class
            .named_children(&mut cursor)
            .find(|n| n.kind() == "class_heritage")?;

        let mut cursor = heritage.walk();
        let extends = heritage
            .named_children(&mut cursor)
            .find(|n| n.kind() == "extends_clause")?;
        extends.child_by_field_name("value")
    }

    /// Names of methods and fields declared in a class body
    pub(crate) fn member_names(&self, body: Node<'_>) -> Vec<String> {
        let mut cursor = body.walk();
        let names = body
            .named_children(&mut cursor)
            .filter(|n| {
                matches!(
                    n.kind(),
                    "method_definition"
                        | "public_field_definition"
                        | "method_signature"
                        | "abstract_method_signature"
                )
            })
            .filter_map(|n| n.child_by_field_name("name"))
            .map(|n| self.text(n).to_string())
            .collect();
        names
    }

    /// Contents of a string literal node, quotes stripped
    pub(crate) fn string_value(&self, literal: Node<'_>) -> &str {
        let text = self.text(literal);
        if text.len() >= 2 {
            &text[1..text.len() - 1]
        } else {
            text
        }
    }

    /// Replace a byte range and reparse incrementally
    ///
    /// The tree is left untouched when the result would not parse.
    pub(crate) fn splice(&mut self, range: Range<usize>, text: &str) -> Result<(), AstError> {
        let mut source = String::with_capacity(self.source.len() + text.len());
        source.push_str(&self.source[..range.start]);
        source.push_str(text);
        source.push_str(&self.source[range.end..]);

        let new_end = range.start + text.len();
        let edit = InputEdit {
            start_byte: range.start,
            old_end_byte: range.end,
            new_end_byte: new_end,
            start_position: point_at(&self.source, range.start),
            old_end_position: point_at(&self.source, range.end),
            new_end_position: point_at(&source, new_end),
        };

        let mut old = self.tree.clone();
        old.edit(&edit);
        let tree = parse_tree(&source, Some(&old))?;

        self.source = source;
        self.tree = tree;
        Ok(())
    }

    fn push_named(
        &self,
        out: &mut Vec<DeclarationInfo>,
        node: Node<'_>,
        kind: DeclarationKind,
        exported: bool,
    ) {
        if let Some(name) = node.child_by_field_name("name") {
            out.push(DeclarationInfo {
                name: self.text(name).to_string(),
                kind,
                exported,
                name_range: name.byte_range(),
            });
        }
    }

    fn import_names(&self, import: Node<'_>) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = import.walk();
        let Some(clause) = import
            .named_children(&mut cursor)
            .find(|n| n.kind() == "import_clause")
        else {
            return names;
        };

        let mut cursor = clause.walk();
        for part in clause.named_children(&mut cursor) {
            match part.kind() {
                "identifier" => names.push(self.text(part).to_string()),
                "namespace_import" => {
                    let mut inner = part.walk();
                    names.extend(
                        part.named_children(&mut inner)
                            .filter(|n| n.kind() == "identifier")
                            .map(|n| self.text(n).to_string()),
                    );
                }
                "named_imports" => {
                    let mut inner = part.walk();
                    names.extend(
                        part.named_children(&mut inner)
                            .filter(|n| n.kind() == "import_specifier")
                            .filter_map(|n| {
                                n.child_by_field_name("alias")
                                    .or_else(|| n.child_by_field_name("name"))
                            })
                            .map(|n| self.text(n).to_string()),
                    );
                }
                _ => {}
            }
        }
        names
    }
}

impl fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTree")
            .field("len", &self.source.len())
            .field("statements", &self.statements().len())
            .finish()
    }
}

/// Split an `export` statement into its declaration
pub(crate) fn unwrap_export(statement: Node<'_>) -> (Option<Node<'_>>, bool) {
    if statement.kind() == "export_statement" {
        (statement.child_by_field_name("declaration"), true)
    } else {
        (Some(statement), false)
    }
}
