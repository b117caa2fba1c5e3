//! Aggregation splices: barrel re-exports and module descriptor arrays
//!
//! Both shapes are shared by many generator invocations, so every insert
//! checks for an existing entry by identifier name first and reports whether
//! the text actually changed.

use crate::edit::quote_literal;
use crate::error::AstError;
use crate::tree::{unwrap_export, SourceTree};
use tree_sitter::Node;

impl SourceTree {
    /// Prepend `import { name } from '<source>';`
    ///
    /// Returns `false` if some import already binds `name`.
    ///
    /// # Errors
    /// Propagates a rejected splice.
    pub fn prepend_named_import(&mut self, name: &str, source: &str) -> Result<bool, AstError> {
        if self.imports_name(name) {
            return Ok(false);
        }

        let statement = format!("import {{ {name} }} from {};\n", quote_literal(source, '\''));
        self.splice(0..0, &statement)?;
        Ok(true)
    }

    /// Add an `import → re-export` pair to a barrel
    ///
    /// The name goes at the end of the trailing `export { ... }` clause and the
    /// import goes at the top of the file. Returns `false` when the name is
    /// already imported.
    ///
    /// # Errors
    /// `AstError::StructuralMismatch` if the file does not end with a local
    /// export clause.
    pub fn add_barrel_export(&mut self, name: &str, source: &str) -> Result<bool, AstError> {
        if self.imports_name(name) {
            return Ok(false);
        }

        if let Some((range, text)) = self.export_clause_insertion(name)? {
            self.splice(range, &text)?;
        }
        self.prepend_named_import(name, source)?;
        Ok(true)
    }

    /// Push an identifier onto an array property of the module descriptor
    ///
    /// Returns `false` when the array already holds `name`.
    ///
    /// # Errors
    /// - `AstError::StructuralMismatch` if there is no single exported
    ///   `const X = call({ ... })` or the property is not an array
    /// - `AstError::PropertyNotFound` if the object has no such key
    pub fn push_array_property(&mut self, property: &str, name: &str) -> Result<bool, AstError> {
        let (at, text) = {
            let object = self.module_descriptor_object()?;
            let array = self.array_property(object, property)?;

            let mut cursor = array.walk();
            let elements: Vec<_> = array
                .named_children(&mut cursor)
                .filter(|n| n.kind() != "comment")
                .collect();
            if elements.iter().any(|e| self.text(*e) == name) {
                return Ok(false);
            }

            match elements.last() {
                Some(last) => (last.end_byte(), format!(", {name}")),
                None => (array.start_byte() + 1, name.to_string()),
            }
        };

        self.splice(at..at, &text)?;
        Ok(true)
    }

    /// Register an entity in a module descriptor: array entry plus import
    ///
    /// Returns `true` if either the array or the imports changed.
    ///
    /// # Errors
    /// As [`push_array_property`](Self::push_array_property).
    pub fn register_in_module_descriptor(
        &mut self,
        property: &str,
        name: &str,
        import_path: &str,
    ) -> Result<bool, AstError> {
        let pushed = self.push_array_property(property, name)?;
        let imported = self.prepend_named_import(name, import_path)?;
        Ok(pushed || imported)
    }

    fn export_clause_insertion(
        &self,
        name: &str,
    ) -> Result<Option<(std::ops::Range<usize>, String)>, AstError> {
        let last = self
            .statements()
            .pop()
            .ok_or_else(|| AstError::mismatch("barrel is empty, expected a trailing export clause"))?;

        let clause = (last.kind() == "export_statement" && last.child_by_field_name("source").is_none())
            .then(|| {
                let mut cursor = last.walk();
                let found = last
                    .named_children(&mut cursor)
                    .find(|n| n.kind() == "export_clause");
                found
            })
            .flatten()
            .ok_or_else(|| AstError::mismatch("barrel does not end with an export clause"))?;

        let mut cursor = clause.walk();
        let specifiers: Vec<_> = clause
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "export_specifier")
            .collect();

        if specifiers.iter().any(|s| self.specifier_name(*s) == Some(name)) {
            return Ok(None);
        }

        Ok(Some(match specifiers.last() {
            Some(last) => (last.end_byte()..last.end_byte(), format!(", {name}")),
            None => (clause.byte_range(), format!("{{ {name} }}")),
        }))
    }

    fn specifier_name(&self, specifier: Node<'_>) -> Option<&str> {
        specifier
            .child_by_field_name("alias")
            .or_else(|| specifier.child_by_field_name("name"))
            .map(|n| self.text(n))
    }

    /// Object literal passed to the sole exported descriptor call
    fn module_descriptor_object(&self) -> Result<Node<'_>, AstError> {
        let mut candidates = Vec::new();
        for statement in self.statements() {
            let (Some(declaration), true) = unwrap_export(statement) else {
                continue;
            };
            if !matches!(declaration.kind(), "lexical_declaration" | "variable_declaration") {
                continue;
            }

            let mut cursor = declaration.walk();
            candidates.extend(
                declaration
                    .named_children(&mut cursor)
                    .filter(|n| n.kind() == "variable_declarator")
                    .filter_map(|n| n.child_by_field_name("value"))
                    .filter(|value| value.kind() == "call_expression"),
            );
        }

        let call = match candidates.as_slice() {
            [call] => *call,
            others => {
                return Err(AstError::mismatch(format!(
                    "expected one exported call declaration, found {}",
                    others.len()
                )))
            }
        };

        let arguments = call
            .child_by_field_name("arguments")
            .ok_or_else(|| AstError::mismatch("descriptor call has no arguments"))?;
        let mut cursor = arguments.walk();
        let first = arguments
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment");

        first
            .filter(|n| n.kind() == "object")
            .ok_or_else(|| AstError::mismatch("descriptor call argument is not an object literal"))
    }

    fn array_property<'t>(&self, object: Node<'t>, property: &str) -> Result<Node<'t>, AstError> {
        let mut cursor = object.walk();
        let pair = object
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "pair")
            .find(|pair| {
                pair.child_by_field_name("key").is_some_and(|key| {
                    let text = self.text(key);
                    match key.kind() {
                        "string" => self.string_value(key) == property,
                        _ => text == property,
                    }
                })
            })
            .ok_or_else(|| AstError::PropertyNotFound(property.to_string()))?;

        pair.child_by_field_name("value")
            .filter(|value| value.kind() == "array")
            .ok_or_else(|| AstError::mismatch(format!("property {property} is not an array")))
    }
}
