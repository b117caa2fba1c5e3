//! Identifier and file-name templates
//!
//! A [`NameTemplate`] such as `"{name}-manager"` is interpolated from the
//! option bag and then case-converted, so `lobby` becomes `LobbyManager` for
//! a class or stays `lobby-manager` for a file name.

use crate::config::OptionBag;
use crate::error::{GeneratorError, Result};
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use unigen_ast::ClassMember;

/// Type annotations accepted in property lists
pub const PROPERTY_TYPES: [&str; 4] = ["string", "number", "boolean", "any"];

/// Case conversion applied after interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    /// `lobby-manager` → `LobbyManager`
    Pascal,
    /// `handle-join-event` → `handleJoinEvent`
    Camel,
    /// Unchanged
    #[default]
    Verbatim,
}

impl Case {
    /// Convert `text`
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Pascal => text.to_upper_camel_case(),
            Self::Camel => text.to_lower_camel_case(),
            Self::Verbatim => text.to_string(),
        }
    }
}

/// Option-driven name pattern
///
/// `{key}` inserts an option's text. `{a|b}` inserts the first present
/// alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTemplate {
    pub pattern: String,
    #[serde(default)]
    pub case: Case,
}

impl NameTemplate {
    /// Create template
    #[must_use]
    pub fn new(pattern: impl Into<String>, case: Case) -> Self {
        Self {
            pattern: pattern.into(),
            case,
        }
    }

    /// PascalCase template
    #[must_use]
    pub fn pascal(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Case::Pascal)
    }

    /// camelCase template
    #[must_use]
    pub fn camel(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Case::Camel)
    }

    /// Template rendered without case conversion
    #[must_use]
    pub fn verbatim(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Case::Verbatim)
    }

    /// Interpolate and case-convert
    ///
    /// # Errors
    /// - `GeneratorError::InvalidOption` if no alternative of a placeholder
    ///   is present
    /// - `GeneratorError::InvalidConfig` on an unterminated placeholder
    pub fn render(&self, options: &OptionBag) -> Result<String> {
        let mut out = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                GeneratorError::InvalidConfig(format!(
                    "unterminated placeholder in name template '{}'",
                    self.pattern
                ))
            })?;

            let placeholder = &after[..close];
            let value = placeholder
                .split('|')
                .map(str::trim)
                .find_map(|key| options.text(key))
                .ok_or_else(|| GeneratorError::InvalidOption {
                    key: placeholder.to_string(),
                    message: format!("no value to fill '{}'", self.pattern),
                })?;
            out.push_str(&value);
            rest = &after[close + 1..];
        }
        out.push_str(rest);

        Ok(self.case.apply(&out))
    }
}

/// Parse `"a:string,b:number"` into property members
///
/// Names are camel-cased. A part without `:` takes `default_type`. Empty
/// parts are skipped.
///
/// # Errors
/// `GeneratorError::InvalidOption` on an empty name or unknown type.
pub fn parse_properties(key: &str, text: &str, default_type: &str) -> Result<Vec<ClassMember>> {
    let invalid = |message: String| GeneratorError::InvalidOption {
        key: key.to_string(),
        message,
    };

    let mut members = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, type_name) = match part.split_once(':') {
            Some((name, type_name)) => (name.trim(), type_name.trim()),
            None => (part, ""),
        };
        let type_name = if type_name.is_empty() { default_type } else { type_name };

        let name = name.to_lower_camel_case();
        if name.is_empty() {
            return Err(invalid(format!("property without a name in '{part}'")));
        }
        if !PROPERTY_TYPES.contains(&type_name) {
            return Err(invalid(format!("not a valid type name: {type_name}")));
        }

        members.push(ClassMember::Property {
            name,
            type_annotation: type_name.to_string(),
        });
    }
    Ok(members)
}
