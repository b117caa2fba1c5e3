//! Class members appended by structural edits

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Dotted reference such as `ServerEvents.JoinEvent`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Leading namespace, if any
    pub namespace: Option<String>,
    /// Member name
    pub name: String,
}

impl QualifiedName {
    /// Unqualified name
    #[inline]
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// `namespace.name`
    #[inline]
    #[must_use]
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// TypeScript member accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Accessibility {
    /// Keyword text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// Call-style decorator, `@callee(argument)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorator {
    /// Decorator function
    pub callee: String,
    /// Single argument, if any
    pub argument: Option<QualifiedName>,
}

/// Typed method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Type annotation
    pub type_annotation: QualifiedName,
}

/// Member appended to a class body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    /// Method with an empty body
    Method {
        /// Method name
        name: String,
        /// Optional accessibility modifier
        accessibility: Option<Accessibility>,
        /// Optional decorator on the line above
        decorator: Option<Decorator>,
        /// Parameters in order
        parameters: Vec<Parameter>,
    },
    /// Field with a type annotation
    Property {
        /// Field name
        name: String,
        /// Type annotation text
        type_annotation: String,
    },
}

impl ClassMember {
    /// Member name used for duplicate detection
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method { name, .. } | Self::Property { name, .. } => name,
        }
    }

    /// Text placed between this member and the one before it
    pub(crate) fn separator(&self) -> &'static str {
        match self {
            Self::Method { .. } => "\n\n",
            Self::Property { .. } => "\n",
        }
    }

    /// Render with every line prefixed by `indent`
    #[must_use]
    pub fn render(&self, indent: &str) -> String {
        match self {
            Self::Method {
                name,
                accessibility,
                decorator,
                parameters,
            } => {
                let mut out = String::new();
                if let Some(decorator) = decorator {
                    out.push_str(indent);
                    out.push('@');
                    out.push_str(&decorator.callee);
                    out.push('(');
                    if let Some(argument) = &decorator.argument {
                        out.push_str(&argument.to_string());
                    }
                    out.push_str(")\n");
                }

                let params = parameters
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.type_annotation))
                    .collect::<Vec<_>>()
                    .join(", ");

                out.push_str(indent);
                if let Some(accessibility) = accessibility {
                    out.push_str(accessibility.as_str());
                    out.push(' ');
                }
                out.push_str(&format!("{name}({params}) {{}}"));
                out
            }
            Self::Property {
                name,
                type_annotation,
            } => format!("{indent}{name}: {type_annotation};"),
        }
    }
}
