//! Generator descriptors
//!
//! A generator is data: invocation names, required keys and a kind-specific
//! spec. Generic producer, transformer and composite logic interprets the
//! spec, so a new generator is a new descriptor rather than a new type.
//! Descriptors are serde types and may be defined in JSON.

use crate::config::ROOT_KEY;
use crate::naming::NameTemplate;
use serde::{Deserialize, Serialize};
use unigen_ast::Accessibility;

/// Complete description of one generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorDescriptor {
    /// Invocation names; the first is canonical
    pub names: Vec<String>,
    /// Configuration keys that must hold strings
    #[serde(default)]
    pub required_config: Vec<String>,
    /// Option keys that must be present
    #[serde(default)]
    pub required_options: Vec<String>,
    pub kind: GeneratorKind,
}

impl GeneratorDescriptor {
    /// Canonical invocation name
    #[must_use]
    pub fn canonical_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// Every configuration key this generator needs, composite steps included
    ///
    /// Starts with the root key. Order is first occurrence.
    #[must_use]
    pub fn all_required_config(&self) -> Vec<&str> {
        let mut keys = vec![ROOT_KEY];
        self.collect_config(&mut keys);
        keys
    }

    fn collect_config<'a>(&'a self, keys: &mut Vec<&'a str>) {
        for key in &self.required_config {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        if let GeneratorKind::Composite(composite) = &self.kind {
            for step in &composite.steps {
                step.descriptor.collect_config(keys);
            }
        }
    }
}

/// Capability variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Author a new file from a template
    Producer(ProducerSpec),
    /// Mutate an existing file in place
    Transformer(TransformerSpec),
    /// Run other generators in order
    Composite(CompositeSpec),
}

/// One segment of a target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    /// Configuration value
    Config(String),
    /// Option value; skipped when the option is absent
    Option(String),
    /// Rendered name
    Name(NameTemplate),
}

/// Target path: root, then segments, then file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub segments: Vec<PathSegment>,
    pub file_name: NameTemplate,
}

/// Import slot: placeholder source literal filled from a configuration path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSlot {
    pub placeholder: String,
    pub config_key: String,
}

/// Declaration slot: placeholder identifier renamed from options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSlot {
    pub placeholder: String,
    pub name: NameTemplate,
}

/// Superclass slot: `namespace.Name` written into the `extends` clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperclassSlot {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: NameTemplate,
}

/// Property members parsed from an option such as `"a:string,b:number"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSlot {
    pub option: String,
    pub default_type: String,
}

/// Template skeleton plus its named slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub source: String,
    #[serde(default)]
    pub imports: Vec<ImportSlot>,
    #[serde(default)]
    pub declaration: Option<DeclarationSlot>,
    #[serde(default)]
    pub superclass: Option<SuperclassSlot>,
    #[serde(default)]
    pub members: Option<MemberSlot>,
}

/// Alternate template chosen when an option is present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub when_option: String,
    pub template: TemplateSpec,
}

/// Behavior when the target file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overwrite {
    /// Replace the file (last writer wins)
    #[default]
    Replace,
    /// Leave the existing file alone
    Keep,
}

/// Where a produced declaration is registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationSpec {
    /// Barrel file next to the target
    Barrel { file_name: String },
    /// Array property of the nearest enclosing module descriptor
    ModuleDescriptor { marker: String, property: String },
}

/// Producer generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerSpec {
    pub target: TargetSpec,
    pub template: TemplateSpec,
    #[serde(default)]
    pub variant: Option<VariantSpec>,
    #[serde(default)]
    pub overwrite: Overwrite,
    #[serde(default)]
    pub aggregation: Option<AggregationSpec>,
}

/// `Namespace.Name` reference built from options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedTemplate {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: NameTemplate,
}

/// Decorator on the appended method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratorSpec {
    pub callee: String,
    #[serde(default)]
    pub argument: Option<QualifiedTemplate>,
}

/// Typed parameter of the appended method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub type_annotation: QualifiedTemplate,
}

/// Method appended by a transformer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: NameTemplate,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub decorator: Option<DecoratorSpec>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

/// Transformer generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerSpec {
    pub target: TargetSpec,
    pub class_name: NameTemplate,
    pub method: MethodSpec,
}

/// Option copied from the caller's bag under another key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionMapping {
    pub to: String,
    pub from: String,
}

/// One step of a composite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeStep {
    pub descriptor: GeneratorDescriptor,
    #[serde(default)]
    pub options: Vec<OptionMapping>,
}

/// Composite generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeSpec {
    pub steps: Vec<CompositeStep>,
}
