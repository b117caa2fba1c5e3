//! Generator registry
//!
//! Provides [`GeneratorRegistry`], an explicitly constructed value holding one
//! [`Generator`] per registered descriptor. There is no global instance, so
//! tests build isolated registries per case.

use crate::config::{Configuration, OptionBag};
use crate::descriptor::GeneratorDescriptor;
use crate::error::{GeneratorError, Result};
use crate::fs::FileSystem;
use crate::generator::{GenerationReport, Generator};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry of generators bound to one configuration
pub struct GeneratorRegistry {
    config: Arc<Configuration>,
    fs: Arc<dyn FileSystem>,
    generators: Vec<Generator>,
    by_name: HashMap<String, usize>,
}

impl GeneratorRegistry {
    /// Create empty registry
    #[must_use]
    pub fn new(config: impl Into<Arc<Configuration>>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            config: config.into(),
            fs,
            generators: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create registry holding every built-in generator
    ///
    /// # Errors
    /// As [`register`](Self::register).
    pub fn with_builtins(config: impl Into<Arc<Configuration>>, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let mut registry = Self::new(config, fs);
        registry.register_all(crate::builtin::all())?;
        Ok(registry)
    }

    /// Construct and register a generator
    ///
    /// # Errors
    /// - `GeneratorError::DuplicateRegistration` if any name is already taken,
    ///   including a name repeated within the descriptor
    /// - `GeneratorError::InvalidConfig` if the descriptor has no names
    /// - `GeneratorError::MissingConfig` from construction
    pub fn register(&mut self, descriptor: GeneratorDescriptor) -> Result<&Generator> {
        if descriptor.names.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "generator descriptor has no invocation names".into(),
            ));
        }
        for (i, name) in descriptor.names.iter().enumerate() {
            if self.by_name.contains_key(name) || descriptor.names[..i].contains(name) {
                return Err(GeneratorError::DuplicateRegistration { name: name.clone() });
            }
        }

        let generator = Generator::new(descriptor, self.config.clone(), self.fs.clone())?;
        let slot = self.generators.len();
        for name in generator.names() {
            self.by_name.insert(name.clone(), slot);
        }
        tracing::debug!("Registered generator {}", generator.name());
        self.generators.push(generator);
        Ok(&self.generators[slot])
    }

    /// Register several descriptors, stopping at the first failure
    ///
    /// # Errors
    /// As [`register`](Self::register).
    pub fn register_all(&mut self, descriptors: impl IntoIterator<Item = GeneratorDescriptor>) -> Result<()> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    /// Look up by any invocation name
    ///
    /// # Errors
    /// `GeneratorError::UnknownGenerator` on a miss.
    pub fn resolve(&self, name: &str) -> Result<&Generator> {
        let slot = self.slot(name)?;
        Ok(&self.generators[slot])
    }

    /// Mutable lookup, for `set_option` and `generate`
    ///
    /// # Errors
    /// `GeneratorError::UnknownGenerator` on a miss.
    pub fn resolve_mut(&mut self, name: &str) -> Result<&mut Generator> {
        let slot = self.slot(name)?;
        Ok(&mut self.generators[slot])
    }

    /// Check if a name is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Generators with their names, in registration order
    pub fn list_all(&self) -> impl Iterator<Item = (&[String], &Generator)> {
        self.generators.iter().map(|g| (g.names(), g))
    }

    /// Get number of registered generators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// One line per generator: canonical name, then every invocation name
    #[must_use]
    pub fn help_text(&self) -> String {
        let mut lines = vec![String::from("==========ALL GENERATORS START=========")];
        lines.extend(
            self.list_all()
                .map(|(names, g)| format!("   {}: {}", g.name(), names.join(", "))),
        );
        lines.push(String::from("==========ALL GENERATORS END==========="));
        lines.join("\n")
    }

    /// Resolve, bind options and generate in one call
    ///
    /// # Errors
    /// Any error from resolution, validation or generation.
    pub async fn run(&mut self, name: &str, options: OptionBag) -> Result<GenerationReport> {
        let generator = self.resolve_mut(name)?;
        generator.set_option(options)?;
        generator.generate().await
    }

    fn slot(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GeneratorError::UnknownGenerator {
                name: name.to_string(),
            })
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.generators)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{CompositeSpec, GeneratorKind};
    use crate::error::ErrorKind;
    use crate::fs::MemoryFileSystem;
    use serde_json::json;

    fn empty_composite(names: &[&str]) -> GeneratorDescriptor {
        GeneratorDescriptor {
            names: names.iter().map(|s| s.to_string()).collect(),
            required_config: vec![],
            required_options: vec![],
            kind: GeneratorKind::Composite(CompositeSpec { steps: vec![] }),
        }
    }

    fn registry() -> GeneratorRegistry {
        let config = Configuration::from_value(json!({"sourcePath": "/proj/src"})).unwrap();
        GeneratorRegistry::new(config, Arc::new(MemoryFileSystem::new()))
    }

    #[test]
    fn resolve_by_any_name() {
        let mut registry = registry();
        registry.register(empty_composite(&["client-module", "cmo"])).unwrap();

        assert_eq!(registry.resolve("cmo").unwrap().name(), "client-module");
        assert_eq!(registry.resolve("client-module").unwrap().name(), "client-module");
        assert!(registry.contains("cmo"));

        let err = registry.resolve("cm").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownGenerator);
    }

    #[test]
    fn name_collisions_are_rejected() {
        let mut registry = registry();
        registry.register(empty_composite(&["a", "x"])).unwrap();

        let err = registry.register(empty_composite(&["b", "x"])).unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateRegistration { name } if name == "x"));
        assert!(!registry.contains("b"));

        let err = registry.register(empty_composite(&["c", "c"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateRegistration);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn list_all_keeps_registration_order() {
        let mut registry = registry();
        registry
            .register_all([empty_composite(&["z"]), empty_composite(&["a", "aa"])])
            .unwrap();

        let names: Vec<_> = registry.list_all().map(|(names, _)| names.to_vec()).collect();
        assert_eq!(names, vec![vec!["z".to_string()], vec!["a".to_string(), "aa".to_string()]]);
        assert!(registry.help_text().contains("   a: a, aa"));
    }

    #[test]
    fn nameless_descriptor_is_invalid() {
        let mut registry = registry();
        let err = registry.register(empty_composite(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(registry.is_empty());
    }
}
