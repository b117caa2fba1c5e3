//! Generator runtime
//!
//! A [`Generator`] binds one [`GeneratorDescriptor`] to the shared
//! configuration and filesystem. Its lifecycle per invocation is
//!
//! ```text
//! Constructed --set_option--> Optioned --generate--> Generating --> Done | Failed
//! ```
//!
//! Both validation steps report every missing key at once. `generate` takes
//! `&mut self`, so one instance can never run two invocations concurrently.

mod composite;
mod producer;
mod transformer;

use crate::config::{Configuration, OptionBag};
use crate::descriptor::{GeneratorDescriptor, GeneratorKind, PathSegment, TargetSpec};
use crate::error::{GeneratorError, Result};
use crate::fs::FileSystem;
use crate::paths::PathResolver;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Invocation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorState {
    /// Configuration validated
    Constructed,
    /// Options validated and bound
    Optioned,
    /// `generate` in progress
    Generating,
    /// Last invocation succeeded
    Done,
    /// Last invocation failed
    Failed,
}

/// Files touched by one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files created or rewritten
    pub written: Vec<PathBuf>,
    /// Aggregation files that gained an entry
    pub aggregated: Vec<PathBuf>,
    /// Files deliberately left as they were
    pub unchanged: Vec<PathBuf>,
}

impl GenerationReport {
    /// Fold a sub-invocation's report into this one
    pub fn merge(&mut self, other: Self) {
        self.written.extend(other.written);
        self.aggregated.extend(other.aggregated);
        self.unchanged.extend(other.unchanged);
    }
}

/// Everything an invocation reads
pub(crate) struct Context<'a> {
    pub(crate) name: &'a str,
    pub(crate) config: &'a Configuration,
    pub(crate) fs: &'a dyn FileSystem,
    pub(crate) paths: &'a PathResolver,
    pub(crate) options: &'a OptionBag,
}

impl Context<'_> {
    /// Configuration string validated at construction
    pub(crate) fn config_str(&self, key: &str) -> Result<&str> {
        self.config
            .get_str(key)
            .ok_or_else(|| GeneratorError::MissingConfig {
                generator: self.name.to_string(),
                keys: vec![key.to_string()],
            })
    }

    /// Absolute path of a configured location
    pub(crate) fn config_path(&self, key: &str) -> Result<PathBuf> {
        Ok(self.paths.resolve_from_root(self.config_str(key)?))
    }

    /// Root plus segments plus file name
    pub(crate) fn target_path(&self, spec: &TargetSpec) -> Result<PathBuf> {
        let mut relative = PathBuf::new();
        for segment in &spec.segments {
            match segment {
                PathSegment::Config(key) => relative.push(self.config_str(key)?),
                PathSegment::Option(key) => {
                    if let Some(value) = self.options.text(key) {
                        relative.push(value);
                    }
                }
                PathSegment::Name(template) => relative.push(template.render(self.options)?),
            }
        }
        relative.push(spec.file_name.render(self.options)?);
        Ok(self.paths.resolve_from_root(relative))
    }
}

/// Descriptor bound to configuration and filesystem
pub struct Generator {
    descriptor: GeneratorDescriptor,
    config: Arc<Configuration>,
    fs: Arc<dyn FileSystem>,
    paths: PathResolver,
    options: Option<OptionBag>,
    state: GeneratorState,
    steps: Vec<Generator>,
}

impl Generator {
    /// Validate configuration and bind
    ///
    /// # Errors
    /// `GeneratorError::MissingConfig` listing every absent or non-string key,
    /// composite steps included.
    pub fn new(
        descriptor: GeneratorDescriptor,
        config: Arc<Configuration>,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let missing = config.missing_keys(descriptor.all_required_config());
        if !missing.is_empty() {
            return Err(GeneratorError::MissingConfig {
                generator: descriptor.canonical_name().to_string(),
                keys: missing,
            });
        }

        let root = config.root().unwrap_or_default();
        let paths = PathResolver::new(root);

        let steps = match &descriptor.kind {
            GeneratorKind::Composite(composite) => composite
                .steps
                .iter()
                .map(|step| Self::new(step.descriptor.clone(), config.clone(), fs.clone()))
                .collect::<Result<Vec<_>>>()?,
            GeneratorKind::Producer(_) | GeneratorKind::Transformer(_) => Vec::new(),
        };

        Ok(Self {
            descriptor,
            config,
            fs,
            paths,
            options: None,
            state: GeneratorState::Constructed,
            steps,
        })
    }

    /// Invocation names; the first is canonical
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.descriptor.names
    }

    /// Canonical invocation name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.canonical_name()
    }

    /// Underlying descriptor
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &GeneratorDescriptor {
        &self.descriptor
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Validate and bind options for the next `generate`
    ///
    /// # Errors
    /// `GeneratorError::MissingOption` listing every absent key. The
    /// previous binding is dropped either way.
    pub fn set_option(&mut self, options: OptionBag) -> Result<()> {
        self.options = None;
        let missing = options.missing_keys(self.descriptor.required_options.iter().map(String::as_str));
        if !missing.is_empty() {
            self.state = GeneratorState::Constructed;
            return Err(self.missing_options(missing));
        }

        self.options = Some(options);
        self.state = GeneratorState::Optioned;
        Ok(())
    }

    /// Target file for the bound options
    ///
    /// Composites have no single target and return `None`.
    ///
    /// # Errors
    /// `GeneratorError::MissingOption` if no options are bound, or a
    /// rendering error from the path templates.
    pub fn target_path(&self) -> Result<Option<PathBuf>> {
        let options = self.options.as_ref().ok_or_else(|| self.all_options_missing())?;
        let cx = self.context(options);
        match &self.descriptor.kind {
            GeneratorKind::Producer(spec) => cx.target_path(&spec.target).map(Some),
            GeneratorKind::Transformer(spec) => cx.target_path(&spec.target).map(Some),
            GeneratorKind::Composite(_) => Ok(None),
        }
    }

    /// Run the bound invocation
    ///
    /// Options are consumed: the next run needs a fresh `set_option`.
    ///
    /// # Errors
    /// `GeneratorError::MissingOption` if called before `set_option`, and
    /// whatever the producer, transformer or composite step returns.
    pub async fn generate(&mut self) -> Result<GenerationReport> {
        let Some(options) = self.options.take() else {
            return Err(self.all_options_missing());
        };

        self.state = GeneratorState::Generating;
        tracing::debug!("Running generator {}", self.name());

        let result = match &self.descriptor.kind {
            GeneratorKind::Producer(spec) => producer::run(spec, &self.context(&options)).await,
            GeneratorKind::Transformer(spec) => {
                transformer::run(spec, &self.context(&options)).await
            }
            GeneratorKind::Composite(spec) => composite::run(spec, &mut self.steps, &options).await,
        };

        match &result {
            Ok(report) => {
                self.state = GeneratorState::Done;
                tracing::info!(
                    "Generator {} completed: {} written, {} aggregated",
                    self.name(),
                    report.written.len(),
                    report.aggregated.len()
                );
            }
            Err(e) => {
                self.state = GeneratorState::Failed;
                tracing::error!("Generator {} failed: {}", self.name(), e);
            }
        }
        result
    }

    fn context<'a>(&'a self, options: &'a OptionBag) -> Context<'a> {
        Context {
            name: self.descriptor.canonical_name(),
            config: &self.config,
            fs: self.fs.as_ref(),
            paths: &self.paths,
            options,
        }
    }

    fn missing_options(&self, keys: Vec<String>) -> GeneratorError {
        GeneratorError::MissingOption {
            generator: self.name().to_string(),
            keys,
        }
    }

    fn all_options_missing(&self) -> GeneratorError {
        self.missing_options(self.descriptor.required_options.clone())
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("names", &self.descriptor.names)
            .field("state", &self.state)
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}
