//! Testing utilities for unigen workspace
//!
//! Shared fixtures: a complete configuration, in-memory filesystems and
//! option bags.

#![allow(missing_docs)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use unigen_core::{Configuration, GeneratorRegistry, MemoryFileSystem, OptionBag};

pub const ROOT: &str = "/proj/src";

/// Every configuration key the built-in generators read
pub fn fixture_config_value() -> Value {
    json!({
        "sourcePath": ROOT,
        "clientManagersPath": "managers",
        "clientManagerSpecPath": "spec/manager",
        "clientInternalEventsModulePath": "events/internal",
        "clientExternalEventsModulePath": "events/external",
        "clientControllersPath": "controllers",
        "clientControllerSpecPath": "spec/controller",
        "clientModulePath": "modules",
        "moduleSpecPath": "spec/module",
        "serverModulePath": "server/modules",
        "serverManagerSpecPath": "server/spec/manager",
        "serverInternalEventsModulePath": "server/events/internal",
        "serverExternalEventsModulePath": "server/events/external",
        "serverControllersPath": "server/controllers",
        "serverControllerSpecPath": "server/spec/controller",
        "eventsSpecPath": "spec/events",
        "eventBusClientSpecPath": "spec/event-bus-client",
        "eventBusServerSpecPath": "spec/event-bus-server",
    })
}

pub fn fixture_config() -> Configuration {
    Configuration::from_value(fixture_config_value()).unwrap()
}

pub fn shared_config() -> Arc<Configuration> {
    Arc::new(fixture_config())
}

/// Fixture configuration with some keys replaced or removed (`Value::Null`)
pub fn config_with(overrides: &[(&str, Value)]) -> Configuration {
    let mut value = fixture_config_value();
    let map = value.as_object_mut().unwrap();
    for (key, override_value) in overrides {
        if override_value.is_null() {
            map.remove(*key);
        } else {
            map.insert((*key).to_string(), override_value.clone());
        }
    }
    Configuration::from_value(value).unwrap()
}

/// Empty filesystem with the source root created
pub fn memory_fs() -> Arc<MemoryFileSystem> {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.insert_dir(ROOT);
    fs
}

pub fn options(pairs: &[(&str, &str)]) -> OptionBag {
    pairs
        .iter()
        .fold(OptionBag::new(), |bag, (key, value)| bag.with(*key, *value))
}

pub fn builtin_registry(fs: Arc<MemoryFileSystem>) -> GeneratorRegistry {
    GeneratorRegistry::with_builtins(fixture_config(), fs).unwrap()
}

/// Absolute path under the fixture root
pub fn src(relative: &str) -> PathBuf {
    Path::new(ROOT).join(relative)
}

/// Contents of a file under the fixture root, panicking if absent
pub fn read(fs: &MemoryFileSystem, relative: &str) -> String {
    let path = src(relative);
    fs.file(&path)
        .unwrap_or_else(|| panic!("missing file {}", path.display()))
}
