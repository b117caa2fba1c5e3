//! Functional tests for the built-in registry.

use serde_json::Value;
use std::sync::Arc;
use unigen_core::{builtin, ErrorKind, GeneratorKind, GeneratorRegistry};
use unigen_test_utils::{builtin_registry, config_with, memory_fs, options, shared_config};

#[test]
fn every_builtin_resolves_by_alias_and_canonical_name() {
    let registry = builtin_registry(memory_fs());
    assert_eq!(registry.len(), 14);

    for (alias, canonical) in [
        ("cm", "client-manager"),
        ("sm", "server-manager"),
        ("cc", "client-controller"),
        ("sc", "server-controller"),
        ("cmm", "client-module-manager"),
        ("cmc", "client-module-controller"),
        ("cmd", "client-module-descriptor"),
        ("cie", "client-internal-event"),
        ("sie", "server-internal-event"),
        ("cee", "client-external-event"),
        ("see", "server-external-event"),
        ("ceeh", "client-external-event-handler"),
        ("seeh", "server-external-event-handler"),
        ("cmo", "client-module"),
    ] {
        assert_eq!(registry.resolve(alias).unwrap().name(), canonical);
        assert_eq!(registry.resolve(canonical).unwrap().name(), canonical);
    }
}

#[test]
fn help_text_lists_generators_in_registration_order() {
    let registry = builtin_registry(memory_fs());
    let help = registry.help_text();
    let lines: Vec<_> = help.lines().collect();

    assert_eq!(lines.len(), 16);
    assert!(lines[0].contains("ALL GENERATORS START"));
    assert_eq!(lines[1], "   client-manager: client-manager, cm");
    assert_eq!(lines[14], "   client-module: client-module, cmo");
    assert!(lines[15].contains("ALL GENERATORS END"));
}

#[test]
fn builtins_cannot_be_registered_twice() {
    let mut registry = builtin_registry(memory_fs());

    let err = registry.register_all(builtin::all()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateRegistration);
    assert_eq!(registry.len(), 14);
}

#[test]
fn partial_configuration_registers_a_subset() {
    let config = config_with(&[("serverModulePath", Value::Null)]);
    let err = GeneratorRegistry::with_builtins(config, memory_fs()).unwrap_err();
    assert_eq!(err.missing_keys(), &["serverModulePath".to_string()]);

    let config = Arc::new(config_with(&[("serverModulePath", Value::Null)]));
    let mut registry = GeneratorRegistry::new(config.clone(), memory_fs());
    registry
        .register_all(builtin::all().into_iter().filter(|d| {
            config
                .missing_keys(d.all_required_config())
                .is_empty()
        }))
        .unwrap();

    assert_eq!(registry.len(), 13);
    assert!(!registry.contains("sm"));
}

#[test]
fn list_all_exposes_descriptor_kinds() {
    let registry = GeneratorRegistry::with_builtins(shared_config(), memory_fs()).unwrap();

    let transformers: Vec<_> = registry
        .list_all()
        .filter(|(_, g)| matches!(g.descriptor().kind, GeneratorKind::Transformer(_)))
        .map(|(names, _)| names[1].clone())
        .collect();
    assert_eq!(transformers, vec!["ceeh", "seeh"]);
}

#[tokio::test]
async fn unknown_generator_is_reported() {
    let mut registry = builtin_registry(memory_fs());

    let err = registry
        .run("client-widget", options(&[("name", "x")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnknownGenerator);
    assert!(err.to_string().contains("client-widget"));
}
