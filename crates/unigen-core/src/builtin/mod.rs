//! Built-in generators
//!
//! Every generator here is plain [`GeneratorDescriptor`] data interpreted by
//! the generic producer, transformer and composite logic. Client and server
//! variants differ only in configuration key names and template text.

mod templates;

use crate::descriptor::{
    AggregationSpec, CompositeSpec, CompositeStep, DeclarationSlot, DecoratorSpec,
    GeneratorDescriptor, GeneratorKind, ImportSlot, MemberSlot, MethodSpec, OptionMapping,
    Overwrite, ParameterSpec, PathSegment, ProducerSpec, QualifiedTemplate, SuperclassSlot,
    TargetSpec, TemplateSpec, TransformerSpec, VariantSpec,
};
use crate::naming::NameTemplate;
use unigen_ast::Accessibility;

/// Marker file of a client module
pub const MODULE_DESCRIPTOR_FILE: &str = "module-export.ts";

/// Barrel file of an events module
pub const EVENTS_BARREL_FILE: &str = "index.ts";

/// Every built-in generator, in help order
#[must_use]
pub fn all() -> Vec<GeneratorDescriptor> {
    vec![
        manager(Side::Client),
        manager(Side::Server),
        controller(Side::Client),
        controller(Side::Server),
        client_module_manager(),
        client_module_controller(),
        client_module_descriptor(),
        internal_event(Side::Client),
        internal_event(Side::Server),
        external_event(Side::Client),
        external_event(Side::Server),
        external_event_handler(Side::Client),
        external_event_handler(Side::Server),
        client_module(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Client,
    Server,
}

impl Side {
    fn word(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }

    fn peer(self) -> Self {
        match self {
            Self::Client => Self::Server,
            Self::Server => Self::Client,
        }
    }

    /// `clientManagersPath` from `ManagersPath`
    fn key(self, suffix: &str) -> String {
        format!("{}{suffix}", self.word())
    }

    fn names(self, kind: &str, alias: &str) -> Vec<String> {
        let letter = &self.word()[..1];
        vec![format!("{}-{kind}", self.word()), format!("{letter}{alias}")]
    }

    /// Namespace under which the peer's external events are imported
    fn peer_events_namespace(self) -> &'static str {
        match self {
            Self::Client => "ServerEvents",
            Self::Server => "ClientEvents",
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn import(placeholder: &str, config_key: impl Into<String>) -> ImportSlot {
    ImportSlot {
        placeholder: placeholder.to_string(),
        config_key: config_key.into(),
    }
}

fn declaration(placeholder: &str, pattern: &str) -> Option<DeclarationSlot> {
    Some(DeclarationSlot {
        placeholder: placeholder.to_string(),
        name: NameTemplate::pascal(pattern),
    })
}

fn producer(
    names: Vec<String>,
    required_config: Vec<String>,
    required_options: &[&str],
    spec: ProducerSpec,
) -> GeneratorDescriptor {
    GeneratorDescriptor {
        names,
        required_config,
        required_options: strings(required_options),
        kind: GeneratorKind::Producer(spec),
    }
}

/// `<clientModulePath>/<modulePath?>/<module>-module`
fn module_segments() -> Vec<PathSegment> {
    vec![
        PathSegment::Config("clientModulePath".into()),
        PathSegment::Option("modulePath".into()),
        PathSegment::Name(NameTemplate::verbatim("{module}-module")),
    ]
}

fn manager_template(side: Side) -> TemplateSpec {
    let (source, spec_placeholder) = match side {
        Side::Client => (templates::CLIENT_MANAGER, "{CLIENT_MANAGER_SPEC_PATH}"),
        Side::Server => (templates::SERVER_MANAGER, "{SERVER_MANAGER_SPEC_PATH}"),
    };
    TemplateSpec {
        source: source.to_string(),
        imports: vec![
            import(spec_placeholder, side.key("ManagerSpecPath")),
            import("{INTERNAL_EVENTS_MODULE_PATH}", side.key("InternalEventsModulePath")),
        ],
        declaration: declaration("NewManager", "{name}-manager"),
        superclass: None,
        members: None,
    }
}

fn manager_config(side: Side) -> Vec<String> {
    vec![side.key("ManagerSpecPath"), side.key("InternalEventsModulePath")]
}

fn manager(side: Side) -> GeneratorDescriptor {
    // Server managers live inside their module directory
    let (dir_key, module) = match side {
        Side::Client => (side.key("ManagersPath"), None),
        Side::Server => (side.key("ModulePath"), Some("module")),
    };

    let mut segments = vec![PathSegment::Config(dir_key.clone())];
    let mut options = vec!["name"];
    if let Some(module) = module {
        segments.push(PathSegment::Option(module.into()));
        options.push(module);
    }

    let mut config = vec![dir_key];
    config.extend(manager_config(side));

    producer(
        side.names("manager", "m"),
        config,
        &options,
        ProducerSpec {
            target: TargetSpec {
                segments,
                file_name: NameTemplate::verbatim("{name}-manager.ts"),
            },
            template: manager_template(side),
            variant: None,
            overwrite: Overwrite::Replace,
            aggregation: None,
        },
    )
}

fn controller_template(side: Side) -> TemplateSpec {
    let source = match side {
        Side::Client => templates::CLIENT_CONTROLLER,
        Side::Server => templates::SERVER_CONTROLLER,
    };
    TemplateSpec {
        source: source.to_string(),
        imports: vec![
            import("{INTERNAL_EVENTS_MODULE_PATH}", side.key("InternalEventsModulePath")),
            import("{EXTERNAL_EVENTS_MODULE_PATH}", side.key("ExternalEventsModulePath")),
            import(
                "{PEER_EXTERNAL_EVENTS_MODULE_PATH}",
                side.peer().key("ExternalEventsModulePath"),
            ),
            import("{EVENT_BUS_SPEC_PATH}", event_bus_key(side)),
            import("{EVENTS_SPEC_PATH}", "eventsSpecPath"),
            import("{CONTROLLER_SPEC_PATH}", side.key("ControllerSpecPath")),
        ],
        declaration: declaration("NewController", "{name}-controller"),
        superclass: None,
        members: None,
    }
}

/// `eventBusClientSpecPath` / `eventBusServerSpecPath`
fn event_bus_key(side: Side) -> String {
    match side {
        Side::Client => "eventBusClientSpecPath".into(),
        Side::Server => "eventBusServerSpecPath".into(),
    }
}

fn controller_config(side: Side) -> Vec<String> {
    vec![
        side.key("ControllerSpecPath"),
        side.key("InternalEventsModulePath"),
        side.key("ExternalEventsModulePath"),
        side.peer().key("ExternalEventsModulePath"),
        "eventsSpecPath".into(),
        event_bus_key(side),
    ]
}

fn controller(side: Side) -> GeneratorDescriptor {
    let mut config = vec![side.key("ControllersPath")];
    config.extend(controller_config(side));

    producer(
        side.names("controller", "c"),
        config,
        &["name"],
        ProducerSpec {
            target: TargetSpec {
                segments: vec![PathSegment::Config(side.key("ControllersPath"))],
                file_name: NameTemplate::verbatim("{name}-controller.ts"),
            },
            template: controller_template(side),
            variant: None,
            overwrite: Overwrite::Replace,
            aggregation: None,
        },
    )
}

fn module_registration(property: &str) -> Option<AggregationSpec> {
    Some(AggregationSpec::ModuleDescriptor {
        marker: MODULE_DESCRIPTOR_FILE.into(),
        property: property.into(),
    })
}

fn client_module_manager() -> GeneratorDescriptor {
    let mut config = vec!["clientModulePath".to_string()];
    config.extend(manager_config(Side::Client));

    producer(
        strings(&["client-module-manager", "cmm"]),
        config,
        &["name", "module"],
        ProducerSpec {
            target: TargetSpec {
                segments: module_segments(),
                file_name: NameTemplate::verbatim("{name}-manager.ts"),
            },
            template: manager_template(Side::Client),
            variant: None,
            overwrite: Overwrite::Replace,
            aggregation: module_registration("managers"),
        },
    )
}

fn client_module_controller() -> GeneratorDescriptor {
    let mut config = vec!["clientModulePath".to_string()];
    config.extend(controller_config(Side::Client));

    producer(
        strings(&["client-module-controller", "cmc"]),
        config,
        &["name", "module"],
        ProducerSpec {
            target: TargetSpec {
                segments: module_segments(),
                file_name: NameTemplate::verbatim("{name}-controller.ts"),
            },
            template: controller_template(Side::Client),
            variant: None,
            overwrite: Overwrite::Replace,
            aggregation: module_registration("controllers"),
        },
    )
}

fn client_module_descriptor() -> GeneratorDescriptor {
    producer(
        strings(&["client-module-descriptor", "cmd"]),
        strings(&["clientModulePath", "moduleSpecPath"]),
        &["module"],
        ProducerSpec {
            target: TargetSpec {
                segments: module_segments(),
                file_name: NameTemplate::verbatim(MODULE_DESCRIPTOR_FILE),
            },
            template: TemplateSpec {
                source: templates::CLIENT_MODULE.into(),
                imports: vec![import("{MODULE_SPEC_PATH}", "moduleSpecPath")],
                declaration: declaration("NewModule", "{module}-module"),
                superclass: None,
                members: None,
            },
            variant: None,
            // Registered managers and controllers survive a second run
            overwrite: Overwrite::Keep,
            aggregation: None,
        },
    )
}

fn events_barrel() -> Option<AggregationSpec> {
    Some(AggregationSpec::Barrel {
        file_name: EVENTS_BARREL_FILE.into(),
    })
}

fn properties() -> Option<MemberSlot> {
    Some(MemberSlot {
        option: "property".into(),
        default_type: "any".into(),
    })
}

fn internal_event(side: Side) -> GeneratorDescriptor {
    let dir_key = side.key("InternalEventsModulePath");

    producer(
        side.names("internal-event", "ie"),
        vec![dir_key.clone(), "eventsSpecPath".into()],
        &["name", "property"],
        ProducerSpec {
            target: TargetSpec {
                segments: vec![PathSegment::Config(dir_key)],
                file_name: NameTemplate::verbatim("{name}-event.ts"),
            },
            template: TemplateSpec {
                source: templates::INTERNAL_EVENT.into(),
                imports: vec![import("{EVENTS_SPEC_PATH}", "eventsSpecPath")],
                declaration: declaration("NewEvent", "{name}-event"),
                superclass: None,
                members: properties(),
            },
            variant: None,
            overwrite: Overwrite::Replace,
            aggregation: events_barrel(),
        },
    )
}

fn external_event(side: Side) -> GeneratorDescriptor {
    let dir_key = side.key("ExternalEventsModulePath");
    let internal_key = side.key("InternalEventsModulePath");

    producer(
        side.names("external-event", "ee"),
        vec![dir_key.clone(), "eventsSpecPath".into(), internal_key.clone()],
        &[],
        ProducerSpec {
            target: TargetSpec {
                segments: vec![PathSegment::Config(dir_key)],
                file_name: NameTemplate::verbatim("{name|extends}-event.ts"),
            },
            template: TemplateSpec {
                source: templates::EXTERNAL_EVENT.into(),
                imports: vec![import("{EVENTS_SPEC_PATH}", "eventsSpecPath")],
                declaration: declaration("NewEvent", "{name|extends}-event"),
                superclass: None,
                members: properties(),
            },
            variant: Some(VariantSpec {
                when_option: "extends".into(),
                template: TemplateSpec {
                    source: templates::EXTENDED_EXTERNAL_EVENT.into(),
                    imports: vec![import("{INTERNAL_EVENTS_MODULE_PATH}", internal_key)],
                    declaration: declaration("NewEvent", "{name|extends}-event"),
                    superclass: Some(SuperclassSlot {
                        namespace: Some("InternalEvents".into()),
                        name: NameTemplate::pascal("{extends}-event"),
                    }),
                    members: None,
                },
            }),
            overwrite: Overwrite::Replace,
            aggregation: events_barrel(),
        },
    )
}

fn external_event_handler(side: Side) -> GeneratorDescriptor {
    let dir_key = side.key("ControllersPath");
    let event = QualifiedTemplate {
        namespace: Some(side.peer_events_namespace().into()),
        name: NameTemplate::pascal("{event}-event"),
    };

    GeneratorDescriptor {
        names: side.names("external-event-handler", "eeh"),
        required_config: vec![dir_key.clone()],
        required_options: strings(&["name", "event"]),
        kind: GeneratorKind::Transformer(TransformerSpec {
            target: TargetSpec {
                segments: vec![PathSegment::Config(dir_key)],
                file_name: NameTemplate::verbatim("{name}-controller.ts"),
            },
            class_name: NameTemplate::pascal("{name}-controller"),
            method: MethodSpec {
                name: NameTemplate::camel("handle-{event}-event"),
                accessibility: Some(Accessibility::Private),
                decorator: Some(DecoratorSpec {
                    callee: "HandleExternalEvent".into(),
                    argument: Some(event.clone()),
                }),
                parameters: vec![ParameterSpec {
                    name: "event".into(),
                    type_annotation: event,
                }],
            },
        }),
    }
}

fn client_module() -> GeneratorDescriptor {
    let name_from_module = || {
        vec![OptionMapping {
            to: "name".into(),
            from: "module".into(),
        }]
    };

    GeneratorDescriptor {
        names: strings(&["client-module", "cmo"]),
        required_config: vec!["clientModulePath".into()],
        required_options: strings(&["module"]),
        kind: GeneratorKind::Composite(CompositeSpec {
            steps: vec![
                CompositeStep {
                    descriptor: client_module_descriptor(),
                    options: vec![],
                },
                CompositeStep {
                    descriptor: client_module_manager(),
                    options: name_from_module(),
                },
                CompositeStep {
                    descriptor: client_module_controller(),
                    options: name_from_module(),
                },
            ],
        }),
    }
}
