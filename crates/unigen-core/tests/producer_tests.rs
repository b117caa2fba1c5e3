//! Functional tests for producer generators.
//!
//! Guarantees exercised here:
//! - Rendered files carry import paths relative to the target file and
//!   declarations named from options.
//! - Barrel aggregation is idempotent across repeated runs.
//! - Validation reports every missing key at once and writes nothing.

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use unigen_core::{builtin, ErrorKind, GeneratorDescriptor, Generator, GeneratorError, GeneratorState};
use unigen_test_utils::{config_with, memory_fs, options, read, shared_config, src};

fn builtin_descriptor(name: &str) -> GeneratorDescriptor {
    builtin::all()
        .into_iter()
        .find(|d| d.names.iter().any(|n| n == name))
        .unwrap()
}

fn generator(name: &str, fs: Arc<unigen_core::MemoryFileSystem>) -> Generator {
    Generator::new(builtin_descriptor(name), shared_config(), fs).unwrap()
}

/// A client manager lands in the managers directory with both imports
/// rewritten relative to the new file.
#[tokio::test]
async fn client_manager_is_rendered_from_template() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut manager = generator("cm", fs.clone());

    manager.set_option(options(&[("name", "lobby")]))?;
    assert_eq!(manager.state(), GeneratorState::Optioned);
    assert_eq!(manager.target_path()?, Some(src("managers/lobby-manager.ts")));

    let report = manager.generate().await?;

    assert_eq!(report.written, vec![src("managers/lobby-manager.ts")]);
    assert!(report.aggregated.is_empty());
    assert_eq!(manager.state(), GeneratorState::Done);
    assert_eq!(
        read(&fs, "managers/lobby-manager.ts"),
        "import { inject, injectable } from 'inversify';
import { ClientSideManager } from '../spec/manager';

import * as Events from '../events/internal';

@injectable()
export class LobbyManager extends ClientSideManager {
    constructor() {
        super();
    }
}
"
    );
    Ok(())
}

/// Server managers live in their module directory.
#[tokio::test]
async fn server_manager_uses_module_segment() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut manager = generator("sm", fs.clone());

    manager.set_option(options(&[("name", "match-maker"), ("module", "game")]))?;
    manager.generate().await?;

    let text = read(&fs, "server/modules/game/match-maker-manager.ts");
    assert!(text.contains("import { ServerSideManager } from '../../spec/manager';"));
    assert!(text.contains("import * as Events from '../../events/internal';"));
    assert!(text.contains("export class MatchMakerManager extends ServerSideManager {"));
    Ok(())
}

/// Controllers import both sides' external events and the event bus.
#[tokio::test]
async fn client_controller_imports_every_module() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut controller = generator("cc", fs.clone());

    controller.set_option(options(&[("name", "lobby")]))?;
    controller.generate().await?;

    let text = read(&fs, "controllers/lobby-controller.ts");
    for line in [
        "import * as Events from '../events/internal';",
        "import * as ExternalEvents from '../events/external';",
        "import * as ServerEvents from '../server/events/external';",
        "import { EventBusClient } from '../spec/event-bus-client';",
        "import { HandleExternalEvent } from '../spec/events';",
        "import { ClientSideController } from '../spec/controller';",
        "export class LobbyController extends ClientSideController {",
        "    constructor(@inject(EventBusClient) eventBus: EventBusClient) {",
    ] {
        assert!(text.contains(line), "missing `{line}` in:\n{text}");
    }
    Ok(())
}

/// Internal events get typed properties and a barrel entry; a second event
/// is prepended to the imports and appended to the export clause.
#[tokio::test]
async fn internal_events_are_collected_in_barrel() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut event = generator("cie", fs.clone());

    event.set_option(options(&[("name", "join"), ("property", "user-id:string,score:number")]))?;
    let report = event.generate().await?;
    assert_eq!(report.aggregated, vec![src("events/internal/index.ts")]);

    event.set_option(options(&[("name", "leave"), ("property", "reason")]))?;
    event.generate().await?;

    assert_eq!(
        read(&fs, "events/internal/join-event.ts"),
        "import { InternalEvent } from '../../spec/events';

export class JoinEvent extends InternalEvent {
    userId: string;
    score: number;
}
"
    );
    assert!(read(&fs, "events/internal/leave-event.ts").contains("    reason: any;\n"));
    assert_eq!(
        read(&fs, "events/internal/index.ts"),
        "import { LeaveEvent } from './leave-event';
import { JoinEvent } from './join-event';
export { JoinEvent, LeaveEvent }
"
    );
    Ok(())
}

/// Running the same producer twice rewrites the target but leaves the
/// barrel exactly as it was.
#[tokio::test]
async fn repeated_run_does_not_duplicate_barrel_entry() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut event = generator("sie", fs.clone());

    for _ in 0..2 {
        event.set_option(options(&[("name", "tick"), ("property", "at:number")]))?;
        event.generate().await?;
    }

    let index = read(&fs, "server/events/internal/index.ts");
    assert_eq!(index.matches("TickEvent").count(), 2);
    assert_eq!(
        index,
        "import { TickEvent } from './tick-event';\nexport { TickEvent }\n"
    );
    Ok(())
}

/// An external event extending an internal one imports the internal module
/// as a namespace.
#[tokio::test]
async fn external_event_extends_internal_event() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut event = generator("cee", fs.clone());

    event.set_option(options(&[("extends", "join")]))?;
    event.generate().await?;

    assert_eq!(
        read(&fs, "events/external/join-event.ts"),
        "import * as InternalEvents from '../internal';

export class JoinEvent extends InternalEvents.JoinEvent {
}
"
    );
    assert!(read(&fs, "events/external/index.ts").contains("export { JoinEvent }"));
    Ok(())
}

/// Without `extends` the external event derives from `ExternalEvent`.
#[tokio::test]
async fn external_event_without_extends() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut event = generator("see", fs.clone());

    event.set_option(options(&[("name", "kick"), ("property", "player:string")]))?;
    event.generate().await?;

    let text = read(&fs, "server/events/external/kick-event.ts");
    assert!(text.starts_with("import { ExternalEvent } from '../../../spec/events';"));
    assert!(text.contains("export class KickEvent extends ExternalEvent {\n    player: string;\n}"));
    Ok(())
}

/// Missing configuration is reported in full at construction.
#[test]
fn missing_config_lists_every_key() {
    let config = config_with(&[
        ("clientManagerSpecPath", Value::Null),
        ("clientInternalEventsModulePath", Value::Null),
    ]);

    let err = Generator::new(builtin_descriptor("cm"), Arc::new(config), memory_fs()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingConfig);
    assert_eq!(
        err.missing_keys(),
        &["clientManagerSpecPath".to_string(), "clientInternalEventsModulePath".to_string()]
    );
}

/// Missing options are reported in full and nothing is written.
#[tokio::test]
async fn missing_options_write_nothing() {
    let fs = memory_fs();
    let mut event = generator("cie", fs.clone());

    let err = event.set_option(options(&[])).unwrap_err();
    assert_eq!(err.missing_keys(), &["name".to_string(), "property".to_string()]);

    let err = event.generate().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingOption);
    assert_eq!(fs.write_count(), 0);
}

/// An unknown property type fails before the target is written.
#[tokio::test]
async fn invalid_property_type_is_rejected() {
    let fs = memory_fs();
    let mut event = generator("cie", fs.clone());

    event
        .set_option(options(&[("name", "join"), ("property", "at:date")]))
        .unwrap();
    let err = event.generate().await.unwrap_err();

    assert!(matches!(err, GeneratorError::InvalidOption { ref key, .. } if key == "property"));
    assert_eq!(event.state(), GeneratorState::Failed);
    assert!(fs.files().is_empty());
}
