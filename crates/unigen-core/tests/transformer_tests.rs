//! Functional tests for transformer generators.
//!
//! Guarantees exercised here:
//! - A handler method is appended to the named class with its decorator and
//!   typed parameter, and everything else in the file is preserved.
//! - Appending is idempotent by method name.
//! - A missing file or class is reported and the file is left untouched.

use pretty_assertions::assert_eq;
use unigen_core::{ErrorKind, GeneratorError, GeneratorRegistry, MemoryFileSystem};
use unigen_test_utils::{builtin_registry, memory_fs, options, read, src};

async fn registry_with_controller(fs: &std::sync::Arc<MemoryFileSystem>) -> GeneratorRegistry {
    let mut registry = builtin_registry(fs.clone());
    registry
        .run("sc", options(&[("name", "lobby")]))
        .await
        .unwrap();
    registry
}

/// The server handler decorates with the client's external event.
#[tokio::test]
async fn handler_is_appended_after_constructor() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut registry = registry_with_controller(&fs).await;
    let before = read(&fs, "server/controllers/lobby-controller.ts");

    let report = registry
        .run("seeh", options(&[("name", "lobby"), ("event", "player-join")]))
        .await?;
    assert_eq!(report.written, vec![src("server/controllers/lobby-controller.ts")]);

    let after = read(&fs, "server/controllers/lobby-controller.ts");
    let expected = before.replace(
        "        super(eventBus);\n    }\n}",
        "        super(eventBus);
    }

    @HandleExternalEvent(ClientEvents.PlayerJoinEvent)
    private handlePlayerJoinEvent(event: ClientEvents.PlayerJoinEvent) {}
}",
    );
    assert_eq!(after, expected);
    Ok(())
}

/// A second identical invocation changes nothing on disk.
#[tokio::test]
async fn handler_append_is_idempotent() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut registry = registry_with_controller(&fs).await;
    let handler = || options(&[("name", "lobby"), ("event", "join")]);

    registry.run("seeh", handler()).await?;
    let writes = fs.write_count();
    let text = read(&fs, "server/controllers/lobby-controller.ts");

    let report = registry.run("seeh", handler()).await?;

    assert!(report.written.is_empty());
    assert_eq!(report.unchanged, vec![src("server/controllers/lobby-controller.ts")]);
    assert_eq!(fs.write_count(), writes);
    assert_eq!(read(&fs, "server/controllers/lobby-controller.ts"), text);
    assert_eq!(text.matches("handleJoinEvent").count(), 1);
    Ok(())
}

/// Several handlers stack up in invocation order.
#[tokio::test]
async fn handlers_accumulate_in_order() -> anyhow::Result<()> {
    let fs = memory_fs();
    let mut registry = builtin_registry(fs.clone());
    registry.run("cc", options(&[("name", "lobby")])).await?;

    for event in ["join", "leave"] {
        registry
            .run("ceeh", options(&[("name", "lobby"), ("event", event)]))
            .await?;
    }

    let text = read(&fs, "controllers/lobby-controller.ts");
    let join = text.find("private handleJoinEvent(event: ServerEvents.JoinEvent) {}");
    let leave = text.find("private handleLeaveEvent(event: ServerEvents.LeaveEvent) {}");
    assert!(join.is_some() && leave.is_some());
    assert!(join < leave);
    assert!(text.contains("@HandleExternalEvent(ServerEvents.LeaveEvent)"));
    Ok(())
}

/// No controller file: the error names the path and nothing is written.
#[tokio::test]
async fn missing_target_file() {
    let fs = memory_fs();
    let mut registry = builtin_registry(fs.clone());

    let err = registry
        .run("ceeh", options(&[("name", "ghost"), ("event", "join")]))
        .await
        .unwrap_err();

    match err {
        GeneratorError::TargetNotFound { path, declaration } => {
            assert_eq!(path, src("controllers/ghost-controller.ts"));
            assert_eq!(declaration, None);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs.write_count(), 0);
}

/// The file exists but does not export the expected class.
#[tokio::test]
async fn missing_target_class_leaves_file_untouched() {
    let fs = memory_fs();
    let original = "export class SomethingElse {\n}\n";
    fs.insert_file(src("controllers/join-controller.ts"), original);
    let mut registry = builtin_registry(fs.clone());

    let err = registry
        .run("ceeh", options(&[("name", "join"), ("event", "join")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TargetNotFound);
    assert!(matches!(
        err,
        GeneratorError::TargetNotFound { declaration: Some(ref name), .. } if name == "JoinController"
    ));
    assert_eq!(read(&fs, "controllers/join-controller.ts"), original);
    assert_eq!(fs.write_count(), 0);
}
