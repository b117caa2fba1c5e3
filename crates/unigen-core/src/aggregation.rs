//! File-level aggregation: barrels and module descriptors
//!
//! Reads the shared file, applies one idempotent splice from
//! [`unigen_ast`], and writes back only when the text changed.

use crate::error::{GeneratorError, Result};
use crate::fs::{read_to_string, write_string, FileSystem};
use crate::paths::relative_module_reference;
use std::path::Path;
use unigen_ast::{parse, SourceTree};

/// Contents of a freshly created barrel
pub const EMPTY_BARREL: &str = "export {}\n";

/// Register `name` (declared in `target`) in the barrel at `index`
///
/// A missing or blank barrel starts from [`EMPTY_BARREL`]. Returns `false` if
/// the name was already imported there.
///
/// # Errors
/// - `GeneratorError::StructuralMismatch` if the barrel does not end with an
///   export clause
/// - `GeneratorError::Io` / `GeneratorError::Ast` from reading or parsing
pub async fn append_to_barrel(
    fs: &dyn FileSystem,
    index: &Path,
    name: &str,
    target: &Path,
) -> Result<bool> {
    let existing = if fs.exists(index).await {
        Some(read_to_string(fs, index).await?)
    } else {
        None
    };

    let source = match existing {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            if let Some(dir) = index.parent() {
                fs.ensure_dir(dir)
                    .await
                    .map_err(|e| GeneratorError::io_error(dir, e))?;
            }
            tracing::info!("Seeding barrel {}", index.display());
            EMPTY_BARREL.to_string()
        }
    };

    let reference = relative_module_reference(index, target);
    apply(fs, index, &source, |tree| tree.add_barrel_export(name, &reference)).await
}

/// Register `name` (declared in `target`) under `property` of a module descriptor
///
/// Returns `false` if both the array entry and the import already existed.
///
/// # Errors
/// - `GeneratorError::StructuralMismatch` if the file has no single
///   exported `const X = call({ ... })` or the property is not an array
/// - `GeneratorError::PropertyNotFound` if the property is missing
pub async fn append_to_module_descriptor(
    fs: &dyn FileSystem,
    descriptor: &Path,
    property: &str,
    name: &str,
    target: &Path,
) -> Result<bool> {
    let reference = relative_module_reference(descriptor, target);
    let source = read_to_string(fs, descriptor).await?;
    apply(fs, descriptor, &source, |tree| {
        tree.register_in_module_descriptor(property, name, &reference)
    })
    .await
}

async fn apply<F>(fs: &dyn FileSystem, path: &Path, source: &str, edit: F) -> Result<bool>
where
    F: FnOnce(&mut SourceTree) -> std::result::Result<bool, unigen_ast::AstError>,
{
    let mut tree = parse(source).map_err(|e| GeneratorError::from_ast(path, e))?;

    if !edit(&mut tree).map_err(|e| GeneratorError::from_ast(path, e))? {
        tracing::debug!("{} already up to date", path.display());
        return Ok(false);
    }

    write_string(fs, path, tree.print()).await?;
    tracing::info!("Aggregated into {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fs::MemoryFileSystem;
    use pretty_assertions::assert_eq;

    const DESCRIPTOR: &str = "import { createClientSideModule } from '../spec/module';

export const LobbyModule = createClientSideModule({
\tcontrollers: [],
\tmanagers: [],
});
";

    #[tokio::test]
    async fn barrel_is_created_then_appended_once() {
        let fs = MemoryFileSystem::new();
        let index = Path::new("/proj/src/events/internal/index.ts");
        let target = Path::new("/proj/src/events/internal/join-event.ts");

        assert!(append_to_barrel(&fs, index, "JoinEvent", target).await.unwrap());
        assert!(!append_to_barrel(&fs, index, "JoinEvent", target).await.unwrap());

        assert_eq!(
            fs.file(index).unwrap(),
            "import { JoinEvent } from './join-event';\nexport { JoinEvent }\n"
        );
    }

    #[tokio::test]
    async fn unchanged_barrel_is_not_rewritten() {
        let fs = MemoryFileSystem::new();
        let index = Path::new("/e/index.ts");
        fs.insert_file(index, "import { A } from './a';\nexport { A }\n");

        append_to_barrel(&fs, index, "A", Path::new("/e/a.ts")).await.unwrap();
        assert_eq!(fs.write_count(), 0);
    }

    #[tokio::test]
    async fn blank_barrel_is_seeded() {
        let fs = MemoryFileSystem::new();
        let index = Path::new("/e/index.ts");
        fs.insert_file(index, "  \n\n");

        assert!(append_to_barrel(&fs, index, "JoinEvent", Path::new("/e/join-event.ts"))
            .await
            .unwrap());

        assert_eq!(
            fs.file(index).unwrap(),
            "import { JoinEvent } from './join-event';\nexport { JoinEvent }\n"
        );
        assert_eq!(fs.write_count(), 1);
    }

    #[tokio::test]
    async fn module_descriptor_registration() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/proj/src/lobby-module/module-export.ts");
        fs.insert_file(path, DESCRIPTOR);
        let target = Path::new("/proj/src/lobby-module/lobby-manager.ts");

        assert!(append_to_module_descriptor(&fs, path, "managers", "LobbyManager", target)
            .await
            .unwrap());
        assert!(!append_to_module_descriptor(&fs, path, "managers", "LobbyManager", target)
            .await
            .unwrap());

        let text = fs.file(path).unwrap();
        assert!(text.starts_with("import { LobbyManager } from './lobby-manager';\n"));
        assert!(text.contains("managers: [LobbyManager]"));
        assert!(text.contains("controllers: []"));
    }

    #[tokio::test]
    async fn missing_property_is_reported_with_path() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/m/module-export.ts");
        fs.insert_file(path, DESCRIPTOR);

        let err = append_to_module_descriptor(&fs, path, "handlers", "X", Path::new("/m/x.ts"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PropertyNotFound);
        assert_eq!(fs.file(path).unwrap(), DESCRIPTOR);
    }
}
