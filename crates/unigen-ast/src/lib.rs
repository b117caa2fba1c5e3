//! unigen AST Template Engine
//!
//! Parses TypeScript source into a [`SourceTree`] and mutates it through
//! structural queries instead of string substitution.
//!
//! # Core Concepts
//!
//! - [`parse`] / [`SourceTree::print`]: lossless round trip. Printing an
//!   untouched tree reproduces the input byte-for-byte.
//! - Structural addressing: imports by index or source literal, declarations
//!   and classes by identifier name.
//! - Splices: every mutation rewrites one byte range and reparses
//!   incrementally, so regions outside the range keep their exact formatting.
//! - Aggregation: idempotent barrel re-exports and module-descriptor array
//!   registration.
//!
//! # Example
//!
//! ```rust,ignore
//! use unigen_ast::{parse, ImportSelector};
//!
//! let mut tree = parse("import { Base } from '{BASE}';\nexport class NewThing extends Base {}\n")?;
//! tree.replace_import_source(&ImportSelector::Source("{BASE}".into()), "../spec/base")?;
//! tree.rename_declaration("NewThing", "LobbyThing")?;
//! println!("{}", tree.print());
//! ```

#![warn(unreachable_pub)]

mod aggregate;
mod edit;
mod error;
mod member;
mod parser;
mod tree;

pub use error::AstError;
pub use member::{Accessibility, ClassMember, Decorator, Parameter, QualifiedName};
pub use parser::parse;
pub use tree::{ClassInfo, DeclarationInfo, DeclarationKind, ImportInfo, ImportSelector, SourceTree};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANAGER_TEMPLATE: &str = r"
import { inject, injectable } from 'inversify';
import { ClientSideManager } from '{CLIENT_MANAGER_SPEC_PATH}';

import * as Events from '{INTERNAL_EVENTS_MODULE_PATH}';

@injectable()
export class NewManager extends ClientSideManager {
    constructor() {
        super();
    }
}
";

    #[test]
    fn template_slots_fill_without_touching_surroundings() {
        let mut tree = parse(MANAGER_TEMPLATE).unwrap();

        tree.replace_import_source(
            &ImportSelector::Source("{CLIENT_MANAGER_SPEC_PATH}".into()),
            "../spec/manager",
        )
        .unwrap();
        tree.replace_import_source(
            &ImportSelector::Source("{INTERNAL_EVENTS_MODULE_PATH}".into()),
            "../events/internal",
        )
        .unwrap();
        tree.rename_declaration("NewManager", "LobbyManager").unwrap();

        let expected = MANAGER_TEMPLATE
            .replace("{CLIENT_MANAGER_SPEC_PATH}", "../spec/manager")
            .replace("{INTERNAL_EVENTS_MODULE_PATH}", "../events/internal")
            .replace("NewManager", "LobbyManager");
        assert_eq!(tree.print(), expected);
        assert!(tree.find_exported_class("LobbyManager").is_ok());
    }

    #[test]
    fn untouched_template_round_trips() {
        let tree = parse(MANAGER_TEMPLATE).unwrap();
        assert_eq!(tree.print(), MANAGER_TEMPLATE);
    }
}
