//! Structural editing of registry documents.
//!
//! A registry document is the `impl/index.ts` file of a problem: a block of
//! variant imports, a `testCases` re-export, and an `implementations` array
//! whose last element is the "latest" implementation.
//!
//! This module provides:
//! - Parsing a document into a [`RegistryModel`] of labelled regions
//! - Appending and removing entries together with their imports
//! - Queued batch editing through [`RegistryEditor`]
//!
//! Every edit is computed on the text in memory and yields a new model. Text
//! outside the edited regions is preserved byte for byte, so
//! `parse(text)?.serialize() == text` holds for any document the parser
//! accepts.
//!
//! # Example
//!
//! ```rust
//! use leetbox::registry::RegistryModel;
//!
//! let text = "export { testCases } from \"./testCases\";\n\
//!             export const implementations = [];\n";
//! let model = RegistryModel::parse(text)?;
//! assert!(model.is_empty());
//!
//! let model = model.add_entry("naive", "naiveVariant", "./variants/naive")?;
//! assert_eq!(model.latest().map(|e| e.name.as_str()), Some("naive"));
//! assert_eq!(model.imports()[0].module_path, "./variants/naive");
//! # Ok::<(), leetbox::Error>(())
//! ```

mod editor;
mod model;
mod mutate;
mod operation;
mod parser;
mod scan;

pub use editor::{EditResult, EditableRegistry, RegistryEditor};
pub use model::{Entry, ImportBinding, RegionKind, RegistryModel};
pub use mutate::{DEFAULT_INDENT, DEFAULT_PARAMS, Removal};
pub use operation::{Operation, OperationBuilder};
pub use parser::{DEFAULT_LIST_NAME, DEFAULT_MARKER, DEFAULT_VARIANTS_PREFIX, RegistrySyntax, parse};
