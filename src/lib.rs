//! # leetbox
//!
//! Workspace tooling for collections of algorithm problems, each solved by
//! several competing implementations ("variants").
//!
//! Every problem keeps its variants in a small TypeScript registry document
//! (`impl/index.ts`). The last entry of its `implementations` array is the
//! "latest" implementation, and every entry is benchmarked by `compare.ts`.
//! This crate edits that document structurally: it never rewrites text it
//! did not need to touch, and it refuses to write anything when the document
//! is not in a shape it recognizes.
//!
//! ## Quick Start
//!
//! ### Editing a Registry Document
//!
//! ```rust
//! use leetbox::{RegistryModel, Result};
//!
//! fn main() -> Result<()> {
//!     let text = r#"import { naiveVariant } from "./variants/naive";
//! export { testCases } from "./testCases";
//!
//! export const implementations = [
//!   { name: "naive", fn: (arr: number[], target: number) => naiveVariant(arr, target) },
//! ];
//! "#;
//!
//!     let model = RegistryModel::parse(text)?;
//!     let model = model.add_entry("map", "mapVariant", "./variants/map")?;
//!     assert_eq!(model.latest().unwrap().name, "map");
//!
//!     let removal = model.remove_entry("naive")?;
//!     assert_eq!(removal.orphaned_module.as_deref(), Some("./variants/naive"));
//!     assert_eq!(removal.model.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ### Scaffolding Problems and Variants
//!
//! ```rust,no_run
//! use leetbox::{ProblemScaffold, ReturnKind, Workspace, Result};
//!
//! fn main() -> Result<()> {
//!     let workspace = Workspace::new(".");
//!     let problem = workspace.add_problem(&ProblemScaffold::new("Two Sum", None)?)?;
//!
//!     let added = problem.add_variant("hash map", ReturnKind::Scalar)?;
//!     println!("created {}", added.file.display());
//!
//!     problem.remove_variant("naive")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, Error>`. Parse failures and violated edit
//! preconditions can be told apart with [`Error::is_parse_failure`] and
//! [`Error::is_mutation_failure`]:
//!
//! ```rust
//! use leetbox::{Error, RegistryModel};
//!
//! let model = RegistryModel::parse("const implementations = [];").unwrap();
//! match model.remove_entry("missing") {
//!     Err(e) if e.is_mutation_failure() => {}
//!     other => panic!("unexpected: {:?}", other.map(|r| r.entry)),
//! }
//! ```
//!
//! ## Logging
//!
//! The library logs through the [`log`](https://docs.rs/log) facade. The
//! `leetbox` binary installs a `tracing-subscriber` backend controlled by
//! `-v` and `RUST_LOG`.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod naming;
pub mod picker;
pub mod registry;
pub mod runner;
pub mod scaffold;
pub mod workspace;

pub use error::{Error, Result};

pub use registry::{EditResult, Entry, ImportBinding, RegistryEditor, RegistryModel, RegistrySyntax, Removal};

pub use naming::{VariantName, to_camel_case};

pub use scaffold::{ProblemScaffold, ReturnHint, ReturnKind, VariantScaffold, detect_return_hint};

pub use picker::{PickerEvent, PickerState, Step};

pub use workspace::{AddedVariant, Problem, RemovedVariant, VariantInfo, Workspace, write_atomic};

pub use runner::{RunTarget, Runner};
