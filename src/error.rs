//! Error types for registry and workspace operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when reading, editing or scaffolding a leetbox workspace,
//! along with a convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. You can
//! handle errors using pattern matching or the `?` operator:
//!
//! ```rust
//! use leetbox::registry::RegistryModel;
//! use leetbox::Error;
//!
//! fn entry_names(text: &str) -> leetbox::Result<Vec<String>> {
//!     let model = RegistryModel::parse(text)?;
//!     Ok(model.entries().iter().map(|e| e.name.clone()).collect())
//! }
//!
//! match entry_names("const x = 1;") {
//!     Err(Error::MissingEntryList { .. }) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Error Categories
//!
//! | Category | Variants | Typical Cause |
//! |----------|----------|---------------|
//! | Parse | [`MissingEntryList`][Error::MissingEntryList], [`UnbalancedDelimiters`][Error::UnbalancedDelimiters] | Registry hand-edited into an unrecognized shape |
//! | Mutation | [`DuplicateName`][Error::DuplicateName], [`NotFound`][Error::NotFound], [`SymbolConflict`][Error::SymbolConflict] | Edit precondition violated |
//! | Workspace | [`InvalidName`][Error::InvalidName], [`ProblemExists`][Error::ProblemExists], [`ProblemNotFound`][Error::ProblemNotFound], [`VariantFileExists`][Error::VariantFileExists], [`ToolNotFound`][Error::ToolNotFound] | Scaffolding and lookup |
//! | I/O | [`Io`][Error::Io] | File system operations |
//!
//! Parse and mutation failures never leave a partially written document
//! behind: the new text is computed fully in memory before any write.

use std::io;
use std::path::PathBuf;

/// The main error type for leetbox operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    ///
    /// Storage failures are propagated unchanged. Registry documents are only
    /// ever replaced as a whole after the new text has been computed, so a
    /// failed write leaves the original document intact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No entry list declaration could be located in the registry document.
    ///
    /// The document is presumed to have been hand-edited into a shape the
    /// editor does not recognize and needs a manual fix.
    #[error("Could not locate the `{list_name}` array in the registry document")]
    MissingEntryList {
        /// Name of the declaration that was searched for.
        list_name: String,
    },

    /// Bracket matching did not close the entry list before end of text,
    /// or a closing delimiter did not match the innermost open one.
    #[error("Unbalanced delimiters in the registry document at byte offset {offset}")]
    UnbalancedDelimiters {
        /// Byte offset where matching failed.
        offset: usize,
    },

    /// An entry with this name already exists in the entry list.
    #[error("An implementation named \"{name}\" is already registered")]
    DuplicateName {
        /// The conflicting entry name.
        name: String,
    },

    /// No entry with this name exists in the entry list.
    #[error("No implementation named \"{name}\" is registered")]
    NotFound {
        /// The requested entry name.
        name: String,
    },

    /// The symbol is already imported from a different module path.
    #[error("Symbol `{symbol}` is already imported from \"{existing}\"")]
    SymbolConflict {
        /// The imported symbol.
        symbol: String,
        /// Module path of the existing import.
        existing: String,
    },

    /// User input could not be normalized into an identifier.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// A problem directory with this name already exists.
    #[error("Problem already exists: {}", path.display())]
    ProblemExists {
        /// The existing problem directory.
        path: PathBuf,
    },

    /// The requested problem does not exist in the workspace.
    #[error("Problem not found: {name}")]
    ProblemNotFound {
        /// The requested problem name.
        name: String,
    },

    /// The backing file for a new variant already exists.
    #[error("Variant file already exists: {}", path.display())]
    VariantFileExists {
        /// The existing variant file.
        path: PathBuf,
    },

    /// An external tool needed to run a problem could not be found.
    #[error("Tool not found: {}", path.display())]
    ToolNotFound {
        /// The path that was probed.
        path: PathBuf,
    },
}

impl Error {
    /// Returns whether this error means the registry document's structure
    /// could not be recognized.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingEntryList { .. } | Error::UnbalancedDelimiters { .. }
        )
    }

    /// Returns whether this error is a violated edit precondition.
    pub fn is_mutation_failure(&self) -> bool {
        matches!(
            self,
            Error::DuplicateName { .. } | Error::NotFound { .. } | Error::SymbolConflict { .. }
        )
    }
}

/// A specialized Result type for leetbox operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::UnbalancedDelimiters { offset: 3 }.is_parse_failure());
        assert!(
            Error::MissingEntryList {
                list_name: "implementations".into()
            }
            .is_parse_failure()
        );
        assert!(Error::NotFound { name: "x".into() }.is_mutation_failure());
        assert!(!Error::NotFound { name: "x".into() }.is_parse_failure());
        assert!(!Error::InvalidName("!!".into()).is_mutation_failure());
    }

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateName { name: "map".into() };
        assert_eq!(
            err.to_string(),
            "An implementation named \"map\" is already registered"
        );

        let err = Error::UnbalancedDelimiters { offset: 42 };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
