//! Batch editor for registry documents.

use crate::{Error, Result};

use super::model::{Entry, RegistryModel};
use super::mutate::validate_entry;
use super::operation::Operation;

/// Result of applying queued operations.
#[must_use = "edit result carries the new document text, which must be written back"]
#[derive(Debug, Clone)]
pub struct EditResult {
    /// Number of entries appended.
    pub entries_added: usize,
    /// Number of entries removed.
    pub entries_removed: usize,
    /// Number of import lines inserted.
    pub imports_added: usize,
    /// Number of import lines deleted.
    pub imports_removed: usize,
    /// Module paths whose imports were deleted, in removal order.
    pub orphaned_modules: Vec<String>,
    /// Entries removed, as they were parsed before their removal.
    pub removed_entries: Vec<Entry>,
    /// The edited document.
    pub model: RegistryModel,
}

impl EditResult {
    /// Returns the edited document text.
    pub fn text(&self) -> &str {
        self.model.source()
    }

    /// Returns whether any operation changed the document.
    pub fn is_changed(&self) -> bool {
        self.entries_added + self.entries_removed > 0
    }
}

/// An editor for registry documents.
///
/// Operations are validated when queued and only applied when `apply` is
/// called. Each operation sees the document as left by the ones before it.
///
/// # Example
///
/// ```rust
/// use leetbox::registry::{RegistryEditor, RegistryModel};
///
/// let text = "import { naiveVariant } from \"./variants/naive\";\n\
///             export { testCases } from \"./testCases\";\n\
///             export const implementations = [\n  \
///             { name: \"naive\", fn: (arr: number[], target: number) => naiveVariant(arr, target) },\n];\n";
///
/// let mut editor = RegistryEditor::new(RegistryModel::parse(text)?);
/// editor.add("map", "mapVariant", "./variants/map")?;
/// editor.remove("naive")?;
///
/// let result = editor.apply()?;
/// assert_eq!(result.orphaned_modules, vec!["./variants/naive".to_string()]);
/// assert_eq!(result.model.latest().unwrap().name, "map");
/// # Ok::<(), leetbox::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RegistryEditor {
    model: RegistryModel,
    operations: Vec<Operation>,
}

impl RegistryEditor {
    /// Creates a new editor for the given document.
    pub fn new(model: RegistryModel) -> Self {
        Self {
            model,
            operations: Vec::new(),
        }
    }

    /// Returns the document the editor was created with.
    pub fn model(&self) -> &RegistryModel {
        &self.model
    }

    /// Returns the number of pending operations.
    pub fn pending_operations(&self) -> usize {
        self.operations.len()
    }

    /// Returns whether there are any pending operations.
    pub fn has_pending_operations(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Clears all pending operations.
    pub fn clear_operations(&mut self) {
        self.operations.clear();
    }

    /// Queues an add operation.
    ///
    /// Fails with [`Error::InvalidName`] if the entry cannot be written, or
    /// with [`Error::DuplicateName`] if the name will exist at this point of
    /// the queue.
    pub fn add(&mut self, name: &str, symbol: &str, module_path: &str) -> Result<()> {
        validate_entry(name, symbol, module_path)?;
        if self.entry_exists(name) {
            return Err(Error::DuplicateName {
                name: name.to_string(),
            });
        }

        self.operations.push(Operation::Add {
            name: name.to_string(),
            symbol: symbol.to_string(),
            module_path: module_path.to_string(),
        });
        Ok(())
    }

    /// Queues a remove operation.
    ///
    /// Fails with [`Error::NotFound`] if the name will not exist at this
    /// point of the queue.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if !self.entry_exists(name) {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }

        self.operations.push(Operation::Remove {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Queues a list of operations, validating each in turn.
    pub fn extend(&mut self, operations: impl IntoIterator<Item = Operation>) -> Result<()> {
        for op in operations {
            match op {
                Operation::Add {
                    name,
                    symbol,
                    module_path,
                } => self.add(&name, &symbol, &module_path)?,
                Operation::Remove { name } => self.remove(&name)?,
            }
        }
        Ok(())
    }

    /// Applies all pending operations in queue order.
    ///
    /// Nothing is written; the caller persists [`EditResult::text`].
    pub fn apply(self) -> Result<EditResult> {
        let mut result = EditResult {
            entries_added: 0,
            entries_removed: 0,
            imports_added: 0,
            imports_removed: 0,
            orphaned_modules: Vec::new(),
            removed_entries: Vec::new(),
            model: self.model,
        };

        for op in &self.operations {
            log::debug!("applying {} \"{}\"", op.operation_type(), op.name());
            match op {
                Operation::Add {
                    name,
                    symbol,
                    module_path,
                } => {
                    let before = result.model.imports().len();
                    result.model = result.model.add_entry(name, symbol, module_path)?;
                    result.imports_added += result.model.imports().len().saturating_sub(before);
                    result.entries_added += 1;
                }
                Operation::Remove { name } => {
                    let removal = result.model.remove_entry(name)?;
                    if let Some(module) = removal.orphaned_module {
                        result.imports_removed += 1;
                        result.orphaned_modules.push(module);
                    }
                    result.model = removal.model;
                    result.removed_entries.push(removal.entry);
                    result.entries_removed += 1;
                }
            }
        }

        Ok(result)
    }

    /// Returns whether the name exists once pending operations are applied.
    fn entry_exists(&self, name: &str) -> bool {
        let mut exists = self.model.entry(name).is_some();
        for op in self.operations.iter().filter(|op| op.name() == name) {
            exists = matches!(op, Operation::Add { .. });
        }
        exists
    }
}

/// Trait extension for registry models to enable editing.
pub trait EditableRegistry: Sized {
    /// Creates an editor for this document.
    fn edit(self) -> RegistryEditor;
}

impl EditableRegistry for RegistryModel {
    fn edit(self) -> RegistryEditor {
        RegistryEditor::new(self)
    }
}
