//! Registry modification operations.

/// A pending modification of a registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Append a new entry and import its symbol.
    Add {
        /// Entry name.
        name: String,
        /// Symbol the entry's callback invokes.
        symbol: String,
        /// Module path the symbol is imported from.
        module_path: String,
    },
    /// Remove an entry and its import if no other entry uses it.
    Remove {
        /// Entry name.
        name: String,
    },
}

impl Operation {
    /// Returns the entry name this operation targets.
    pub fn name(&self) -> &str {
        match self {
            Operation::Add { name, .. } => name,
            Operation::Remove { name } => name,
        }
    }

    /// Returns the operation type as a string.
    pub fn operation_type(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Remove { .. } => "remove",
        }
    }
}

/// Builder for creating operations fluently.
#[derive(Debug, Default)]
pub struct OperationBuilder {
    operations: Vec<Operation>,
}

impl OperationBuilder {
    /// Creates a new operation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an add operation.
    pub fn add(
        mut self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        module_path: impl Into<String>,
    ) -> Self {
        self.operations.push(Operation::Add {
            name: name.into(),
            symbol: symbol.into(),
            module_path: module_path.into(),
        });
        self
    }

    /// Adds a remove operation.
    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.operations.push(Operation::Remove { name: name.into() });
        self
    }

    /// Builds the list of operations.
    pub fn build(self) -> Vec<Operation> {
        self.operations
    }
}
