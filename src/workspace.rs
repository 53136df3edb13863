//! Problem and variant workflows on a leetbox workspace.
//!
//! A workspace is a directory with a `problems/` folder. Each problem
//! folder holds two entry points and an `impl/` folder with the registry
//! document, its test cases and one file per variant:
//!
//! ```text
//! problems/<short>/index.ts
//! problems/<short>/compare.ts
//! problems/<short>/impl/index.ts
//! problems/<short>/impl/testCases.ts
//! problems/<short>/impl/variants/<name>.ts
//! ```
//!
//! Registry documents are always replaced as a whole: the new text is
//! computed in memory, written to a sibling `.tmp` file and renamed over the
//! original.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::naming::VariantName;
use crate::registry::{EditableRegistry, Entry, RegistryModel, RegistrySyntax};
use crate::scaffold::{ProblemScaffold, ReturnHint, ReturnKind, VariantScaffold, detect_return_hint};
use crate::{Error, Result};

/// Name of the folder holding all problems.
pub const PROBLEMS_DIR: &str = "problems";

/// Writes `contents` to `path` through a temporary sibling file.
///
/// The original file is only replaced once the temporary file has been
/// fully written; a failed write leaves it untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let temp_path = path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }
    fs::rename(&temp_path, path).map_err(Error::Io)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// A leetbox workspace rooted at a directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    syntax: RegistrySyntax,
}

impl Workspace {
    /// Creates a workspace handle for `root`. Nothing is read until needed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            syntax: RegistrySyntax::default(),
        }
    }

    /// Sets the registry syntax used for every problem.
    pub fn with_syntax(mut self, syntax: RegistrySyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `problems/` folder.
    pub fn problems_dir(&self) -> PathBuf {
        self.root.join(PROBLEMS_DIR)
    }

    /// Lists problem folder names in sorted order.
    ///
    /// A missing `problems/` folder yields an empty list.
    pub fn problems(&self) -> Result<Vec<String>> {
        let dir = self.problems_dir();
        let read = match fs::read_dir(&dir) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no problems folder at {}", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut names = Vec::new();
        for entry in read {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Opens an existing problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProblemNotFound`] if there is no such problem folder.
    pub fn problem(&self, name: &str) -> Result<Problem> {
        let root = self.problem_root(name)?;
        if !root.is_dir() {
            return Err(Error::ProblemNotFound {
                name: name.to_string(),
            });
        }
        Ok(Problem {
            name: name.to_string(),
            root,
            syntax: self.syntax.clone(),
        })
    }

    /// Creates a problem folder from a scaffold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProblemExists`] if the folder already exists. No
    /// file is written in that case.
    pub fn add_problem(&self, scaffold: &ProblemScaffold) -> Result<Problem> {
        let root = self.problem_root(&scaffold.short_name)?;
        if root.exists() {
            return Err(Error::ProblemExists { path: root });
        }

        for (relative, contents) in scaffold.files() {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            log::info!("created {}", path.display());
        }

        self.problem(&scaffold.short_name)
    }

    /// Deletes a problem folder and everything in it.
    ///
    /// Returns the deleted folder.
    pub fn remove_problem(&self, name: &str) -> Result<PathBuf> {
        let problem = self.problem(name)?;
        fs::remove_dir_all(&problem.root)?;
        log::info!("removed {}", problem.root.display());
        Ok(problem.root)
    }

    fn problem_root(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::InvalidName(format!("{:?} is not a problem name", name)));
        }
        Ok(self.problems_dir().join(name))
    }
}

/// A row of the variant picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantInfo {
    /// Entry name.
    pub name: String,
    /// Symbol the entry invokes.
    pub symbol: String,
    /// Import path of the symbol, if it is imported.
    pub module_path: Option<String>,
    /// Backing file resolved from the import path.
    pub file: Option<PathBuf>,
}

impl VariantInfo {
    /// Returns a one-line label such as `map  (map.ts)`.
    pub fn label(&self) -> String {
        let file = self
            .file
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "unknown file".to_string(), |f| f.to_string_lossy().into_owned());
        format!("{}  ({})", self.name, file)
    }
}

/// Outcome of [`Problem::add_variant`].
#[derive(Debug, Clone)]
pub struct AddedVariant {
    /// The normalized variant name.
    pub name: VariantName,
    /// The created backing file.
    pub file: PathBuf,
    /// Return type written into the backing file.
    pub return_kind: ReturnKind,
    /// The updated registry document.
    pub registry: PathBuf,
}

/// Outcome of [`Problem::remove_variant`].
#[derive(Debug, Clone)]
pub struct RemovedVariant {
    /// The removed entry.
    pub entry: Entry,
    /// The updated registry document.
    pub registry: PathBuf,
    /// The backing file that was deleted.
    pub deleted_file: Option<PathBuf>,
    /// The backing file the import pointed to but which did not exist.
    pub missing_file: Option<PathBuf>,
}

/// A problem folder in a workspace.
#[derive(Debug, Clone)]
pub struct Problem {
    name: String,
    root: PathBuf,
    syntax: RegistrySyntax,
}

impl Problem {
    /// Returns the problem's folder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the problem folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `impl/` folder.
    pub fn impl_dir(&self) -> PathBuf {
        self.root.join("impl")
    }

    /// Returns the registry document path.
    pub fn registry_path(&self) -> PathBuf {
        self.impl_dir().join("index.ts")
    }

    /// Returns the test cases path.
    pub fn test_cases_path(&self) -> PathBuf {
        self.impl_dir().join("testCases.ts")
    }

    /// Returns the folder holding variant files.
    pub fn variants_dir(&self) -> PathBuf {
        self.impl_dir().join("variants")
    }

    /// Returns the entry point of a run target.
    pub fn script_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Reads and parses the registry document.
    pub fn load_registry(&self) -> Result<RegistryModel> {
        let text = fs::read_to_string(self.registry_path())?;
        RegistryModel::parse_with(&text, self.syntax.clone())
    }

    /// Resolves an import path to its backing file.
    ///
    /// Only a single plain file name under the variants prefix is resolved.
    /// Anything that could point outside the variants folder, such as
    /// `./variants/../testCases`, resolves to `None`.
    pub fn module_file(&self, module_path: &str) -> Option<PathBuf> {
        let base = module_path.strip_prefix(&self.syntax.variants_prefix)?;
        if base.contains(['/', '\\']) {
            return None;
        }
        let mut components = Path::new(base).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return None,
        }

        let file = if base.ends_with(".ts") {
            base.to_string()
        } else {
            format!("{base}.ts")
        };
        Some(self.variants_dir().join(file))
    }

    /// Lists the registered variants in registry order.
    pub fn variants(&self) -> Result<Vec<VariantInfo>> {
        let model = self.load_registry()?;
        Ok(model
            .entries()
            .iter()
            .map(|entry| {
                let module_path = model.module_path_of(entry).map(str::to_string);
                let file = module_path.as_deref().and_then(|m| self.module_file(m));
                VariantInfo {
                    name: entry.name.clone(),
                    symbol: entry.symbol.clone(),
                    module_path,
                    file,
                }
            })
            .collect())
    }

    /// Detects the return type from the test cases.
    ///
    /// A missing test cases file gives [`ReturnHint::Unknown`].
    pub fn return_hint(&self) -> Result<ReturnHint> {
        match fs::read_to_string(self.test_cases_path()) {
            Ok(text) => Ok(detect_return_hint(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ReturnHint::Unknown),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Scaffolds a new variant and registers it as the latest entry.
    ///
    /// The registry text is computed before anything is written, so a
    /// duplicate name or an unparseable registry leaves the folder
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if `raw_name` normalizes to nothing.
    /// - [`Error::VariantFileExists`] if the backing file already exists.
    /// - Any parse or mutation failure of the registry.
    pub fn add_variant(&self, raw_name: &str, fallback: ReturnKind) -> Result<AddedVariant> {
        let name = VariantName::new(raw_name)?;
        let file = self.variants_dir().join(name.file_name());
        if file.exists() {
            return Err(Error::VariantFileExists { path: file });
        }

        let registry = self.registry_path();
        let mut editor = self.load_registry()?.edit();
        editor.add(name.as_str(), &name.symbol(), &name.module_path(&self.syntax))?;
        let updated = editor.apply()?;

        let return_kind = self.return_hint()?.resolve(fallback);
        let source = VariantScaffold {
            variant_symbol: name.symbol(),
            return_kind,
        }
        .render();

        fs::create_dir_all(self.variants_dir())?;
        fs::write(&file, source)?;
        log::info!("created {}", file.display());
        write_atomic(&registry, updated.text())?;

        Ok(AddedVariant {
            name,
            file,
            return_kind,
            registry,
        })
    }

    /// Unregisters a variant and deletes its backing file.
    ///
    /// The backing file is found through the import of the entry's symbol.
    /// It is only deleted when the import was removed too, and a file that
    /// is already gone is not an error.
    pub fn remove_variant(&self, name: &str) -> Result<RemovedVariant> {
        let registry = self.registry_path();
        let mut editor = self.load_registry()?.edit();
        editor.remove(name)?;
        let mut result = editor.apply()?;
        let entry = result.removed_entries.pop().ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;
        write_atomic(&registry, result.text())?;

        let orphaned = result.orphaned_modules.pop();
        if let Some(module) = orphaned.as_deref().filter(|m| self.module_file(m).is_none()) {
            log::warn!("not deleting {:?}: it does not name a file in the variants folder", module);
        }

        let mut deleted_file = None;
        let mut missing_file = None;
        if let Some(file) = orphaned.as_deref().and_then(|m| self.module_file(m)) {
            match fs::remove_file(&file) {
                Ok(()) => {
                    log::info!("deleted {}", file.display());
                    deleted_file = Some(file);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::warn!("variant file {} is already missing", file.display());
                    missing_file = Some(file);
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }

        Ok(RemovedVariant {
            entry,
            registry,
            deleted_file,
            missing_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace_with_problem() -> (TempDir, Workspace, Problem) {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        let scaffold = ProblemScaffold::new("Two Sum", None).unwrap();
        let problem = workspace.add_problem(&scaffold).unwrap();
        (dir, workspace, problem)
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.ts");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("index.ts.tmp").exists());
    }

    #[test]
    fn test_write_atomic_failure_keeps_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("index.ts");
        assert!(write_atomic(&path, "new").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_problems_sorted_and_missing_dir() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        assert!(workspace.problems().unwrap().is_empty());

        for name in ["twoSum", "binarySearch"] {
            fs::create_dir_all(workspace.problems_dir().join(name)).unwrap();
        }
        fs::write(workspace.problems_dir().join("README.md"), "").unwrap();
        assert_eq!(workspace.problems().unwrap(), vec!["binarySearch", "twoSum"]);
    }

    #[test]
    fn test_add_problem_twice() {
        let (_dir, workspace, problem) = workspace_with_problem();
        assert_eq!(problem.name(), "twoSum");
        assert!(problem.registry_path().is_file());
        assert!(problem.variants_dir().join("naive.ts").is_file());

        let scaffold = ProblemScaffold::new("Two Sum", None).unwrap();
        assert!(matches!(
            workspace.add_problem(&scaffold),
            Err(Error::ProblemExists { .. })
        ));
    }

    #[test]
    fn test_problem_name_validation() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        assert!(matches!(workspace.problem("../x"), Err(Error::InvalidName(_))));
        assert!(matches!(
            workspace.problem("nope"),
            Err(Error::ProblemNotFound { .. })
        ));
    }

    #[test]
    fn test_module_file() {
        let (_dir, _workspace, problem) = workspace_with_problem();
        assert_eq!(
            problem.module_file("./variants/map"),
            Some(problem.variants_dir().join("map.ts"))
        );
        assert_eq!(problem.module_file("../../utils/bench"), None);
    }

    #[test]
    fn test_module_file_stays_in_variants_dir() {
        let (_dir, _workspace, problem) = workspace_with_problem();
        for path in [
            "./variants/../testCases",
            "./variants/..",
            "./variants/.",
            "./variants/",
            "./variants/nested/map",
            "./variants/..\\index",
        ] {
            assert_eq!(problem.module_file(path), None, "{}", path);
        }
    }

    #[test]
    fn test_variant_label() {
        let info = VariantInfo {
            name: "map".into(),
            symbol: "mapVariant".into(),
            module_path: None,
            file: None,
        };
        assert_eq!(info.label(), "map  (unknown file)");
    }
}
