//! Add and remove edits on a parsed registry.
//!
//! Both edits work the same way: compute a set of non-overlapping splices
//! against the current source, apply them, and parse the result into a new
//! model. Text outside the splices is never touched.

use std::ops::Range;

use super::model::{Entry, RegistryModel};
use super::parser::{line_end, line_start};
use crate::{Error, Result};

/// Indentation used for the first entry of an empty list.
pub const DEFAULT_INDENT: &str = "  ";

/// Callback parameters used when no existing entry provides a template.
pub const DEFAULT_PARAMS: &str = "(arr: number[], target: number)";

/// A replacement of a byte range with new text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Splice {
    range: Range<usize>,
    text: String,
}

impl Splice {
    fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }

    fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }
}

/// Applies splices in offset order. Splices must not overlap; an insertion
/// at the start of a replaced range is applied before the replacement.
fn apply_splices(src: &str, mut splices: Vec<Splice>) -> String {
    splices.sort_by_key(|s| (s.range.start, s.range.end));
    let mut out = String::with_capacity(src.len() + splices.iter().map(|s| s.text.len()).sum::<usize>());
    let mut cursor = 0;
    for splice in splices {
        debug_assert!(splice.range.start >= cursor, "overlapping splices");
        log::debug!(
            "splice {}..{} -> {:?}",
            splice.range.start,
            splice.range.end,
            splice.text
        );
        out.push_str(&src[cursor..splice.range.start]);
        out.push_str(&splice.text);
        cursor = splice.range.end;
    }
    out.push_str(&src[cursor..]);
    out
}

/// Outcome of removing an entry.
#[derive(Debug, Clone)]
pub struct Removal {
    /// The document after the removal.
    pub model: RegistryModel,
    /// The entry that was removed, as it was parsed before removal.
    pub entry: Entry,
    /// Module path of the deleted import, when the removal left its backing
    /// file without any referencing entry.
    pub orphaned_module: Option<String>,
}

impl RegistryModel {
    /// Appends a new entry and its import.
    ///
    /// The import line is inserted immediately before the re-export marker,
    /// or after the last tracked import when there is no marker. The entry
    /// is appended last, which makes it the latest implementation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if `name` holds a control character, `symbol`
    ///   is not an identifier, or `module_path` cannot be written in an import.
    /// - [`Error::DuplicateName`] if `name` is already registered.
    /// - [`Error::SymbolConflict`] if `symbol` is imported from another path.
    ///
    /// On error the model and its text are unchanged.
    pub fn add_entry(&self, name: &str, symbol: &str, module_path: &str) -> Result<RegistryModel> {
        validate_entry(name, symbol, module_path)?;
        if self.entry(name).is_some() {
            return Err(Error::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut splices = Vec::new();
        match self.import_for_symbol(symbol) {
            Some(existing) if existing.module_path == module_path => {
                log::debug!("import for `{}` already present", symbol);
            }
            Some(existing) => {
                return Err(Error::SymbolConflict {
                    symbol: symbol.to_string(),
                    existing: existing.module_path.clone(),
                });
            }
            None => splices.push(self.import_splice(symbol, module_path)),
        }

        let item = self.render_item(name, symbol);
        splices.extend(self.append_item_splices(&item));

        let text = apply_splices(&self.source, splices);
        RegistryModel::parse_with(&text, self.syntax.clone())
    }

    /// Removes an entry and, when no other entry uses it, its import.
    ///
    /// The import is found through the symbol recorded on the entry. If the
    /// entry's symbol has no import the entry is still removed; the document
    /// heals towards consistency instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry has this name.
    pub fn remove_entry(&self, name: &str) -> Result<Removal> {
        let entry = self.entry(name).cloned().ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;

        let mut splices = self.item_removal_splices(entry.item);

        let shared = self
            .entries
            .iter()
            .any(|other| other.item != entry.item && other.symbol == entry.symbol);

        let mut orphaned_module = None;
        match self.import_for_symbol(&entry.symbol) {
            Some(binding) if shared => {
                log::debug!(
                    "keeping import of `{}`: still referenced by another entry",
                    binding.symbol
                );
            }
            Some(binding) => {
                splices.push(Splice::delete(self.line_removal_range(binding.line.clone())));
                orphaned_module = Some(binding.module_path.clone());
            }
            None => {
                log::warn!(
                    "entry \"{}\" calls `{}` which has no import; removing the entry only",
                    entry.name,
                    entry.symbol
                );
            }
        }

        let kept_dangling: Vec<usize> = self
            .list
            .dangling
            .iter()
            .filter_map(|&comma| shifted_offset(&splices, comma))
            .collect();
        let text = apply_splices(&self.source, splices);
        let model = RegistryModel::parse_with(&text, self.syntax.clone())?
            .without_new_dangling_separators(&kept_dangling)?;

        Ok(Removal {
            model,
            entry,
            orphaned_module,
        })
    }

    fn import_splice(&self, symbol: &str, module_path: &str) -> Splice {
        let eol = self.eol();
        let style = self.import_style;
        let line = format!(
            "import {{ {symbol} }} from {q}{module_path}{q}{semi}",
            q = style.quote,
            semi = if style.semicolon { ";" } else { "" },
        );

        let at = self
            .marker
            .as_ref()
            .map_or(self.import_anchor, |marker| marker.start);

        if at == self.source.len() && !self.source.is_empty() && !self.source.ends_with('\n') {
            Splice::insert(at, format!("{eol}{line}"))
        } else {
            Splice::insert(at, format!("{line}{eol}"))
        }
    }

    /// Renders a new entry item, reusing the callback parameter list of the
    /// first existing entry. The name is written as a double-quoted string.
    fn render_item(&self, name: &str, symbol: &str) -> String {
        let params = self
            .entries
            .iter()
            .find_map(|e| e.params.clone())
            .map_or(DEFAULT_PARAMS, |span| &self.source[span]);
        let args = argument_names(params);

        let name = name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{{ name: \"{name}\", fn: {params} => {symbol}({args}) }}")
    }

    fn append_item_splices(&self, item: &str) -> Vec<Splice> {
        let eol = self.eol();
        let src = self.source.as_str();
        let list = &self.list;
        let body_start = list.open + 1;
        let body_end = body_start + src[body_start..list.close].trim_end().len();

        // Whitespace between the body and `]` after the last line break is
        // the closing bracket's indentation.
        let trailing = &src[body_end..list.close];
        let closing_indent = trailing.rfind('\n').map_or("", |nl| &trailing[nl + 1..]);

        // The new item follows the list's trailing comma style.
        let separator = match list.items.last() {
            Some(last) if last.comma.is_none() => "",
            _ => ",",
        };
        let indent = self.entry_indent();
        let new_line = format!("{indent}{item}{separator}{eol}{closing_indent}");

        // An empty list (possibly holding comments) gets the entry on its own
        // line after whatever it already contains.
        let Some(last) = list.items.last() else {
            return vec![Splice {
                range: body_end..list.close,
                text: format!("{eol}{new_line}"),
            }];
        };

        let mut splices = Vec::new();
        if last.comma.is_none() {
            splices.push(Splice::insert(last.span.end, ","));
        }
        splices.push(Splice {
            range: body_end..list.close,
            text: format!("{eol}{new_line}"),
        });
        splices
    }

    /// Leading whitespace of the first entry that starts its own line.
    fn entry_indent(&self) -> &str {
        let src = self.source.as_str();
        self.entries
            .iter()
            .map(|e| self.list.items[e.item].span.start)
            .chain(self.list.items.iter().map(|i| i.span.start))
            .find_map(|start| {
                let prefix = &src[line_start(src, start)..start];
                (!prefix.is_empty() && prefix.trim().is_empty()).then_some(prefix)
            })
            .unwrap_or(DEFAULT_INDENT)
    }

    /// Splices deleting list item `index` together with one separator.
    fn item_removal_splices(&self, index: usize) -> Vec<Splice> {
        let src = self.source.as_str();
        let item = &self.list.items[index];
        let after = item.comma.map_or(item.span.end, |c| c + 1);

        let head = &src[line_start(src, item.span.start)..item.span.start];
        let rest_end = line_end(src, after);
        let rest = src[after..rest_end].trim();
        let owns_lines = head.trim().is_empty()
            && (rest.is_empty() || rest.starts_with("//"))
            && rest_end <= self.list.close;

        if owns_lines {
            let lines = Splice::delete(self.line_removal_range(line_start(src, item.span.start)..rest_end));
            // The last item of a list without a trailing comma takes the
            // separator in front of it.
            return match (item.comma, self.separator_before(item.span.start)) {
                (None, Some(comma)) => vec![Splice::delete(comma..comma + 1), lines],
                _ => vec![lines],
            };
        }

        if item.comma.is_some() {
            let spaces = src[after..]
                .find(|c: char| c != ' ' && c != '\t')
                .unwrap_or(src.len() - after);
            let end = after + spaces;
            let start = if src[end..].starts_with(['\n', '\r']) || end == src.len() {
                item.span.start - (head.len() - head.trim_end_matches([' ', '\t']).len())
            } else {
                item.span.start
            };
            return vec![Splice::delete(start..end)];
        }

        match self.separator_before(item.span.start) {
            Some(comma) => vec![Splice::delete(comma..item.span.end)],
            None => vec![Splice::delete(item.span.clone())],
        }
    }

    /// Offset of the closest list separator before `offset`, whether it
    /// follows an item or stands alone.
    fn separator_before(&self, offset: usize) -> Option<usize> {
        self.list
            .items
            .iter()
            .filter_map(|i| i.comma)
            .chain(self.list.dangling.iter().copied())
            .filter(|&comma| comma < offset)
            .max()
    }

    /// Extends a whole-line deletion so it does not leave two blank lines
    /// next to each other.
    fn line_removal_range(&self, lines: Range<usize>) -> Range<usize> {
        let src = self.source.as_str();
        let blank_before = lines.start > 0 && {
            let prev = line_start(src, lines.start - 1);
            src[prev..lines.start].trim().is_empty()
        };
        let next_end = line_end(src, lines.end.min(src.len()));
        let blank_after = lines.end < src.len() && src[lines.end..next_end].trim().is_empty();

        if blank_before && blank_after {
            lines.start..next_end
        } else {
            lines
        }
    }

    /// Removes separators left without an item in front of them, except
    /// those at `kept`, which were already there before the edit.
    fn without_new_dangling_separators(self, kept: &[usize]) -> Result<RegistryModel> {
        let src = self.source.as_str();
        let splices: Vec<Splice> = self
            .list
            .dangling
            .iter()
            .filter(|comma| !kept.contains(comma))
            .map(|&comma| {
                let spaces = src[comma + 1..]
                    .find(|c: char| c != ' ' && c != '\t')
                    .unwrap_or(src.len() - comma - 1);
                Splice::delete(comma..comma + 1 + spaces)
            })
            .collect();
        if splices.is_empty() {
            return Ok(self);
        }
        let text = apply_splices(src, splices);
        RegistryModel::parse_with(&text, self.syntax.clone())
    }
}

/// Where `offset` lands once `splices` are applied, or `None` when one of
/// them deletes it.
fn shifted_offset(splices: &[Splice], offset: usize) -> Option<usize> {
    let mut shifted = offset;
    for splice in splices {
        if splice.range.contains(&offset) {
            return None;
        }
        if splice.range.end <= offset {
            shifted = shifted + splice.text.len() - splice.range.len();
        }
    }
    Some(shifted)
}

/// Checks that an entry can be written into a registry and read back as
/// the same name, symbol and module path.
pub(crate) fn validate_entry(name: &str, symbol: &str, module_path: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_control) {
        return Err(Error::InvalidName(format!("{name:?} cannot be used as an entry name")));
    }
    if !is_identifier(symbol) {
        return Err(Error::InvalidName(format!("`{symbol}` is not an identifier")));
    }
    if module_path.is_empty() || module_path.contains(|c: char| c == '"' || c == '\'' || c.is_whitespace()) {
        return Err(Error::InvalidName(format!("{module_path:?} cannot be used as a module path")));
    }
    Ok(())
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Extracts the parameter names from a parameter list such as
/// `(arr: number[], target: number)` for use as call arguments.
fn argument_names(params: &str) -> String {
    let inner = params.trim().trim_start_matches('(').trim_end_matches(')');
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                names.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    names.push(current);

    names
        .iter()
        .filter_map(|param| {
            let name = param
                .split([':', '='])
                .next()
                .unwrap_or_default()
                .trim()
                .trim_end_matches('?');
            (!name.is_empty()).then_some(name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
