//! Structural model of a registry document.

use std::ops::Range;

use super::parser::RegistrySyntax;

/// An import line binding a symbol to a module in the variants folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Imported symbol, e.g. `mapVariant`.
    pub symbol: String,
    /// Module path as written, e.g. `./variants/map`.
    pub module_path: String,
    /// Full line span including its line terminator.
    pub(crate) line: Range<usize>,
}

/// A recognized item of the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// User-facing name (the `name:` string literal).
    pub name: String,
    /// Symbol invoked by the entry's callback.
    pub symbol: String,
    /// Index into the list's items.
    pub(crate) item: usize,
    /// Span of the callback parameter list, parentheses included.
    pub(crate) params: Option<Range<usize>>,
}

/// One depth-0 element of the entry list, recognized or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListItem {
    /// Span from the item's first token to its last.
    pub span: Range<usize>,
    /// Offset of the separating comma following the item.
    pub comma: Option<usize>,
}

/// The array literal holding the entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryList {
    /// Offset of the first token of the declaration statement.
    pub declaration: usize,
    /// Offset of the opening `[`.
    pub open: usize,
    /// Offset of the closing `]`.
    pub close: usize,
    pub items: Vec<ListItem>,
    /// Separators with no item before them, such as `[, a]` or `a,, b`.
    pub dangling: Vec<usize>,
}

/// How new import lines are written, inferred from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImportStyle {
    pub quote: char,
    pub semicolon: bool,
}

impl Default for ImportStyle {
    fn default() -> Self {
        Self {
            quote: '"',
            semicolon: true,
        }
    }
}

/// The region a slice of the document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Text before the first tracked import.
    Preamble,
    /// A tracked import line.
    Import,
    /// The re-export marker line.
    Marker,
    /// Untracked text between structural regions.
    Gap,
    /// Declaration text up to and including the opening bracket.
    ListOpen,
    /// Text of a list item (recognized entry or opaque item).
    Item,
    /// Separators and whitespace between items.
    Separator,
    /// The closing bracket.
    ListClose,
    /// Everything after the entry list.
    Trailer,
}

/// A parsed registry document.
///
/// The model owns the source text and records byte spans for every region it
/// recognized. It is rebuilt from text for every edit and never mutated in
/// place: edits produce a new model.
#[derive(Debug, Clone)]
pub struct RegistryModel {
    pub(crate) source: String,
    pub(crate) syntax: RegistrySyntax,
    pub(crate) imports: Vec<ImportBinding>,
    pub(crate) marker: Option<Range<usize>>,
    /// Insertion offset for new imports when no marker line exists.
    pub(crate) import_anchor: usize,
    pub(crate) import_style: ImportStyle,
    pub(crate) list: EntryList,
    pub(crate) entries: Vec<Entry>,
}

impl RegistryModel {
    /// Returns the document text this model was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the syntax configuration used to parse the document.
    pub fn syntax(&self) -> &RegistrySyntax {
        &self.syntax
    }

    /// Returns the recognized entries in list order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the tracked import bindings in line order.
    pub fn imports(&self) -> &[ImportBinding] {
        &self.imports
    }

    /// Returns whether the document has a re-export marker line.
    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// Returns the number of recognized entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the entry list has no recognized entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by exact, case-sensitive name.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the last entry of the list.
    pub fn latest(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Looks up the import binding for a symbol.
    pub fn import_for_symbol(&self, symbol: &str) -> Option<&ImportBinding> {
        self.imports.iter().find(|b| b.symbol == symbol)
    }

    /// Resolves an entry's module path through the import map.
    pub fn module_path_of(&self, entry: &Entry) -> Option<&str> {
        self.import_for_symbol(&entry.symbol)
            .map(|b| b.module_path.as_str())
    }

    /// Returns the full text of an entry's list item.
    pub fn entry_text(&self, entry: &Entry) -> &str {
        &self.source[self.list.items[entry.item].span.clone()]
    }

    /// Returns the line terminator used by the document.
    pub(crate) fn eol(&self) -> &'static str {
        if self.source.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Splits the document into consecutive labelled regions.
    ///
    /// Concatenating the slices yields the source text.
    pub fn regions(&self) -> Vec<(RegionKind, &str)> {
        let src = self.source.as_str();
        let mut anchors: Vec<(Range<usize>, Option<RegionKind>)> = self
            .imports
            .iter()
            .map(|b| (b.line.clone(), Some(RegionKind::Import)))
            .collect();
        if let Some(marker) = &self.marker {
            anchors.push((marker.clone(), Some(RegionKind::Marker)));
        }
        anchors.push((self.list.declaration..self.list.close + 1, None));
        anchors.sort_by_key(|(range, _)| range.start);

        let mut regions = Vec::new();
        let mut cursor = 0;
        for (range, kind) in anchors {
            if range.start > cursor {
                let gap = if cursor == 0 {
                    RegionKind::Preamble
                } else {
                    RegionKind::Gap
                };
                regions.push((gap, &src[cursor..range.start]));
            }
            match kind {
                Some(kind) => regions.push((kind, &src[range.clone()])),
                None => self.push_list_regions(&mut regions),
            }
            cursor = range.end;
        }
        if cursor < src.len() {
            regions.push((RegionKind::Trailer, &src[cursor..]));
        }

        regions
    }

    fn push_list_regions<'a>(&'a self, regions: &mut Vec<(RegionKind, &'a str)>) {
        let src = self.source.as_str();
        let list = &self.list;
        regions.push((RegionKind::ListOpen, &src[list.declaration..list.open + 1]));

        let mut cursor = list.open + 1;
        for item in &list.items {
            if item.span.start > cursor {
                regions.push((RegionKind::Separator, &src[cursor..item.span.start]));
            }
            regions.push((RegionKind::Item, &src[item.span.clone()]));
            cursor = item.span.end;
        }
        if list.close > cursor {
            regions.push((RegionKind::Separator, &src[cursor..list.close]));
        }
        regions.push((RegionKind::ListClose, &src[list.close..list.close + 1]));
    }

    /// Reassembles the document from its regions.
    pub fn serialize(&self) -> String {
        self.regions().into_iter().map(|(_, text)| text).collect()
    }
}
