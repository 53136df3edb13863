//! Registry document parser.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::model::{Entry, EntryList, ImportBinding, ImportStyle, ListItem, RegistryModel};
use super::scan::{Token, TokenKind, match_delimiter, split_items, tokenize};
use crate::{Error, Result};

/// Default name of the entry list declaration.
pub const DEFAULT_LIST_NAME: &str = "implementations";

/// Default module path prefix of tracked imports.
pub const DEFAULT_VARIANTS_PREFIX: &str = "./variants/";

/// Default re-export marker line.
pub const DEFAULT_MARKER: &str = "export { testCases } from \"./testCases\"";

/// Describes what the parser looks for in a registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySyntax {
    /// Name of the array declaration holding the entries.
    pub list_name: String,
    /// Module path prefix identifying tracked variant imports.
    pub variants_prefix: String,
    /// The re-export line new imports are inserted before.
    ///
    /// Matched ignoring whitespace, quote style and a trailing semicolon.
    pub marker: String,
}

impl Default for RegistrySyntax {
    fn default() -> Self {
        Self {
            list_name: DEFAULT_LIST_NAME.to_string(),
            variants_prefix: DEFAULT_VARIANTS_PREFIX.to_string(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl RegistrySyntax {
    /// Returns whether a line (without terminator) is the marker line.
    pub fn is_marker_line(&self, line: &str) -> bool {
        normalize_statement(line) == normalize_statement(&self.marker)
    }
}

fn normalize_statement(line: &str) -> String {
    let mut normalized: String = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '\'' { '"' } else { c })
        .collect();
    while normalized.ends_with(';') {
        normalized.pop();
    }
    normalized
}

fn import_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*import\s*\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\s*from\s*(["'])([^"'\s]+)["']\s*(;?)\s*$"#)
            .expect("import line pattern is valid")
    })
}

/// Parses a registry document using the default syntax.
pub fn parse(text: &str) -> Result<RegistryModel> {
    RegistryModel::parse(text)
}

impl RegistryModel {
    /// Parses a registry document using the default syntax.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntryList`] if no entry list declaration is
    /// found, or [`Error::UnbalancedDelimiters`] if its brackets do not close.
    /// A missing import block is not an error.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, RegistrySyntax::default())
    }

    /// Parses a registry document with a custom syntax.
    pub fn parse_with(text: &str, syntax: RegistrySyntax) -> Result<Self> {
        let tokens = tokenize(text);
        let (list, entries) = parse_entry_list(text, &tokens, &syntax)?;
        let lines = LineScan::new(text, &tokens, &syntax, &list);

        log::debug!(
            "parsed registry: {} entries, {} imports, marker {}",
            entries.len(),
            lines.imports.len(),
            if lines.marker.is_some() { "found" } else { "missing" }
        );

        let import_anchor = lines
            .imports
            .last()
            .map(|b| b.line.end)
            .or(lines.last_any_import)
            .unwrap_or(0);

        Ok(Self {
            source: text.to_string(),
            syntax,
            imports: lines.imports,
            marker: lines.marker,
            import_anchor,
            import_style: lines.style,
            list,
            entries,
        })
    }
}

/// Locates the entry list declaration and recognizes its items.
fn parse_entry_list(src: &str, tokens: &[Token], syntax: &RegistrySyntax) -> Result<(EntryList, Vec<Entry>)> {
    let (declaration, open) = find_declaration(src, tokens, &syntax.list_name).ok_or_else(|| {
        Error::MissingEntryList {
            list_name: syntax.list_name.clone(),
        }
    })?;

    let close = match_delimiter(tokens, open, src.len())
        .map_err(|offset| Error::UnbalancedDelimiters { offset })?;

    let mut items = Vec::new();
    let mut entries = Vec::new();
    let mut dangling = Vec::new();

    for (range, comma) in split_items(tokens, open, close) {
        let comma = comma.map(|idx| tokens[idx].start);
        if range.is_empty() {
            dangling.extend(comma);
            continue;
        }

        let item_tokens = &tokens[range.clone()];
        let span = item_tokens[0].start..item_tokens[item_tokens.len() - 1].end;
        if let Some((name, symbol, params)) = recognize_entry(src, item_tokens) {
            entries.push(Entry {
                name,
                symbol,
                item: items.len(),
                params,
            });
        }
        items.push(ListItem { span, comma });
    }

    let list = EntryList {
        declaration,
        open: tokens[open].start,
        close: tokens[close].start,
        items,
        dangling,
    };
    Ok((list, entries))
}

/// Finds `[export] const|let|var <name> [: Type] = [` and returns the
/// declaration start offset and the token index of the opening bracket.
fn find_declaration(src: &str, tokens: &[Token], list_name: &str) -> Option<(usize, usize)> {
    for i in 0..tokens.len().saturating_sub(1) {
        let keyword = tokens[i];
        if !(keyword.is_ident(src, "const") || keyword.is_ident(src, "let") || keyword.is_ident(src, "var")) {
            continue;
        }
        if !tokens[i + 1].is_ident(src, list_name) {
            continue;
        }

        let mut j = i + 2;
        if tokens.get(j).is_some_and(|t| t.is_punct(':')) {
            while j < tokens.len() && !tokens[j].is_punct('=') && !tokens[j].is_punct(';') {
                j += 1;
            }
        }

        let assigns = tokens.get(j).is_some_and(|t| t.is_punct('='));
        let opens = tokens.get(j + 1).is_some_and(|t| t.is_punct('['));
        if assigns && opens {
            let declaration = match i.checked_sub(1).map(|p| tokens[p]) {
                Some(prev) if prev.is_ident(src, "export") => prev.start,
                _ => keyword.start,
            };
            return Some((declaration, j + 1));
        }
    }
    None
}

const CALL_KEYWORDS: &[&str] = &["return", "await", "new", "void", "typeof"];

/// Recognizes an entry item: a `name: "<literal>"` property anywhere in the
/// item and the identifier its callback invokes.
fn recognize_entry(src: &str, tokens: &[Token]) -> Option<(String, String, Option<Range<usize>>)> {
    let name = tokens.windows(3).find_map(|w| {
        (w[0].is_ident(src, "name") && w[1].is_punct(':') && w[2].kind == TokenKind::Str)
            .then(|| unquote(w[2].text(src)))
    })?;

    if let Some(arrow) = tokens.iter().position(|t| t.kind == TokenKind::Arrow) {
        let symbol = tokens[arrow + 1..].windows(2).find_map(|w| {
            let is_call = w[0].kind == TokenKind::Ident && w[1].is_punct('(');
            (is_call && !CALL_KEYWORDS.contains(&w[0].text(src))).then(|| w[0].text(src).to_string())
        });
        if let Some(symbol) = symbol {
            return Some((name, symbol, callback_params(tokens, arrow)));
        }
    }

    // `fn: someVariant` without a wrapping arrow function
    let symbol = tokens.windows(3).enumerate().find_map(|(i, w)| {
        let bare = w[0].is_ident(src, "fn")
            && w[1].is_punct(':')
            && w[2].kind == TokenKind::Ident
            && tokens.get(i + 3).is_none_or(|t| t.is_punct(',') || t.is_punct('}'));
        bare.then(|| w[2].text(src).to_string())
    })?;
    Some((name, symbol, None))
}

/// Span of the parameter list before the arrow at `arrow`.
fn callback_params(tokens: &[Token], arrow: usize) -> Option<Range<usize>> {
    let last = tokens[..arrow].last()?;
    if last.kind == TokenKind::Ident {
        return Some(last.span());
    }
    if !last.is_punct(')') {
        return None;
    }

    let mut depth = 0usize;
    for token in tokens[..arrow].iter().rev() {
        match token.kind {
            TokenKind::Punct(')') => depth += 1,
            TokenKind::Punct('(') => {
                depth -= 1;
                if depth == 0 {
                    return Some(token.start..last.end);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strips the quotes of a string literal and resolves simple escapes.
fn unquote(literal: &str) -> String {
    let inner = literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Line-oriented recognition of imports and the marker.
struct LineScan {
    imports: Vec<ImportBinding>,
    marker: Option<Range<usize>>,
    style: ImportStyle,
    /// End of the line finishing the last import statement of any kind
    /// before the entry list.
    last_any_import: Option<usize>,
}

impl LineScan {
    fn new(src: &str, tokens: &[Token], syntax: &RegistrySyntax, list: &EntryList) -> Self {
        let statement_starts: HashSet<usize> = tokens
            .iter()
            .filter(|t| t.is_ident(src, "import") || t.is_ident(src, "export"))
            .map(|t| t.start)
            .collect();
        let list_span = list.declaration..list.close + 1;

        let mut scan = Self {
            imports: Vec::new(),
            marker: None,
            style: ImportStyle::default(),
            last_any_import: None,
        };
        let mut style_source: Option<ImportStyle> = None;
        let mut seen_symbols = HashSet::new();

        let mut line_start = 0;
        for line in src.split_inclusive('\n') {
            let line_span = line_start..line_start + line.len();
            line_start = line_span.end;

            if line_span.start < list_span.end && list_span.start < line_span.end {
                continue;
            }

            let content = line.trim_end_matches(['\n', '\r']);
            let lead = content.len() - content.trim_start().len();
            if !statement_starts.contains(&(line_span.start + lead)) {
                continue;
            }

            if let Some(caps) = import_line_pattern().captures(content) {
                let module_path = caps[3].to_string();
                if !module_path.starts_with(&syntax.variants_prefix) {
                    continue;
                }
                let symbol = caps[1].to_string();
                if !seen_symbols.insert(symbol.clone()) {
                    log::warn!("symbol `{}` is imported more than once", symbol);
                }
                if scan.imports.is_empty() {
                    style_source = Some(ImportStyle {
                        quote: caps[2].chars().next().unwrap_or('"'),
                        semicolon: !caps[4].is_empty(),
                    });
                }
                scan.imports.push(ImportBinding {
                    symbol,
                    module_path,
                    line: line_span,
                });
            } else if scan.marker.is_none() && syntax.is_marker_line(content) {
                if style_source.is_none() {
                    style_source = Some(ImportStyle {
                        quote: if content.contains('\'') { '\'' } else { '"' },
                        semicolon: content.trim_end().ends_with(';'),
                    });
                }
                scan.marker = Some(line_span);
            }
        }

        scan.last_any_import = last_import_statement_end(src, tokens, list.declaration);
        if let Some(style) = style_source {
            scan.style = style;
        }
        scan
    }
}

/// Returns the end of the line on which the last top-level import statement
/// before `limit` ends.
fn last_import_statement_end(src: &str, tokens: &[Token], limit: usize) -> Option<usize> {
    let mut end = None;
    for (i, token) in tokens.iter().enumerate() {
        if token.start >= limit {
            break;
        }
        if !token.is_ident(src, "import") || !starts_line(src, token.start) {
            continue;
        }
        // The statement ends at its module specifier string.
        let specifier = tokens[i + 1..].iter().enumerate().find_map(|(k, t)| {
            let prev = tokens[i + k];
            (t.kind == TokenKind::Str && (k == 0 || prev.is_ident(src, "from"))).then_some(t.end)
        });
        if let Some(spec_end) = specifier {
            end = Some(line_end(src, spec_end));
        }
    }
    end
}

fn starts_line(src: &str, offset: usize) -> bool {
    src[..offset]
        .rfind('\n')
        .map_or(&src[..offset], |nl| &src[nl + 1..offset])
        .trim()
        .is_empty()
}

/// Offset just past the line terminator of the line containing `offset`.
pub(crate) fn line_end(src: &str, offset: usize) -> usize {
    src[offset..].find('\n').map_or(src.len(), |i| offset + i + 1)
}

/// Offset of the first byte of the line containing `offset`.
pub(crate) fn line_start(src: &str, offset: usize) -> usize {
    src[..offset].rfind('\n').map_or(0, |i| i + 1)
}
