//! Structural tokenizer for table markup.
//!
//! Locates table, row, and cell boundaries with a single linear scan over
//! the raw text; no DOM is built and no pattern matching engine is involved,
//! so scan time is proportional to input length with no backtracking.
//!
//! Matching is non-recursive by design: a table nested inside a cell is
//! opaque content of the enclosing cell, never tokenized as a table of its
//! own. The scanner tracks open/close marker depth so that a nested table's
//! markers are neither mistaken for the enclosing block's close nor
//! surfaced as rows or cells of the outer table.
//!
//! Degenerate input degrades instead of failing: an unterminated open
//! marker yields zero blocks for the unmatched region, and stray close
//! markers are ignored.

/// The structural tags recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    TableOpen,
    TableClose,
    RowOpen,
    RowClose,
    CellOpen,
    CellClose,
}

/// A recognized tag and its byte range in the source.
#[derive(Debug, Clone, Copy)]
struct Token {
    tag: Tag,
    /// Offset of the leading `<`.
    start: usize,
    /// Offset one past the terminating `>`.
    end: usize,
}

/// Iterator over the structural tags of a markup fragment.
///
/// Anything that is not a recognized, `>`-terminated structural tag is
/// passed over without being tokenized.
#[derive(Debug)]
struct Tokens<'a> {
    source: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    const fn new(source: &'a str) -> Self {
        Self { source, cursor: 0 }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(offset) = self.source[self.cursor..].find('<') {
            let start = self.cursor + offset;
            let Some(tag) = classify(&self.source[start..]) else {
                self.cursor = start + 1;
                continue;
            };

            // A structural tag with no terminating '>' leaves the remainder
            // of the fragment unmatched; the scan ends there.
            let Some(gt) = self.source[start..].find('>') else {
                self.cursor = self.source.len();
                return None;
            };

            let end = start + gt + 1;
            self.cursor = end;
            return Some(Token { tag, start, end });
        }

        self.cursor = self.source.len();
        None
    }
}

/// Classifies the tag starting at `rest`, which begins with `<`.
fn classify(rest: &str) -> Option<Tag> {
    let body = &rest[1..];
    let (body, closing) = body
        .strip_prefix('/')
        .map_or((body, false), |stripped| (stripped, true));

    for (name, open, close) in [
        ("table", Tag::TableOpen, Tag::TableClose),
        ("tr", Tag::RowOpen, Tag::RowClose),
        ("td", Tag::CellOpen, Tag::CellClose),
    ] {
        if is_named(body, name) {
            return Some(if closing { close } else { open });
        }
    }

    None
}

/// Whether `body` starts with the tag `name` followed by a delimiter, so
/// that `<td>` and `<td class="x">` match but `<textarea>` does not.
fn is_named(body: &str, name: &str) -> bool {
    let Some(head) = body.get(..name.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(name) {
        return false;
    }

    match body.as_bytes().get(name.len()) {
        None => true,
        Some(&delimiter) => {
            delimiter == b'>' || delimiter == b'/' || delimiter.is_ascii_whitespace()
        }
    }
}

/// Tokenizes `markup` into its top-level table blocks, in document order.
#[must_use]
pub const fn tables(markup: &str) -> Tables<'_> {
    Tables {
        source: markup,
        tokens: Tokens::new(markup),
    }
}

/// Iterator over the table blocks of a document.
#[derive(Debug)]
pub struct Tables<'a> {
    source: &'a str,
    tokens: Tokens<'a>,
}

impl<'a> Iterator for Tables<'a> {
    type Item = TableBlock<'a>;

    fn next(&mut self) -> Option<TableBlock<'a>> {
        let mut content_start = None;
        let mut depth = 0usize;

        for token in self.tokens.by_ref() {
            match token.tag {
                Tag::TableOpen => {
                    if depth == 0 {
                        content_start = Some(token.end);
                    }
                    depth += 1;
                }
                Tag::TableClose => match depth {
                    // Stray close with no matching open; ignore.
                    0 => {}
                    1 => {
                        depth = 0;
                        if let Some(start) = content_start.take() {
                            return Some(TableBlock(&self.source[start..token.start]));
                        }
                    }
                    _ => depth -= 1,
                },
                _ => {}
            }
        }

        None
    }
}

/// The markup between one table-open marker and its matching close.
#[derive(Debug, Clone, Copy)]
pub struct TableBlock<'a>(&'a str);

impl<'a> TableBlock<'a> {
    /// Iterates the row blocks of this table, in document order.
    #[must_use]
    pub const fn rows(self) -> RowBlocks<'a> {
        RowBlocks(RawBlocks::new(self.0, Tag::RowOpen, Tag::RowClose))
    }

    /// The raw markup between the table markers.
    #[must_use]
    pub const fn as_str(self) -> &'a str {
        self.0
    }
}

/// The markup between one row-open marker and its matching close.
#[derive(Debug, Clone, Copy)]
pub struct RowBlock<'a>(&'a str);

impl<'a> RowBlock<'a> {
    /// Iterates the cell blocks of this row, in document order.
    #[must_use]
    pub const fn cells(self) -> CellBlocks<'a> {
        CellBlocks(RawBlocks::new(self.0, Tag::CellOpen, Tag::CellClose))
    }

    /// The raw markup between the row markers.
    #[must_use]
    pub const fn as_str(self) -> &'a str {
        self.0
    }
}

/// The markup between one cell-open marker and its matching close.
///
/// A nested table inside the cell is part of this block, untokenized.
#[derive(Debug, Clone, Copy)]
pub struct CellBlock<'a>(&'a str);

impl<'a> CellBlock<'a> {
    /// The raw markup between the cell markers.
    #[must_use]
    pub const fn as_str(self) -> &'a str {
        self.0
    }
}

/// Iterator over the row blocks of a table.
#[derive(Debug)]
pub struct RowBlocks<'a>(RawBlocks<'a>);

impl<'a> Iterator for RowBlocks<'a> {
    type Item = RowBlock<'a>;

    fn next(&mut self) -> Option<RowBlock<'a>> {
        self.0.next().map(RowBlock)
    }
}

/// Iterator over the cell blocks of a row.
#[derive(Debug)]
pub struct CellBlocks<'a>(RawBlocks<'a>);

impl<'a> Iterator for CellBlocks<'a> {
    type Item = CellBlock<'a>;

    fn next(&mut self) -> Option<CellBlock<'a>> {
        self.0.next().map(CellBlock)
    }
}

/// Shared open/close block scan that treats nested tables as opaque.
#[derive(Debug)]
struct RawBlocks<'a> {
    source: &'a str,
    tokens: Tokens<'a>,
    open: Tag,
    close: Tag,
}

impl<'a> RawBlocks<'a> {
    const fn new(source: &'a str, open: Tag, close: Tag) -> Self {
        Self {
            source,
            tokens: Tokens::new(source),
            open,
            close,
        }
    }
}

impl<'a> Iterator for RawBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // Depth of nested table markers; everything inside them is opaque
        // content. The scan only pauses at depth zero, so re-entering with a
        // fresh counter is sound.
        let mut depth = 0usize;
        let mut content_start = None;

        for token in self.tokens.by_ref() {
            match token.tag {
                Tag::TableOpen => depth += 1,
                Tag::TableClose => depth = depth.saturating_sub(1),
                tag => {
                    if depth > 0 {
                        continue;
                    }
                    if tag == self.open {
                        if content_start.is_none() {
                            content_start = Some(token.end);
                        }
                    } else if tag == self.close {
                        if let Some(start) = content_start.take() {
                            return Some(&self.source[start..token.start]);
                        }
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_strings(markup: &str) -> Vec<&str> {
        tables(markup).map(TableBlock::as_str).collect()
    }

    fn row_strings(table: TableBlock<'_>) -> Vec<&str> {
        table.rows().map(RowBlock::as_str).collect()
    }

    fn cell_strings(row: RowBlock<'_>) -> Vec<&str> {
        row.cells().map(CellBlock::as_str).collect()
    }

    #[test]
    fn finds_single_table() {
        let found = table_strings("before <table><tr><td>x</td></tr></table> after");
        assert_eq!(found, vec!["<tr><td>x</td></tr>"]);
    }

    #[test]
    fn finds_tables_in_document_order() {
        let found = table_strings("<table>first</table> text <table>second</table>");
        assert_eq!(found, vec!["first", "second"]);
    }

    #[test]
    fn tolerates_attributes_and_case() {
        let found = table_strings("<TABLE class=\"wrapped\" data-layout=\"default\">a</TaBlE>");
        assert_eq!(found, vec!["a"]);
    }

    #[test]
    fn no_tables_yields_nothing() {
        assert!(table_strings("<p>just a paragraph</p>").is_empty());
    }

    #[test]
    fn unterminated_table_yields_nothing() {
        assert!(table_strings("<table><tr><td>x</td></tr>").is_empty());
    }

    #[test]
    fn unterminated_open_tag_yields_nothing() {
        assert!(table_strings("<table class=\"broken").is_empty());
    }

    #[test]
    fn stray_close_is_ignored() {
        let found = table_strings("</table><table>a</table>");
        assert_eq!(found, vec!["a"]);
    }

    #[test]
    fn similar_tag_names_are_not_markers() {
        assert!(table_strings("<tablex>not a table</tablex>").is_empty());
    }

    #[test]
    fn nested_table_stays_inside_outer_block() {
        let markup = "<table><tr><td><table><tr><td>inner</td></tr></table></td></tr></table>";
        let found = table_strings(markup);
        assert_eq!(
            found,
            vec!["<tr><td><table><tr><td>inner</td></tr></table></td></tr>"]
        );
    }

    #[test]
    fn splits_rows() {
        let markup = "<table><tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>";
        let table = tables(markup).next().unwrap();
        assert_eq!(row_strings(table), vec!["<td>a</td>", "<td>b</td>"]);
    }

    #[test]
    fn splits_cells() {
        let markup = "<table><tr><td>a</td><td colspan=\"2\">b</td></tr></table>";
        let table = tables(markup).next().unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(cell_strings(row), vec!["a", "b"]);
    }

    #[test]
    fn nested_table_rows_are_not_outer_rows() {
        let markup = "<table>\
            <tr><td><table><tr><td>inner</td></tr></table></td></tr>\
            <tr><td>outer</td></tr>\
            </table>";
        let table = tables(markup).next().unwrap();
        let rows = row_strings(table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], "<td>outer</td>");
    }

    #[test]
    fn nested_table_is_opaque_cell_content() {
        let markup = "<table><tr>\
            <td><table><tr><td>inner</td></tr></table></td>\
            <td>plain</td>\
            </tr></table>";
        let table = tables(markup).next().unwrap();
        let row = table.rows().next().unwrap();
        let cells = cell_strings(row);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], "<table><tr><td>inner</td></tr></table>");
        assert_eq!(cells[1], "plain");
    }

    #[test]
    fn row_without_cells_yields_no_cells() {
        let markup = "<table><tr>no cells here</tr></table>";
        let table = tables(markup).next().unwrap();
        let row = table.rows().next().unwrap();
        assert!(cell_strings(row).is_empty());
    }

    #[test]
    fn unterminated_row_is_dropped() {
        let markup = "<table><tr><td>complete</td></tr><tr><td>dangling</table>";
        let table = tables(markup).next().unwrap();
        assert_eq!(row_strings(table), vec!["<td>complete</td>"]);
    }

    #[test]
    fn scan_is_deterministic() {
        let markup = "<table><tr><td>a</td></tr></table><table><tr><td>b</td></tr></table>";
        assert_eq!(table_strings(markup), table_strings(markup));
    }
}
