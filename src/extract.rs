//! The requirement extraction pipeline.
//!
//! Data flow is strictly linear: raw markup is tokenized into table, row,
//! and cell blocks ([`scanner`]), each cell is reduced to plain text
//! ([`normalize`]), the text is classified and searched for an explicit
//! identifier, each row is assigned a positional section ([`section`]), and
//! the [`Engine`] assembles the ordered result. No stage depends on the
//! output of a later one.
//!
//! Extraction is purely computational and stateless: each call operates on
//! its own [`SourceDocument`] snapshot, performs no I/O, and shares nothing
//! across calls, so repeated extraction of the same document is idempotent
//! and concurrent calls need no coordination.

use std::fmt;

use non_empty_string::NonEmptyString;

use crate::domain::{
    CellPosition, ExtractionResult, Options, ReqId, ReqType, Requirement, SourceDocument,
};

pub mod normalize;
pub mod scanner;
pub mod section;

use scanner::RowBlock;

/// The requirement extraction engine.
///
/// An engine is a pure function of its options: it holds no per-document
/// state, so one instance can serve any number of documents, sequentially
/// or concurrently.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: Options,
}

impl Engine {
    /// Creates an engine with the given options.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }

    /// Extracts every requirement from the document, in table-then-row
    /// document order.
    ///
    /// This is best-effort per table and per row: malformed markup regions
    /// and rows without usable content are dropped with a logged diagnostic
    /// and counted in [`ExtractionResult::skipped_rows`], never failing the
    /// call. A document without tables produces an empty result.
    #[must_use]
    pub fn extract(&self, document: &SourceDocument) -> ExtractionResult {
        let mut records = Vec::new();
        let mut skipped_rows = 0;

        for (table_index, table) in scanner::tables(&document.raw_markup).enumerate() {
            for (row_index, row) in table.rows().enumerate() {
                match self.assemble_row(document, row, row_index) {
                    RowOutcome::Record(record) => records.push(record),
                    RowOutcome::Skipped(reason) => {
                        skipped_rows += 1;
                        tracing::debug!(
                            table = table_index,
                            row = row_index,
                            %reason,
                            "row skipped"
                        );
                    }
                }
            }
        }

        ExtractionResult::new(
            document.page_id.clone(),
            document.title.clone(),
            records,
            skipped_rows,
        )
    }

    /// Runs the per-row stages: pick the first non-empty cell, classify,
    /// resolve an identifier, and assign the section.
    fn assemble_row(
        &self,
        document: &SourceDocument,
        row: RowBlock<'_>,
        row_index: usize,
    ) -> RowOutcome {
        let Some((cell_index, text)) = first_non_empty_cell(row) else {
            return RowOutcome::Skipped(SkipReason::Blank);
        };

        let position = if cell_index == 0 {
            CellPosition::First
        } else {
            CellPosition::Subsequent
        };
        let (req_type, content) = ReqType::classify(&text, position);

        let (id, content) = match self.options.id_prefix() {
            Some(prefix) => ReqId::strip_leading(prefix, content)
                .map_or((None, content), |(id, rest)| (Some(id), rest)),
            None => (None, content),
        };

        let Ok(content) = NonEmptyString::new(content.to_string()) else {
            return RowOutcome::Skipped(SkipReason::Stripped);
        };

        RowOutcome::Record(Requirement {
            id,
            content,
            req_type,
            section: section::assign(row_index, self.options.section_batch_size()),
            source_page_id: document.page_id.clone(),
        })
    }
}

/// Returns the index and plain text of the first cell with any content.
fn first_non_empty_cell(row: RowBlock<'_>) -> Option<(usize, String)> {
    row.cells()
        .map(|cell| normalize::plain_text(cell.as_str()))
        .enumerate()
        .find(|(_, text)| !text.is_empty())
}

/// Per-row pipeline outcome: either a record or an anticipated skip.
///
/// Skips are expected, not exceptional, so they are data rather than
/// control flow; the engine collects them into a diagnostic counter.
#[derive(Debug)]
enum RowOutcome {
    /// The row produced a record.
    Record(Requirement),
    /// The row was dropped.
    Skipped(SkipReason),
}

/// Why a row was omitted from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    /// No cell contained any text after normalization.
    Blank,
    /// Marker and identifier stripping consumed the whole cell text.
    Stripped,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("no non-empty cell"),
            Self::Stripped => f.write_str("content empty after marker stripping"),
        }
    }
}
